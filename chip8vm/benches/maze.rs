use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chip8vm::{prelude::*, Headless};

fn criterion_benchmark(c: &mut Criterion) {
    {
        let mut vm = Chip8Vm::new(Chip8Conf::default());
        let mut devices = Headless::default();

        c.bench_function("maze bytecode", |b| {
            b.iter(|| {
                vm.load_bytecode(include_bytes!("../programs/maze")).unwrap();
                let step_count = black_box(1000_usize);
                black_box(vm.run_steps(step_count, &mut devices))
            })
        });
    }

    {
        let mut vm = Chip8Vm::new(Chip8Conf::default());
        vm.load_bytecode(include_bytes!("../programs/maze")).unwrap();
        let keys = KeyState::new();

        c.bench_function("maze single step", |b| {
            b.iter(|| black_box(vm.step(&keys)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
