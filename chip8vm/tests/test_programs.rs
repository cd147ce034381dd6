use chip8vm::{constants::*, prelude::*, DecodePolicy, Headless, TimerMode};

fn load(conf: Chip8Conf, program: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(conf);
    vm.load_bytecode(program).unwrap();
    vm
}

/// Counts to 10 in v0 through a subroutine, then loops in place.
#[test]
#[rustfmt::skip]
fn test_subroutine_loop() {
    let mut vm = load(Chip8Conf::default(), &[
        0x22, 0x08, // 0x200 CALL .inc
        0x30, 0x0A, // 0x202 SE v0, 10
        0x12, 0x00, // 0x204 JP 0x200
        0x12, 0x06, // 0x206 JP self
        0x70, 0x01, // 0x208 .inc ADD v0, 1
        0x00, 0xEE, // 0x20A RET
    ]);

    let flow = vm.run_steps(200, &mut Headless::default()).unwrap();
    assert_eq!(flow, Flow::Jump);
    assert_eq!(vm.registers()[0], 10);
    assert_eq!(vm.pc(), 0x206);
    assert!(vm.stack().is_empty());
}

#[test]
#[rustfmt::skip]
fn test_key_wait_with_devices() {
    let mut vm = load(Chip8Conf::default(), &[
        0xF4, 0x0A, // LD v4, K
        0x12, 0x02, // JP self
    ]);
    let mut devices = Headless::default();

    assert_eq!(vm.run_steps(10, &mut devices).unwrap(), Flow::KeyWait);
    assert!(vm.is_waiting_for_key());
    assert_eq!(vm.pc(), MEM_START as Address);

    devices.keys.set(KeyCode::Key9, true);
    vm.run_steps(1, &mut devices).unwrap();
    assert!(!vm.is_waiting_for_key());
    assert_eq!(vm.registers()[4], 9);
}

#[test]
fn test_print_glyphs() {
    // Draw the digits of 0x5A side by side.
    #[rustfmt::skip]
    let mut vm = load(Chip8Conf::default(), &[
        0x60, 0x05, // LD v0, 5
        0xF0, 0x29, // LD F, v0
        0xD1, 0x25, // DRW v1, v2, 5
        0x60, 0x0A, // LD v0, 0xA
        0xF0, 0x29, // LD F, v0
        0x71, 0x05, // ADD v1, 5
        0xD1, 0x25, // DRW v1, v2, 5
    ]);
    let mut devices = Headless::default();
    vm.run_steps(7, &mut devices).unwrap();

    let dump = vm.dump_display().unwrap();
    let rows: Vec<&str> = dump.lines().take(5).map(|row| &row[..10]).collect();
    assert_eq!(
        rows,
        [
            "####.####.",
            "#....#..#.",
            "####.####.",
            "...#.#..#.",
            "####.#..#.",
        ]
    );
    assert_eq!(devices.frames, 2);
    assert_eq!(vm.registers()[0xF], 0);
}

#[test]
fn test_sound_request_reaches_devices() {
    let mut vm = load(Chip8Conf::default(), &[0x60, 0x3C, 0xF0, 0x18]);
    let mut devices = Headless::default();

    assert_eq!(
        vm.run_steps(2, &mut devices).unwrap(),
        Flow::Sound { ticks: 60 }
    );
    assert_eq!(devices.tones, 1);
    assert!(vm.sound_active());
}

#[test]
fn test_fatal_fault_stops_driver() {
    let mut vm = load(Chip8Conf::default(), &[0x60, 0x01, 0x00, 0xEE]);
    let mut devices = Headless::default();

    let err = vm.run_steps(10, &mut devices).unwrap_err();
    assert_eq!(
        err.to_string(),
        "runtime error: call stack underflow at 0202"
    );
    assert_eq!(vm.error(), Some(Fault::StackUnderflow { addr: 0x202 }));

    // Reloading clears the error.
    vm.load_bytecode(&[0x12, 0x00]).unwrap();
    assert!(vm.error().is_none());
    assert_eq!(vm.run_steps(3, &mut devices).unwrap(), Flow::Jump);
}

#[test]
fn test_halt_on_unknown_opcode() {
    let conf = Chip8Conf {
        unknown_opcode: DecodePolicy::Halt,
        ..Default::default()
    };
    let mut vm = load(conf, &[0x61, 0x01, 0xFF, 0xFF]);

    let err = vm.execute(&mut Headless::default()).unwrap_err();
    assert!(matches!(
        err,
        Chip8Error::Fault(Fault::UnknownOpcode { addr: 0x202, word: 0xFFFF })
    ));
    assert_eq!(vm.pc(), 0x202);
    assert_eq!(vm.registers()[1], 1);
}

#[test]
fn test_decoupled_timers_left_alone_by_steps() {
    let conf = Chip8Conf {
        timer_mode: TimerMode::Decoupled,
        ..Default::default()
    };
    let mut vm = load(conf, &[0x60, 0xFF, 0xF0, 0x15, 0x12, 0x04]);

    for _ in 0..100 {
        vm.step(&KeyState::new()).unwrap();
    }
    assert_eq!(vm.delay_timer(), 0xFF);
}

#[test]
fn test_large_program_message() {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    let err = vm.load_bytecode(&[0; MAX_PROGRAM_SIZE + 2]).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "program too large for VM memory: {} bytes, limit is {MAX_PROGRAM_SIZE}",
            MAX_PROGRAM_SIZE + 2
        )
    );
}
