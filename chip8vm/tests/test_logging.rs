use std::sync::{Mutex, Once};

use chip8vm::{prelude::*, Headless};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps every record, so tests can check what the machine reported.
struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn captured(level: Level, message: &str) -> bool {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURE
        .records
        .lock()
        .unwrap()
        .iter()
        .any(|(l, m)| *l == level && m == message)
}

fn init() {
    captured(Level::Trace, "");
}

#[test]
fn test_reset_is_logged() {
    init();
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    vm.reset();
    assert!(captured(Level::Debug, "machine reset"));

    vm.load_bytecode(&[0x00, 0xE0, 0x00, 0xE0]).unwrap();
    assert!(captured(Level::Debug, "loaded program of 4 bytes"));
}

#[test]
fn test_faults_are_logged() {
    init();
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    vm.load_bytecode(&[0xE0, 0xFF, 0x00, 0xEE]).unwrap();

    let mut devices = Headless::default();
    assert!(vm.run_steps(2, &mut devices).is_err());

    assert!(captured(Level::Warn, "unknown opcode E0FF at 0200"));
    assert!(captured(Level::Error, "call stack underflow at 0202"));
}
