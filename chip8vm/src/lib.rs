mod bytecode;
mod clock;
pub mod constants;
mod cpu;
mod devices;
mod disasm;
mod error;
mod instr;
mod vm;

pub use self::{
    clock::timer_duration,
    devices::{Devices, Headless, InvalidKeyCode, KeyCode, KeyState, Keypad},
    error::{Chip8Error, Chip8Result, Fault},
    instr::Op,
    vm::{DecodePolicy, Hz, TimerMode},
};

pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use super::{
        devices::{Devices, KeyCode, KeyState, Keypad},
        disasm::Disassembler,
        error::{Chip8Error, Chip8Result, Fault},
        vm::{Chip8Conf, Chip8Vm, Flow},
    };
}
