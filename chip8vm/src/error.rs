//! Result and errors.
use std::fmt::{self, Display, Formatter};

use crate::constants::{Address, MAX_PROGRAM_SIZE};

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug)]
pub enum Chip8Error {
    /// Attempt to load a bytecode program that can't fit in memory.
    LargeProgram { size: usize },
    /// VM stopped on an unrecoverable fault during the interpreter loop.
    Fault(Fault),
    Fmt(fmt::Error),
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeProgram { size } => write!(
                f,
                "program too large for VM memory: {size} bytes, limit is {MAX_PROGRAM_SIZE}"
            ),
            Self::Fault(fault) => write!(f, "runtime error: {fault}"),
            Self::Fmt(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Chip8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fmt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<fmt::Error> for Chip8Error {
    fn from(err: fmt::Error) -> Self {
        Chip8Error::Fmt(err)
    }
}

impl From<Fault> for Chip8Error {
    fn from(fault: Fault) -> Self {
        Chip8Error::Fault(fault)
    }
}

/// Diagnostic event raised by the interpreter.
///
/// The address is where the offending instruction was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Instruction word matches no supported opcode.
    UnknownOpcode { addr: Address, word: u16 },
    /// `CALL` with every stack slot in use.
    StackOverflow { addr: Address },
    /// `RET` with an empty stack.
    StackUnderflow { addr: Address },
    /// A memory access through `I` went past the end of memory
    /// and was wrapped back to the start.
    AddressWrapped { addr: Address, target: usize },
}

impl Fault {
    /// Stack faults corrupt control flow and can't be recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StackOverflow { .. } | Self::StackUnderflow { .. })
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOpcode { addr, word } => {
                write!(f, "unknown opcode {word:04X} at {addr:04X}")
            }
            Self::StackOverflow { addr } => write!(f, "call stack overflow at {addr:04X}"),
            Self::StackUnderflow { addr } => write!(f, "call stack underflow at {addr:04X}"),
            Self::AddressWrapped { addr, target } => write!(
                f,
                "memory access to {target:#X} wrapped around at {addr:04X}"
            ),
        }
    }
}
