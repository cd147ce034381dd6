//! Application errors
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
}

impl std::error::Error for AppError {}

#[derive(Debug)]
pub enum ErrorKind {
    Chip8(chip8vm::Chip8Error),
    Io(std::io::Error),
    Config(serde_yaml::Error),
    LogLevel(log::ParseLevelError),
    Logger(log::SetLoggerError),
    /// Scripted input names a host key that isn't in the keymap.
    UnmappedKey(smol_str::SmolStr),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chip8(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::LogLevel(err) => write!(f, "invalid log level: {err}"),
            Self::Logger(err) => write!(f, "{err}"),
            Self::UnmappedKey(name) => write!(f, "no keymap entry for host key '{name}'"),
        }
    }
}

impl From<chip8vm::Chip8Error> for AppError {
    fn from(err: chip8vm::Chip8Error) -> Self {
        Self {
            kind: ErrorKind::Chip8(err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self {
            kind: ErrorKind::Config(err),
        }
    }
}

impl From<log::ParseLevelError> for AppError {
    fn from(err: log::ParseLevelError) -> Self {
        Self {
            kind: ErrorKind::LogLevel(err),
        }
    }
}

impl From<log::SetLoggerError> for AppError {
    fn from(err: log::SetLoggerError) -> Self {
        Self {
            kind: ErrorKind::Logger(err),
        }
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}
