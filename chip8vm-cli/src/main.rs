//! Entrypoint for CLI
use std::{env, error::Error, fs, time::Instant};

#[macro_use]
extern crate slog;
use chip8vm::{prelude::*, IMPL_VERSION};
use log::{error, info};
use slog::Drain;

mod config;
mod devices;
mod error;
mod inputmap;

use self::{config::CliConfig, devices::TermDevices, error::AppError};

static USAGE: &str = r#"
usage: chip8vm CMD ROM [CONFIG]

commands:
    run     Run the target ROM file, then print the display
    dis     Disassemble the target ROM into readable assembly

examples:
    chip8vm run maze.ch8
    chip8vm run breakout.ch8 breakout.yaml
    chip8vm dis breakout.ch8
"#;

fn run_bytecode(filepath: &str, config: CliConfig) -> Result<(), AppError> {
    let bytecode = fs::read(filepath)?;

    let input_map = config.input_map();
    log::debug!("keymap has {} bindings", input_map.len());
    let script = config.key_events(&input_map)?;

    let mut vm = Chip8Vm::new(config.vm);
    vm.load_bytecode(bytecode.as_slice())?;

    let mut devices = TermDevices::new(script, config.max_steps);

    let start = Instant::now();
    let result = vm.execute(&mut devices);
    let end = Instant::now();

    info!(
        "ran {} steps, {} frames, in {}ms",
        devices.steps(),
        devices.frames(),
        end.duration_since(start).as_nanos() as f64 / 1000000.0
    );
    println!("{}", vm.dump_display().map_err(Chip8Error::from)?);

    result?;

    Ok(())
}

fn run_disassembler(filepath: &str) -> Result<(), AppError> {
    let bytecode = fs::read(filepath)?;
    Disassembler::new(bytecode.as_slice())
        .print_bytecode()
        .map_err(Chip8Error::from)?;
    Ok(())
}

fn init_logger(level: log::Level) -> Result<slog_scope::GlobalLoggerGuard, AppError> {
    let decorator = slog_term::PlainDecorator::new(std::io::stderr());
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, o!("version" => IMPL_VERSION));

    let scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(level)?;

    Ok(scope_guard)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cmd = match parse_args() {
        Some(cmd) => cmd,
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            std::process::exit(64)
        }
    };

    let config = match cmd.config_path() {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    // Dropping the guard flushes the async drain.
    let scope_guard = init_logger(config.log_level()?)?;
    info!("chip8vm v{IMPL_VERSION}");
    log::debug!("config: {:#?}", config);

    let result = match cmd {
        Cmd::Run { filepath, .. } => run_bytecode(&filepath, config),
        Cmd::Dis { filepath } => run_disassembler(&filepath),
    };

    if let Err(err) = result {
        error!("{err}");
        drop(scope_guard);
        std::process::exit(1);
    }

    Ok(())
}

fn parse_args() -> Option<Cmd> {
    let mut args = env::args().skip(1);
    match args.next() {
        Some(cmd) => {
            // don't format me T.T
            match cmd.as_str() {
                "run" => Some(Cmd::Run {
                    filepath: consume_arg(&mut args)?,
                    config: args.next(),
                }),
                "dis" => Some(Cmd::Dis {
                    filepath: consume_arg(&mut args)?,
                }),
                _ => None,
            }
        }
        None => None,
    }
}

/// Consumes the next argument, which must exist.
fn consume_arg(args: &mut impl Iterator<Item = String>) -> Option<String> {
    args.next()
}

fn print_usage() {
    println!("chip8vm v{IMPL_VERSION}");
    println!("{USAGE}");
}

enum Cmd {
    /// Run file
    Run {
        filepath: String,
        config: Option<String>,
    },
    /// Disassemble file
    Dis { filepath: String },
}

impl Cmd {
    fn config_path(&self) -> Option<&str> {
        match self {
            Self::Run { config, .. } => config.as_deref(),
            Self::Dis { .. } => None,
        }
    }
}
