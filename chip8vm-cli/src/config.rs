//! Run configuration, loaded from YAML.
use std::{fs, path::Path, str::FromStr};

use chip8vm::prelude::*;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::{
    error::{AppError, ErrorKind},
    inputmap::{InputDef, InputMap},
};

pub const DEFAULT_MAX_STEPS: usize = 100_000;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub vm: Chip8Conf,
    /// Driver loop stops after this many iterations.
    pub max_steps: usize,
    pub log_level: SmolStr,
    /// Host key bindings. Empty means the default layout.
    pub keymap: Vec<InputDef>,
    /// Scripted key events, replayed in step order.
    pub input: Vec<InputScript>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            vm: Chip8Conf::default(),
            max_steps: DEFAULT_MAX_STEPS,
            log_level: SmolStr::new("info"),
            keymap: Vec::new(),
            input: Vec::new(),
        }
    }
}

/// Host key event applied before the given driver step.
#[derive(Debug, Clone, Deserialize)]
pub struct InputScript {
    pub step: usize,
    pub key: SmolStr,
    #[serde(default = "pressed_default")]
    pub pressed: bool,
}

fn pressed_default() -> bool {
    true
}

/// Keypad event with the host key resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub step: usize,
    pub key: KeyCode,
    pub pressed: bool,
}

impl CliConfig {
    pub fn from_file(filepath: impl AsRef<Path>) -> Result<Self, AppError> {
        let text = fs::read_to_string(filepath)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn log_level(&self) -> Result<log::Level, AppError> {
        Ok(log::Level::from_str(self.log_level.trim())?)
    }

    pub fn input_map(&self) -> InputMap {
        if self.keymap.is_empty() {
            InputMap::default()
        } else {
            InputMap::new(&self.keymap)
        }
    }

    /// Resolve the scripted input through the keymap, sorted by step.
    pub fn key_events(&self, input_map: &InputMap) -> Result<Vec<KeyEvent>, AppError> {
        let mut events = self
            .input
            .iter()
            .map(|script| match input_map.map_key(&script.key) {
                Some(key) => Ok(KeyEvent {
                    step: script.step,
                    key,
                    pressed: script.pressed,
                }),
                None => Err(AppError::from(ErrorKind::UnmappedKey(script.key.clone()))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Stable, so events on the same step keep their file order.
        events.sort_by_key(|ev| ev.step);

        Ok(events)
    }
}
