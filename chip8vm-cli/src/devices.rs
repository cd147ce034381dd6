//! Terminal devices for the driver loop.
use std::{collections::VecDeque, time::Duration};

use chip8vm::{constants::DisplayBuffer, prelude::*};

use crate::config::KeyEvent;

/// Devices for running a ROM in the terminal.
///
/// Keyboard input is replayed from a script. Frames and tones are logged,
/// and the final display is printed by the caller.
pub struct TermDevices {
    keys: KeyState,
    script: VecDeque<KeyEvent>,
    steps: usize,
    max_steps: usize,
    frames: usize,
}

impl TermDevices {
    /// Events must be sorted by step.
    pub fn new(script: Vec<KeyEvent>, max_steps: usize) -> Self {
        Self {
            keys: KeyState::new(),
            script: script.into(),
            steps: 0,
            max_steps,
            frames: 0,
        }
    }

    /// Number of driver iterations so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    fn apply_script(&mut self) {
        while let Some(event) = self.script.front().copied() {
            if event.step > self.steps {
                break;
            }
            self.script.pop_front();
            log::debug!("step {}: {} pressed={}", self.steps, event.key, event.pressed);
            self.keys.set(event.key, event.pressed);
        }
    }
}

impl Keypad for TermDevices {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(key)
    }

    fn poll_any_pressed(&self) -> Option<KeyCode> {
        self.keys.first()
    }
}

impl Devices for TermDevices {
    fn poll(&mut self) -> bool {
        if self.steps >= self.max_steps {
            log::info!("step limit of {} reached", self.max_steps);
            return false;
        }
        self.apply_script();
        self.steps += 1;
        true
    }

    fn draw(&mut self, display: &DisplayBuffer) {
        self.frames += 1;
        let lit = display.iter().filter(|px| **px).count();
        log::trace!("frame {}: {lit} pixels lit", self.frames);
    }

    fn buzz(&mut self, duration: Duration) {
        log::info!("beep for {}ms", duration.as_millis());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn event(step: usize, key: KeyCode, pressed: bool) -> KeyEvent {
        KeyEvent { step, key, pressed }
    }

    #[test]
    fn test_script_replay() {
        let mut devices = TermDevices::new(
            vec![
                event(1, KeyCode::Key3, true),
                event(1, KeyCode::Key4, true),
                event(3, KeyCode::Key3, false),
            ],
            10,
        );

        assert!(devices.poll());
        assert_eq!(devices.poll_any_pressed(), None);

        assert!(devices.poll());
        assert!(devices.is_pressed(KeyCode::Key3));
        assert!(devices.is_pressed(KeyCode::Key4));

        devices.poll();
        devices.poll();
        assert!(!devices.is_pressed(KeyCode::Key3));
        assert_eq!(devices.poll_any_pressed(), Some(KeyCode::Key4));
    }

    #[test]
    fn test_step_limit() {
        let mut devices = TermDevices::new(Vec::new(), 2);
        assert!(devices.poll());
        assert!(devices.poll());
        assert!(!devices.poll());
        assert_eq!(devices.steps(), 2);
    }

    #[test]
    fn test_key_wait_program() {
        #[rustfmt::skip]
        let program = [
            0xF3, 0x0A, // LD v3, K
            0x12, 0x02, // JP self
        ];
        let mut vm = Chip8Vm::new(Chip8Conf::default());
        vm.load_bytecode(&program).unwrap();

        let mut devices = TermDevices::new(vec![event(5, KeyCode::KeyE, true)], 20);
        assert_eq!(vm.execute(&mut devices).unwrap(), Flow::Interrupt);
        assert_eq!(vm.registers()[3], 0xE);
        assert_eq!(vm.pc(), 0x202);
        assert_eq!(devices.steps(), 20);
    }
}
