//! IO device interface
use std::{fmt, time::Duration};

use crate::constants::*;

/// Input source queried by the interpreter.
///
/// Implementations report the current state of the 16 keypad keys.
/// The interpreter never blocks on input: `Fx0A` keeps polling
/// [`Keypad::poll_any_pressed`] on each step until it yields a key.
pub trait Keypad {
    /// Checks immediately whether the given key is currently pressed.
    fn is_pressed(&self, key: KeyCode) -> bool;

    /// Retrieve a key that is currently pressed down, if any.
    fn poll_any_pressed(&self) -> Option<KeyCode>;
}

/// Hooks to provide IO devices to the driver loop of the virtual machine.
pub trait Devices: Keypad {
    /// Called once per driver iteration, before stepping the machine.
    ///
    /// This is the place to refresh the keyboard state. Returning `false`
    /// interrupts the driver loop.
    fn poll(&mut self) -> bool {
        true
    }

    /// Blit the display buffer to screen output.
    fn draw(&mut self, display: &DisplayBuffer);

    /// Play a tone for the given duration.
    fn buzz(&mut self, duration: Duration);
}

/// Keyboard input state. Pressed is a 1 bit, released is a 0 bit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState(u16);

impl KeyState {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.0 |= 1 << key.as_u8();
        } else {
            self.0 &= !(1 << key.as_u8());
        }
    }

    pub fn get(&self, key: KeyCode) -> bool {
        self.0 & (1 << key.as_u8()) > 0
    }

    /// Check whether any key is pressed down.
    #[inline(always)]
    pub fn any(&self) -> bool {
        self.0 > 0
    }

    /// Retrieve the first key that is pressed down, lowest value first.
    #[inline]
    pub fn first(&self) -> Option<KeyCode> {
        if self.any() {
            Some(KeyCode::from_u8_masked(self.0.trailing_zeros() as u8))
        } else {
            None
        }
    }

    /// Clear the keyboard input state, setting all keys to up.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline(always)]
    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl Keypad for KeyState {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.get(key)
    }

    fn poll_any_pressed(&self) -> Option<KeyCode> {
        self.first()
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "keys:")?;
        for i in 0..KEY_COUNT {
            let key = KeyCode::from_u8_masked(i);
            if self.get(key) {
                write!(f, " {key}")?;
            }
        }
        Ok(())
    }
}

/// Devices for running without any screen, speaker or keyboard attached.
///
/// Keeps count of the frames and tones it was sent.
#[derive(Debug, Default)]
pub struct Headless {
    pub keys: KeyState,
    pub frames: usize,
    pub tones: usize,
}

impl Keypad for Headless {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(key)
    }

    fn poll_any_pressed(&self) -> Option<KeyCode> {
        self.keys.first()
    }
}

impl Devices for Headless {
    fn draw(&mut self, _display: &DisplayBuffer) {
        self.frames += 1;
    }

    fn buzz(&mut self, _duration: Duration) {
        self.tones += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyCode {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl KeyCode {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Key identified by the low nibble of the given value.
    ///
    /// Register values are 8-bit, but the keypad only has 16 keys.
    pub fn from_u8_masked(key_id: u8) -> Self {
        match key_id & 0xF {
            0 => Self::Key0,
            1 => Self::Key1,
            2 => Self::Key2,
            3 => Self::Key3,
            4 => Self::Key4,
            5 => Self::Key5,
            6 => Self::Key6,
            7 => Self::Key7,
            8 => Self::Key8,
            9 => Self::Key9,
            10 => Self::KeyA,
            11 => Self::KeyB,
            12 => Self::KeyC,
            13 => Self::KeyD,
            14 => Self::KeyE,
            _ => Self::KeyF,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<KeyCode> for u8 {
    fn from(keycode: KeyCode) -> Self {
        keycode.as_u8()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyCode;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        if key_id < KEY_COUNT {
            Ok(Self::from_u8_masked(key_id))
        } else {
            Err(InvalidKeyCode)
        }
    }
}

#[derive(Debug)]
pub struct InvalidKeyCode;

impl std::error::Error for InvalidKeyCode {}

impl fmt::Display for InvalidKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "keycode must be in range 0 <= keycode < 16")
    }
}

#[cfg(feature = "serde")]
mod de {
    use std::fmt::Display;

    use num_traits::AsPrimitive;
    use serde::de::{Deserialize, Error, Expected, Unexpected, Visitor};

    use super::*;

    impl Expected for InvalidKeyCode {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            <Self as Display>::fmt(self, f)
        }
    }

    impl<'de> Deserialize<'de> for KeyCode {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            // YAML integer type
            deserializer.deserialize_i64(KeyCodeVisitor)
        }
    }

    struct KeyCodeVisitor;

    impl KeyCodeVisitor {
        #[inline]
        fn check_int<N, E>(val: N) -> Result<u8, E>
        where
            N: AsPrimitive<i64>,
            E: Error,
        {
            let n = val.as_();
            if n < 0 || n >= KEY_COUNT as i64 {
                Err(E::invalid_value(Unexpected::Signed(n), &InvalidKeyCode))
            } else {
                Ok(n as u8)
            }
        }
    }

    impl<'de> Visitor<'de> for KeyCodeVisitor {
        type Value = KeyCode;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "an integer between 0 and 15")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Self::check_int(v).map(KeyCode::from_u8_masked)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if v >= KEY_COUNT as u64 {
                Err(E::invalid_value(Unexpected::Unsigned(v), &InvalidKeyCode))
            } else {
                Ok(KeyCode::from_u8_masked(v as u8))
            }
        }
    }
}
