use chip8vm::KeyCode;
use serde::Deserialize;
use smol_str::SmolStr;

/// Input mapper
///
/// Maps host keyboard key names to the 16 keys of the old COSMAC VIP keypad.
///
/// ```text
/// host        keypad
/// 1 2 3 4     1 2 3 C
/// q w e r     4 5 6 D
/// a s d f     7 8 9 E
/// z x c v     A 0 B F
/// ```
#[derive(Debug, Clone)]
pub struct InputMap {
    /// Mapping of host keyboard keys to keypad keys.
    keys: Box<[(SmolStr, KeyCode)]>,
}

/// Keymap entry, as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDef {
    pub chip8: KeyCode,
    pub keyboard_keys: Vec<SmolStr>,
}

const DEFAULT_LAYOUT: [(&str, u8); 16] = [
    ("1", 0x1),
    ("2", 0x2),
    ("3", 0x3),
    ("4", 0xC),
    ("q", 0x4),
    ("w", 0x5),
    ("e", 0x6),
    ("r", 0xD),
    ("a", 0x7),
    ("s", 0x8),
    ("d", 0x9),
    ("f", 0xE),
    ("z", 0xA),
    ("x", 0x0),
    ("c", 0xB),
    ("v", 0xF),
];

impl Default for InputMap {
    fn default() -> Self {
        let keys = DEFAULT_LAYOUT
            .iter()
            .map(|(name, key_id)| (SmolStr::new(name), KeyCode::from_u8_masked(*key_id)))
            .collect();
        Self { keys }
    }
}

impl InputMap {
    pub fn new(defs: &[InputDef]) -> Self {
        let keys = defs
            .iter()
            // flatten every host key of a definition into its own mapping
            .flat_map(|def| {
                def.keyboard_keys
                    .iter()
                    .map(move |name| (normalize(name), def.chip8))
            })
            .collect();
        Self { keys }
    }

    /// Given a host key name, map it to a keypad key.
    ///
    /// Names are matched case insensitive.
    pub fn map_key(&self, name: &str) -> Option<KeyCode> {
        let query = normalize(name);
        self.keys
            .iter()
            .find(|(keyname, _)| *keyname == query)
            .map(|(_, keycode)| *keycode)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

fn normalize(name: &str) -> SmolStr {
    SmolStr::new(name.trim().to_lowercase())
}
