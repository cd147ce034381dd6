//! Helpers for extracting data from instruction words.
//!
//! Every instruction is two bytes, stored big-endian, with the opcode
//! identity in the first 4-bit nibble.

/// Combine the two bytes at the cursor into an instruction word.
///
/// Reads past the end of the buffer yield zero.
#[inline(always)]
pub fn word_at(bytecode: &[u8], cursor: usize) -> u16 {
    let a = bytecode.get(cursor).copied().unwrap_or(0);
    let b = bytecode.get(cursor + 1).copied().unwrap_or(0);
    ((a as u16) << 8) | b as u16
}

/// Split the word into its four nibbles, most significant first.
#[inline(always)]
pub fn nibbles(word: u16) -> [u8; 4] {
    [
        ((word & 0xF000) >> 12) as u8,
        ((word & 0x0F00) >> 8) as u8,
        ((word & 0x00F0) >> 4) as u8,
        (word & 0x000F) as u8,
    ]
}

/// Extract operand NNN, the 12-bit address.
#[inline(always)]
pub fn op_nnn(word: u16) -> u16 {
    word & 0x0FFF
}

/// Extract operand NN, the 8-bit immediate in the low byte.
#[inline(always)]
pub fn op_nn(word: u16) -> u8 {
    (word & 0x00FF) as u8
}
