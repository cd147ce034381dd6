//! Disassembler.
use std::fmt::{self, Write as FmtWrite};

use crate::{
    bytecode::word_at,
    constants::{Address, MEM_START},
    instr::Op,
};

/// Writes a program image as a listing of addresses, words and mnemonics.
///
/// The image is walked two bytes at a time, as it would be loaded into memory.
/// Words that don't decode are most likely sprite data, and are printed raw.
pub struct Disassembler<'a> {
    bytecode: &'a [u8],
    cursor: usize,
}

impl<'a> Disassembler<'a> {
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self {
            bytecode,
            cursor: 0,
        }
    }

    pub fn print_bytecode(&mut self) -> fmt::Result {
        let mut s = String::new();
        self.disassemble_all(&mut s)?;
        println!("{}", s);
        Ok(())
    }

    /// Write every instruction to the given writer.
    pub fn disassemble_all<W: FmtWrite>(&mut self, w: &mut W) -> fmt::Result {
        self.cursor = 0;
        while self.cursor < self.bytecode.len() {
            self.disassemble(w)?;
            self.cursor += 2;
        }
        self.cursor = 0;
        Ok(())
    }

    /// Write a single instruction to the given writer.
    pub fn disassemble<W: FmtWrite>(&self, w: &mut W) -> fmt::Result {
        let word = word_at(self.bytecode, self.cursor);
        let addr = (MEM_START + self.cursor) as Address;

        match Op::decode(word) {
            Some(op) => writeln!(w, "{addr:04X}: {word:04X}  {op}"),
            None => writeln!(w, "{addr:04X}: {word:04X}  ??"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn test_listing() {
        let bytecode = [
            0x00, 0xE0, // CLS
            0xA2, 0x2A, // LD I, 0x22A
            0xFF, 0xFF, // data
            0x12,       // odd trailing byte
        ];
        let mut buf = String::new();
        Disassembler::new(&bytecode).disassemble_all(&mut buf).unwrap();

        let lines: Vec<&str> = buf.lines().collect();
        assert_eq!(
            lines,
            [
                "0200: 00E0  CLS",
                "0202: A22A  LD I, 0x22A",
                "0204: FFFF  ??",
                "0206: 1200  JP 0x200",
            ]
        );
    }
}
