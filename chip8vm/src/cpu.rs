//! CPU and memory state.
use crate::{bytecode::word_at, constants::*, error::Fault};

/// Core state for a chip8 interpreter.
///
/// Every buffer is allocated once on construction, and reused
/// across resets.
pub struct Chip8Cpu {
    // ------------------------------------------------------------------------
    // Registers
    /// Program counter pointing to the current position in the bytecode.
    pub(crate) pc: Address,
    /// Stack pointer, the number of return addresses on the stack.
    pub(crate) sp: usize,
    /// General purpose registers for temporary values.
    ///
    /// Register 16 (VF) is used for either the carry flag or borrow switch depending on opcode.
    pub(crate) registers: [u8; REGISTER_COUNT],
    /// (I) Pointer register used for temporarily storing an address.
    ///
    /// Not masked to 12 bits, so `ADD I, Vx` may push it past the end of memory.
    pub(crate) address: Address,
    /// (DT) Delay timer that counts down to 0.
    pub(crate) delay_timer: u8,
    /// (ST) Sound timer that counts down to 0. When it has a non-zero value, a beep is played.
    pub(crate) sound_timer: u8,
    /// Indicates that the machine is waiting for a keypress.
    pub(crate) key_wait: bool,

    // ------------------------------------------------------------------------
    // Memory
    /// Main memory storage space.
    pub(crate) ram: Box<[u8; MEM_SIZE]>,
    /// Stack of return pointers used for jumping when a routine call finishes.
    pub(crate) stack: Box<[Address; STACK_SIZE]>,
    /// Screen buffer that is drawn too.
    pub(crate) display: Box<DisplayBuffer>,

    // ------------------------------------------------------------------------
    // Control
    /// Interrupt for VM loop.
    pub(crate) trap: bool,
    /// Fatal fault if the VM is in an error state.
    pub(crate) error: Option<Fault>,
}

impl Default for Chip8Cpu {
    fn default() -> Self {
        let mut cpu = Self {
            pc: MEM_START as Address,
            sp: 0,
            registers: [0; REGISTER_COUNT],
            address: 0,
            delay_timer: 0,
            sound_timer: 0,
            key_wait: false,

            ram: Box::new([0; MEM_SIZE]),
            stack: Box::new([0; STACK_SIZE]),
            display: Box::new([false; DISPLAY_BUFFER_SIZE]),

            trap: false,
            error: None,
        };
        cpu.load_font();
        cpu
    }
}

impl Chip8Cpu {
    pub fn new() -> Self {
        Default::default()
    }

    /// Return every register and buffer to its power-on state.
    ///
    /// Memory is zeroed, except for the builtin font.
    pub(crate) fn reset(&mut self) {
        self.pc = MEM_START as Address;
        self.sp = 0;
        self.registers.fill(0);
        self.address = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.key_wait = false;
        self.trap = false;
        self.error = None;

        self.clear_memory();
        self.load_font();
    }

    /// Erase the contents of the memory buffers `ram`, `stack` and `display`.
    pub(crate) fn clear_memory(&mut self) {
        self.ram.fill(0);
        self.stack.fill(0);
        self.display.fill(false);
    }

    fn load_font(&mut self) {
        let start = FONTSET_START as usize;
        self.ram[start..start + FONTSET_DATA_LENGTH].copy_from_slice(&FONTSET);
    }

    pub fn interrupt(&mut self) {
        self.trap = true;
    }

    pub fn set_error(&mut self, fault: Fault) {
        self.trap = true;
        self.error = Some(fault);
    }

    pub fn error(&self) -> Option<Fault> {
        self.error
    }

    pub fn clear_display(&mut self) {
        self.display.fill(false);
    }

    /// Count down the delay timer.
    #[inline]
    pub fn tick_delay(&mut self) {
        // The checked_sub implementation uses `unlikely!()` which degrades performance.
        let (val, underflow) = self.delay_timer.overflowing_sub(1);
        if !underflow {
            self.delay_timer = val;
        }
    }

    #[inline]
    pub fn tick_sound(&mut self) {
        let (val, underflow) = self.sound_timer.overflowing_sub(1);
        if !underflow {
            self.sound_timer = val;
        }
    }

    /// Extract the instruction word at the current program counter.
    #[inline(always)]
    pub fn instr(&self) -> u16 {
        let pc = self.pc as usize & MEM_MASK;
        if pc == MEM_MASK {
            // Second byte wraps around to the start of memory.
            ((self.ram[pc] as u16) << 8) | self.ram[0] as u16
        } else {
            word_at(&*self.ram, pc)
        }
    }

    /// Push a return address onto the call stack.
    ///
    /// Returns `false` when the stack is full.
    #[must_use]
    pub(crate) fn push(&mut self, return_addr: Address) -> bool {
        if self.sp >= STACK_SIZE {
            return false;
        }
        self.stack[self.sp] = return_addr;
        self.sp += 1;
        true
    }

    /// Pop the top return address off the call stack.
    pub(crate) fn pop(&mut self) -> Option<Address> {
        let sp = self.sp.checked_sub(1)?;
        self.sp = sp;
        Some(self.stack[sp])
    }

    /// Index into memory, relative to the address register.
    ///
    /// The second value is `Some(target)` when the unwrapped target
    /// was past the end of memory.
    #[inline]
    pub(crate) fn mem_index(&self, offset: usize) -> (usize, Option<usize>) {
        let target = self.address as usize + offset;
        let wrapped = if target > MEM_MASK { Some(target) } else { None };
        (target & MEM_MASK, wrapped)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_font_loaded() {
        let cpu = Chip8Cpu::new();
        let start = FONTSET_START as usize;
        assert_eq!(&cpu.ram[start..start + FONTSET_DATA_LENGTH], &FONTSET[..]);
        assert_eq!(cpu.pc, 0x200);
    }

    #[test]
    fn test_reset_keeps_font() {
        let mut cpu = Chip8Cpu::new();
        cpu.ram.fill(0xAA);
        cpu.registers[3] = 9;
        cpu.display[10] = true;
        cpu.reset();

        let start = FONTSET_START as usize;
        assert_eq!(&cpu.ram[start..start + FONTSET_DATA_LENGTH], &FONTSET[..]);
        assert_eq!(cpu.ram[0], 0);
        assert_eq!(cpu.ram[MEM_START], 0);
        assert_eq!(cpu.registers[3], 0);
        assert!(!cpu.display[10]);
    }

    #[test]
    fn test_stack_bounds() {
        let mut cpu = Chip8Cpu::new();
        assert_eq!(cpu.pop(), None);

        for i in 0..STACK_SIZE {
            assert!(cpu.push(i as Address));
        }
        assert!(!cpu.push(0xFFF));
        assert_eq!(cpu.sp, STACK_SIZE);

        assert_eq!(cpu.pop(), Some(STACK_SIZE as Address - 1));
        assert_eq!(cpu.sp, STACK_SIZE - 1);
    }

    #[test]
    fn test_timer_floor() {
        let mut cpu = Chip8Cpu::new();
        cpu.delay_timer = 1;
        cpu.tick_delay();
        cpu.tick_delay();
        cpu.tick_sound();
        assert_eq!(cpu.delay_timer, 0);
        assert_eq!(cpu.sound_timer, 0);
    }

    #[test]
    fn test_mem_index_wraps() {
        let mut cpu = Chip8Cpu::new();
        cpu.address = 0xFFE;
        assert_eq!(cpu.mem_index(1), (0xFFF, None));
        assert_eq!(cpu.mem_index(2), (0x000, Some(0x1000)));
    }

    #[test]
    fn test_instr_wraps_at_end_of_memory() {
        let mut cpu = Chip8Cpu::new();
        cpu.ram[MEM_MASK] = 0x12;
        cpu.ram[0] = 0x34;
        cpu.pc = MEM_MASK as Address;
        assert_eq!(cpu.instr(), 0x1234);
    }
}
