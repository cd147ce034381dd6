//! Virtual machine.
use std::{
    fmt::{self, Write},
    time::Duration,
};

use rand::{prelude::*, rngs::StdRng};

use crate::{
    clock::{timer_duration, Clock},
    constants::*,
    cpu::Chip8Cpu,
    devices::{Devices, KeyCode, Keypad},
    error::{Chip8Error, Chip8Result, Fault},
    instr::Op,
};

pub struct Chip8Vm {
    cpu: Chip8Cpu,
    clock: Clock,
    timer: Clock,
    rng: StdRng,
    conf: Chip8Conf,
    /// The display buffer was changed by the last step.
    draw_flag: bool,
    /// Tone requested by the last step, in timer ticks.
    tone: Option<u8>,
}

impl Chip8Vm {
    pub fn new(conf: Chip8Conf) -> Self {
        let rng = match conf.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Chip8Vm {
            cpu: Chip8Cpu::new(),
            clock: Clock::new(conf.clock_frequency.unwrap_or_default().into()),
            timer: Clock::timers(),
            rng,
            conf,
            draw_flag: false,
            tone: None,
        }
    }

    /// Configuration that was used to instantiate the VM.
    pub fn config(&self) -> &Chip8Conf {
        &self.conf
    }

    /// Copy a program image into memory at [`MEM_START`].
    ///
    /// The machine is reset first, so no state from a previous program leaks through.
    pub fn load_bytecode(&mut self, bytecode: &[u8]) -> Chip8Result<()> {
        if bytecode.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::LargeProgram {
                size: bytecode.len(),
            });
        }

        self.reset();

        // Load program into virtual RAM
        self.cpu.ram[MEM_START..MEM_START + bytecode.len()].copy_from_slice(bytecode);
        log::debug!("loaded program of {} bytes", bytecode.len());

        Ok(())
    }

    /// Power cycle the machine.
    ///
    /// Registers, stack, timers, display and memory are cleared, apart from the builtin font.
    /// The program counter is set to [`MEM_START`].
    pub fn reset(&mut self) {
        log::debug!("machine reset");
        self.cpu.reset();
        self.draw_flag = false;
        self.tone = None;
        self.reset_clocks();
    }

    fn reset_clocks(&mut self) {
        self.clock.reset();
        self.timer.reset();
    }

    pub fn display_buffer(&self) -> &DisplayBuffer {
        &self.cpu.display
    }

    /// Whether the display buffer changed during the last step.
    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// Tone requested by `LD ST, Vx` during the last step, in timer ticks.
    pub fn tone_request(&self) -> Option<u8> {
        self.tone
    }

    /// The buzzer should sound while the sound timer counts down.
    pub fn sound_active(&self) -> bool {
        self.cpu.sound_timer > 0
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.cpu.registers
    }

    pub fn pc(&self) -> Address {
        self.cpu.pc
    }

    /// Address register `I`.
    pub fn index(&self) -> Address {
        self.cpu.address
    }

    /// Return addresses currently on the call stack, bottom first.
    pub fn stack(&self) -> &[Address] {
        &self.cpu.stack[..self.cpu.sp]
    }

    pub fn delay_timer(&self) -> u8 {
        self.cpu.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.cpu.sound_timer
    }

    pub fn ram(&self) -> &[u8] {
        &self.cpu.ram[..]
    }

    /// The machine is stalled on `LD Vx, K`.
    pub fn is_waiting_for_key(&self) -> bool {
        self.cpu.key_wait
    }

    /// Fatal fault the machine stopped on, if any.
    pub fn error(&self) -> Option<Fault> {
        self.cpu.error()
    }

    /// Stop the driver loop at the start of its next iteration.
    pub fn interrupt(&mut self) {
        self.cpu.interrupt();
    }
}

/// Control flow signal returned from each step of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Ok,
    Interrupt,
    /// Program counter has jumped to a new address.
    ///
    /// This is useful for the caller to avoid being
    /// blocked on infinite or long running loops.
    ///
    /// This is returned when the interpreter encounters:
    ///
    /// - 1nnn (`JP addr`)
    /// - 2nnn (`CALL addr`)
    /// - 00EE (`RET`)
    /// - Bnnn (`JP V0, addr`)
    Jump,
    /// Display buffer was cleared or drawn to.
    Draw,
    /// A tone was requested, lasting the given number of timer ticks.
    Sound { ticks: u8 },
    /// Wait for a keypress.
    ///
    /// This is triggered by the opcode `Fx0A` (`LD Vx, K`), which stops
    /// execution until a key is pressed, and loads the key value into `Vx`.
    /// The program counter stays on the instruction, so the next step
    /// polls the keypad again.
    KeyWait,
    /// A recoverable fault was reported, and execution continued.
    Fault(Fault),
}

/// VM Configuration Parameters.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Chip8Conf {
    /// Instruction rate of the driver loop, when throttled.
    pub clock_frequency: Option<Hz>,
    pub timer_mode: TimerMode,
    pub unknown_opcode: DecodePolicy,
    /// Fixed seed for `RND`, for reproducible runs.
    pub rng_seed: Option<u64>,
}

/// CPU clock frequency, in hertz (per second)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hz(pub u64);

impl From<Hz> for Duration {
    fn from(freq: Hz) -> Self {
        if freq.0 == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(NANOS_IN_SECOND / freq.0)
        }
    }
}

/// When the delay and sound timers count down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimerMode {
    /// Count down at the end of every step.
    ///
    /// Only accurate when the caller paces its own calls to
    /// [`Chip8Vm::step`] at 60Hz. The driver loops don't.
    PerStep,
    /// Steps leave the timers alone. The driver loops count them down
    /// on a separate 60Hz clock, independent of the instruction rate.
    #[default]
    Decoupled,
}

/// What to do with instruction words that match no opcode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodePolicy {
    /// Report the fault, and continue at the next instruction.
    #[default]
    Skip,
    /// Report the fault, and stop the machine on the bad instruction.
    Halt,
}

/// Driver loops
impl Chip8Vm {
    /// Run until the devices ask to stop, or a fatal fault occurs.
    pub fn execute<D: Devices>(&mut self, devices: &mut D) -> Chip8Result<Flow> {
        self.cpu.trap = false;
        self.reset_clocks();

        loop {
            if let Flow::Interrupt = self.resume(devices)? {
                break;
            }
        }

        Ok(Flow::Interrupt)
    }

    /// Run a fixed number of steps, returning the flow of the last one.
    pub fn run_steps<D: Devices>(
        &mut self,
        step_count: usize,
        devices: &mut D,
    ) -> Chip8Result<Flow> {
        self.cpu.trap = false;
        self.reset_clocks();

        let mut flow = Flow::Ok;
        for _ in 0..step_count {
            flow = self.resume(devices)?;
            if let Flow::Interrupt = flow {
                break;
            }
        }

        Ok(flow)
    }

    /// Single iteration of the driver loop.
    fn resume<D: Devices>(&mut self, devices: &mut D) -> Chip8Result<Flow> {
        if !devices.poll() {
            self.cpu.interrupt();
        }

        #[cfg(feature = "throttle")]
        self.clock.wait();

        if self.conf.timer_mode == TimerMode::Decoupled {
            // Timers are 8-bit, so any ticks past 255 have no effect.
            let ticks = self.timer.tick().min(u8::MAX as u32);
            for _ in 0..ticks {
                self.tick_timers();
            }
        }

        let flow = self.step(&*devices)?;

        if self.draw_flag {
            devices.draw(&self.cpu.display);
        }
        if let Some(ticks) = self.tone {
            devices.buzz(timer_duration(ticks));
        }

        Ok(flow)
    }
}

/// Interpreter
impl Chip8Vm {
    /// Count down the delay and sound timers, stopping at zero.
    ///
    /// In [`TimerMode::Decoupled`] the caller must call this at 60Hz.
    pub fn tick_timers(&mut self) {
        self.cpu.tick_delay();
        self.cpu.tick_sound();
    }

    /// Execute exactly one instruction.
    ///
    /// Recoverable faults are returned as [`Flow::Fault`]. Fatal faults put the
    /// machine in an error state, which every following step reports until the
    /// machine is reset or a program is loaded.
    pub fn step<K: Keypad + ?Sized>(&mut self, keypad: &K) -> Chip8Result<Flow> {
        self.draw_flag = false;
        self.tone = None;

        if let Some(fault) = self.cpu.error {
            return Err(Chip8Error::Fault(fault));
        }

        if self.cpu.trap {
            // Interrupt signal is set.
            return Ok(Flow::Interrupt);
        }

        let flow = self.exec(keypad);

        if self.conf.timer_mode == TimerMode::PerStep {
            self.tick_timers();
        }

        match flow {
            Flow::Fault(fault) if self.is_fatal(&fault) => {
                log::error!("{fault}");
                self.cpu.set_error(fault);
                Err(Chip8Error::Fault(fault))
            }
            Flow::Fault(fault) => {
                log::warn!("{fault}");
                Ok(flow)
            }
            _ => Ok(flow),
        }
    }

    fn is_fatal(&self, fault: &Fault) -> bool {
        match fault {
            Fault::UnknownOpcode { .. } => self.conf.unknown_opcode == DecodePolicy::Halt,
            _ => fault.is_fatal(),
        }
    }

    fn exec<K: Keypad + ?Sized>(&mut self, keypad: &K) -> Flow {
        let addr = self.cpu.pc;
        let word = self.cpu.instr();

        // Branches overwrite the program counter, so it is never advanced twice.
        self.cpu.pc = addr.wrapping_add(2);

        let op = match Op::decode(word) {
            Some(Op::Sys { .. }) | None => return self.unknown_opcode(addr, word),
            Some(op) => op,
        };

        op_trace(addr, word, &op);

        let regs = &mut self.cpu.registers;

        match op {
            // 00E0 (CLS)
            //
            // Clear display
            Op::ClearScreen => {
                self.cpu.clear_display();
                self.draw_flag = true;
                Flow::Draw
            }
            // 00EE (RET)
            //
            // Return from a subroutine.
            // Set the program counter to the value at the top of the stack.
            Op::Return => match self.cpu.pop() {
                Some(return_addr) => {
                    self.cpu.pc = return_addr;
                    Flow::Jump
                }
                None => {
                    self.cpu.pc = addr;
                    Flow::Fault(Fault::StackUnderflow { addr })
                }
            },
            // 1NNN (JP addr)
            Op::Jump { address } => {
                self.cpu.pc = address;
                Flow::Jump
            }
            // 2NNN (CALL addr)
            //
            // The return address is the instruction following the call.
            Op::Call { address } => {
                if self.cpu.push(self.cpu.pc) {
                    self.cpu.pc = address;
                    Flow::Jump
                } else {
                    self.cpu.pc = addr;
                    Flow::Fault(Fault::StackOverflow { addr })
                }
            }
            // 3XNN (SE Vx, byte)
            Op::Skip_Eq_Byte { vx, nn } => {
                let cond = regs[vx as usize] == nn;
                self.skip_if(cond)
            }
            // 4XNN (SNE Vx, byte)
            Op::Skip_NotEq_Byte { vx, nn } => {
                let cond = regs[vx as usize] != nn;
                self.skip_if(cond)
            }
            // 5XY0 (SE Vx, Vy)
            Op::Skip_Eq { vx, vy } => {
                let cond = regs[vx as usize] == regs[vy as usize];
                self.skip_if(cond)
            }
            // 6XNN (LD Vx, byte)
            Op::Load_Byte { vx, nn } => {
                regs[vx as usize] = nn;
                Flow::Ok
            }
            // 7xnn (ADD Vx, byte)
            //
            // Carry flag is not set.
            Op::Add_Byte { vx, nn } => {
                regs[vx as usize] = regs[vx as usize].wrapping_add(nn);
                Flow::Ok
            }
            // 9xy0 (SNE Vx, Vy)
            Op::Skip_NotEq { vx, vy } => {
                let cond = regs[vx as usize] != regs[vy as usize];
                self.skip_if(cond)
            }
            // Annn (LD I, addr)
            Op::Load_Address { address } => {
                self.cpu.address = address;
                Flow::Ok
            }
            // Bnnn (JP V0, addr)
            Op::Jump_V0 { address } => {
                self.cpu.pc = address.wrapping_add(regs[0] as Address);
                Flow::Jump
            }
            // CXNN (RND Vx, byte)
            //
            // Set register VX to the result of bitwise AND between a random number and NN.
            Op::Random { vx, nn } => {
                regs[vx as usize] = self.rng.gen::<u8>() & nn;
                Flow::Ok
            }
            Op::Draw { vx, vy, n } => self.draw(addr, vx, vy, n),
            // Ex9E (SKP Vx)
            Op::Skip_Key { vx } => {
                let key = KeyCode::from_u8_masked(regs[vx as usize]);
                self.skip_if(keypad.is_pressed(key))
            }
            // ExA1 (SKNP Vx)
            Op::Skip_NotKey { vx } => {
                let key = KeyCode::from_u8_masked(regs[vx as usize]);
                self.skip_if(!keypad.is_pressed(key))
            }
            // Fx0A (LD Vx, K)
            //
            // Wait for a key press, store the value of the key in Vx.
            Op::Load_Vx_Key { vx } => match keypad.poll_any_pressed() {
                Some(key) => {
                    regs[vx as usize] = key.as_u8();
                    self.cpu.key_wait = false;
                    Flow::Ok
                }
                None => {
                    // rewind the program counter to stall the machine
                    self.cpu.pc = addr;
                    self.cpu.key_wait = true;
                    Flow::KeyWait
                }
            },
            _ if is_math(&op) => self.exec_math(op),
            _ => self.exec_misc(addr, op),
        }
    }

    #[inline]
    fn skip_if(&mut self, cond: bool) -> Flow {
        if cond {
            self.cpu.pc = self.cpu.pc.wrapping_add(2);
        }
        Flow::Ok
    }

    #[cold]
    fn unknown_opcode(&mut self, addr: Address, word: u16) -> Flow {
        if self.conf.unknown_opcode == DecodePolicy::Halt {
            self.cpu.pc = addr;
        }
        Flow::Fault(Fault::UnknownOpcode { addr, word })
    }

    /// Execute an arithmetic instruction
    ///
    /// Register VF is written as a flag by several of these. The order of the
    /// flag write and the result write decides what VF holds when `x` is `F`.
    #[inline]
    #[must_use]
    fn exec_math(&mut self, op: Op) -> Flow {
        let regs = &mut self.cpu.registers;

        match op {
            // 8XY0 (LD Vx, Vy)
            Op::Load_Vx_Vy { vx, vy } => regs[vx as usize] = regs[vy as usize],
            // 8XY1 (OR Vx, Vy)
            Op::Or_Vx_Vy { vx, vy } => regs[vx as usize] |= regs[vy as usize],
            // 8XY2 (AND Vx, Vy)
            Op::And_Vx_Vy { vx, vy } => regs[vx as usize] &= regs[vy as usize],
            // 8XY3 (XOR Vx, Vy)
            Op::Xor_Vx_Vy { vx, vy } => regs[vx as usize] ^= regs[vy as usize],
            // 8XY4 (ADD Vx, Vy)
            //
            // Overflow is wrapped. If overflow, set VF to 1, else 0.
            Op::Add_Vx_Vy { vx, vy } => {
                let (result, carry) = regs[vx as usize].overflowing_add(regs[vy as usize]);
                regs[vx as usize] = result;
                regs[FLAG_REGISTER] = carry as u8;
            }
            // 8XY5 (SUB Vx, Vy)
            //
            // VF is set to 0 when there is a borrow, set to 1 when there isn't.
            Op::Sub_Vx_Vy { vx, vy } => {
                let (x, y) = (regs[vx as usize], regs[vy as usize]);
                regs[FLAG_REGISTER] = (x >= y) as u8;
                regs[vx as usize] = x.wrapping_sub(y);
            }
            // 8XY6 (SHR Vx)
            //
            // VF is set to the least-significant bit of Vx, before the shift.
            Op::ShiftRight { vx, .. } => {
                let x = regs[vx as usize];
                regs[FLAG_REGISTER] = x & 1;
                regs[vx as usize] = x >> 1;
            }
            // 8XY7 (SUBN Vx, Vy)
            //
            // Subtracts VX from VY, and stores the result in VX.
            Op::SubReverse_Vx_Vy { vx, vy } => {
                let (x, y) = (regs[vx as usize], regs[vy as usize]);
                regs[FLAG_REGISTER] = (y >= x) as u8;
                regs[vx as usize] = y.wrapping_sub(x);
            }
            // 8XYE (SHL Vx)
            //
            // VF is set to the most-significant bit of Vx, before the shift.
            Op::ShiftLeft { vx, .. } => {
                let x = regs[vx as usize];
                regs[FLAG_REGISTER] = (x >> 7) & 1;
                regs[vx as usize] = x << 1;
            }
            _ => unreachable!("not an arithmetic instruction: {op}"),
        }

        Flow::Ok
    }

    /// Execute a timer or memory instruction
    #[inline]
    #[must_use]
    fn exec_misc(&mut self, addr: Address, op: Op) -> Flow {
        let mut wrapped = None;

        match op {
            // Fx07 (LD Vx, DT)
            Op::Load_Vx_Delay { vx } => {
                self.cpu.registers[vx as usize] = self.cpu.delay_timer;
            }
            // Fx15 (LD DT, Vx)
            Op::Load_Delay_Vx { vx } => {
                self.cpu.delay_timer = self.cpu.registers[vx as usize];
            }
            // Fx18 (LD ST, Vx)
            //
            // Also requests a tone from the audio device, lasting as long as the timer.
            Op::Load_Sound_Vx { vx } => {
                let ticks = self.cpu.registers[vx as usize];
                self.cpu.sound_timer = ticks;
                self.tone = Some(ticks);
                return Flow::Sound { ticks };
            }
            // Fx1E (ADD I, Vx)
            //
            // VF is not affected.
            Op::Add_Address_Vx { vx } => {
                let x = self.cpu.registers[vx as usize] as Address;
                self.cpu.address = self.cpu.address.wrapping_add(x);
            }
            // Fx29 (LD F, Vx)
            //
            // Set I = location of sprite for digit Vx.
            Op::Load_Glyph { vx } => {
                let digit = self.cpu.registers[vx as usize] & 0xF;
                self.cpu.address = FONTSET_GLYPHS[digit as usize];
            }
            // Fx33 (LD B, Vx)
            //
            // Store the binary-coded decimal representation of Vx
            // in the memory locations I, I+1, and I+2.
            Op::Store_Bcd { vx } => {
                let x = self.cpu.registers[vx as usize];
                let digits = [x / 100, (x / 10) % 10, x % 10];
                for (offset, digit) in digits.into_iter().enumerate() {
                    let (index, w) = self.cpu.mem_index(offset);
                    wrapped = wrapped.or(w);
                    self.cpu.ram[index] = digit;
                }
            }
            // Fx55 (LD [I], Vx)
            //
            // Store registers V0 through Vx in memory starting at location I.
            // I is left unchanged.
            Op::Store_Registers { vx } => {
                for v in 0..=vx as usize {
                    let (index, w) = self.cpu.mem_index(v);
                    wrapped = wrapped.or(w);
                    self.cpu.ram[index] = self.cpu.registers[v];
                }
            }
            // Fx65 (LD Vx, [I])
            //
            // Read registers V0 through Vx from memory starting at location I.
            // I is left unchanged.
            Op::Load_Registers { vx } => {
                for v in 0..=vx as usize {
                    let (index, w) = self.cpu.mem_index(v);
                    wrapped = wrapped.or(w);
                    self.cpu.registers[v] = self.cpu.ram[index];
                }
            }
            _ => unreachable!("not a timer or memory instruction: {op}"),
        }

        match wrapped {
            Some(target) => Flow::Fault(Fault::AddressWrapped { addr, target }),
            None => Flow::Ok,
        }
    }

    /// Dxyn (DRW Vx, Vy, nibble)
    ///
    /// Draw sprite to the display buffer, at coordinate as per registers Vx and Vy.
    /// Sprite is encoded as 8 pixels wide, N pixels high, stored in bits located in
    /// memory pointed to by address register I.
    ///
    /// The starting coordinate wraps to the screen, and pixels drawn outside
    /// of the display area are wrapped around to the other side.
    ///
    /// If the drawing operation erases existing pixels in the display buffer, register VF is set to
    /// 1, and set to 0 if no display bits are unset. This is used for collision detection.
    fn draw(&mut self, addr: Address, vx: u8, vy: u8, n: u8) -> Flow {
        let x = self.cpu.registers[vx as usize] as usize & DISPLAY_WIDTH_MASK;
        let y = self.cpu.registers[vy as usize] as usize & DISPLAY_HEIGHT_MASK;
        let mut wrapped = None;

        self.cpu.registers[FLAG_REGISTER] = 0;

        for r in 0..n as usize {
            let (index, w) = self.cpu.mem_index(r);
            wrapped = wrapped.or(w);

            // Each row is 8 bits representing the 8 pixels of the sprite.
            let row = self.cpu.ram[index];
            for c in 0..SPRITE_WIDTH {
                if (row >> (7 - c)) & 1 == 0 {
                    continue;
                }

                let d = ((x + c) & DISPLAY_WIDTH_MASK)
                    + ((y + r) & DISPLAY_HEIGHT_MASK) * DISPLAY_WIDTH;

                // XOR erases a pixel when both the old and new values are both 1.
                if self.cpu.display[d] {
                    self.cpu.registers[FLAG_REGISTER] = 1;
                }
                self.cpu.display[d] ^= true;
            }
        }

        // Raised even when no pixel changed.
        self.draw_flag = true;

        match wrapped {
            Some(target) => Flow::Fault(Fault::AddressWrapped { addr, target }),
            None => Flow::Draw,
        }
    }
}

#[inline]
fn is_math(op: &Op) -> bool {
    matches!(
        op,
        Op::Load_Vx_Vy { .. }
            | Op::Or_Vx_Vy { .. }
            | Op::And_Vx_Vy { .. }
            | Op::Xor_Vx_Vy { .. }
            | Op::Add_Vx_Vy { .. }
            | Op::Sub_Vx_Vy { .. }
            | Op::ShiftRight { .. }
            | Op::SubReverse_Vx_Vy { .. }
            | Op::ShiftLeft { .. }
    )
}

/// Troubleshooting
#[allow(dead_code)]
#[doc(hidden)]
impl Chip8Vm {
    /// Returns the contents of the memory as a human readable string.
    pub fn dump_ram(&self, count: usize) -> Result<String, fmt::Error> {
        let iter = self
            .cpu
            .ram
            .iter()
            .enumerate()
            .skip(MEM_START)
            .take(count)
            .step_by(2);
        let mut buf = String::new();

        for (i, op) in iter {
            let b = self.cpu.ram[(i + 1) & MEM_MASK];
            writeln!(buf, "{:04X}: {:02X}{:02X}", i, op, b)?;
        }

        Ok(buf)
    }

    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if self.cpu.display[x + y * DISPLAY_WIDTH] {
                    write!(buf, "#")?;
                } else {
                    write!(buf, ".")?;
                }
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

#[cfg(feature = "op_trace")]
#[inline]
fn op_trace(addr: Address, word: u16, op: &Op) {
    log::trace!("{addr:04X}: {word:04X} {op}");
}

#[cfg(not(feature = "op_trace"))]
#[inline]
fn op_trace(_: Address, _: u16, _: &Op) {}
