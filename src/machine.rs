use std::io;

use log::{trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Fault, LoadError};
use crate::framebuffer::FrameBuffer;
use crate::input::Keys;
use crate::memory::{Memory, FONT_ADDR, FONT_GLYPH_BYTES, PROGRAM_ADDR};
use crate::opcode::Opcode;
use crate::timer::Timers;

/// nesting depth of the call stack
const STACK_DEPTH: usize = 16;

/// What the executor is doing between cycles. FX0A is the one instruction
/// that suspends forward progress: while awaiting a key the machine fetches
/// nothing, but its timers keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// suspended by FX0A; the register that receives the key index
    AwaitingKey { dest: u8 },
}

/// The CHIP-8 virtual machine: memory, register file, call stack, frame
/// buffer and timers, driven one fetch-decode-execute cycle at a time.
pub struct Machine {
    memory: Memory,
    v: [u8; 16],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: u8,
    pub timers: Timers,
    framebuffer: FrameBuffer,
    mode: Mode,
    rng: StdRng,
    cycles: u64,
}

impl Machine {
    /// a machine with its random source seeded once, from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// a machine with a fixed seed, for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Machine {
            memory: Memory::new(),
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: [0; STACK_DEPTH],
            sp: 0,
            timers: Timers::new(),
            framebuffer: FrameBuffer::new(),
            mode: Mode::Running,
            rng,
            cycles: 0,
        }
    }

    /// load a program image at 0x200; registers, timers and display untouched
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, LoadError> {
        self.memory.load_program(reader)
    }

    /// hexdump of a memory range, for debugging
    pub fn dump_memory(&self, start: u16, end: u16) -> String {
        self.memory.dump(start, end)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// cycles executed since construction
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// the frame buffer if it changed since last taken; clears the dirty flag
    pub fn take_frame(&mut self) -> Option<&[u8; 64 * 32]> {
        self.framebuffer.take_frame()
    }

    /// one-line register summary, for trace logging
    pub fn state_line(&self) -> String {
        format!(
            "pc={:03x} i={:03x} sp={} dt={} v={:02x?}",
            self.pc,
            self.i,
            self.sp,
            self.timers.delay(),
            self.v
        )
    }

    /// Run one cycle against the given key snapshot.
    ///
    /// While awaiting a key (FX0A) nothing is fetched; the first press edge
    /// writes the key index, advances pc and resumes. Unknown opcodes are
    /// logged and skipped; stack faults are returned and must halt the run.
    pub fn step(&mut self, keys: &Keys) -> Result<(), Fault> {
        if let Mode::AwaitingKey { dest } = self.mode {
            if let Some(key) = keys.just_pressed() {
                self.v[dest as usize] = key;
                self.pc = self.pc.wrapping_add(2);
                self.mode = Mode::Running;
            }
            return Ok(());
        }

        let word = self.memory.read_word(self.pc);
        let op = Opcode::decode(word);
        trace!("{:04x} {:?} | {}", word, op, self.state_line());
        self.cycles += 1;
        self.execute(op, keys)
    }

    fn execute(&mut self, op: Opcode, keys: &Keys) -> Result<(), Fault> {
        match op {
            Opcode::Cls => {
                self.framebuffer.clear();
                self.advance();
            }
            Opcode::Ret => {
                if self.sp == 0 {
                    return Err(Fault::StackUnderflow { pc: self.pc });
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp as usize];
            }
            Opcode::Jump(nnn) => self.pc = nnn,
            Opcode::Call(nnn) => {
                if self.sp as usize == STACK_DEPTH {
                    return Err(Fault::StackOverflow { pc: self.pc });
                }
                // push the already-advanced return address
                self.stack[self.sp as usize] = self.pc.wrapping_add(2);
                self.sp += 1;
                self.pc = nnn;
            }
            Opcode::SkipEqImm(x, nn) => self.skip_if(self.v[x as usize] == nn),
            Opcode::SkipNeImm(x, nn) => self.skip_if(self.v[x as usize] != nn),
            Opcode::SkipEqReg(x, y) => self.skip_if(self.v[x as usize] == self.v[y as usize]),
            Opcode::SkipNeReg(x, y) => self.skip_if(self.v[x as usize] != self.v[y as usize]),
            Opcode::LoadImm(x, nn) => {
                self.v[x as usize] = nn;
                self.advance();
            }
            Opcode::AddImm(x, nn) => {
                // wraps mod 256, no carry flag
                self.v[x as usize] = self.v[x as usize].wrapping_add(nn);
                self.advance();
            }
            Opcode::Move(x, y) => {
                self.v[x as usize] = self.v[y as usize];
                self.advance();
            }
            Opcode::Or(x, y) => {
                self.v[x as usize] |= self.v[y as usize];
                self.advance();
            }
            Opcode::And(x, y) => {
                self.v[x as usize] &= self.v[y as usize];
                self.advance();
            }
            Opcode::Xor(x, y) => {
                self.v[x as usize] ^= self.v[y as usize];
                self.advance();
            }
            // the flag write comes last everywhere below, so that when X is
            // 0xF the flag wins over the arithmetic result
            Opcode::Add(x, y) => {
                let (sum, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
                self.v[x as usize] = sum;
                self.v[0xf] = carry as u8;
                self.advance();
            }
            Opcode::Sub(x, y) => {
                let (diff, borrow) = self.v[x as usize].overflowing_sub(self.v[y as usize]);
                self.v[x as usize] = diff;
                self.v[0xf] = !borrow as u8;
                self.advance();
            }
            Opcode::SubFrom(x, y) => {
                let (diff, borrow) = self.v[y as usize].overflowing_sub(self.v[x as usize]);
                self.v[x as usize] = diff;
                self.v[0xf] = !borrow as u8;
                self.advance();
            }
            Opcode::Shr(x) => {
                let low = self.v[x as usize] & 1;
                self.v[x as usize] >>= 1;
                self.v[0xf] = low;
                self.advance();
            }
            Opcode::Shl(x) => {
                let high = self.v[x as usize] >> 7;
                self.v[x as usize] <<= 1;
                self.v[0xf] = high;
                self.advance();
            }
            Opcode::LoadI(nnn) => {
                self.i = nnn;
                self.advance();
            }
            Opcode::JumpV0(nnn) => self.pc = nnn.wrapping_add(u16::from(self.v[0])),
            Opcode::Rand(x, nn) => {
                self.v[x as usize] = self.rng.gen::<u8>() & nn;
                self.advance();
            }
            Opcode::Draw(x, y, n) => {
                let mut sprite = [0u8; 15];
                for row in 0..n as u16 {
                    sprite[row as usize] = self.memory.read(self.i.wrapping_add(row));
                }
                let collision = self.framebuffer.blit(
                    self.v[x as usize],
                    self.v[y as usize],
                    &sprite[..n as usize],
                );
                self.v[0xf] = collision;
                self.advance();
            }
            Opcode::SkipKey(x) => self.skip_if(keys.is_held(self.v[x as usize])),
            Opcode::SkipNoKey(x) => self.skip_if(!keys.is_held(self.v[x as usize])),
            Opcode::ReadDelay(x) => {
                self.v[x as usize] = self.timers.delay();
                self.advance();
            }
            Opcode::WaitKey(x) => {
                // pc stays put; the resume path in step() advances it
                self.mode = Mode::AwaitingKey { dest: x };
            }
            Opcode::SetDelay(x) => {
                self.timers.set_delay(self.v[x as usize]);
                self.advance();
            }
            Opcode::SetSound(x) => {
                self.timers.set_sound(self.v[x as usize]);
                self.advance();
            }
            Opcode::AddI(x) => {
                self.i = self.i.wrapping_add(u16::from(self.v[x as usize])) & 0xfff;
                self.advance();
            }
            Opcode::FontChar(x) => {
                self.i = FONT_ADDR + u16::from(self.v[x as usize]) * FONT_GLYPH_BYTES;
                self.advance();
            }
            Opcode::Bcd(x) => {
                let value = self.v[x as usize];
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i.wrapping_add(1), (value / 10) % 10);
                self.memory.write(self.i.wrapping_add(2), value % 10);
                self.advance();
            }
            Opcode::Store(x) => {
                for offset in 0..=u16::from(x) {
                    self.memory
                        .write(self.i.wrapping_add(offset), self.v[offset as usize]);
                }
                self.advance();
            }
            Opcode::Load(x) => {
                for offset in 0..=u16::from(x) {
                    self.v[offset as usize] = self.memory.read(self.i.wrapping_add(offset));
                }
                self.advance();
            }
            Opcode::Unknown(word) => {
                warn!("unknown opcode {:04x} at {:03x}, skipping", word, self.pc);
                self.advance();
            }
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    fn skip_if(&mut self, condition: bool) {
        self.pc = self.pc.wrapping_add(if condition { 4 } else { 2 });
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
