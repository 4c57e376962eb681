use std::io::Read;

use crate::error::{LoadError, MAX_PROGRAM_BYTES};

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
const RAM_SIZE_BYTES: usize = 4096;

/// where programs are loaded and execution starts
pub const PROGRAM_ADDR: u16 = 0x200;

/// where the built-in font glyphs live
pub const FONT_ADDR: u16 = 0x050;

/// bytes per font glyph
pub const FONT_GLYPH_BYTES: u16 = 5;

/// The CHIP-8 memory map: a flat 4 KiB byte store.
///
/// 0x000-0x1ff is reserved for the interpreter; the 80-byte font set is baked
/// in at 0x050 during construction and nothing else ever writes below 0x200.
/// All addresses are masked to 12 bits, so arithmetic past 0xfff wraps rather
/// than trapping.
pub struct Memory {
    bytes: Box<[u8]>,
    program_len: usize,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = vec![0u8; RAM_SIZE_BYTES].into_boxed_slice();
        let font_at = FONT_ADDR as usize;
        bytes[font_at..font_at + FONT.len()].copy_from_slice(&FONT);
        Memory {
            bytes,
            program_len: 0,
        }
    }

    /// read one byte; the address is masked to 12 bits
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & 0xfff) as usize]
    }

    /// write one byte; the address is masked to 12 bits
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & 0xfff) as usize] = value;
    }

    /// read a big-endian two-byte word (how opcodes are stored)
    pub fn read_word(&self, addr: u16) -> u16 {
        (u16::from(self.read(addr)) << 8) | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Copy a program image verbatim to 0x200.. and record its length.
    ///
    /// Reloading overwrites the previous image's region; bytes beyond the new
    /// length are whatever the old image left there, so callers wanting a
    /// deterministic restart should build a fresh `Memory` first.
    pub fn load_program(&mut self, reader: &mut impl Read) -> Result<usize, LoadError> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        if image.is_empty() {
            return Err(LoadError::Empty);
        }
        if image.len() > MAX_PROGRAM_BYTES {
            return Err(LoadError::TooLarge(image.len()));
        }
        let start = PROGRAM_ADDR as usize;
        self.bytes[start..start + image.len()].copy_from_slice(&image);
        self.program_len = image.len();
        Ok(image.len())
    }

    /// length of the most recently loaded program image
    pub fn program_len(&self) -> usize {
        self.program_len
    }

    /// hexdump of an address range, 16 bytes to a line
    pub fn dump(&self, start: u16, end: u16) -> String {
        let mut out = String::new();
        for line_at in (start..end).step_by(16) {
            out.push_str(&format!("{:03x}:", line_at & 0xfff));
            for addr in line_at..(line_at + 16).min(end) {
                out.push_str(&format!(" {:02x}", self.read(addr)));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// the 'official' 4x5 fontset, one glyph per hex digit
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
