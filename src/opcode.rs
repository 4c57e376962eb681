/// A decoded instruction.
///
/// Opcodes are 16-bit big-endian words described by four hex nibbles. The
/// leading nibble selects the family; the 0x0, 0x8, 0xE and 0xF families are
/// further dispatched on the low nibble or low byte. Words that match nothing
/// decode to `Unknown` so the executor can log and skip them instead of
/// wedging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// 00E0: clear the screen
    Cls,
    /// 00EE: return from subroutine
    Ret,
    /// 1NNN: jump
    Jump(u16),
    /// 2NNN: call subroutine
    Call(u16),
    /// 3XNN: skip next if VX == NN
    SkipEqImm(u8, u8),
    /// 4XNN: skip next if VX != NN
    SkipNeImm(u8, u8),
    /// 5XY0: skip next if VX == VY
    SkipEqReg(u8, u8),
    /// 6XNN: VX = NN
    LoadImm(u8, u8),
    /// 7XNN: VX += NN, no carry flag
    AddImm(u8, u8),
    /// 8XY0: VX = VY
    Move(u8, u8),
    /// 8XY1: VX |= VY
    Or(u8, u8),
    /// 8XY2: VX &= VY
    And(u8, u8),
    /// 8XY3: VX ^= VY
    Xor(u8, u8),
    /// 8XY4: VX += VY, VF = carry
    Add(u8, u8),
    /// 8XY5: VX -= VY, VF = no-borrow
    Sub(u8, u8),
    /// 8XY6: VF = low bit, VX >>= 1
    Shr(u8),
    /// 8XY7: VX = VY - VX, VF = no-borrow
    SubFrom(u8, u8),
    /// 8XYE: VF = high bit, VX <<= 1
    Shl(u8),
    /// 9XY0: skip next if VX != VY
    SkipNeReg(u8, u8),
    /// ANNN: I = NNN
    LoadI(u16),
    /// BNNN: jump to NNN + V0
    JumpV0(u16),
    /// CXNN: VX = random byte & NN
    Rand(u8, u8),
    /// DXYN: xor-blit an N-row sprite from I at (VX, VY)
    Draw(u8, u8, u8),
    /// EX9E: skip next if key VX is held
    SkipKey(u8),
    /// EXA1: skip next if key VX is not held
    SkipNoKey(u8),
    /// FX07: VX = delay timer
    ReadDelay(u8),
    /// FX0A: suspend until a key press, then VX = key
    WaitKey(u8),
    /// FX15: delay timer = VX
    SetDelay(u8),
    /// FX18: sound timer = VX
    SetSound(u8),
    /// FX1E: I += VX, masked to 12 bits
    AddI(u8),
    /// FX29: I = font glyph address for digit VX
    FontChar(u8),
    /// FX33: binary-coded decimal of VX at I, I+1, I+2
    Bcd(u8),
    /// FX55: store V0..=VX at I.., I unchanged
    Store(u8),
    /// FX65: load V0..=VX from I.., I unchanged
    Load(u8),
    /// anything else: a decode fault, carried with the raw word
    Unknown(u16),
}

impl Opcode {
    pub fn decode(word: u16) -> Self {
        let x = ((word >> 8) & 0x0f) as u8;
        let y = ((word >> 4) & 0x0f) as u8;
        let n = (word & 0x000f) as u8;
        let nn = (word & 0x00ff) as u8;
        let nnn = word & 0x0fff;

        match word >> 12 {
            0x0 => match word {
                0x00e0 => Opcode::Cls,
                0x00ee => Opcode::Ret,
                // 0NNN machine-language routines don't exist here
                _ => Opcode::Unknown(word),
            },
            0x1 => Opcode::Jump(nnn),
            0x2 => Opcode::Call(nnn),
            0x3 => Opcode::SkipEqImm(x, nn),
            0x4 => Opcode::SkipNeImm(x, nn),
            0x5 if n == 0 => Opcode::SkipEqReg(x, y),
            0x6 => Opcode::LoadImm(x, nn),
            0x7 => Opcode::AddImm(x, nn),
            0x8 => match n {
                0x0 => Opcode::Move(x, y),
                0x1 => Opcode::Or(x, y),
                0x2 => Opcode::And(x, y),
                0x3 => Opcode::Xor(x, y),
                0x4 => Opcode::Add(x, y),
                0x5 => Opcode::Sub(x, y),
                0x6 => Opcode::Shr(x),
                0x7 => Opcode::SubFrom(x, y),
                0xe => Opcode::Shl(x),
                _ => Opcode::Unknown(word),
            },
            0x9 if n == 0 => Opcode::SkipNeReg(x, y),
            0xa => Opcode::LoadI(nnn),
            0xb => Opcode::JumpV0(nnn),
            0xc => Opcode::Rand(x, nn),
            0xd => Opcode::Draw(x, y, n),
            0xe => match nn {
                0x9e => Opcode::SkipKey(x),
                0xa1 => Opcode::SkipNoKey(x),
                _ => Opcode::Unknown(word),
            },
            0xf => match nn {
                0x07 => Opcode::ReadDelay(x),
                0x0a => Opcode::WaitKey(x),
                0x15 => Opcode::SetDelay(x),
                0x18 => Opcode::SetSound(x),
                0x1e => Opcode::AddI(x),
                0x29 => Opcode::FontChar(x),
                0x33 => Opcode::Bcd(x),
                0x55 => Opcode::Store(x),
                0x65 => Opcode::Load(x),
                _ => Opcode::Unknown(word),
            },
            _ => Opcode::Unknown(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero_family() {
        assert_eq!(Opcode::decode(0x00e0), Opcode::Cls);
        assert_eq!(Opcode::decode(0x00ee), Opcode::Ret);
        // a machine-language routine call is a decode fault here
        assert_eq!(Opcode::decode(0x0123), Opcode::Unknown(0x0123));
    }

    #[test]
    fn test_decode_flow_control() {
        assert_eq!(Opcode::decode(0x1abc), Opcode::Jump(0xabc));
        assert_eq!(Opcode::decode(0x2abc), Opcode::Call(0xabc));
        assert_eq!(Opcode::decode(0xbabc), Opcode::JumpV0(0xabc));
    }

    #[test]
    fn test_decode_skips() {
        assert_eq!(Opcode::decode(0x3a42), Opcode::SkipEqImm(0xa, 0x42));
        assert_eq!(Opcode::decode(0x4a42), Opcode::SkipNeImm(0xa, 0x42));
        assert_eq!(Opcode::decode(0x5ab0), Opcode::SkipEqReg(0xa, 0xb));
        assert_eq!(Opcode::decode(0x9ab0), Opcode::SkipNeReg(0xa, 0xb));
        // 5XY0 and 9XY0 require a zero low nibble
        assert_eq!(Opcode::decode(0x5ab1), Opcode::Unknown(0x5ab1));
        assert_eq!(Opcode::decode(0x9ab7), Opcode::Unknown(0x9ab7));
    }

    #[test]
    fn test_decode_alu_family() {
        assert_eq!(Opcode::decode(0x8ab0), Opcode::Move(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab1), Opcode::Or(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab2), Opcode::And(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab3), Opcode::Xor(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab4), Opcode::Add(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab5), Opcode::Sub(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8ab6), Opcode::Shr(0xa));
        assert_eq!(Opcode::decode(0x8ab7), Opcode::SubFrom(0xa, 0xb));
        assert_eq!(Opcode::decode(0x8abe), Opcode::Shl(0xa));
        assert_eq!(Opcode::decode(0x8ab8), Opcode::Unknown(0x8ab8));
    }

    #[test]
    fn test_decode_key_family() {
        assert_eq!(Opcode::decode(0xe39e), Opcode::SkipKey(0x3));
        assert_eq!(Opcode::decode(0xe3a1), Opcode::SkipNoKey(0x3));
        assert_eq!(Opcode::decode(0xe3a2), Opcode::Unknown(0xe3a2));
    }

    #[test]
    fn test_decode_f_family() {
        assert_eq!(Opcode::decode(0xf107), Opcode::ReadDelay(0x1));
        assert_eq!(Opcode::decode(0xf10a), Opcode::WaitKey(0x1));
        assert_eq!(Opcode::decode(0xf115), Opcode::SetDelay(0x1));
        assert_eq!(Opcode::decode(0xf118), Opcode::SetSound(0x1));
        assert_eq!(Opcode::decode(0xf11e), Opcode::AddI(0x1));
        assert_eq!(Opcode::decode(0xf129), Opcode::FontChar(0x1));
        assert_eq!(Opcode::decode(0xf133), Opcode::Bcd(0x1));
        assert_eq!(Opcode::decode(0xf155), Opcode::Store(0x1));
        assert_eq!(Opcode::decode(0xf165), Opcode::Load(0x1));
        assert_eq!(Opcode::decode(0xf1ff), Opcode::Unknown(0xf1ff));
    }

    #[test]
    fn test_decode_misc() {
        assert_eq!(Opcode::decode(0x6a42), Opcode::LoadImm(0xa, 0x42));
        assert_eq!(Opcode::decode(0x7a42), Opcode::AddImm(0xa, 0x42));
        assert_eq!(Opcode::decode(0xaabc), Opcode::LoadI(0xabc));
        assert_eq!(Opcode::decode(0xca42), Opcode::Rand(0xa, 0x42));
        assert_eq!(Opcode::decode(0xdab5), Opcode::Draw(0xa, 0xb, 0x5));
    }
}
