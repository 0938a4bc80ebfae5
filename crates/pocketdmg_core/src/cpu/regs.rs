/// LR35902 register file.
///
/// The eight 8-bit registers are stored individually and combined into
/// 16-bit pairs on demand, high byte first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// 16-bit register pairs as encoded in opcode bits 4-5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterPair {
    Af,
    Bc,
    De,
    Hl,
    Sp,
}

impl RegisterPair {
    /// Decode the `rp` table (BC, DE, HL, SP) used by loads and 16-bit ALU ops.
    #[inline]
    pub fn from_rp(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Bc,
            1 => Self::De,
            2 => Self::Hl,
            _ => Self::Sp,
        }
    }

    /// Decode the `rp2` table (BC, DE, HL, AF) used by PUSH and POP.
    #[inline]
    pub fn from_rp2(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Bc,
            1 => Self::De,
            2 => Self::Hl,
            _ => Self::Af,
        }
    }
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    pub fn pair(&self, pair: RegisterPair) -> u16 {
        match pair {
            RegisterPair::Af => self.af(),
            RegisterPair::Bc => self.bc(),
            RegisterPair::De => self.de(),
            RegisterPair::Hl => self.hl(),
            RegisterPair::Sp => self.sp,
        }
    }

    pub fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        match pair {
            RegisterPair::Af => self.set_af(value),
            RegisterPair::Bc => self.set_bc(value),
            RegisterPair::De => self.set_de(value),
            RegisterPair::Hl => self.set_hl(value),
            RegisterPair::Sp => self.sp = value,
        }
    }

    /// High byte of a pair (A, B, D, H, or SP's upper byte).
    #[inline]
    pub fn high(&self, pair: RegisterPair) -> u8 {
        (self.pair(pair) >> 8) as u8
    }

    /// Low byte of a pair. For AF this is F with its low nibble clear.
    #[inline]
    pub fn low(&self, pair: RegisterPair) -> u8 {
        self.pair(pair) as u8
    }
}

/// Flag bits in the F register.
///
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0-3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}
