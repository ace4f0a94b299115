//! # Processor Status Register
//!
//! The 6502 keeps its condition codes in a single byte, `P`, laid out as
//! `NV-BDIZC`. Bit 5 has no latch behind it and always reads back as 1; bit 4
//! (Break) only exists in copies of `P` pushed onto the stack.

use bitflags::bitflags;

bitflags! {
    /// Bit-mapped processor status register.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::Status;
    ///
    /// let p = Status::from_bits_retain(0x24);
    /// assert!(p.contains(Status::INTERRUPT_DISABLE));
    /// assert!(p.contains(Status::UNUSED));
    /// assert!(!p.contains(Status::CARRY));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Set on unsigned carry out of bit 7 (or "no borrow" for subtraction).
        const CARRY = 0b0000_0001;
        /// Set when the result is zero.
        const ZERO = 0b0000_0010;
        /// Masks IRQ when set. NMI ignores it.
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Selects BCD arithmetic for ADC and SBC.
        const DECIMAL = 0b0000_1000;
        /// Only meaningful in a pushed copy of the register.
        const BREAK = 0b0001_0000;
        /// Always 1.
        const UNUSED = 0b0010_0000;
        /// Set on signed overflow.
        const OVERFLOW = 0b0100_0000;
        /// Copy of bit 7 of the result.
        const NEGATIVE = 0b1000_0000;
    }
}

impl Status {
    /// Loads a raw byte, forcing the unused bit.
    pub const fn from_byte(value: u8) -> Self {
        Self::from_bits_retain(value | Self::UNUSED.bits())
    }

    /// Byte pushed by PHP and BRK: break and unused both set.
    pub const fn to_byte_brk(self) -> u8 {
        self.bits() | Self::BREAK.bits() | Self::UNUSED.bits()
    }

    /// Byte pushed by hardware interrupt service: unused set, break clear.
    pub const fn to_byte_irq(self) -> u8 {
        (self.bits() | Self::UNUSED.bits()) & !Self::BREAK.bits()
    }

    /// Register value after PLP or RTI pulls `value`: unused set, break clear.
    pub const fn from_pulled(value: u8) -> Self {
        Self::from_bits_retain((value | Self::UNUSED.bits()) & !Self::BREAK.bits())
    }

    /// Updates Zero and Negative from a result byte.
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::ZERO, value == 0);
        self.set(Self::NEGATIVE, value & 0x80 != 0);
    }
}
