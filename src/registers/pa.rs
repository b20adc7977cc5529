//! Power amplifier registers
//!
//! The SX127x has two transmit outputs: RFO, a direct low-power output, and
//! PA_BOOST, an amplified output able to reach +20 dBm. Which one reaches the
//! antenna is a property of the board, so this layer computes the
//! `RegPaConfig` and `RegPaDac` contents and hands them to the driver.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Power amplifier output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaPath {
    /// RFO pin, up to +15 dBm
    Rfo = 0,
    /// PA_BOOST pin, up to +20 dBm
    PaBoost = 1,
}

/// PA configuration register (address: 0x09)
///
/// Output power on RFO is `Pmax - (15 - output_power)` with
/// `Pmax = 10.8 + 0.6 * max_power` dBm. On PA_BOOST it is
/// `17 - (15 - output_power)` dBm, or `20 - (15 - output_power)` dBm with
/// the high-power DAC enabled; `max_power` is ignored there.
#[register(0x09u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaConfig {
    /// Output pin selection (bit 7)
    pub pa_select: PaPath,
    /// Maximum RFO power selector, 0..=7 (bits 6:4)
    pub max_power: u8,
    /// Output power step, 0..=15 (bits 3:0)
    pub output_power: u8,
}

impl PaConfig {
    /// Raw register byte.
    pub const fn bits(self) -> u8 {
        ((self.pa_select as u8) << 7) | ((self.max_power & 0x07) << 4) | (self.output_power & 0x0F)
    }
}

impl Default for PaConfig {
    fn default() -> Self {
        // Power-on value 0x4F
        Self {
            pa_select: PaPath::Rfo,
            max_power: 0x04,
            output_power: 0x0F,
        }
    }
}

impl FromByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            pa_select: if bytes[0] & 0x80 != 0 {
                PaPath::PaBoost
            } else {
                PaPath::Rfo
            },
            max_power: (bytes[0] >> 4) & 0x07,
            output_power: bytes[0] & 0x0F,
        })
    }
}

impl ToByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

/// High power PA DAC register (address: 0x4D)
///
/// # Important Notes
/// - Only meaningful on PA_BOOST
/// - High-power mode is limited to 1% duty cycle by the datasheet
/// - OCP should be raised when high-power mode is enabled
#[register(0x4Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaDac {
    /// +20 dBm operation on PA_BOOST
    pub high_power: bool,
}

impl PaDac {
    const DEFAULT: u8 = 0x84;
    const HIGH_POWER: u8 = 0x87;

    /// Raw register byte.
    pub const fn bits(self) -> u8 {
        if self.high_power {
            Self::HIGH_POWER
        } else {
            Self::DEFAULT
        }
    }
}

impl Default for PaDac {
    fn default() -> Self {
        Self { high_power: false }
    }
}

impl FromByteArray for PaDac {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            high_power: bytes[0] & 0x07 == 0x07,
        })
    }
}

impl ToByteArray for PaDac {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}
