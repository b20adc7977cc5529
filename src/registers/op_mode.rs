//! Operating mode register

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::Error;

/// Transceiver operating mode, as encoded in `RegOpMode` bits 2:0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    Sleep = 0,
    Standby = 1,
    /// Frequency synthesis ahead of a transmission
    FsTx = 2,
    Tx = 3,
    /// Frequency synthesis ahead of a reception
    FsRx = 4,
    RxContinuous = 5,
    RxSingle = 6,
    /// Channel activity detection (LoRa)
    Cad = 7,
}

impl OperatingMode {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Sleep,
            1 => Self::Standby,
            2 => Self::FsTx,
            3 => Self::Tx,
            4 => Self::FsRx,
            5 => Self::RxContinuous,
            6 => Self::RxSingle,
            _ => Self::Cad,
        }
    }
}

impl TryFrom<u8> for OperatingMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 0x07 {
            return Err(Error::UndefinedMode(value));
        }
        Ok(Self::from_bits(value))
    }
}

/// Operating mode register (address: 0x01)
///
/// Drivers read this after each mode change and pass [`OpMode::mode`] on to
/// the antenna switch.
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct OpMode {
    /// LoRa (true) or FSK/OOK (false) modem (bit 7)
    pub long_range_mode: bool,
    /// Access the FSK register page while in LoRa mode (bit 6)
    pub access_shared_reg: bool,
    /// Low frequency register bank, for the low band (bit 3)
    pub low_frequency_mode: bool,
    /// Operating mode (bits 2:0)
    pub mode: OperatingMode,
}

impl Default for OpMode {
    fn default() -> Self {
        // Power-on value 0x09
        Self {
            long_range_mode: false,
            access_shared_reg: false,
            low_frequency_mode: true,
            mode: OperatingMode::Standby,
        }
    }
}

impl FromByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            long_range_mode: bytes[0] & 0x80 != 0,
            access_shared_reg: bytes[0] & 0x40 != 0,
            low_frequency_mode: bytes[0] & 0x08 != 0,
            mode: OperatingMode::from_bits(bytes[0]),
        })
    }
}

impl ToByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let mut byte = self.mode as u8;
        if self.long_range_mode {
            byte |= 0x80;
        }
        if self.access_shared_reg {
            byte |= 0x40;
        }
        if self.low_frequency_mode {
            byte |= 0x08;
        }
        Ok([byte])
    }
}
