//! Error types
//!
//! Failures fall into two groups. [`ConfigError`] is raised while a
//! [`Board`](crate::Board) is being constructed and means the board
//! description itself is inconsistent; no board is produced. [`Error`] is
//! returned by the runtime operations and mostly reports a GPIO write that
//! the HAL refused.

use core::fmt;

use crate::pins::LogicalPin;

/// Board description faults, detected before the board is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A feature declared present needs this pin, but it has no binding or
    /// no pin handle was supplied for it
    MissingPin(LogicalPin),
    /// A pin handle was supplied for a feature the board does not declare
    UnexpectedPin(LogicalPin),
    /// The binding's direction contradicts the logical pin's role
    WrongDirection(LogicalPin),
    /// The IRQ table length is outside 1..=6
    InvalidDioCount(usize),
    /// The frequency range minimum is above its maximum
    InvalidFrequencyRange,
    /// A PA path maximum lies outside what the SX127x can deliver
    InvalidPaLimits,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPin(pin) => write!(f, "no binding for required pin {:?}", pin),
            Self::UnexpectedPin(pin) => write!(f, "pin {:?} supplied for an undeclared feature", pin),
            Self::WrongDirection(pin) => write!(f, "pin {:?} bound with the wrong direction", pin),
            Self::InvalidDioCount(count) => write!(f, "unsupported DIO line count {}", count),
            Self::InvalidFrequencyRange => f.write_str("frequency range minimum exceeds maximum"),
            Self::InvalidPaLimits => f.write_str("PA limits outside the transceiver's range"),
        }
    }
}

/// Runtime errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Board description fault
    Config(ConfigError),
    /// Writing the RESET line failed
    Reset,
    /// Writing one of the antenna switch lines failed
    AntennaSwitch,
    /// Writing the TCXO enable line failed
    Tcxo,
    /// Writing a debug instrumentation line failed
    DebugPin,
    /// The raw operating mode value is not one the transceiver defines
    UndefinedMode(u8),
    /// The DIO index does not fit the board's IRQ table
    DioOutOfRange(usize),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration fault: {}", err),
            Self::Reset => f.write_str("failed to drive the RESET line"),
            Self::AntennaSwitch => f.write_str("failed to drive an antenna switch line"),
            Self::Tcxo => f.write_str("failed to drive the TCXO enable line"),
            Self::DebugPin => f.write_str("failed to drive a debug line"),
            Self::UndefinedMode(mode) => write!(f, "undefined operating mode {:#04x}", mode),
            Self::DioOutOfRange(index) => write!(f, "DIO index {} outside the IRQ table", index),
        }
    }
}
