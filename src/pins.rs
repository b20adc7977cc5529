//! Logical-to-physical pin bindings
//!
//! The transceiver driver thinks in terms of logical signals (NSS, RESET, the
//! DIO interrupt lines, the antenna switch controls...). A [`PinSet`] records,
//! for one board variant, which physical pin carries each of those signals,
//! its direction, and whether it is active-high or active-low.
//!
//! The pin set is pure data: it is built once in a `const` board description
//! and never changes afterwards. The actual pin handles are supplied
//! separately by the HAL and wrapped in a [`Line`], which applies the
//! binding's active level on every write.

use core::fmt;

use embedded_hal::digital::{OutputPin, PinState};

use crate::{config::BoardFeatures, error::ConfigError};

/// Logical radio signals a board may wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalPin {
    /// SPI chip select
    Nss,
    /// Transceiver reset (NRESET)
    Reset,
    /// DIO0 interrupt line
    Dio0,
    /// DIO1 interrupt line
    Dio1,
    /// DIO2 interrupt line
    Dio2,
    /// DIO3 interrupt line
    Dio3,
    /// DIO4 interrupt line
    Dio4,
    /// DIO5 interrupt line
    Dio5,
    /// Antenna switch control line 1 (transmit path)
    AntSw1,
    /// Antenna switch control line 2 (receive path)
    AntSw2,
    /// TCXO power enable
    TcxoEn,
    /// Transmit activity debug pin
    DbgTx,
    /// Receive activity debug pin
    DbgRx,
}

impl LogicalPin {
    /// Number of logical pins
    pub const COUNT: usize = 13;

    /// Direction this signal must be configured with on the MCU side.
    pub const fn direction(self) -> Direction {
        match self {
            Self::Dio0 | Self::Dio1 | Self::Dio2 | Self::Dio3 | Self::Dio4 | Self::Dio5 => {
                Direction::Input
            }
            _ => Direction::Output,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Validated index of a DIO interrupt line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DioLine {
    Dio0 = 0,
    Dio1 = 1,
    Dio2 = 2,
    Dio3 = 3,
    Dio4 = 4,
    Dio5 = 5,
}

impl DioLine {
    /// Number of DIO lines on an SX127x
    pub const COUNT: usize = 6;

    /// All DIO lines in index order
    pub const ALL: [DioLine; Self::COUNT] = [
        Self::Dio0,
        Self::Dio1,
        Self::Dio2,
        Self::Dio3,
        Self::Dio4,
        Self::Dio5,
    ];

    /// Slot index of this line in an IRQ table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Line for a raw index, if the transceiver has one.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Logical pin carrying this line.
    pub const fn pin(self) -> LogicalPin {
        match self {
            Self::Dio0 => LogicalPin::Dio0,
            Self::Dio1 => LogicalPin::Dio1,
            Self::Dio2 => LogicalPin::Dio2,
            Self::Dio3 => LogicalPin::Dio3,
            Self::Dio4 => LogicalPin::Dio4,
            Self::Dio5 => LogicalPin::Dio5,
        }
    }
}

/// Pin direction as seen from the MCU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Electrical level at which a signal is considered asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// A physical GPIO, named by port letter and pin number (e.g. `PA15`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalPin {
    /// Port index, 0 for port A
    pub port: u8,
    /// Pin number within the port
    pub number: u8,
}

impl PhysicalPin {
    /// Number of ports a letter can name
    const PORTS: u8 = 26;

    /// Creates a pin from its port letter and number. Lowercase letters are
    /// accepted.
    ///
    /// # Panics
    /// If `port` is not an ASCII letter. In a `const` board description this
    /// fails the build instead.
    pub const fn new(port: char, number: u8) -> Self {
        assert!(port.is_ascii_alphabetic(), "port must be a letter A-Z");
        Self {
            port: port.to_ascii_uppercase() as u8 - b'A',
            number,
        }
    }
}

impl fmt::Display for PhysicalPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port < Self::PORTS {
            write!(f, "P{}{}", (b'A' + self.port) as char, self.number)
        } else {
            // Port index set by hand past Z
            write!(f, "P{}.{}", self.port, self.number)
        }
    }
}

/// Where and how a logical signal is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinBinding {
    pub physical: PhysicalPin,
    pub direction: Direction,
    pub active_level: ActiveLevel,
}

impl PinBinding {
    /// An output asserted at `active_level`.
    pub const fn output(physical: PhysicalPin, active_level: ActiveLevel) -> Self {
        Self {
            physical,
            direction: Direction::Output,
            active_level,
        }
    }

    /// An input raising interrupts on its rising edge.
    pub const fn input(physical: PhysicalPin) -> Self {
        Self {
            physical,
            direction: Direction::Input,
            active_level: ActiveLevel::High,
        }
    }
}

/// The complete set of bindings for one board variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSet {
    bindings: [Option<PinBinding>; LogicalPin::COUNT],
}

impl PinSet {
    /// A pin set with nothing bound.
    pub const fn empty() -> Self {
        Self {
            bindings: [None; LogicalPin::COUNT],
        }
    }

    /// Returns the set with `pin` bound to `binding`, replacing any earlier
    /// binding of the same pin.
    pub const fn bind(mut self, pin: LogicalPin, binding: PinBinding) -> Self {
        self.bindings[pin.index()] = Some(binding);
        self
    }

    /// Binding for `pin`, if the board wires it.
    pub const fn binding(&self, pin: LogicalPin) -> Option<PinBinding> {
        self.bindings[pin.index()]
    }

    /// Active level of `pin`, defaulting to active-high for unbound pins.
    pub fn active_level(&self, pin: LogicalPin) -> ActiveLevel {
        self.binding(pin)
            .map(|b| b.active_level)
            .unwrap_or(ActiveLevel::High)
    }

    /// Checks that every pin required by `features` and by an IRQ table of
    /// `dio_count` lines is bound, with the right direction.
    ///
    /// NSS, RESET and DIO0 are always required.
    pub fn validate(&self, features: BoardFeatures, dio_count: usize) -> Result<(), ConfigError> {
        if dio_count == 0 || dio_count > DioLine::COUNT {
            return Err(ConfigError::InvalidDioCount(dio_count));
        }

        self.require(LogicalPin::Nss)?;
        self.require(LogicalPin::Reset)?;
        for line in &DioLine::ALL[..dio_count] {
            self.require(line.pin())?;
        }

        if features.contains(BoardFeatures::ANTENNA_SWITCH) {
            self.require(LogicalPin::AntSw1)?;
            self.require(LogicalPin::AntSw2)?;
        }
        if features.contains(BoardFeatures::TCXO) {
            self.require(LogicalPin::TcxoEn)?;
        }
        if features.contains(BoardFeatures::DEBUG_PINS) {
            self.require(LogicalPin::DbgTx)?;
            self.require(LogicalPin::DbgRx)?;
        }

        Ok(())
    }

    fn require(&self, pin: LogicalPin) -> Result<PinBinding, ConfigError> {
        let binding = self.binding(pin).ok_or(ConfigError::MissingPin(pin))?;
        if binding.direction != pin.direction() {
            return Err(ConfigError::WrongDirection(pin));
        }
        Ok(binding)
    }
}

impl Default for PinSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// An output pin together with the level that asserts it.
///
/// All writes go through [`Line::set`], so callers only ever talk about
/// asserted/deasserted and never about electrical levels.
#[derive(Debug)]
pub struct Line<P> {
    pin: P,
    active_level: ActiveLevel,
    asserted: bool,
}

impl<P> Line<P> {
    pub fn new(pin: P, active_level: ActiveLevel) -> Self {
        Self {
            pin,
            active_level,
            asserted: false,
        }
    }

    /// Whether the last successful write asserted the line.
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Releases the wrapped pin handle.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Line<P> {
    /// Drives the line to its asserted (`true`) or deasserted level.
    pub fn set(&mut self, asserted: bool) -> Result<(), P::Error> {
        let high = asserted == (self.active_level == ActiveLevel::High);
        self.pin.set_state(PinState::from(high))?;
        self.asserted = asserted;
        Ok(())
    }

    pub fn assert(&mut self) -> Result<(), P::Error> {
        self.set(true)
    }

    pub fn deassert(&mut self) -> Result<(), P::Error> {
        self.set(false)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::format;

    use super::*;

    const NSS: PinBinding = PinBinding::output(PhysicalPin::new('A', 15), ActiveLevel::Low);
    const RESET: PinBinding = PinBinding::output(PhysicalPin::new('A', 7), ActiveLevel::Low);
    const DIO0: PinBinding = PinBinding::input(PhysicalPin::new('B', 1));

    fn minimal() -> PinSet {
        PinSet::empty()
            .bind(LogicalPin::Nss, NSS)
            .bind(LogicalPin::Reset, RESET)
            .bind(LogicalPin::Dio0, DIO0)
    }

    #[test]
    fn physical_pin_display() {
        assert_eq!(format!("{}", PhysicalPin::new('A', 15)), "PA15");
        assert_eq!(format!("{}", PhysicalPin::new('B', 1)), "PB1");
        assert_eq!(
            format!("{}", PhysicalPin { port: 30, number: 2 }),
            "P30.2"
        );
    }

    #[test]
    fn lowercase_port_letters_fold_to_uppercase() {
        assert_eq!(PhysicalPin::new('a', 15), PhysicalPin::new('A', 15));
        assert_eq!(format!("{}", PhysicalPin::new('c', 13)), "PC13");
    }

    #[test]
    #[should_panic]
    fn non_letter_port_rejected() {
        let _ = PhysicalPin::new('1', 0);
    }

    #[test]
    fn minimal_set_validates() {
        assert_eq!(minimal().validate(BoardFeatures::empty(), 1), Ok(()));
    }

    #[test]
    fn missing_dio_is_rejected() {
        assert_eq!(
            minimal().validate(BoardFeatures::empty(), 2),
            Err(ConfigError::MissingPin(LogicalPin::Dio1))
        );
    }

    #[test]
    fn feature_pins_are_required() {
        assert_eq!(
            minimal().validate(BoardFeatures::ANTENNA_SWITCH, 1),
            Err(ConfigError::MissingPin(LogicalPin::AntSw1))
        );
        assert_eq!(
            minimal().validate(BoardFeatures::TCXO, 1),
            Err(ConfigError::MissingPin(LogicalPin::TcxoEn))
        );
        assert_eq!(
            minimal().validate(BoardFeatures::DEBUG_PINS, 1),
            Err(ConfigError::MissingPin(LogicalPin::DbgTx))
        );
    }

    #[test]
    fn direction_mismatch_is_rejected() {
        let pins = minimal().bind(LogicalPin::Dio0, NSS);
        assert_eq!(
            pins.validate(BoardFeatures::empty(), 1),
            Err(ConfigError::WrongDirection(LogicalPin::Dio0))
        );
    }

    #[test]
    fn dio_count_bounds() {
        assert_eq!(
            minimal().validate(BoardFeatures::empty(), 0),
            Err(ConfigError::InvalidDioCount(0))
        );
        assert_eq!(
            minimal().validate(BoardFeatures::empty(), 7),
            Err(ConfigError::InvalidDioCount(7))
        );
    }

    #[test]
    fn dio_lines_map_to_pins() {
        assert_eq!(DioLine::from_index(3), Some(DioLine::Dio3));
        assert_eq!(DioLine::from_index(6), None);
        assert_eq!(DioLine::Dio5.pin(), LogicalPin::Dio5);
        assert_eq!(LogicalPin::Dio5.direction(), Direction::Input);
        assert_eq!(LogicalPin::AntSw2.direction(), Direction::Output);
    }
}
