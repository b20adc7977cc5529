//! Board-fixed configuration
//!
//! Every board variant is described by one [`BoardConfig`] value: its pin
//! bindings, the optional hardware it carries, the spectrum it supports, its
//! power amplifier limits and the timing contracts of its reset line and
//! oscillator. Configurations are `const` data; the variant in use is picked
//! at build time with a `board-*` cargo feature and returned by
//! [`BoardConfig::selected`].
//!
//! | Preset | Switch | TCXO | PA paths |
//! |--------|--------|------|----------|
//! | [`BoardConfig::LORA_MODULE`] | no | no | PA_BOOST only, +20 dBm |
//! | [`BoardConfig::SX1276_RFSW`] | yes | no | RFO below +15 dBm, PA_BOOST up to +20 dBm |
//! | [`BoardConfig::SX1276_TCXO`] | yes | 5 ms | as above, plus debug pins |

use bitflags::bitflags;

use crate::{
    error::ConfigError,
    pins::{ActiveLevel, LogicalPin, PhysicalPin, PinBinding, PinSet},
    registers::{RegisterInit, RADIO_INIT_REGISTERS},
};

bitflags! {
    /// Optional hardware fitted on a board
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BoardFeatures: u8 {
        /// An external TX/RX antenna switch driven by ANT_SW1/ANT_SW2
        const ANTENNA_SWITCH = 1 << 0;
        /// A TCXO whose supply is switched by TCXO_EN
        const TCXO = 1 << 1;
        /// TX/RX activity instrumentation pins
        const DEBUG_PINS = 1 << 2;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BoardFeatures {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BoardFeatures({=u8:#x})", self.bits())
    }
}

/// Supported RF spectrum, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyRange {
    pub min_hz: u32,
    pub max_hz: u32,
}

impl FrequencyRange {
    /// Full SX1276 synthesizer range
    pub const SX1276: Self = Self {
        min_hz: 137_000_000,
        max_hz: 1_020_000_000,
    };
}

/// Power amplifier wiring limits
///
/// Requests below `threshold_dbm` use the RFO pin, everything else the
/// PA_BOOST pin. A board that only wires PA_BOOST sets the threshold to
/// `i8::MIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaLimits {
    /// First power level routed to PA_BOOST
    pub threshold_dbm: i8,
    /// Highest power delivered on RFO, at most +15 dBm
    pub rfo_max_dbm: i8,
    /// Highest power delivered on PA_BOOST, at most +20 dBm. Anything above
    /// +17 dBm puts the path in the high-power `RegPaDac` mode.
    pub pa_boost_max_dbm: i8,
}

impl PaLimits {
    /// Lowest power the RFO path can produce
    pub const RFO_MIN_DBM: i8 = -4;
    /// Highest power the RFO path can produce
    pub const RFO_CEILING_DBM: i8 = 15;
    /// Lowest power of the PA_BOOST path in its default mode
    pub const PA_BOOST_MIN_DBM: i8 = 2;
    /// Highest power of the PA_BOOST path without the high-power DAC
    pub const PA_BOOST_DEFAULT_MAX_DBM: i8 = 17;
    /// Lowest power of the PA_BOOST path in high-power mode
    pub const PA_BOOST_HP_MIN_DBM: i8 = 5;
    /// Highest power of the PA_BOOST path in high-power mode
    pub const PA_BOOST_CEILING_DBM: i8 = 20;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::RFO_MIN_DBM..=Self::RFO_CEILING_DBM).contains(&self.rfo_max_dbm)
            || !(Self::PA_BOOST_MIN_DBM..=Self::PA_BOOST_CEILING_DBM)
                .contains(&self.pa_boost_max_dbm)
        {
            return Err(ConfigError::InvalidPaLimits);
        }
        Ok(())
    }
}

/// Reset pulse timing contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetTiming {
    /// How long RESET is held asserted, in microseconds
    pub assert_us: u32,
    /// How long to wait after releasing RESET, in microseconds
    pub settle_us: u32,
}

impl ResetTiming {
    /// Datasheet minimum is 100 µs asserted and 5 ms until the chip is ready;
    /// both are rounded up.
    pub const SX127X: Self = Self {
        assert_us: 1_000,
        settle_us: 6_000,
    };
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self::SX127X
    }
}

/// Everything this layer knows about one board variant
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    /// Human readable board name
    pub name: &'static str,
    pub pins: PinSet,
    pub features: BoardFeatures,
    pub frequency: FrequencyRange,
    /// Frequencies strictly above this use the high-band RF chain
    pub mid_band_hz: u32,
    pub pa: PaLimits,
    pub reset: ResetTiming,
    /// Oscillator start-up time once TCXO_EN is asserted
    pub tcxo_wakeup_ms: u32,
    /// Registers the driver writes after every reset
    pub init_registers: &'static [RegisterInit],
}

/// Boundary between the SX127x low and high frequency bands
pub const RF_MID_BAND_THRESH: u32 = 525_000_000;

const fn out_low(port: char, number: u8) -> PinBinding {
    PinBinding::output(PhysicalPin::new(port, number), ActiveLevel::Low)
}

const fn out_high(port: char, number: u8) -> PinBinding {
    PinBinding::output(PhysicalPin::new(port, number), ActiveLevel::High)
}

const fn input(port: char, number: u8) -> PinBinding {
    PinBinding::input(PhysicalPin::new(port, number))
}

impl BoardConfig {
    /// Reference LoRa module on an STM32 carrier.
    ///
    /// Only PA_BOOST is routed to the antenna, there is no external switch
    /// and the radio runs from its own crystal.
    pub const LORA_MODULE: Self = Self {
        name: "lora-module",
        pins: PinSet::empty()
            .bind(LogicalPin::Nss, out_low('A', 15))
            .bind(LogicalPin::Reset, out_low('A', 7))
            .bind(LogicalPin::Dio0, input('B', 1))
            .bind(LogicalPin::Dio1, input('B', 0))
            .bind(LogicalPin::Dio2, input('B', 10)),
        features: BoardFeatures::empty(),
        frequency: FrequencyRange::SX1276,
        mid_band_hz: RF_MID_BAND_THRESH,
        pa: PaLimits {
            threshold_dbm: i8::MIN,
            rfo_max_dbm: 14,
            pa_boost_max_dbm: 20,
        },
        reset: ResetTiming::SX127X,
        tcxo_wakeup_ms: 0,
        init_registers: &RADIO_INIT_REGISTERS,
    };

    /// SX1276 board with an external RF switch and both PA outputs wired.
    pub const SX1276_RFSW: Self = Self {
        name: "sx1276-rfsw",
        pins: PinSet::empty()
            .bind(LogicalPin::Nss, out_low('A', 15))
            .bind(LogicalPin::Reset, out_low('A', 0))
            .bind(LogicalPin::Dio0, input('B', 4))
            .bind(LogicalPin::Dio1, input('B', 1))
            .bind(LogicalPin::Dio2, input('B', 0))
            .bind(LogicalPin::Dio3, input('C', 13))
            .bind(LogicalPin::AntSw1, out_high('C', 1))
            .bind(LogicalPin::AntSw2, out_high('C', 2)),
        features: BoardFeatures::ANTENNA_SWITCH,
        frequency: FrequencyRange::SX1276,
        mid_band_hz: RF_MID_BAND_THRESH,
        pa: PaLimits {
            threshold_dbm: 15,
            rfo_max_dbm: 14,
            pa_boost_max_dbm: 20,
        },
        reset: ResetTiming::SX127X,
        tcxo_wakeup_ms: 0,
        init_registers: &RADIO_INIT_REGISTERS,
    };

    /// [`BoardConfig::SX1276_RFSW`] with a TCXO and TX/RX debug pins.
    pub const SX1276_TCXO: Self = Self {
        name: "sx1276-tcxo",
        pins: Self::SX1276_RFSW
            .pins
            .bind(LogicalPin::TcxoEn, out_high('A', 12))
            .bind(LogicalPin::DbgTx, out_high('B', 13))
            .bind(LogicalPin::DbgRx, out_high('B', 14)),
        features: BoardFeatures::ANTENNA_SWITCH
            .union(BoardFeatures::TCXO)
            .union(BoardFeatures::DEBUG_PINS),
        tcxo_wakeup_ms: 5,
        ..Self::SX1276_RFSW
    };

    /// Board variant chosen at build time.
    pub const fn selected() -> Self {
        if cfg!(feature = "board-sx1276-tcxo") {
            Self::SX1276_TCXO
        } else if cfg!(feature = "board-sx1276-rfsw") {
            Self::SX1276_RFSW
        } else {
            Self::LORA_MODULE
        }
    }

    /// Checks the description is internally consistent for an IRQ table of
    /// `dio_count` lines.
    pub fn validate(&self, dio_count: usize) -> Result<(), ConfigError> {
        self.pins.validate(self.features, dio_count)?;
        if self.frequency.min_hz > self.frequency.max_hz {
            return Err(ConfigError::InvalidFrequencyRange);
        }
        self.pa.validate()
    }

    pub fn has(&self, feature: BoardFeatures) -> bool {
        self.features.contains(feature)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::selected()
    }
}
