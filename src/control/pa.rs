//! Power amplifier path selection
//!
//! Maps a requested output power to the PA output the board wires for it and
//! the `RegPaConfig` value that produces that power. Requests outside what a
//! path can deliver are clamped to the path's nearest limit, never rejected,
//! so [`PaSelector::select`] cannot fail.
//!
//! | Path | Range | `RegPaConfig` |
//! |------|-------|---------------|
//! | RFO, `p <= 0` | -4..=0 dBm | MaxPower 0, OutputPower `p + 4` |
//! | RFO, `p > 0` | 1..=`rfo_max_dbm` | MaxPower 7, OutputPower `p` |
//! | PA_BOOST | 2..=17 dBm | OutputPower `p - 2` |
//! | PA_BOOST, high power | 5..=20 dBm | OutputPower `p - 5`, `RegPaDac` 0x87 |

use crate::{
    config::PaLimits,
    error::ConfigError,
    registers::{PaConfig, PaDac, PaPath},
};

/// Outcome of a power request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaPathDecision {
    pub path: PaPath,
    /// `RegPaConfig` value to write
    pub register_value: u8,
    /// Power actually produced after clamping, in dBm
    pub power_dbm: i8,
    /// `RegPaDac` must be switched to +20 dBm operation
    pub high_power: bool,
}

impl PaPathDecision {
    /// `RegPaDac` setting matching this decision.
    pub fn pa_dac(&self) -> PaDac {
        PaDac {
            high_power: self.high_power,
        }
    }

    /// Decoded `RegPaConfig` setting.
    pub fn pa_config(&self) -> PaConfig {
        PaConfig {
            pa_select: self.path,
            max_power: (self.register_value >> 4) & 0x07,
            output_power: self.register_value & 0x0F,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaSelector {
    limits: PaLimits,
}

impl PaSelector {
    /// Fails if `limits` lie outside what the SX127x can deliver.
    pub fn new(limits: PaLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    pub fn limits(&self) -> PaLimits {
        self.limits
    }

    /// Picks the output path and register value for `power_dbm`.
    pub fn select(&self, power_dbm: i8) -> PaPathDecision {
        let decision = if power_dbm < self.limits.threshold_dbm {
            self.rfo(power_dbm)
        } else {
            self.pa_boost(power_dbm)
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("PA request {} dBm -> {}", power_dbm, decision);

        decision
    }

    fn rfo(&self, power_dbm: i8) -> PaPathDecision {
        let power = power_dbm.clamp(PaLimits::RFO_MIN_DBM, self.limits.rfo_max_dbm);
        let config = if power > 0 {
            PaConfig {
                pa_select: PaPath::Rfo,
                max_power: 7,
                output_power: power as u8,
            }
        } else {
            PaConfig {
                pa_select: PaPath::Rfo,
                max_power: 0,
                output_power: (power - PaLimits::RFO_MIN_DBM) as u8,
            }
        };

        PaPathDecision {
            path: PaPath::Rfo,
            register_value: config.bits(),
            power_dbm: power,
            high_power: false,
        }
    }

    fn pa_boost(&self, power_dbm: i8) -> PaPathDecision {
        let high_power = self.limits.pa_boost_max_dbm > PaLimits::PA_BOOST_DEFAULT_MAX_DBM;
        let floor = if high_power {
            PaLimits::PA_BOOST_HP_MIN_DBM
        } else {
            PaLimits::PA_BOOST_MIN_DBM
        };
        let power = power_dbm.clamp(floor, self.limits.pa_boost_max_dbm);
        let config = PaConfig {
            pa_select: PaPath::PaBoost,
            max_power: 7,
            output_power: (power - floor) as u8,
        };

        PaPathDecision {
            path: PaPath::PaBoost,
            register_value: config.bits(),
            power_dbm: power,
            high_power,
        }
    }
}
