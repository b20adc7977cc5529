//! Frequency range checks

use crate::config::FrequencyRange;

/// Half of the SX127x spectrum a frequency falls in
///
/// The two halves use different RF chains (RFO_LF/RFI_LF vs RFO_HF/RFI_HF)
/// and different `RegOpMode` register banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Low,
    High,
}

#[derive(Debug, Clone, Copy)]
pub struct FrequencyValidator {
    range: FrequencyRange,
    mid_band_hz: u32,
}

impl FrequencyValidator {
    pub fn new(range: FrequencyRange, mid_band_hz: u32) -> Self {
        Self { range, mid_band_hz }
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    /// Whether the board can operate at `freq_hz`; both bounds inclusive.
    pub fn is_supported(&self, freq_hz: u32) -> bool {
        (self.range.min_hz..=self.range.max_hz).contains(&freq_hz)
    }

    pub fn band(&self, freq_hz: u32) -> Band {
        if freq_hz > self.mid_band_hz {
            Band::High
        } else {
            Band::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RF_MID_BAND_THRESH;

    fn validator() -> FrequencyValidator {
        FrequencyValidator::new(
            FrequencyRange {
                min_hz: 137_000_000,
                max_hz: 1_020_000_000,
            },
            RF_MID_BAND_THRESH,
        )
    }

    #[test]
    fn bounds_are_inclusive() {
        let v = validator();
        assert!(v.is_supported(137_000_000));
        assert!(v.is_supported(1_020_000_000));
        assert!(!v.is_supported(136_999_999));
        assert!(!v.is_supported(1_020_000_001));
    }

    #[test]
    fn common_channels() {
        let v = validator();
        assert!(v.is_supported(868_000_000));
        assert!(v.is_supported(433_175_000));
        assert!(!v.is_supported(2_400_000_000));
        assert!(!v.is_supported(0));
        assert!(!v.is_supported(u32::MAX));
    }

    #[test]
    fn band_split() {
        let v = validator();
        assert_eq!(v.band(433_000_000), Band::Low);
        assert_eq!(v.band(RF_MID_BAND_THRESH), Band::Low);
        assert_eq!(v.band(RF_MID_BAND_THRESH + 1), Band::High);
        assert_eq!(v.band(915_000_000), Band::High);
    }
}
