//! Antenna switch control
//!
//! Boards with a separate TX and RX front-end route the single antenna
//! through an RF switch driven by two control lines. The switch position
//! follows the transceiver's operating mode:
//!
//! | Mode | Position | ANT_SW1 | ANT_SW2 |
//! |------|----------|---------|---------|
//! | Sleep, Standby | [`SwitchState::Off`] | deasserted | deasserted |
//! | FsTx, Tx | [`SwitchState::Tx`] | asserted | deasserted |
//! | FsRx, RxContinuous, RxSingle, Cad | [`SwitchState::Rx`] | deasserted | asserted |
//!
//! The low-power override forces [`SwitchState::Off`] whatever the mode; it
//! is set before the MCU enters sleep. The position is recomputed from
//! (mode, override) on every call, and a new pair is only recorded once its
//! lines have been written.

use bitflags::bitflags;
use embedded_hal::digital::OutputPin;

use crate::{error::Error, pins::Line, registers::OperatingMode};

bitflags! {
    /// Antenna switch control lines asserted for a position
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SwitchLines: u8 {
        const SW1 = 1 << 0;
        const SW2 = 1 << 1;
    }
}

/// RF path selected by the switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    /// No RF path engaged
    Off,
    Tx,
    Rx,
}

impl SwitchState {
    /// Position for `mode`, honouring the low-power override.
    pub const fn for_mode(mode: OperatingMode, low_power: bool) -> Self {
        if low_power {
            return Self::Off;
        }
        match mode {
            OperatingMode::Sleep | OperatingMode::Standby => Self::Off,
            OperatingMode::FsTx | OperatingMode::Tx => Self::Tx,
            OperatingMode::FsRx
            | OperatingMode::RxContinuous
            | OperatingMode::RxSingle
            | OperatingMode::Cad => Self::Rx,
        }
    }

    pub const fn lines(self) -> SwitchLines {
        match self {
            Self::Off => SwitchLines::empty(),
            Self::Tx => SwitchLines::SW1,
            Self::Rx => SwitchLines::SW2,
        }
    }
}

pub struct AntennaSwitch<P> {
    lines: Option<(Line<P>, Line<P>)>,
    mode: OperatingMode,
    low_power: bool,
}

impl<P> AntennaSwitch<P> {
    /// A controller driving `sw1` and `sw2`.
    pub fn new(sw1: Line<P>, sw2: Line<P>) -> Self {
        Self {
            lines: Some((sw1, sw2)),
            mode: OperatingMode::Standby,
            low_power: false,
        }
    }

    /// A controller for a board without a switch; it tracks the mode and
    /// override but drives nothing.
    pub fn absent() -> Self {
        Self {
            lines: None,
            mode: OperatingMode::Standby,
            low_power: false,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.lines.is_some()
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn is_low_power(&self) -> bool {
        self.low_power
    }

    /// Position implied by the current mode and override.
    pub fn state(&self) -> SwitchState {
        SwitchState::for_mode(self.mode, self.low_power)
    }

    pub fn release(self) -> Option<(P, P)> {
        self.lines.map(|(sw1, sw2)| (sw1.release(), sw2.release()))
    }
}

impl<P: OutputPin> AntennaSwitch<P> {
    /// Routes the antenna for `mode`.
    ///
    /// The tracked mode only changes once the lines have been written.
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Error> {
        self.drive(SwitchState::for_mode(mode, self.low_power))?;
        self.mode = mode;
        Ok(())
    }

    /// Routes the antenna for a raw `RegOpMode` mode value.
    ///
    /// Values the transceiver does not define are rejected and leave the
    /// switch untouched.
    pub fn set_mode_raw(&mut self, mode: u8) -> Result<(), Error> {
        let mode = OperatingMode::try_from(mode)?;
        self.set_mode(mode)
    }

    /// Returns to Standby with the override lifted, which leaves both lines
    /// deasserted.
    pub fn idle(&mut self) -> Result<(), Error> {
        self.drive(SwitchState::Off)?;
        self.mode = OperatingMode::Standby;
        self.low_power = false;
        Ok(())
    }

    /// Enables or lifts the low-power override.
    pub fn set_low_power(&mut self, enabled: bool) -> Result<(), Error> {
        self.drive(SwitchState::for_mode(self.mode, enabled))?;
        self.low_power = enabled;
        Ok(())
    }

    /// Drives the lines to match [`state`](AntennaSwitch::state).
    pub fn apply(&mut self) -> Result<(), Error> {
        self.drive(self.state())
    }

    fn drive(&mut self, state: SwitchState) -> Result<(), Error> {
        let wanted = state.lines();
        if let Some((sw1, sw2)) = self.lines.as_mut() {
            // Break before make: release the unused path first
            if wanted.contains(SwitchLines::SW1) {
                sw2.deassert().map_err(|_| Error::AntennaSwitch)?;
                sw1.assert().map_err(|_| Error::AntennaSwitch)?;
            } else {
                sw1.deassert().map_err(|_| Error::AntennaSwitch)?;
                sw2.set(wanted.contains(SwitchLines::SW2))
                    .map_err(|_| Error::AntennaSwitch)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [OperatingMode; 8] = [
        OperatingMode::Sleep,
        OperatingMode::Standby,
        OperatingMode::FsTx,
        OperatingMode::Tx,
        OperatingMode::FsRx,
        OperatingMode::RxContinuous,
        OperatingMode::RxSingle,
        OperatingMode::Cad,
    ];

    #[test]
    fn mode_mapping() {
        assert_eq!(SwitchState::for_mode(OperatingMode::Sleep, false), SwitchState::Off);
        assert_eq!(SwitchState::for_mode(OperatingMode::Standby, false), SwitchState::Off);
        assert_eq!(SwitchState::for_mode(OperatingMode::Tx, false), SwitchState::Tx);
        assert_eq!(SwitchState::for_mode(OperatingMode::FsTx, false), SwitchState::Tx);
        assert_eq!(SwitchState::for_mode(OperatingMode::RxContinuous, false), SwitchState::Rx);
        assert_eq!(SwitchState::for_mode(OperatingMode::RxSingle, false), SwitchState::Rx);
        assert_eq!(SwitchState::for_mode(OperatingMode::FsRx, false), SwitchState::Rx);
        assert_eq!(SwitchState::for_mode(OperatingMode::Cad, false), SwitchState::Rx);
    }

    #[test]
    fn low_power_overrides_every_mode() {
        for mode in ALL_MODES {
            assert_eq!(SwitchState::for_mode(mode, true), SwitchState::Off);
            assert!(SwitchState::for_mode(mode, true).lines().is_empty());
        }
    }

    #[test]
    fn at_most_one_path_engaged() {
        for mode in ALL_MODES {
            let lines = SwitchState::for_mode(mode, false).lines();
            assert!(lines != SwitchLines::all(), "{:?}", mode);
        }
    }
}
