//! Hardware reset sequencing
//!
//! A reset is always the same four steps: assert RESET, hold it for
//! [`ResetTiming::assert_us`], release it, then wait
//! [`ResetTiming::settle_us`] for the chip to come up. When [`reset`]
//! returns the transceiver is in its power-on register state.
//!
//! Both waits block the caller for their full duration and cannot be
//! cancelled.
//!
//! [`reset`]: ResetSequencer::reset

use embedded_hal::digital::OutputPin;

use crate::{config::ResetTiming, error::Error, pins::Line};

pub struct ResetSequencer<P> {
    line: Line<P>,
    timing: ResetTiming,
}

impl<P> ResetSequencer<P> {
    pub fn new(line: Line<P>, timing: ResetTiming) -> Self {
        Self { line, timing }
    }

    pub fn timing(&self) -> ResetTiming {
        self.timing
    }

    pub fn release(self) -> P {
        self.line.release()
    }
}

impl<P: OutputPin> ResetSequencer<P> {
    /// Lets the radio run by deasserting RESET without any wait.
    pub fn deassert(&mut self) -> Result<(), Error> {
        self.line.deassert().map_err(|_| Error::Reset)
    }

    /// Runs the reset sequence, blocking on `delay`.
    pub fn reset<D: embedded_hal::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("radio reset: hold {}us, settle {}us", self.timing.assert_us, self.timing.settle_us);

        self.line.assert().map_err(|_| Error::Reset)?;
        delay.delay_us(self.timing.assert_us);
        self.line.deassert().map_err(|_| Error::Reset)?;
        delay.delay_us(self.timing.settle_us);
        Ok(())
    }

    /// Asynchronous version of [`reset`](ResetSequencer::reset).
    pub async fn reset_async<D: embedded_hal_async::delay::DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("radio reset: hold {}us, settle {}us", self.timing.assert_us, self.timing.settle_us);

        self.line.assert().map_err(|_| Error::Reset)?;
        delay.delay_us(self.timing.assert_us).await;
        self.line.deassert().map_err(|_| Error::Reset)?;
        delay.delay_us(self.timing.settle_us).await;
        Ok(())
    }
}
