//! TCXO supply control
//!
//! Some boards clock the transceiver from a temperature-compensated crystal
//! oscillator whose supply is switched by a GPIO. After the supply is
//! enabled the oscillator needs [`TcxoController::wakeup_time_ms`] to
//! stabilise. On boards without a TCXO every call is a no-op and the wake-up
//! time is zero.

use embedded_hal::digital::OutputPin;

use crate::{error::Error, pins::Line};

pub struct TcxoController<P> {
    line: Option<Line<P>>,
    wakeup_time_ms: u32,
}

impl<P> TcxoController<P> {
    pub fn new(line: Line<P>, wakeup_time_ms: u32) -> Self {
        Self {
            line: Some(line),
            wakeup_time_ms,
        }
    }

    pub fn absent() -> Self {
        Self {
            line: None,
            wakeup_time_ms: 0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.line.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.line.as_ref().is_some_and(|line| line.is_asserted())
    }

    /// Time the oscillator needs after being enabled, in milliseconds.
    pub fn wakeup_time_ms(&self) -> u32 {
        if self.line.is_some() {
            self.wakeup_time_ms
        } else {
            0
        }
    }

    pub fn release(self) -> Option<P> {
        self.line.map(Line::release)
    }
}

impl<P: OutputPin> TcxoController<P> {
    /// Switches the oscillator supply. The caller must wait
    /// [`wakeup_time_ms`](TcxoController::wakeup_time_ms) after enabling
    /// before relying on the clock.
    pub fn set(&mut self, enabled: bool) -> Result<(), Error> {
        match self.line.as_mut() {
            Some(line) => line.set(enabled).map_err(|_| Error::Tcxo),
            None => Ok(()),
        }
    }

    /// Enables the oscillator and blocks until it is stable. Returns at
    /// once if it was already running.
    pub fn enable_and_wait<D: embedded_hal::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if self.is_enabled() {
            return Ok(());
        }
        self.set(true)?;
        if self.wakeup_time_ms() > 0 {
            delay.delay_ms(self.wakeup_time_ms());
        }
        Ok(())
    }

    /// Asynchronous version of
    /// [`enable_and_wait`](TcxoController::enable_and_wait).
    pub async fn enable_and_wait_async<D: embedded_hal_async::delay::DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error> {
        if self.is_enabled() {
            return Ok(());
        }
        self.set(true)?;
        if self.wakeup_time_ms() > 0 {
            delay.delay_ms(self.wakeup_time_ms()).await;
        }
        Ok(())
    }
}
