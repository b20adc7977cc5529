//! TX/RX activity instrumentation pins
//!
//! Storage and writes only exist with the `debug-pins` feature; without it
//! every call compiles to nothing.

#[cfg(not(feature = "debug-pins"))]
use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;

use crate::error::Error;
#[cfg(feature = "debug-pins")]
use crate::pins::Line;

pub struct DebugPins<P> {
    #[cfg(feature = "debug-pins")]
    tx: Option<Line<P>>,
    #[cfg(feature = "debug-pins")]
    rx: Option<Line<P>>,
    #[cfg(not(feature = "debug-pins"))]
    _pins: PhantomData<P>,
}

#[cfg(feature = "debug-pins")]
impl<P> DebugPins<P> {
    pub fn new(tx: Line<P>, rx: Line<P>) -> Self {
        Self {
            tx: Some(tx),
            rx: Some(rx),
        }
    }

    pub fn absent() -> Self {
        Self { tx: None, rx: None }
    }

    pub fn release(self) -> (Option<P>, Option<P>) {
        (self.tx.map(Line::release), self.rx.map(Line::release))
    }
}

#[cfg(feature = "debug-pins")]
impl<P: OutputPin> DebugPins<P> {
    #[inline]
    pub fn write_tx(&mut self, active: bool) -> Result<(), Error> {
        match self.tx.as_mut() {
            Some(line) => line.set(active).map_err(|_| Error::DebugPin),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn write_rx(&mut self, active: bool) -> Result<(), Error> {
        match self.rx.as_mut() {
            Some(line) => line.set(active).map_err(|_| Error::DebugPin),
            None => Ok(()),
        }
    }
}

#[cfg(not(feature = "debug-pins"))]
impl<P> DebugPins<P> {
    pub fn absent() -> Self {
        Self { _pins: PhantomData }
    }

    pub fn release(self) -> (Option<P>, Option<P>) {
        (None, None)
    }
}

#[cfg(not(feature = "debug-pins"))]
impl<P: OutputPin> DebugPins<P> {
    #[inline(always)]
    pub fn write_tx(&mut self, _active: bool) -> Result<(), Error> {
        Ok(())
    }

    #[inline(always)]
    pub fn write_rx(&mut self, _active: bool) -> Result<(), Error> {
        Ok(())
    }
}
