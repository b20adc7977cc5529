//! DIO interrupt routing
//!
//! The HAL's external-interrupt handler calls [`IrqRouter::dispatch`] with the
//! index of the DIO line that fired, and the router forwards the event to
//! whatever the transceiver driver registered for that line.
//!
//! # Important Notes
//! - `dispatch` runs in interrupt context. Handlers must not block, wait on
//!   timers, or touch pin configuration; record the event and return.
//! - Unregistered and out-of-range lines are ignored silently.
//! - The table never grows; its length `N` is the board's DIO line count.

use crate::{error::Error, pins::DioLine};

/// Receiver of DIO edge events
pub trait DioHandler: Sync {
    fn on_dio(&self, line: DioLine);
}

impl<F> DioHandler for F
where
    F: Fn(DioLine) + Sync,
{
    fn on_dio(&self, line: DioLine) {
        self(line)
    }
}

/// Fixed-size table of DIO handlers, one slot per line
pub struct IrqRouter<'a, const N: usize> {
    slots: [Option<&'a dyn DioHandler>; N],
}

impl<'a, const N: usize> IrqRouter<'a, N> {
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Installs `handlers[i]` on DIO line `i`, replacing the whole table.
    ///
    /// Slots past the end of `handlers` are cleared. A slice longer than
    /// the table is rejected and the table is left untouched.
    pub fn register_handlers(&mut self, handlers: &[Option<&'a dyn DioHandler>]) -> Result<(), Error> {
        if handlers.len() > N {
            return Err(Error::DioOutOfRange(handlers.len() - 1));
        }

        self.slots = [None; N];
        self.slots[..handlers.len()].copy_from_slice(handlers);
        Ok(())
    }

    /// Installs `handler` on `line`, replacing any previous handler.
    pub fn register(&mut self, line: DioLine, handler: &'a dyn DioHandler) -> Result<(), Error> {
        let slot = self
            .slots
            .get_mut(line.index())
            .ok_or(Error::DioOutOfRange(line.index()))?;
        *slot = Some(handler);
        Ok(())
    }

    /// Removes the handler on `line`, if any.
    pub fn unregister(&mut self, line: DioLine) {
        if let Some(slot) = self.slots.get_mut(line.index()) {
            *slot = None;
        }
    }

    pub fn is_registered(&self, line: DioLine) -> bool {
        matches!(self.slots.get(line.index()), Some(Some(_)))
    }

    /// Forwards an edge on DIO line `index` to its handler.
    #[inline]
    pub fn dispatch(&self, index: usize) {
        if let (Some(Some(handler)), Some(line)) = (self.slots.get(index), DioLine::from_index(index)) {
            handler.on_dio(line);
        }
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots = [None; N];
    }
}

impl<const N: usize> Default for IrqRouter<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
