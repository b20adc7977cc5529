//! Board control components
//!
//! Each component owns the pins for one concern and holds the policy for it:
//!
//! - [`irq`]: DIO interrupt routing
//! - [`reset`]: reset pulse sequencing
//! - [`pa`]: power amplifier path selection
//! - [`antenna`]: antenna switch positioning
//! - [`frequency`]: supported spectrum checks
//! - [`tcxo`]: oscillator supply control
//! - [`debug`]: activity instrumentation pins
//!
//! They are usable on their own, but normally reached through
//! [`Board`](crate::Board), which owns one of each.

pub mod antenna;
pub mod debug;
pub mod frequency;
pub mod irq;
pub mod pa;
pub mod reset;
pub mod tcxo;

pub use antenna::{AntennaSwitch, SwitchLines, SwitchState};
pub use debug::DebugPins;
pub use frequency::{Band, FrequencyValidator};
pub use irq::{DioHandler, IrqRouter};
pub use pa::{PaPathDecision, PaSelector};
pub use reset::ResetSequencer;
pub use tcxo::TcxoController;
