//! SX127x register definitions used by the board layer
//! Layouts follow the SX1276/77/78/79 datasheet, rev. 7

mod init;
mod op_mode;
mod pa;

pub use init::*;
pub use op_mode::*;
pub use pa::*;
