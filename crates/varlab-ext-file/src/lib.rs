//! # varlab Ext File
//!
//! File-based persistence for recorded Monte Carlo draws.
//!
//! A recording provider's [`DrawLog`](varlab_risk::DrawLog) is written as CSV
//! (`sequence,key,value`) and read back ready for
//! [`DrawProvider::replaying`](varlab_risk::DrawProvider::replaying), so a run
//! can be reproduced exactly on another machine.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod draw_log;
mod error;

pub use draw_log::{read_draw_log, write_draw_log, DrawLogFile, HEADER};
pub use error::{FileError, FileResult};
