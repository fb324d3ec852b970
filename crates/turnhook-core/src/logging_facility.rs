//! Structured logging for the diff engine, dispatcher and CLI
//!
//! Binaries call [`init`] once; library code logs through the
//! `log_op_*` macros so every operation produces the same
//! `component`/`op`/`event` lines. Tests swap the output for an in-memory
//! buffer with [`init_test_capture`].

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
