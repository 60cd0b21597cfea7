//! Structured logging for reconciliation operations
//!
//! Operations bracket themselves with [`log_op_start!`](crate::log_op_start)
//! and [`log_op_end!`](crate::log_op_end) / [`log_op_error!`](crate::log_op_error);
//! field names follow `tablediff_core_types::schema`. Binaries pick an output
//! style once with [`init`]; tests assert on events through [`test_capture`].

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
