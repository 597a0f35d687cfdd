//! Domain layer.
//!
//! Pure data: transcript messages, verification verdicts, and the
//! configuration tree. No I/O, no clocks beyond message timestamps.

pub mod models;
