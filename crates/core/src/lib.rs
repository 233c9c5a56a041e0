//! JsonSettings Core Types
//!
//! The error type, the structured document settings are stored in, and the
//! whole-file I/O used to persist it.

mod document;
mod error;
pub mod io;

pub use document::*;
pub use error::*;
