//! Error taxonomy shared by every docsel crate

pub mod error;

pub use error::*;
