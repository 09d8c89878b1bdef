//! Response decoder module
//!
//! Detects which page envelope the service answered with and extracts the
//! raw records from it.

mod envelope;

pub use envelope::{decode_envelope, Envelope, PageMeta};
pub(crate) use envelope::preview;

#[cfg(test)]
mod tests;
