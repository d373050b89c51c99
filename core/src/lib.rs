//! The scanning core of `sniffr`.
//!
//! Decodes advertisement payloads, tracks one record per identifier for the
//! length of a [`session`], and at the end estimates which identifiers belong
//! to the same physical device ([`correlation`]).

pub mod correlation;
pub mod decoder;
pub mod distance;
pub mod error;
pub mod labels;
pub mod services;
pub mod session;
pub mod source;
pub mod tags;
pub mod tracker;
pub mod vendors;

pub use error::CoreError;
