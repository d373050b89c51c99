//! Shared model for `sniffr`: advertisement events, device records, vendor ids
//! and the configuration handed from the CLI to the scanning core.

pub mod config;
pub mod device;
pub mod error;
pub mod log;
pub mod vendors;

#[doc(hidden)]
pub use tracing as __tracing;
