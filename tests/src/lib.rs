//! End-to-end checks for the scanning core, driven through its public API.

mod correlation;
mod properties;
mod replay;
mod util;
