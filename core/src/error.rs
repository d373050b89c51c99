use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid vendor database {path}: {source}")]
    VendorDb {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
