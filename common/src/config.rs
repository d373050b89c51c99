use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(30);

pub struct Config {
    /// Suppresses the start-up banner.
    pub no_banner: bool,
    /// 0 prints everything, 1 hides headers and live notifications,
    /// 2 prints only the summary line.
    pub quiet: u8,
    /// Upper bound for a scan session. The session also ends early on
    /// Ctrl-C or when the event source runs dry.
    pub duration: Duration,
    /// JSON object (`{"004c": "Apple"}`) layered over the built-in vendor table.
    pub vendor_db: Option<PathBuf>,
    /// Where to write vendor ids that could not be resolved.
    pub unknown_out: Option<PathBuf>,
    /// Skips the identity correlation pass and reports raw records only.
    pub no_correlation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            duration: DEFAULT_SCAN_DURATION,
            vendor_db: None,
            unknown_out: None,
            no_correlation: false,
        }
    }
}
