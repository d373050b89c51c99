use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Opens the span that carries the scan spinner. The bar lives as long as
/// the span is entered.
pub fn scan_span(limit: Duration) -> Span {
    let span = info_span!("scan", indicatif.pb_show = true);

    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
        span.pb_set_style(&style.tick_strings(TICK_STRINGS));
    }
    span.pb_set_message(&format!(
        "Listening for advertisements (up to {}s), Ctrl-C to finish early",
        limit.as_secs().to_string().yellow()
    ));
    span
}

pub fn report_scan_progress(span: &Span, devices: usize) {
    span.pb_set_message(&format!(
        "Tracking {} identifiers so far...",
        devices.to_string().green().bold()
    ));
}
