use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::Span;

use crate::{mprint, terminal::{colors, format, print, spinner}};
use sniffr_common::{config::Config, success, warn};
use sniffr_common::device::{DeviceId, record::DeviceRecord};
use sniffr_core::session::{FamilyReport, ScanSession, SessionReport, StopReason};
use sniffr_core::source::ReplaySource;
use sniffr_core::tracker::Notification;
use sniffr_core::vendors::{self, VendorTable};

pub async fn scan(capture: &PathBuf, cfg: &Config) -> anyhow::Result<()> {
    let mut table = VendorTable::builtin();
    if let Some(path) = &cfg.vendor_db {
        let merged = table.merge_file(path)?;
        success!("Loaded {merged} vendor names from {}", path.display());
    }

    let mut source = ReplaySource::open(capture)
        .await
        .with_context(|| format!("cannot replay {}", capture.display()))?;

    let span = spinner::scan_span(cfg.duration);
    let guard = span.enter();

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_notifications(rx, span.clone(), cfg.quiet));

    let mut session = ScanSession::new(Arc::new(table))
        .with_notifications(tx)
        .with_correlation(!cfg.no_correlation);

    let reason = session
        .run(&mut source, cfg.duration, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    let report = session.finalize()?;
    // Closes the notification channel so the printer can drain and exit.
    drop(session);
    let _ = printer.await;
    drop(guard);

    if reason == StopReason::Interrupted {
        warn!("Scan interrupted, reporting what was seen so far");
    }

    if let Some(report) = report {
        scan_ends(&report, cfg)?;
    }
    Ok(())
}

async fn print_notifications(mut rx: UnboundedReceiver<Notification>, span: Span, quiet: u8) {
    let mut seen: HashSet<DeviceId> = HashSet::new();
    while let Some(notification) = rx.recv().await {
        match notification {
            Notification::NewDevice(record) => {
                if let Some(count) = count_identifier(&mut seen, &record) {
                    spinner::report_scan_progress(&span, count);
                }
                if quiet == 0 {
                    print::print_status(new_device_line(&record));
                }
            }
            Notification::BandChange { identity, name, previous, current } => {
                if quiet == 0 {
                    let who = name.unwrap_or(identity);
                    print::print_status(format!(
                        "{} moved {} -> {}",
                        who.color(colors::PRIMARY),
                        format::band_to_colored(previous),
                        format::band_to_colored(current)
                    ));
                }
            }
        }
    }
}

/// New total when `record` is an identifier not counted yet. Named upgrades
/// re-announce an identifier that is already in `seen`.
fn count_identifier(seen: &mut HashSet<DeviceId>, record: &DeviceRecord) -> Option<usize> {
    seen.insert(record.id.clone()).then(|| seen.len())
}

fn new_device_line(record: &DeviceRecord) -> String {
    let vendor = record
        .manufacturer
        .as_ref()
        .map(|info| info.vendor_name.as_str())
        .unwrap_or("no vendor data");
    format!(
        "{} {} ({}) {} {}",
        "New".green().bold(),
        record.display_name().color(colors::PRIMARY),
        record.display_identity().color(colors::ADDRESS),
        vendor.color(colors::VENDOR),
        format::rssi_to_colored(record.rssi)
    )
}

fn scan_ends(report: &SessionReport, cfg: &Config) -> anyhow::Result<()> {
    if report.total_records == 0 {
        print::header("NO DEVICES DETECTED", cfg.quiet);
        print::no_results();
        return Ok(());
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    if cfg.quiet < 2 {
        for family in &report.families {
            print_family(family, cfg);
        }
        for (vendor, records) in &report.by_vendor {
            print::header(vendor, cfg.quiet);
            print_records(records);
        }
        if !report.unidentified.is_empty() {
            print::header("no manufacturer data", cfg.quiet);
            print_records(&report.unidentified);
        }
    }

    if !report.unknown_vendors.is_empty() {
        let ids: Vec<String> = report.unknown_vendors.iter().map(ToString::to_string).collect();
        warn!("{} unknown vendor ids: {}", ids.len(), ids.join(", "));
        if let Some(path) = &cfg.unknown_out {
            vendors::export_unknown(&report.unknown_vendors, path)?;
            success!("Unknown vendor ids written to {}", path.display());
        }
    }

    print_summary(report, cfg);
    Ok(())
}

fn print_family(family: &FamilyReport, cfg: &Config) {
    print::header(&format!("{} devices", family.vendor_name), cfg.quiet);
    for (idx, group) in family.groups.iter().enumerate() {
        print::tree_head(idx, &format::group_title(group));
        print::as_tree_one_level(format::group_to_details(group));
        if idx + 1 != family.groups.len() {
            mprint!();
        }
    }
}

fn print_records(records: &[DeviceRecord]) {
    for (idx, record) in records.iter().enumerate() {
        print::tree_head(idx, record.display_name());
        print::as_tree_one_level(format::record_to_details(record));
        if idx + 1 != records.len() {
            mprint!();
        }
    }
}

fn print_summary(report: &SessionReport, cfg: &Config) {
    let devices: ColoredString = format!("{} devices", report.estimated_devices()).bold().green();
    let records: ColoredString = format!("{} identifiers", report.total_records).bold().cyan();
    let total_time: ColoredString = elapsed_secs(report.elapsed).bold().yellow();
    let output: &ColoredString = &format!(
        "Scan Complete: {devices} from {records} in {total_time} ({} advertisements)",
        report.total_events
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}

fn elapsed_secs(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;
    use sniffr_common::device::event::AdvertisementEvent;
    use sniffr_core::tracker::DeviceTracker;

    use super::*;

    #[test]
    fn named_upgrade_does_not_count_twice() {
        let mut tracker = DeviceTracker::new(Arc::new(VendorTable::builtin()));
        let mut seen = HashSet::new();
        let mut counts = Vec::new();

        let events = [
            AdvertisementEvent::new("a", -60),
            AdvertisementEvent::new("a", -60).with_name("Kim's Phone"),
            AdvertisementEvent::new("b", -60),
        ];
        for event in &events {
            for notification in tracker.observe(event, Local::now()) {
                if let Notification::NewDevice(record) = notification {
                    counts.push(count_identifier(&mut seen, &record));
                }
            }
        }

        assert_eq!(counts, vec![Some(1), None, Some(2)]);
    }
}
