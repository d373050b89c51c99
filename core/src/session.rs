//! # Scan Session
//!
//! One scan run, start to finish. The session owns the [`DeviceTracker`]
//! (so there is exactly one mutator), pulls events from an [`EventSource`]
//! until the deadline, an interrupt or the end of the source, and then
//! finalizes into a [`SessionReport`] exactly once.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use sniffr_common::device::event::AdvertisementEvent;
use sniffr_common::device::record::DeviceRecord;
use sniffr_common::vendors::{VendorId, VendorRepository};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace};

use crate::correlation::{self, CorrelationError, CorrelationGroup, FamilyRules, APPLE_RULES};
use crate::source::EventSource;
use crate::tracker::{DeviceTracker, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Elapsed,
    Interrupted,
    SourceExhausted,
}

/// Correlated groups for one vendor family.
#[derive(Debug, Clone)]
pub struct FamilyReport {
    pub vendor: VendorId,
    pub vendor_name: String,
    pub groups: Vec<CorrelationGroup>,
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub families: Vec<FamilyReport>,
    /// Records of vendors without a correlation pass, keyed by vendor name.
    pub by_vendor: BTreeMap<String, Vec<DeviceRecord>>,
    /// Records that never carried decodable manufacturer data.
    pub unidentified: Vec<DeviceRecord>,
    pub unknown_vendors: BTreeSet<VendorId>,
    pub total_records: usize,
    pub total_events: u64,
    pub elapsed: Duration,
}

impl SessionReport {
    /// Physical devices after correlation: one per group plus one per
    /// uncorrelated record.
    pub fn estimated_devices(&self) -> usize {
        let grouped: usize = self.families.iter().map(|f| f.groups.len()).sum();
        let ungrouped: usize = self.by_vendor.values().map(Vec::len).sum();
        grouped + ungrouped + self.unidentified.len()
    }
}

pub struct ScanSession {
    tracker: DeviceTracker,
    families: Vec<FamilyRules>,
    correlate: bool,
    notify: Option<UnboundedSender<Notification>>,
    started: Instant,
    events: u64,
    finalized: bool,
}

impl ScanSession {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self {
            tracker: DeviceTracker::new(vendors),
            families: vec![APPLE_RULES],
            correlate: true,
            notify: None,
            started: Instant::now(),
            events: 0,
            finalized: false,
        }
    }

    /// Forwards tracker notifications to `tx` as they happen.
    pub fn with_notifications(mut self, tx: UnboundedSender<Notification>) -> Self {
        self.notify = Some(tx);
        self
    }

    pub fn with_correlation(mut self, enabled: bool) -> Self {
        self.correlate = enabled;
        self
    }

    pub fn tracker(&self) -> &DeviceTracker {
        &self.tracker
    }

    /// Applies one event. Ignored once the session has been finalized, so
    /// the reported snapshot stays the last word on the session.
    pub fn handle_event(&mut self, event: &AdvertisementEvent) {
        if self.finalized {
            trace!(id = %event.id, "event after finalize ignored");
            return;
        }
        self.events += 1;
        for notification in self.tracker.observe(event, Local::now()) {
            let Some(tx) = &self.notify else {
                break;
            };
            if tx.send(notification).is_err() {
                debug!("notification receiver closed, live updates stopped");
                self.notify = None;
            }
        }
    }

    /// Pulls events until `duration` elapses, `shutdown` resolves or the
    /// source runs dry. Events are handled one at a time, in arrival order.
    pub async fn run<S, F>(&mut self, source: &mut S, duration: Duration, shutdown: F) -> StopReason
    where
        S: EventSource + ?Sized,
        F: Future<Output = ()>,
    {
        let deadline = tokio::time::sleep(duration);
        tokio::pin!(deadline);
        tokio::pin!(shutdown);

        let reason = loop {
            tokio::select! {
                event = source.next_event() => match event {
                    Some(event) => self.handle_event(&event),
                    None => break StopReason::SourceExhausted,
                },
                _ = &mut deadline => break StopReason::Elapsed,
                _ = &mut shutdown => break StopReason::Interrupted,
            }
        };

        info!(
            events = self.events,
            devices = self.tracker.len(),
            "scan stopped: {reason:?}"
        );
        reason
    }

    /// Builds the session report. Only the first call does any work; later
    /// calls return `Ok(None)`.
    pub fn finalize(&mut self) -> Result<Option<SessionReport>, CorrelationError> {
        if std::mem::replace(&mut self.finalized, true) {
            debug!("session already finalized");
            return Ok(None);
        }

        let snapshot = self.tracker.snapshot();
        let active_families: &[FamilyRules] = if self.correlate { &self.families } else { &[] };
        let mut report = build_report(snapshot, active_families)?;
        report.unknown_vendors = self.tracker.unknown_vendors().clone();
        report.total_events = self.events;
        report.elapsed = self.started.elapsed();
        Ok(Some(report))
    }
}

fn build_report(
    records: Vec<DeviceRecord>,
    families: &[FamilyRules],
) -> Result<SessionReport, CorrelationError> {
    let total_records = records.len();
    let mut family_records: Vec<Vec<DeviceRecord>> = vec![Vec::new(); families.len()];
    let mut by_vendor: BTreeMap<String, Vec<DeviceRecord>> = BTreeMap::new();
    let mut unidentified = Vec::new();

    for record in records {
        let Some(info) = &record.manufacturer else {
            unidentified.push(record);
            continue;
        };
        match families.iter().position(|family| family.vendor == info.vendor_id) {
            Some(idx) => family_records[idx].push(record),
            None => by_vendor
                .entry(info.vendor_name.clone())
                .or_default()
                .push(record),
        }
    }

    let mut reports = Vec::new();
    for (rules, records) in families.iter().zip(family_records) {
        if records.is_empty() {
            continue;
        }
        let vendor_name = records
            .iter()
            .find_map(|r| r.manufacturer.as_ref().map(|m| m.vendor_name.clone()))
            .unwrap_or_else(|| rules.vendor.to_string());
        let groups = correlation::correlate(&records, rules)?;
        debug!(vendor = %rules.vendor, records = records.len(), groups = groups.len(), "family correlated");
        reports.push(FamilyReport {
            vendor: rules.vendor,
            vendor_name,
            groups,
        });
    }

    Ok(SessionReport {
        families: reports,
        by_vendor,
        unidentified,
        unknown_vendors: BTreeSet::new(),
        total_records,
        total_events: 0,
        elapsed: Duration::ZERO,
    })
}
