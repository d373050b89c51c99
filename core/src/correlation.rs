//! # Identity Correlation
//!
//! Estimates how many physical devices hide behind the identifiers tracked for
//! one vendor family. Rotating addresses and split advertising roles mean a
//! single phone or pair of earbuds often shows up as several records.
//!
//! The pass is greedy and order dependent:
//!
//! 1. **Named anchors.** Named records are grouped by exact name (a record
//!    whose roles clash with its namesake starts its own anchor) and, largest
//!    detection count first, absorb unnamed records whose tags the anchor's
//!    role allows, that sit within [`FamilyRules::rssi_tolerance`] and that do
//!    not introduce an incompatible tag pair.
//! 2. **Active clusters.** Every remaining record with a tag outside the
//!    locator-only set seeds a group and absorbs nearby, compatible
//!    locator-only records.
//! 3. **Residual locators.** Whatever is left becomes a singleton.
//!
//! Records are visited in input order (first sighting order when fed from the
//! tracker), so the same input always gives the same groups.

use std::collections::BTreeSet;

use sniffr_common::device::event::Rssi;
use sniffr_common::device::record::DeviceRecord;
use sniffr_common::device::DeviceId;
use sniffr_common::vendors::VendorId;
use thiserror::Error;
use tracing::debug;

use crate::labels::{LabelRules, APPLE_LABELS};
use crate::tags::apple;

/// Tags an anchor may pick up from unnamed records, keyed by a role tag.
#[derive(Debug, Clone, Copy)]
pub struct AbsorbRule {
    pub role: &'static str,
    pub absorbs: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct FamilyRules {
    pub vendor: VendorId,
    pub rssi_tolerance: Rssi,
    /// Checked in order; the first role present on the anchor decides.
    pub absorb_rules: &'static [AbsorbRule],
    /// Tag pairs that never share one physical device.
    pub incompatible: &'static [(&'static str, &'static str)],
    pub locator_tags: &'static [&'static str],
    pub labels: LabelRules,
}

pub const APPLE_RULES: FamilyRules = FamilyRules {
    vendor: VendorId::APPLE,
    rssi_tolerance: 10,
    absorb_rules: &[
        AbsorbRule {
            role: apple::AIRPLAY_SOURCE,
            absorbs: &[apple::HANDOFF, apple::NEARBY, apple::HEY_SIRI],
        },
        AbsorbRule {
            role: apple::AIRPODS,
            absorbs: &[apple::FIND_MY],
        },
        AbsorbRule {
            role: apple::HANDOFF,
            absorbs: &[apple::NEARBY, apple::FIND_MY],
        },
        AbsorbRule {
            role: apple::AIRPLAY_TARGET,
            absorbs: &[apple::NEARBY, apple::HEY_SIRI],
        },
        AbsorbRule {
            role: apple::FIND_MY,
            absorbs: &[],
        },
    ],
    incompatible: &[
        (apple::AIRPLAY_SOURCE, apple::AIRPLAY_TARGET),
        (apple::AIRPLAY_SOURCE, apple::AIRPODS),
        (apple::AIRPLAY_TARGET, apple::HANDOFF),
        (apple::AIRPODS, apple::HANDOFF),
        (apple::AIRPODS, apple::NEARBY),
    ],
    locator_tags: &[apple::FIND_MY],
    labels: APPLE_LABELS,
};

impl FamilyRules {
    /// Tags an anchor with `tags` may absorb. Empty when no role matches.
    pub fn absorb_set(&self, tags: &BTreeSet<String>) -> &'static [&'static str] {
        self.absorb_rules
            .iter()
            .find(|rule| tags.contains(rule.role))
            .map(|rule| rule.absorbs)
            .unwrap_or(&[])
    }

    /// `true` when the union of both tag sets holds no forbidden pair.
    pub fn compatible(&self, left: &BTreeSet<String>, right: &BTreeSet<String>) -> bool {
        let has = |tag: &str| left.contains(tag) || right.contains(tag);
        !self.incompatible.iter().any(|(a, b)| has(*a) && has(*b))
    }

    pub fn within_tolerance(&self, a: Rssi, b: Rssi) -> bool {
        (i32::from(a) - i32::from(b)).abs() <= i32::from(self.rssi_tolerance)
    }

    /// A record is active when it carries any tag besides the locator tags.
    pub fn is_active(&self, record: &DeviceRecord) -> bool {
        record
            .tags
            .iter()
            .any(|tag| !self.locator_tags.contains(&tag.as_str()))
    }
}

/// Records believed to be one physical device.
#[derive(Debug, Clone)]
pub struct CorrelationGroup {
    pub members: Vec<DeviceRecord>,
    pub tags: BTreeSet<String>,
    pub detections: u64,
    pub max_rssi: Rssi,
    /// Anchor name for groups formed around a named record.
    pub name: Option<String>,
    pub label: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("record {0} was assigned to more than one group")]
    AssignedTwice(DeviceId),
    #[error("record {0} was not assigned to any group")]
    Unassigned(DeviceId),
}

/// Group under construction; members are indices into the input slice.
struct Cluster {
    members: Vec<usize>,
    tags: BTreeSet<String>,
    detections: u64,
    max_rssi: Rssi,
    name: Option<String>,
}

impl Cluster {
    fn seed(idx: usize, record: &DeviceRecord) -> Self {
        Self {
            members: vec![idx],
            tags: record.tags.clone(),
            detections: record.detections,
            max_rssi: record.max_rssi,
            name: record.name.clone(),
        }
    }

    fn absorb(&mut self, idx: usize, record: &DeviceRecord) {
        self.members.push(idx);
        self.tags.extend(record.tags.iter().cloned());
        self.detections += record.detections;
        self.max_rssi = self.max_rssi.max(record.max_rssi);
    }

    fn into_group(self, records: &[DeviceRecord], labels: &LabelRules) -> CorrelationGroup {
        let label = labels.infer(&self.tags, self.name.as_deref());
        CorrelationGroup {
            members: self.members.iter().map(|&idx| records[idx].clone()).collect(),
            tags: self.tags,
            detections: self.detections,
            max_rssi: self.max_rssi,
            name: self.name,
            label,
        }
    }
}

/// Tracks which input records already belong to a group.
struct Assignment<'a> {
    records: &'a [DeviceRecord],
    taken: Vec<bool>,
}

impl<'a> Assignment<'a> {
    fn new(records: &'a [DeviceRecord]) -> Self {
        Self {
            records,
            taken: vec![false; records.len()],
        }
    }

    fn is_free(&self, idx: usize) -> bool {
        !self.taken[idx]
    }

    fn claim(&mut self, idx: usize) -> Result<(), CorrelationError> {
        if std::mem::replace(&mut self.taken[idx], true) {
            return Err(CorrelationError::AssignedTwice(self.records[idx].id.clone()));
        }
        Ok(())
    }

    fn ensure_complete(&self) -> Result<(), CorrelationError> {
        match self.taken.iter().position(|taken| !taken) {
            Some(idx) => Err(CorrelationError::Unassigned(self.records[idx].id.clone())),
            None => Ok(()),
        }
    }
}

/// Partitions `records` (all of one vendor family) into physical-device groups.
///
/// An error means the partition invariant broke, which is a bug in this
/// module rather than bad input.
pub fn correlate(
    records: &[DeviceRecord],
    rules: &FamilyRules,
) -> Result<Vec<CorrelationGroup>, CorrelationError> {
    let mut assignment = Assignment::new(records);
    let mut clusters = named_anchors(records, rules, &mut assignment)?;
    clusters.extend(active_clusters(records, rules, &mut assignment)?);

    for idx in 0..records.len() {
        if assignment.is_free(idx) {
            assignment.claim(idx)?;
            clusters.push(Cluster::seed(idx, &records[idx]));
        }
    }

    assignment.ensure_complete()?;
    debug!(
        records = records.len(),
        groups = clusters.len(),
        vendor = %rules.vendor,
        "correlation finished"
    );

    Ok(clusters
        .into_iter()
        .map(|cluster| cluster.into_group(records, &rules.labels))
        .collect())
}

fn named_anchors(
    records: &[DeviceRecord],
    rules: &FamilyRules,
    assignment: &mut Assignment<'_>,
) -> Result<Vec<Cluster>, CorrelationError> {
    let mut anchors: Vec<Cluster> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        let Some(name) = record.name.as_deref() else {
            continue;
        };
        assignment.claim(idx)?;
        // A same-name record whose roles clash with the anchor is another device.
        match anchors.iter_mut().find(|anchor| {
            anchor.name.as_deref() == Some(name) && rules.compatible(&anchor.tags, &record.tags)
        }) {
            Some(anchor) => anchor.absorb(idx, record),
            None => anchors.push(Cluster::seed(idx, record)),
        }
    }

    // Stable: equal totals keep first-appearance order.
    anchors.sort_by(|a, b| b.detections.cmp(&a.detections));

    for anchor in anchors.iter_mut() {
        let eligible = rules.absorb_set(&anchor.tags);
        if eligible.is_empty() {
            continue;
        }
        for (idx, candidate) in records.iter().enumerate() {
            if !assignment.is_free(idx) || candidate.is_named() {
                continue;
            }
            let allowed = candidate.tags.iter().all(|tag| eligible.contains(&tag.as_str()));
            if allowed
                && rules.within_tolerance(anchor.max_rssi, candidate.max_rssi)
                && rules.compatible(&anchor.tags, &candidate.tags)
            {
                assignment.claim(idx)?;
                anchor.absorb(idx, candidate);
            }
        }
    }

    Ok(anchors)
}

fn active_clusters(
    records: &[DeviceRecord],
    rules: &FamilyRules,
    assignment: &mut Assignment<'_>,
) -> Result<Vec<Cluster>, CorrelationError> {
    let (active, locators): (Vec<usize>, Vec<usize>) = (0..records.len())
        .filter(|&idx| assignment.is_free(idx))
        .partition(|&idx| rules.is_active(&records[idx]));

    let mut clusters = Vec::new();
    for seed in active {
        assignment.claim(seed)?;
        let mut cluster = Cluster::seed(seed, &records[seed]);

        for &idx in &locators {
            let candidate = &records[idx];
            if assignment.is_free(idx)
                && rules.within_tolerance(cluster.max_rssi, candidate.max_rssi)
                && rules.compatible(&cluster.tags, &candidate.tags)
            {
                assignment.claim(idx)?;
                cluster.absorb(idx, candidate);
            }
        }
        clusters.push(cluster);
    }

    Ok(clusters)
}
