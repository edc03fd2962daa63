/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Zone bands and the zone classifier.
//!
//! - [`ZoneBand`]: closed integer interval `[min, max]` mapped to a zone id.
//! - [`ZoneTable`]: the bands for one axis, or for the global total.
//! - [`ZoneConfig`]: one table per axis plus the global table.
//! - [`classify_axis`] / [`classify_global`]: map a total to its zone id.
//!
//! # Invariants
//!
//! - Bands are closed on both ends; `[0, 5]` and `[6, 10]` are adjacent.
//! - A table accepted into a catalog covers its score range exactly: no gap,
//!   no overlap ([`ZoneTable::validate`]).
//! - Classification finds exactly one band. Zero or several matches are
//!   configuration errors and are never swallowed.
//! - The global total is the plain sum of the axis totals.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::definition::TestDefinition;
use crate::error::EngineError;

// ─── ZoneBand ────────────────────────────────────────────────────────────────

/// One closed score interval and the zone it maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneBand {
    /// Zone id returned by the classifier, e.g. `"baixo"`.
    pub zone: String,
    /// Lowest total in the band (inclusive).
    pub min: i32,
    /// Highest total in the band (inclusive).
    pub max: i32,
    /// Optional display label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// Optional narrative shown with the zone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl ZoneBand {
    /// Band `[min, max]` for `zone`, without display text.
    pub fn new(zone: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            zone: zone.into(),
            min,
            max,
            label: None,
            description: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a narrative description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether `total` falls inside `[min, max]`.
    pub fn contains(&self, total: i32) -> bool {
        self.min <= total && total <= self.max
    }
}

// ─── ZoneTable ───────────────────────────────────────────────────────────────

/// Outcome of looking a total up in a [`ZoneTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandMatch<'a> {
    /// Exactly one band contains the total.
    One(&'a ZoneBand),
    /// No band contains the total (the table has a gap or is too short).
    None,
    /// Several bands contain the total (the table overlaps).
    Many(usize),
}

/// The ordered zone bands for one axis or for the global total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoneTable {
    bands: Vec<ZoneBand>,
}

impl ZoneTable {
    /// Table over the given bands, in authoring order.
    pub fn new(bands: Vec<ZoneBand>) -> Self {
        Self { bands }
    }

    /// The bands in authoring order.
    pub fn bands(&self) -> &[ZoneBand] {
        &self.bands
    }

    /// Linear scan for the bands containing `total`.
    pub fn find(&self, total: i32) -> BandMatch<'_> {
        let mut hits = self.bands.iter().filter(|b| b.contains(total));
        match (hits.next(), hits.count()) {
            (None, _) => BandMatch::None,
            (Some(band), 0) => BandMatch::One(band),
            (Some(_), rest) => BandMatch::Many(rest + 1),
        }
    }

    /// Check that the bands cover `[lo, hi]` exactly once.
    ///
    /// Returns a description of the first defect found.
    pub fn validate(&self, lo: i32, hi: i32) -> Result<(), String> {
        let mut sorted: Vec<&ZoneBand> = self.bands.iter().collect();
        sorted.sort_by_key(|b| (b.min, b.max));

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err("no zone bands configured".into()),
        };

        if let Some(b) = sorted.iter().find(|b| b.min > b.max) {
            return Err(format!("band '{}' has min {} above max {}", b.zone, b.min, b.max));
        }
        if first.min != lo {
            return Err(format!(
                "bands start at {} but scores start at {}",
                first.min, lo
            ));
        }
        for pair in sorted.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.min <= prev.max {
                return Err(format!(
                    "bands '{}' and '{}' overlap on [{}, {}]",
                    prev.zone,
                    next.zone,
                    next.min,
                    prev.max.min(next.max)
                ));
            }
            if next.min > prev.max + 1 {
                return Err(format!(
                    "no band covers [{}, {}] between '{}' and '{}'",
                    prev.max + 1,
                    next.min - 1,
                    prev.zone,
                    next.zone
                ));
            }
        }
        if last.max != hi {
            return Err(format!("bands end at {} but scores end at {}", last.max, hi));
        }
        Ok(())
    }
}

impl FromIterator<ZoneBand> for ZoneTable {
    fn from_iter<I: IntoIterator<Item = ZoneBand>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ─── ZoneConfig ──────────────────────────────────────────────────────────────

/// Zone tables for a whole test: one per axis plus the global table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneConfig {
    /// Axis id → bands for that axis total.
    pub axes: BTreeMap<String, ZoneTable>,
    /// Bands for the global total.
    pub global: ZoneTable,
}

impl ZoneConfig {
    /// Config with only a global table; add axes with [`ZoneConfig::axis`].
    pub fn new(global: ZoneTable) -> Self {
        Self {
            axes: BTreeMap::new(),
            global,
        }
    }

    /// Set the table for `axis_id`.
    pub fn axis(mut self, axis_id: impl Into<String>, table: ZoneTable) -> Self {
        self.axes.insert(axis_id.into(), table);
        self
    }
}

// ─── Classification ──────────────────────────────────────────────────────────

fn resolve<'d>(
    table: &'d ZoneTable,
    total: i32,
    definition: &TestDefinition,
    scope: &str,
) -> Result<&'d ZoneBand, EngineError> {
    match table.find(total) {
        BandMatch::One(band) => Ok(band),
        BandMatch::None => Err(EngineError::configuration(
            &definition.id,
            format!("no {scope} zone band contains total {total}"),
        )),
        BandMatch::Many(n) => Err(EngineError::configuration(
            &definition.id,
            format!("{n} {scope} zone bands contain total {total}"),
        )),
    }
}

/// The band an axis total falls into.
pub fn axis_band<'d>(
    axis_id: &str,
    total: i32,
    definition: &'d TestDefinition,
) -> Result<&'d ZoneBand, EngineError> {
    let table = definition.zones.axes.get(axis_id).ok_or_else(|| {
        EngineError::configuration(
            &definition.id,
            format!("no zone bands configured for axis '{axis_id}'"),
        )
    })?;
    resolve(table, total, definition, &format!("axis '{axis_id}'"))
}

/// The band the global total falls into.
pub fn global_band(total: i32, definition: &TestDefinition) -> Result<&ZoneBand, EngineError> {
    resolve(&definition.zones.global, total, definition, "global")
}

/// Zone id for an axis total.
pub fn classify_axis<'d>(
    axis_id: &str,
    total: i32,
    definition: &'d TestDefinition,
) -> Result<&'d str, EngineError> {
    axis_band(axis_id, total, definition).map(|b| b.zone.as_str())
}

/// Zone id for the global total.
pub fn classify_global(total: i32, definition: &TestDefinition) -> Result<&str, EngineError> {
    global_band(total, definition).map(|b| b.zone.as_str())
}

/// Global total: the unweighted sum of all axis totals.
pub fn global_total(axis_totals: &BTreeMap<String, i32>) -> i32 {
    axis_totals.values().sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
