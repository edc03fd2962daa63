//! Verbose display schema derived from a compact [`TestDefinition`].
//!
//! Presentation layers written against the older, verbose questionnaire shape
//! (scale options with labels, per-axis score ranges, zone narratives) get it
//! from [`expand`]. The mapping is one-way and pure: the scorer and classifier
//! only ever see the compact definition.
//!
//! With the `serde` feature every type here serialises, so the schema can be
//! shipped to a front end as JSON:
//!
//! ```rust,ignore
//! let schema = clarity_core::legacy::expand(&clarity_core::builtin::clarity_v1());
//! let json = serde_json::to_string(&schema).unwrap();
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::definition::TestDefinition;
use crate::zone::{ZoneBand, ZoneTable};

/// Display form of a whole test.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerboseTestSchema {
    /// Test id.
    pub id: String,
    /// Test version.
    pub version: u32,
    /// Human name.
    pub title: String,
    /// Human description.
    pub description: String,
    /// Answer options, lowest value first.
    pub scale: Vec<ScaleOption>,
    /// Questions in canonical order.
    pub questions: Vec<VerboseQuestion>,
    /// Axes in declaration order.
    pub axes: Vec<VerboseAxis>,
    /// Global score range and zones.
    pub global: VerboseScoreRange,
}

/// One answer option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleOption {
    /// Value submitted for this option.
    pub value: i32,
    /// Label shown; the value itself when the scale is unlabelled.
    pub label: String,
}

/// One question with its axis label resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerboseQuestion {
    /// Question id.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Axis id.
    pub axis: String,
    /// Axis label.
    pub axis_label: String,
    /// Whether the question is reverse-scored.
    pub reversed: bool,
}

/// One axis with its score range and zones.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerboseAxis {
    /// Axis id.
    pub id: String,
    /// Axis label.
    pub label: String,
    /// Axis description, empty when none was authored.
    pub description: String,
    /// Number of questions on the axis.
    pub question_count: usize,
    /// Range and zones of the axis total.
    pub range: VerboseScoreRange,
}

/// A score range and the zones that partition it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerboseScoreRange {
    /// Lowest reachable total.
    pub min_score: i32,
    /// Highest reachable total.
    pub max_score: i32,
    /// Zones, lowest band first.
    pub zones: Vec<VerboseZone>,
}

/// One zone with its narrative.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerboseZone {
    /// Zone id.
    pub id: String,
    /// Display label; the zone id when none was authored.
    pub label: String,
    /// Lowest total in the zone.
    pub min: i32,
    /// Highest total in the zone.
    pub max: i32,
    /// Narrative text, empty when none was authored.
    pub description: String,
}

impl From<&ZoneBand> for VerboseZone {
    fn from(band: &ZoneBand) -> Self {
        Self {
            id: band.zone.clone(),
            label: band.label.clone().unwrap_or_else(|| band.zone.clone()),
            min: band.min,
            max: band.max,
            description: band.description.clone().unwrap_or_default(),
        }
    }
}

fn score_range((min_score, max_score): (i32, i32), table: Option<&ZoneTable>) -> VerboseScoreRange {
    let mut zones: Vec<VerboseZone> = table
        .map(|t| t.bands().iter().map(VerboseZone::from).collect())
        .unwrap_or_default();
    zones.sort_by_key(|z| z.min);
    VerboseScoreRange {
        min_score,
        max_score,
        zones,
    }
}

/// Expand a compact definition into its verbose display schema.
pub fn expand(definition: &TestDefinition) -> VerboseTestSchema {
    let scale = definition
        .scale
        .values()
        .map(|value| ScaleOption {
            value,
            label: definition
                .scale
                .label(value)
                .map(String::from)
                .unwrap_or_else(|| value.to_string()),
        })
        .collect();

    let questions = definition
        .questions
        .iter()
        .map(|q| VerboseQuestion {
            id: q.id.clone(),
            text: q.text.clone(),
            axis: q.axis.clone(),
            axis_label: definition
                .axis(&q.axis)
                .map(|a| a.label.clone())
                .unwrap_or_else(|| q.axis.clone()),
            reversed: q.reversed,
        })
        .collect();

    let axes = definition
        .axes
        .iter()
        .map(|axis| VerboseAxis {
            id: axis.id.clone(),
            label: axis.label.clone(),
            description: axis.description.clone().unwrap_or_default(),
            question_count: definition.questions_on_axis(&axis.id).count(),
            range: score_range(
                definition.axis_score_range(&axis.id),
                definition.zones.axes.get(&axis.id),
            ),
        })
        .collect();

    VerboseTestSchema {
        id: definition.id.clone(),
        version: definition.version,
        title: definition.name.clone(),
        description: definition.description.clone(),
        scale,
        questions,
        axes,
        global: score_range(definition.global_score_range(), Some(&definition.zones.global)),
    }
}

impl VerboseTestSchema {
    /// Axis entry by id.
    pub fn axis(&self, axis_id: &str) -> Option<&VerboseAxis> {
        self.axes.iter().find(|a| a.id == axis_id)
    }
}
