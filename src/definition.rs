//! Versioned, immutable test definitions and their validation.
//!
//! A [`TestDefinition`] is the whole input the scorer and classifier need:
//! axes, questions, the shared scale and the zone tables. Each `(id, version)`
//! pair is a distinct definition; nothing migrates answers between versions.
//!
//! [`TestDefinition::validate`] is run by the catalog before a definition is
//! registered, so scoring never discovers a malformed table mid-request.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::EngineError;
use crate::question::{Axis, Question, Scale};
use crate::zone::ZoneConfig;

/// A complete, versioned questionnaire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestDefinition {
    /// Stable test id, e.g. `"clarity"`.
    pub id: String,
    /// Version number; `(id, version)` identifies a definition.
    pub version: u32,
    /// Human name.
    pub name: String,
    /// Human description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Declared axes, in display order.
    pub axes: Vec<Axis>,
    /// Questions in canonical order.
    pub questions: Vec<Question>,
    /// Scale shared by every question.
    pub scale: Scale,
    /// Whether presentation order is shuffled per session.
    #[cfg_attr(feature = "serde", serde(default))]
    pub randomize_presentation: bool,
    /// Zone tables per axis and for the global total.
    pub zones: ZoneConfig,
}

impl TestDefinition {
    /// Look up a declared axis.
    pub fn axis(&self, axis_id: &str) -> Option<&Axis> {
        self.axes.iter().find(|a| a.id == axis_id)
    }

    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Questions scored on `axis_id`, in canonical order.
    pub fn questions_on_axis<'a>(&'a self, axis_id: &'a str) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |q| q.axis == axis_id)
    }

    /// Inclusive `(min, max)` total reachable on `axis_id`.
    ///
    /// With `m` questions on a `0..=k` scale this is `(0, k * m)`.
    pub fn axis_score_range(&self, axis_id: &str) -> (i32, i32) {
        let m = self.questions_on_axis(axis_id).count() as i32;
        (self.scale.min * m, self.scale.max * m)
    }

    /// Inclusive `(min, max)` global total: the scale range times every question.
    pub fn global_score_range(&self) -> (i32, i32) {
        let m = self.questions.len() as i32;
        (self.scale.min * m, self.scale.max * m)
    }

    /// Check every structural invariant the scorer and classifier rely on.
    ///
    /// - the scale is non-degenerate and fully labelled or unlabelled;
    /// - question and axis ids are unique and every question names a declared axis;
    /// - every declared axis has a zone table and every table names a declared axis;
    /// - each table covers its score range exactly, as does the global table.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fail = |reason: String| Err(EngineError::configuration(&self.id, reason));

        if self.scale.min >= self.scale.max {
            return fail(format!(
                "scale [{}, {}] must have min below max",
                self.scale.min, self.scale.max
            ));
        }
        if !self.scale.labels.is_empty() && self.scale.labels.len() != self.scale.len() {
            return fail(format!(
                "scale has {} labels for {} values",
                self.scale.labels.len(),
                self.scale.len()
            ));
        }
        if self.questions.is_empty() {
            return fail("definition has no questions".into());
        }

        let mut axis_ids = BTreeSet::new();
        for axis in &self.axes {
            if !axis_ids.insert(axis.id.as_str()) {
                return fail(format!("axis '{}' declared twice", axis.id));
            }
        }

        let mut question_ids = BTreeSet::new();
        for q in &self.questions {
            if !question_ids.insert(q.id.as_str()) {
                return fail(format!("question id '{}' used twice", q.id));
            }
            if !axis_ids.contains(q.axis.as_str()) {
                return fail(format!(
                    "question '{}' references undeclared axis '{}'",
                    q.id, q.axis
                ));
            }
        }

        for axis_id in self.zones.axes.keys() {
            if !axis_ids.contains(axis_id.as_str()) {
                return fail(format!("zone bands reference undeclared axis '{axis_id}'"));
            }
        }
        for axis in &self.axes {
            let table = match self.zones.axes.get(&axis.id) {
                Some(table) => table,
                None => return fail(format!("axis '{}' has no zone bands", axis.id)),
            };
            let (lo, hi) = self.axis_score_range(&axis.id);
            if let Err(reason) = table.validate(lo, hi) {
                return fail(format!("axis '{}': {}", axis.id, reason));
            }
        }

        let (lo, hi) = self.global_score_range();
        if let Err(reason) = self.zones.global.validate(lo, hi) {
            return fail(format!("global: {reason}"));
        }
        Ok(())
    }
}
