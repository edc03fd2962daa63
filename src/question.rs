//! Axes, questions and the answer scale: the vocabulary a test is written in.
//!
//! ```rust
//! use clarity_core::question::{Axis, Question, Scale};
//!
//! let fear = Axis::new("medo", "Medo");
//! let q = Question::new("m1", "Sinto medo da reação dele(a).", &fear.id);
//! let reversed = Question::new("l4", "Consigo dizer não sem medo.", "limites").reversed();
//!
//! let scale = Scale::new(0, 4);
//! assert_eq!(scale.reverse(1), 3);
//! assert!(!q.reversed && reversed.reversed);
//! ```
//!
//! # Invariants
//! - Questions and axes are plain values; a published version never changes them.
//! - A scale is a contiguous integer range `[min, max]` with `min < max`
//!   (checked when the owning definition is validated).

use alloc::string::String;
use alloc::vec::Vec;

/// A named dimension of measurement, e.g. fear or boundary violation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Short stable id, referenced by questions and zone tables.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Optional longer description for display layers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl Axis {
    /// Axis with an id and label and no description.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One questionnaire item, scored on exactly one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    /// Unique id within the test definition. Answers are keyed by it.
    pub id: String,
    /// Text shown to the respondent.
    pub text: String,
    /// Id of the axis this question contributes to.
    pub axis: String,
    /// When true the raw answer is inverted against the scale before summation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reversed: bool,
}

impl Question {
    /// A forward-scored question.
    pub fn new(id: impl Into<String>, text: impl Into<String>, axis: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            axis: axis.into(),
            reversed: false,
        }
    }

    /// Mark this question as reverse-scored.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

/// The legal answer values shared by every question of a test.
///
/// Values are the contiguous integers `min..=max`. `labels`, when present,
/// holds one label per value in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    /// Lowest legal answer (the "healthiest" reading).
    pub min: i32,
    /// Highest legal answer.
    pub max: i32,
    /// Optional display label for each value, `labels[0]` belonging to `min`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: Vec<String>,
}

impl Scale {
    /// Unlabelled scale over `min..=max`.
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            labels: Vec::new(),
        }
    }

    /// Attach one label per value, lowest first.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `value` is a legal answer.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Nearest legal value to `value`.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Mirror a legal value across the scale: `max + min - value`.
    ///
    /// For a `0..=k` scale this is `k - value`.
    pub fn reverse(&self, value: i32) -> i32 {
        self.max + self.min - value
    }

    /// Number of legal values.
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }

    /// True only for a malformed scale with `max < min`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All legal values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }

    /// Label for a legal value, if the scale is labelled.
    pub fn label(&self, value: i32) -> Option<&str> {
        if !self.contains(value) {
            return None;
        }
        self.labels
            .get((value - self.min) as usize)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert() -> Scale {
        Scale::new(0, 4).with_labels(["Nunca", "Raramente", "Às vezes", "Frequentemente", "Quase sempre"])
    }

    #[test]
    fn test_reverse_on_zero_based_scale() {
        let s = Scale::new(0, 4);
        assert_eq!(s.reverse(0), 4);
        assert_eq!(s.reverse(4), 0);
        assert_eq!(s.reverse(2), 2);
    }

    #[test]
    fn test_reverse_on_offset_scale_stays_in_range() {
        let s = Scale::new(1, 5);
        for v in s.values() {
            let r = s.reverse(v);
            assert!(s.contains(r), "reverse({}) = {} left the scale", v, r);
        }
        assert_eq!(s.reverse(1), 5);
        assert_eq!(s.reverse(5), 1);
    }

    #[test]
    fn test_contains_and_clamp() {
        let s = Scale::new(0, 4);
        assert!(s.contains(0));
        assert!(s.contains(4));
        assert!(!s.contains(-1));
        assert!(!s.contains(5));
        assert_eq!(s.clamp(-3), 0);
        assert_eq!(s.clamp(9), 4);
        assert_eq!(s.clamp(2), 2);
    }

    #[test]
    fn test_len_and_values() {
        let s = Scale::new(0, 4);
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
        assert_eq!(s.values().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
        assert!(Scale::new(3, 1).is_empty());
    }

    #[test]
    fn test_labels_follow_values() {
        let s = likert();
        assert_eq!(s.label(0), Some("Nunca"));
        assert_eq!(s.label(4), Some("Quase sempre"));
        assert_eq!(s.label(5), None);
        assert_eq!(Scale::new(0, 4).label(2), None);
    }

    #[test]
    fn test_question_builder() {
        let q = Question::new("l4", "text", "limites").reversed();
        assert!(q.reversed);
        assert_eq!(q.axis, "limites");
        let axis = Axis::new("medo", "Medo").with_description("fear");
        assert_eq!(axis.description.as_deref(), Some("fear"));
    }
}
