/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Raw answers → per-axis totals.
//!
//! - [`score`]: totals under the default [`ScoringPolicy`].
//! - [`score_with`]: totals plus the questions that were defaulted or clamped.
//!
//! # Invariants
//!
//! - Answers are looked up by question id, never by position, so the order in
//!   which questions are visited cannot change a total.
//! - Every declared axis gets a total, starting from zero.
//! - A reversed question contributes `scale.max + scale.min - v` (`k - v` on `0..=k`).
//! - With `m` questions on an axis, the total stays in `[scale.min * m, scale.max * m]`.
//! - No result is produced from an out-of-range answer that was silently accepted:
//!   it is either rejected or clamped and reported in [`ScoreSheet::clamped`].

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::definition::TestDefinition;
use crate::error::EngineError;

/// Raw answers keyed by question id.
pub type Answers = HashMap<String, i32>;

// ─── Policy ─────────────────────────────────────────────────────────────────

/// What to do with an answer outside the scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutOfRangePolicy {
    /// Fail the whole submission with [`EngineError::InvalidAnswer`].
    #[default]
    Reject,
    /// Replace the value with the nearest legal one and record the question.
    Clamp,
}

/// What to do with a question that has no answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissingAnswerPolicy {
    /// Score it as the scale minimum, the most favourable reading.
    #[default]
    ScaleMinimum,
    /// Fail the submission with [`EngineError::MissingAnswer`].
    Reject,
}

/// Input-validation policy applied uniformly to every submission.
///
/// The default rejects out-of-range answers, scores missing answers as the
/// scale minimum and ignores (with a warning) answers for unknown questions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringPolicy {
    /// Handling of values outside the scale.
    pub out_of_range: OutOfRangePolicy,
    /// Handling of unanswered questions.
    pub missing: MissingAnswerPolicy,
    /// Fail with [`EngineError::UnknownQuestion`] instead of ignoring stray answers.
    pub reject_unknown_questions: bool,
}

impl ScoringPolicy {
    /// Reject out-of-range, missing and unknown answers alike.
    pub fn strict() -> Self {
        Self {
            out_of_range: OutOfRangePolicy::Reject,
            missing: MissingAnswerPolicy::Reject,
            reject_unknown_questions: true,
        }
    }
}

// ─── ScoreSheet ─────────────────────────────────────────────────────────────

/// Axis totals plus a record of every answer the policy had to fill in or adjust.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    /// Axis id → total.
    pub totals: BTreeMap<String, i32>,
    /// Questions without an answer that were scored as the scale minimum.
    pub defaulted: Vec<String>,
    /// Questions whose out-of-range answer was clamped.
    pub clamped: Vec<String>,
}

// ─── Scoring ────────────────────────────────────────────────────────────────

/// Per-axis totals under the default [`ScoringPolicy`].
pub fn score(
    answers: &Answers,
    definition: &TestDefinition,
) -> Result<BTreeMap<String, i32>, EngineError> {
    score_with(answers, definition, &ScoringPolicy::default()).map(|sheet| sheet.totals)
}

/// Per-axis totals under an explicit policy.
pub fn score_with(
    answers: &Answers,
    definition: &TestDefinition,
    policy: &ScoringPolicy,
) -> Result<ScoreSheet, EngineError> {
    check_unknown(answers, definition, policy)?;

    let scale = &definition.scale;
    let mut totals: HashMap<&str, i32> =
        definition.axes.iter().map(|a| (a.id.as_str(), 0)).collect();
    let mut sheet = ScoreSheet::default();

    for q in &definition.questions {
        let raw = match answers.get(q.id.as_str()) {
            Some(&v) => v,
            None => match policy.missing {
                MissingAnswerPolicy::ScaleMinimum => {
                    sheet.defaulted.push(q.id.clone());
                    scale.min
                }
                MissingAnswerPolicy::Reject => {
                    return Err(EngineError::MissingAnswer {
                        question_id: q.id.clone(),
                    })
                }
            },
        };

        let value = if scale.contains(raw) {
            raw
        } else {
            match policy.out_of_range {
                OutOfRangePolicy::Reject => {
                    return Err(EngineError::InvalidAnswer {
                        question_id: q.id.clone(),
                        value: raw,
                        min: scale.min,
                        max: scale.max,
                    })
                }
                OutOfRangePolicy::Clamp => {
                    tracing::warn!(
                        test_id = %definition.id,
                        question_id = %q.id,
                        value = raw,
                        "clamping out-of-range answer"
                    );
                    sheet.clamped.push(q.id.clone());
                    scale.clamp(raw)
                }
            }
        };

        let contribution = if q.reversed { scale.reverse(value) } else { value };
        *totals.entry(q.axis.as_str()).or_insert(0) += contribution;
    }

    sheet.totals = totals
        .into_iter()
        .map(|(axis, total)| (String::from(axis), total))
        .collect();
    Ok(sheet)
}

fn check_unknown(
    answers: &Answers,
    definition: &TestDefinition,
    policy: &ScoringPolicy,
) -> Result<(), EngineError> {
    let known: HashSet<&str> = definition.questions.iter().map(|q| q.id.as_str()).collect();
    let mut unknown: Vec<&str> = answers
        .keys()
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();
    unknown.sort_unstable();

    if policy.reject_unknown_questions {
        if let Some(id) = unknown.first() {
            return Err(EngineError::UnknownQuestion {
                question_id: String::from(*id),
            });
        }
    }
    for id in unknown {
        tracing::warn!(
            test_id = %definition.id,
            question_id = %id,
            "ignoring answer for unknown question"
        );
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use alloc::string::ToString;

    fn answers(pairs: &[(&str, i32)]) -> Answers {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn all(value: i32) -> Answers {
        builtin::clarity_v1()
            .questions
            .iter()
            .map(|q| (q.id.clone(), value))
            .collect()
    }

    // ── Reference scenario ───────────────────────────────────────────────

    #[test]
    fn test_reversed_question_answered_max_scores_zero() {
        let def = builtin::clarity_v1();
        let reversed = def.questions.iter().find(|q| q.reversed).expect("one reversed question");
        assert_eq!(reversed.axis, "limites");

        let mut a = all(0);
        a.insert(reversed.id.clone(), 4);
        let totals = score(&a, &def).unwrap();
        assert_eq!(totals["limites"], 0);
        assert_eq!(totals["nevoa"], 0);
        assert_eq!(totals["medo"], 0);
    }

    #[test]
    fn test_all_zero_answers_charge_reversed_question_fully() {
        // A reversed item answered 0 is the riskiest reading: 4 - 0 = 4.
        let def = builtin::clarity_v1();
        let totals = score(&all(0), &def).unwrap();
        assert_eq!(totals["limites"], 4);
        assert_eq!(totals["nevoa"], 0);
    }

    #[test]
    fn test_all_max_answers() {
        let def = builtin::clarity_v1();
        let totals = score(&all(4), &def).unwrap();
        assert_eq!(totals["nevoa"], 16);
        assert_eq!(totals["medo"], 16);
        assert_eq!(totals["limites"], 12);
    }

    #[test]
    fn test_every_declared_axis_has_a_total() {
        let def = builtin::clarity_v1();
        let totals = score(&Answers::new(), &def).unwrap();
        assert_eq!(totals.len(), def.axes.len());
        for axis in &def.axes {
            assert!(totals.contains_key(&axis.id), "missing axis {}", axis.id);
        }
    }

    // ── Missing answers ──────────────────────────────────────────────────

    #[test]
    fn test_missing_answers_default_to_scale_minimum() {
        let def = builtin::clarity_v1();
        let sheet = score_with(&Answers::new(), &def, &ScoringPolicy::default()).unwrap();
        assert_eq!(sheet.defaulted.len(), def.questions.len());
        assert!(sheet.clamped.is_empty());
        // Missing reversed item defaults to 0, which reverses to 4.
        assert_eq!(sheet.totals["limites"], 4);
        assert_eq!(sheet.totals["medo"], 0);
    }

    #[test]
    fn test_missing_answer_rejected_under_strict_policy() {
        let def = builtin::clarity_v1();
        let mut a = all(1);
        a.remove("m2");
        let policy = ScoringPolicy {
            missing: MissingAnswerPolicy::Reject,
            ..ScoringPolicy::default()
        };
        assert_eq!(
            score_with(&a, &def, &policy),
            Err(EngineError::MissingAnswer { question_id: "m2".into() })
        );
    }

    // ── Out-of-range answers ─────────────────────────────────────────────

    #[test]
    fn test_out_of_range_rejected_by_default() {
        let def = builtin::clarity_v1();
        let mut a = all(2);
        a.insert("n1".into(), 5);
        assert_eq!(
            score(&a, &def),
            Err(EngineError::InvalidAnswer {
                question_id: "n1".into(),
                value: 5,
                min: 0,
                max: 4,
            })
        );

        a.insert("n1".into(), -1);
        assert!(matches!(score(&a, &def), Err(EngineError::InvalidAnswer { value: -1, .. })));
    }

    #[test]
    fn test_out_of_range_clamped_and_reported() {
        let def = builtin::clarity_v1();
        let mut a = all(0);
        a.insert("n1".into(), 9);
        a.insert("n2".into(), -3);
        let policy = ScoringPolicy {
            out_of_range: OutOfRangePolicy::Clamp,
            ..ScoringPolicy::default()
        };
        let sheet = score_with(&a, &def, &policy).unwrap();
        assert_eq!(sheet.totals["nevoa"], 4);
        let mut clamped = sheet.clamped.clone();
        clamped.sort();
        assert_eq!(clamped, ["n1", "n2"]);
    }

    // ── Unknown questions ────────────────────────────────────────────────

    #[test]
    fn test_unknown_question_ignored_by_default() {
        let def = builtin::clarity_v1();
        let mut a = all(1);
        a.insert("zz".into(), 99);
        let totals = score(&a, &def).unwrap();
        assert_eq!(totals, score(&all(1), &def).unwrap());
    }

    #[test]
    fn test_unknown_question_rejected_when_configured() {
        let def = builtin::clarity_v1();
        let mut a = all(1);
        a.insert("zz".into(), 1);
        a.insert("yy".into(), 1);
        assert_eq!(
            score_with(&a, &def, &ScoringPolicy::strict()),
            Err(EngineError::UnknownQuestion { question_id: "yy".into() })
        );
    }

    // ── Purity ───────────────────────────────────────────────────────────

    #[test]
    fn test_scoring_is_idempotent() {
        let def = builtin::clarity_v1();
        let a = answers(&[("n1", 3), ("m4", 2), ("l4", 1), ("l1", 4)]);
        let first = score_with(&a, &def, &ScoringPolicy::default()).unwrap();
        let second = score_with(&a, &def, &ScoringPolicy::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reversing_question_order_does_not_change_totals() {
        let def = builtin::clarity_v1();
        let mut reordered = def.clone();
        reordered.questions.reverse();
        let a = answers(&[("n1", 3), ("n3", 1), ("m2", 4), ("l2", 2), ("l4", 0)]);
        assert_eq!(score(&a, &def).unwrap(), score(&a, &reordered).unwrap());
    }

    #[test]
    fn test_policy_defaults() {
        let p = ScoringPolicy::default();
        assert_eq!(p.out_of_range, OutOfRangePolicy::Reject);
        assert_eq!(p.missing, MissingAnswerPolicy::ScaleMinimum);
        assert!(!p.reject_unknown_questions);
    }
}
