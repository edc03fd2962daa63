//! The end-to-end entry points a host layer calls.
//!
//! ```text
//! test id ──▶ TestCatalog ──▶ presentation order ──▶ (user answers)
//!                  │
//!                  └──▶ score ──▶ classify axes + global ──▶ ScoringResult
//! ```
//!
//! [`Engine`] owns an immutable [`TestCatalog`] and a [`ScoringPolicy`]. It has
//! no interior mutability, so one engine can serve any number of threads
//! through `&Engine` or `Arc<Engine>`.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;

use crate::catalog::TestCatalog;
use crate::definition::TestDefinition;
use crate::error::EngineError;
use crate::legacy::{self, VerboseTestSchema};
use crate::randomizer;
use crate::scorer::{self, Answers, ScoringPolicy};
use crate::zone;

/// A question as handed to a rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionView {
    /// Question id; answers must be keyed by it.
    pub id: String,
    /// Text to display.
    pub text: String,
    /// Axis the question is scored on.
    pub axis: String,
}

/// Outcome of one submission.
///
/// A plain value: the engine keeps no copy and persisting it is the caller's
/// concern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringResult {
    /// Test id that was scored.
    pub test_id: String,
    /// Version that was scored.
    pub version: u32,
    /// Axis id → total.
    pub axis_totals: BTreeMap<String, i32>,
    /// Axis id → zone id.
    pub axis_zones: BTreeMap<String, String>,
    /// Sum of all axis totals.
    pub global_total: i32,
    /// Zone id of the global total.
    pub global_zone: String,
    /// Unanswered questions scored as the scale minimum.
    pub defaulted: Vec<String>,
    /// Questions whose answer was clamped into the scale.
    pub clamped: Vec<String>,
}

impl ScoringResult {
    /// Total for one axis.
    pub fn axis_total(&self, axis_id: &str) -> Option<i32> {
        self.axis_totals.get(axis_id).copied()
    }

    /// Zone id for one axis.
    pub fn axis_zone(&self, axis_id: &str) -> Option<&str> {
        self.axis_zones.get(axis_id).map(String::as_str)
    }

    /// True when every question had an in-range answer.
    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty() && self.clamped.is_empty()
    }
}

/// Score `answers` against `definition` and classify every total.
pub fn evaluate(
    definition: &TestDefinition,
    answers: &Answers,
    policy: &ScoringPolicy,
) -> Result<ScoringResult, EngineError> {
    let sheet = scorer::score_with(answers, definition, policy)?;

    let mut axis_zones = BTreeMap::new();
    for (axis, &total) in &sheet.totals {
        let zone = zone::classify_axis(axis, total, definition)?;
        axis_zones.insert(axis.clone(), String::from(zone));
    }
    let global_total = zone::global_total(&sheet.totals);
    let global_zone = String::from(zone::classify_global(global_total, definition)?);

    tracing::debug!(
        test_id = %definition.id,
        version = definition.version,
        global_total,
        global_zone = %global_zone,
        defaulted = sheet.defaulted.len(),
        "submission scored"
    );

    Ok(ScoringResult {
        test_id: definition.id.clone(),
        version: definition.version,
        axis_totals: sheet.totals,
        axis_zones,
        global_total,
        global_zone,
        defaulted: sheet.defaulted,
        clamped: sheet.clamped,
    })
}

/// Questionnaire facade over an immutable catalog.
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: TestCatalog,
    policy: ScoringPolicy,
}

impl Engine {
    /// Engine with the default [`ScoringPolicy`].
    pub fn new(catalog: TestCatalog) -> Self {
        Self::with_policy(catalog, ScoringPolicy::default())
    }

    /// Engine with an explicit policy, applied to every submission.
    pub fn with_policy(catalog: TestCatalog, policy: ScoringPolicy) -> Self {
        Self { catalog, policy }
    }

    /// The catalog this engine serves.
    pub fn catalog(&self) -> &TestCatalog {
        &self.catalog
    }

    /// The policy applied to submissions.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Questions of the latest version of `test_id`, in presentation order.
    #[cfg(feature = "std")]
    pub fn list_questions(&self, test_id: &str) -> Result<Vec<QuestionView>, EngineError> {
        self.list_questions_with(test_id, &mut rand::thread_rng())
    }

    /// As [`Engine::list_questions`], drawing the shuffle from `rng`.
    pub fn list_questions_with<R: Rng + ?Sized>(
        &self,
        test_id: &str,
        rng: &mut R,
    ) -> Result<Vec<QuestionView>, EngineError> {
        let definition = self.catalog.get_definition(test_id)?;
        Ok(randomizer::presentation_order_with(definition, rng)
            .into_iter()
            .map(|q| QuestionView {
                id: q.id.clone(),
                text: q.text.clone(),
                axis: q.axis.clone(),
            })
            .collect())
    }

    /// Score a submission against the latest version of `test_id`.
    pub fn submit(&self, test_id: &str, answers: &Answers) -> Result<ScoringResult, EngineError> {
        let definition = self.catalog.get_definition(test_id)?;
        evaluate(definition, answers, &self.policy)
    }

    /// Score a submission against exactly `(test_id, version)`.
    pub fn submit_version(
        &self,
        test_id: &str,
        version: u32,
        answers: &Answers,
    ) -> Result<ScoringResult, EngineError> {
        let definition = self.catalog.get_version(test_id, version)?;
        evaluate(definition, answers, &self.policy)
    }

    /// Verbose display schema of the latest version of `test_id`.
    pub fn schema(&self, test_id: &str) -> Result<VerboseTestSchema, EngineError> {
        self.catalog.get_definition(test_id).map(legacy::expand)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::clarity_v1;
    use crate::scorer::OutOfRangePolicy;
    use alloc::string::ToString;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> Engine {
        Engine::new(TestCatalog::builtin())
    }

    fn all(value: i32) -> Answers {
        clarity_v1()
            .questions
            .iter()
            .map(|q| (q.id.clone(), value))
            .collect()
    }

    // ── submit ───────────────────────────────────────────────────────────

    #[test]
    fn test_reference_scenario() {
        // All zero except the reversed limites item answered 4.
        let mut answers = all(0);
        answers.insert("l4".to_string(), 4);
        let result = engine().submit("clarity", &answers).unwrap();

        assert_eq!(result.axis_total("limites"), Some(0));
        assert_eq!(result.axis_zone("limites"), Some("baixo"));
        assert_eq!(result.global_total, 0);
        assert_eq!(result.global_zone, "atencao");
        assert!(result.is_complete());
        assert_eq!(result.test_id, "clarity");
        assert_eq!(result.version, 1);
    }

    #[test]
    fn test_boundary_totals_split_adjacent_zones() {
        // nevoa answers summing to 5, then to 6.
        let mut answers = all(0);
        answers.insert("l4".to_string(), 4);
        answers.insert("n1".to_string(), 4);
        answers.insert("n2".to_string(), 1);
        let at_five = engine().submit("clarity", &answers).unwrap();
        assert_eq!(at_five.axis_total("nevoa"), Some(5));
        assert_eq!(at_five.axis_zone("nevoa"), Some("baixo"));

        answers.insert("n2".to_string(), 2);
        let at_six = engine().submit("clarity", &answers).unwrap();
        assert_eq!(at_six.axis_total("nevoa"), Some(6));
        assert_eq!(at_six.axis_zone("nevoa"), Some("moderado"));
    }

    #[test]
    fn test_worst_case_submission() {
        let mut answers = all(4);
        answers.insert("l4".to_string(), 0);
        let result = engine().submit("clarity", &answers).unwrap();
        assert_eq!(result.global_total, 48);
        assert_eq!(result.global_zone, "critico");
        for zone in result.axis_zones.values() {
            assert_eq!(zone, "alto");
        }
    }

    #[test]
    fn test_global_total_is_sum_of_axes() {
        let mut answers = all(2);
        answers.insert("m1".to_string(), 4);
        let result = engine().submit("clarity", &answers).unwrap();
        let sum: i32 = result.axis_totals.values().sum();
        assert_eq!(result.global_total, sum);
        assert_eq!(result.global_total, 26);
        assert_eq!(result.global_zone, "alerta");
    }

    #[test]
    fn test_unknown_test_is_not_found() {
        let err = engine().submit("nonexistent-id", &Answers::new()).unwrap_err();
        assert_eq!(err, EngineError::NotFound { test_id: "nonexistent-id".into() });
    }

    #[test]
    fn test_submit_version() {
        let mut v2 = clarity_v1();
        v2.version = 2;
        v2.questions[11].reversed = false;
        let engine = Engine::new(TestCatalog::new([clarity_v1(), v2]).unwrap());

        let answers = all(0);
        let latest = engine.submit("clarity", &answers).unwrap();
        let first = engine.submit_version("clarity", 1, &answers).unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.axis_total("limites"), Some(0));
        assert_eq!(first.axis_total("limites"), Some(4));
        assert!(engine.submit_version("clarity", 9, &answers).unwrap_err().is_not_found());
    }

    #[test]
    fn test_defaulted_questions_are_reported() {
        let mut answers = all(1);
        answers.remove("n3");
        let result = engine().submit("clarity", &answers).unwrap();
        assert_eq!(result.defaulted, ["n3"]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_invalid_answer_produces_no_result() {
        let mut answers = all(1);
        answers.insert("m3".to_string(), 7);
        assert!(matches!(
            engine().submit("clarity", &answers),
            Err(EngineError::InvalidAnswer { value: 7, .. })
        ));
    }

    #[test]
    fn test_engine_policy_applies_to_every_submission() {
        let policy = ScoringPolicy {
            out_of_range: OutOfRangePolicy::Clamp,
            ..ScoringPolicy::default()
        };
        let engine = Engine::with_policy(TestCatalog::builtin(), policy);
        let mut answers = all(0);
        answers.insert("m3".to_string(), 7);
        let result = engine.submit("clarity", &answers).unwrap();
        assert_eq!(result.axis_total("medo"), Some(4));
        assert_eq!(result.clamped, ["m3"]);
        assert_eq!(engine.policy(), &policy);
    }

    // ── list_questions ───────────────────────────────────────────────────

    #[test]
    fn test_list_questions_is_permutation_with_axes() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(11);
        let views = engine.list_questions_with("clarity", &mut rng).unwrap();
        assert_eq!(views.len(), 12);
        let def = clarity_v1();
        for view in &views {
            let q = def.question(&view.id).expect("listed question exists");
            assert_eq!(view.text, q.text);
            assert_eq!(view.axis, q.axis);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_list_questions_unknown_test() {
        let err = engine().list_questions("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_schema_for_known_and_unknown_tests() {
        let schema = engine().schema("clarity").unwrap();
        assert_eq!(schema.id, "clarity");
        assert!(engine().schema("nope").unwrap_err().is_not_found());
    }
}
