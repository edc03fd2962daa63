//! # clarity-core
//!
//! Versioned, multi-axis questionnaire scoring.
//!
//! A respondent answers a fixed set of Likert-scale questions. Each question
//! belongs to one axis (a measured pattern such as fear or boundary violation)
//! and some questions are reverse-scored. This crate turns the answers into a
//! total per axis, a zone per axis, a global total and a global zone, using
//! zone bands authored alongside the questions.
//!
//! ## The pipeline
//!
//! ```text
//! test id → TestCatalog → TestDefinition ─┬─▶ presentation order (shuffled)
//!                                          │
//!                 answers ────────────────┴─▶ score → classify → ScoringResult
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`question`] | [`Axis`], [`Question`], [`Scale`] | Questionnaire vocabulary |
//! | [`definition`] | [`TestDefinition`] | Versioned immutable test, structural validation |
//! | [`zone`] | [`ZoneBand`], [`ZoneTable`], [`ZoneConfig`] | Exhaustive score bands, axis/global classification |
//! | [`scorer`] | [`ScoringPolicy`], [`ScoreSheet`] | Answers → axis totals with reverse scoring |
//! | [`randomizer`] | | Fisher–Yates presentation order with an injected RNG |
//! | [`catalog`] | [`TestCatalog`] | `(id, version)` registry, validated at build time |
//! | [`engine`] | [`Engine`], [`ScoringResult`] | `list_questions` / `submit` entry points |
//! | [`legacy`] | [`VerboseTestSchema`] | Verbose display schema for presentation layers |
//! | [`builtin`] | | The reference `clarity` questionnaire |
//! | [`error`] | [`EngineError`] | Not-found, configuration and answer errors |
//!
//! ## Quick start
//!
//! ```rust
//! use clarity_core::{Answers, Engine, TestCatalog};
//!
//! let engine = Engine::new(TestCatalog::builtin());
//!
//! let mut answers = Answers::new();
//! for q in engine.list_questions("clarity").unwrap() {
//!     answers.insert(q.id, 1);
//! }
//! let result = engine.submit("clarity", &answers).unwrap();
//! assert_eq!(result.global_total, 14); // limites carries the reversed item: 4 - 1
//! assert_eq!(result.global_zone, "atencao");
//! ```
//!
//! ## Policies worth knowing
//!
//! - A missing answer scores as the scale minimum, the most favourable reading.
//!   [`MissingAnswerPolicy::Reject`] turns this into an error instead.
//! - An out-of-range answer rejects the whole submission by default;
//!   [`OutOfRangePolicy::Clamp`] clamps it and reports it in the result.
//! - The global total is the unweighted sum of the axis totals.
//!
//! ## Features
//!
//! - `std` (default): thread-local RNG for [`randomizer::presentation_order`]
//!   and [`Engine::list_questions`]. Without it the crate is `no_std` + `alloc`.
//! - `serde`: serialisation of every definition and result type, and
//!   [`TestCatalog::from_json`].
//! - `python-ffi`: PyO3 bindings.
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]; install a subscriber in the host to
//! see them. The crate never installs one itself.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod error;
pub mod question;
pub mod definition;
pub mod zone;
pub mod scorer;
pub mod randomizer;
pub mod catalog;
pub mod engine;
pub mod legacy;
pub mod builtin;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use catalog::TestCatalog;
pub use definition::TestDefinition;
pub use engine::{Engine, QuestionView, ScoringResult};
pub use error::EngineError;
pub use legacy::VerboseTestSchema;
pub use question::{Axis, Question, Scale};
pub use scorer::{Answers, MissingAnswerPolicy, OutOfRangePolicy, ScoreSheet, ScoringPolicy};
pub use zone::{ZoneBand, ZoneConfig, ZoneTable};
