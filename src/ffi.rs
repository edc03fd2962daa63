//! Python FFI bindings via PyO3.
//!
//! Exposes the engine to a Python host layer (web handlers, notebooks) without
//! a network hop.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from clarity_core import Engine
//!
//! engine = Engine()                        # reference questionnaire
//! for qid, text, axis in engine.list_questions("clarity"):
//!     print(qid, text)
//!
//! result = engine.submit("clarity", {"n1": 3, "m2": 1, "l4": 4})
//! print(result.axis_zones, result.global_zone)
//! ```

use std::collections::{BTreeMap, HashMap};

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::catalog::TestCatalog;
use crate::engine::{Engine, ScoringResult};
use crate::error::EngineError;
use crate::scorer::Answers;

fn to_py_err(err: EngineError) -> PyErr {
    if err.is_not_found() {
        PyKeyError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

// ── ScoringResult ─────────────────────────────────────────────────────────────

/// Outcome of one submission.
#[pyclass(name = "ScoringResult")]
#[derive(Clone)]
pub struct PyScoringResult {
    inner: ScoringResult,
}

#[pymethods]
impl PyScoringResult {
    /// Test id that was scored.
    #[getter]
    pub fn test_id(&self) -> String {
        self.inner.test_id.clone()
    }
    /// Version that was scored.
    #[getter]
    pub fn version(&self) -> u32 {
        self.inner.version
    }
    /// Axis id → total.
    #[getter]
    pub fn axis_totals(&self) -> BTreeMap<String, i32> {
        self.inner.axis_totals.clone()
    }
    /// Axis id → zone id.
    #[getter]
    pub fn axis_zones(&self) -> BTreeMap<String, String> {
        self.inner.axis_zones.clone()
    }
    /// Sum of the axis totals.
    #[getter]
    pub fn global_total(&self) -> i32 {
        self.inner.global_total
    }
    /// Zone id of the global total.
    #[getter]
    pub fn global_zone(&self) -> String {
        self.inner.global_zone.clone()
    }
    /// Unanswered questions scored as the scale minimum.
    #[getter]
    pub fn defaulted(&self) -> Vec<String> {
        self.inner.defaulted.clone()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "ScoringResult(test_id={:?}, version={}, global_total={}, global_zone={:?})",
            self.inner.test_id, self.inner.version, self.inner.global_total, self.inner.global_zone,
        )
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Questionnaire engine over an immutable catalog.
///
/// `Engine()` serves the reference questionnaire; `Engine.from_json(text)`
/// serves a JSON array of test definitions.
#[pyclass(name = "Engine")]
pub struct PyEngine {
    inner: Engine,
}

#[pymethods]
impl PyEngine {
    /// Engine over the built-in reference catalog.
    #[new]
    pub fn new() -> Self {
        Self {
            inner: Engine::new(TestCatalog::builtin()),
        }
    }

    /// Engine over definitions parsed from a JSON array.
    ///
    /// Raises ValueError if the JSON is malformed or a definition is invalid.
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let catalog = TestCatalog::from_json(json).map_err(to_py_err)?;
        Ok(Self {
            inner: Engine::new(catalog),
        })
    }

    /// Registered test ids.
    pub fn test_ids(&self) -> Vec<String> {
        self.inner
            .catalog()
            .test_ids()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Questions as `(id, text, axis)` tuples in presentation order.
    ///
    /// Raises KeyError for an unknown test id.
    pub fn list_questions(&self, test_id: &str) -> PyResult<Vec<(String, String, String)>> {
        let views = self.inner.list_questions(test_id).map_err(to_py_err)?;
        Ok(views.into_iter().map(|v| (v.id, v.text, v.axis)).collect())
    }

    /// Score a dict of `{question_id: value}`.
    ///
    /// Args:
    ///     test_id: test to score against
    ///     answers: answer values keyed by question id
    ///     version: exact version; latest when omitted
    ///
    /// Raises KeyError for an unknown test or version, ValueError for invalid answers.
    #[pyo3(signature = (test_id, answers, version=None))]
    pub fn submit(
        &self,
        test_id: &str,
        answers: HashMap<String, i32>,
        version: Option<u32>,
    ) -> PyResult<PyScoringResult> {
        let answers: Answers = answers.into_iter().collect();
        let result = match version {
            Some(v) => self.inner.submit_version(test_id, v, &answers),
            None => self.inner.submit(test_id, &answers),
        };
        result
            .map(|inner| PyScoringResult { inner })
            .map_err(to_py_err)
    }

    /// Verbose display schema of a test, as JSON.
    pub fn schema_json(&self, test_id: &str) -> PyResult<String> {
        let schema = self.inner.schema(test_id).map_err(to_py_err)?;
        serde_json::to_string(&schema).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Engine(tests={:?})", self.inner.catalog().test_ids())
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Questionnaire scoring engine Python bindings.
#[pymodule]
pub fn clarity_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEngine>()?;
    m.add_class::<PyScoringResult>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
