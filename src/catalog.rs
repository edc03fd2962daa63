/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Immutable registry of versioned test definitions.
//!
//! The catalog is built once, at startup, from whatever configuration the host
//! uses, and is read-only afterwards. Every definition is validated while the
//! catalog is built; a catalog that exists contains only definitions whose
//! zone tables cover their score ranges exactly.
//!
//! ```rust
//! use clarity_core::builtin::clarity_v1;
//! use clarity_core::catalog::TestCatalog;
//!
//! let catalog = TestCatalog::new([clarity_v1()]).unwrap();
//! assert_eq!(catalog.get_definition("clarity").unwrap().version, 1);
//! assert!(catalog.get_definition("nonexistent-id").unwrap_err().is_not_found());
//! ```

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::builtin;
use crate::definition::TestDefinition;
use crate::error::EngineError;

/// Registry of test definitions keyed by `(id, version)`.
#[derive(Clone, Default)]
pub struct TestCatalog {
    /// Test id → version → definition.
    definitions: HashMap<String, BTreeMap<u32, TestDefinition>>,
}

impl TestCatalog {
    /// Validate and register every definition.
    ///
    /// Fails on the first definition that does not validate, or when two
    /// definitions share an `(id, version)` pair.
    pub fn new<I>(definitions: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = TestDefinition>,
    {
        let mut catalog = Self::default();
        for definition in definitions {
            if let Err(err) = definition.validate() {
                tracing::error!(
                    test_id = %definition.id,
                    version = definition.version,
                    error = %err,
                    "rejected test definition"
                );
                return Err(err);
            }
            catalog.insert(definition)?;
        }
        tracing::info!(definitions = catalog.len(), "test catalog built");
        Ok(catalog)
    }

    /// Catalog holding the reference questionnaire ([`builtin::clarity_v1`]).
    pub fn builtin() -> Self {
        let definition = builtin::clarity_v1();
        debug_assert_eq!(definition.validate(), Ok(()));
        let mut catalog = Self::default();
        catalog
            .definitions
            .entry(definition.id.clone())
            .or_default()
            .insert(definition.version, definition);
        catalog
    }

    /// Parse a JSON array of definitions, then build as [`TestCatalog::new`] does.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        use alloc::string::ToString;

        let definitions: Vec<TestDefinition> =
            serde_json::from_str(json).map_err(|e| EngineError::Parse(e.to_string()))?;
        Self::new(definitions)
    }

    fn insert(&mut self, definition: TestDefinition) -> Result<(), EngineError> {
        let versions = self.definitions.entry(definition.id.clone()).or_default();
        if versions.contains_key(&definition.version) {
            return Err(EngineError::configuration(
                &definition.id,
                format!("version {} registered twice", definition.version),
            ));
        }
        tracing::debug!(
            test_id = %definition.id,
            version = definition.version,
            questions = definition.questions.len(),
            "registered test definition"
        );
        versions.insert(definition.version, definition);
        Ok(())
    }

    // ── Lookup ─────────────────────────────────────────────────────────────

    /// Highest registered version of `test_id`.
    pub fn get_definition(&self, test_id: &str) -> Result<&TestDefinition, EngineError> {
        self.definitions
            .get(test_id)
            .and_then(|versions| versions.values().next_back())
            .ok_or_else(|| EngineError::NotFound {
                test_id: test_id.into(),
            })
    }

    /// Exactly `(test_id, version)`.
    pub fn get_version(&self, test_id: &str, version: u32) -> Result<&TestDefinition, EngineError> {
        let versions = self.definitions.get(test_id).ok_or_else(|| EngineError::NotFound {
            test_id: test_id.into(),
        })?;
        versions
            .get(&version)
            .ok_or_else(|| EngineError::VersionNotFound {
                test_id: test_id.into(),
                version,
            })
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    /// Registered test ids, sorted.
    pub fn test_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Registered versions of `test_id`, ascending. Empty if unknown.
    pub fn versions(&self, test_id: &str) -> Vec<u32> {
        self.definitions
            .get(test_id)
            .map(|versions| versions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of `(id, version)` definitions.
    pub fn len(&self) -> usize {
        self.definitions.values().map(BTreeMap::len).sum()
    }

    /// True when no definition is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every definition, in no particular order across ids.
    pub fn iter(&self) -> impl Iterator<Item = &TestDefinition> {
        self.definitions.values().flat_map(BTreeMap::values)
    }
}

impl core::fmt::Debug for TestCatalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestCatalog")
            .field("test_ids", &self.test_ids())
            .field("definition_count", &self.len())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
