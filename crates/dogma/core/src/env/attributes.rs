use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::AttributeId;

/// Access to the global attribute definition table.
///
/// Definitions are process-wide and read-only; they are loaded once per batch
/// into an [`AttributeCatalog`] rather than queried per run.
pub trait AttributeOracle: Send + Sync {
    fn attribute_definitions(&self) -> Vec<AttributeDefinition>;
}

/// Static definition of an attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub attribute_id: AttributeId,
    /// Canonical name (e.g. `maxVelocity`).
    pub name: String,
    #[serde(default)]
    pub default_value: f64,
    /// Modifiers on stackable attributes are never stacking-penalized.
    #[serde(default)]
    pub stackable: bool,
    /// Assign operations keep the largest candidate when set, else the smallest.
    #[serde(default = "default_high_is_good")]
    pub high_is_good: bool,
}

fn default_high_is_good() -> bool {
    true
}

impl AttributeDefinition {
    pub fn new(attribute_id: AttributeId, name: impl Into<String>) -> Self {
        Self {
            attribute_id,
            name: name.into(),
            default_value: 0.0,
            stackable: false,
            high_is_good: true,
        }
    }

    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    pub fn low_is_good(mut self) -> Self {
        self.high_is_good = false;
        self
    }
}

/// Read-only lookup table over every attribute definition.
///
/// Unknown ids behave like a definition with default `0.0`, not stackable and
/// high-is-good; their name is the numeric id.
#[derive(Clone, Debug, Default)]
pub struct AttributeCatalog {
    definitions: BTreeMap<AttributeId, AttributeDefinition>,
}

impl AttributeCatalog {
    pub fn new(definitions: impl IntoIterator<Item = AttributeDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.attribute_id, definition))
                .collect(),
        }
    }

    /// Builds the catalog from an oracle.
    pub fn from_oracle(oracle: &dyn AttributeOracle) -> Self {
        Self::new(oracle.attribute_definitions())
    }

    #[inline]
    pub fn get(&self, attribute: AttributeId) -> Option<&AttributeDefinition> {
        self.definitions.get(&attribute)
    }

    pub fn default_value(&self, attribute: AttributeId) -> f64 {
        self.get(attribute).map_or(0.0, |def| def.default_value)
    }

    pub fn is_stackable(&self, attribute: AttributeId) -> bool {
        self.get(attribute).is_some_and(|def| def.stackable)
    }

    pub fn high_is_good(&self, attribute: AttributeId) -> bool {
        self.get(attribute).is_none_or(|def| def.high_is_good)
    }

    pub fn name(&self, attribute: AttributeId) -> String {
        match self.get(attribute) {
            Some(def) => def.name.clone(),
            None => attribute.get().to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
