//! Modifier description parser.
//!
//! Decodes the JSON modifier description of every effect into [`RawModifier`]
//! records and indexes the result by owning effect and by source type.
//!
//! ## Description format
//!
//! ```json
//! [{"func": "LocationGroupModifier", "domain": "shipID", "groupID": 53,
//!   "modifiedAttributeID": 64, "modifyingAttributeID": 292, "operation": 6}]
//! ```
//!
//! Each entry is decoded on its own; a bad entry is dropped without affecting
//! its siblings.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Domain, Modifier, ModifierParseError, Operation, RawModifier, SkillRef};
use crate::env::EffectDefinition;
use crate::error::DogmaError;
use crate::fit::DbuffTag;
use crate::ids::{AttributeId, EffectId, GroupId, TypeId};

/// Wire shape of one modifier entry. Every field is optional here so that
/// missing fields surface as [`ModifierParseError::MissingField`].
#[derive(Debug, Deserialize)]
struct RawEntry {
    func: Option<String>,
    domain: Option<String>,
    #[serde(rename = "modifiedAttributeID")]
    modified_attribute_id: Option<i32>,
    #[serde(rename = "modifyingAttributeID")]
    modifying_attribute_id: Option<i32>,
    operation: Option<i32>,
    #[serde(rename = "groupID")]
    group_id: Option<i32>,
    #[serde(rename = "skillTypeID")]
    skill_type_id: Option<i32>,
}

/// Decodes a modifier description into one result per entry.
///
/// A description that is not a JSON array yields a single
/// [`ModifierParseError::InvalidJson`].
pub fn decode_modifier_info(description: &str) -> Vec<Result<RawModifier, ModifierParseError>> {
    let entries = match serde_json::from_str::<serde_json::Value>(description) {
        Ok(serde_json::Value::Array(entries)) => entries,
        Ok(other) => {
            return vec![Err(ModifierParseError::InvalidJson(format!(
                "expected an array, found {}",
                json_kind(&other)
            )))];
        }
        Err(err) => return vec![Err(ModifierParseError::InvalidJson(err.to_string()))],
    };

    entries.into_iter().map(decode_entry).collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn decode_entry(value: serde_json::Value) -> Result<RawModifier, ModifierParseError> {
    let entry: RawEntry = serde_json::from_value(value)
        .map_err(|err| ModifierParseError::Malformed(err.to_string()))?;

    let func = entry.func.ok_or(ModifierParseError::MissingField("func"))?;
    let location = entry
        .domain
        .ok_or(ModifierParseError::MissingField("domain"))?;
    let item_domain = match location.as_str() {
        "itemID" => Domain::Item,
        "shipID" => Domain::Ship,
        "charID" => Domain::Pilot,
        "otherID" => Domain::Other,
        _ => return Err(ModifierParseError::UnknownDomain(location)),
    };

    let domain = match func.as_str() {
        "ItemModifier" => item_domain,
        "LocationModifier" => Domain::Location,
        "LocationGroupModifier" => Domain::LocationGroup(GroupId(
            entry
                .group_id
                .ok_or(ModifierParseError::MissingField("groupID"))?,
        )),
        "LocationRequiredSkillModifier" | "OwnerRequiredSkillModifier" => {
            Domain::RequiredSkill(SkillRef::from_code(
                entry
                    .skill_type_id
                    .ok_or(ModifierParseError::MissingField("skillTypeID"))?,
            ))
        }
        _ => return Err(ModifierParseError::UnknownFunction(func)),
    };

    let operation = Operation::from_code(
        entry
            .operation
            .ok_or(ModifierParseError::MissingField("operation"))?,
    )?;

    Ok(RawModifier {
        operation,
        domain,
        modified_attribute: AttributeId(
            entry
                .modified_attribute_id
                .ok_or(ModifierParseError::MissingField("modifiedAttributeID"))?,
        ),
        modifying_attribute: AttributeId(
            entry
                .modifying_attribute_id
                .ok_or(ModifierParseError::MissingField("modifyingAttributeID"))?,
        ),
    })
}

/// Parsed modifiers indexed by owning effect and by source type.
#[derive(Clone, Debug, Default)]
pub struct ModifierIndex {
    by_effect: BTreeMap<EffectId, Vec<RawModifier>>,
    by_type: BTreeMap<TypeId, Vec<Modifier>>,
}

impl ModifierIndex {
    /// Decoded modifiers of one effect.
    pub fn for_effect(&self, effect: EffectId) -> &[RawModifier] {
        self.by_effect.get(&effect).map_or(&[], Vec::as_slice)
    }

    /// Every modifier whose source is `type_id`, in effect id order.
    pub fn for_type(&self, type_id: TypeId) -> &[Modifier] {
        self.by_type.get(&type_id).map_or(&[], Vec::as_slice)
    }

    /// Number of modifiers across every source type.
    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.values().all(Vec::is_empty)
    }
}

/// Parses the modifiers of every `(type, effects)` pair.
///
/// Each effect description is decoded once even when several types carry the
/// effect. Effects without a definition or without a description contribute
/// nothing. `dbuffs` tags the synthetic effects of dbuff collections.
pub fn parse_effects<'a>(
    type_effects: impl IntoIterator<Item = (TypeId, &'a [EffectId])>,
    effects: &BTreeMap<EffectId, EffectDefinition>,
    dbuffs: &BTreeMap<EffectId, DbuffTag>,
) -> ModifierIndex {
    let mut index = ModifierIndex::default();

    for (type_id, effect_ids) in type_effects {
        let mut modifiers = Vec::new();

        for &effect_id in effect_ids {
            let Some(definition) = effects.get(&effect_id) else {
                continue;
            };
            let Some(description) = definition.modifier_info.as_deref() else {
                continue;
            };

            let raw = index
                .by_effect
                .entry(effect_id)
                .or_insert_with(|| decode_logged(effect_id, description));

            let dbuff = dbuffs.get(&effect_id).copied();
            modifiers.extend(raw.iter().map(|raw| Modifier {
                source_type: type_id,
                effect: effect_id,
                category: definition.category,
                operation: raw.operation,
                domain: raw.domain,
                modified_attribute: raw.modified_attribute,
                modifying_attribute: raw.modifying_attribute,
                dbuff,
            }));
        }

        if !modifiers.is_empty() {
            index.by_type.entry(type_id).or_default().extend(modifiers);
        }
    }

    index
}

fn decode_logged(effect: EffectId, description: &str) -> Vec<RawModifier> {
    decode_modifier_info(description)
        .into_iter()
        .filter_map(|result| match result {
            Ok(raw) => Some(raw),
            Err(ModifierParseError::SkillPointsToLevel) => None,
            Err(err) => {
                tracing::debug!(
                    %effect,
                    code = err.error_code(),
                    "dropping modifier entry: {}",
                    err
                );
                None
            }
        })
        .collect()
}
