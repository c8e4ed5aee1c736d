//! Value resolution.
//!
//! [`Resolver`] computes the final value of any `(instance, attribute)` pair by
//! recursively resolving the source values of every modifier that targets it.
//! Results are memoized per run. An explicit in-progress marker turns a
//! circular dependency into a diagnostic and the base value instead of
//! unbounded recursion.
mod stack;

pub use stack::{Contribution, OperationStack, apply_penalized, delta, stacking_penalty};

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::env::AttributeCatalog;
use crate::fit::{AppliedModifier, Fit};
use crate::ids::{AttributeId, DbuffId, InstanceId};

/// Final attribute values of every instance, keyed by arena handle.
pub type ResolvedValues = BTreeMap<InstanceId, BTreeMap<AttributeId, f64>>;

/// Memoizing attribute resolver over one fit.
pub struct Resolver<'a> {
    fit: &'a Fit,
    catalog: &'a AttributeCatalog,
    cache: HashMap<(InstanceId, AttributeId), f64>,
    in_progress: HashSet<(InstanceId, AttributeId)>,
}

impl<'a> Resolver<'a> {
    pub fn new(fit: &'a Fit, catalog: &'a AttributeCatalog) -> Self {
        Self {
            fit,
            catalog,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Base value of a pair: the declared base, else the catalog default.
    fn base_value(&self, id: InstanceId, attribute: AttributeId) -> f64 {
        self.fit
            .base_value(id, attribute)
            .unwrap_or_else(|| self.catalog.default_value(attribute))
    }

    /// Fully resolved value of `attribute` on instance `id`.
    pub fn value(&mut self, id: InstanceId, attribute: AttributeId) -> f64 {
        let key = (id, attribute);
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        let base = self.base_value(id, attribute);
        let fit = self.fit;
        let Some(instance) = fit.get(id) else {
            return base;
        };

        let modifiers = instance.modifiers(attribute);
        if modifiers.is_empty() {
            self.cache.insert(key, base);
            return base;
        }

        if !self.in_progress.insert(key) {
            tracing::warn!(
                instance = %id,
                type_id = %instance.type_id,
                attribute = %attribute,
                "circular attribute dependency; using base value"
            );
            return base;
        }

        let active: Vec<&AppliedModifier> = modifiers
            .iter()
            .filter(|modifier| self.is_active(modifier))
            .collect();
        let survivors = self.collapse_dbuffs(active);

        let mut stack = OperationStack::new();
        for modifier in survivors {
            let source = self.value(modifier.source, modifier.source_attribute);
            stack.add(modifier.operation, source, modifier.penalized);
        }
        let value = stack.apply(base, self.catalog.high_is_good(attribute));

        self.in_progress.remove(&key);
        self.cache.insert(key, value);
        value
    }

    /// Activation gating: module-sourced modifiers need the module's status
    /// to satisfy the effect category; every other source is always eligible.
    fn is_active(&self, modifier: &AppliedModifier) -> bool {
        match self
            .fit
            .get(modifier.source)
            .and_then(|source| source.module_status())
        {
            Some(status) => status.satisfies(modifier.category.required_status()),
            None => true,
        }
    }

    /// Keeps one modifier per dbuff id according to its aggregate mode.
    ///
    /// Non-dbuff modifiers pass through untouched and keep their order.
    fn collapse_dbuffs<'m>(&mut self, modifiers: Vec<&'m AppliedModifier>) -> Vec<&'m AppliedModifier> {
        let mut groups: BTreeMap<DbuffId, Vec<usize>> = BTreeMap::new();
        for (index, modifier) in modifiers.iter().enumerate() {
            if let Some(tag) = modifier.dbuff {
                groups.entry(tag.dbuff_id).or_default().push(index);
            }
        }
        if groups.values().all(|members| members.len() <= 1) {
            return modifiers;
        }

        let mut dropped = HashSet::new();
        for members in groups.values().filter(|members| members.len() > 1) {
            let mode = modifiers[members[0]]
                .dbuff
                .map(|tag| tag.mode)
                .unwrap_or_default();
            let values: Vec<f64> = members
                .iter()
                .map(|&index| {
                    let modifier = modifiers[index];
                    self.value(modifier.source, modifier.source_attribute)
                })
                .collect();
            let keep = mode.select(&values).map(|winner| members[winner]);
            dropped.extend(members.iter().copied().filter(|&index| Some(index) != keep));
        }

        modifiers
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !dropped.contains(index))
            .map(|(_, modifier)| modifier)
            .collect()
    }

    /// Resolves every declared attribute of every instance.
    pub fn resolve_all(mut self) -> ResolvedValues {
        let fit = self.fit;
        let mut values = ResolvedValues::new();
        for instance in fit.iter() {
            let resolved = instance
                .attributes
                .keys()
                .map(|&attribute| (attribute, self.value(instance.id, attribute)))
                .collect();
            values.insert(instance.id, resolved);
        }
        values
    }
}
