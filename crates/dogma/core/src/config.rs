use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, EffectId, TypeId};

/// Engine configuration constants and tunable parameters.
///
/// The defaults describe the live rules dataset; fixtures and tools can
/// override any of them (the content crate loads this from `config.toml`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Type id used for the pilot instance.
    pub pilot_type_id: TypeId,

    /// Effects marking a module as a propulsion module for the post-pass
    /// velocity correction.
    pub propulsion_effects: Vec<EffectId>,

    /// Source categories whose modifiers are never stacking-penalized.
    pub stacking_exempt_categories: Vec<CategoryId>,

    /// Apply per-instance mutation multipliers after resolution.
    pub apply_mutations: bool,

    /// Run the post-pass corrections at all.
    pub post_pass: bool,
}

impl EngineConfig {
    // ===== compile-time constants =====
    /// Number of attribute slots naming required skills.
    pub const MAX_REQUIRED_SKILLS: usize = 6;

    /// Stacking penalty base: `exp(-(1 / 2.67)^2)`.
    pub const PENALTY_FACTOR: f64 = 0.869_119_980_800_397_4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PILOT_TYPE_ID: TypeId = TypeId(1373);
    pub const DEFAULT_PROPULSION_EFFECTS: [EffectId; 2] = [EffectId(6730), EffectId(6731)];
    pub const DEFAULT_STACKING_EXEMPT_CATEGORIES: [CategoryId; 5] = [
        CategoryId::SHIP,
        CategoryId::CHARGE,
        CategoryId::SKILL,
        CategoryId::IMPLANT,
        CategoryId::SUBSYSTEM,
    ];

    pub fn new() -> Self {
        Self {
            pilot_type_id: Self::DEFAULT_PILOT_TYPE_ID,
            propulsion_effects: Self::DEFAULT_PROPULSION_EFFECTS.to_vec(),
            stacking_exempt_categories: Self::DEFAULT_STACKING_EXEMPT_CATEGORIES.to_vec(),
            apply_mutations: true,
            post_pass: true,
        }
    }

    #[inline]
    pub fn is_stacking_exempt(&self, category: CategoryId) -> bool {
        self.stacking_exempt_categories.contains(&category)
    }

    #[inline]
    pub fn is_propulsion_effect(&self, effect: EffectId) -> bool {
        self.propulsion_effects.contains(&effect)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
