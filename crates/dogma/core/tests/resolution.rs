//! Value resolution properties: operator order, stacking penalties,
//! activation gating and dbuff aggregation, exercised through the full engine.

mod common;

use common::*;
use dogma_core::{
    AggregateMode, AttributeDefinition, AttributeId, CategoryId, DbuffId, DbuffRow,
    EffectCategory, EngineConfig, Loadout, ModuleSpec, ModuleStatus, SlotFlag, TypeId, attrs,
};

const VELOCITY: i32 = attrs::MAX_VELOCITY.get();

fn velocity(fixture: &Fixture, loadout: &Loadout) -> f64 {
    fixture
        .simulate(loadout)
        .hull_attribute(attrs::MAX_VELOCITY)
        .expect("hull declares maxVelocity")
}

#[test]
fn unmodified_attribute_resolves_to_base() {
    let fixture = Fixture::new();
    assert_eq!(velocity(&fixture, &Loadout::new(HULL)), 200.0);
}

#[test]
fn penalized_multipliers_have_diminishing_returns() {
    const BOOSTER: TypeId = TypeId(300);
    let mut fixture = Fixture::new();
    fixture
        .item(BOOSTER, 60, CATEGORY_MODULE, &[(1001, 20.0)])
        .effect(
            BOOSTER,
            10,
            EffectCategory::Passive,
            vec![item_modifier("shipID", VELOCITY, 1001, OP_POST_PERCENT)],
        );

    let multipliers: Vec<f64> = (0..=5)
        .map(|count| {
            let loadout = (0..count).fold(Loadout::new(HULL), |loadout, _| {
                loadout.with_module(ModuleSpec::new(BOOSTER, SlotFlag::Low))
            });
            velocity(&fixture, &loadout) / 200.0
        })
        .collect();

    assert_close(multipliers[1], 1.2);
    for count in 2..=5 {
        let gain = multipliers[count] / multipliers[count - 1];
        let previous_gain = multipliers[count - 1] / multipliers[count - 2];
        assert!(gain > 1.0, "each module still helps");
        assert!(gain < previous_gain, "returns diminish at {count}");
        assert!(multipliers[count] < 1.2_f64.powi(count as i32));
    }
}

#[test]
fn stackable_attribute_is_never_penalized() {
    const BOOSTER: TypeId = TypeId(300);
    let mut fixture = Fixture::new();
    fixture
        .attribute(AttributeDefinition::new(AttributeId(1000), "stackableStat").stackable())
        .set(HULL, 1000, 100.0)
        .item(BOOSTER, 60, CATEGORY_MODULE, &[(1001, 20.0)])
        .effect(
            BOOSTER,
            10,
            EffectCategory::Passive,
            vec![item_modifier("shipID", 1000, 1001, OP_POST_PERCENT)],
        );

    let loadout = Loadout::new(HULL)
        .with_module(ModuleSpec::new(BOOSTER, SlotFlag::Low))
        .with_module(ModuleSpec::new(BOOSTER, SlotFlag::Low));
    let output = fixture.simulate(&loadout);
    assert_close(output.hull_attribute(AttributeId(1000)).unwrap(), 144.0);
}

#[test]
fn operators_apply_in_fixed_order() {
    const STAT: i32 = 1000;
    const ORDERED: TypeId = TypeId(300);
    const OVERRIDE: TypeId = TypeId(301);

    let mut fixture = Fixture::new();
    fixture
        .attribute(AttributeDefinition::new(AttributeId(STAT), "ordered").stackable())
        .set(HULL, STAT, 1.0)
        .item(
            ORDERED,
            60,
            CATEGORY_MODULE,
            &[
                (2001, 100.0),
                (2002, 2.0),
                (2003, 4.0),
                (2004, 10.0),
                (2005, 5.0),
                (2006, 3.0),
                (2007, 2.0),
                (2008, 50.0),
            ],
        )
        // Entries deliberately listed out of application order.
        .effect(
            ORDERED,
            10,
            EffectCategory::Passive,
            vec![
                item_modifier("shipID", STAT, 2008, OP_POST_PERCENT),
                item_modifier("shipID", STAT, 2004, OP_MOD_ADD),
                item_modifier("shipID", STAT, 2001, OP_PRE_ASSIGN),
                item_modifier("shipID", STAT, 2006, OP_POST_MUL),
                item_modifier("shipID", STAT, 2003, OP_PRE_DIV),
                item_modifier("shipID", STAT, 2005, OP_MOD_SUB),
                item_modifier("shipID", STAT, 2002, OP_PRE_MUL),
                item_modifier("shipID", STAT, 2007, OP_POST_DIV),
            ],
        )
        .item(OVERRIDE, 60, CATEGORY_MODULE, &[(2009, 7.0)])
        .effect(
            OVERRIDE,
            11,
            EffectCategory::Passive,
            vec![item_modifier("shipID", STAT, 2009, OP_POST_ASSIGN)],
        );

    let ordered = Loadout::new(HULL).with_module(ModuleSpec::new(ORDERED, SlotFlag::Low));
    let value = fixture
        .simulate(&ordered)
        .hull_attribute(AttributeId(STAT))
        .unwrap();
    // ((100 × 2 ÷ 4 + 10 − 5) × 3 ÷ 2) × 1.5
    assert_close(value, 123.75);
    // Additions before the pre-multiplication would give 118.125.
    assert!((value - 118.125).abs() > 1.0);

    let overridden = ordered.with_module(ModuleSpec::new(OVERRIDE, SlotFlag::Low));
    let value = fixture
        .simulate(&overridden)
        .hull_attribute(AttributeId(STAT))
        .unwrap();
    assert_eq!(value, 7.0);
}

#[test]
fn module_effects_follow_activation_status() {
    const AFTERBURNER: TypeId = TypeId(400);
    let mut fixture = Fixture::new();
    fixture
        .item(AFTERBURNER, 46, CATEGORY_MODULE, &[(1001, 50.0), (1002, 10.0)])
        .effect(
            AFTERBURNER,
            10,
            EffectCategory::Active,
            vec![item_modifier("shipID", VELOCITY, 1001, OP_POST_PERCENT)],
        )
        .effect(
            AFTERBURNER,
            11,
            EffectCategory::Online,
            vec![item_modifier("shipID", VELOCITY, 1002, OP_MOD_ADD)],
        );

    let cases = [
        (ModuleStatus::Offline, 200.0),
        (ModuleStatus::Online, 210.0),
        (ModuleStatus::Active, 315.0),
        (ModuleStatus::Overloaded, 315.0),
    ];
    for (status, expected) in cases {
        let loadout = Loadout::new(HULL)
            .with_module(ModuleSpec::new(AFTERBURNER, SlotFlag::Medium).with_status(status));
        assert_close(velocity(&fixture, &loadout), expected);
    }
}

fn dbuff_fixture(mode: AggregateMode, weak: f64, strong: f64) -> Fixture {
    const BURST: &str = r#"[{"func": "ItemModifier", "domain": "shipID", "modifiedAttributeID": 37, "modifyingAttributeID": 3000, "operation": 6}]"#;
    let mut fixture = Fixture::new();
    fixture
        .item(TypeId(500), 1770, CATEGORY_MODULE, &[(3000, weak)])
        .item(TypeId(501), 1770, CATEGORY_MODULE, &[(3000, strong)]);
    for type_id in [TypeId(500), TypeId(501)] {
        fixture.snapshot.add_dbuff(DbuffRow {
            type_id,
            dbuff_id: DbuffId(10),
            aggregate_mode: mode,
            modifier_info: BURST.to_string(),
        });
    }
    fixture
}

fn burst_loadout(status: ModuleStatus) -> Loadout {
    Loadout::new(HULL)
        .with_module(ModuleSpec::new(TypeId(500), SlotFlag::High).with_status(status))
        .with_module(ModuleSpec::new(TypeId(501), SlotFlag::High).with_status(status))
}

#[test]
fn duplicate_dbuffs_collapse_to_one() {
    let active = burst_loadout(ModuleStatus::Active);

    let maximum = dbuff_fixture(AggregateMode::Maximum, 10.0, 30.0);
    assert_close(velocity(&maximum, &active), 260.0);

    let minimum = dbuff_fixture(AggregateMode::Minimum, 10.0, 30.0);
    assert_close(velocity(&minimum, &active), 220.0);

    let magnitude = dbuff_fixture(AggregateMode::Default, 10.0, -30.0);
    assert_close(velocity(&magnitude, &active), 140.0);
}

#[test]
fn dbuffs_need_an_active_module() {
    let fixture = dbuff_fixture(AggregateMode::Maximum, 10.0, 30.0);
    assert_eq!(velocity(&fixture, &burst_loadout(ModuleStatus::Online)), 200.0);
}

#[test]
fn exempt_categories_are_configurable() {
    const BOOSTER: TypeId = TypeId(300);
    let mut fixture = Fixture::new();
    fixture
        .item(BOOSTER, 60, CATEGORY_MODULE, &[(1001, 20.0)])
        .effect(
            BOOSTER,
            10,
            EffectCategory::Passive,
            vec![item_modifier("shipID", VELOCITY, 1001, OP_POST_PERCENT)],
        );
    let loadout = Loadout::new(HULL)
        .with_module(ModuleSpec::new(BOOSTER, SlotFlag::Low))
        .with_module(ModuleSpec::new(BOOSTER, SlotFlag::Low));

    let penalized = velocity(&fixture, &loadout);
    fixture.config = EngineConfig {
        stacking_exempt_categories: vec![CategoryId(CATEGORY_MODULE)],
        ..EngineConfig::default()
    };
    let exempt = velocity(&fixture, &loadout);

    assert!(penalized < exempt);
    assert_close(exempt, 200.0 * 1.44);
}

fn hull_dbuffs(fixture: &mut Fixture, modified: i32) {
    let burst = format!(
        r#"[{{"func": "ItemModifier", "domain": "shipID", "modifiedAttributeID": {modified}, "modifyingAttributeID": 3000, "operation": 6}}]"#
    );
    fixture.set(HULL, 3000, 20.0);
    for dbuff_id in [DbuffId(10), DbuffId(11)] {
        fixture.snapshot.add_dbuff(DbuffRow {
            type_id: HULL,
            dbuff_id,
            aggregate_mode: AggregateMode::Maximum,
            modifier_info: burst.clone(),
        });
    }
}

#[test]
fn dbuffs_from_exempt_sources_are_penalized() {
    let mut fixture = Fixture::new();
    hull_dbuffs(&mut fixture, VELOCITY);

    let expected = 200.0 * 1.2 * (1.0 + 0.2 * EngineConfig::PENALTY_FACTOR);
    assert_close(velocity(&fixture, &Loadout::new(HULL)), expected);
}

#[test]
fn dbuffs_on_stackable_attributes_are_penalized() {
    const STAT: i32 = 1000;
    let mut fixture = Fixture::new();
    fixture
        .attribute(AttributeDefinition::new(AttributeId(STAT), "stackableStat").stackable())
        .set(HULL, STAT, 100.0);
    hull_dbuffs(&mut fixture, STAT);

    let output = fixture.simulate(&Loadout::new(HULL));
    let expected = 100.0 * 1.2 * (1.0 + 0.2 * EngineConfig::PENALTY_FACTOR);
    assert_close(output.hull_attribute(AttributeId(STAT)).unwrap(), expected);
}
