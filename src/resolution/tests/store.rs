use std::sync::Arc;

use super::common::*;
use crate::resolution::defaults::{
    standard_feature_flags, standard_foundation, standard_governance,
};
use crate::resolution::domain::{FeatureFlag, FlagId, IndustryId, PlanTier};
use crate::resolution::store::loader::{LoadError, StaticLoader};
use crate::resolution::store::validate::ConfigInvalid;
use crate::resolution::store::ConfigStore;

fn edited_loader(
    edit: impl FnOnce(
        &mut crate::resolution::Foundation,
        &mut crate::resolution::Governance,
        &mut crate::resolution::FeatureFlagSet,
    ),
) -> StaticLoader {
    let mut foundation = standard_foundation();
    let mut governance = standard_governance();
    let mut flags = standard_feature_flags();
    edit(&mut foundation, &mut governance, &mut flags);
    StaticLoader::new(foundation, governance, flags)
}

fn invalid_of(result: Result<ConfigStore, LoadError>) -> ConfigInvalid {
    match result.expect_err("invalid documents rejected") {
        LoadError::Invalid(invalid) => invalid,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn bootstrap_activates_version_one() {
    let store = ConfigStore::bootstrap(&StaticLoader::standard()).expect("bootstrap succeeds");
    assert_eq!(store.version(), 1);
    assert_eq!(store.snapshot().version, 1);
}

#[test]
fn reload_swaps_in_a_new_version() {
    let loader = MutableLoader::standard();
    let store = ConfigStore::bootstrap(&loader).expect("bootstrap succeeds");

    loader.replace(edited_loader(|_, governance, _| {
        let policy = governance
            .cancellation
            .get_mut(&IndustryId("healthcare".to_string()))
            .expect("policy present");
        policy.free_window_hours = 36.0;
    }));

    let version = store.reload(&loader).expect("reload succeeds");
    assert_eq!(version, 2);
    let snapshot = store.snapshot();
    let policy = snapshot
        .governance
        .cancellation
        .get(&IndustryId("healthcare".to_string()))
        .expect("policy present");
    assert_eq!(policy.free_window_hours, 36.0);
}

#[test]
fn rejected_reload_keeps_the_last_known_good_snapshot() {
    let loader = MutableLoader::standard();
    let store = ConfigStore::bootstrap(&loader).expect("bootstrap succeeds");

    loader.replace(edited_loader(|_, governance, _| {
        let policy = governance
            .cancellation
            .get_mut(&IndustryId("healthcare".to_string()))
            .expect("policy present");
        policy.tiers.reverse();
    }));

    let err = store.reload(&loader).expect_err("broken documents rejected");
    assert!(matches!(
        err,
        LoadError::Invalid(ConfigInvalid::TierOrdering { .. })
    ));
    assert_eq!(store.version(), 1);
}

#[test]
fn in_flight_snapshots_survive_a_reload() {
    let loader = MutableLoader::standard();
    let store = ConfigStore::bootstrap(&loader).expect("bootstrap succeeds");
    let pinned = store.snapshot();

    loader.replace(edited_loader(|_, governance, _| {
        governance.trust.signals[0].weight = 0.5;
        governance.trust.signals[1].weight = 0.25;
        governance.trust.signals[2].weight = 0.25;
    }));
    store.reload(&loader).expect("reload succeeds");

    assert_eq!(pinned.version, 1);
    assert_eq!(pinned.governance.trust.signals[0].weight, 0.4);
    assert_eq!(store.snapshot().version, 2);
}

#[test]
fn tier_severity_regressions_are_fatal() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        let policy = governance
            .cancellation
            .get_mut(&IndustryId("healthcare".to_string()))
            .expect("policy present");
        // A farther-out tier must not charge more than a closer one.
        policy.tiers[2].penalty_percentage = 80;
    })));
    assert!(matches!(invalid, ConfigInvalid::TierSeverity { .. }));
}

#[test]
fn refund_window_ordering_is_fatal() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.refunds.default.windows.swap(0, 1);
    })));
    assert!(matches!(invalid, ConfigInvalid::RefundWindowOrdering { .. }));
}

#[test]
fn trust_weights_must_sum_to_one() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.trust.signals[0].weight = 0.9;
    })));
    assert!(matches!(invalid, ConfigInvalid::WeightSum { .. }));
}

#[test]
fn unknown_calculation_names_are_fatal() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.trust.signals[0].calculation = "eval_formula".to_string();
    })));
    assert!(matches!(invalid, ConfigInvalid::UnknownCalculation { .. }));
}

#[test]
fn verification_levels_must_ascend() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.trust.levels[2].threshold = 0.3;
    })));
    assert!(matches!(invalid, ConfigInvalid::LevelOrdering));
}

#[test]
fn fee_tables_are_one_based() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        let policy = governance
            .rescheduling
            .get_mut(&IndustryId("wellness".to_string()))
            .expect("policy present");
        policy.fee_structure[0].change_number = 0;
    })));
    assert!(matches!(invalid, ConfigInvalid::FeeStructureOrdering { .. }));
}

#[test]
fn signal_weights_stay_within_the_unit_interval() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.trust.signals[0].weight = 1.5;
    })));
    assert!(matches!(invalid, ConfigInvalid::WeightRange { .. }));
}

#[test]
fn level_thresholds_stay_within_the_unit_interval() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, governance, _| {
        governance.trust.levels[2].threshold = 1.5;
    })));
    assert!(matches!(invalid, ConfigInvalid::LevelThreshold { .. }));
}

#[test]
fn rollout_percentages_are_capped_at_one_hundred() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|_, _, flags| {
        if let Some(FeatureFlag::Global {
            rollout_percentage, ..
        }) = flags.flags.get_mut(&FlagId("instant_payouts".to_string()))
        {
            *rollout_percentage = 150;
        }
    })));
    assert!(matches!(invalid, ConfigInvalid::RolloutRange { .. }));
}

#[test]
fn flags_may_not_reference_unknown_roles() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|foundation, _, _| {
        foundation.roles.retain(|role| role.id.0 != "staff");
    })));
    assert!(matches!(invalid, ConfigInvalid::RoleUnknown { .. }));
}

#[test]
fn overrides_may_not_reference_unknown_plans() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|foundation, _, _| {
        foundation
            .plans
            .retain(|plan| plan.tier != PlanTier::Enterprise);
    })));
    assert!(matches!(invalid, ConfigInvalid::OverridePlanUnknown { .. }));
}

#[test]
fn policies_may_not_reference_unknown_industries() {
    let invalid = invalid_of(ConfigStore::bootstrap(&edited_loader(|foundation, _, _| {
        foundation
            .industries
            .retain(|industry| industry.id.0 != "wellness");
    })));
    assert!(matches!(invalid, ConfigInvalid::PolicyIndustryUnknown { .. }));
}

#[test]
fn reload_versions_increase_monotonically() {
    let loader = Arc::new(MutableLoader::standard());
    let store = ConfigStore::bootstrap(loader.as_ref()).expect("bootstrap succeeds");
    let second = store.reload(loader.as_ref()).expect("reload succeeds");
    let third = store.reload(loader.as_ref()).expect("reload succeeds");
    assert!(second < third);
}
