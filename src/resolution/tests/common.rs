use std::sync::{Arc, Mutex};

use crate::resolution::context::ResolutionContext;
use crate::resolution::defaults::{
    standard_feature_flags, standard_foundation, standard_governance,
};
use crate::resolution::domain::{
    FeatureFlagSet, Foundation, Governance, IndustryId, JourneyStage, PlanTier, RoleId,
};
use crate::resolution::service::PolicyResolutionService;
use crate::resolution::store::loader::{ConfigLoader, LoadError, StaticLoader};

pub(super) fn context(industry: &str, plan: PlanTier) -> ResolutionContext {
    ResolutionContext::new(
        IndustryId(industry.to_string()),
        plan,
        RoleId("provider".to_string()),
        JourneyStage::Active,
        "prov-001",
    )
}

pub(super) fn healthcare_context(plan: PlanTier) -> ResolutionContext {
    context("healthcare", plan)
}

pub(super) fn standard_service() -> PolicyResolutionService<StaticLoader> {
    PolicyResolutionService::bootstrap(Arc::new(StaticLoader::standard()))
        .expect("standard documents validate")
}

/// Build a service over the standard documents with targeted edits applied.
pub(super) fn service_with(
    edit: impl FnOnce(&mut Foundation, &mut Governance, &mut FeatureFlagSet),
) -> Result<PolicyResolutionService<StaticLoader>, LoadError> {
    let mut foundation = standard_foundation();
    let mut governance = standard_governance();
    let mut flags = standard_feature_flags();
    edit(&mut foundation, &mut governance, &mut flags);
    PolicyResolutionService::bootstrap(Arc::new(StaticLoader::new(foundation, governance, flags)))
}

/// Loader whose documents can be replaced between calls, emulating an
/// out-of-band configuration edit for reload tests.
pub(super) struct MutableLoader {
    inner: Mutex<StaticLoader>,
}

impl MutableLoader {
    pub(super) fn standard() -> Self {
        Self {
            inner: Mutex::new(StaticLoader::standard()),
        }
    }

    pub(super) fn replace(&self, loader: StaticLoader) {
        *self.inner.lock().expect("loader mutex poisoned") = loader;
    }
}

impl ConfigLoader for MutableLoader {
    fn load_foundation(&self) -> Result<Foundation, LoadError> {
        self.inner
            .lock()
            .expect("loader mutex poisoned")
            .load_foundation()
    }

    fn load_governance(&self) -> Result<Governance, LoadError> {
        self.inner
            .lock()
            .expect("loader mutex poisoned")
            .load_governance()
    }

    fn load_feature_flags(&self) -> Result<FeatureFlagSet, LoadError> {
        self.inner
            .lock()
            .expect("loader mutex poisoned")
            .load_feature_flags()
    }
}
