//! Verification context: everything a run reads, passed explicitly.

use std::time::Duration;

use ecsprobe_core::error::SetupError;
use ecsprobe_core::features::FeatureSet;
use ecsprobe_core::outputs::ProvisioningOutputs;
use ecsprobe_core::types::CheckPlan;

use crate::client::CloudClients;

/// Read access to provisioning outputs.
pub trait OutputSource: Send + Sync {
    /// Returns the value for `key`, or a [`SetupError`] if it is absent or empty.
    fn output(&self, key: &str) -> Result<&str, SetupError>;
}

impl OutputSource for ProvisioningOutputs {
    fn output(&self, key: &str) -> Result<&str, SetupError> {
        self.get(key)
    }
}

/// Answers whether a named feature is enabled for this run.
pub trait FeaturePredicate: Send + Sync {
    fn is_enabled(&self, feature: &str) -> bool;
}

impl FeaturePredicate for FeatureSet {
    fn is_enabled(&self, feature: &str) -> bool {
        FeatureSet::is_enabled(self, feature)
    }
}

/// Inputs of one verification run.
///
/// # Examples
///
/// ```ignore
/// let ctx = VerificationContext::new(&outputs, &features, &clients)
///     .with_plan(CheckPlan::minimal())
///     .with_deadline(Some(Duration::from_secs(60)));
/// let report = verify(&ctx).await?;
/// ```
pub struct VerificationContext<'a, C> {
    pub outputs: &'a dyn OutputSource,
    pub features: &'a dyn FeaturePredicate,
    pub clients: &'a C,
    pub plan: CheckPlan,
    pub deadline: Option<Duration>,
}

impl<'a, C: CloudClients> VerificationContext<'a, C> {
    /// Creates a context running the full check plan with no deadline.
    pub fn new(
        outputs: &'a dyn OutputSource,
        features: &'a dyn FeaturePredicate,
        clients: &'a C,
    ) -> Self {
        Self {
            outputs,
            features,
            clients,
            plan: CheckPlan::full(),
            deadline: None,
        }
    }

    pub fn with_plan(mut self, plan: CheckPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Bounds the whole run; `None` leaves only the SDK's own timeouts.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCloud;
    use ecsprobe_core::types::CheckKind;

    #[test]
    fn outputs_accessor_delegates_to_map() {
        let outputs = ProvisioningOutputs::from_pairs([("alb_arn", "arn:lb")]);
        let source: &dyn OutputSource = &outputs;
        assert_eq!(source.output("alb_arn").unwrap(), "arn:lb");
        assert!(source.output("missing").is_err());
    }

    #[test]
    fn context_defaults_to_full_plan() {
        let outputs = ProvisioningOutputs::default();
        let features = FeatureSet::new();
        let cloud = MockCloud::new();
        let ctx = VerificationContext::new(&outputs, &features, &cloud);
        assert_eq!(ctx.plan.checks(), &CheckKind::ALL);
        assert!(ctx.deadline.is_none());

        let ctx = ctx
            .with_plan(CheckPlan::minimal())
            .with_deadline(Some(Duration::from_secs(5)));
        assert_eq!(ctx.plan.len(), 3);
        assert_eq!(ctx.deadline, Some(Duration::from_secs(5)));
    }
}
