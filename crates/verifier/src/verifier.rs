//! Existence verifier.
//!
//! [`verify`] runs in two phases:
//!
//! 1. **Resolve** every planned check against the provisioning outputs.
//!    Checks gated on a disabled feature are marked skipped and read
//!    nothing. A missing, empty or malformed output aborts the run with a
//!    [`SetupError`] before any API call is made.
//! 2. **Execute** the resolved checks in plan order. Each check issues one
//!    describe call; a failure (transport or assertion) is recorded for
//!    that check only and the remaining checks still run. Nothing is
//!    retried.
//!
//! An optional deadline bounds the whole run. Checks still pending when
//! it elapses fail with `deadline exceeded`.

use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{info, warn};

use ecsprobe_core::error::SetupError;
use ecsprobe_core::metrics as probe_metrics;
use ecsprobe_core::report::{CheckFailure, CheckOutcome, RunReport};
use ecsprobe_core::types::CheckKind;

use crate::checks::CheckInput;
use crate::client::CloudClients;
use crate::context::VerificationContext;

/// A planned check after the resolve phase.
enum Planned {
    Run(CheckInput),
    Skip { kind: CheckKind, reason: String },
}

/// Runs the context's check plan and reports per-check outcomes.
///
/// # Errors
///
/// Only setup problems are errors. Check failures are reported in the
/// returned [`RunReport`].
pub async fn verify<C: CloudClients>(
    ctx: &VerificationContext<'_, C>,
) -> Result<RunReport, SetupError> {
    let planned = resolve(ctx)?;
    let deadline = ctx
        .deadline
        .map(|d| tokio::time::Instant::now() + d);

    info!(
        checks = planned.len(),
        deadline_secs = ctx.deadline.map(|d| d.as_secs()),
        "starting existence verification"
    );

    let mut outcomes = Vec::with_capacity(planned.len());
    for entry in planned {
        let outcome = match entry {
            Planned::Skip { kind, reason } => {
                info!(check = %kind, reason = reason.as_str(), "check skipped");
                CheckOutcome::skipped(kind, reason)
            }
            Planned::Run(input) => run_check(&input, ctx.clients, deadline).await,
        };
        record_metrics(&outcome);
        outcomes.push(outcome);
    }

    let report = RunReport::new(outcomes);
    info!(
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "existence verification finished"
    );
    Ok(report)
}

fn resolve<C: CloudClients>(ctx: &VerificationContext<'_, C>) -> Result<Vec<Planned>, SetupError> {
    ctx.plan
        .checks()
        .iter()
        .map(|&kind| match kind.required_feature() {
            Some(feature) if !ctx.features.is_enabled(feature) => Ok(Planned::Skip {
                kind,
                reason: format!("feature '{feature}' is not enabled"),
            }),
            _ => CheckInput::resolve(kind, ctx.outputs).map(Planned::Run),
        })
        .collect()
}

async fn run_check<C: CloudClients>(
    input: &CheckInput,
    clients: &C,
    deadline: Option<tokio::time::Instant>,
) -> CheckOutcome {
    let kind = input.kind();
    let started = Instant::now();

    let result = match deadline {
        Some(at) if tokio::time::Instant::now() >= at => Err(CheckFailure::transport(
            input.operation(),
            "deadline exceeded",
        )),
        Some(at) => tokio::time::timeout_at(at, input.execute(clients))
            .await
            .unwrap_or_else(|_| {
                Err(CheckFailure::transport(
                    input.operation(),
                    "deadline exceeded",
                ))
            }),
        None => input.execute(clients).await,
    };

    let elapsed = started.elapsed();
    match result {
        Ok(()) => {
            info!(check = %kind, elapsed_ms = elapsed.as_millis() as u64, "check passed");
            CheckOutcome::passed(kind, elapsed)
        }
        Err(failure) => {
            warn!(check = %kind, error = %failure, "check failed");
            if matches!(failure, CheckFailure::Transport { .. }) {
                counter!(probe_metrics::CLOUD_API_ERRORS_TOTAL, probe_metrics::LABEL_CHECK => kind.name())
                    .increment(1);
            }
            CheckOutcome::failed(kind, failure, elapsed)
        }
    }
}

fn record_metrics(outcome: &CheckOutcome) {
    let check = outcome.check.name();
    counter!(
        probe_metrics::CHECKS_TOTAL,
        probe_metrics::LABEL_CHECK => check,
        probe_metrics::LABEL_RESULT => outcome.status.to_string()
    )
    .increment(1);
    histogram!(probe_metrics::CHECK_DURATION_SECONDS, probe_metrics::LABEL_CHECK => check)
        .record(outcome.duration_ms as f64 / 1000.0);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::{ClusterInfo, MockCloud};
    use ecsprobe_core::features::{FeatureSet, WITH_SERVICE_DISCOVERY};
    use ecsprobe_core::outputs::{ProvisioningOutputs, keys};
    use ecsprobe_core::report::CheckStatus;
    use ecsprobe_core::types::CheckPlan;

    const CLUSTER_ARN: &str = "arn:aws:ecs:us-east-1:123:cluster/app";

    fn cluster_outputs() -> ProvisioningOutputs {
        ProvisioningOutputs::from_pairs([
            (keys::ECS_CLUSTER_ARN, CLUSTER_ARN),
            (keys::ECS_CLUSTER_NAME, "app"),
        ])
    }

    #[tokio::test]
    async fn cluster_scenario_passes() {
        let outputs = cluster_outputs();
        let features = FeatureSet::new();
        let cloud = MockCloud {
            clusters: vec![ClusterInfo {
                arn: CLUSTER_ARN.to_owned(),
                name: "app".to_owned(),
            }],
            ..MockCloud::new()
        };
        let ctx = VerificationContext::new(&outputs, &features, &cloud)
            .with_plan(CheckPlan::new([CheckKind::Cluster]));

        let report = verify(&ctx).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.passed(), 1);
    }

    #[tokio::test]
    async fn missing_output_aborts_before_any_call() {
        let outputs = cluster_outputs();
        let features = FeatureSet::new();
        let cloud = MockCloud::new();
        let ctx = VerificationContext::new(&outputs, &features, &cloud).with_plan(CheckPlan::minimal());

        let err = verify(&ctx).await.unwrap_err();
        assert_eq!(
            err,
            SetupError::MissingOutput {
                key: keys::ECS_SERVICE_NAME.to_owned()
            }
        );
        assert!(cloud.calls().is_empty(), "no API call should be issued");
    }

    #[tokio::test]
    async fn gated_check_is_skipped_without_reading_outputs() {
        let outputs = ProvisioningOutputs::default();
        let features = FeatureSet::new();
        let cloud = MockCloud::new();
        let ctx = VerificationContext::new(&outputs, &features, &cloud)
            .with_plan(CheckPlan::new([CheckKind::ServiceDiscovery]));

        let report = verify(&ctx).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.outcomes[0].status, CheckStatus::Skipped);
        assert!(cloud.calls().is_empty());
    }

    #[tokio::test]
    async fn gated_check_runs_when_feature_enabled() {
        let outputs = ProvisioningOutputs::from_pairs([
            (keys::SERVICE_DISCOVERY_SERVICE_ID, "srv-1"),
            (keys::SERVICE_DISCOVERY_SERVICE_ARN, "arn:srv-1"),
        ]);
        let features = FeatureSet::new().with(WITH_SERVICE_DISCOVERY);
        let cloud = MockCloud::new();
        let ctx = VerificationContext::new(&outputs, &features, &cloud)
            .with_plan(CheckPlan::new([CheckKind::ServiceDiscovery]));

        let report = verify(&ctx).await.unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(cloud.calls(), vec!["GetService"]);
    }

    #[tokio::test]
    async fn transport_error_does_not_stop_siblings() {
        let outputs = ProvisioningOutputs::from_pairs([
            (keys::ECS_CLUSTER_ARN, CLUSTER_ARN),
            (keys::ECS_CLUSTER_NAME, "app"),
            (keys::ALB_ARN, "arn:lb"),
        ]);
        let features = FeatureSet::new();
        let cloud = MockCloud {
            fail_with: Some("ServiceUnavailable".to_owned()),
            ..MockCloud::new()
        };
        let ctx = VerificationContext::new(&outputs, &features, &cloud)
            .with_plan(CheckPlan::new([CheckKind::Cluster, CheckKind::LoadBalancer]));

        let report = verify(&ctx).await.unwrap();
        assert_eq!(report.failed(), 2);
        assert_eq!(
            cloud.calls(),
            vec!["DescribeClusters", "DescribeLoadBalancers"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn zero_deadline_fails_pending_checks() {
        let outputs = cluster_outputs();
        let features = FeatureSet::new();
        let cloud = MockCloud::new();
        let ctx = VerificationContext::new(&outputs, &features, &cloud)
            .with_plan(CheckPlan::new([CheckKind::Cluster]))
            .with_deadline(Some(Duration::ZERO));

        let report = verify(&ctx).await.unwrap();
        let outcome = report.outcome(CheckKind::Cluster).unwrap();
        assert!(outcome.is_failed());
        assert_eq!(
            outcome.failure,
            Some(CheckFailure::transport("DescribeClusters", "deadline exceeded"))
        );
        assert!(cloud.calls().is_empty());
    }
}
