//! ECS cluster, service and task definition checks.

use ecsprobe_core::report::CheckFailure;

use super::{NONE_OBSERVED, expect_eq, expect_single};
use crate::client::EcsApi;

/// Exactly one cluster with the expected ARN and name.
pub async fn check_cluster<E: EcsApi>(ecs: &E, name: &str, arn: &str) -> Result<(), CheckFailure> {
    let clusters = ecs.describe_clusters(arn).await?;
    let cluster = expect_single(clusters, "cluster")?;
    expect_eq("Expected cluster ARN to match", arn, &cluster.arn)?;
    expect_eq("Expected cluster name to match", name, &cluster.name)
}

/// Exactly one service in the cluster with the expected ARN and name.
pub async fn check_service<E: EcsApi>(
    ecs: &E,
    name: &str,
    arn: &str,
    cluster_arn: &str,
) -> Result<(), CheckFailure> {
    let services = ecs.describe_services(cluster_arn, arn).await?;
    let service = expect_single(services, "service")?;
    expect_eq("Expected service ARN to match", arn, &service.arn)?;
    expect_eq("Expected service name to match", name, &service.name)
}

/// The task definition resolves to the expected ARN.
pub async fn check_task_definition<E: EcsApi>(ecs: &E, arn: &str) -> Result<(), CheckFailure> {
    let observed = ecs.describe_task_definition(arn).await?;
    let observed_arn = observed.as_ref().map_or(NONE_OBSERVED, |td| td.arn.as_str());
    expect_eq("Expected task definition ARN to match", arn, observed_arn)
}
