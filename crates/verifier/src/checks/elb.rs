//! Load balancer and target group checks.

use ecsprobe_core::report::CheckFailure;

use super::{expect_eq, expect_single};
use crate::client::ElbApi;

/// Exactly one load balancer with the expected ARN.
pub async fn check_load_balancer<L: ElbApi>(elb: &L, arn: &str) -> Result<(), CheckFailure> {
    let load_balancers = elb.describe_load_balancers(arn).await?;
    let load_balancer = expect_single(load_balancers, "load balancer")?;
    expect_eq("Expected load balancer ARN to match", arn, &load_balancer.arn)
}

/// Exactly one target group with the expected ARN and name.
pub async fn check_target_group<L: ElbApi>(
    elb: &L,
    name: &str,
    arn: &str,
) -> Result<(), CheckFailure> {
    let target_groups = elb.describe_target_groups(arn).await?;
    let target_group = expect_single(target_groups, "target group")?;
    expect_eq("Expected target group ARN to match", arn, &target_group.arn)?;
    expect_eq(
        "Expected target group name to match",
        name,
        &target_group.name,
    )
}
