//! Existence checks.
//!
//! Each check reads its expected identifiers from provisioning outputs
//! ([`CheckInput::resolve`]), issues one describe call and compares the
//! response ([`CheckInput::execute`]). Checks that expect exactly one
//! result assert cardinality before comparing any field.
//!
//! Checks are grouped by the service they query:
//! - [`ecs`]: cluster, service, task definition
//! - [`elb`]: load balancer, target group
//! - [`s3`]: logs bucket
//! - [`service_discovery`]: Cloud Map service

pub mod ecs;
pub mod elb;
pub mod s3;
pub mod service_discovery;

use ecsprobe_core::error::SetupError;
use ecsprobe_core::outputs::keys;
use ecsprobe_core::report::CheckFailure;
use ecsprobe_core::types::CheckKind;

use crate::arn::bucket_name_from_arn;
use crate::client::CloudClients;
use crate::context::OutputSource;

/// A check with its expected values resolved from provisioning outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInput {
    Cluster {
        name: String,
        arn: String,
    },
    Service {
        name: String,
        arn: String,
        cluster_arn: String,
    },
    TaskDefinition {
        arn: String,
    },
    LoadBalancer {
        arn: String,
    },
    TargetGroup {
        name: String,
        arn: String,
    },
    LogsBucket {
        bucket_name: String,
    },
    ServiceDiscovery {
        id: String,
        arn: String,
    },
}

impl CheckInput {
    /// Reads the outputs `kind` needs.
    ///
    /// # Errors
    ///
    /// Any missing, empty or malformed output is a [`SetupError`].
    pub fn resolve(kind: CheckKind, outputs: &dyn OutputSource) -> Result<Self, SetupError> {
        let get = |key: &str| outputs.output(key).map(str::to_owned);

        Ok(match kind {
            CheckKind::Cluster => Self::Cluster {
                name: get(keys::ECS_CLUSTER_NAME)?,
                arn: get(keys::ECS_CLUSTER_ARN)?,
            },
            CheckKind::Service => Self::Service {
                name: get(keys::ECS_SERVICE_NAME)?,
                arn: get(keys::ECS_SERVICE_ARN)?,
                cluster_arn: get(keys::ECS_CLUSTER_ARN)?,
            },
            CheckKind::TaskDefinition => Self::TaskDefinition {
                arn: get(keys::ECS_TASK_DEFINITION_ARN)?,
            },
            CheckKind::LoadBalancer => Self::LoadBalancer {
                arn: get(keys::ALB_ARN)?,
            },
            CheckKind::TargetGroup => Self::TargetGroup {
                name: get(keys::ALB_TARGET_GROUP_NAME)?,
                arn: get(keys::ALB_TARGET_GROUP_ARN)?,
            },
            CheckKind::LogsBucket => {
                let arn = outputs.output(keys::S3_LOGS_ARN)?;
                Self::LogsBucket {
                    bucket_name: bucket_name_from_arn(arn)?.to_owned(),
                }
            }
            CheckKind::ServiceDiscovery => Self::ServiceDiscovery {
                id: get(keys::SERVICE_DISCOVERY_SERVICE_ID)?,
                arn: get(keys::SERVICE_DISCOVERY_SERVICE_ARN)?,
            },
        })
    }

    pub fn kind(&self) -> CheckKind {
        match self {
            Self::Cluster { .. } => CheckKind::Cluster,
            Self::Service { .. } => CheckKind::Service,
            Self::TaskDefinition { .. } => CheckKind::TaskDefinition,
            Self::LoadBalancer { .. } => CheckKind::LoadBalancer,
            Self::TargetGroup { .. } => CheckKind::TargetGroup,
            Self::LogsBucket { .. } => CheckKind::LogsBucket,
            Self::ServiceDiscovery { .. } => CheckKind::ServiceDiscovery,
        }
    }

    /// The API operation this check issues.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Cluster { .. } => "DescribeClusters",
            Self::Service { .. } => "DescribeServices",
            Self::TaskDefinition { .. } => "DescribeTaskDefinition",
            Self::LoadBalancer { .. } => "DescribeLoadBalancers",
            Self::TargetGroup { .. } => "DescribeTargetGroups",
            Self::LogsBucket { .. } => "ListBuckets",
            Self::ServiceDiscovery { .. } => "GetService",
        }
    }

    /// Issues the describe call and compares the response.
    pub async fn execute<C: CloudClients>(&self, clients: &C) -> Result<(), CheckFailure> {
        match self {
            Self::Cluster { name, arn } => ecs::check_cluster(clients.ecs(), name, arn).await,
            Self::Service {
                name,
                arn,
                cluster_arn,
            } => ecs::check_service(clients.ecs(), name, arn, cluster_arn).await,
            Self::TaskDefinition { arn } => ecs::check_task_definition(clients.ecs(), arn).await,
            Self::LoadBalancer { arn } => elb::check_load_balancer(clients.elb(), arn).await,
            Self::TargetGroup { name, arn } => {
                elb::check_target_group(clients.elb(), name, arn).await
            }
            Self::LogsBucket { bucket_name } => {
                s3::check_logs_bucket(clients.s3(), bucket_name).await
            }
            Self::ServiceDiscovery { id, arn } => {
                service_discovery::check_service(clients.service_discovery(), id, arn).await
            }
        }
    }
}

/// Unwraps a result list that must hold exactly one entry.
fn expect_single<T>(items: Vec<T>, resource: &str) -> Result<T, CheckFailure> {
    match <[T; 1]>::try_from(items) {
        Ok([item]) => Ok(item),
        Err(items) => Err(CheckFailure::assertion(
            format!("Expected 1 {resource} to be returned"),
            "1",
            items.len().to_string(),
        )),
    }
}

fn expect_eq(message: &str, expected: &str, observed: &str) -> Result<(), CheckFailure> {
    if expected == observed {
        Ok(())
    } else {
        Err(CheckFailure::assertion(message, expected, observed))
    }
}

/// Placeholder for an absent response body in assertion messages.
const NONE_OBSERVED: &str = "<none>";
