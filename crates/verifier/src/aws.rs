//! AWS SDK implementations of the cloud API traits.
//!
//! Each adapter owns one SDK client built from a shared `SdkConfig`.
//! Responses are mapped into the records in [`crate::client`]; errors carry
//! the full SDK error chain via `DisplayErrorContext`.
//!
//! "Not found" service errors are mapped to empty results so the checks
//! report a cardinality failure, the same way `DescribeClusters` answers
//! for an unknown cluster.

use aws_config::SdkConfig;
use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ecs::operation::describe_task_definition::DescribeTaskDefinitionError;
use tracing::debug;

use crate::client::{
    BucketInfo, ClientSet, ClusterInfo, EcsApi, ElbApi, LoadBalancerInfo, RegistryServiceInfo,
    S3Api, ServiceDiscoveryApi, ServiceInfo, TargetGroupInfo, TaskDefinitionInfo,
};
use crate::error::CloudError;

/// Clients backed by the AWS SDK.
pub type AwsClients =
    ClientSet<AwsEcsClient, AwsElbClient, AwsS3Client, AwsServiceDiscoveryClient>;

impl AwsClients {
    /// Builds all four clients from one SDK configuration.
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        ClientSet {
            ecs: AwsEcsClient::new(sdk_config),
            elb: AwsElbClient::new(sdk_config),
            s3: AwsS3Client::new(sdk_config),
            service_discovery: AwsServiceDiscoveryClient::new(sdk_config),
        }
    }
}

fn sdk_error(operation: &'static str, err: impl std::error::Error) -> CloudError {
    CloudError::new(operation, DisplayErrorContext(&err).to_string())
}

// ─── ECS ──────────────────────────────────────────────────────────────

/// ECS client.
#[derive(Debug, Clone)]
pub struct AwsEcsClient {
    client: aws_sdk_ecs::Client,
}

impl AwsEcsClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ecs::Client::new(sdk_config),
        }
    }
}

impl EcsApi for AwsEcsClient {
    async fn describe_clusters(&self, cluster: &str) -> Result<Vec<ClusterInfo>, CloudError> {
        let output = self
            .client
            .describe_clusters()
            .clusters(cluster)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeClusters", e))?;

        for failure in output.failures() {
            debug!(
                arn = failure.arn().unwrap_or_default(),
                reason = failure.reason().unwrap_or_default(),
                "DescribeClusters reported a failure"
            );
        }

        Ok(output
            .clusters()
            .iter()
            .map(|c| ClusterInfo {
                arn: c.cluster_arn().unwrap_or_default().to_owned(),
                name: c.cluster_name().unwrap_or_default().to_owned(),
            })
            .collect())
    }

    async fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<ServiceInfo>, CloudError> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeServices", e))?;

        Ok(output
            .services()
            .iter()
            .map(|s| ServiceInfo {
                arn: s.service_arn().unwrap_or_default().to_owned(),
                name: s.service_name().unwrap_or_default().to_owned(),
            })
            .collect())
    }

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<Option<TaskDefinitionInfo>, CloudError> {
        let result = self
            .client
            .describe_task_definition()
            .task_definition(task_definition)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) if e.as_service_error().is_some_and(is_missing_task_definition) => {
                debug!(
                    task_definition,
                    error = %DisplayErrorContext(&e),
                    "task definition not found"
                );
                return Ok(None);
            }
            Err(e) => return Err(sdk_error("DescribeTaskDefinition", e)),
        };

        Ok(output.task_definition().map(|td| TaskDefinitionInfo {
            arn: td.task_definition_arn().unwrap_or_default().to_owned(),
        }))
    }
}

/// Message ECS attaches to the `ClientException` for an unknown task definition.
const MISSING_TASK_DEFINITION: &str = "Unable to describe task definition";

/// ECS reuses `ClientException` for authorization and parameter errors, so
/// only the unknown-definition message counts as "not found".
fn is_missing_task_definition(err: &DescribeTaskDefinitionError) -> bool {
    err.is_client_exception()
        && err
            .message()
            .is_some_and(|m| m.contains(MISSING_TASK_DEFINITION))
}

// ─── Elastic Load Balancing v2 ────────────────────────────────────────

/// ELBv2 client.
#[derive(Debug, Clone)]
pub struct AwsElbClient {
    client: aws_sdk_elasticloadbalancingv2::Client,
}

impl AwsElbClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_elasticloadbalancingv2::Client::new(sdk_config),
        }
    }
}

impl ElbApi for AwsElbClient {
    async fn describe_load_balancers(
        &self,
        load_balancer_arn: &str,
    ) -> Result<Vec<LoadBalancerInfo>, CloudError> {
        let result = self
            .client
            .describe_load_balancers()
            .load_balancer_arns(load_balancer_arn)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_load_balancer_not_found_exception()) =>
            {
                debug!(load_balancer_arn, "load balancer not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(sdk_error("DescribeLoadBalancers", e)),
        };

        Ok(output
            .load_balancers()
            .iter()
            .map(|lb| LoadBalancerInfo {
                arn: lb.load_balancer_arn().unwrap_or_default().to_owned(),
                name: lb.load_balancer_name().unwrap_or_default().to_owned(),
            })
            .collect())
    }

    async fn describe_target_groups(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetGroupInfo>, CloudError> {
        let result = self
            .client
            .describe_target_groups()
            .target_group_arns(target_group_arn)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_target_group_not_found_exception()) =>
            {
                debug!(target_group_arn, "target group not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(sdk_error("DescribeTargetGroups", e)),
        };

        Ok(output
            .target_groups()
            .iter()
            .map(|tg| TargetGroupInfo {
                arn: tg.target_group_arn().unwrap_or_default().to_owned(),
                name: tg.target_group_name().unwrap_or_default().to_owned(),
            })
            .collect())
    }
}

// ─── S3 ───────────────────────────────────────────────────────────────

/// S3 client.
#[derive(Debug, Clone)]
pub struct AwsS3Client {
    client: aws_sdk_s3::Client,
}

impl AwsS3Client {
    /// Uses path-style addressing when an endpoint override is configured.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        if sdk_config.endpoint_url().is_some() {
            builder = builder.force_path_style(true);
        }
        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
        }
    }
}

impl S3Api for AwsS3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, CloudError> {
        let mut buckets = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_buckets()
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListBuckets", e))?;

            buckets.extend(output.buckets().iter().map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_owned(),
            }));

            match output.continuation_token() {
                Some(token) if !token.is_empty() => continuation_token = Some(token.to_owned()),
                _ => break,
            }
        }

        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }
}

// ─── Cloud Map ────────────────────────────────────────────────────────

/// Cloud Map (service discovery) client.
#[derive(Debug, Clone)]
pub struct AwsServiceDiscoveryClient {
    client: aws_sdk_servicediscovery::Client,
}

impl AwsServiceDiscoveryClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_servicediscovery::Client::new(sdk_config),
        }
    }
}

impl ServiceDiscoveryApi for AwsServiceDiscoveryClient {
    async fn get_service(&self, id: &str) -> Result<Option<RegistryServiceInfo>, CloudError> {
        let result = self.client.get_service().id(id).send().await;

        let output = match result {
            Ok(output) => output,
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_service_not_found()) =>
            {
                debug!(id, "service discovery service not found");
                return Ok(None);
            }
            Err(e) => return Err(sdk_error("GetService", e)),
        };

        Ok(output.service().map(|s| RegistryServiceInfo {
            id: s.id().unwrap_or_default().to_owned(),
            arn: s.arn().unwrap_or_default().to_owned(),
            name: s.name().unwrap_or_default().to_owned(),
        }))
    }
}
