//! Cloud API abstraction for testability.
//!
//! One trait per queried service. Production code uses the AWS SDK
//! adapters in [`crate::aws`]; tests use in-memory fakes.
//!
//! ```text
//!            ┌──────────────┐
//!            │   verify()   │
//!            └──────┬───────┘
//!                   │ CloudClients
//!     ┌─────────┬───┴─────┬──────────────────┐
//!     ▼         ▼         ▼                  ▼
//!  EcsApi    ElbApi     S3Api    ServiceDiscoveryApi
//! ```
//!
//! Every method is a single read-only describe call. Implementations map
//! SDK responses into the small records below; absent string fields become
//! empty strings so they fail the equality assertions instead of panicking.
//!
//! A resource that does not exist is reported as an empty result (or
//! `None`), not as an error, so checks fail on cardinality.

use std::future::Future;

use crate::error::CloudError;

/// An ECS cluster as returned by `DescribeClusters`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterInfo {
    pub arn: String,
    pub name: String,
}

/// An ECS service as returned by `DescribeServices`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInfo {
    pub arn: String,
    pub name: String,
}

/// An ECS task definition as returned by `DescribeTaskDefinition`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDefinitionInfo {
    pub arn: String,
}

/// An ELBv2 load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBalancerInfo {
    pub arn: String,
    pub name: String,
}

/// An ELBv2 target group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetGroupInfo {
    pub arn: String,
    pub name: String,
}

/// An S3 bucket from `ListBuckets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
}

/// A Cloud Map service from `GetService`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryServiceInfo {
    pub id: String,
    pub arn: String,
    pub name: String,
}

/// ECS describe operations.
pub trait EcsApi: Send + Sync {
    /// Describes a single cluster by ARN or name.
    fn describe_clusters(
        &self,
        cluster: &str,
    ) -> impl Future<Output = Result<Vec<ClusterInfo>, CloudError>> + Send;

    /// Describes a single service within `cluster`.
    fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> impl Future<Output = Result<Vec<ServiceInfo>, CloudError>> + Send;

    /// Describes a task definition by ARN or `family:revision`.
    fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> impl Future<Output = Result<Option<TaskDefinitionInfo>, CloudError>> + Send;
}

/// Elastic Load Balancing v2 describe operations.
pub trait ElbApi: Send + Sync {
    fn describe_load_balancers(
        &self,
        load_balancer_arn: &str,
    ) -> impl Future<Output = Result<Vec<LoadBalancerInfo>, CloudError>> + Send;

    fn describe_target_groups(
        &self,
        target_group_arn: &str,
    ) -> impl Future<Output = Result<Vec<TargetGroupInfo>, CloudError>> + Send;
}

/// S3 bucket listing.
pub trait S3Api: Send + Sync {
    /// Lists every bucket visible to the credentials, following pagination.
    fn list_buckets(&self) -> impl Future<Output = Result<Vec<BucketInfo>, CloudError>> + Send;
}

/// Cloud Map service registry lookups.
pub trait ServiceDiscoveryApi: Send + Sync {
    fn get_service(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<RegistryServiceInfo>, CloudError>> + Send;
}

/// The set of clients a verification run queries.
///
/// Constructed once per run and only read from.
pub trait CloudClients: Send + Sync {
    type Ecs: EcsApi;
    type Elb: ElbApi;
    type S3: S3Api;
    type ServiceDiscovery: ServiceDiscoveryApi;

    fn ecs(&self) -> &Self::Ecs;
    fn elb(&self) -> &Self::Elb;
    fn s3(&self) -> &Self::S3;
    fn service_discovery(&self) -> &Self::ServiceDiscovery;
}

/// Four independent clients bundled together.
#[derive(Debug, Clone)]
pub struct ClientSet<E, L, S, D> {
    pub ecs: E,
    pub elb: L,
    pub s3: S,
    pub service_discovery: D,
}

impl<E, L, S, D> CloudClients for ClientSet<E, L, S, D>
where
    E: EcsApi,
    L: ElbApi,
    S: S3Api,
    D: ServiceDiscoveryApi,
{
    type Ecs = E;
    type Elb = L;
    type S3 = S;
    type ServiceDiscovery = D;

    fn ecs(&self) -> &E {
        &self.ecs
    }

    fn elb(&self) -> &L {
        &self.elb
    }

    fn s3(&self) -> &S {
        &self.s3
    }

    fn service_discovery(&self) -> &D {
        &self.service_discovery
    }
}

/// In-memory cloud for unit tests.
///
/// Lookups filter the configured records by identifier, mirroring how the
/// real APIs answer. Set `unfiltered` to return the configured records
/// as-is, and `fail_with` to make every call fail.
#[cfg(test)]
#[derive(Default)]
pub struct MockCloud {
    pub clusters: Vec<ClusterInfo>,
    pub services: Vec<ServiceInfo>,
    pub task_definitions: Vec<TaskDefinitionInfo>,
    pub load_balancers: Vec<LoadBalancerInfo>,
    pub target_groups: Vec<TargetGroupInfo>,
    pub buckets: Vec<BucketInfo>,
    pub registry_services: Vec<RegistryServiceInfo>,
    pub unfiltered: bool,
    pub fail_with: Option<String>,
    pub calls: std::sync::Mutex<Vec<&'static str>>,
}

#[cfg(test)]
impl MockCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, operation: &'static str) -> Result<(), CloudError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation);
        }
        match &self.fail_with {
            Some(message) => Err(CloudError::new(operation, message.clone())),
            None => Ok(()),
        }
    }

    fn lookup<T: Clone>(&self, records: &[T], matches: impl Fn(&T) -> bool) -> Vec<T> {
        records
            .iter()
            .filter(|r| self.unfiltered || matches(*r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl EcsApi for MockCloud {
    async fn describe_clusters(&self, cluster: &str) -> Result<Vec<ClusterInfo>, CloudError> {
        self.record("DescribeClusters")?;
        Ok(self.lookup(&self.clusters, |c| c.arn == cluster || c.name == cluster))
    }

    async fn describe_services(
        &self,
        _cluster: &str,
        service: &str,
    ) -> Result<Vec<ServiceInfo>, CloudError> {
        self.record("DescribeServices")?;
        Ok(self.lookup(&self.services, |s| s.arn == service || s.name == service))
    }

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<Option<TaskDefinitionInfo>, CloudError> {
        self.record("DescribeTaskDefinition")?;
        Ok(self
            .lookup(&self.task_definitions, |t| t.arn == task_definition)
            .into_iter()
            .next())
    }
}

#[cfg(test)]
impl ElbApi for MockCloud {
    async fn describe_load_balancers(
        &self,
        load_balancer_arn: &str,
    ) -> Result<Vec<LoadBalancerInfo>, CloudError> {
        self.record("DescribeLoadBalancers")?;
        Ok(self.lookup(&self.load_balancers, |lb| lb.arn == load_balancer_arn))
    }

    async fn describe_target_groups(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetGroupInfo>, CloudError> {
        self.record("DescribeTargetGroups")?;
        Ok(self.lookup(&self.target_groups, |tg| tg.arn == target_group_arn))
    }
}

#[cfg(test)]
impl S3Api for MockCloud {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, CloudError> {
        self.record("ListBuckets")?;
        Ok(self.buckets.clone())
    }
}

#[cfg(test)]
impl ServiceDiscoveryApi for MockCloud {
    async fn get_service(&self, id: &str) -> Result<Option<RegistryServiceInfo>, CloudError> {
        self.record("GetService")?;
        Ok(self
            .lookup(&self.registry_services, |s| s.id == id)
            .into_iter()
            .next())
    }
}

#[cfg(test)]
impl CloudClients for MockCloud {
    type Ecs = Self;
    type Elb = Self;
    type S3 = Self;
    type ServiceDiscovery = Self;

    fn ecs(&self) -> &Self {
        self
    }

    fn elb(&self) -> &Self {
        self
    }

    fn s3(&self) -> &Self {
        self
    }

    fn service_discovery(&self) -> &Self {
        self
    }
}
