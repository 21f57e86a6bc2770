//! 도메인 타입 -- 체크 종류와 실행 계획
//!
//! [`CheckKind`]는 검증기가 수행할 수 있는 개별 체크를,
//! [`CheckPlan`]은 한 번의 실행에서 수행할 체크의 순서 있는 목록을 나타냅니다.
//! 배포가 노출하는 인프라 요소가 늘어나면 계획에 체크를 추가하면 됩니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::WITH_SERVICE_DISCOVERY;
use crate::outputs::keys;

/// 체크 종류
///
/// 선언 순서가 기본 실행 순서입니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// ECS 클러스터 존재 여부
    Cluster,
    /// ECS 서비스 존재 여부
    Service,
    /// ECS 태스크 정의 존재 여부
    TaskDefinition,
    /// 로드 밸런서 존재 여부
    LoadBalancer,
    /// 타깃 그룹 존재 여부
    TargetGroup,
    /// S3 로그 버킷 존재 여부
    LogsBucket,
    /// Cloud Map 서비스 등록 여부 (`with_service_discovery` 기능 필요)
    ServiceDiscovery,
}

impl CheckKind {
    /// 알려진 모든 체크 (기본 실행 순서)
    pub const ALL: [CheckKind; 7] = [
        CheckKind::Cluster,
        CheckKind::Service,
        CheckKind::TaskDefinition,
        CheckKind::LoadBalancer,
        CheckKind::TargetGroup,
        CheckKind::LogsBucket,
        CheckKind::ServiceDiscovery,
    ];

    /// 설정 파일과 CLI에서 사용하는 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Service => "service",
            Self::TaskDefinition => "task_definition",
            Self::LoadBalancer => "load_balancer",
            Self::TargetGroup => "target_group",
            Self::LogsBucket => "logs_bucket",
            Self::ServiceDiscovery => "service_discovery",
        }
    }

    /// 사람이 읽기 위한 설명
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cluster => "ECS cluster exists with the expected ARN and name",
            Self::Service => "ECS service exists in the cluster with the expected ARN and name",
            Self::TaskDefinition => "ECS task definition exists with the expected ARN",
            Self::LoadBalancer => "load balancer exists with the expected ARN",
            Self::TargetGroup => "target group exists with the expected ARN and name",
            Self::LogsBucket => "S3 logs bucket is visible to the credentials",
            Self::ServiceDiscovery => "service discovery service exists with the expected ID and ARN",
        }
    }

    /// 체크가 읽는 프로비저닝 출력 키
    pub fn output_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Cluster => &[keys::ECS_CLUSTER_NAME, keys::ECS_CLUSTER_ARN],
            Self::Service => &[
                keys::ECS_SERVICE_NAME,
                keys::ECS_SERVICE_ARN,
                keys::ECS_CLUSTER_ARN,
            ],
            Self::TaskDefinition => &[keys::ECS_TASK_DEFINITION_ARN],
            Self::LoadBalancer => &[keys::ALB_ARN],
            Self::TargetGroup => &[keys::ALB_TARGET_GROUP_NAME, keys::ALB_TARGET_GROUP_ARN],
            Self::LogsBucket => &[keys::S3_LOGS_ARN],
            Self::ServiceDiscovery => &[
                keys::SERVICE_DISCOVERY_SERVICE_ID,
                keys::SERVICE_DISCOVERY_SERVICE_ARN,
            ],
        }
    }

    /// 이 체크를 실행하려면 활성화되어야 하는 기능 이름
    ///
    /// `None`이면 항상 실행됩니다.
    pub fn required_feature(&self) -> Option<&'static str> {
        match self {
            Self::ServiceDiscovery => Some(WITH_SERVICE_DISCOVERY),
            _ => None,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CheckKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "check".to_owned(),
                reason: format!(
                    "unknown check '{s}' (expected one of: {})",
                    Self::ALL
                        .iter()
                        .map(CheckKind::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

/// 실행 계획: 순서가 있고 중복이 없는 체크 목록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPlan {
    checks: Vec<CheckKind>,
}

impl CheckPlan {
    /// 주어진 순서대로 계획을 만듭니다. 중복은 처음 나온 것만 남깁니다.
    pub fn new(checks: impl IntoIterator<Item = CheckKind>) -> Self {
        let mut plan = Self { checks: Vec::new() };
        for kind in checks {
            plan.push(kind);
        }
        plan
    }

    /// 클러스터, 서비스, 태스크 정의만 검사하는 최소 계획
    pub fn minimal() -> Self {
        Self::new([
            CheckKind::Cluster,
            CheckKind::Service,
            CheckKind::TaskDefinition,
        ])
    }

    /// 알려진 모든 체크를 포함하는 계획
    pub fn full() -> Self {
        Self::new(CheckKind::ALL)
    }

    /// 이름 목록에서 계획을 파싱합니다.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = names
            .into_iter()
            .map(|name| name.as_ref().parse::<CheckKind>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(kinds))
    }

    /// 계획 끝에 체크를 추가합니다. 이미 있으면 무시합니다.
    pub fn push(&mut self, kind: CheckKind) {
        if !self.checks.contains(&kind) {
            self.checks.push(kind);
        }
    }

    /// 체크를 추가한 계획을 반환합니다.
    pub fn with(mut self, kind: CheckKind) -> Self {
        self.push(kind);
        self
    }

    pub fn checks(&self) -> &[CheckKind] {
        &self.checks
    }

    pub fn contains(&self, kind: CheckKind) -> bool {
        self.checks.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckPlan {
    fn default() -> Self {
        Self::full()
    }
}
