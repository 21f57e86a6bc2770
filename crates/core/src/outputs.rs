//! 프로비저닝 출력 -- Terraform이 만든 리소스 식별자 맵
//!
//! [`ProvisioningOutputs`]는 실행마다 한 번 만들어지는 읽기 전용 맵입니다.
//! 다음 입력 형식을 지원합니다.
//!
//! - `terraform output -json` 문서: `{"key": {"value": "...", "type": "string", "sensitive": false}}`
//! - 평탄한 JSON 객체: `{"key": "value"}`
//!
//! 문자열이 아닌 스칼라(숫자, 불리언)는 JSON 텍스트로 저장하고,
//! 리스트/객체 값은 해당 키만 건너뜁니다.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SetupError;

/// 검증기가 읽는 출력 키
pub mod keys {
    pub const ECS_CLUSTER_NAME: &str = "ecs_cluster_name";
    pub const ECS_CLUSTER_ARN: &str = "ecs_cluster_arn";
    pub const ECS_SERVICE_NAME: &str = "ecs_service_name";
    pub const ECS_SERVICE_ARN: &str = "ecs_service_arn";
    pub const ECS_TASK_DEFINITION_ARN: &str = "ecs_task_definition_arn";
    pub const ALB_ARN: &str = "alb_arn";
    pub const ALB_TARGET_GROUP_NAME: &str = "alb_target_group_name";
    pub const ALB_TARGET_GROUP_ARN: &str = "alb_target_group_arn";
    pub const S3_LOGS_ARN: &str = "s3_logs_arn";
    pub const SERVICE_DISCOVERY_SERVICE_ID: &str = "service_discovery_service_id";
    pub const SERVICE_DISCOVERY_SERVICE_ARN: &str = "service_discovery_service_arn";
}

/// 프로비저닝 출력 맵
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningOutputs {
    values: BTreeMap<String, String>,
}

impl ProvisioningOutputs {
    /// 키-값 쌍에서 직접 만듭니다.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// JSON 문자열을 파싱합니다. Terraform 형식과 평탄한 형식을 모두 받습니다.
    pub fn parse_json(json: &str) -> Result<Self, SetupError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| SetupError::OutputsUnavailable(format!("invalid JSON: {e}")))?;

        let Value::Object(entries) = document else {
            return Err(SetupError::OutputsUnavailable(
                "outputs document must be a JSON object".to_owned(),
            ));
        };

        let mut values = BTreeMap::new();
        for (key, entry) in entries {
            // terraform output -json은 값을 {"value": ...}로 감쌉니다.
            let value = match entry {
                Value::Object(mut wrapped) if wrapped.contains_key("value") => {
                    wrapped.remove("value").unwrap_or(Value::Null)
                }
                other => other,
            };

            match value {
                Value::String(s) => {
                    values.insert(key, s);
                }
                Value::Number(n) => {
                    values.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    values.insert(key, b.to_string());
                }
                Value::Null => debug!(key = key.as_str(), "skipping null output"),
                Value::Array(_) | Value::Object(_) => {
                    warn!(key = key.as_str(), "skipping non-scalar output");
                }
            }
        }

        Ok(Self { values })
    }

    /// JSON 파일에서 로드합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SetupError::OutputsUnavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let outputs = Self::parse_json(&content)?;
        debug!(path = %path.display(), count = outputs.len(), "loaded provisioning outputs");
        Ok(outputs)
    }

    /// Terraform 작업 디렉토리에서 `terraform output -json`을 실행해 로드합니다.
    pub async fn from_terraform(
        terraform_bin: &str,
        working_dir: impl AsRef<Path>,
    ) -> Result<Self, SetupError> {
        let working_dir = working_dir.as_ref();
        let output = tokio::process::Command::new(terraform_bin)
            .arg("output")
            .arg("-json")
            .current_dir(working_dir)
            .output()
            .await
            .map_err(|e| {
                SetupError::OutputsUnavailable(format!("failed to run {terraform_bin}: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SetupError::OutputsUnavailable(format!(
                "{terraform_bin} output -json failed in {}: {}",
                working_dir.display(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_json(&stdout)
    }

    /// 출력값을 읽습니다. 없거나 비어 있으면 [`SetupError`]입니다.
    pub fn get(&self, key: &str) -> Result<&str, SetupError> {
        match self.values.get(key) {
            None => Err(SetupError::MissingOutput {
                key: key.to_owned(),
            }),
            Some(value) if value.is_empty() => Err(SetupError::EmptyOutput {
                key: key.to_owned(),
            }),
            Some(value) => Ok(value.as_str()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
