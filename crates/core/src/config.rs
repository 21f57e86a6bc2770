//! 설정 관리 -- ecsprobe.toml 파싱 및 런타임 설정
//!
//! [`ProbeConfig`]는 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`ECSPROBE_AWS_REGION=us-east-1` 형식)
//! 3. 설정 파일 (`ecsprobe.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), ecsprobe_core::error::ProbeError> {
//! use ecsprobe_core::config::ProbeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ProbeConfig::load("ecsprobe.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ProbeConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ProbeError};
use crate::features::FeatureSet;
use crate::types::{CheckKind, CheckPlan};

/// ecsprobe 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// AWS 클라이언트 설정
    #[serde(default)]
    pub aws: AwsConfig,
    /// 프로비저닝 출력 소스 설정
    #[serde(default)]
    pub outputs: OutputsConfig,
    /// 검증 설정
    #[serde(default)]
    pub verify: VerifyConfig,
}

impl ProbeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 있으면 [`load`](Self::load)와 같고, 없으면 기본값에 환경변수를 적용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        match Self::load(path.as_ref()).await {
            Err(ProbeError::Config(ConfigError::FileNotFound { .. })) => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProbeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ProbeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ProbeError> {
        toml::from_str(toml_str).map_err(|e| {
            ProbeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `ECSPROBE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "ECSPROBE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "ECSPROBE_GENERAL_LOG_FORMAT");

        // AWS
        override_string(&mut self.aws.region, "ECSPROBE_AWS_REGION");
        override_string(&mut self.aws.profile, "ECSPROBE_AWS_PROFILE");
        override_string(&mut self.aws.endpoint_url, "ECSPROBE_AWS_ENDPOINT_URL");

        // Outputs
        override_string(&mut self.outputs.source, "ECSPROBE_OUTPUTS_SOURCE");
        override_string(&mut self.outputs.path, "ECSPROBE_OUTPUTS_PATH");
        override_string(
            &mut self.outputs.terraform_dir,
            "ECSPROBE_OUTPUTS_TERRAFORM_DIR",
        );
        override_string(
            &mut self.outputs.terraform_bin,
            "ECSPROBE_OUTPUTS_TERRAFORM_BIN",
        );

        // Verify
        override_csv(&mut self.verify.checks, "ECSPROBE_VERIFY_CHECKS");
        override_csv(&mut self.verify.features, "ECSPROBE_VERIFY_FEATURES");
        override_u64(
            &mut self.verify.deadline_secs,
            "ECSPROBE_VERIFY_DEADLINE_SECS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ProbeError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        let valid_sources = ["file", "terraform"];
        if !valid_sources.contains(&self.outputs.source.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "outputs.source".to_owned(),
                reason: format!("must be one of: {}", valid_sources.join(", ")),
            }
            .into());
        }

        if self.outputs.source == "file" && self.outputs.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "outputs.path".to_owned(),
                reason: "path must not be empty when source is 'file'".to_owned(),
            }
            .into());
        }

        if self.verify.checks.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "verify.checks".to_owned(),
                reason: "at least one check must be configured".to_owned(),
            }
            .into());
        }

        // 알 수 없는 체크 이름은 필드명을 붙여 다시 보고
        self.verify.plan().map_err(|e| match e {
            ConfigError::InvalidValue { reason, .. } => ConfigError::InvalidValue {
                field: "verify.checks".to_owned(),
                reason,
            },
            other => other,
        })?;

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// AWS 클라이언트 설정
///
/// 빈 문자열은 "지정 안 함"을 뜻하며, 이 경우 환경/프로파일 기본 체인을 따릅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// 리전 (예: `us-east-1`)
    pub region: String,
    /// 공유 설정 파일의 프로파일 이름
    pub profile: String,
    /// 엔드포인트 오버라이드 (LocalStack 등)
    pub endpoint_url: String,
}

impl AwsConfig {
    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    pub fn profile(&self) -> Option<&str> {
        non_empty(&self.profile)
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        non_empty(&self.endpoint_url)
    }
}

/// 프로비저닝 출력 소스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputsConfig {
    /// 소스 종류 (file, terraform)
    pub source: String,
    /// `source = "file"`일 때 읽을 JSON 파일
    pub path: String,
    /// `source = "terraform"`일 때 `terraform output -json`을 실행할 디렉토리
    pub terraform_dir: String,
    /// terraform 실행 파일
    pub terraform_bin: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            source: "file".to_owned(),
            path: "outputs.json".to_owned(),
            terraform_dir: ".".to_owned(),
            terraform_bin: "terraform".to_owned(),
        }
    }
}

/// 검증 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// 실행할 체크 이름 (순서대로)
    pub checks: Vec<String>,
    /// 활성화된 기능 이름
    pub features: Vec<String>,
    /// 실행 전체 마감 시간 (초, 0이면 제한 없음)
    pub deadline_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            checks: CheckKind::ALL.iter().map(|k| k.name().to_owned()).collect(),
            features: Vec::new(),
            deadline_secs: 0,
        }
    }
}

impl VerifyConfig {
    /// 설정된 체크 이름으로 실행 계획을 만듭니다.
    pub fn plan(&self) -> Result<CheckPlan, ConfigError> {
        CheckPlan::from_names(&self.checks)
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.features.iter().cloned().collect()
    }

    pub fn deadline(&self) -> Option<std::time::Duration> {
        (self.deadline_secs > 0).then(|| std::time::Duration::from_secs(self.deadline_secs))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
