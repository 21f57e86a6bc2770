//! 에러 타입 -- 도메인별 에러 정의
//!
//! - [`ConfigError`]: 설정 파일 로딩/검증 실패
//! - [`SetupError`]: 검증 실행 전 준비 단계 실패 (출력값 누락, 자격 증명 실패).
//!   실행 전체에 치명적이며, 이 에러가 발생하면 어떤 체크도 실행되지 않습니다.
//!
//! 개별 체크의 실패(API 에러, 값 불일치)는 에러가 아니라
//! [`CheckFailure`](crate::report::CheckFailure)로 보고서에 기록됩니다.

/// ecsprobe 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 실행 준비 에러
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 실행 준비 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// 필요한 프로비저닝 출력값이 없음
    #[error("required provisioning output '{key}' is missing")]
    MissingOutput { key: String },

    /// 프로비저닝 출력값이 빈 문자열
    #[error("provisioning output '{key}' is empty")]
    EmptyOutput { key: String },

    /// 출력값 형식이 기대와 다름 (예: 세그먼트가 부족한 ARN)
    #[error("provisioning output '{key}' is malformed: {reason}")]
    MalformedOutput { key: String, reason: String },

    /// 출력값 문서를 읽거나 해석할 수 없음
    #[error("provisioning outputs unavailable: {0}")]
    OutputsUnavailable(String),

    /// 자격 증명 또는 리전 해석 실패
    #[error("credentials unresolvable: {0}")]
    Credentials(String),
}
