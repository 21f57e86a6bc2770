//! ecsprobe 공통 크레이트
//!
//! 검증기와 CLI가 함께 쓰는 에러, 설정, 프로비저닝 출력, 기능 플래그,
//! 체크 종류와 실행 보고서 타입을 제공합니다.

pub mod config;
pub mod error;
pub mod features;
pub mod metrics;
pub mod outputs;
pub mod report;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, ProbeError, SetupError};

// 설정
pub use config::ProbeConfig;

// 입력
pub use features::FeatureSet;
pub use outputs::ProvisioningOutputs;

// 보고서
pub use report::{CheckFailure, CheckOutcome, CheckStatus, RunReport};

// 도메인 타입
pub use types::{CheckKind, CheckPlan};
