//! 실행 보고서 -- 체크별 결과와 집계
//!
//! 한 번의 검증 실행은 [`RunReport`]를 만들고, 그 안의 각 [`CheckOutcome`]은
//! 통과/실패/건너뜀 중 하나입니다. 실패는 [`CheckFailure`]로 원인을 구분합니다.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::CheckKind;

/// 체크 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// 체크 실패 원인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckFailure {
    /// API 호출 자체가 실패 (네트워크, 인증, 스로틀링, not-found 등)
    Transport {
        /// 실패한 API 작업 이름 (예: `DescribeClusters`)
        operation: String,
        /// SDK 에러 원문
        detail: String,
    },
    /// API 호출은 성공했지만 값이 기대와 다름
    Assertion {
        message: String,
        expected: String,
        observed: String,
    },
}

impl CheckFailure {
    pub fn transport(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        observed: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            message: message.into(),
            expected: expected.into(),
            observed: observed.into(),
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { operation, detail } => {
                write!(f, "{operation} failed: {detail}")
            }
            Self::Assertion {
                message,
                expected,
                observed,
            } => write!(f, "{message}: expected '{expected}', observed '{observed}'"),
        }
    }
}

/// 단일 체크 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
    /// 건너뛴 이유 (기능 비활성화 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub duration_ms: u64,
}

impl CheckOutcome {
    pub fn passed(check: CheckKind, elapsed: Duration) -> Self {
        Self {
            check,
            status: CheckStatus::Passed,
            failure: None,
            skip_reason: None,
            duration_ms: millis(elapsed),
        }
    }

    pub fn failed(check: CheckKind, failure: CheckFailure, elapsed: Duration) -> Self {
        Self {
            check,
            status: CheckStatus::Failed,
            failure: Some(failure),
            skip_reason: None,
            duration_ms: millis(elapsed),
        }
    }

    pub fn skipped(check: CheckKind, reason: impl Into<String>) -> Self {
        Self {
            check,
            status: CheckStatus::Skipped,
            failure: None,
            skip_reason: Some(reason.into()),
            duration_ms: 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == CheckStatus::Failed
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// 한 번의 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<CheckOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(CheckStatus::Skipped)
    }

    /// 실행된 (건너뛰지 않은) 체크가 모두 통과했는지 여부
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// 특정 체크의 결과를 찾습니다.
    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.check == check)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
