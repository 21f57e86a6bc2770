//! 메트릭 상수 및 설명 등록
//!
//! 검증기가 `metrics::counter!()`, `metrics::histogram!()` 매크로로 기록하는
//! 메트릭 이름을 중앙에서 정의합니다. 레코더가 설치되지 않으면 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `ecsprobe_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 체크 이름 레이블 키 (cluster, service, ...)
pub const LABEL_CHECK: &str = "check";

/// 결과 레이블 키 (passed, failed, skipped)
pub const LABEL_RESULT: &str = "result";

// ─── 검증기 메트릭 ──────────────────────────────────────────────────

/// 체크 결과 수 (counter, label: check, result)
pub const CHECKS_TOTAL: &str = "ecsprobe_checks_total";

/// 체크 소요 시간 (histogram, 초, label: check)
pub const CHECK_DURATION_SECONDS: &str = "ecsprobe_check_duration_seconds";

/// 클라우드 API 호출 실패 수 (counter, label: check)
pub const CLOUD_API_ERRORS_TOTAL: &str = "ecsprobe_cloud_api_errors_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(CHECKS_TOTAL, "Number of existence checks by result");
    describe_histogram!(
        CHECK_DURATION_SECONDS,
        "Time spent executing a single existence check in seconds"
    );
    describe_counter!(
        CLOUD_API_ERRORS_TOTAL,
        "Number of cloud API calls that returned an error"
    );
}
