//! 기능 플래그 -- 조건부 체크를 켜고 끄는 이름 집합

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// 서비스 디스커버리 체크를 활성화하는 기능 이름
pub const WITH_SERVICE_DISCOVERY: &str = "with_service_discovery";

/// 현재 실행에서 활성화된 기능 이름 집합
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    enabled: BTreeSet<String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기능을 활성화한 집합을 반환합니다.
    pub fn with(mut self, feature: impl Into<String>) -> Self {
        self.enable(feature);
        self
    }

    pub fn enable(&mut self, feature: impl Into<String>) {
        let feature = feature.into();
        let feature = feature.trim();
        if !feature.is_empty() {
            self.enabled.insert(feature.to_owned());
        }
    }

    pub fn is_enabled(&self, feature: &str) -> bool {
        self.enabled.contains(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for feature in iter {
            set.enable(feature);
        }
        set
    }
}
