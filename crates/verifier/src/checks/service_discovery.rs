//! Cloud Map service registration check.

use ecsprobe_core::report::CheckFailure;

use super::{NONE_OBSERVED, expect_eq};
use crate::client::ServiceDiscoveryApi;

/// The registry entry `id` exists with the expected ARN and ID.
pub async fn check_service<D: ServiceDiscoveryApi>(
    registry: &D,
    id: &str,
    arn: &str,
) -> Result<(), CheckFailure> {
    let service = registry.get_service(id).await?;
    let (observed_arn, observed_id) = service
        .as_ref()
        .map_or((NONE_OBSERVED, NONE_OBSERVED), |s| {
            (s.arn.as_str(), s.id.as_str())
        });
    expect_eq(
        "Expected service discovery service ARN to match",
        arn,
        observed_arn,
    )?;
    expect_eq(
        "Expected service discovery service ID to match",
        id,
        observed_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockCloud, RegistryServiceInfo};

    fn registry(id: &str, arn: &str) -> MockCloud {
        MockCloud {
            registry_services: vec![RegistryServiceInfo {
                id: id.to_owned(),
                arn: arn.to_owned(),
                name: "app".to_owned(),
            }],
            ..MockCloud::new()
        }
    }

    #[tokio::test]
    async fn passes_when_id_and_arn_match() {
        let cloud = registry("srv-abc", "arn:aws:servicediscovery:us-east-1:123:service/srv-abc");
        check_service(
            &cloud,
            "srv-abc",
            "arn:aws:servicediscovery:us-east-1:123:service/srv-abc",
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn arn_mismatch_is_reported_first() {
        let cloud = registry("srv-abc", "arn:other");
        let err = check_service(&cloud, "srv-abc", "arn:expected")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckFailure::assertion(
                "Expected service discovery service ARN to match",
                "arn:expected",
                "arn:other"
            )
        );
    }

    #[tokio::test]
    async fn id_mismatch_after_matching_arn() {
        let cloud = MockCloud {
            unfiltered: true,
            ..registry("srv-old", "arn:expected")
        };
        let err = check_service(&cloud, "srv-abc", "arn:expected")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckFailure::assertion(
                "Expected service discovery service ID to match",
                "srv-abc",
                "srv-old"
            )
        );
    }

    #[tokio::test]
    async fn unknown_service_is_assertion() {
        let err = check_service(&MockCloud::new(), "srv-missing", "arn:x")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckFailure::Assertion { ref observed, .. } if observed == "<none>"));
    }
}
