//! Logs bucket check.

use ecsprobe_core::report::CheckFailure;

use crate::client::S3Api;

/// Some bucket visible to the credentials is named `bucket_name`.
pub async fn check_logs_bucket<S: S3Api>(s3: &S, bucket_name: &str) -> Result<(), CheckFailure> {
    let buckets = s3.list_buckets().await?;
    if buckets.iter().any(|bucket| bucket.name == bucket_name) {
        return Ok(());
    }
    Err(CheckFailure::assertion(
        "S3 Logs Bucket not found",
        bucket_name,
        format!("{} buckets listed without a match", buckets.len()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BucketInfo, MockCloud};

    fn bucket(name: &str) -> BucketInfo {
        BucketInfo {
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn finds_bucket_among_many() {
        let cloud = MockCloud {
            buckets: vec![bucket("a"), bucket("my-logs-bucket"), bucket("b")],
            ..MockCloud::new()
        };
        check_logs_bucket(&cloud, "my-logs-bucket").await.unwrap();
    }

    #[tokio::test]
    async fn missing_bucket_is_assertion() {
        let cloud = MockCloud {
            buckets: vec![bucket("a")],
            ..MockCloud::new()
        };
        let err = check_logs_bucket(&cloud, "my-logs-bucket")
            .await
            .unwrap_err();
        match err {
            CheckFailure::Assertion {
                message, expected, ..
            } => {
                assert_eq!(message, "S3 Logs Bucket not found");
                assert_eq!(expected, "my-logs-bucket");
            }
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }
}
