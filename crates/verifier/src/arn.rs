//! ARN helpers.

use ecsprobe_core::error::SetupError;
use ecsprobe_core::outputs::keys;

/// Zero-based position of the resource segment in a colon-delimited ARN.
const RESOURCE_SEGMENT: usize = 5;

/// Derives an S3 bucket name from its ARN.
///
/// `arn:aws:s3:::my-logs-bucket` splits on `:` into
/// `["arn", "aws", "s3", "", "", "my-logs-bucket"]`; the bucket name is
/// segment 5.
pub fn bucket_name_from_arn(arn: &str) -> Result<&str, SetupError> {
    match arn.split(':').nth(RESOURCE_SEGMENT) {
        Some(name) if !name.is_empty() => Ok(name),
        Some(_) => Err(malformed(arn, "bucket name segment is empty")),
        None => Err(malformed(
            arn,
            "expected at least 6 colon-separated segments",
        )),
    }
}

fn malformed(arn: &str, reason: &str) -> SetupError {
    SetupError::MalformedOutput {
        key: keys::S3_LOGS_ARN.to_owned(),
        reason: format!("'{arn}': {reason}"),
    }
}
