//! ecsprobe-verifier: existence checks for a deployed ECS stack.
//!
//! Reads provisioning outputs, issues one read-only describe call per
//! check and compares what the cloud reports against what provisioning
//! recorded.
//!
//! # Module Structure
//!
//! - [`error`]: Cloud call errors (`CloudError`)
//! - [`client`]: Cloud API abstraction (`EcsApi`, `ElbApi`, `S3Api`, `ServiceDiscoveryApi`, `CloudClients`)
//! - [`aws`]: AWS SDK implementations (`AwsClients`)
//! - [`credentials`]: Credential and region resolution (`CredentialSource`, `AwsSettings`)
//! - [`context`]: Run inputs (`VerificationContext`)
//! - [`arn`]: ARN helpers
//! - [`checks`]: The individual checks (`CheckInput`)
//! - [`verifier`]: Run orchestration (`verify`)
//!
//! # Architecture
//!
//! ```text
//! ProvisioningOutputs + FeatureSet + CheckPlan
//!                          |
//!                 resolve (SetupError aborts)
//!                          |
//!              CheckInput.execute() per check
//!                          |
//!                      RunReport
//! ```

pub mod arn;
pub mod aws;
pub mod checks;
pub mod client;
pub mod context;
pub mod credentials;
pub mod error;
pub mod verifier;

// --- Public API Re-exports ---

// Orchestration
pub use verifier::verify;

// Context
pub use context::{FeaturePredicate, OutputSource, VerificationContext};

// Cloud API
pub use aws::AwsClients;
pub use client::{ClientSet, CloudClients, EcsApi, ElbApi, S3Api, ServiceDiscoveryApi};

// Credentials
pub use credentials::{AwsSettings, CredentialSource};

// Error
pub use error::CloudError;

// Checks
pub use checks::CheckInput;
