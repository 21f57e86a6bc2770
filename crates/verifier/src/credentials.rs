//! Credential and region resolution for the AWS clients.
//!
//! [`AwsSettings::load`] turns an explicit [`CredentialSource`] into an
//! `SdkConfig`. It resolves credentials eagerly so an unusable environment
//! fails the run as a [`SetupError`] before any check starts.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ecs::error::DisplayErrorContext;
use tracing::{debug, info};

use ecsprobe_core::config::AwsConfig;
use ecsprobe_core::error::SetupError;

/// Where the clients get their credentials from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// The SDK default chain: environment, shared profile files, SSO,
    /// web identity, container and instance metadata.
    Ambient {
        /// Named profile in the shared config files.
        profile: Option<String>,
    },
    /// Fixed keys, mainly for local endpoints and tests.
    Static {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ambient { profile } => f
                .debug_struct("Ambient")
                .field("profile", profile)
                .finish(),
            Self::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .finish_non_exhaustive(),
        }
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Ambient { profile: None }
    }
}

/// Everything needed to build the SDK configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    pub credentials: CredentialSource,
    /// Overrides the ambient region.
    pub region: Option<String>,
    /// Sends every request to this endpoint (LocalStack and similar).
    pub endpoint_url: Option<String>,
}

impl AwsSettings {
    /// Builds settings from the `[aws]` config section.
    pub fn from_config(config: &AwsConfig) -> Self {
        Self {
            credentials: CredentialSource::Ambient {
                profile: config.profile().map(str::to_owned),
            },
            region: config.region().map(str::to_owned),
            endpoint_url: config.endpoint_url().map(str::to_owned),
        }
    }

    /// Loads the SDK configuration and verifies credentials resolve.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Credentials`] when no region is configured or
    /// the credential provider cannot produce credentials.
    pub async fn load(&self) -> Result<SdkConfig, SetupError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }
        match &self.credentials {
            CredentialSource::Ambient {
                profile: Some(profile),
            } => {
                loader = loader.profile_name(profile);
            }
            CredentialSource::Ambient { profile: None } => {}
            CredentialSource::Static {
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id.clone(),
                    secret_access_key.clone(),
                    session_token.clone(),
                    None,
                    "ecsprobe-static",
                ));
            }
        }

        let sdk_config = loader.load().await;

        let region = sdk_config.region().ok_or_else(|| {
            SetupError::Credentials(
                "no AWS region configured (set AWS_REGION, a profile region, or aws.region)"
                    .to_owned(),
            )
        })?;

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| SetupError::Credentials("no credentials provider available".to_owned()))?;

        let credentials = provider
            .provide_credentials()
            .await
            .map_err(|e| SetupError::Credentials(DisplayErrorContext(&e).to_string()))?;

        debug!(
            access_key_id = credentials.access_key_id(),
            "resolved AWS credentials"
        );
        info!(region = %region, endpoint = ?self.endpoint_url, "AWS configuration loaded");

        Ok(sdk_config)
    }
}
