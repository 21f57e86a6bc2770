//! `ecsprobe verify` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use ecsprobe_core::config::{OutputsConfig, ProbeConfig};
use ecsprobe_core::error::{ProbeError, SetupError};
use ecsprobe_core::outputs::ProvisioningOutputs;
use ecsprobe_core::report::{CheckOutcome, CheckStatus, RunReport};
use ecsprobe_core::types::CheckPlan;
use ecsprobe_verifier::{AwsClients, AwsSettings, VerificationContext, verify};

use crate::cli::VerifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `verify` command.
///
/// # Errors
///
/// Configuration and setup problems abort before any check runs. A run
/// with failed checks renders the report and then returns
/// [`CliError::ChecksFailed`].
pub async fn execute(
    args: VerifyArgs,
    mut config: ProbeConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let plan = config.verify.plan().map_err(ProbeError::from)?;
    let features = config.verify.feature_set();
    let source = describe_source(&config.outputs);

    info!(source = %source, checks = plan.len(), "loading provisioning outputs");
    let outputs = load_outputs(&config.outputs).await?;

    let sdk_config = AwsSettings::from_config(&config.aws).load().await?;
    let clients = AwsClients::from_sdk_config(&sdk_config);

    let ctx = VerificationContext::new(&outputs, &features, &clients)
        .with_plan(plan)
        .with_deadline(config.verify.deadline());
    let report = verify(&ctx).await?;

    let view = VerifyReport::new(source, report);
    writer.render(&view)?;

    if !view.success {
        return Err(CliError::ChecksFailed {
            failed: view.failed,
            total: view.outcomes.len(),
        });
    }
    Ok(())
}

/// Layer command-line flags over the loaded configuration.
fn apply_overrides(config: &mut ProbeConfig, args: &VerifyArgs) {
    if let Some(path) = &args.outputs {
        config.outputs.source = "file".to_owned();
        config.outputs.path = path.display().to_string();
    }
    if let Some(dir) = &args.terraform_dir {
        config.outputs.source = "terraform".to_owned();
        config.outputs.terraform_dir = dir.display().to_string();
    }

    if args.minimal {
        config.verify.checks = CheckPlan::minimal()
            .checks()
            .iter()
            .map(|kind| kind.name().to_owned())
            .collect();
    } else if !args.checks.is_empty() {
        config.verify.checks = args.checks.clone();
    }

    for feature in &args.features {
        if !config.verify.features.contains(feature) {
            config.verify.features.push(feature.clone());
        }
    }
    if let Some(secs) = args.deadline_secs {
        config.verify.deadline_secs = secs;
    }

    if let Some(region) = &args.region {
        config.aws.region = region.clone();
    }
    if let Some(profile) = &args.profile {
        config.aws.profile = profile.clone();
    }
    if let Some(endpoint_url) = &args.endpoint_url {
        config.aws.endpoint_url = endpoint_url.clone();
    }
}

async fn load_outputs(config: &OutputsConfig) -> Result<ProvisioningOutputs, SetupError> {
    match config.source.as_str() {
        "terraform" => {
            ProvisioningOutputs::from_terraform(&config.terraform_bin, &config.terraform_dir).await
        }
        _ => ProvisioningOutputs::from_file(&config.path).await,
    }
}

fn describe_source(config: &OutputsConfig) -> String {
    match config.source.as_str() {
        "terraform" => format!("terraform output ({})", config.terraform_dir),
        _ => config.path.clone(),
    }
}

/// Result of a verification run.
#[derive(Serialize)]
pub struct VerifyReport {
    /// Where the provisioning outputs came from
    pub outputs_source: String,
    pub success: bool,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub outcomes: Vec<CheckOutcome>,
}

impl VerifyReport {
    pub fn new(outputs_source: String, report: RunReport) -> Self {
        Self {
            outputs_source,
            success: report.is_success(),
            passed: report.passed(),
            failed: report.failed(),
            skipped: report.skipped(),
            outcomes: report.outcomes,
        }
    }
}

impl Render for VerifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Verification (outputs: {})", self.outputs_source.bold())?;
        writeln!(w)?;

        for outcome in &self.outcomes {
            let check = outcome.check.name();
            match outcome.status {
                CheckStatus::Passed => writeln!(
                    w,
                    "  {}  {:<18} {}ms",
                    "PASS".green().bold(),
                    check,
                    outcome.duration_ms
                )?,
                CheckStatus::Failed => {
                    let detail = outcome
                        .failure
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    writeln!(w, "  {}  {:<18} {}", "FAIL".red().bold(), check, detail.red())?;
                }
                CheckStatus::Skipped => writeln!(
                    w,
                    "  {}  {:<18} {}",
                    "SKIP".yellow().bold(),
                    check,
                    outcome.skip_reason.as_deref().unwrap_or_default().dimmed()
                )?,
            }
        }

        writeln!(w)?;
        let summary = format!(
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        );
        if self.success {
            writeln!(w, "  Result: {} ({summary})", "PASSED".green().bold())?;
        } else {
            writeln!(w, "  Result: {} ({summary})", "FAILED".red().bold())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use ecsprobe_core::report::CheckFailure;
    use ecsprobe_core::types::CheckKind;

    fn sample_report() -> RunReport {
        RunReport::new(vec![
            CheckOutcome::passed(CheckKind::Cluster, Duration::from_millis(12)),
            CheckOutcome::failed(
                CheckKind::LoadBalancer,
                CheckFailure::assertion("Expected 1 load balancer to be returned", "1", "0"),
                Duration::from_millis(30),
            ),
            CheckOutcome::skipped(
                CheckKind::ServiceDiscovery,
                "feature 'with_service_discovery' is not enabled",
            ),
        ])
    }

    #[test]
    fn test_apply_overrides_outputs_file() {
        let mut config = ProbeConfig::default();
        let args = VerifyArgs {
            outputs: Some(PathBuf::from("stack/outputs.json")),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.outputs.source, "file");
        assert_eq!(config.outputs.path, "stack/outputs.json");
    }

    #[test]
    fn test_apply_overrides_terraform_dir() {
        let mut config = ProbeConfig::default();
        let args = VerifyArgs {
            terraform_dir: Some(PathBuf::from("infra")),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.outputs.source, "terraform");
        assert_eq!(config.outputs.terraform_dir, "infra");
        assert_eq!(describe_source(&config.outputs), "terraform output (infra)");
    }

    #[test]
    fn test_apply_overrides_minimal_plan() {
        let mut config = ProbeConfig::default();
        let args = VerifyArgs {
            minimal: true,
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(
            config.verify.plan().expect("valid plan"),
            CheckPlan::minimal()
        );
    }

    #[test]
    fn test_apply_overrides_checks_and_features() {
        let mut config = ProbeConfig::default();
        config.verify.features = vec!["with_service_discovery".to_owned()];
        let args = VerifyArgs {
            checks: vec!["logs_bucket".to_owned()],
            features: vec![
                "with_service_discovery".to_owned(),
                "with_canary".to_owned(),
            ],
            deadline_secs: Some(45),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.verify.checks, vec!["logs_bucket"]);
        assert_eq!(
            config.verify.features,
            vec!["with_service_discovery", "with_canary"]
        );
        assert_eq!(config.verify.deadline(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_apply_overrides_aws() {
        let mut config = ProbeConfig::default();
        let args = VerifyArgs {
            region: Some("ap-northeast-2".to_owned()),
            profile: Some("prod".to_owned()),
            endpoint_url: Some("http://localhost:4566".to_owned()),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.aws.region(), Some("ap-northeast-2"));
        assert_eq!(config.aws.profile(), Some("prod"));
        assert_eq!(config.aws.endpoint_url(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_apply_overrides_unknown_check_fails_validation() {
        let mut config = ProbeConfig::default();
        let args = VerifyArgs {
            checks: vec!["database".to_owned()],
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        let err: CliError = config.validate().unwrap_err().into();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_missing_outputs_file_is_setup_error() {
        let config = OutputsConfig {
            path: "/nonexistent/outputs.json".to_owned(),
            ..OutputsConfig::default()
        };
        let err = load_outputs(&config).await.unwrap_err();
        assert!(matches!(err, SetupError::OutputsUnavailable(_)));
    }

    #[test]
    fn test_verify_report_render_text() {
        let view = VerifyReport::new("outputs.json".to_owned(), sample_report());
        let mut buffer = Vec::new();
        view.render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("outputs.json"));
        assert!(output.contains("PASS"));
        assert!(output.contains("FAIL"));
        assert!(output.contains("SKIP"));
        assert!(output.contains("Expected 1 load balancer to be returned"));
        assert!(output.contains("with_service_discovery"));
        assert!(output.contains("FAILED"));
    }

    #[test]
    fn test_verify_report_counts() {
        let view = VerifyReport::new("outputs.json".to_owned(), sample_report());
        assert!(!view.success);
        assert_eq!((view.passed, view.failed, view.skipped), (1, 1, 1));
    }

    #[test]
    fn test_verify_report_json_serialization() {
        let view = VerifyReport::new("outputs.json".to_owned(), sample_report());
        let json = serde_json::to_string(&view).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");

        assert_eq!(parsed["success"].as_bool(), Some(false));
        assert_eq!(parsed["failed"].as_u64(), Some(1));
        let outcomes = parsed["outcomes"].as_array().expect("should be array");
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0]["check"].as_str(), Some("cluster"));
        assert_eq!(outcomes[1]["failure"]["kind"].as_str(), Some("assertion"));
    }
}
