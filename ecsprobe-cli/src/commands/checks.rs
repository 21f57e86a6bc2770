//! `ecsprobe checks` command handler

use std::io::Write;

use serde::Serialize;

use ecsprobe_core::types::{CheckKind, CheckPlan};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `checks` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&ChecksReport::build())
}

/// Catalog of known checks.
#[derive(Serialize)]
pub struct ChecksReport {
    pub checks: Vec<CheckEntry>,
}

#[derive(Serialize)]
pub struct CheckEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub output_keys: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_feature: Option<&'static str>,
    /// Part of the `--minimal` plan
    pub minimal: bool,
}

impl ChecksReport {
    pub fn build() -> Self {
        let minimal = CheckPlan::minimal();
        let checks = CheckKind::ALL
            .iter()
            .map(|kind| CheckEntry {
                name: kind.name(),
                description: kind.description(),
                output_keys: kind.output_keys().to_vec(),
                requires_feature: kind.required_feature(),
                minimal: minimal.contains(*kind),
            })
            .collect();
        Self { checks }
    }
}

impl Render for ChecksReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Checks ({}):", self.checks.len())?;
        for entry in &self.checks {
            writeln!(w)?;
            let mut header = format!("  {}", entry.name.bold());
            if entry.minimal {
                header.push_str(&format!(" {}", "[minimal]".cyan()));
            }
            if let Some(feature) = entry.requires_feature {
                header.push_str(&format!(" {}", format!("[requires {feature}]").yellow()));
            }
            writeln!(w, "{header}")?;
            writeln!(w, "    {}", entry.description)?;
            writeln!(w, "    outputs: {}", entry.output_keys.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_report_lists_every_check_in_order() {
        let report = ChecksReport::build();
        let names: Vec<_> = report.checks.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "cluster",
                "service",
                "task_definition",
                "load_balancer",
                "target_group",
                "logs_bucket",
                "service_discovery",
            ]
        );
    }

    #[test]
    fn test_checks_report_marks_gated_and_minimal() {
        let report = ChecksReport::build();
        let gated: Vec<_> = report
            .checks
            .iter()
            .filter(|c| c.requires_feature.is_some())
            .map(|c| c.name)
            .collect();
        assert_eq!(gated, vec!["service_discovery"]);

        let minimal = report.checks.iter().filter(|c| c.minimal).count();
        assert_eq!(minimal, 3);
    }

    #[test]
    fn test_checks_report_render_text() {
        let mut buffer = Vec::new();
        ChecksReport::build()
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Checks (7)"));
        assert!(output.contains("s3_logs_arn"));
        assert!(output.contains("with_service_discovery"));
    }

    #[test]
    fn test_checks_report_json_omits_absent_feature() {
        let json = serde_json::to_value(ChecksReport::build()).expect("serializable");
        let checks = json["checks"].as_array().expect("should be array");
        assert!(checks[0].get("requires_feature").is_none());
        assert_eq!(
            checks[6]["requires_feature"].as_str(),
            Some("with_service_discovery")
        );
    }
}
