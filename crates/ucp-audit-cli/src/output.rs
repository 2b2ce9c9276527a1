//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use ucp_audit_domain::AuditReport;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an audit report.
    pub fn format_report(&self, report: &AuditReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(self.format_report_quiet(report)),
        }
    }

    /// Format the records as a JSON array.
    fn format_report_json(&self, report: &AuditReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report.records())?)
    }

    /// Format the report as a table followed by the two summary metrics.
    fn format_report_table(&self, report: &AuditReport) -> String {
        let mut output = String::new();

        if report.is_empty() {
            output.push_str(&self.colorize("The model returned no checks.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Field", "Requirement", "Found Value", "Status", "UCP Ref"]);

            for row in report.rows() {
                let record = row.record;
                builder.push_record([
                    record.category.as_str(),
                    &record.field,
                    &record.requirement,
                    &record.found_value,
                    &row.decorated_status(),
                    &record.ucp_ref,
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            output.push_str(&table.to_string());
        }

        output.push_str("\n\n");
        output.push_str(&self.metrics(report));
        output
    }

    /// Format in quiet mode: `<total> <discrepancies>`.
    fn format_report_quiet(&self, report: &AuditReport) -> String {
        let summary = report.summary();
        format!("{} {}", summary.total_checks, summary.discrepancies)
    }

    fn metrics(&self, report: &AuditReport) -> String {
        let summary = report.summary();
        let color = if summary.discrepancies > 0 { "red" } else { "green" };
        format!(
            "Total Checks: {}\n{}",
            summary.total_checks,
            self.colorize(&format!("Discrepancies: {}", summary.discrepancies), color)
        )
    }

    /// Format the raw response log.
    pub fn raw_response(&self, raw: &str) -> String {
        format!("{}\n{}", self.colorize("Raw response log:", "cyan"), raw)
    }

    /// Format the model list, marking the default.
    pub fn models(&self, models: &[String], default: &str) -> String {
        models
            .iter()
            .map(|model| {
                if model == default {
                    format!("* {}", self.colorize(model, "green"))
                } else {
                    format!("  {}", model)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
