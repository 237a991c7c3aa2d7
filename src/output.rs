//! Result rendering: console, CSV, and JSON

use colored::Colorize;

use crate::types::{ScanResult, Status, TargetKind};

pub const CSV_HEADER: &str = "identifier,category,site,status,url,reason";

const INDENT: &str = "  ";

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Console,
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Console => write!(f, "console"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("invalid output format: {other}")),
        }
    }
}

/// Stateful renderer for a stream of scan results.
///
/// Render methods return strings rather than printing, so callers can route
/// lines through a progress bar or capture them in tests; the `print_*`
/// helpers write straight to stdout.
pub struct Printer {
    format: OutputFormat,
    show_url: bool,
    emitted: u64,
}

impl Printer {
    pub fn new(format: OutputFormat, show_url: bool) -> Self {
        Self {
            format,
            show_url,
            emitted: 0,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Opening framing: JSON array bracket or CSV header.
    pub fn render_start(&self) -> Option<String> {
        match self.format {
            OutputFormat::Console => None,
            OutputFormat::Csv => Some(CSV_HEADER.to_string()),
            OutputFormat::Json => Some("[".to_string()),
        }
    }

    /// Closing framing: the JSON array bracket.
    pub fn render_end(&self) -> Option<String> {
        match self.format {
            OutputFormat::Console | OutputFormat::Csv => None,
            OutputFormat::Json => Some("]".to_string()),
        }
    }

    /// Console-only category banner.
    pub fn render_category_header(&self, category: &str) -> Option<String> {
        match self.format {
            OutputFormat::Console => Some(
                format!("\n== {} SITES ==", category.to_uppercase())
                    .magenta()
                    .to_string(),
            ),
            _ => None,
        }
    }

    pub fn render_result(&mut self, result: &ScanResult) -> String {
        self.emitted += 1;
        match self.format {
            OutputFormat::Console => self.render_console(result),
            OutputFormat::Csv => render_csv_row(result),
            OutputFormat::Json => {
                let object = render_json_object(result);
                if self.emitted > 1 {
                    format!(",\n{object}")
                } else {
                    object
                }
            }
        }
    }

    fn render_console(&self, result: &ScanResult) -> String {
        let icon = match result.status {
            Status::Error => "[!]",
            Status::Taken if result.kind == TargetKind::Email => "[✔]",
            Status::Available if result.kind == TargetKind::Email => "[✘]",
            Status::Available => "[✔]",
            Status::Taken => "[✘]",
        };

        let url_display = if self.show_url {
            format!(" [{}]", result.url)
        } else {
            String::new()
        };
        let reason = if result.has_reason() {
            format!(" ({})", result.reason_text())
        } else {
            String::new()
        };

        let line = format!(
            "{INDENT}{icon} {site}{url_display} ({identifier}): {label}{reason}",
            site = result.site,
            identifier = result.identifier,
            label = result.status_label(),
        );

        // Green marks the outcome the user is hunting for: a free username,
        // or an email that is registered somewhere.
        let good = match result.kind {
            TargetKind::Username => result.status == Status::Available,
            TargetKind::Email => result.status == Status::Taken,
        };
        match result.status {
            Status::Error => line.yellow().to_string(),
            _ if good => line.green().to_string(),
            _ => line.red().to_string(),
        }
    }

    /// Convenience wrappers that print to stdout.
    pub fn print_start(&self) {
        if let Some(line) = self.render_start() {
            println!("{line}");
        }
    }

    pub fn print_result(&mut self, result: &ScanResult) {
        println!("{}", self.render_result(result));
    }

    pub fn print_end(&self) {
        if let Some(line) = self.render_end() {
            println!("{line}");
        }
    }
}

fn render_csv_row(result: &ScanResult) -> String {
    // Naive CSV; commas inside the reason would break the row shape.
    let reason = result.reason_text().replace(',', ";");
    format!(
        "{},{},{},{},{},{}",
        result.identifier,
        result.category,
        result.site,
        result.status_label(),
        result.url,
        reason
    )
}

fn render_json_object(result: &ScanResult) -> String {
    let identifier_key = match result.kind {
        TargetKind::Username => "username",
        TargetKind::Email => "email",
    };
    let object = serde_json::json!({
        identifier_key: result.identifier,
        "category": result.category,
        "site": result.site,
        "status": result.status_label(),
        "url": result.url,
        "reason": result.reason_text(),
    });
    let pretty = serde_json::to_string_pretty(&object)
        .unwrap_or_else(|_| "{}".to_string());
    indent_lines(&pretty, 1)
}

fn indent_lines(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_result(kind: TargetKind, status: Status) -> ScanResult {
        ScanResult {
            identifier: "john".to_string(),
            site: "github".to_string(),
            category: "dev".to_string(),
            kind,
            status,
            url: "https://github.com".to_string(),
            reason: None,
            checked_at: Utc::now(),
            duration: None,
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("console".parse::<OutputFormat>(), Ok(OutputFormat::Console));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_csv_framing_and_rows() {
        let mut printer = Printer::new(OutputFormat::Csv, false);
        assert_eq!(printer.render_start().as_deref(), Some(CSV_HEADER));
        assert!(printer.render_end().is_none());

        let row =
            printer.render_result(&sample_result(TargetKind::Username, Status::Taken));
        assert_eq!(row, "john,dev,github,Taken,https://github.com,");
    }

    #[test]
    fn test_csv_reason_commas_are_sanitized() {
        let mut printer = Printer::new(OutputFormat::Csv, false);
        let mut result = sample_result(TargetKind::Username, Status::Error);
        result.reason = Some("a, b, c".to_string());
        let row = printer.render_result(&result);
        assert_eq!(row.matches(',').count(), 5);
        assert!(row.contains("a; b; c"));
    }

    #[test]
    fn test_json_framing_and_comma_separation() {
        let mut printer = Printer::new(OutputFormat::Json, false);
        assert_eq!(printer.render_start().as_deref(), Some("["));

        let first =
            printer.render_result(&sample_result(TargetKind::Username, Status::Available));
        let second =
            printer.render_result(&sample_result(TargetKind::Username, Status::Taken));
        assert!(!first.starts_with(','));
        assert!(second.starts_with(",\n"));
        assert!(first.contains("\"username\": \"john\""));
        assert!(first.contains("\"status\": \"Available\""));

        assert_eq!(printer.render_end().as_deref(), Some("]"));
    }

    #[test]
    fn test_json_email_results_use_email_key() {
        let mut printer = Printer::new(OutputFormat::Json, false);
        let line = printer.render_result(&sample_result(TargetKind::Email, Status::Taken));
        assert!(line.contains("\"email\": \"john\""));
        assert!(line.contains("\"status\": \"Registered\""));
        assert!(!line.contains("\"username\""));
    }

    #[test]
    fn test_console_line_contains_site_and_label() {
        colored::control::set_override(false);
        let mut printer = Printer::new(OutputFormat::Console, false);
        let line =
            printer.render_result(&sample_result(TargetKind::Username, Status::Available));
        assert!(line.contains("[✔] github (john): Available"));
        colored::control::unset_override();
    }

    #[test]
    fn test_console_show_url_and_reason() {
        colored::control::set_override(false);
        let mut printer = Printer::new(OutputFormat::Console, true);
        let mut result = sample_result(TargetKind::Username, Status::Error);
        result.reason = Some("Connection timed out".to_string());
        let line = printer.render_result(&result);
        assert!(line.contains("[!] github [https://github.com] (john): Error (Connection timed out)"));
        colored::control::unset_override();
    }

    #[test]
    fn test_console_email_labels_invert_colors() {
        colored::control::set_override(false);
        let mut printer = Printer::new(OutputFormat::Console, false);
        let line = printer.render_result(&sample_result(TargetKind::Email, Status::Taken));
        assert!(line.contains("[✔] github (john): Registered"));
        colored::control::unset_override();
    }

    #[test]
    fn test_category_header_console_only() {
        let printer = Printer::new(OutputFormat::Console, false);
        let header = printer.render_category_header("dev").unwrap();
        assert!(header.contains("== DEV SITES =="));

        let printer = Printer::new(OutputFormat::Json, false);
        assert!(printer.render_category_header("dev").is_none());
    }
}
