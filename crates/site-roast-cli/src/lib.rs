//! Command-line front end for site-roast: argument handling, URL
//! normalisation, format selection and report output.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use url::Url;

use site_roast::{
    AuditConfig, Auditor, ReportFormat, ReportOptions, RoastError, RoastResult, WebsiteAudit,
};

/// Turn user input into an absolute http(s) URL.
///
/// Inputs without an `http://` or `https://` scheme get `https://`. The
/// result must parse and its host must contain a dot.
pub fn normalize_url(input: &str) -> RoastResult<String> {
    let trimmed = input.trim();
    let invalid = |reason: &str| RoastError::InvalidUrl {
        url: input.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("URL is empty"));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| invalid(&e.to_string()))?;
    match parsed.host_str() {
        Some(host) if host.contains('.') => Ok(parsed.to_string()),
        _ => Err(invalid(
            "expected a hostname like example.com (e.g. https://example.com)",
        )),
    }
}

/// Report format implied by an output file extension, if any.
pub fn detect_output_format(path: &Path) -> Option<ReportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(ReportFormat::Json),
        "md" | "markdown" => Some(ReportFormat::Markdown),
        _ => None,
    }
}

/// Pick the output format. A recognised output file extension wins over the
/// flags; `--json` wins over `--markdown`.
pub fn select_format(json: bool, markdown: bool, output: Option<&Path>) -> ReportFormat {
    if let Some(format) = output.and_then(detect_output_format) {
        return format;
    }
    if json {
        ReportFormat::Json
    } else if markdown {
        ReportFormat::Markdown
    } else {
        ReportFormat::Terminal
    }
}

/// Everything one invocation needs, already resolved.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    pub format: ReportFormat,
    pub report: ReportOptions,
    pub config: AuditConfig,
    pub output: Option<PathBuf>,
}

/// Audit, render and write the report.
pub async fn run(opts: &RunOptions) -> anyhow::Result<()> {
    let audit = audit_with_spinner(opts).await?;
    let rendered = site_roast::render(&audit, opts.format, opts.report)?;
    let mut stdout = std::io::stdout().lock();
    write_report(&rendered, opts.output.as_deref(), &mut stdout)
}

async fn audit_with_spinner(opts: &RunOptions) -> anyhow::Result<WebsiteAudit> {
    let show_spinner = opts.format == ReportFormat::Terminal
        && opts.output.is_none()
        && std::io::stderr().is_terminal();
    let pb = if show_spinner {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.set_message(format!("Roasting {}...", opts.url));
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let result = Auditor::new(opts.config.clone()).audit(&opts.url).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result.with_context(|| format!("Audit of {} failed", opts.url))
}

/// Write `report` to `output`, or to `stdout` when no path is given.
///
/// Writing to a file prints a confirmation line on `stdout` instead.
pub fn write_report(report: &str, output: Option<&Path>, stdout: &mut impl Write) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", report.len(), path.display());
            writeln!(stdout, "✅ Report saved to: {}", path.display())?;
        }
        None => {
            writeln!(stdout, "{report}")?;
        }
    }
    stdout.flush()?;
    Ok(())
}
