//! site-roast: audit a web page and roast the results.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use site_roast::{AuditConfig, ReportOptions};
use site_roast_cli::{normalize_url, run, select_format, RunOptions};

#[derive(Parser)]
#[command(
    name = "site-roast",
    about = "Audit a web page across ten categories and roast the results",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// URL to audit (https:// is assumed when no scheme is given).
    url: Option<String>,

    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,

    /// Emit the report as Markdown.
    #[arg(long, visible_alias = "md")]
    markdown: bool,

    /// Plain professional comments instead of roasts.
    #[arg(long)]
    no_roast: bool,

    /// Include recommendations in the report.
    #[arg(short, long)]
    verbose: bool,

    /// Request timeout in seconds (env: SITE_ROAST_TIMEOUT).
    #[arg(long)]
    timeout: Option<u64>,

    /// User-Agent header to send (env: SITE_ROAST_USER_AGENT).
    #[arg(long)]
    user_agent: Option<String>,

    /// Write the report to a file. `.json` and `.md` pick the format.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable ANSI colours in terminal output.
    #[arg(long)]
    no_color: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   site-roast completions bash > ~/.local/share/bash-completion/completions/site-roast
    ///   site-roast completions zsh > ~/.zfunc/_site-roast
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "site-roast", &mut std::io::stdout());
        return Ok(());
    }

    let Some(raw_url) = cli.url.as_deref() else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a URL to audit is required",
            )
            .exit();
    };

    if let Err(e) = execute(&cli, raw_url).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn execute(cli: &Cli, raw_url: &str) -> anyhow::Result<()> {
    let url = normalize_url(raw_url)?;
    let config = AuditConfig::resolve(cli.timeout, cli.user_agent.as_deref())?;
    let format = select_format(cli.json, cli.markdown, cli.output.as_deref());

    let opts = RunOptions {
        url,
        format,
        report: ReportOptions {
            serious: cli.no_roast,
            verbose: cli.verbose,
            color: !cli.no_color && cli.output.is_none(),
        },
        config,
        output: cli.output.clone(),
    };
    tracing::debug!("Running {} audit of {}", opts.format, opts.url);
    run(&opts).await
}
