// Copyright 2026 campusdl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use campusdl::cli;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "campusdl",
    about = "campusdl — course resource downloader for SAML-federated Moodle portals",
    version,
    after_help = "Run 'campusdl <command> --help' for details on each command.\nCredentials may also come from CAMPUSDL_USERNAME / CAMPUSDL_PASSWORD."
)]
struct Cli {
    /// Portal username (or CAMPUSDL_USERNAME)
    #[arg(long, short = 'u', global = true)]
    username: Option<String>,

    /// Portal password (or CAMPUSDL_PASSWORD)
    #[arg(long, short = 'p', global = true)]
    password: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long, global = true)]
    password_stdin: bool,

    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the courses on the portal dashboard
    Courses,
    /// List a course's downloadable resources
    Resources {
        /// Course to inspect (dashboard id or course code, e.g. SOEN-363)
        #[arg(long)]
        course: String,
    },
    /// Download course resources
    Download {
        /// Course to download from (dashboard id or course code)
        #[arg(long)]
        course: String,
        /// Download only this resource id
        #[arg(long)]
        resource: Option<u64>,
        /// Target directory (created if absent)
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Maximum concurrent downloads
        #[arg(long, default_value = "4")]
        jobs: usize,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

async fn dispatch(
    command: Commands,
    username: Option<String>,
    password: Option<String>,
    password_stdin: bool,
) -> Result<()> {
    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "campusdl", &mut std::io::stdout());
            Ok(())
        }
        Commands::Courses => {
            let creds = cli::resolve_credentials(username, password, password_stdin)?;
            cli::courses_cmd::run(&creds).await
        }
        Commands::Resources { course } => {
            let creds = cli::resolve_credentials(username, password, password_stdin)?;
            cli::resources_cmd::run(&creds, &course).await
        }
        Commands::Download {
            course,
            resource,
            out,
            jobs,
        } => {
            let creds = cli::resolve_credentials(username, password, password_stdin)?;
            cli::download_cmd::run(&creds, &course, resource, &out, jobs).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("CAMPUSDL_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("CAMPUSDL_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("CAMPUSDL_NO_COLOR", "1");
    }

    let directive = if cli.verbose {
        "campusdl=debug"
    } else {
        "campusdl=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = dispatch(cli.command, cli.username, cli.password, cli.password_stdin).await;

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
