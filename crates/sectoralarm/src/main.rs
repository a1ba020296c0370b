mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use sectoralarm_config::Overrides;
use sectoralarm_core::{Settings, Site, SiteConfig};

use crate::cli::{Cli, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sectoralarm", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to a panel
        cmd => {
            commands::preflight(&cmd)?;
            let (config, settings) = build_site_config(&cli.global)?;
            let site = Site::connect(config, settings).await?;

            tracing::debug!(command = ?cmd, site_id = site.site_id(), "dispatching command");
            commands::dispatch(cmd, &site).await
        }
    }
}

/// Resolve the active profile from the config file and CLI overrides.
fn build_site_config(global: &GlobalOpts) -> Result<(SiteConfig, Settings), CliError> {
    let config = sectoralarm_config::load_config()?;
    let overrides = Overrides {
        email: global.email.clone(),
        password: global.password.clone().map(SecretString::from),
        site_id: global.site_id.clone(),
        number_of_retries: global.retries,
        retry_delay_in_ms: global.retry_delay_ms,
        json_output: global.output.map(|o| o == OutputFormat::Json),
    };

    Ok(sectoralarm_config::resolve_profile(
        &config,
        global.profile.as_deref(),
        overrides,
    )?)
}
