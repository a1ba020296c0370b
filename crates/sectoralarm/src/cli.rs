//! Clap derive structures for the `sectoralarm` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sectoralarm -- check and control a Sector Alarm panel
#[derive(Debug, Parser)]
#[command(
    name = "sectoralarm",
    version,
    about = "Check and control Sector Alarm panels from the command line",
    long_about = "Talks to the same web endpoints as the Sector Alarm web app:\n\
        read panel status, history, temperatures and locks, and arm, disarm,\n\
        lock or unlock with your panel code.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "SECTORALARM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Account e-mail (overrides profile)
    #[arg(long, env = "SECTORALARM_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password (overrides profile)
    #[arg(long, env = "SECTORALARM_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Panel identifier (overrides profile)
    #[arg(long, env = "SECTORALARM_SITE_ID", global = true)]
    pub site_id: Option<String>,

    /// Extra attempts after an expired session (0 = single attempt)
    #[arg(long, env = "SECTORALARM_RETRIES", global = true)]
    pub retries: Option<u32>,

    /// Pause between attempts, in milliseconds
    #[arg(long, env = "SECTORALARM_RETRY_DELAY_MS", global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Output format (defaults to the config file's choice, else table)
    #[arg(long, short = 'o', env = "SECTORALARM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Compact JSON, one document per result
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what the site supports
    Info,

    /// Show arming state, last interaction and locks
    #[command(alias = "st")]
    Status,

    /// Show recent panel events
    #[command(alias = "log")]
    History {
        /// Number of events to show
        #[arg(long, short = 'n')]
        top: Option<usize>,
    },

    /// Show temperature sensors
    #[command(alias = "temps")]
    Temperatures {
        /// Only the sensor with this serial
        #[arg(long)]
        id: Option<String>,
    },

    /// Show smart locks
    Locks {
        /// Only the lock with this serial
        #[arg(long)]
        id: Option<String>,
    },

    /// Fully arm the panel
    Arm(CodeArgs),

    /// Arm the panel in partial (home) mode
    PartialArm(CodeArgs),

    /// Arm the annex
    AnnexArm(CodeArgs),

    /// Disarm the panel
    Disarm(CodeArgs),

    /// Disarm the annex
    AnnexDisarm(CodeArgs),

    /// Lock a smart lock
    Lock(LockArgs),

    /// Unlock a smart lock
    Unlock(LockArgs),

    /// Send a raw panel command (Disarm, Total, Partial, ArmAnnex, DisarmAnnex)
    Act {
        /// Command keyword, case-sensitive
        command: String,

        #[command(flatten)]
        code: CodeArgs,
    },

    /// Poll the panel and print every arming state change
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,
    },

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CodeArgs {
    /// Panel code
    #[arg(long, env = "SECTORALARM_CODE", hide_env_values = true)]
    pub code: String,
}

#[derive(Debug, Args)]
pub struct LockArgs {
    /// Lock serial (see `sectoralarm locks`)
    #[arg(long)]
    pub lock_id: String,

    #[command(flatten)]
    pub code: CodeArgs,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
