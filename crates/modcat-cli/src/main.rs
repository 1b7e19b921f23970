mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_CONFIG_ERROR, EXIT_FAILURE};
use modcat_core::ResolveOptions;
use modcat_schema::OsTag;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "modcat",
    version,
    about = "Resolve installable modules of release versions"
)]
struct Cli {
    /// Path to the provider config file (default: ~/.config/modcat/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the modules available for one or more release versions.
    Modules {
        /// Release versions to resolve.
        #[arg(required = true)]
        versions: Vec<String>,
        /// JSON file mapping each version to its download base URL.
        #[arg(long)]
        sources: PathBuf,
        /// Operating system to resolve for (win, mac, linux). Defaults to the host.
        #[arg(long)]
        os: Option<OsTag>,
        /// Use cached manifests only; never touch the network.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Download the catalog release index for an operating system.
    Refresh {
        /// Operating system to refresh (win, mac, linux). Defaults to the host.
        #[arg(long)]
        os: Option<OsTag>,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MODCAT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;

    let result = match cli.command {
        Commands::Modules {
            versions,
            sources,
            os,
            offline,
        } => commands::load_config(cli.config.as_deref()).and_then(|config| {
            commands::modules::run(
                &config,
                &versions,
                &sources,
                ResolveOptions::new(os.unwrap_or_else(OsTag::current), offline),
                json_output,
            )
        }),
        Commands::Refresh { os } => {
            commands::load_config(cli.config.as_deref()).and_then(|config| {
                commands::refresh::run(&config, os.unwrap_or_else(OsTag::current), json_output)
            })
        }
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config:") {
                EXIT_CONFIG_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
