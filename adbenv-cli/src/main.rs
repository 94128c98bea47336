//! ADB & Fastboot environment installer CLI

use adbenv_lib::{
    open_terminal, Config, DownloadManager, InstallReport, InstallStatus, Installer,
    RegistryEnvStore, Result, UninstallReport,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Parser)]
#[command(name = "adb-env")]
#[command(about = "Install the Android platform tools and put them on your Path")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the per-user config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download, extract and register the platform tools
    Install {
        /// Don't draw a download progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Show whether the tools are installed and on Path
    Status,
    /// Remove the install directory and its Path entry
    Uninstall,
    /// Open a command prompt in the install directory
    OpenTerminal,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "adbenv_lib={},adbenv_cli={}",
            log_level, log_level
        ))
        .init();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let profile = Config::user_profile()?;

    match cli.command {
        Command::Install { no_progress } => {
            let source = DownloadManager::new(&config)?.with_progress(!no_progress);
            let installer = Installer::new(config, source, RegistryEnvStore::open()?);
            let report = installer.install(&profile).await?;
            print_install(&report);
        }
        Command::Status => {
            let installer = Installer::new(config, (), RegistryEnvStore::open()?);
            print_status(&installer.status(&profile)?);
        }
        Command::Uninstall => {
            let installer = Installer::new(config, (), RegistryEnvStore::open()?);
            print_uninstall(&installer.uninstall(&profile)?);
        }
        Command::OpenTerminal => {
            let target_dir = config.target_dir(&profile);
            if !target_dir.is_dir() {
                eprintln!(
                    "{} does not exist, run 'adb-env install' first.",
                    target_dir.display()
                );
                process::exit(1);
            }
            open_terminal(&target_dir)?;
        }
    }

    Ok(())
}

fn print_install(report: &InstallReport) {
    println!("Installed ADB and Fastboot into {}", report.target_dir.display());
    println!(
        "  archive:   {} bytes (sha256 {})",
        report.archive_bytes, report.archive_sha256
    );
    println!(
        "  extracted: {} files, {} directories",
        report.extracted.files, report.extracted.dirs
    );
    if report.path_updated {
        println!("  Path:      added {}", report.path_entry);
        println!();
        println!("Open a new command prompt to pick up the updated Path.");
    } else {
        println!("  Path:      already contains {}", report.path_entry);
    }
}

fn print_status(status: &InstallStatus) {
    println!("Install directory: {}", status.target_dir.display());
    if status.installed {
        println!("  installed: yes ({} files)", status.file_count);
    } else {
        println!("  installed: no");
    }
    println!("  on Path:   {}", if status.on_path { "yes" } else { "no" });
}

fn print_uninstall(report: &UninstallReport) {
    if report.removed_dir {
        println!("Removed {}", report.target_dir.display());
    } else {
        println!("{} was not installed", report.target_dir.display());
    }
    if report.path_updated {
        println!("Removed the install directory from Path");
    }
}
