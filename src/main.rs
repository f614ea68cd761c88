// src/main.rs

use anyhow::{Context, Result};
use aptshim::config::ToolPaths;
use aptshim::tools::{AptGet, Dpkg};
use aptshim::{AptConfig, Resolver};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "aptshim")]
#[command(author, version, about = "Convenience layer over apt-get, dpkg and apt-config", long_about = None)]
struct Cli {
    /// apt-config binary used to discover paths
    #[arg(long, global = true, default_value = "apt-config")]
    apt_config: PathBuf,

    /// apt-get binary
    #[arg(long, global = true, default_value = "apt-get")]
    apt_get: PathBuf,

    /// dpkg binary
    #[arg(long, global = true, default_value = "dpkg")]
    dpkg: PathBuf,

    /// apt-key script scraped for its trusted parts directory
    #[arg(long, global = true, default_value = "/usr/bin/apt-key")]
    apt_key: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn tool_paths(&self) -> ToolPaths {
        ToolPaths {
            apt_config: self.apt_config.clone(),
            apt_get: self.apt_get.clone(),
            dpkg: self.dpkg.clone(),
            apt_key_script: self.apt_key.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved apt and dpkg locations
    Paths {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cached InRelease files
    Signatures,
    /// List packages from the dpkg status database
    Packages {
        /// Include packages that are not fully installed
        #[arg(short, long)]
        all: bool,
    },
    /// List files installed by a package
    Files {
        /// Package name
        package: String,
    },
    /// Install packages with apt-get
    Install {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove packages with apt-get
    Remove {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove unused packages along with their configuration
    Purge,
    /// Install local .deb archives with dpkg
    DpkgInstall {
        /// Paths to .deb files
        #[arg(required = true)]
        archives: Vec<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn print_paths(config: &AptConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let rows = [
        ("Status file", config.status_file()),
        ("Info directory", config.info_dir()),
        ("Etc directory", config.etc_dir()),
        ("Sources list", config.sources_list()),
        ("Sources parts", config.sources_parts_dir()),
        ("Trusted keyring", config.trusted_keyring()),
        ("Trusted parts", config.trusted_parts_dir()),
        ("Log directory", config.log_dir()),
        ("State directory", config.state_dir()),
        ("Cache directory", config.cache_dir()),
        ("Binary cache", config.binary_cache()),
        ("Source cache", config.source_cache()),
    ];

    println!("Architecture: {}", config.architecture());
    for (label, path) in rows {
        println!("{}: {}", label, path.display());
    }
    Ok(())
}

fn print_signatures(config: &AptConfig) -> Result<()> {
    let mut signatures: Vec<_> = config.cached_release_signatures()?.into_iter().collect();
    signatures.sort();

    if signatures.is_empty() {
        println!("No cached InRelease files.");
    } else {
        for (name, path) in &signatures {
            println!("{}  {}", name, path.display());
        }
        println!("\nTotal: {} file(s)", signatures.len());
    }
    Ok(())
}

fn print_packages(config: &AptConfig, all: bool) -> Result<()> {
    let packages: Vec<_> = config
        .installed_packages()
        .context("Failed to read dpkg status database")?
        .into_iter()
        .filter(|p| all || p.is_installed())
        .collect();

    if packages.is_empty() {
        println!("No packages found.");
        return Ok(());
    }

    for pkg in &packages {
        print!("  {} {}", pkg.package, pkg.version.as_deref().unwrap_or("-"));
        if let Some(arch) = &pkg.architecture {
            print!(" [{}]", arch);
        }
        if all && !pkg.is_installed() {
            print!(" ({})", pkg.status.as_deref().unwrap_or("unknown"));
        }
        println!();
    }
    println!("\nTotal: {} package(s)", packages.len());
    Ok(())
}

fn print_files(config: &AptConfig, name: &str) -> Result<()> {
    let packages = config.installed_packages()?;
    let package = packages
        .iter()
        .find(|p| p.package == name)
        .ok_or_else(|| anyhow::anyhow!("Package '{}' is not in the dpkg database", name))?;

    for path in package.file_list(config.info_dir())? {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tools = cli.tool_paths();
    let resolve = || {
        Resolver::from_tools(&tools)
            .resolve()
            .context("Failed to resolve apt configuration")
    };

    match cli.command {
        Some(Commands::Paths { json }) => print_paths(&resolve()?, json),
        Some(Commands::Signatures) => print_signatures(&resolve()?),
        Some(Commands::Packages { all }) => print_packages(&resolve()?, all),
        Some(Commands::Files { package }) => print_files(&resolve()?, &package),
        Some(Commands::Install { packages }) => {
            info!("Installing {} package(s)", packages.len());
            AptGet::new(&tools.apt_get).install(&packages)?;
            Ok(())
        }
        Some(Commands::Remove { packages }) => {
            info!("Removing {} package(s)", packages.len());
            AptGet::new(&tools.apt_get).remove(&packages)?;
            Ok(())
        }
        Some(Commands::Purge) => {
            AptGet::new(&tools.apt_get).purge()?;
            Ok(())
        }
        Some(Commands::DpkgInstall { archives }) => {
            info!("Installing {} archive(s) with dpkg", archives.len());
            Dpkg::new(&tools.dpkg).install(&archives)?;
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "aptshim", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("aptshim v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'aptshim --help' for usage information");
            Ok(())
        }
    }
}
