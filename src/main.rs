use clap::{Parser, Subcommand};
use gitstate::config::{Config, ConfigError};
use gitstate::error::{AppError, AppResult};
use gitstate::git::{self, GitOutputs, RepositorySnapshot};
use gitstate::{find_common_path, logging};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gitstate", version, about = "Turn git command output into structured JSON")]
struct Cli {
    /// Config file to use instead of ~/.config/gitstate/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse `git status --branch --porcelain` output
    Status {
        /// File holding the output (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Parse `git log` output
    Log {
        /// File holding the output (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Parse `git branch -vv` output
    Branches {
        /// File holding the output (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Parse `git remote -v` output
    Remotes {
        /// File holding the output (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Combine several outputs into one repository snapshot
    Snapshot {
        #[arg(long)]
        status: PathBuf,
        #[arg(long)]
        log: Option<PathBuf>,
        #[arg(long)]
        branches: Option<PathBuf>,
        #[arg(long)]
        remotes: Option<PathBuf>,
    },
    /// Print the deepest directory shared by all paths
    CommonPath {
        /// Separator between path segments (defaults to the configured one)
        #[arg(long)]
        separator: Option<String>,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    if let Err(e) = run(cli, config) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> AppResult<Config> {
    Ok(match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_default()?,
    })
}

fn run(cli: Cli, config: Config) -> AppResult<()> {
    match cli.cmd {
        Command::Status { file } => print_json(&git::parse_status(&read_input(file.as_deref())?)?),
        Command::Log { file } => print_json(&git::parse_log(&read_input(file.as_deref())?)?),
        Command::Branches { file } => {
            print_json(&git::parse_branch_list(&read_input(file.as_deref())?)?)
        }
        Command::Remotes { file } => {
            print_json(&git::parse_remote_list(&read_input(file.as_deref())?)?)
        }
        Command::Snapshot {
            status,
            log,
            branches,
            remotes,
        } => {
            let status = fs::read_to_string(&status)?;
            let log = read_optional(log.as_deref())?;
            let branches = read_optional(branches.as_deref())?;
            let remotes = read_optional(remotes.as_deref())?;

            let outputs = GitOutputs {
                status: Some(status.as_str()),
                log: log.as_deref(),
                branches: branches.as_deref(),
                remotes: remotes.as_deref(),
            };
            print_json(&RepositorySnapshot::parse_with(&outputs, &config.parser)?)
        }
        Command::CommonPath { separator, paths } => {
            let separator = separator.unwrap_or(config.parser.path_separator);
            println!("{}", find_common_path(&separator, &paths)?);
            Ok(())
        }
        Command::Config { cmd } => match cmd {
            ConfigCommand::Init { force } => {
                let path = Config::config_path()?;
                if path.exists() && !force {
                    return Err(AppError::Io(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} already exists (use --force to overwrite)", path.display()),
                    )));
                }
                let written = Config::default_config().save()?;
                println!("Wrote {}", written.display());
                Ok(())
            }
            ConfigCommand::Show => {
                let rendered = toml::to_string_pretty(&config).map_err(ConfigError::from)?;
                print!("{}", rendered);
                Ok(())
            }
        },
    }
}

/// Read a whole file, or stdin when no file is given
fn read_input(file: Option<&Path>) -> AppResult<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn read_optional(file: Option<&Path>) -> AppResult<Option<String>> {
    file.map(fs::read_to_string).transpose().map_err(AppError::from)
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
