//! Arguments and context shared by every subcommand.

use crate::Result;
use crate::config::Config;
use crate::github::{DEFAULT_PACING, Provider};
use crate::store::{Client, KvStore, Roster};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::path::PathBuf;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the subcommands that touch the roster or GitHub
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Document store API key
    #[arg(long, value_name = "KEY", env = "STORE_API_KEY")]
    pub store_api_key: Option<String>,

    /// Path to the configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where the roster cache is kept
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Runtime context built from the configuration and common arguments: the
/// loaded configuration plus the roster and GitHub provider every command
/// operates through.
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub roster: Roster,
    pub provider: Provider,
    pub cache_dir: PathBuf,
    use_colors: bool,
}

impl Common {
    /// Build the command context: initialize logging, load configuration, and
    /// construct the roster and provider. Command-line values override their
    /// configuration file counterparts.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let config_path = Config::locate(args.config.as_deref())?;
        let config = Config::load(&config_path)?;

        let cache_dir = if let Some(dir) = &args.cache_dir {
            dir.as_std_path().to_path_buf()
        } else {
            BaseDirs::new()
                .into_app_err("could not determine the cache directory")?
                .cache_dir()
                .join("teampulse")
        };

        let api_key = args.store_api_key.as_deref().or(config.store.api_key.as_deref());
        let store = match &config.store.base_url {
            Some(base_url) => Some(Client::new(api_key, base_url, config.store.collection.as_str())?),
            None => None,
        };

        let token = args.github_token.as_deref().or(config.github.token.as_deref());
        let provider = Provider::new(token, config.github.base_url.as_str(), DEFAULT_PACING)?;

        let roster = Roster::new(store, KvStore::new(&cache_dir));

        let use_colors = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        };

        Ok(Self {
            config,
            roster,
            provider,
            cache_dir,
            use_colors,
        })
    }

    /// Whether reports written to stdout should carry ANSI colors.
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .init();
    }
}
