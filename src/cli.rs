//! Command-line interface
//!
//! Every flag can also be set through the environment (or a `.env` file in
//! the working directory). Flags win over the environment.

use bridge_traits::LogLevel;
use clap::{builder::FalseyValueParser, ArgAction, Parser};
use core_runtime::{
    config::CoreConfigBuilder,
    logging::{LogFormat, LoggingConfig},
    CoreConfig,
};

/// Create Immich albums from folders holding a `.album` file and fill them
/// with the folders' assets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Immich API URL (should typically end with `/api`)
    #[arg(long, env = "IMMICH_API_URL")]
    pub api_url: Option<String>,

    /// Immich API key
    #[arg(long, env = "IMMICH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Regex computing the album name from the folder name (default: the
    /// folder name itself)
    #[arg(short = 'r', long, env = "ALBUM_NAME_REGEX")]
    pub album_regex: Option<String>,

    /// Max number of assets added to an album per API call (default: all at
    /// once). Lower it if the server rejects large requests.
    #[arg(short = 's', long, env = "API_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Increase verbosity (up to -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long = "verbosity", env = "VERBOSE", default_value_t = 0, hide = true)]
    pub verbosity: u8,

    /// Don't create albums or add assets, only log the album names that would
    /// be used (combine with -v to test a regex)
    #[arg(
        short = 'n',
        long,
        env = "DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub dry_run: bool,

    /// Delete all existing albums before syncing (even with --dry-run)
    #[arg(
        short = 'X',
        long,
        env = "DELETE_ALL_ALBUMS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub delete_all_albums: bool,

    /// Cron expression for scheduled runs (five-field Unix syntax accepted)
    #[arg(short = 'c', long, env = "CRON_EXPRESSION")]
    pub cron_expr: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Tracing filter directives (e.g. `core_sync=trace,reqwest=debug`);
    /// overrides -v
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Effective verbosity: the `-v` count or `VERBOSE`, whichever is higher.
    pub fn verbosity(&self) -> u8 {
        self.verbose.max(self.verbosity)
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbosity())
    }

    pub fn logging_config(&self) -> LoggingConfig {
        let config = LoggingConfig::default()
            .with_format(self.log_format)
            .with_level(self.log_level())
            .with_target(false);

        match &self.log_filter {
            Some(filter) => config.with_filter(filter),
            None => config,
        }
    }

    /// Carry the parsed flags into a config builder.
    pub fn config_builder(&self) -> CoreConfigBuilder {
        let mut builder = CoreConfig::builder()
            .dry_run(self.dry_run)
            .delete_all_albums(self.delete_all_albums);

        if let Some(url) = &self.api_url {
            builder = builder.api_url(url);
        }
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(pattern) = &self.album_regex {
            builder = builder.album_name_pattern(pattern);
        }
        if let Some(size) = self.chunk_size {
            builder = builder.chunk_size(size);
        }
        if let Some(expression) = &self.cron_expr {
            builder = builder.cron_expression(expression);
        }

        builder
    }
}
