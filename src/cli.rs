use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

use crate::constants::{DEFAULT_MAX_ROUNDS, output};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// SofaScore football scraper
///
/// Collects match ids round by round for one or more tournament seasons,
/// then fetches per-match statistics for those ids into a flat CSV table.
///
/// Typical use:
/// - `rounds <ROUND_URL>...` writes matches.csv
/// - `stats --input matches.csv` writes BasicStats.csv
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// List current configuration settings and exit.
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "init-config", help_heading = "Configuration")]
    pub init_config: bool,

    /// Drive a real Chrome instead of the HTTP session (needs the `chrome` feature).
    #[arg(long = "browser", global = true, help_heading = "Session")]
    pub browser: bool,

    /// Show the browser window. Only meaningful with --browser.
    #[arg(long = "headed", global = true, help_heading = "Session")]
    pub headed: bool,

    /// Log at debug level, including every extracted record.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,

    /// Log only to the log file, not to the terminal.
    #[arg(long = "quiet", short = 'q', global = true, help_heading = "Debug")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Discover match ids for every round of the given tournament seasons.
    Rounds {
        /// Round-events URLs, e.g.
        /// https://www.sofascore.com/api/v1/unique-tournament/34/season/52571/events/round/1
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        /// Rounds to query per tournament, starting from round 1.
        #[arg(long = "max-rounds", default_value_t = DEFAULT_MAX_ROUNDS)]
        max_rounds: u32,

        /// Output CSV path.
        #[arg(long, short, default_value = output::ROUNDS_CSV)]
        output: String,
    },

    /// Fetch per-match statistics for the ids in one or more rounds CSVs.
    Stats {
        /// CSV files with a Match_ID column, read in order.
        #[arg(long = "input", short, required = true, num_args = 1.., value_name = "PATH")]
        inputs: Vec<String>,

        /// Output CSV path.
        #[arg(long, short, default_value = output::STATS_CSV)]
        output: String,

        /// Leave out the leading row-number column.
        #[arg(long = "no-index")]
        no_index: bool,
    },
}

impl Args {
    /// True when the run only touches configuration and never scrapes.
    pub fn is_config_only(&self) -> bool {
        self.list_config || self.init_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_rounds_defaults() {
        let args = Args::try_parse_from([
            "sofascore_scraper",
            "rounds",
            "https://www.sofascore.com/api/v1/unique-tournament/34/season/52571/events/round/1",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Some(Command::Rounds {
                urls: vec![
                    "https://www.sofascore.com/api/v1/unique-tournament/34/season/52571/events/round/1"
                        .to_string()
                ],
                max_rounds: 38,
                output: "matches.csv".to_string(),
            })
        );
        assert!(!args.is_config_only());
    }

    #[test]
    fn test_stats_with_multiple_inputs() {
        let args = Args::try_parse_from([
            "sofascore_scraper",
            "--debug",
            "stats",
            "--input",
            "a.csv",
            "b.csv",
            "--no-index",
        ])
        .unwrap();
        assert!(args.debug);
        assert_eq!(
            args.command,
            Some(Command::Stats {
                inputs: vec!["a.csv".to_string(), "b.csv".to_string()],
                output: "BasicStats.csv".to_string(),
                no_index: true,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "sofascore_scraper",
            "stats",
            "-i",
            "a.csv",
            "--browser",
            "--headed",
            "--quiet",
        ])
        .unwrap();
        assert!(args.browser);
        assert!(args.headed);
        assert!(args.quiet);
    }

    #[test]
    fn test_rounds_requires_url() {
        assert!(Args::try_parse_from(["sofascore_scraper", "rounds"]).is_err());
    }

    #[test]
    fn test_list_config_without_subcommand() {
        let args = Args::try_parse_from(["sofascore_scraper", "--list-config"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.is_config_only());
    }
}
