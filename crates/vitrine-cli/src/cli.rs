//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use vitrine_listing::CategoryFilter;

/// Vitrine - browse site datasets, content, and benchmark counts
#[derive(Parser, Debug)]
#[command(name = "vitrine", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VITRINE_CONFIG")]
    pub config: Option<String>,

    /// Local data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Base URL of the published data directory (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter, sort, and page through a dataset
    List(ListArgs),

    /// Show one record of a dataset
    Show {
        /// Dataset (zkvms, spaces, programs)
        resource: String,
        /// Record id
        id: String,
    },

    /// Count telemetry files per benchmark program
    Bench {
        /// Program ids in match order (comma-separated)
        #[arg(long, value_delimiter = ',')]
        programs: Option<Vec<String>>,
    },

    /// List blog posts from the content directory
    Posts(PostsArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `vitrine list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Dataset (zkvms, spaces, programs)
    pub resource: String,

    /// Free-text search over name, description, and tags
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category: `all`, an exact category, or `tag:<fragment>`
    #[arg(long)]
    pub category: Option<CategoryFilter>,

    /// Sort key
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `vitrine posts`.
#[derive(Args, Debug, Clone)]
pub struct PostsArgs {
    /// Free-text search over title, summary, and tags
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only posts with a tag containing this fragment
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key (e.g. `listing.page_size`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default config file
    Init {
        /// Target file (defaults to the resolved config path)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file + environment + flags)
    Show,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "vitrine", "list", "zkvms", "-q", "risc", "--category", "tag:rust", "--page", "2",
        ])
        .unwrap();
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.resource, "zkvms");
                assert_eq!(args.query.as_deref(), Some("risc"));
                assert_eq!(args.category, Some(CategoryFilter::Tag("rust".into())));
                assert_eq!(args.page, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bench_programs() {
        let cli = Cli::try_parse_from(["vitrine", "bench", "--programs", "fibonacci,ecdsa"]).unwrap();
        match cli.command {
            Command::Bench { programs } => {
                assert_eq!(programs.unwrap(), vec!["fibonacci", "ecdsa"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vitrine", "show", "zkvms", "sp1", "--data-dir", "/srv/data", "-v"])
                .unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("/srv/data"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["vitrine", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Init { force: true, .. }
            }
        ));
    }
}
