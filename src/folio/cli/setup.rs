use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", bin_name = "folio", version)]
#[command(about = "Portfolio site and its admin tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "FOLIO_DATA", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web site
    Serve {
        /// Address to listen on, overriding the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// Portfolio items, drafts included
    #[command(subcommand)]
    Items(ItemCommands),

    /// Item categories
    #[command(subcommand)]
    Categories(TaxonomyCommands),

    /// Item tags
    #[command(subcommand)]
    Tags(TaxonomyCommands),

    /// Clients items can be credited to
    #[command(subcommand)]
    Clients(ClientCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (site_title, paginate_by, admin_per_page, bind)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one item in full
    Show { slug: String },

    /// Publish items
    Publish {
        #[arg(required = true, num_args = 1..)]
        slugs: Vec<String>,
    },

    /// Turn items back into drafts
    Draft {
        #[arg(required = true, num_args = 1..)]
        slugs: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Title prefix or part of the category name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only published items
    #[arg(long, conflicts_with = "drafts")]
    pub published: bool,

    /// Only drafts
    #[arg(long)]
    pub drafts: bool,

    /// Only items credited to a client
    #[arg(long, conflicts_with = "without_client")]
    pub with_client: bool,

    /// Only items without a client
    #[arg(long)]
    pub without_client: bool,

    /// Page number, or "last"
    #[arg(short, long)]
    pub page: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaxonomyCommands {
    #[command(alias = "ls")]
    List,
    Add { name: String, slug: String },
    #[command(alias = "rm")]
    Remove { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    #[command(alias = "ls")]
    List,
    Add { name: String, email: String },
    #[command(alias = "rm")]
    Remove { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::parse_from([
            "folio", "items", "list", "--search", "site", "--drafts", "--with-client", "-p", "2",
        ]);
        match cli.command {
            Commands::Items(ItemCommands::List(args)) => {
                assert_eq!(args.search.as_deref(), Some("site"));
                assert!(args.drafts && args.with_client && !args.published);
                assert_eq!(args.page.as_deref(), Some("2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn published_and_drafts_conflict() {
        assert!(Cli::try_parse_from(["folio", "items", "list", "--published", "--drafts"]).is_err());
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::parse_from(["folio", "tags", "list", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
