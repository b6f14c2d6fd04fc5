//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memoir")]
#[command(about = "Personal markdown memoir: entries, categories and tags", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new memoir
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Create a new entry
    New {
        /// Entry title
        #[arg(short, long)]
        title: String,

        /// Category id (default: uncategorized)
        #[arg(short, long, default_value = "default")]
        category: String,

        /// Tag to attach; repeat or separate with commas
        #[arg(short = 'g', long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Markdown content
        #[arg(long, conflicts_with = "edit")]
        content: Option<String>,

        /// Write the content in your editor
        #[arg(short, long)]
        edit: bool,
    },

    /// Show one entry
    Show {
        /// Entry id or unique prefix
        id: String,
    },

    /// Change an entry; only the given fields are touched
    Edit {
        /// Entry id or unique prefix
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(long, conflicts_with = "edit")]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Replace the tags; repeat or separate with commas
        #[arg(short = 'g', long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Edit the content in your editor
        #[arg(short, long)]
        edit: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id or unique prefix
        id: String,
    },

    /// List entries with optional filter and sort
    List {
        /// Only entries whose title, content or tags contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries in this category
        #[arg(short, long)]
        category: Option<String>,

        /// newest, oldest, a-z, z-a (default from config)
        #[arg(long)]
        sort: Option<String>,

        /// Maximum number of entries (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Most recently updated entries
    Recent,

    /// Search titles, content and tags
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },

    /// List all tags with entry counts
    Tags {
        /// Only tags containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List entries carrying a tag
    Tag {
        /// Tag name (case-sensitive)
        name: String,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with entry counts
    List,

    /// Show a category and its entries
    Show {
        /// Category id or unique prefix
        id: String,
    },

    /// Create a category
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Rename a category or change its description
    Update {
        /// Category id or unique prefix
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// New description; an empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a category; its entries move to Uncategorized
    Delete {
        /// Category id or unique prefix
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tags_split_on_commas_and_repeat() {
        let cli = Cli::parse_from([
            "memoir", "new", "--title", "T", "--tag", "rust,memory", "-g", "async",
        ]);
        match cli.command {
            Some(Commands::New { tags, category, .. }) => {
                assert_eq!(tags, vec!["rust", "memory", "async"]);
                assert_eq!(category, "default");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn content_and_edit_conflict() {
        let result = Cli::try_parse_from([
            "memoir", "new", "--title", "T", "--content", "x", "--edit",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["memoir", "recent", "-v"]);
        assert!(cli.verbose);
    }
}
