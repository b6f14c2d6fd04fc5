//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{CategoryCommands, Cli, Commands};
pub use output::{
    format_category_detail, format_category_list, format_entry_detail, format_entry_list,
    format_search_results, format_tag_counts,
};
