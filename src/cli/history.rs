//! History command implementation

use anyhow::{Context, Result, bail};
use clap::Subcommand;

use bridgiron::config::AppPaths;
use bridgiron::history::{Category, CopyHistory};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List entries of a category, newest first
    List {
        /// gpt-to-cc or cc-to-gpt
        #[arg(value_parser = parse_category)]
        category: Category,
    },

    /// Print the full text of one entry
    Show {
        #[arg(value_parser = parse_category)]
        category: Category,
        index: usize,
    },

    /// Delete one entry
    Delete {
        #[arg(value_parser = parse_category)]
        category: Category,
        index: usize,
    },
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value)
        .ok_or_else(|| format!("unknown category '{}' (use gpt-to-cc or cc-to-gpt)", value))
}

pub fn history_command(paths: &AppPaths, action: HistoryAction) -> Result<()> {
    let mut history = CopyHistory::load(&paths.history_file());

    match action {
        HistoryAction::List { category } => {
            let items = history.get_list(category);
            if items.is_empty() {
                println!("No history.");
                return Ok(());
            }
            for item in items {
                println!(
                    "  {:>2}  {}  {}",
                    item.index,
                    item.timestamp.format("%m/%d %H:%M"),
                    item.preview
                );
            }
        }
        HistoryAction::Show { category, index } => {
            if index >= history.len(category) {
                bail!("No {} entry at index {}", category, index);
            }
            println!("{}", history.get_content(category, index));
        }
        HistoryAction::Delete { category, index } => {
            if index >= history.len(category) {
                bail!("No {} entry at index {}", category, index);
            }
            history
                .delete(category, index)
                .with_context(|| format!("Failed to delete {} entry {}", category, index))?;
            println!("Deleted {} entry {}.", category, index);
        }
    }

    Ok(())
}
