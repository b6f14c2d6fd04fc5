use clap::Parser;
use memoir::application::init::init;
use memoir::application::lookup::{resolve_category_id, resolve_entry_id};
use memoir::application::{compose_in_editor, open_store, ConfigService, FileEntryStore};
use memoir::cli::{
    format_category_detail, format_category_list, format_entry_detail, format_entry_list,
    format_search_results, format_tag_counts, CategoryCommands, Cli, Commands,
};
use memoir::domain::query::{self, EntryQuery, SortOrder, RECENT_LIMIT};
use memoir::domain::{CategoryPatch, EntryPatch, NewCategory, NewEntry};
use memoir::error::{MemoirError, Result};
use memoir::infrastructure::logging::init_logging;
use memoir::infrastructure::{FileSystemRepository, MemoirRepository};

fn main() {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Print text, making sure it ends with exactly one newline
fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn entry_ids(store: &FileEntryStore) -> impl Iterator<Item = &str> {
    store.entries().iter().map(|e| e.id.as_str())
}

fn category_ids(store: &FileEntryStore) -> impl Iterator<Item = &str> {
    store.categories().iter().map(|c| c.id.as_str())
}

/// Trim tags typed on the command line and drop blank ones
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn open() -> Result<(FileSystemRepository, FileEntryStore)> {
    let repo = FileSystemRepository::discover()?;
    let store = open_store(&repo)?;
    Ok((repo, store))
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("memoir - Personal markdown memoir");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path } => {
            let repo = init(&path)?;
            println!("Initialized memoir at {}", repo.root().display());
            Ok(())
        }
        Commands::Config { key, value, list } => run_config(key, value, list),
        Commands::New {
            title,
            category,
            tags,
            content,
            edit,
        } => {
            let (repo, mut store) = open()?;
            let category_id = resolve_category_id(category_ids(&store), &category)?;
            if title.trim().is_empty() {
                return Err(MemoirError::Validation(
                    "Entry title cannot be empty".to_string(),
                ));
            }
            let content = if edit {
                compose_in_editor(&repo, "")?
            } else {
                content.unwrap_or_default()
            };

            let id = store.add_entry(
                NewEntry::new(title)
                    .content(content)
                    .category(category_id)
                    .tags(clean_tags(tags)),
            )?;
            println!("Created entry {}", id);
            Ok(())
        }
        Commands::Show { id } => {
            let (_, store) = open()?;
            let id = resolve_entry_id(entry_ids(&store), &id)?;
            let entry = store
                .get_entry_by_id(&id)
                .ok_or_else(|| MemoirError::EntryNotFound(id.clone()))?;
            emit(&format_entry_detail(
                entry,
                store.category_name(&entry.category_id),
            ));
            Ok(())
        }
        Commands::Edit {
            id,
            title,
            content,
            category,
            tags,
            clear_tags,
            edit,
        } => {
            let (repo, mut store) = open()?;
            let id = resolve_entry_id(entry_ids(&store), &id)?;
            let category_id = category
                .map(|c| resolve_category_id(category_ids(&store), &c))
                .transpose()?;
            let content = if edit {
                let current = store
                    .get_entry_by_id(&id)
                    .map(|e| e.content.clone())
                    .unwrap_or_default();
                Some(compose_in_editor(&repo, &current)?)
            } else {
                content
            };
            let tags = clean_tags(tags);
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };

            let patch = EntryPatch {
                title,
                content,
                category_id,
                tags,
            };
            if patch.is_empty() {
                return Err(MemoirError::Validation(
                    "Nothing to change. Pass --title, --content, --category, --tag, \
                    --clear-tags or --edit"
                        .to_string(),
                ));
            }

            let entry = store.update_entry(&id, patch)?;
            println!("Updated entry {}", entry.id);
            Ok(())
        }
        Commands::Delete { id } => {
            let (_, mut store) = open()?;
            let id = resolve_entry_id(entry_ids(&store), &id)?;
            match store.delete_entry(&id)? {
                Some(entry) => {
                    println!("Deleted entry \"{}\"", entry.title);
                    Ok(())
                }
                None => Err(MemoirError::EntryNotFound(id)),
            }
        }
        Commands::List {
            search,
            category,
            sort,
            limit,
        } => {
            let (repo, store) = open()?;
            let config = repo.load_config()?;
            let sort = match sort {
                Some(value) => value.parse::<SortOrder>()?,
                None => config.sort,
            };

            let mut entry_query = EntryQuery::new()
                .sort(sort)
                .limit(limit.unwrap_or(config.limit));
            if let Some(text) = search {
                entry_query = entry_query.search(text);
            }
            if let Some(category) = category {
                entry_query =
                    entry_query.category(resolve_category_id(category_ids(&store), &category)?);
            }

            let entries = entry_query.apply(store.entries());
            emit(&format_entry_list(&entries, |id| store.category_name(id)));
            Ok(())
        }
        Commands::Recent => {
            let (_, store) = open()?;
            let entries = query::recent(store.entries(), RECENT_LIMIT);
            emit(&format_entry_list(&entries, |id| store.category_name(id)));
            Ok(())
        }
        Commands::Search { query: text } => {
            let (_, store) = open()?;
            let results = query::search(store.entries(), &text);
            emit(&format_search_results(&text, &results, |id| {
                store.category_name(id)
            }));
            Ok(())
        }
        Commands::Tags { filter } => {
            let (_, store) = open()?;
            let counts = query::tag_counts(store.entries(), filter.as_deref());
            let any_tags = !store.all_tags().is_empty();
            emit(&format_tag_counts(&counts, any_tags));
            Ok(())
        }
        Commands::Tag { name } => {
            let (_, store) = open()?;
            let entries = store.get_entries_by_tag(&name);
            println!("Entries with tag \"{}\" ({})", name, entries.len());
            if entries.is_empty() {
                println!("No entries with this tag yet");
            } else {
                emit(&format_entry_list(&entries, |id| store.category_name(id)));
            }
            Ok(())
        }
        Commands::Category { command } => run_category(command),
    }
}

fn run_category(command: CategoryCommands) -> Result<()> {
    let (_, mut store) = open()?;

    match command {
        CategoryCommands::List => {
            let rows: Vec<_> = store
                .categories()
                .iter()
                .map(|c| (c, store.get_entries_by_category(&c.id).len()))
                .collect();
            emit(&format_category_list(&rows));
        }
        CategoryCommands::Show { id } => {
            let id = resolve_category_id(category_ids(&store), &id)?;
            let category = store
                .get_category_by_id(&id)
                .ok_or_else(|| MemoirError::CategoryNotFound(id.clone()))?;
            let entries = store.get_entries_by_category(&id);
            emit(&format_category_detail(category, &entries));
        }
        CategoryCommands::Add { name, description } => {
            let id = store.add_category(NewCategory { name, description })?;
            println!("Created category {}", id);
        }
        CategoryCommands::Update {
            id,
            name,
            description,
        } => {
            let id = resolve_category_id(category_ids(&store), &id)?;
            let patch = CategoryPatch { name, description };
            if patch.name.is_none() && patch.description.is_none() {
                return Err(MemoirError::Validation(
                    "Nothing to change. Pass --name or --description".to_string(),
                ));
            }
            let category = store.update_category(&id, patch)?;
            println!("Updated category {} ({})", category.name, category.id);
        }
        CategoryCommands::Delete { id } => {
            let id = resolve_category_id(category_ids(&store), &id)?;
            let removed = store.delete_category(&id)?;
            println!(
                "Deleted category \"{}\"; its entries moved to Uncategorized",
                removed.name
            );
        }
    }

    Ok(())
}

fn run_config(key: Option<String>, value: Option<String>, list: bool) -> Result<()> {
    let repo = FileSystemRepository::discover()?;
    let service = ConfigService::new(repo);

    if list {
        let config = service.list()?;
        println!("editor = {}", config.editor);
        println!("sort = {}", config.sort);
        println!("limit = {}", config.limit);
        println!("created = {}", config.created.to_rfc3339());
        Ok(())
    } else if let Some(k) = key {
        if let Some(v) = value {
            service.set(&k, &v)?;
            println!("Set {} = {}", k, v);
        } else {
            println!("{}", service.get(&k)?);
        }
        Ok(())
    } else {
        println!("Usage: memoir config [--list | <key> [<value>]]");
        println!("Valid keys: editor, sort, limit, created");
        Ok(())
    }
}
