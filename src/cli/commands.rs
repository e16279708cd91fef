use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::warn;

use super::display::{format_chat, format_list_row};
use crate::filters::parse_query;
use crate::storage::{CategoryMatch, ChatFilter, SortMode, Store};
use crate::transfer::{export_json, import_path, write_export};
use crate::utils::{DB_ENV_VAR, format_path_with_tilde, get_db_path, strip_ansi_codes};

#[derive(Parser)]
#[command(name = "chat-labels")]
#[command(version)]
#[command(about = "Import chat exports into a local database and organize them with categories", long_about = None)]
pub struct Cli {
    /// Database file (defaults to <data dir>/chat-labels/chat_labels.db)
    #[arg(long, global = true, env = DB_ENV_VAR, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a JSON chat export, or every .json file under a directory
    Import {
        path: PathBuf,
    },
    /// Export all chats with their categories as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List chats, e.g. `list 'category:work tag:"deep learning" match:any borrow checker'`
    List {
        /// Query terms: category:NAME, tag:NAME, match:all|any, sort:MODE and search words
        query: Vec<String>,
        /// all or any (overrides match: in the query)
        #[arg(long = "match", value_name = "MODE")]
        category_match: Option<String>,
        /// newest, oldest or title (overrides sort: in the query)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one chat in full
    Show {
        id: String,
    },
    /// Add categories to chats
    Tag {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short, long = "category", value_name = "NAME", required = true)]
        categories: Vec<String>,
    },
    /// Remove categories from chats
    Untag {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short, long = "category", value_name = "NAME", required = true)]
        categories: Vec<String>,
    },
    /// List categories with chat counts
    Categories,
    /// Show database statistics
    Stats,
}

pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let db_path = match cli.db {
        Some(path) => path,
        None => get_db_path()?,
    };
    let mut store = Store::open(&db_path)?;

    match command {
        Commands::Import { path } => import(&mut store, &path),
        Commands::Export { output } => export(&store, output),
        Commands::List { query, category_match, sort } => {
            list(&store, &query, category_match.as_deref(), sort.as_deref())
        }
        Commands::Show { id } => show(&store, &id),
        Commands::Tag { ids, categories } => {
            store.assign(&ids, &categories)?;
            println!("Tagged {} chat(s) with {}", ids.len(), categories.join(", "));
            Ok(())
        }
        Commands::Untag { ids, categories } => {
            store.remove(&ids, &categories)?;
            println!("Removed {} from {} chat(s)", categories.join(", "), ids.len());
            Ok(())
        }
        Commands::Categories => show_categories(&store),
        Commands::Stats => show_stats(&store),
    }
}

fn import(store: &mut Store, path: &Path) -> Result<()> {
    let report = import_path(store, path)?;

    println!("Imported {} chats", report.chats);
    if report.files_imported + report.files_failed > 1 {
        println!("  Files imported: {}", report.files_imported);
        println!("  Files skipped: {}", report.files_failed);
    }
    Ok(())
}

fn export(store: &Store, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            write_export(store, &path)?;
            println!("Exported to {}", format_path_with_tilde(&path));
        }
        None => println!("{}", export_json(store)?),
    }
    Ok(())
}

fn list(
    store: &Store,
    query: &[String],
    category_match: Option<&str>,
    sort: Option<&str>,
) -> Result<()> {
    let expr = parse_query(&query.join(" "))?;

    let category_match = match category_match {
        Some(mode) => mode.parse::<CategoryMatch>()?,
        None => expr.category_match.unwrap_or_default(),
    };
    let sort = match sort {
        Some(mode) => mode.parse::<SortMode>()?,
        None => expr.sort.unwrap_or_default(),
    };

    let mut category_ids = Vec::with_capacity(expr.categories.len());
    let mut unknown = 0;
    for (name, id) in store.category_ids(&expr.categories)? {
        match id {
            Some(id) => category_ids.push(id),
            None => {
                warn!(category = %name, "unknown category");
                unknown += 1;
            }
        }
    }

    // No chat carries a category that does not exist
    let unmatchable = match category_match {
        CategoryMatch::All => unknown > 0,
        CategoryMatch::Any => unknown > 0 && category_ids.is_empty(),
    };
    if unmatchable {
        println!("No chats found");
        return Ok(());
    }

    let filter = ChatFilter::new()
        .search(expr.search_text())
        .categories(category_ids)
        .category_match(category_match)
        .sort(sort);
    let rows = store.list(&filter)?;

    if rows.is_empty() {
        println!("No chats found");
        return Ok(());
    }

    let now = Utc::now();
    for row in &rows {
        println!("{}", format_list_row(row, &now));
    }
    Ok(())
}

fn show(store: &Store, id: &str) -> Result<()> {
    let Some(chat) = store.get(id)? else {
        bail!("Chat not found: {}", id);
    };
    let categories = store.chat_categories(id)?;

    println!("{}", format_chat(&chat, &categories));
    Ok(())
}

fn show_categories(store: &Store) -> Result<()> {
    let categories = store.list_categories()?;
    if categories.is_empty() {
        println!("No categories yet");
        return Ok(());
    }

    let names: Vec<String> = categories.iter().map(|c| strip_ansi_codes(&c.name)).collect();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    for (name, category) in names.iter().zip(&categories) {
        println!("{:<width$}  {}", name, category.count, width = width);
    }
    Ok(())
}

fn show_stats(store: &Store) -> Result<()> {
    let stats = store.stats()?;
    let db_path = store.path().context("Store has no database file")?;

    println!("Chat Label Statistics");
    println!("=====================");
    println!("Chats: {}", stats.chats);
    println!("  Tagged: {}", stats.tagged_chats);
    println!("  Untagged: {}", stats.chats - stats.tagged_chats);
    println!("Categories: {}", stats.categories);
    println!("Links: {}", stats.links);
    println!();
    println!("Database: {}", format_path_with_tilde(db_path));

    Ok(())
}
