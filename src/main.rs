//! nexus-tab - CLI entry point
//!
//! The `nxt` binary drives the dashboard engine from the command line: it
//! opens the same JSON data file the dashboard persists to and exposes the
//! widget operations as subcommands.

use clap::{Parser, Subcommand};
use nexus_tab::config::{default, loader::ConfigLoader, schema::Config, xdg};
use nexus_tab::settings::WidgetId;
use nexus_tab::store::JsonFileBackend;
use nexus_tab::widgets::TodoCategory;
use nexus_tab::{Dashboard, StoreError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Personalizable new-tab dashboard engine
#[derive(Parser)]
#[command(name = "nxt")]
#[command(version, about = "Personalizable new-tab dashboard engine")]
struct Cli {
    /// Path to the configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the nxt CLI
#[derive(Subcommand)]
enum Commands {
    /// Show the assembled dashboard state
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Manage the todo list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Manage quick links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage widget visibility and grid order
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Show or refresh the daily quote
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },

    /// Show or save the notes text
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum BoardAction {
    /// Print every visible widget with its stored state
    Show,
}

#[derive(Subcommand)]
enum TodoAction {
    /// Add a todo at the end of the list
    Add {
        /// The todo text
        text: String,
        /// Category: work, personal, urgent, later
        #[arg(long)]
        category: Option<String>,
    },
    /// List todos in display order
    List,
    /// Flip a todo's completion
    Toggle {
        /// Todo id
        id: String,
    },
    /// Delete a todo
    Remove {
        /// Todo id
        id: String,
    },
    /// Move a todo immediately before another
    Move {
        /// Id of the todo being moved
        dragged: String,
        /// Id of the todo to land before
        target: String,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Add a quick link
    Add {
        /// Display title
        title: String,
        /// Site URL (https:// is assumed when the scheme is missing)
        url: String,
    },
    /// List quick links in display order
    List,
    /// Delete a quick link
    Remove {
        /// Link id
        id: String,
    },
    /// Move a link immediately before another
    Move {
        /// Id of the link being moved
        dragged: String,
        /// Id of the link to land before
        target: String,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the grid with visibility and order
    Show,
    /// Show or hide one widget
    Toggle {
        /// Widget name (clock, weather, todos, ...)
        widget: String,
    },
    /// Move a widget immediately before another (orders stay dense)
    Move {
        /// Widget being moved
        dragged: String,
        /// Widget to land before
        target: String,
    },
    /// Exchange exactly two widgets' order values
    Swap {
        /// First widget
        a: String,
        /// Second widget
        b: String,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    /// Print the current quote (drawing a new one when stale)
    Show,
    /// Force a new quote
    Refresh,
}

#[derive(Subcommand)]
enum NotesAction {
    /// Print the notes text
    Show,
    /// Replace the notes text
    Save {
        /// The full text to store
        text: String,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    nexus_tab::logging::init(config.log.level);

    if let Commands::Config { action } = cli.command {
        return run_config_command(action);
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run_command(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, nexus_tab::config::ConfigError> {
    match path {
        Some(path) => ConfigLoader::load_from_path(path),
        None => ConfigLoader::load_default(),
    }
}

fn run_config_command(action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => match default::create_default_config(force) {
            Ok(path) => {
                println!("Created configuration at {}", path.display());
                Ok(())
            }
            Err(e) => Err(e),
        },
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => match ConfigLoader::load_default() {
            Ok(config) => {
                println!("Configuration is valid");
                println!("{config:#?}");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn open_dashboard(config: &Config) -> Result<Dashboard, String> {
    let quote_ttl = config.quote_ttl().map_err(|e| e.to_string())?;
    let autosave = config.notes_autosave_delay().map_err(|e| e.to_string())?;
    let backend = JsonFileBackend::new(config.data_file_path());
    Dashboard::open_with_options(
        Arc::new(backend),
        quote_ttl.as_millis() as i64,
        Some(autosave),
    )
    .await
    .map_err(|e| e.to_string())
}

async fn run_command(command: Commands, config: &Config) -> Result<(), String> {
    let board = open_dashboard(config).await?;
    let as_msg = |e: StoreError| e.to_string();

    match command {
        Commands::Config { .. } => unreachable!("handled before the runtime starts"),

        Commands::Board { action: BoardAction::Show } => {
            let layout = board.settings().widget_layout();
            println!("widgets (visible, in order):");
            for id in layout.visible_in_order() {
                println!("  {id}");
            }
            let todos = board.todos().list().await.map_err(as_msg)?;
            println!("todos: {} ({} done)", todos.len(), todos.iter().filter(|t| t.completed).count());
            let links = board.links().list().await.map_err(as_msg)?;
            println!("quick links: {}", links.len());
            let notes = board.notes().text().await.map_err(as_msg)?;
            println!("notes: {} chars", notes.chars().count());
        }

        Commands::Todo { action } => match action {
            TodoAction::Add { text, category } => {
                let category = category.map(|c| parse_category(&c)).transpose()?;
                let todo = board.todos().add(&text, category).await.map_err(as_msg)?;
                println!("{}\t{}", todo.id, todo.text);
            }
            TodoAction::List => {
                for todo in board.todos().list().await.map_err(as_msg)? {
                    let mark = if todo.completed { "x" } else { " " };
                    println!("[{mark}] {}\t{}", todo.id, todo.text);
                }
            }
            TodoAction::Toggle { id } => {
                let todo = board.todos().toggle(&id).await.map_err(as_msg)?;
                let state = if todo.completed { "done" } else { "open" };
                println!("{}\t{}", todo.id, state);
            }
            TodoAction::Remove { id } => {
                board.todos().remove(&id).await.map_err(as_msg)?;
                println!("removed {id}");
            }
            TodoAction::Move { dragged, target } => {
                let moved = board.todos().reorder(&dragged, &target).await.map_err(as_msg)?;
                println!("{}", if moved { "moved" } else { "unchanged" });
            }
        },

        Commands::Link { action } => match action {
            LinkAction::Add { title, url } => {
                let link = board.links().add(&title, &url).await.map_err(as_msg)?;
                println!("{}\t{}\t{}", link.id, link.title, link.url);
            }
            LinkAction::List => {
                for link in board.links().list().await.map_err(as_msg)? {
                    println!("{}\t{}\t{}", link.id, link.title, link.url);
                }
            }
            LinkAction::Remove { id } => {
                board.links().remove(&id).await.map_err(as_msg)?;
                println!("removed {id}");
            }
            LinkAction::Move { dragged, target } => {
                let moved = board.links().reorder(&dragged, &target).await.map_err(as_msg)?;
                println!("{}", if moved { "moved" } else { "unchanged" });
            }
        },

        Commands::Layout { action } => match action {
            LayoutAction::Show => {
                let layout = board.settings().widget_layout();
                for id in WidgetId::ALL {
                    if let Some(entry) = layout.entry(id) {
                        let state = if entry.visible { "shown" } else { "hidden" };
                        println!("{}\t{}\t{}", entry.order, id, state);
                    }
                }
            }
            LayoutAction::Toggle { widget } => {
                let id = parse_widget(&widget)?;
                let visible = board
                    .settings()
                    .widget_layout()
                    .entry(id)
                    .map(|e| e.visible)
                    .unwrap_or(true);
                board
                    .settings()
                    .set_widget_visible(id, !visible)
                    .await
                    .map_err(as_msg)?;
                println!("{id}\t{}", if !visible { "shown" } else { "hidden" });
            }
            LayoutAction::Move { dragged, target } => {
                let dragged = parse_widget(&dragged)?;
                let target = parse_widget(&target)?;
                let moved = board
                    .settings()
                    .move_widget(dragged, target)
                    .await
                    .map_err(as_msg)?;
                println!("{}", if moved { "moved" } else { "unchanged" });
            }
            LayoutAction::Swap { a, b } => {
                let a = parse_widget(&a)?;
                let b = parse_widget(&b)?;
                let swapped = board.settings().swap_widgets(a, b).await.map_err(as_msg)?;
                println!("{}", if swapped { "swapped" } else { "unchanged" });
            }
        },

        Commands::Quote { action } => {
            let now_ms = chrono::Utc::now().timestamp_millis();
            let quote = match action {
                QuoteAction::Show => board.quote().current(now_ms).await.map_err(as_msg)?,
                QuoteAction::Refresh => board.quote().refresh(now_ms).await.map_err(as_msg)?,
            };
            println!("\"{}\"", quote.quote);
            println!("  - {}", quote.author);
        }

        Commands::Notes { action } => match action {
            NotesAction::Show => {
                println!("{}", board.notes().text().await.map_err(as_msg)?);
            }
            NotesAction::Save { text } => {
                board.notes().save(&text).await.map_err(as_msg)?;
                println!("saved");
            }
        },
    }

    Ok(())
}

fn parse_category(input: &str) -> Result<TodoCategory, String> {
    match input {
        "work" => Ok(TodoCategory::Work),
        "personal" => Ok(TodoCategory::Personal),
        "urgent" => Ok(TodoCategory::Urgent),
        "later" => Ok(TodoCategory::Later),
        other => Err(format!(
            "unknown category '{other}' (expected work, personal, urgent or later)"
        )),
    }
}

fn parse_widget(input: &str) -> Result<WidgetId, String> {
    WidgetId::parse(input).ok_or_else(|| format!("unknown widget '{input}'"))
}
