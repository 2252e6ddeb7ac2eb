//! todoview CLI entry point.
//!
//! Shows the task board of a to-do backend and edits its lists and tasks.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{ArgAction, Parser, Subcommand};
use std::sync::Arc;

use todoview::application::board::DisplayFilter;
use todoview::application::form::TaskForm;
use todoview::commands;
use todoview::domain::TaskStatus;
use todoview::infra::app_config::{self, AppConfig};
use todoview::infra::backend::HttpBackend;
use todoview::infra::session::{SessionStore, StaticToken, TokenSource};

#[derive(Parser, Debug)]
#[command(name = "todoview")]
#[command(version)]
#[command(about = "To-do lists with deadlines and remaining time", long_about = None)]
struct Args {
    /// Backend base URL (overrides the config file and TODOVIEW_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token to use instead of the stored session
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the lists
    Lists,

    /// Show the task board of a list (default: the first list)
    Tasks {
        /// List id
        #[arg(short, long)]
        list: Option<String>,

        /// Which tasks to show: todo or done
        #[arg(short, long, default_value = "todo")]
        show: DisplayFilter,
    },

    /// Show one task in detail
    Show { list: String, task: String },

    /// Create a list
    NewList { title: String },

    /// Rename a list
    EditList { list: String, title: String },

    /// Delete a list
    DeleteList { list: String },

    /// Create a task
    NewTask {
        list: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        detail: String,

        /// Deadline in local time, YYYY-MM-DDTHH:MM
        #[arg(long)]
        limit: String,
    },

    /// Edit a task; fields not given keep their current value
    EditTask {
        list: String,
        task: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        detail: Option<String>,

        /// todo or done
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Deadline in local time, YYYY-MM-DDTHH:MM
        #[arg(long)]
        limit: Option<String>,
    },

    /// Delete a task
    DeleteTask { list: String, task: String },

    /// Store the bearer token used for every request
    Login { token: String },

    /// Forget the stored bearer token
    Logout,

    /// Show or change the configuration
    Config {
        #[arg(long)]
        api_url: Option<String>,

        /// List shown by `tasks` when --list is not given
        #[arg(long)]
        default_list: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = app_config::load_config();
    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }

    match args.command.unwrap_or(Commands::Tasks {
        list: None,
        show: DisplayFilter::Todo,
    }) {
        Commands::Login { token } => {
            let store = SessionStore::from_env();
            store.save(&token).context("Failed to store token")?;
            println!("Token saved to {}", store.path().display());
        }
        Commands::Logout => {
            let store = SessionStore::from_env();
            if store.clear().context("Failed to remove token")? {
                println!("Signed out");
            } else {
                println!("No stored token");
            }
        }
        Commands::Config {
            api_url,
            default_list,
        } => {
            let mut stored = app_config::load_config_from(&app_config::config_path());
            let changed = api_url.is_some() || default_list.is_some();
            if let Some(url) = api_url {
                stored.api_url = url;
            }
            if let Some(list) = default_list {
                stored.default_list = Some(list).filter(|l| !l.is_empty());
            }
            if changed {
                let path = app_config::save_config(&stored).context("Failed to save config")?;
                println!("Saved {}", path.display());
            }
            print!("{}", toml::to_string_pretty(&stored).context("Failed to render config")?);
        }
        command => run_backend_command(command, &config, args.token).await?,
    }

    Ok(())
}

async fn run_backend_command(
    command: Commands,
    config: &AppConfig,
    token: Option<String>,
) -> Result<()> {
    let tokens: Arc<dyn TokenSource> = match token {
        Some(token) => Arc::new(StaticToken(token)),
        None => Arc::new(SessionStore::from_env()),
    };
    let backend = HttpBackend::new(&config.api_url, tokens).context("Failed to set up client")?;
    let now = Utc::now();

    match command {
        Commands::Lists => {
            for list in commands::load_lists(&backend).await? {
                println!("{}\t{}", list.id, list.title);
            }
        }
        Commands::Tasks { list, show } => {
            let requested = list.or_else(|| config.default_list.clone());
            let board = commands::load_board(&backend, requested.as_deref()).await?;
            print!("{}", board.render(show, now, &Local));
        }
        Commands::Show { list, task } => {
            let text = commands::describe_task(&backend, &list, &task, now, &Local).await?;
            print!("{}", text);
        }
        Commands::NewList { title } => {
            let id = commands::create_list(&backend, &title).await?;
            println!("Created list {}", id);
        }
        Commands::EditList { list, title } => {
            let previous = commands::rename_list(&backend, &list, &title).await?;
            println!("Renamed '{}' to '{}'", previous, title.trim());
        }
        Commands::DeleteList { list } => {
            commands::delete_list(&backend, &list).await?;
            println!("Deleted list {}", list);
        }
        Commands::NewTask {
            list,
            title,
            detail,
            limit,
        } => {
            let form = TaskForm::new(title, detail, limit);
            let id = commands::create_task(&backend, &list, &form, &Local).await?;
            println!("Created task {}", id);
        }
        Commands::EditTask {
            list,
            task,
            title,
            detail,
            status,
            limit,
        } => {
            let mut form = commands::load_task_form(&backend, &list, &task, &Local).await?;
            if let Some(title) = title {
                form = form.with_title(title);
            }
            if let Some(detail) = detail {
                form = form.with_detail(detail);
            }
            if let Some(status) = status {
                form = form.with_status(status);
            }
            if let Some(limit) = limit {
                form = form.with_limit(limit);
            }
            commands::update_task(&backend, &list, &task, &form, &Local).await?;
            println!("Updated task {}", task);
        }
        Commands::DeleteTask { list, task } => {
            commands::delete_task(&backend, &list, &task).await?;
            println!("Deleted task {}", task);
        }
        Commands::Login { .. } | Commands::Logout | Commands::Config { .. } => {
            anyhow::bail!("this command does not use the backend")
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::default()
        .filter_level(level)
        .parse_default_env()
        .init();
}
