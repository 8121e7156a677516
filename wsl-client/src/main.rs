//! wsl-client - Command-line front end for the worship song list API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wsl_client::{SessionView, SongApiClient, SongListController, DEFAULT_BASE_URL};
use wsl_common::view::SortKey;
use wsl_common::Leader;

/// Command-line arguments for wsl-client
#[derive(Parser, Debug)]
#[command(name = "wsl-client")]
#[command(about = "Manage worship leaders' song lists")]
#[command(version)]
struct Args {
    /// API base URL
    #[arg(short, long, default_value = DEFAULT_BASE_URL, env = "WSL_SERVER")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the song list
    List {
        /// Worship leader (Nikita or Grace)
        #[arg(short, long, default_value = "Nikita")]
        leader: Leader,
        /// Only titles containing this text (case-insensitive)
        #[arg(long, default_value = "")]
        search: String,
        /// Sort field (title or key)
        #[arg(long, default_value = "title")]
        sort: SortKey,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Add a song
    Add {
        #[arg(short, long)]
        leader: Leader,
        #[arg(long)]
        title: String,
        #[arg(long)]
        key: String,
    },
    /// Edit a song's title and/or key
    Edit {
        #[arg(short, long)]
        leader: Leader,
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        key: Option<String>,
    },
    /// Delete a song
    Delete {
        #[arg(short, long)]
        leader: Leader,
        id: Uuid,
    },
    /// Check that the API is up
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api = SongApiClient::new(args.server);

    match args.command {
        Command::Status => {
            let message = api.status().await.context("API not reachable")?;
            println!("{}", message);
        }
        Command::List {
            leader,
            search,
            sort,
            desc,
        } => {
            let controller = load(api, leader).await?;
            controller
                .update_session(|session| {
                    session.set_query(search);
                    // Selecting flips direction; land on the requested one
                    session.sort_by(sort);
                    if session.sort().ascending == desc {
                        session.sort_by(sort);
                    }
                })
                .await;
            print_view(&controller.view().await);
        }
        Command::Add { leader, title, key } => {
            let controller = load(api, leader).await?;
            controller
                .update_session(|session| {
                    session.toggle_form();
                    session.set_form_title(title);
                    session.set_form_key(key);
                })
                .await;
            controller.submit().await.context("Failed to add song")?;
            print_view(&controller.view().await);
        }
        Command::Edit {
            leader,
            id,
            title,
            key,
        } => {
            let controller = load(api, leader).await?;
            controller
                .update_session(|session| -> Result<()> {
                    session.edit(id)?;
                    if let Some(title) = title {
                        session.set_form_title(title);
                    }
                    if let Some(key) = key {
                        session.set_form_key(key);
                    }
                    Ok(())
                })
                .await?;
            controller.submit().await.context("Failed to update song")?;
            print_view(&controller.view().await);
        }
        Command::Delete { leader, id } => {
            let controller = load(api, leader).await?;
            controller.delete(id).await.context("Failed to delete song")?;
            print_view(&controller.view().await);
        }
    }

    Ok(())
}

/// Controller with the leader's songs loaded
async fn load(api: SongApiClient, leader: Leader) -> Result<SongListController> {
    let controller = SongListController::new(api, leader);
    controller
        .select_leader(leader)
        .await
        .with_context(|| format!("Failed to load songs for {}", leader))?;
    Ok(controller)
}

fn print_view(view: &SessionView) {
    println!("{}", view.list.heading);
    println!("Total Songs: {}", view.list.total_songs);
    for song in &view.list.songs {
        println!("  {} - {}  ({})", song.title, song.key, song.id);
    }
}
