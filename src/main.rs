// src/main.rs
mod app;
mod config;
mod input;
mod models;
mod network;
mod page;
mod projection;
mod prompts;
mod selection;
mod theme;
mod ui;
mod utils;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use crate::app::App;
use crate::config::{Settings, save_session_cookie};
use crate::models::{
    ActionReport, CollectionContext, CollectionKind, Confirmation, Followup, NoticeLevel,
};
use crate::network::{AlbumApi, HttpAlbumApi};
use crate::page::parse_album_page;
use crate::theme::Theme;
use crate::utils::{init_logging, prompt_yes_no, resolve_log_path};

#[derive(Parser)]
#[command(name = "album-curator", version, about = "Curate event photo albums from the terminal")]
struct Cli {
    /// Backend base URL, overrides the configured one
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse an album and delete images in bulk
    Album {
        #[arg(long)]
        album_id: String,
        #[arg(long)]
        event_id: String,
        /// The album is the event's "all photos" collection
        #[arg(long)]
        all_photos: bool,
    },
    /// Delete a whole album
    DeleteAlbum {
        #[arg(long)]
        album_id: String,
        #[arg(long)]
        event_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete an event
    DeleteEvent {
        #[arg(long)]
        event_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Store the backend session cookie (e.g. `session=...`) in the user config
    Session { cookie: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new().context("loading configuration")?;

    if let Some(path) = resolve_log_path(settings.log_file.as_deref()) {
        if let Err(err) = init_logging(&path) {
            eprintln!("Logging disabled: {err}");
        }
    }

    let base_url = cli.base_url.unwrap_or_else(|| settings.base_url.clone());
    let api = HttpAlbumApi::new(
        &base_url,
        settings.session_cookie.as_deref(),
        settings.endpoints(),
    )?;
    log::info!("Using backend {}", api.base_url());

    match cli.command {
        Command::Album {
            album_id,
            event_id,
            all_photos,
        } => {
            let kind = if all_photos {
                CollectionKind::AllItems
            } else {
                CollectionKind::NamedCollection
            };
            let context = CollectionContext {
                album_id,
                event_id,
                kind,
            };
            run_album_view(api, context)
        }
        Command::DeleteAlbum {
            album_id,
            event_id,
            yes,
        } => {
            let confirmation =
                Confirmation::from(yes || prompt_yes_no(prompts::CONFIRM_DELETE_ALBUM)?);
            let rt = Runtime::new()?;
            let report = rt.block_on(selection::delete_collection(
                &api,
                &album_id,
                &event_id,
                confirmation,
            ));
            print_report(&api, report)
        }
        Command::DeleteEvent { event_id, yes } => {
            let confirmation =
                Confirmation::from(yes || prompt_yes_no(prompts::CONFIRM_DELETE_EVENT)?);
            let rt = Runtime::new()?;
            let report = rt.block_on(selection::delete_event(&api, &event_id, confirmation));
            print_report(&api, report)
        }
        Command::Session { cookie } => {
            let path = save_session_cookie(&cookie)?;
            println!("Session cookie saved to {}", path.display());
            Ok(())
        }
    }
}

fn print_report(api: &HttpAlbumApi, report: ActionReport) -> Result<()> {
    if let Some(notice) = &report.notice {
        if notice.level == NoticeLevel::Error {
            anyhow::bail!("{notice}");
        }
        println!("{notice}");
    }
    if let Followup::Navigate(path) = &report.followup {
        println!("Continue at {}", api.url(path));
    }
    Ok(())
}

fn run_album_view(api: HttpAlbumApi, context: CollectionContext) -> Result<()> {
    let rt = Runtime::new()?;
    let html = rt
        .block_on(api.fetch_album_page(&context.album_id))
        .with_context(|| format!("loading album {}", context.album_id))?;
    let page = parse_album_page(&html);
    log::info!("Loaded {} image(s) of album {}", page.items.len(), context.album_id);

    let mut app = App::new(api.clone(), rt.handle().clone(), context, page.items);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if let Some(path) = app.exit_to {
        println!("Album deleted. Continue at {}", api.url(&path));
    }
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<HttpAlbumApi>) -> Result<()> {
    let theme = Theme::default();
    while app.running {
        app.drain_events();
        if !app.running {
            break;
        }
        terminal.draw(|f| ui::render_album(f, app, &theme))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    input::handle_key(key_event.code, app);
                }
            }
        }
    }
    Ok(())
}
