mod app;
mod config;
mod dashboard;
mod error;
mod event;
mod github;
mod logger;
mod storage;
mod ui;

use app::{App, Command};
use clap::{Parser, Subcommand};
use config::{Config, Overrides};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dashboard::Dashboard;
use event::AppEvent;
use futures::StreamExt;
use github::client::GitHubClient;
use log::LevelFilter;
use std::path::PathBuf;
use storage::LocalStorage;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "github-explorer",
    about = "Search GitHub repositories by owner/name and keep them in a list"
)]
struct Cli {
    #[arg(long, help = "GitHub REST API base URL")]
    base_url: Option<String>,

    #[arg(long, help = "Path of the storage file")]
    storage: Option<PathBuf>,

    #[arg(long, help = "Keep the list in memory only")]
    no_persist: bool,

    #[arg(long, help = "Log level: off, error, warn, info, debug, trace")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Look up one repository and append it to the list
    Add {
        #[arg(help = "Repository as owner/name")]
        name: String,
    },
    /// Print the stored list
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(Overrides {
        api_base_url: cli.base_url,
        storage_path: cli.storage,
        no_persist: cli.no_persist,
        log_level: cli.log_level,
    });

    // stderr output would tear the alternate screen apart
    let fallback = if cli.command.is_some() {
        LevelFilter::Warn
    } else {
        LevelFilter::Off
    };
    logger::init(config.log_level.as_deref(), fallback)?;
    log::debug!("{config:?}");

    let storage = config
        .persist
        .then(|| LocalStorage::new(config.resolved_storage_path()));
    let storage_label = storage.as_ref().map(|s| s.path().display().to_string());
    let mut dashboard = Dashboard::new(storage);
    let client = GitHubClient::new(&config.api_base_url)?;

    match cli.command {
        Some(CliCommand::Add { name }) => {
            dashboard.set_input(name);
            dashboard.search(&client).await;
            if let Some(err) = dashboard.input_error() {
                eprintln!("{err}");
                std::process::exit(1);
            }
            if let Some(repo) = dashboard.repositories().last() {
                println!("{}\t{}", repo.full_name, repo.description());
            }
            Ok(())
        }
        Some(CliCommand::List) => {
            for repo in dashboard.repositories() {
                println!(
                    "{}\t@{}\t{}\t{}",
                    repo.full_name,
                    repo.owner.login,
                    repo.route(),
                    repo.description()
                );
            }
            Ok(())
        }
        None => run_tui(App::new(dashboard, storage_label), client).await,
    }
}

async fn run_tui(
    mut app: App,
    client: GitHubClient,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = tx.clone();
    let input_task = tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    loop {
        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        process_event(&mut app, first, &client, &tx);
        while let Ok(pending) = rx.try_recv() {
            process_event(&mut app, pending, &client, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    input_task.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn process_event(
    app: &mut App,
    event: AppEvent,
    client: &GitHubClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let Some(command) = app.handle_event(event) else {
        return;
    };

    let client = client.clone();
    let tx = tx.clone();
    match command {
        Command::Search(name) => {
            tokio::spawn(async move {
                let result = client.fetch_repository(&name).await;
                let _ = tx.send(AppEvent::SearchFinished(result));
            });
        }
        Command::LoadDetails(full_name) => {
            tokio::spawn(async move {
                let result = client.fetch_details(&full_name).await;
                let _ = tx.send(AppEvent::DetailsFinished { full_name, result });
            });
        }
    }
}
