mod app;
mod desktop;
mod desktop_notifications;
mod handlers;
mod locales;
mod proto;
mod services;
mod state;
mod storage;
mod ui;

use app::{App, AppEvent};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{SinkExt, StreamExt};
use locales::LocaleRegistry;
use proto::{ClientMessage, ServerMessage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, error::Error, io, path::PathBuf, sync::Arc, time::Duration};
use storage::LocalStorage;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    // Enable terminal raw mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    // Create event channels
    let (tx_to_server, mut rx_from_ui) = mpsc::unbounded_channel::<ClientMessage>();
    let (tx_to_ui, mut rx_from_server) = mpsc::unbounded_channel::<ServerMessage>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Local collaborators
    let storage = LocalStorage::load(LocalStorage::default_path());
    let bundles_dir = env::var("MERIDIAN_LOCALES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("locales"));
    let registry = LocaleRegistry::new(bundles_dir);
    let integration = desktop::detect();

    let mut app = App::new(
        tx_to_server,
        event_tx.clone(),
        storage,
        registry,
        integration,
    );

    // Get server address from command line or use default
    let server_addr = env::args().nth(1).unwrap_or_else(|| "127.0.0.1:7878".to_string());

    // Try to connect with error handling
    let stream = match TcpStream::connect(&server_addr).await {
        Ok(stream) => Some(stream),
        Err(e) => {
            let error_msg = match e.kind() {
                io::ErrorKind::ConnectionRefused => {
                    format!("Connection refused to {}", server_addr)
                }
                io::ErrorKind::TimedOut => format!("Connection timeout to {}", server_addr),
                io::ErrorKind::NotFound => format!("Host not found: {}", server_addr),
                _ => format!("Network error: {}", e),
            };
            error!("{}", error_msg);
            app.ui.show_server_error(error_msg);
            None
        }
    };

    // Spawn terminal event handler
    let event_tx_clone = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;

            // Check for terminal events (non-blocking)
            if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                if let Ok(terminal_event) = event::read() {
                    if event_tx_clone.send(AppEvent::Terminal(terminal_event)).is_err() {
                        break;
                    }
                }
            }

            // Send tick event
            if event_tx_clone.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    if let Some(stream) = stream {
        let mut framed = Framed::new(stream, LengthDelimitedCodec::new());

        // Spawn server message handler
        let event_tx_clone = event_tx.clone();
        tokio::spawn(async move {
            while let Some(msg) = rx_from_server.recv().await {
                if event_tx_clone.send(AppEvent::Server(msg)).is_err() {
                    break;
                }
            }
        });

        // Spawn server communication handler
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Handle outgoing messages to server
                    msg = rx_from_ui.recv() => {
                        if let Some(msg) = msg {
                            let serialized = match bincode::serialize(&msg) {
                                Ok(bytes) => bytes,
                                Err(e) => {
                                    error!("failed to serialize outbound message: {}", e);
                                    continue;
                                }
                            };
                            if framed.send(serialized.into()).await.is_err() {
                                break;
                            }
                        } else {
                            break;
                        }
                    }

                    // Handle incoming messages from server
                    result = framed.next() => {
                        match result {
                            Some(Ok(bytes)) => {
                                if let Ok(msg) = bincode::deserialize::<ServerMessage>(&bytes) {
                                    if tx_to_ui.send(msg).is_err() {
                                        break;
                                    }
                                }
                            }
                            Some(Err(_)) | None => {
                                break;
                            }
                        }
                    }
                }
            }
        });

        app.bootstrap();
    }

    run_app(app, terminal, event_rx).await?;

    Ok(())
}

/// Main application loop, shared by the connected and offline paths.
async fn run_app(
    mut app: App,
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<(), Box<dyn Error>> {
    while !app.ui.should_quit {
        // Render UI
        terminal.draw(|f| ui::ui(f, &mut app))?;

        // Handle events
        if let Some(app_event) = event_rx.recv().await {
            match app_event {
                AppEvent::Terminal(terminal_event) => match terminal_event {
                    CEvent::Key(key) => handlers::handle_key_event(key, &mut app),
                    CEvent::FocusGained => app.handle_focus_gained(),
                    _ => {}
                },
                AppEvent::Server(server_msg) => {
                    app.handle_server_event(server_msg);
                }
                AppEvent::Programs(programs) => {
                    app.handle_programs(programs);
                }
                AppEvent::Tick => {
                    app.on_tick();
                }
            }
        }
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Log to a file; the terminal belongs to ratatui.
fn init_tracing() {
    let log_path = env::temp_dir().join("meridian-client.log");
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
