use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use focuswatch::account::{ChildCode, ChildLogin, ChildRegistration, ParentLogin, ParentRegistration};
use focuswatch::api::{ApiClient, Role, SessionStore, StatusEndpoint, StatusReader};
use focuswatch::app::{App, Exit};
use focuswatch::config::{Settings, DEFAULT_CONFIG_FILE};
use focuswatch::data::{Action, Locale, StatusBoard};
use focuswatch::error::{ApiError, FetchError};
use focuswatch::logging::{init_logging, LogTarget};
use focuswatch::poller::{Poller, PollerProfile};
use focuswatch::source::PollerSource;
use focuswatch::ui::{self, Theme};
use focuswatch::events;

#[derive(Parser, Debug)]
#[command(name = "focuswatch")]
#[command(about = "Terminal client for monitoring concentration and gaze status")]
struct Args {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Display language (overrides config)
    #[arg(long, global = true, value_enum)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch your own focus status
    Watch,

    /// Log in as a child by face recognition
    Login {
        username: String,
    },

    /// Register a child account and face
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        region: String,
        #[arg(long = "school")]
        school_name: String,
    },

    /// End the child session
    Logout,

    /// Parent account commands
    Parent {
        #[command(subcommand)]
        command: ParentCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ParentCommand {
    /// Watch a linked child's focus status
    Watch {
        /// Child code, e.g. STU-40fb-c5ff
        code: String,
    },

    /// Log in with username and password
    Login {
        #[arg(long)]
        username: String,
        /// Prompted for without echo when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Register a parent account linked to a child code
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        child_code: String,
        /// Prompted for (twice, without echo) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Link another child to this account
    AddChild {
        code: String,
    },

    /// End the parent session
    Logout,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut settings = Settings::load(&config_path)?;
    if let Some(base_url) = args.base_url {
        settings.server.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(locale) = args.locale {
        settings.ui.locale = locale;
    }

    let store = SessionStore::new(settings.session.path());
    let rt = Runtime::new()?;

    match args.command {
        Command::Watch => run_watch(&rt, &settings, &store, StatusEndpoint::Child),
        Command::Parent {
            command: ParentCommand::Watch { code },
        } => {
            let code = ChildCode::parse(&code)?;
            run_watch(&rt, &settings, &store, StatusEndpoint::Parent(code))
        }
        command => {
            init_logging(&settings.log.level, LogTarget::Stderr)?;
            rt.block_on(run_command(command, &settings, &store))
        }
    }
}

fn client(settings: &Settings, token: Option<String>) -> Result<ApiClient> {
    Ok(ApiClient::builder()
        .base_url(&settings.server.base_url)
        .timeout(settings.server.timeout())
        .maybe_session_token(token)
        .build()?)
}

/// Turn an account failure into a user-facing error.
fn report(settings: &Settings, store: &SessionStore, action: Action, err: ApiError) -> anyhow::Error {
    warn!(?action, error = %err, "Request failed");
    if matches!(err, ApiError::Fetch(FetchError::SessionExpired)) {
        store.forget();
    }
    anyhow!(settings.ui.locale.api_error_message(action, &err))
}

/// Run a one-shot account command
async fn run_command(command: Command, settings: &Settings, store: &SessionStore) -> Result<()> {
    match command {
        Command::Login { username } => {
            let client = client(settings, None)?;
            let token = client
                .child_login(&ChildLogin { username: username.clone() })
                .await
                .map_err(|e| report(settings, store, Action::ChildLogin, e))?;
            store.save(&token)?;
            println!("Logged in as {}", username);
        }
        Command::Register {
            username,
            email,
            region,
            school_name,
        } => {
            let client = client(settings, None)?;
            let form = ChildRegistration {
                username,
                email,
                region,
                school_name,
            };
            let registration = client
                .child_register(&form)
                .await
                .map_err(|e| report(settings, store, Action::ChildRegister, e))?;
            if let Some(token) = &registration.session_token {
                store.save(token)?;
            }
            println!("Registered. Child code: {}", registration.child_code);
        }
        Command::Logout => logout(settings, store, Role::Child).await?,
        Command::Parent { command } => match command {
            ParentCommand::Login { username, password } => {
                let password = match password {
                    Some(password) => password,
                    None => events::read_hidden_line("Password")?,
                };
                let client = client(settings, None)?;
                let token = client
                    .parent_login(&ParentLogin {
                        username: username.clone(),
                        password,
                    })
                    .await
                    .map_err(|e| report(settings, store, Action::ParentLogin, e))?;
                store.save(&token)?;
                println!("Logged in as {}", username);
            }
            ParentCommand::Register {
                username,
                email,
                child_code,
                password,
            } => {
                let (password, password_confirm) = match password {
                    Some(password) => (password.clone(), password),
                    None => (
                        events::read_hidden_line("Password")?,
                        events::read_hidden_line("Confirm password")?,
                    ),
                };
                let form = ParentRegistration {
                    username,
                    password,
                    password_confirm,
                    email,
                    child_code,
                };
                client(settings, None)?
                    .parent_register(&form)
                    .await
                    .map_err(|e| report(settings, store, Action::ParentRegister, e))?;
                println!("Registered. Log in with: {}", Role::Parent.login_hint());
            }
            ParentCommand::AddChild { code } => {
                let code = ChildCode::parse(&code)?;
                let token = require_session(store, Role::Parent)?;
                client(settings, Some(token))?
                    .add_child(&code)
                    .await
                    .map_err(|e| report(settings, store, Action::AddChild, e))?;
                println!("Added child {}", code);
            }
            ParentCommand::Logout => logout(settings, store, Role::Parent).await?,
            ParentCommand::Watch { .. } => bail!("watch runs the dashboard"),
        },
        Command::Watch => bail!("watch runs the dashboard"),
    }
    Ok(())
}

fn require_session(store: &SessionStore, role: Role) -> Result<String> {
    match store.load()? {
        Some(token) => Ok(token),
        None => bail!("Not logged in. Run `{}` first.", role.login_hint()),
    }
}

async fn logout(settings: &Settings, store: &SessionStore, role: Role) -> Result<()> {
    let Some(token) = store.load()? else {
        println!("Not logged in.");
        return Ok(());
    };
    let entry = client(settings, Some(token))?
        .logout(role)
        .await
        .map_err(|e| report(settings, store, Action::Logout, e))?;
    store.clear()?;
    println!("Logged out. Next: {}{}", settings.server.base_url, entry);
    Ok(())
}

/// Run the dashboard for one status endpoint
fn run_watch(
    rt: &Runtime,
    settings: &Settings,
    store: &SessionStore,
    endpoint: StatusEndpoint,
) -> Result<()> {
    let role = endpoint.role();
    let log_target = match settings.log.file.as_deref() {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Discard,
    };
    init_logging(&settings.log.level, log_target)?;

    let token = require_session(store, role)?;
    let client = client(settings, Some(token))?;

    let (profile, board, title) = match &endpoint {
        StatusEndpoint::Child => (
            PollerProfile::child(&settings.poll),
            StatusBoard::new(settings.ui.locale, settings.poll.pulse()),
            "My focus".to_string(),
        ),
        StatusEndpoint::Parent(code) => (
            PollerProfile::parent(&settings.poll),
            StatusBoard::new(settings.ui.locale, settings.poll.pulse())
                .without_face()
                .verbatim_labels(),
            code.to_string(),
        ),
    };

    // Pollers need the runtime; the TUI loop stays on this thread
    let _guard = rt.enter();
    let poller = Poller::new(StatusReader::new(client, endpoint), profile);
    let source = PollerSource::spawn(poller);

    let mut app = App::new(
        Box::new(source),
        role,
        title,
        board,
        Theme::from_choice(settings.ui.theme),
    );

    run_tui(&mut app)?;
    let exit = app.exit();
    // Dropping the app stops the poller
    drop(app);

    match exit {
        Exit::Quit => {}
        Exit::Logout => rt.block_on(logout(settings, store, role))?,
        Exit::SessionExpired(entry) => {
            info!(entry, "Session expired");
            store.clear()?;
            eprintln!("{}", settings.ui.locale.session_expired());
            eprintln!("Log in again with: {}", role.login_hint());
        }
    }
    Ok(())
}

/// Setup the terminal, run the loop, and always restore the terminal
fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    app.reload_data();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Redraw faster while a field is pulsing so the highlight clears on time
        let timeout = if app.board.any_pulsing(std::time::Instant::now()) {
            std::time::Duration::from_millis(50)
        } else {
            std::time::Duration::from_millis(100)
        };

        if let Some(event) = events::poll_event(timeout)? {
            events::handle_event(app, event);
        }

        app.reload_data();
    }

    Ok(())
}
