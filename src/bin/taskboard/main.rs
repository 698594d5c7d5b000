//! Terminal front end for a Taskboard REST backend.
//!
//! Usage:
//!
//! ```text
//! taskboard [--api-url URL] [--token TOKEN] <command>
//! ```
//!
//! `register` and `login` print the issued bearer token; export it as
//! `TASKBOARD_TOKEN` for the task commands. Each task command loads the
//! current collection, applies one operation through the synchronizer and
//! prints the resulting view. Failures are reported on stderr with a
//! non-zero exit status.

mod render;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, bail, eyre};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use taskboard::api::{
    API_URL_ENV, ApiClient, ClientConfig, DEFAULT_API_URL, TIMEOUT_ENV, TOKEN_ENV,
};
use taskboard::auth::{
    adapters::http::HttpAuthGateway,
    domain::{Session, SessionStore},
    services::AuthService,
};
use taskboard::task::{
    adapters::http::HttpTaskStore,
    domain::{StatusFilter, TaskId, TaskStatus},
    services::{TaskRequest, TaskSynchronizer},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TASKBOARD_LOG";

/// Taskboard command-line client.
#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL.
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token from a previous login.
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Username the token was issued to.
    #[arg(long, env = "TASKBOARD_USER", default_value = "taskboard")]
    user: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = TIMEOUT_ENV, default_value_t = 30)]
    timeout_secs: u64,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.api_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs))?;
        Ok(match &self.token {
            Some(token) if !token.trim().is_empty() => config.with_token(token.trim()),
            _ => config,
        })
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Sign in and print the issued token.
    Login(LoginArgs),
    /// List tasks, newest first.
    List {
        /// Status to show, or `all`.
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },
    /// Show tasks in board columns.
    Board,
    /// Show server-side status counts.
    Stats,
    /// Create a task.
    Create(CreateArgs),
    /// Edit a task's fields.
    Edit(EditArgs),
    /// Change a task's status.
    Status {
        /// Task id.
        id: TaskId,
        /// New status.
        status: TaskStatus,
    },
    /// Move a task to a position in a board column.
    Move {
        /// Task id.
        id: TaskId,
        /// Destination column.
        status: TaskStatus,
        /// Position within the destination column.
        #[arg(long, default_value_t = 0)]
        position: usize,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        id: TaskId,
    },
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Account name.
    username: String,
    /// Account password.
    #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[command(flatten)]
    login: LoginArgs,
    /// Password confirmation; defaults to the password.
    #[arg(long)]
    confirm: Option<String>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Task title.
    title: String,
    /// Task description.
    #[arg(long, default_value = "")]
    description: String,
    /// Initial status.
    #[arg(long, default_value_t = TaskStatus::Todo)]
    status: TaskStatus,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Task id.
    id: TaskId,
    /// New title.
    #[arg(long)]
    title: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New status.
    #[arg(long)]
    status: Option<TaskStatus>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.client_config()?;
    let sessions = SessionStore::new();
    if let Some(token) = config.token() {
        sessions.set(Session::new(cli.user.as_str(), token));
    }
    let client = ApiClient::new(&config, sessions.clone())?;

    match cli.command {
        Command::Register(args) => {
            let auth = AuthService::new(Arc::new(HttpAuthGateway::new(client)), sessions);
            let confirmation = args.confirm.as_deref().unwrap_or(&args.login.password);
            let session = auth
                .register(&args.login.username, &args.login.password, confirmation)
                .await?;
            render::session(&mut io::stdout().lock(), &session)?;
        }
        Command::Login(args) => {
            let auth = AuthService::new(Arc::new(HttpAuthGateway::new(client)), sessions);
            let session = auth.login(&args.username, &args.password).await?;
            render::session(&mut io::stdout().lock(), &session)?;
        }
        task_command => {
            if !sessions.is_authenticated() {
                bail!("not signed in; run `taskboard login` and set {TOKEN_ENV}");
            }
            let sync = TaskSynchronizer::new(Arc::new(HttpTaskStore::new(client)));
            run_task_command(&sync, task_command).await?;
        }
    }

    Ok(())
}

async fn run_task_command(sync: &TaskSynchronizer<HttpTaskStore>, command: Command) -> Result<()> {
    sync.refresh().await?;

    match command {
        Command::List { status } => {
            render::list(&mut io::stdout().lock(), &sync.filtered(status), status)?;
        }
        Command::Board => render::board(&mut io::stdout().lock(), &sync.board())?,
        Command::Stats => {
            let counts = sync.load_stats().await?;
            render::stats(&mut io::stdout().lock(), &counts)?;
        }
        Command::Create(args) => {
            let request = TaskRequest::new(args.title)
                .with_description(args.description)
                .with_status(args.status);
            let created = sync.create_task(request).await?;
            render::task(&mut io::stdout().lock(), &created)?;
        }
        Command::Edit(args) => {
            let current = sync
                .task(args.id)
                .ok_or_else(|| eyre!("task {} not found", args.id))?;
            let mut request = TaskRequest::from_task(&current);
            if let Some(title) = args.title {
                request = request.with_title(title);
            }
            if let Some(description) = args.description {
                request = request.with_description(description);
            }
            if let Some(status) = args.status {
                request = request.with_status(status);
            }
            sync.update_task(args.id, request).await?;
            render_current(sync, args.id)?;
        }
        Command::Status { id, status } => {
            sync.change_status(id, status).await?;
            render_current(sync, id)?;
        }
        Command::Move {
            id,
            status,
            position,
        } => {
            let moved = sync.move_task(id, status, position).await;
            render::board(&mut io::stdout().lock(), &sync.board())?;
            moved?;
        }
        Command::Delete { id } => {
            sync.delete_task(id).await?;
            writeln!(io::stdout().lock(), "Deleted {id}")?;
        }
        Command::Register(_) | Command::Login(_) => {
            bail!("authentication commands do not operate on tasks")
        }
    }

    Ok(())
}

fn render_current(sync: &TaskSynchronizer<HttpTaskStore>, id: TaskId) -> Result<()> {
    match sync.task(id) {
        Some(task) => render::task(&mut io::stdout().lock(), &task)?,
        None => writeln!(io::stdout().lock(), "Task {id} is no longer on the board")?,
    }
    Ok(())
}
