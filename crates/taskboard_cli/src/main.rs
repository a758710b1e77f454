//! Command-line front end for the taskboard core.
//!
//! # Responsibility
//! - Open the configured database, seed defaults, run one operation.
//! - Print results as JSON and map `NotFound` to its own exit status.

use clap::{Parser, Subcommand};
use log::error;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::db::open_db;
use taskboard_core::{
    init_logging, seed_defaults, Collection, CoreConfig, LogTarget, SeedData, ServiceError,
    SqliteCollection, Todo, TodoService, User, UserService,
};
use uuid::Uuid;

const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const QUIET_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "taskboard", about = "Manage users and the todos assigned to them", version)]
struct Cli {
    /// SQLite database file. Falls back to `TASKBOARD_DB_PATH`.
    #[arg(long = "db", value_name = "path", global = true)]
    db_path: Option<PathBuf>,
    /// Log level (trace|debug|info|warn|error). Falls back to `TASKBOARD_LOG_LEVEL`.
    #[arg(long = "log-level", value_name = "level", global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Falls back to `TASKBOARD_LOG_DIR`.
    #[arg(long = "log-dir", value_name = "path", global = true)]
    log_dir: Option<String>,
    /// Skip creating the default user and todo.
    #[arg(long = "no-seed", global = true)]
    no_seed: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Todo(TodoCommand),
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// List all users.
    List,
    Get { id: Uuid },
    /// Find a user by exact email.
    ByEmail { email: String },
    Create { name: String, email: String },
    /// Change a user's display name.
    Rename { id: Uuid, name: String },
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum TodoCommand {
    /// List todos assigned to the user with the given email.
    List {
        #[arg(long = "assignee-email", value_name = "email")]
        assignee_email: String,
    },
    Get { id: Uuid },
    Create {
        description: String,
        assignee_email: String,
    },
    /// Mark a todo done (`true`) or open (`false`).
    Done {
        id: Uuid,
        #[arg(action = clap::ArgAction::Set)]
        done: bool,
    },
    /// Reassign a todo to the user with the given email.
    Assign { id: Uuid, email: String },
    /// Replace a todo's description.
    Edit { id: Uuid, description: String },
    Delete { id: Uuid },
}

/// Failure surfaced to the shell.
enum CliError {
    Service(ServiceError),
    Other(String),
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let status = parse_exit_status(&err);
            let _ = err.print();
            return ExitCode::from(status);
        }
    };

    match run(cli) {
        Ok(Some(output)) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: cannot render output: {err}");
                ExitCode::from(EXIT_FAILURE)
            }
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(CliError::Service(err)) if err.is_not_found() => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Err(CliError::Service(err)) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
        Err(CliError::Other(message)) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Help and version output exit 0; usage errors share the generic failure
/// status so that 2 stays reserved for `NotFound`.
fn parse_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_FAILURE
    } else {
        0
    }
}

fn run(cli: Cli) -> Result<Option<Value>, CliError> {
    let config = resolve_config(&cli)?;
    start_logging(&config)?;

    let conn = open_db(&config.db_path).map_err(|err| {
        CliError::Other(format!(
            "cannot open database `{}`: {err}",
            config.db_path.display()
        ))
    })?;
    let users = UserService::new(SqliteCollection::<User>::new(&conn));
    let todos = TodoService::new(SqliteCollection::<Todo>::new(&conn), users);

    if config.seed {
        seed_defaults(&todos, &SeedData::default())?;
    }

    match cli.command {
        Command::User(command) => run_user(todos.users(), command),
        Command::Todo(command) => run_todo(&todos, command),
    }
}

fn run_user<C>(users: &UserService<C>, command: UserCommand) -> Result<Option<Value>, CliError>
where
    C: Collection<User>,
{
    let output = match command {
        UserCommand::List => to_json(&users.list_all()?)?,
        UserCommand::Get { id } => to_json(&users.get_by_id(id)?)?,
        UserCommand::ByEmail { email } => to_json(&users.get_by_email(&email)?)?,
        UserCommand::Create { name, email } => to_json(&users.create(name, email)?)?,
        UserCommand::Rename { id, name } => to_json(&users.change_name(id, name)?)?,
        UserCommand::Delete { id } => {
            users.delete(id)?;
            return Ok(None);
        }
    };
    Ok(Some(output))
}

fn run_todo<T, U>(
    todos: &TodoService<T, U>,
    command: TodoCommand,
) -> Result<Option<Value>, CliError>
where
    T: Collection<Todo>,
    U: Collection<User>,
{
    let output = match command {
        TodoCommand::List { assignee_email } => {
            to_json(&todos.list_by_assignee_email(&assignee_email)?)?
        }
        TodoCommand::Get { id } => to_json(&todos.get_by_id(id)?)?,
        TodoCommand::Create {
            description,
            assignee_email,
        } => to_json(&todos.create(description, &assignee_email)?)?,
        TodoCommand::Done { id, done } => to_json(&todos.set_done(id, done)?)?,
        TodoCommand::Assign { id, email } => to_json(&todos.assign(id, &email)?)?,
        TodoCommand::Edit { id, description } => to_json(&todos.edit(id, description)?)?,
        TodoCommand::Delete { id } => {
            todos.delete(id)?;
            return Ok(None);
        }
    };
    Ok(Some(output))
}

/// Flags win over environment variables.
fn resolve_config(cli: &Cli) -> Result<CoreConfig, CliError> {
    let mut config = CoreConfig::from_env().map_err(|err| CliError::Other(err.to_string()))?;
    if let Some(path) = &cli.db_path {
        config.db_path = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config
            .set_log_level(level)
            .map_err(|err| CliError::Other(err.to_string()))?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if cli.no_seed {
        config.seed = false;
    }
    Ok(config)
}

/// File logging uses the configured level (or the build default); stderr
/// logging stays at `warn` unless a level is given explicitly.
fn start_logging(config: &CoreConfig) -> Result<(), CliError> {
    let (target, level) = match &config.log_dir {
        Some(dir) => (
            LogTarget::directory(dir).map_err(CliError::Other)?,
            config
                .log_level
                .unwrap_or_else(taskboard_core::default_log_level),
        ),
        None => (
            LogTarget::Stderr,
            config.log_level.unwrap_or(QUIET_LOG_LEVEL),
        ),
    };
    init_logging(level, target).map_err(CliError::Other)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value)
        .map_err(|err| CliError::Other(format!("cannot render output: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{
        parse_exit_status, run_todo, run_user, Cli, Command, TodoCommand, UserCommand,
        EXIT_FAILURE, EXIT_NOT_FOUND,
    };
    use clap::Parser;
    use taskboard_core::{MemoryCollection, Todo, TodoService, User, UserService};

    fn service() -> TodoService<MemoryCollection<Todo>, MemoryCollection<User>> {
        TodoService::new(
            MemoryCollection::new(),
            UserService::new(MemoryCollection::new()),
        )
    }

    #[test]
    fn parses_todo_done_with_explicit_flag_value() {
        let id = uuid::Uuid::new_v4();
        let cli = Cli::try_parse_from(["taskboard", "todo", "done", &id.to_string(), "false"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Todo(TodoCommand::Done { done: false, .. })
        ));
    }

    #[test]
    fn malformed_ids_exit_with_generic_failure_not_not_found() {
        let err = Cli::try_parse_from(["taskboard", "user", "get", "not-a-uuid"]).unwrap_err();
        assert_eq!(parse_exit_status(&err), EXIT_FAILURE);
        assert_ne!(parse_exit_status(&err), EXIT_NOT_FOUND);

        let err = Cli::try_parse_from(["taskboard", "todo", "frobnicate"]).unwrap_err();
        assert_eq!(parse_exit_status(&err), EXIT_FAILURE);
    }

    #[test]
    fn help_and_version_exit_successfully() {
        let err = Cli::try_parse_from(["taskboard", "--help"]).unwrap_err();
        assert_eq!(parse_exit_status(&err), 0);

        let err = Cli::try_parse_from(["taskboard", "--version"]).unwrap_err();
        assert_eq!(parse_exit_status(&err), 0);
    }

    #[test]
    fn global_flags_are_accepted_after_subcommands() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "todo",
            "list",
            "--assignee-email",
            "alice@x.io",
            "--no-seed",
            "--db",
            "/tmp/board.sqlite3",
        ])
        .unwrap();
        assert!(cli.no_seed);
        assert_eq!(
            cli.db_path.as_deref(),
            Some(std::path::Path::new("/tmp/board.sqlite3"))
        );
    }

    #[test]
    fn commands_render_json_and_deletes_render_nothing() {
        let todos = service();
        let created = run_user(
            todos.users(),
            UserCommand::Create {
                name: "Alice".to_string(),
                email: "alice@x.io".to_string(),
            },
        )
        .ok()
        .flatten()
        .unwrap();
        assert_eq!(created["email"], "alice@x.io");

        let todo = run_todo(
            &todos,
            TodoCommand::Create {
                description: "Buy milk".to_string(),
                assignee_email: "alice@x.io".to_string(),
            },
        )
        .ok()
        .flatten()
        .unwrap();
        assert_eq!(todo["assigneeName"], "Alice");

        let id = todo["id"].as_str().unwrap().parse().unwrap();
        assert!(matches!(
            run_todo(&todos, TodoCommand::Delete { id }),
            Ok(None)
        ));
    }

    #[test]
    fn missing_entities_surface_as_not_found() {
        let todos = service();
        let result = run_todo(
            &todos,
            TodoCommand::List {
                assignee_email: "ghost@x.io".to_string(),
            },
        );
        assert!(matches!(
            result,
            Err(super::CliError::Service(ref err)) if err.is_not_found()
        ));
    }
}
