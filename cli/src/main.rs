#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sec_client::app::SecClient;
use sec_client::config::{ClientConfig, ConfigError};
use sec_client::models::{NewClass, NewComment, NewInstitution, NewResource, Role, SignInRequest, SignUpRequest};
use sec_client::net::{ApiError, ApiResponse};
use sec_client::router::{Navigation, Route};
use sec_client::state::storage::{FileStorage, KeyValueStore};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `sec login` first")]
    NotSignedIn,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sec", about = "SEC educational platform client")]
struct Cli {
    #[arg(long, env = "SEC_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "SEC_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        role: Role,
    },
    Logout,
    Whoami,
    /// Run the route guard for a client path.
    Navigate {
        path: String,
    },
    Institutions(InstitutionCommand),
    Classes(ClassCommand),
    Resources(ResourceCommand),
    Comments(CommentCommand),
}

#[derive(Args, Debug)]
struct InstitutionCommand {
    #[command(subcommand)]
    command: InstitutionSubcommand,
}

#[derive(Subcommand, Debug)]
enum InstitutionSubcommand {
    List,
    Get {
        institution_id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
}

#[derive(Args, Debug)]
struct ClassCommand {
    #[command(subcommand)]
    command: ClassSubcommand,
}

#[derive(Subcommand, Debug)]
enum ClassSubcommand {
    List {
        institution_id: String,
    },
    Get {
        institution_id: String,
        class_id: String,
    },
    Create {
        institution_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        teacher_id: String,
    },
}

#[derive(Args, Debug)]
struct ResourceCommand {
    #[command(subcommand)]
    command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResourceSubcommand {
    List {
        institution_id: String,
        class_id: String,
    },
    Get {
        institution_id: String,
        class_id: String,
        resource_id: String,
    },
    Create {
        institution_id: String,
        class_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "file-id")]
        file_ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CommentCommand {
    #[command(subcommand)]
    command: CommentSubcommand,
}

#[derive(Subcommand, Debug)]
enum CommentSubcommand {
    List {
        institution_id: String,
        class_id: String,
    },
    Get {
        institution_id: String,
        class_id: String,
        comment_id: String,
    },
    Create {
        institution_id: String,
        class_id: String,
        #[arg(long)]
        content: String,
        #[arg(long, help = "Defaults to the signed-in user")]
        author_id: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        if let CliError::Api(api) = &e {
            if let Some(detail) = api.detail() {
                eprintln!("  {detail}");
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.base_url.as_deref(), cli.session_file)?;
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "config");

    let storage = FileStorage::open(&config.session_file);
    let mut client = SecClient::new(&config, storage)?;

    match cli.command {
        Command::Login { email, password } => run_login(&mut client, email, password).await,
        Command::Register { name, email, password, role } => {
            let user = client.sign_up(&SignUpRequest { name, email, password, role }).await?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Logout => {
            client.logout();
            print_json(&json!({ "signed_out": true }))
        }
        Command::Whoami => print_json(&whoami(&client)),
        Command::Navigate { path } => {
            let navigation = client.navigate(&path);
            print_json(&navigation_report(&path, &navigation))
        }
        Command::Institutions(cmd) => run_institutions(&mut client, cmd).await,
        Command::Classes(cmd) => run_classes(&mut client, cmd).await,
        Command::Resources(cmd) => run_resources(&mut client, cmd).await,
        Command::Comments(cmd) => run_comments(&mut client, cmd).await,
    }
}

/// Build config from the global flags. Clap has already folded
/// `SEC_API_BASE_URL` and `SEC_SESSION_FILE` into them, flag first, so the
/// environment is not consulted again here. Blank values mean "unset".
fn resolve_config(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::default();
    if let Some(base_url) = base_url.filter(|v| !v.trim().is_empty()) {
        config = config.with_base_url(base_url)?;
    }
    if let Some(session_file) = session_file.filter(|p| !p.as_os_str().is_empty()) {
        config.session_file = session_file;
    }
    Ok(config)
}

async fn run_login<S: KeyValueStore>(
    client: &mut SecClient<S>,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let response = client.sign_in(&SignInRequest { email, password }).await?;
    print_json(&json!({
        "message": response.message,
        "user_id": response.user_id,
        "name": response.name,
        "role": response.role,
    }))
}

async fn run_institutions<S: KeyValueStore>(
    client: &mut SecClient<S>,
    cmd: InstitutionCommand,
) -> Result<(), CliError> {
    require_view(client, &Route::DEFAULT)?;
    let service = client.institutions();
    let response = match cmd.command {
        InstitutionSubcommand::List => service.get_all().await?,
        InstitutionSubcommand::Get { institution_id } => service.get(&institution_id).await?,
        InstitutionSubcommand::Create { name, address } => {
            service.create(&NewInstitution { name, address }).await?
        }
    };
    print_response(&response)
}

async fn run_classes<S: KeyValueStore>(client: &mut SecClient<S>, cmd: ClassCommand) -> Result<(), CliError> {
    let view = match &cmd.command {
        ClassSubcommand::Get { class_id, .. } => Route::Class { id: class_id.clone() },
        ClassSubcommand::List { .. } | ClassSubcommand::Create { .. } => Route::DEFAULT,
    };
    require_view(client, &view)?;
    let service = client.institutions();
    let response = match cmd.command {
        ClassSubcommand::List { institution_id } => service.get_all_classes(&institution_id).await?,
        ClassSubcommand::Get { institution_id, class_id } => service.get_class(&institution_id, &class_id).await?,
        ClassSubcommand::Create { institution_id, name, teacher_id } => {
            service.create_class(&institution_id, &NewClass { name, teacher_id }).await?
        }
    };
    print_response(&response)
}

async fn run_resources<S: KeyValueStore>(client: &mut SecClient<S>, cmd: ResourceCommand) -> Result<(), CliError> {
    let class_id = match &cmd.command {
        ResourceSubcommand::List { class_id, .. }
        | ResourceSubcommand::Get { class_id, .. }
        | ResourceSubcommand::Create { class_id, .. } => class_id.clone(),
    };
    require_view(client, &Route::Class { id: class_id })?;
    let service = client.institutions();
    let response = match cmd.command {
        ResourceSubcommand::List { institution_id, class_id } => {
            service.get_all_resources(&institution_id, &class_id).await?
        }
        ResourceSubcommand::Get { institution_id, class_id, resource_id } => {
            service.get_resource(&institution_id, &class_id, &resource_id).await?
        }
        ResourceSubcommand::Create { institution_id, class_id, title, description, file_ids } => {
            let data = NewResource { title, description, file_ids };
            service.create_resource(&institution_id, &class_id, &data).await?
        }
    };
    print_response(&response)
}

async fn run_comments<S: KeyValueStore>(client: &mut SecClient<S>, cmd: CommentCommand) -> Result<(), CliError> {
    let class_id = match &cmd.command {
        CommentSubcommand::List { class_id, .. }
        | CommentSubcommand::Get { class_id, .. }
        | CommentSubcommand::Create { class_id, .. } => class_id.clone(),
    };
    require_view(client, &Route::Class { id: class_id })?;
    let author = client.session().user().id.clone();
    let service = client.institutions();
    let response = match cmd.command {
        CommentSubcommand::List { institution_id, class_id } => {
            service.get_all_comments(&institution_id, &class_id).await?
        }
        CommentSubcommand::Get { institution_id, class_id, comment_id } => {
            service.get_comment(&institution_id, &class_id, &comment_id).await?
        }
        CommentSubcommand::Create { institution_id, class_id, content, author_id } => {
            let data = NewComment { content, author_id: author_id.unwrap_or(author) };
            service.create_comment(&institution_id, &class_id, &data).await?
        }
    };
    print_response(&response)
}

/// Run the guard for the view a command belongs to; refuse if it bounces to
/// login.
fn require_view<S: KeyValueStore>(client: &mut SecClient<S>, view: &Route) -> Result<(), CliError> {
    let navigation = client.navigate(&view.path());
    if navigation.destination() == &Route::Login {
        return Err(CliError::NotSignedIn);
    }
    Ok(())
}

fn whoami<S: KeyValueStore>(client: &SecClient<S>) -> Value {
    let session = client.session();
    if !session.is_authenticated() {
        return json!({ "authenticated": false });
    }
    let user = session.user();
    json!({
        "authenticated": true,
        "id": user.id,
        "name": user.name,
        "role": user.role,
    })
}

fn navigation_report(requested: &str, navigation: &Navigation) -> Value {
    let destination = navigation.destination();
    json!({
        "requested": requested,
        "view": destination.name(),
        "path": destination.path(),
        "redirected": navigation.is_redirect(),
    })
}

fn print_response(response: &ApiResponse) -> Result<(), CliError> {
    print_json(&response.data)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
