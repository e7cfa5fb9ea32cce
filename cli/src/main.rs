use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use nextbyte::auth::{AuthService, LogNavigator};
use nextbyte::features::enrollment::enroll;
use nextbyte::features::leaderboard::{fetch_leaderboard, rank_of};
use nextbyte::features::notifications::{fetch_notifications, mark_notification_read, unread_count};
use nextbyte::features::tickets::{NewTicket, create_ticket, list_tickets};
use nextbyte::features::upload::upload_profile_photo;
use nextbyte::models::RegisterRequest;
use nextbyte::net::{ApiClient, ReqwestTransport};
use nextbyte::session::{inspect_token, now_secs};
use nextbyte::storage::file::FileStore;
use nextbyte::{ApiConfig, AuthError};
use serde_json::{Map, Value};

type Service = AuthService<ReqwestTransport, FileStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("no upload endpoint; pass --upload-url or set NEXTBYTE_UPLOAD_URL")]
    MissingUploadUrl,
    #[error("nothing to update; pass --name or --email")]
    NothingToUpdate,
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "nextbyte", about = "NextByte account and session CLI")]
struct Cli {
    #[arg(long, env = "NEXTBYTE_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "NEXTBYTE_UPLOAD_URL")]
    upload_url: Option<String>,

    #[arg(long, env = "NEXTBYTE_SESSION_FILE", default_value = ".nextbyte/session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request an OTP for a phone number.
    Login {
        #[arg(long)]
        phone: String,
    },
    /// Exchange phone + OTP for a stored session.
    Verify {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    /// Create an account, and sign in when `--otp` is given.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        otp: Option<String>,
    },
    Whoami,
    Status,
    Logout,
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    UploadPhoto {
        file: PathBuf,
    },
    Notifications {
        /// Mark this notification read instead of listing.
        #[arg(long)]
        read: Option<String>,
    },
    Tickets(TicketsCommand),
    Enroll {
        course_id: String,
    },
    Leaderboard {
        course_id: String,
    },
}

#[derive(Args, Debug)]
struct TicketsCommand {
    #[command(subcommand)]
    command: TicketsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TicketsSubcommand {
    List,
    Create {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_url.as_deref(), cli.upload_url.as_deref())?;
    let transport = ReqwestTransport::new(config.timeouts)?;
    let api = ApiClient::new(transport, &config.api_base_url);
    let service = AuthService::new(api, FileStore::new(cli.session_file), Rc::new(LogNavigator), &config);

    run(&service, &config, cli.command).await
}

async fn run(service: &Service, config: &ApiConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { phone } => {
            let message = service.login_user(&phone).await?;
            println!("{}", message.unwrap_or_else(|| "OTP sent".to_owned()));
        }
        Command::Verify { phone, otp } => {
            let session = service.verify_otp(&phone, &otp).await?;
            println!("signed in as {} ({})", session.user.name, session.user.id);
        }
        Command::Register { name, phone, email, otp } => {
            let request = RegisterRequest { name, phone, email };
            match otp {
                Some(otp) => {
                    let outcome = service.register_and_verify(&request, &otp).await?;
                    println!("registered and signed in as {}", outcome.session.user.name);
                }
                None => print_json(&service.register_user(&request).await?)?,
            }
        }
        Command::Whoami => {
            let me = service.fetch_me().await?;
            print_json(&serde_json::to_value(&me)?)?;
        }
        Command::Status => print_status(service),
        Command::Logout => {
            service.logout_user();
            println!("signed out");
        }
        Command::UpdateProfile { name, email } => {
            let user = service.current_user().ok_or(AuthError::NotAuthenticated)?;
            let patch = profile_patch(name, email).ok_or(CliError::NothingToUpdate)?;
            let updated = service.update_user_by_id(&user.id, patch).await?;
            print_json(&serde_json::to_value(&updated)?)?;
        }
        Command::UploadPhoto { file } => {
            let upload_url = config.upload_url.as_deref().ok_or(CliError::MissingUploadUrl)?;
            let bytes = std::fs::read(&file).map_err(|source| CliError::ReadFile { path: file.clone(), source })?;
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("photo");
            let updated = upload_profile_photo(service, upload_url, file_name, content_type_for(&file), bytes).await?;
            print_json(&serde_json::to_value(&updated)?)?;
        }
        Command::Notifications { read: Some(id) } => {
            mark_notification_read(service, &id).await?;
            println!("marked {id} read");
        }
        Command::Notifications { read: None } => {
            let items = fetch_notifications(service).await?;
            for item in &items {
                let marker = if item.is_read { ' ' } else { '*' };
                println!("{marker} {}  {}: {}", item.id, item.title, item.message);
            }
            println!("{} unread", unread_count(&items));
        }
        Command::Tickets(tickets) => match tickets.command {
            TicketsSubcommand::List => {
                for ticket in list_tickets(service).await? {
                    println!("{}  [{}] {}", ticket.id, ticket.status, ticket.subject);
                }
            }
            TicketsSubcommand::Create { subject, message, category } => {
                let created = create_ticket(service, &NewTicket { subject, message, category }).await?;
                println!("created ticket {}", created.id);
            }
        },
        Command::Enroll { course_id } => {
            let response = enroll(service, &course_id).await?;
            match response.payment_url.as_deref().filter(|_| response.requires_payment()) {
                Some(url) => println!("complete payment at {url}"),
                None => println!("{}", response.message.as_deref().unwrap_or("enrolled")),
            }
        }
        Command::Leaderboard { course_id } => {
            let entries = fetch_leaderboard(service, &course_id).await?;
            for (index, entry) in entries.iter().enumerate() {
                println!("{:>3}. {:<24} {}", index + 1, entry.name, entry.points);
            }
            if let Some(rank) = service.current_user().and_then(|u| rank_of(&entries, &u.id)) {
                println!("your rank: {rank}");
            }
        }
    }
    Ok(())
}

fn resolve_config(api_url: Option<&str>, upload_url: Option<&str>) -> Result<ApiConfig, CliError> {
    let mut config = match api_url {
        Some(url) => ApiConfig::from_env_with_api_url(url)?,
        None => ApiConfig::from_env()?,
    };
    if let Some(url) = upload_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.upload_url = Some(url.trim_end_matches('/').to_owned());
    }
    Ok(config)
}

fn print_status(service: &Service) {
    let Some(token) = service.tokens().token() else {
        println!("not signed in");
        return;
    };
    let user = service.current_user();
    if service.tokens().token().is_none() {
        println!("account restricted; session cleared");
        return;
    }
    if !service.is_authenticated() {
        println!("session expired; run `login` again");
        return;
    }
    let expiry = inspect_token(&token, now_secs())
        .exp
        .map_or_else(|| "unknown".to_owned(), |exp| exp.to_string());
    match user {
        Some(user) => println!("signed in as {} ({}); token expires at {expiry}", user.name, user.id),
        None => println!("signed in; token expires at {expiry}"),
    }
}

fn profile_patch(name: Option<String>, email: Option<String>) -> Option<Map<String, Value>> {
    let mut patch = Map::new();
    if let Some(name) = name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()) {
        patch.insert("name".to_owned(), Value::String(name));
    }
    if let Some(email) = email.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty()) {
        patch.insert("email".to_owned(), Value::String(email));
    }
    (!patch.is_empty()).then_some(patch)
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
