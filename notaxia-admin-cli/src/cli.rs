//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use notaxia_api::DEFAULT_PAGE_SIZE;
use notaxia_api::admin::AttachmentKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notaxia-admin")]
#[command(about = "Notaxia admin console", version)]
pub struct Cli {
    /// API base URL. Defaults to NOTAXIA_API_URL, then NEXT_PUBLIC_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file holding the admin token
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in with a one-time code sent to an admin email
    Login {
        #[arg(long)]
        email: String,
        /// Code from an earlier request. When omitted, a new code is
        /// requested and read from stdin.
        #[arg(long)]
        code: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show whether a session is stored
    #[command(alias = "status")]
    Whoami,
    /// Dashboard counters
    Stats,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Thoughts(ThoughtsCommand),
    #[command(subcommand)]
    VoiceNotes(VoiceNotesCommand),
    #[command(subcommand)]
    Documents(DocumentsCommand),
    #[command(subcommand)]
    Attachments(AttachmentsCommand),
    #[command(subcommand)]
    Subscriptions(PagedCommand),
    #[command(subcommand)]
    Admins(AdminsCommand),
    /// Send a push notification
    Notify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Target user. Repeat for several; omit to target everyone.
        #[arg(long = "user-id")]
        user_ids: Vec<String>,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UsersCommand {
    List {
        /// Keep users whose email or name contains this
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show { id: String },
    GrantPro {
        id: String,
        /// Expiry date such as 2026-12-31
        #[arg(long)]
        expires_at: Option<String>,
    },
    ResetUsage { id: String },
    ResendVerification { id: String },
    Ban { id: String },
    Unban { id: String },
    Delete { id: String },
    RevokeAdmin { id: String },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ThoughtsCommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        include_content: bool,
    },
    /// Queue a thought for processing
    Process { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VoiceNotesCommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DocumentsCommand {
    List {
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AttachmentsCommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
        /// Keep only image, document or audio attachments
        #[arg(long = "type")]
        kind: Option<AttachmentKind>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PagedCommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AdminsCommand {
    List,
}

impl Command {
    /// Dashboard route this command stands in for.
    pub fn route(&self) -> String {
        match self {
            Command::Login { .. } | Command::Logout => "/admin/login".to_string(),
            Command::Whoami | Command::Stats => "/admin".to_string(),
            Command::Users(UsersCommand::List { .. }) => "/admin/users".to_string(),
            Command::Users(cmd) => format!("/admin/users/{}", cmd.user_id().unwrap_or_default()),
            Command::Thoughts(_) => "/admin/thoughts".to_string(),
            Command::VoiceNotes(_) => "/admin/voice-notes".to_string(),
            Command::Documents(_) => "/admin/documents".to_string(),
            Command::Attachments(_) => "/admin/thought-attachments".to_string(),
            Command::Subscriptions(_) => "/admin/subscriptions".to_string(),
            Command::Admins(_) => "/admin/admins".to_string(),
            Command::Notify { .. } => "/admin/notifications".to_string(),
            Command::Health => "/admin/system".to_string(),
        }
    }
}

impl UsersCommand {
    fn user_id(&self) -> Option<&str> {
        match self {
            UsersCommand::List { .. } => None,
            UsersCommand::Show { id }
            | UsersCommand::GrantPro { id, .. }
            | UsersCommand::ResetUsage { id }
            | UsersCommand::ResendVerification { id }
            | UsersCommand::Ban { id }
            | UsersCommand::Unban { id }
            | UsersCommand::Delete { id }
            | UsersCommand::RevokeAdmin { id } => Some(id),
        }
    }
}
