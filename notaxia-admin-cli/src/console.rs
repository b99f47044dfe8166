use crate::cli::{
    AdminsCommand, AttachmentsCommand, Cli, Command, DocumentsCommand, PageArgs, PagedCommand,
    ThoughtsCommand, UsersCommand, VoiceNotesCommand,
};
use crate::navigator::TerminalNavigator;
use anyhow::{Context, Result, anyhow, bail};
use notaxia_api::admin::{
    NotificationRequest, NotificationTarget, attachments_of_kind, documents_with_status,
    search_users,
};
use notaxia_api::{AdminApi, ApiConfig, ApiError, AuthApi, ListQuery, Navigator, ResourceClient};
use notaxia_session::{
    DEFAULT_ROUTE, FileSessionStore, GuardAction, GuardState, LOGIN_ROUTE, SessionGuard,
    SessionStore,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Builds the API configuration from the environment and CLI overrides.
pub fn api_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = ApiConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
        .validate()
        .with_context(|| format!("invalid API settings for {:?}", config.base_url))?;
    Ok(config)
}

/// Opens the session file given on the command line, or the default one.
pub fn session_store(cli: &Cli) -> Result<FileSessionStore> {
    match &cli.session_file {
        Some(path) => Ok(FileSessionStore::new(path)),
        None => FileSessionStore::open_default().context("cannot locate session file"),
    }
}

/// Runs commands against one API and one session store.
pub struct Console {
    client: ResourceClient,
    guard: SessionGuard<Arc<dyn SessionStore>>,
}

impl Console {
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Self::with_navigator(config, store, Arc::new(TerminalNavigator))
    }

    pub fn with_navigator(
        config: ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = ResourceClient::new(config, store.clone(), navigator)?;
        Ok(Self {
            client,
            guard: SessionGuard::new(store),
        })
    }

    /// Runs `command` and returns what should be printed.
    pub async fn run(&mut self, command: Command) -> Result<Value> {
        match command {
            Command::Login { email, code } => self.login(&email, code).await,
            Command::Logout => {
                self.auth().logout()?;
                Ok(json!({ "signedIn": false }))
            }
            Command::Whoami => Ok(self.whoami(DEFAULT_ROUTE)),
            command => {
                self.authorize(&command.route())?;
                self.dispatch(command).await
            }
        }
    }

    fn admin(&self) -> AdminApi {
        AdminApi::new(self.client.clone())
    }

    fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    fn authorize(&mut self, route: &str) -> Result<()> {
        let decision = self.guard.check(route);
        debug!(route, state = ?decision.state, "guard decision");
        match decision.action {
            GuardAction::Redirect(_) => {
                bail!("Not signed in. Run `notaxia-admin login --email <address>` first.")
            }
            _ => Ok(()),
        }
    }

    fn whoami(&mut self, route: &str) -> Value {
        let decision = self.guard.check(route);
        json!({
            "signedIn": decision.state == GuardState::Authorized,
            "state": format!("{:?}", decision.state),
            "apiUrl": self.client.config().base_url,
        })
    }

    async fn login(&mut self, email: &str, code: Option<String>) -> Result<Value> {
        let decision = self.guard.check(LOGIN_ROUTE);
        if decision.action != GuardAction::RenderLoginForm {
            return Ok(json!({ "signedIn": true, "alreadySignedIn": true }));
        }

        let auth = self.auth();
        let code = match code {
            Some(code) => code,
            None => {
                auth.request_otp(email).await.map_err(explain)?;
                eprintln!("A sign-in code was sent to {}. Enter it:", email.trim());
                read_line().await?
            }
        };

        let login = auth.verify_otp(email, &code).await.map_err(explain)?;
        Ok(json!({
            "signedIn": true,
            "user": login.user,
        }))
    }

    async fn dispatch(&self, command: Command) -> Result<Value> {
        let admin = self.admin();
        match command {
            Command::Stats => output(admin.stats().await),
            Command::Users(cmd) => self.users(cmd).await,
            Command::Thoughts(ThoughtsCommand::List {
                paging,
                status,
                user_id,
                include_content,
            }) => {
                let mut query = page_query(&paging)
                    .filter_opt("status", status)
                    .filter_opt("userId", user_id);
                if include_content {
                    query = query.filter("includeContent", "true");
                }
                output(admin.thoughts(&query).await)
            }
            Command::Thoughts(ThoughtsCommand::Process { id }) => {
                admin.process_thought(&id).await.map_err(explain)?;
                Ok(json!({ "ok": true, "action": "process", "thoughtId": id }))
            }
            Command::VoiceNotes(VoiceNotesCommand::List {
                paging,
                status,
                user_id,
            }) => {
                let query = page_query(&paging)
                    .filter_opt("status", status)
                    .filter_opt("userId", user_id);
                output(admin.voice_notes(&query).await)
            }
            Command::Documents(DocumentsCommand::List { status }) => {
                let docs = admin.documents().await.map_err(explain)?;
                let docs = documents_with_status(&docs, status.as_deref().unwrap_or_default());
                Ok(serde_json::to_value(docs)?)
            }
            Command::Attachments(AttachmentsCommand::List { paging, kind }) => {
                let mut page = admin
                    .thought_attachments(&page_query(&paging))
                    .await
                    .map_err(explain)?;
                page.attachments = attachments_of_kind(&page.attachments, kind)
                    .into_iter()
                    .cloned()
                    .collect();
                Ok(serde_json::to_value(page)?)
            }
            Command::Subscriptions(PagedCommand::List { paging }) => {
                output(admin.subscriptions(&page_query(&paging)).await)
            }
            Command::Admins(AdminsCommand::List) => output(admin.admins().await),
            Command::Notify {
                title,
                body,
                user_ids,
            } => {
                let target = if user_ids.is_empty() {
                    NotificationTarget::AllUsers
                } else {
                    NotificationTarget::Users(user_ids)
                };
                let request = NotificationRequest::new(&title, &body, target).map_err(explain)?;
                output(admin.send_notification(&request).await)
            }
            Command::Health => output(admin.health().await),
            Command::Login { .. } | Command::Logout | Command::Whoami => {
                Err(anyhow!("command does not call the admin API"))
            }
        }
    }

    async fn users(&self, cmd: UsersCommand) -> Result<Value> {
        let admin = self.admin();
        let (action, id, result) = match cmd {
            UsersCommand::List { search, limit } => {
                let users = admin.users(limit).await.map_err(explain)?;
                let hits = search_users(&users, search.as_deref().unwrap_or_default());
                return Ok(serde_json::to_value(hits)?);
            }
            UsersCommand::Show { id } => return output(admin.user(&id).await),
            UsersCommand::GrantPro { id, expires_at } => {
                let result = admin.grant_pro(&id, expires_at.as_deref()).await;
                ("grant-pro", id, result)
            }
            UsersCommand::ResetUsage { id } => {
                let result = admin.reset_usage(&id).await;
                ("reset-usage", id, result)
            }
            UsersCommand::ResendVerification { id } => {
                let result = admin.resend_verification(&id).await;
                ("resend-verification", id, result)
            }
            UsersCommand::Ban { id } => {
                let result = admin.ban(&id).await;
                ("ban", id, result)
            }
            UsersCommand::Unban { id } => {
                let result = admin.unban(&id).await;
                ("unban", id, result)
            }
            UsersCommand::Delete { id } => {
                let result = admin.delete_user(&id).await;
                ("delete", id, result)
            }
            UsersCommand::RevokeAdmin { id } => {
                let result = admin.revoke_admin(&id).await;
                ("revoke-admin", id, result)
            }
        };
        result.map_err(explain)?;
        Ok(json!({ "ok": true, "action": action, "userId": id }))
    }
}

fn page_query(paging: &PageArgs) -> ListQuery {
    ListQuery::new().page(paging.page).limit(paging.limit)
}

fn output<T: Serialize>(result: Result<T, ApiError>) -> Result<Value> {
    let value = result.map_err(explain)?;
    Ok(serde_json::to_value(value)?)
}

fn explain(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::SessionExpired => {
            anyhow!("Session expired. Run `notaxia-admin login --email <address>` to sign in again.")
        }
        ApiError::Server { .. } | ApiError::InvalidInput(_) => anyhow!(err.user_message()),
        other => anyhow::Error::new(other),
    }
}

async fn read_line() -> Result<String> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read code from stdin")?;
    Ok(line)
}
