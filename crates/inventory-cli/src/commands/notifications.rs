//! Notification commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use inventory_core::config::AppConfig;
use inventory_core::error::AppError;
use inventory_entity::notification::{self, Notification};
use inventory_worker::notifications::NotificationClient;
use inventory_worker::polling::PollingTask;

use crate::output::{self, OutputFormat};

/// Arguments for the notifications command
#[derive(Debug, Args)]
pub struct NotificationsArgs {
    /// Mark the notification with this id as read
    #[arg(long, conflicts_with = "watch")]
    pub read: Option<i64>,

    /// Keep polling until interrupted
    #[arg(short, long)]
    pub watch: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Read")]
    read: bool,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.notification_id,
            kind: n.kind.clone(),
            message: n.message.clone(),
            read: n.read,
            created: n.created_at.clone(),
        }
    }
}

/// Execute the notifications command
pub async fn execute(
    args: &NotificationsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::session_store(config)?;
    let Some(session) = store.get_session().await? else {
        return Err(AppError::authentication("Not logged in"));
    };
    let auth = store.auth_header().await;
    let client = NotificationClient::from_config(super::http_client()?, &config.services);

    if let Some(id) = args.read {
        client.mark_read(&auth, id).await?;
        output::print_success(&format!("Notification {id} marked as read"));
        return Ok(());
    }

    if !args.watch {
        let items = client.list_for_user(&auth, &session.user.id).await?;
        print_notifications(&items, format);
        return Ok(());
    }

    let every = config.polling.notifications_interval();
    let user_id = session.user.id;
    let poller = PollingTask::spawn("notifications", every, move || {
        let client = client.clone();
        let auth = auth.clone();
        let user_id = user_id.clone();
        async move { client.list_for_user(&auth, &user_id).await }
    });

    output::print_warning(&format!(
        "Watching notifications every {}s, Ctrl+C to stop",
        every.as_secs()
    ));
    super::watch_poller(poller, |items| print_notifications(items, format)).await;
    Ok(())
}

fn print_notifications(items: &[Notification], format: OutputFormat) {
    let rows: Vec<NotificationRow> = items.iter().map(NotificationRow::from).collect();
    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        output::print_kv("Unread", &notification::unread_count(items).to_string());
    }
}
