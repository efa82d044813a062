//! Stock alert commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use inventory_core::config::AppConfig;
use inventory_core::error::AppError;
use inventory_entity::alert::StockAlert;
use inventory_worker::alerts::StockAlertClient;
use inventory_worker::polling::PollingTask;

use crate::output::{self, OutputFormat};

/// Arguments for the alerts command
#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Show resolved alert history instead of open alerts
    #[arg(long, conflicts_with_all = ["product", "watch"])]
    pub history: bool,

    /// Only alerts for this product
    #[arg(long, conflicts_with = "watch")]
    pub product: Option<i64>,

    /// Resolve the alert with this id
    #[arg(long, conflicts_with_all = ["history", "product", "watch"])]
    pub resolve: Option<i64>,

    /// Range start (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Keep polling open alerts until interrupted
    #[arg(short, long)]
    pub watch: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Product")]
    product: i64,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Resolved")]
    resolved: bool,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&StockAlert> for AlertRow {
    fn from(alert: &StockAlert) -> Self {
        Self {
            id: alert.alert_id,
            product: alert.product_id,
            alert_type: alert.alert_type.clone(),
            message: alert.message.clone(),
            resolved: alert.is_resolved,
            created: alert.created_at.clone(),
        }
    }
}

/// Execute the alerts command
pub async fn execute(args: &AlertsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = super::session_store(config)?;
    let auth = store.auth_header().await;
    if auth.is_empty() {
        return Err(AppError::authentication("Not logged in"));
    }

    let client = StockAlertClient::from_config(super::http_client()?, &config.services);
    let range = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some((from.as_str(), to.as_str())),
        _ => None,
    };

    if let Some(id) = args.resolve {
        client.resolve(&auth, id).await?;
        output::print_success(&format!("Alert {id} resolved"));
        return Ok(());
    }

    if args.watch {
        return watch(client, auth, range, config, format).await;
    }

    let alerts = if args.history {
        client.list_history(&auth, range).await?
    } else if let Some(product) = args.product {
        client.list_by_product(&auth, product).await?
    } else {
        client.list_unresolved(&auth, range).await?
    };

    print_alerts(&alerts, format);
    Ok(())
}

async fn watch(
    client: StockAlertClient,
    auth: http::HeaderMap,
    range: Option<(&str, &str)>,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let range = range.map(|(from, to)| (from.to_string(), to.to_string()));
    let every = config.polling.stock_alerts_interval();

    let poller = PollingTask::spawn("stock-alerts", every, move || {
        let client = client.clone();
        let auth = auth.clone();
        let range = range.clone();
        async move {
            let range = range.as_ref().map(|(f, t)| (f.as_str(), t.as_str()));
            client.list_unresolved(&auth, range).await
        }
    });

    output::print_warning(&format!(
        "Watching stock alerts every {}s, Ctrl+C to stop",
        every.as_secs()
    ));
    super::watch_poller(poller, |alerts| print_alerts(alerts, format)).await;
    Ok(())
}

fn print_alerts(alerts: &[StockAlert], format: OutputFormat) {
    let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();
    output::print_list(&rows, format);

    let out_of_stock = alerts.iter().filter(|a| a.is_out_of_stock()).count();
    if out_of_stock > 0 && format == OutputFormat::Table {
        output::print_warning(&format!("{out_of_stock} product(s) out of stock"));
    }
}
