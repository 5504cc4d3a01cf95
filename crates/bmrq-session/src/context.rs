//! One-time context construction.

use std::sync::Arc;

use bmrq_notify::email::EmailConfig;
use bmrq_storage::gateway::PersistenceGateway;
use bmrq_storage::local::CsvStore;
use bmrq_storage::sheet::SheetStore;
use bmrq_storage::store::SubmissionStore;
use bmrq_storage::table::TableStore;
use tracing::{info, warn};

use crate::config::SessionConfig;

/// Backend clients and channel settings, built once at process start and
/// handed to each form session. No ambient globals.
pub struct SessionContext {
    gateway: PersistenceGateway,
    email: EmailConfig,
}

impl SessionContext {
    /// Select and construct the remote backend per configuration: the
    /// managed table when configured, else the spreadsheet, else none.
    /// A failing spreadsheet bootstrap degrades to local-only with a
    /// warning; initialization itself never fails.
    pub async fn initialize(config: SessionConfig) -> Self {
        let local = CsvStore::new(&config.csv_path);

        let remote: Option<Arc<dyn SubmissionStore>> = if let Some(table) = &config.table {
            info!(table = %table.table, "using managed-table backend");
            Some(Arc::new(TableStore::new(
                reqwest::Client::new(),
                &table.base_url,
                &table.api_key,
                &table.table,
            )))
        } else if let Some(sheet) = &config.sheet {
            let store = SheetStore::new(
                reqwest::Client::new(),
                &sheet.token,
                &sheet.spreadsheet_id,
                &sheet.worksheet,
            );
            match store.ensure_ready().await {
                Ok(()) => {
                    info!(worksheet = %sheet.worksheet, "using spreadsheet backend");
                    Some(Arc::new(store))
                }
                Err(e) => {
                    warn!("spreadsheet backend unavailable: {e}, writing to local CSV");
                    None
                }
            }
        } else {
            info!(path = %config.csv_path.display(), "no remote backend configured, local CSV only");
            None
        };

        Self {
            gateway: PersistenceGateway::new(remote, local),
            email: config.email,
        }
    }

    pub(crate) fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    pub(crate) fn email(&self) -> &EmailConfig {
        &self.email
    }
}
