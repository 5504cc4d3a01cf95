//! Environment-backed configuration.
//!
//! Every field is optional or defaulted: a missing credential disables
//! the corresponding channel instead of failing startup.

use std::env;
use std::path::PathBuf;

use bmrq_notify::email::EmailConfig;

/// Default location of the local fallback file.
pub const DEFAULT_CSV_PATH: &str = "results/bmrq_results.csv";

/// Default worksheet title inside the configured spreadsheet.
pub const DEFAULT_WORKSHEET: &str = "BMRQ_Responses";

/// Default managed-table name.
pub const DEFAULT_TABLE_NAME: &str = "bmrq_responses";

/// Managed-table backend credentials. Present only when both
/// `BMRQ_TABLE_URL` and `BMRQ_TABLE_API_KEY` are set.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub base_url: String,
    pub api_key: String,
    /// `BMRQ_TABLE_NAME`, defaulting to [`DEFAULT_TABLE_NAME`].
    pub table: String,
}

/// Spreadsheet backend credentials. Present only when both
/// `BMRQ_SHEET_KEY` and `BMRQ_SHEET_TOKEN` are set.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    /// Pre-obtained OAuth bearer token; refreshing it is the hosting
    /// environment's concern.
    pub token: String,
    /// `BMRQ_WORKSHEET`, defaulting to [`DEFAULT_WORKSHEET`].
    pub worksheet: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub table: Option<TableConfig>,
    pub sheet: Option<SheetConfig>,
    pub email: EmailConfig,
    /// `BMRQ_RESULTS_CSV`, defaulting to [`DEFAULT_CSV_PATH`].
    pub csv_path: PathBuf,
}

impl SessionConfig {
    /// Read configuration from the environment. Never fails; absent
    /// values degrade to the documented per-field fallback.
    pub fn from_env() -> Self {
        let table = match (env::var("BMRQ_TABLE_URL"), env::var("BMRQ_TABLE_API_KEY")) {
            (Ok(base_url), Ok(api_key)) => Some(TableConfig {
                base_url,
                api_key,
                table: env::var("BMRQ_TABLE_NAME")
                    .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            }),
            _ => None,
        };

        let sheet = match (env::var("BMRQ_SHEET_KEY"), env::var("BMRQ_SHEET_TOKEN")) {
            (Ok(spreadsheet_id), Ok(token)) => Some(SheetConfig {
                spreadsheet_id,
                token,
                worksheet: env::var("BMRQ_WORKSHEET")
                    .unwrap_or_else(|_| DEFAULT_WORKSHEET.to_string()),
            }),
            _ => None,
        };

        let email = EmailConfig {
            smtp_host: env::var("BMRQ_SMTP_HOST").unwrap_or_else(|_| "smtp.qq.com".to_string()),
            smtp_port: env::var("BMRQ_SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(465),
            from: env::var("BMRQ_MAIL_FROM").unwrap_or_default(),
            to: env::var("BMRQ_MAIL_TO").unwrap_or_default(),
            app_password: env::var("EMAIL_APP_PASSWORD").ok(),
        };

        let csv_path = env::var("BMRQ_RESULTS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV_PATH));

        Self {
            table,
            sheet,
            email,
            csv_path,
        }
    }

    /// A local-only configuration: no remote backend, no email.
    pub fn local_only(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            table: None,
            sheet: None,
            email: EmailConfig {
                smtp_host: "smtp.qq.com".to_string(),
                smtp_port: 465,
                from: String::new(),
                to: String::new(),
                app_password: None,
            },
            csv_path: csv_path.into(),
        }
    }
}
