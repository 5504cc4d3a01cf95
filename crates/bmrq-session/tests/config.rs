//! Environment parsing. Kept in one test so the unsafe env mutation
//! cannot race other tests in the same binary.

use bmrq_session::SessionConfig;
use bmrq_session::config::{DEFAULT_TABLE_NAME, DEFAULT_WORKSHEET};

#[test]
fn from_env_reads_channels_and_defaults() {
    unsafe {
        std::env::set_var("BMRQ_TABLE_URL", "https://db.example.org");
        std::env::set_var("BMRQ_TABLE_API_KEY", "table-key");
        std::env::set_var("BMRQ_SHEET_KEY", "sheet-key");
        std::env::set_var("BMRQ_SHEET_TOKEN", "sheet-token");
        std::env::set_var("EMAIL_APP_PASSWORD", "app-pass");
        std::env::set_var("BMRQ_RESULTS_CSV", "/tmp/bmrq/override.csv");
        std::env::remove_var("BMRQ_TABLE_NAME");
        std::env::remove_var("BMRQ_WORKSHEET");
        std::env::remove_var("BMRQ_SMTP_PORT");
    }

    let config = SessionConfig::from_env();

    let table = config.table.expect("table backend should be configured");
    assert_eq!(table.base_url, "https://db.example.org");
    assert_eq!(table.table, DEFAULT_TABLE_NAME);

    let sheet = config.sheet.expect("sheet backend should be configured");
    assert_eq!(sheet.spreadsheet_id, "sheet-key");
    assert_eq!(sheet.worksheet, DEFAULT_WORKSHEET);

    assert_eq!(config.email.app_password.as_deref(), Some("app-pass"));
    assert_eq!(config.email.smtp_port, 465);
    assert_eq!(config.csv_path.to_str(), Some("/tmp/bmrq/override.csv"));

    // Dropping one of a pair disables that backend only.
    unsafe {
        std::env::remove_var("BMRQ_TABLE_API_KEY");
        std::env::remove_var("BMRQ_SHEET_TOKEN");
        std::env::remove_var("EMAIL_APP_PASSWORD");
    }
    let degraded = SessionConfig::from_env();
    assert!(degraded.table.is_none());
    assert!(degraded.sheet.is_none());
    assert!(degraded.email.app_password.is_none());
}
