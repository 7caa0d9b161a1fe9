//! Runtime configuration
//!
//! Storage paths and optional SMTP settings, resolved from the environment at
//! startup and injected into the stores and mail sender.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

/// File names inside the data directory
pub const PRODUCTS_FILE: &str = "products.txt";
pub const MEALS_FILE: &str = "meals.txt";

/// Locations of the two backing text files
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub products_file: PathBuf,
    pub meals_file: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            products_file: data_dir.join(PRODUCTS_FILE),
            meals_file: data_dir.join(MEALS_FILE),
            data_dir,
        }
    }

    /// Resolve the data directory from `BJU_DATA_DIR`, falling back to a
    /// `data/` directory next to the project (stepping out of target/debug or
    /// target/release when run via cargo).
    pub fn from_env() -> Self {
        let data_dir = std::env::var("BJU_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let mut path = std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                    .unwrap_or_else(|| PathBuf::from("."));

                if path.ends_with("release") || path.ends_with("debug") {
                    if let Some(parent) = path.parent() {
                        if let Some(grandparent) = parent.parent() {
                            path = grandparent.to_path_buf();
                        }
                    }
                }

                path.push("data");
                path
            });

        Self::new(data_dir)
    }
}

/// SMTP settings for the meal-summary mail sender
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
}

impl EmailConfig {
    /// Read SMTP settings from `BJU_SMTP_*` variables. Returns None when the
    /// host is not set; the email tools then report that mail is not
    /// configured.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("BJU_SMTP_HOST").ok()?;
        let smtp_port = std::env::var("BJU_SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let smtp_username = std::env::var("BJU_SMTP_USERNAME").unwrap_or_default();
        let smtp_password =
            SecretString::from(std::env::var("BJU_SMTP_PASSWORD").unwrap_or_default());
        let from_address = std::env::var("BJU_SMTP_FROM").unwrap_or_else(|_| smtp_username.clone());

        Some(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
        })
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("from_address", &self.from_address)
            .finish()
    }
}
