use serde::Deserialize;

pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
pub const DEFAULT_MAIL_FROM: &str = "Solaris Mission Control <onboarding@hacksolaris.com>";
pub const DEFAULT_MAIL_SUBJECT: &str = "Welcome to Mission Control!";
pub const DEFAULT_FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub resend_api_key: String,
    pub resend_base_url: String,
    pub mail_from: String,
    pub mail_subject: String,
    /// Header that carries the caller's origin address behind the proxy.
    pub forwarded_for_header: String,
    /// Answer failures with HTTP 200 and `status: 400` in the body, like the
    /// first version of the landing page did.
    pub legacy_error_status: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive number"))
                .and_then(|n: u32| {
                    if n == 0 {
                        anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
                    }
                    Ok(n)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            resend_api_key: std::env::var("RESEND_KEY")
                .or_else(|_| std::env::var("RESEND_API_KEY"))
                .map_err(|_| {
                    anyhow::anyhow!("RESEND_KEY or RESEND_API_KEY environment variable required")
                })
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("RESEND_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            resend_base_url: {
                let url = std::env::var("RESEND_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string());
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("RESEND_BASE_URL must start with http:// or https://");
                }
                url.trim_end_matches('/').to_string()
            },
            mail_from: std::env::var("MAIL_FROM")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            mail_subject: std::env::var("MAIL_SUBJECT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MAIL_SUBJECT.to_string()),
            forwarded_for_header: std::env::var("FORWARDED_FOR_HEADER")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_ascii_lowercase())
                .unwrap_or_else(|| DEFAULT_FORWARDED_FOR_HEADER.to_string()),
            legacy_error_status: std::env::var("LEGACY_ERROR_STATUS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Database URL: {}...", url_prefix(&config.database_url));
        tracing::debug!("Resend Base URL: {}", config.resend_base_url);
        tracing::debug!("Mail sender: {}", config.mail_from);
        tracing::debug!("Forwarded-for header: {}", config.forwarded_for_header);
        if config.legacy_error_status {
            tracing::warn!("LEGACY_ERROR_STATUS enabled: failures will answer HTTP 200");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// First characters of a URL, safe to log without the credentials.
fn url_prefix(url: &str) -> String {
    url.chars().take(20).collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
