use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    pub ip_echo_url: String,
    pub proxycheck_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
    pub geo: GeoConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let smtp_user = std::env::var("SMTP_USER")?;
        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            password: std::env::var("SMTP_PASS")?,
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| smtp_user.clone()),
            username: smtp_user,
        };

        let geo = GeoConfig {
            ip_echo_url: std::env::var("IP_ECHO_URL")
                .unwrap_or_else(|_| "https://api.ipify.org".into()),
            proxycheck_url: std::env::var("PROXYCHECK_URL")
                .unwrap_or_else(|_| "https://proxycheck.io/v2".into()),
        };

        let rate_limit = RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(5),
            window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
        };

        Ok(Self {
            database_url,
            smtp,
            geo,
            rate_limit,
        })
    }
}
