use axum::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::GeoConfig;

/// Resolves the caller-facing public IP and asks the reputation service
/// whether it is a known proxy/VPN exit.
#[async_trait]
pub trait IpInspector: Send + Sync {
    async fn public_ip(&self) -> anyhow::Result<String>;
    async fn is_proxy(&self, ip: &str) -> anyhow::Result<bool>;
}

pub struct ProxyCheck {
    http: reqwest::Client,
    ip_echo_url: String,
    proxycheck_url: String,
}

#[derive(Debug, Deserialize)]
struct IpEchoResponse {
    ip: String,
}

impl ProxyCheck {
    pub fn from_config(cfg: &GeoConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            ip_echo_url: cfg.ip_echo_url.clone(),
            proxycheck_url: cfg.proxycheck_url.clone(),
        })
    }
}

// The reputation payload is keyed by the queried IP:
// {"1.2.3.4": {"proxy": "yes", ...}, "status": "ok"}
fn proxy_flag(verdict: &Value, ip: &str) -> bool {
    verdict[ip]["proxy"] == "yes"
}

#[async_trait]
impl IpInspector for ProxyCheck {
    async fn public_ip(&self) -> anyhow::Result<String> {
        let resp: IpEchoResponse = self
            .http
            .get(format!("{}?format=json", self.ip_echo_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.ip)
    }

    async fn is_proxy(&self, ip: &str) -> anyhow::Result<bool> {
        let verdict: Value = self
            .http
            .get(format!("{}/{}?vpn=1&asn=1", self.proxycheck_url, ip))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(proxy_flag(&verdict, ip))
    }
}
