use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.proxynova.com";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        bind_addr: get_env_or_default("BREACH_LOOKUP_BIND", DEFAULT_BIND_ADDR),
        upstream_url: get_env_or_default("BREACH_LOOKUP_UPSTREAM", DEFAULT_UPSTREAM_URL),
        proxy_url: get_env_or_default("BREACH_LOOKUP_PROXY", DEFAULT_PROXY_URL),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the query proxy listens on.
    pub bind_addr: String,
    /// Base URL of the breach-search service, without the `/comb` path.
    pub upstream_url: String,
    /// Base URL the search view uses to reach the query proxy.
    pub proxy_url: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
