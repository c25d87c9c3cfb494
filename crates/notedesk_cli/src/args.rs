use clap::Parser;
use notedesk_core::config::{ENV_API_BACKEND, ENV_API_URL};

#[derive(Parser, Debug)]
#[command(name = "notedesk", version)]
#[command(about = "Line-oriented editor for a remote notes API", long_about = None)]
pub struct Cli {
    /// Keep notes in memory for this session instead of calling the API
    #[arg(long)]
    pub memory: bool,

    /// Notes API base URL (overrides NOTEDESK_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

impl Cli {
    /// Layers flag values over an environment-style lookup.
    pub fn override_lookup(&self, key: &str, fallback: Option<String>) -> Option<String> {
        match key {
            ENV_API_BACKEND if self.memory => Some("memory".to_string()),
            ENV_API_URL if self.api_url.is_some() => self.api_url.clone(),
            _ => fallback,
        }
    }
}
