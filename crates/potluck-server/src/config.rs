use clap::Parser;
use potluck_core::DEFAULT_MAX_RECIPE_ID;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "potluck-server")]
#[command(about = "Slack recipe suggestion bot server")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "POTLUCK_HTTP_ADDR", default_value = "0.0.0.0:3000")]
    pub http_addr: SocketAddr,

    /// Data directory holding the recipe store
    #[arg(long, env = "POTLUCK_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Slack app signing secret for request verification
    #[arg(long, env = "SLACK_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: String,

    /// Slack bot token for chat.postMessage / chat.update
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_BASE", default_value = "https://slack.com/api")]
    pub slack_api_base: String,

    /// Upper bound on crawler-assigned recipe ids used by the random draw
    #[arg(long, env = "POTLUCK_MAX_RECIPE_ID", default_value_t = DEFAULT_MAX_RECIPE_ID)]
    pub max_recipe_id: u32,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("potluck.redb")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        if self.signing_secret.is_empty() {
            anyhow::bail!("SLACK_SIGNING_SECRET is empty; every inbound request would be rejected");
        }
        if self.max_recipe_id == 0 {
            anyhow::bail!("max_recipe_id must be positive");
        }
        Ok(())
    }
}
