//! Bot 配置：Telegram 连接、日志、数据库与聊天限制，从环境变量加载。

use std::env;
use std::time::Duration;

use anon_core::limits::{
    DEFAULT_INACTIVITY_TIMEOUT_SECS, DEFAULT_MATCH_TIMEOUT_SECS, DEFAULT_MESSAGE_RATE_LIMIT,
};
use anon_core::ChatLimits;
use anyhow::Result;

const DEFAULT_DATABASE_URL: &str = "./anon_chat.db";
const DEFAULT_LOG_FILE: &str = "logs/anon-chat.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// 可选：Telegram Bot API 基础 URL（测试时可指向 mock 服务器）。环境变量：`TELEGRAM_API_URL` 或 `TELOXIDE_API_URL`。
    pub telegram_api_url: Option<String>,
    /// DATABASE_URL: SQLite path, `file:` or `sqlite:` URL
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// INACTIVITY_TIMEOUT_SECS, MATCH_TIMEOUT_SECS, MESSAGE_RATE_LIMIT
    pub limits: ChatLimits,
}

impl BotConfig {
    /// 从环境变量加载配置
    /// 如果传入 token，则覆盖 BOT_TOKEN
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        let limits = ChatLimits {
            inactivity_timeout: Duration::from_secs(env_number(
                "INACTIVITY_TIMEOUT_SECS",
                DEFAULT_INACTIVITY_TIMEOUT_SECS,
            )),
            match_timeout: Duration::from_secs(env_number(
                "MATCH_TIMEOUT_SECS",
                DEFAULT_MATCH_TIMEOUT_SECS,
            )),
            message_rate_limit: env_number("MESSAGE_RATE_LIMIT", DEFAULT_MESSAGE_RATE_LIMIT),
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            database_url: database_url_from_env(),
            log_file,
            limits,
        })
    }

    /// Validate config: API URL must parse if set; timeouts and the send rate must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.limits.message_rate_limit == 0 {
            anyhow::bail!("MESSAGE_RATE_LIMIT must be at least 1");
        }
        if self.limits.inactivity_timeout.is_zero() || self.limits.match_timeout.is_zero() {
            anyhow::bail!("INACTIVITY_TIMEOUT_SECS and MATCH_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }
}

/// DATABASE_URL, or the default SQLite file in the working directory.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
