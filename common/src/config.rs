use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Telegram Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// India Standard Time, UTC+05:30.
const IST_OFFSET_MINUTES: i32 = 330;

/// Store details printed on receipts, plus optional delivery credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub store_name: String,
    pub tagline: String,
    pub address: Vec<String>,
    pub phone: String,
    /// Offset applied when printing timestamps on receipts.
    pub utc_offset_minutes: i32,
    pub telegram: Option<TelegramConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "गजानन ट्रेडिंग कंपनी".into(),
            tagline: "तुमचे स्थानिक किराणा दुकान".into(),
            address: vec![
                "बस स्टँड समोर, मुख्य रस्ता".into(),
                "मंठा, जालना - 431504".into(),
            ],
            phone: "+91-98765-43210".into(),
            utc_offset_minutes: IST_OFFSET_MINUTES,
            telegram: None,
        }
    }
}

impl StoreConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Telegram credentials, if they are filled in.
    pub fn telegram(&self) -> Option<&TelegramConfig> {
        self.telegram.as_ref().filter(|t| t.is_configured())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    TELEGRAM_API_BASE.to_string()
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: default_api_base(),
        }
    }

    /// Blank values and the `YOUR_...` placeholders count as unset.
    pub fn is_configured(&self) -> bool {
        let set = |v: &str| {
            let v = v.trim();
            !v.is_empty() && !v.starts_with("YOUR_")
        };
        set(&self.bot_token) && set(&self.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.address.len(), 2);
        assert!(config.telegram().is_none());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = StoreConfig::from_json(
            r#"{"store_name":"Test Store","telegram":{"bot_token":"123:abc","chat_id":"42"}}"#,
        )
        .unwrap();
        assert_eq!(config.store_name, "Test Store");
        assert_eq!(config.phone, "+91-98765-43210");
        let telegram = config.telegram().unwrap();
        assert_eq!(telegram.api_base, TELEGRAM_API_BASE);
    }

    #[test]
    fn placeholder_credentials_are_unset() {
        let mut config = StoreConfig::default();
        config.telegram = Some(TelegramConfig::new("YOUR_BOT_TOKEN", "YOUR_CHAT_ID"));
        assert!(config.telegram().is_none());
        config.telegram = Some(TelegramConfig::new("123:abc", " "));
        assert!(config.telegram().is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(StoreConfig::from_json("[1,2").is_err());
    }
}
