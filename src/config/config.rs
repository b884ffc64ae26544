use std::env;
use std::path::PathBuf;
use std::time::Duration;

use aes::Aes128;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use block_modes::{BlockMode, Cbc};
use block_padding::Pkcs7;
use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

type Aes128Cbc = Cbc<Aes128, Pkcs7>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_POLL_SECS: u64 = 2;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub api_username: Option<String>,
    pub api_password: Option<String>,
    pub session_path: Option<PathBuf>,
    pub department_id: Option<i64>,
    pub kanban_poll_interval: Duration,
    pub timezone: Tz,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = get("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = match (get("AES_KEY"), get("AES_IV"), get("API_TOKEN_ENC")) {
            (Some(key_b64), Some(iv_b64), Some(enc_b64)) => {
                Some(decrypt_token(&key_b64, &iv_b64, &enc_b64)?)
            }
            _ => get("API_TOKEN"),
        };

        let department_id = get("DEPARTMENT_ID")
            .map(|v| {
                v.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    key: "DEPARTMENT_ID",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let poll_secs = get("KANBAN_POLL_SECS")
            .map(|v| {
                v.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "KANBAN_POLL_SECS",
                    reason: e.to_string(),
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_POLL_SECS);
        if poll_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "KANBAN_POLL_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        let timezone = match get("TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|e| ConfigError::Invalid {
                key: "TIMEZONE",
                reason: e.to_string(),
            })?,
            None => Tz::UTC,
        };

        let log_level = match get("LOG_LEVEL") {
            Some(level) => level.parse::<LevelFilter>().map_err(|e| ConfigError::Invalid {
                key: "LOG_LEVEL",
                reason: e.to_string(),
            })?,
            None => LevelFilter::INFO,
        };

        Ok(Config {
            api_base_url,
            api_token,
            api_username: get("API_USERNAME"),
            api_password: get("API_PASSWORD"),
            session_path: get("SESSION_PATH").map(PathBuf::from),
            department_id,
            kanban_poll_interval: Duration::from_secs(poll_secs),
            timezone,
            log_dir: PathBuf::from(get("LOG_DIR").unwrap_or_else(|| ".".to_string())),
            log_level,
        })
    }

    /// Username and password, only when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.api_username.as_deref()?, self.api_password.as_deref()?))
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

fn decrypt_token(key_b64: &str, iv_b64: &str, enc_b64: &str) -> Result<String, ConfigError> {
    let key = STANDARD
        .decode(key_b64)
        .map_err(|e| ConfigError::Decrypt(format!("AES_KEY: {}", e)))?;
    let iv = STANDARD
        .decode(iv_b64)
        .map_err(|e| ConfigError::Decrypt(format!("AES_IV: {}", e)))?;
    let ciphertext = STANDARD
        .decode(enc_b64)
        .map_err(|e| ConfigError::Decrypt(format!("API_TOKEN_ENC: {}", e)))?;

    let cipher = Aes128Cbc::new_from_slices(&key, &iv)
        .map_err(|e| ConfigError::Decrypt(e.to_string()))?;
    let decrypted = cipher
        .decrypt_vec(&ciphertext)
        .map_err(|e| ConfigError::Decrypt(e.to_string()))?;

    String::from_utf8(decrypted).map_err(|e| ConfigError::Decrypt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.kanban_poll_interval, Duration::from_secs(2));
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert_eq!(config.credentials(), None);
    }

    #[test]
    fn trims_trailing_slash_and_reads_values() {
        let config = Config::from_lookup(lookup(&[
            ("API_BASE_URL", "http://hr.local/api/"),
            ("API_TOKEN", "abc"),
            ("DEPARTMENT_ID", "4"),
            ("KANBAN_POLL_SECS", "5"),
            ("TIMEZONE", "America/Lima"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://hr.local/api");
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.department_id, Some(4));
        assert_eq!(config.kanban_poll_interval, Duration::from_secs(5));
        assert_eq!(config.timezone, chrono_tz::America::Lima);
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Config::from_lookup(lookup(&[("DEPARTMENT_ID", "sales")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DEPARTMENT_ID", .. }));

        let err = Config::from_lookup(lookup(&[("KANBAN_POLL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "KANBAN_POLL_SECS", .. }));
    }

    #[test]
    fn decrypts_encrypted_token() {
        let key = [7u8; 16];
        let iv = [3u8; 16];
        let cipher = Aes128Cbc::new_from_slices(&key, &iv).unwrap();
        let ciphertext = cipher.encrypt_vec(b"secret-token");

        let key_b64 = STANDARD.encode(key);
        let iv_b64 = STANDARD.encode(iv);
        let enc_b64 = STANDARD.encode(ciphertext);

        let config = Config::from_lookup(lookup(&[
            ("AES_KEY", key_b64.as_str()),
            ("AES_IV", iv_b64.as_str()),
            ("API_TOKEN_ENC", enc_b64.as_str()),
            ("API_TOKEN", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.api_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn bad_ciphertext_is_an_error() {
        let key_b64 = STANDARD.encode([1u8; 16]);
        let iv_b64 = STANDARD.encode([2u8; 16]);
        let enc_b64 = STANDARD.encode([9u8; 5]);

        let err = Config::from_lookup(lookup(&[
            ("AES_KEY", key_b64.as_str()),
            ("AES_IV", iv_b64.as_str()),
            ("API_TOKEN_ENC", enc_b64.as_str()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Decrypt(_)));
    }

    #[test]
    fn credentials_need_both_halves() {
        let half = Config::from_lookup(lookup(&[("API_USERNAME", "admin")])).unwrap();
        assert_eq!(half.credentials(), None);

        let both = Config::from_lookup(lookup(&[("API_USERNAME", "admin"), ("API_PASSWORD", "secret")])).unwrap();
        assert_eq!(both.credentials(), Some(("admin", "secret")));
    }
}
