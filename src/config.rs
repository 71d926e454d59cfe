// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Values shipped in `.env.example` files and setup guides that must never be
/// sent to a provider.
const PLACEHOLDER_KEYS: &[&str] = &[
    "changeme",
    "change-me",
    "placeholder",
    "none",
    "null",
    "xxx",
    "sk-...",
    "sk-xxx",
    "<api-key>",
    "<your-api-key>",
];

/// Returns true when a credential is empty or one of the well-known placeholder
/// strings (`your_api_key_here`, `sk-...`, ...).
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return true;
    }
    let lower = key.to_ascii_lowercase();
    PLACEHOLDER_KEYS.contains(&lower.as_str())
        || lower.starts_with("your_")
        || lower.starts_with("your-")
        || lower.ends_with("_here")
        || lower.ends_with("-here")
}

/// Apply a lower-priority credential source to `slot`.
///
/// A usable key is never replaced. A usable candidate replaces a missing or
/// placeholder key; a placeholder candidate only fills a missing one, so it
/// still shows up as a placeholder in diagnostics.
pub fn fill_key(slot: &mut Option<String>, candidate: Option<String>) {
    if slot.as_deref().is_some_and(|k| !is_placeholder_key(k)) {
        return;
    }
    match candidate {
        Some(key) if !is_placeholder_key(&key) || slot.is_none() => *slot = Some(key),
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Configured,
    Placeholder,
    Missing,
}

impl KeyState {
    fn of(key: Option<&str>) -> Self {
        match key {
            None => Self::Missing,
            Some(k) if is_placeholder_key(k) => Self::Placeholder,
            Some(_) => Self::Configured,
        }
    }
}

impl std::fmt::Display for KeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured => write!(f, "configured"),
            Self::Placeholder => write!(f, "placeholder"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key (primary provider)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// OpenAI API key (secondary provider)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Base URL for the Gemini API (default: https://generativelanguage.googleapis.com/v1beta)
    #[serde(default)]
    pub gemini_base_url: Option<String>,

    /// Base URL for OpenAI-compatible APIs (default: https://api.openai.com/v1)
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Per-attempt provider timeout in seconds (default 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// LLM temperature (0.0-2.0, default 0.3)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per provider call (default 200)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Characters kept by the truncation summary when no provider answers (default 500)
    #[serde(default = "default_summary_fallback_chars")]
    pub summary_fallback_chars: usize,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_openai_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    200
}
fn default_summary_fallback_chars() -> usize {
    500
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            gemini_model: default_gemini_model(),
            openai_model: default_openai_model(),
            gemini_base_url: None,
            openai_base_url: None,
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            summary_fallback_chars: default_summary_fallback_chars(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > keyring > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.dealsign.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".dealsign.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (DEALSIGN_GEMINI_MODEL, DEALSIGN_PORT, etc.)
        figment = figment.merge(Env::prefixed("DEALSIGN_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // Provider-specific API key fallback. A placeholder counts as absent.
        fill_key(
            &mut config.gemini_api_key,
            std::env::var("GEMINI_API_KEY").ok(),
        );
        fill_key(
            &mut config.gemini_api_key,
            std::env::var("GOOGLE_API_KEY").ok(),
        );
        fill_key(
            &mut config.openai_api_key,
            std::env::var("OPENAI_API_KEY").ok(),
        );

        // Keyring fallback (if still no usable key and secure-storage feature is enabled)
        #[cfg(feature = "secure-storage")]
        {
            if config.gemini_key().is_none() {
                fill_key(&mut config.gemini_api_key, Self::keyring_key("gemini"));
            }
            if config.openai_key().is_none() {
                fill_key(&mut config.openai_api_key, Self::keyring_key("openai"));
            }
        }

        // CLI overrides (highest priority)
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "secure-storage")]
    fn keyring_key(provider: &str) -> Option<String> {
        keyring::Entry::new("dealsign", provider)
            .ok()
            .and_then(|entry| entry.get_password().ok())
            .filter(|k| !is_placeholder_key(k))
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dealsign").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref m) = cli.gemini_model {
            self.gemini_model = m.clone();
        }
        if let Some(ref m) = cli.openai_model {
            self.openai_model = m.clone();
        }
        if let Some(t) = cli.timeout {
            self.timeout_secs = t;
        }
    }

    /// Gemini key, or `None` when absent or a placeholder.
    pub fn gemini_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !is_placeholder_key(k))
    }

    /// OpenAI key, or `None` when absent or a placeholder.
    pub fn openai_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|k| !is_placeholder_key(k))
    }

    pub fn gemini_key_state(&self) -> KeyState {
        KeyState::of(self.gemini_api_key.as_deref())
    }

    pub fn openai_key_state(&self) -> KeyState {
        KeyState::of(self.openai_api_key.as_deref())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if !(1..=8192).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 1–8192, got {}",
                self.max_tokens
            )));
        }

        if !(50..=10_000).contains(&self.summary_fallback_chars) {
            return Err(Error::Config(format!(
                "summary_fallback_chars must be 50–10000, got {}",
                self.summary_fallback_chars
            )));
        }

        for (name, base) in [
            ("gemini_base_url", &self.gemini_base_url),
            ("openai_base_url", &self.openai_base_url),
        ] {
            if let Some(base) = base {
                let parsed = url::Url::parse(base)
                    .map_err(|e| Error::Config(format!("{name} is not a valid URL: {e}")))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::Config(format!(
                        "{name} must use http:// or https://, got '{base}'"
                    )));
                }
            }
        }

        if self.host.is_empty() {
            return Err(Error::Config("host cannot be empty".into()));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# DealSign Configuration

# Provider credentials. Leave unset to use GEMINI_API_KEY / OPENAI_API_KEY,
# or store them in the system keychain with `dealsign set-key <provider>`.
# gemini_api_key = ""
# openai_api_key = ""

# Models (Gemini is tried first, then OpenAI, then the local fallback)
gemini_model = "gemini-2.0-flash"
openai_model = "gpt-3.5-turbo"

# Per-attempt provider timeout in seconds
timeout_secs = 60

# Maximum tokens generated per provider call
max_tokens = 200

# Characters kept by the fallback summary when no provider answers
summary_fallback_chars = 500

# HTTP service bind address for `dealsign serve`
host = "0.0.0.0"
port = 8000
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
