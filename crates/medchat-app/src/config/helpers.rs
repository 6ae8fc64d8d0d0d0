use std::env;

/// Settings read from MEDCHAT_* environment variables
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub model: Option<String>,
    pub backend: Option<String>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub system_prompt: Option<String>,
    pub signed_in: Option<bool>,
    pub tts_command: Option<String>,
    pub stt_command: Option<String>,
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read through `lookup`, which maps a variable name to its value.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(&format!("MEDCHAT_{}", key.to_uppercase())).filter(|v| !v.trim().is_empty())
        };

        Self {
            model: get("model"),
            backend: get("backend"),
            api_url: get("api_url"),
            api_key: get("api_key"),
            system_prompt: get("system_prompt"),
            signed_in: get("signed_in").and_then(|v| parse_bool(&v)),
            tts_command: get("tts_command"),
            stt_command: get("stt_command"),
            verbose: get("verbose").and_then(|v| parse_bool(&v)),
        }
    }
}

/// Accepts the usual spellings of a boolean switch
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("ignoring unrecognised boolean value '{}'", other);
            None
        }
    }
}
