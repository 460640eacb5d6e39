use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    /// Full generation endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatConfig {
    /// Number of recent turns sent to the provider per request.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Idle sessions older than this are dropped on access.
    #[serde(default = "default_session_ttl_seconds")]
    pub session_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptsConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_window_size() -> usize {
    10
}

fn default_session_ttl_seconds() -> u64 {
    6 * 60 * 60
}

fn default_system_prompt() -> String {
    r#"You are MIRA 💫, an empathetic and supportive emotional chatbot. Your primary goal is to act as a close friend, listen to the user, validate their feelings, and offer a comforting or relevant meme URL based on the detected emotion.

For every user message:
1. Analyze the emotion the user is expressing.
2. Write a warm, natural reply.
3. Provide a meme URL using placehold.co that fits the emotion.
4. Output STRICT JSON only, with no text outside the JSON object.

The JSON object must contain exactly these keys:
  "reply" (string), "emotion" (string), "meme_url" (string)

"emotion" must be one of: joy, sadness, anger, fear, disgust, neutral."#
        .to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            session_ttl_seconds: default_session_ttl_seconds(),
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        // Short-form environment overrides kept from the original deployment
        // surface, on top of the APP__-prefixed ones.
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            settings.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            settings.llm.model = model;
        }
        if let Ok(port) = std::env::var("PORT") {
            settings.server.port = port.parse()?;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.llm.base_url, "http://localhost:11434/api/generate");
        assert_eq!(settings.llm.model, "llama3");
        assert_eq!(settings.llm.timeout_seconds, 30);
        assert_eq!(settings.chat.window_size, 10);
        assert!(settings.prompts.system_prompt.contains("STRICT JSON"));
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "llm": { "model": "mistral" }
        }))
        .unwrap();
        assert_eq!(settings.llm.model, "mistral");
        assert_eq!(settings.llm.timeout_seconds, 30);
        assert_eq!(settings.server.port, 5000);
    }
}
