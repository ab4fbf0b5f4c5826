//! Remote text-generation providers and their model catalogs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A remote chat/completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    #[value(name = "deepseek")]
    DeepSeek,
}

/// A model selector. Each belongs to exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ModelId {
    #[serde(rename = "gemini-3-pro")]
    #[value(name = "gemini-3-pro")]
    Gemini3Pro,
    #[serde(rename = "gemini-3-flash")]
    #[value(name = "gemini-3-flash")]
    Gemini3Flash,
    #[serde(rename = "deepseek-chat")]
    #[value(name = "deepseek-chat")]
    DeepSeekChat,
    #[serde(rename = "deepseek-reasoner")]
    #[value(name = "deepseek-reasoner")]
    DeepSeekReasoner,
}

const GEMINI_MODELS: [ModelId; 2] = [ModelId::Gemini3Pro, ModelId::Gemini3Flash];
const DEEPSEEK_MODELS: [ModelId; 2] = [ModelId::DeepSeekChat, ModelId::DeepSeekReasoner];

/// Keys shorter than this (after trimming) are rejected outright.
pub const MIN_KEY_LEN: usize = 20;

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::DeepSeek];

    /// Identifier used in persisted settings.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::DeepSeek => "deepseek",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == raw.trim())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Gemini => "Google Gemini",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    /// Models offered by this provider; the first is the default.
    pub fn models(self) -> &'static [ModelId] {
        match self {
            Provider::Gemini => &GEMINI_MODELS,
            Provider::DeepSeek => &DEEPSEEK_MODELS,
        }
    }

    pub fn default_model(self) -> ModelId {
        self.models()[0]
    }

    /// `model` if it belongs to this provider, otherwise the provider default.
    pub fn resolve_model(self, model: ModelId) -> ModelId {
        if model.provider() == self {
            model
        } else {
            self.default_model()
        }
    }

    pub fn key_prefixes(self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["AIza"],
            Provider::DeepSeek => &["sk-", "dsk_"],
        }
    }

    /// Human hint for the expected key format.
    pub fn key_format_hint(self) -> String {
        let prefixes: Vec<String> = self.key_prefixes().iter().map(|p| format!("\"{p}\"")).collect();
        format!("it should start with {}", prefixes.join(" or "))
    }

    pub fn next(self) -> Self {
        match self {
            Provider::Gemini => Provider::DeepSeek,
            Provider::DeepSeek => Provider::Gemini,
        }
    }
}

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::Gemini3Pro,
        ModelId::Gemini3Flash,
        ModelId::DeepSeekChat,
        ModelId::DeepSeekReasoner,
    ];

    /// Identifier used in persisted settings and reports.
    pub fn id(self) -> &'static str {
        match self {
            ModelId::Gemini3Pro => "gemini-3-pro",
            ModelId::Gemini3Flash => "gemini-3-flash",
            ModelId::DeepSeekChat => "deepseek-chat",
            ModelId::DeepSeekReasoner => "deepseek-reasoner",
        }
    }

    /// Identifier sent to the provider's API.
    pub fn wire_id(self) -> &'static str {
        match self {
            ModelId::Gemini3Pro => "gemini-3-pro-preview",
            ModelId::Gemini3Flash => "gemini-3-flash-preview",
            ModelId::DeepSeekChat => "deepseek-chat",
            ModelId::DeepSeekReasoner => "deepseek-reasoner",
        }
    }

    pub fn provider(self) -> Provider {
        match self {
            ModelId::Gemini3Pro | ModelId::Gemini3Flash => Provider::Gemini,
            ModelId::DeepSeekChat | ModelId::DeepSeekReasoner => Provider::DeepSeek,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == raw.trim())
    }

    /// Next model of the same provider, wrapping around.
    pub fn next_for_provider(self) -> Self {
        let models = self.provider().models();
        let idx = models.iter().position(|&m| m == self).unwrap_or(0);
        models[(idx + 1) % models.len()]
    }
}

/// Format-only check of an API key. The provider remains the real authority.
pub fn validate_api_key(key: &str, provider: Provider) -> bool {
    if key.trim().chars().count() < MIN_KEY_LEN {
        return false;
    }
    provider.key_prefixes().iter().any(|p| key.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format_check() {
        assert!(validate_api_key("AIzaXXXXXXXXXXXXXXXXXXXX", Provider::Gemini));
        assert!(!validate_api_key("AIzaXXXXXXXXXXXXXXXXXXXX", Provider::DeepSeek));
        assert!(validate_api_key("sk-0123456789abcdef0123", Provider::DeepSeek));
        assert!(validate_api_key("dsk_0123456789abcdef012", Provider::DeepSeek));
        for p in Provider::ALL {
            assert!(!validate_api_key("short", p));
            assert!(!validate_api_key("", p));
        }
        // Padding does not count towards the length.
        assert!(!validate_api_key("AIzaXXXX            ", Provider::Gemini));
    }

    #[test]
    fn models_resolve_against_provider() {
        assert_eq!(Provider::Gemini.default_model(), ModelId::Gemini3Pro);
        assert_eq!(Provider::DeepSeek.default_model(), ModelId::DeepSeekChat);
        assert_eq!(Provider::DeepSeek.resolve_model(ModelId::Gemini3Flash), ModelId::DeepSeekChat);
        assert_eq!(Provider::Gemini.resolve_model(ModelId::Gemini3Flash), ModelId::Gemini3Flash);
        assert_eq!(ModelId::Gemini3Pro.wire_id(), "gemini-3-pro-preview");
    }

    #[test]
    fn ids_round_trip_through_parse() {
        for p in Provider::ALL {
            assert_eq!(Provider::parse(p.id()), Some(p));
        }
        for m in ModelId::ALL {
            assert_eq!(ModelId::parse(m.id()), Some(m));
        }
        assert_eq!(Provider::parse("openai"), None);
    }

    #[test]
    fn model_cycle_stays_within_provider() {
        assert_eq!(ModelId::Gemini3Pro.next_for_provider(), ModelId::Gemini3Flash);
        assert_eq!(ModelId::Gemini3Flash.next_for_provider(), ModelId::Gemini3Pro);
        assert_eq!(ModelId::DeepSeekReasoner.next_for_provider(), ModelId::DeepSeekChat);
    }
}
