//! Persisted AI settings: API key, provider and model.
//!
//! The three values live under fixed keys and are only ever loaded, saved or
//! cleared together. Nothing in the statistics core reads them.

pub mod store;

use std::path::PathBuf;

use log::info;

use crate::ai::provider::{ModelId, Provider, validate_api_key};
use crate::error::AppError;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

pub const KEY_API_KEY: &str = "REGRESSION_AI_API_KEY";
pub const KEY_PROVIDER: &str = "REGRESSION_AI_PROVIDER";
pub const KEY_MODEL: &str = "REGRESSION_AI_MODEL";

/// Settings file used when neither `--settings` nor `REGLAB_SETTINGS` is given.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from(".reglab").join("settings.json")
}

#[derive(Clone, PartialEq, Eq)]
pub struct AiSettings {
    api_key: String,
    provider: Provider,
    model: ModelId,
}

impl AiSettings {
    /// Format-check the key and pin the model to the provider.
    pub fn new(api_key: &str, provider: Provider, model: Option<ModelId>) -> Result<Self, AppError> {
        let api_key = api_key.trim();
        if !validate_api_key(api_key, provider) {
            return Err(AppError::config(format!(
                "API key does not look like a {} key: {}",
                provider.display_name(),
                provider.key_format_hint()
            )));
        }
        let model = model
            .map(|m| provider.resolve_model(m))
            .unwrap_or_else(|| provider.default_model());
        Ok(Self {
            api_key: api_key.to_string(),
            provider,
            model,
        })
    }

    /// Load from `store`. `None` unless all three keys are present and parse.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, AppError> {
        let (Some(key), Some(provider), Some(model)) = (
            store.get(KEY_API_KEY)?,
            store.get(KEY_PROVIDER)?,
            store.get(KEY_MODEL)?,
        ) else {
            return Ok(None);
        };
        let (Some(provider), Some(model)) = (Provider::parse(&provider), ModelId::parse(&model)) else {
            return Ok(None);
        };
        if key.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            api_key: key,
            provider,
            model: provider.resolve_model(model),
        }))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), AppError> {
        store.set(KEY_API_KEY, &self.api_key)?;
        store.set(KEY_PROVIDER, self.provider.id())?;
        store.set(KEY_MODEL, self.model.id())?;
        info!("saved AI settings for {} ({})", self.provider.display_name(), self.model.id());
        Ok(())
    }

    /// Remove all three keys.
    pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), AppError> {
        store.remove(KEY_API_KEY)?;
        store.remove(KEY_PROVIDER)?;
        store.remove(KEY_MODEL)?;
        info!("cleared AI settings");
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Key with everything but the first and last four characters hidden.
    pub fn masked_key(&self) -> String {
        mask_key(&self.api_key)
    }
}

impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.masked_key())
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish()
    }
}

pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEMINI_KEY: &str = "AIzaSyA1234567890abcdefgh";

    #[test]
    fn save_load_clear_lifecycle() {
        let mut store = MemoryStore::new();
        assert_eq!(AiSettings::load(&store).unwrap(), None);

        let settings = AiSettings::new(GEMINI_KEY, Provider::Gemini, Some(ModelId::Gemini3Flash)).unwrap();
        settings.save(&mut store).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(AiSettings::load(&store).unwrap(), Some(settings));

        AiSettings::clear(&mut store).unwrap();
        assert!(store.is_empty());
        assert_eq!(AiSettings::load(&store).unwrap(), None);
    }

    #[test]
    fn partial_or_unknown_values_do_not_load() {
        let mut store = MemoryStore::new();
        store.set(KEY_API_KEY, GEMINI_KEY).unwrap();
        store.set(KEY_PROVIDER, "gemini").unwrap();
        assert_eq!(AiSettings::load(&store).unwrap(), None);

        store.set(KEY_MODEL, "gpt-4").unwrap();
        assert_eq!(AiSettings::load(&store).unwrap(), None);

        store.set(KEY_MODEL, "gemini-3-pro").unwrap();
        let loaded = AiSettings::load(&store).unwrap().unwrap();
        assert_eq!(loaded.model(), ModelId::Gemini3Pro);
    }

    #[test]
    fn mismatched_model_resolves_to_provider_default() {
        let s = AiSettings::new("sk-abcdefghijklmnopqrstu", Provider::DeepSeek, Some(ModelId::Gemini3Pro)).unwrap();
        assert_eq!(s.model(), ModelId::DeepSeekChat);
        let s = AiSettings::new("sk-abcdefghijklmnopqrstu", Provider::DeepSeek, None).unwrap();
        assert_eq!(s.model(), ModelId::DeepSeekChat);
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = AiSettings::new("short", Provider::Gemini, None).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(err.message().contains("AIza"));
        assert!(AiSettings::new(GEMINI_KEY, Provider::DeepSeek, None).is_err());
    }

    #[test]
    fn key_is_masked() {
        let s = AiSettings::new(GEMINI_KEY, Provider::Gemini, None).unwrap();
        let masked = s.masked_key();
        assert!(masked.starts_with("AIza"));
        assert!(masked.ends_with("efgh"));
        assert!(!masked.contains("1234"));
        assert_eq!(masked.chars().count(), GEMINI_KEY.len());
        assert!(!format!("{s:?}").contains("1234"));
        assert_eq!(mask_key("abc"), "***");
    }

    #[test]
    fn json_file_store_persists_across_instances() {
        let dir = std::env::temp_dir().join(format!("reglab-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");
        let _ = std::fs::remove_dir_all(&dir);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(AiSettings::load(&store).unwrap(), None);

        let settings = AiSettings::new(GEMINI_KEY, Provider::Gemini, None).unwrap();
        settings.save(&mut store).unwrap();
        assert!(path.exists());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(AiSettings::load(&reopened).unwrap(), Some(settings));

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[KEY_PROVIDER], "gemini");

        AiSettings::clear(&mut store).unwrap();
        assert_eq!(AiSettings::load(&reopened).unwrap(), None);

        std::fs::write(&path, "[1, 2]").unwrap();
        assert_eq!(AiSettings::load(&reopened).unwrap_err().exit_code(), crate::error::EXIT_CONFIG);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
