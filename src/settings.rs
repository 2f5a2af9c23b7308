use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::network::{PipelineOptions, DEFAULT_TREE_LIMIT};
use crate::parser::TokenizerPolicy;

pub const ENV_PREFIX: &str = "NETMAP";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tree_limit: usize,
    pub tokenizer: TokenizerPolicy,
    pub insights: InsightSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InsightSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Records quoted as "<position> at <company>" in the prompt.
    pub sample_size: usize,
    /// Companies listed with their counts in the prompt.
    pub top_companies: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tree_limit: DEFAULT_TREE_LIMIT,
            tokenizer: TokenizerPolicy::default(),
            insights: InsightSettings::default(),
        }
    }
}

impl Default for InsightSettings {
    fn default() -> Self {
        InsightSettings {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_secs: 60,
            sample_size: 50,
            top_companies: 10,
        }
    }
}

impl Settings {
    /// Defaults, then an optional TOML file, then `NETMAP_*` variables
    /// (`__` separates nested keys, e.g. `NETMAP_INSIGHTS__MODEL`).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn pipeline(&self) -> PipelineOptions {
        PipelineOptions {
            tree_limit: self.tree_limit,
            tokenizer: self.tokenizer,
        }
    }
}

impl InsightSettings {
    /// Configured key, else `GEMINI_API_KEY`, else `API_KEY`. Blank values are skipped.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |k: &String| !k.trim().is_empty();
        self.api_key
            .clone()
            .filter(non_blank)
            .or_else(|| lookup("GEMINI_API_KEY").filter(non_blank))
            .or_else(|| lookup("API_KEY").filter(non_blank))
    }
}
