use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One registered model: Bedrock model identifier plus the prompt template
/// its family expects. Model IDs are listed in the AWS Bedrock docs; templates
/// come from each vendor's model card (e.g. llama's header-token format).
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub model_id: String,
    pub prompt_format: String,
}

/// Mapping from short model name to its entry. Immutable after construction;
/// identity is the name key.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelRegistry {
    /// The compiled-in default table.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Build from arbitrary entries, e.g. a config table or test fakes.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, ModelEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::from_entries(config.models.clone())
    }

    /// Look up a model by short name. Fails before any invocation work when
    /// the name is absent.
    pub fn resolve(&self, name: &str) -> Result<&ModelEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::unknown_model(name, self.names().collect::<Vec<_>>().join(", ")))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ModelEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Default model table, matching the demo scenario. The mistral and claude
/// templates carry no `{user_prompt}` placeholder and are sent verbatim.
pub fn builtin_entries() -> BTreeMap<String, ModelEntry> {
    BTreeMap::from([
        (
            "deepseek".into(),
            ModelEntry {
                model_id: "us.deepseek.r1-v1:0".into(),
                prompt_format: "<｜begin_of_sentence｜><｜User｜>{user_prompt}<｜Assistant｜>"
                    .into(),
            },
        ),
        (
            "llama".into(),
            ModelEntry {
                model_id: "us.llama3.r1-v1:0".into(),
                prompt_format: "<｜begin_of_text｜><｜User｜>{user_prompt}<｜Assistant｜>".into(),
            },
        ),
        (
            "mistral".into(),
            ModelEntry {
                model_id: "us.mistral.r1-v1:0".into(),
                prompt_format: "<s>[INST] ... [/INST]".into(),
            },
        ),
        (
            "claude".into(),
            ModelEntry {
                model_id: "us.claude.r1-v1:0".into(),
                prompt_format: "\n\nHuman: ... \n\nAssistant:".into(),
            },
        ),
    ])
}
