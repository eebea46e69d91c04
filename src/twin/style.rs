use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};

use crate::error::{Result, TwinError};

pub const MAX_FORMALITY: u8 = 100;

/// Overall voice the Twin writes in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    Casual,
    Professional,
    #[default]
    Friendly,
    Playful,
}

/// User-authored writing preferences consumed by the reply generator.
///
/// Only ever replaced wholesale by an explicit user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleProfile {
    pub tone: Tone,
    /// 0 (loose) to 100 (formal).
    pub formality: u8,
    pub emojis_enabled: bool,
    pub preferred_topics: Vec<String>,
    /// Topics the Twin should stay away from.
    pub boundaries: BTreeSet<String>,
    pub notes: String,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            tone: Tone::Friendly,
            formality: 40,
            emojis_enabled: false,
            preferred_topics: Vec::new(),
            boundaries: BTreeSet::new(),
            notes: String::new(),
        }
    }
}

impl StyleProfile {
    pub fn validate(&self) -> Result<()> {
        if self.formality > MAX_FORMALITY {
            return Err(TwinError::Validation(format!(
                "style.formality must be in [0, {MAX_FORMALITY}], got {}",
                self.formality
            )));
        }
        if self.preferred_topics.iter().any(|t| t.trim().is_empty()) {
            return Err(TwinError::Validation(
                "style.preferred_topics must not contain blank entries".into(),
            ));
        }
        Ok(())
    }

    /// Preferred topics that do not collide with a declared boundary.
    pub fn usable_topics(&self) -> impl Iterator<Item = &str> {
        self.preferred_topics
            .iter()
            .map(String::as_str)
            .filter(|topic| {
                !self
                    .boundaries
                    .iter()
                    .any(|b| b.eq_ignore_ascii_case(topic))
            })
    }
}
