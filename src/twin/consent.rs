use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumString};

use crate::error::{Result, TwinError};
use crate::twin::safety::SafetyRules;

/// How much autonomy the Twin has for a conversation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AgentMode {
    /// Twin stays silent.
    Off,
    /// Twin drafts replies; a human approves before send.
    #[default]
    Suggest,
    /// Twin may send on its own within rate and quiet-hour limits.
    Auto,
}

/// Where the inbound content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Surface {
    Messages,
    Feed,
}

/// Daily local-time window during which autonomous sending is disabled.
///
/// `[start_hour, end_hour)`; wraps past midnight when `start_hour > end_hour`.
/// Equal bounds describe an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuietHours {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            start_hour: 22,
            end_hour: 7,
        }
    }
}

impl QuietHours {
    pub fn contains(&self, hour: u32) -> bool {
        let start = u32::from(self.start_hour);
        let end = u32::from(self.end_hour);
        match start.cmp(&end) {
            std::cmp::Ordering::Equal => false,
            std::cmp::Ordering::Less => (start..end).contains(&hour),
            std::cmp::Ordering::Greater => hour >= start || hour < end,
        }
    }

    fn validate(self) -> Result<()> {
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(TwinError::Validation(
                "consent.quiet_hours must use 0-23 clock values".into(),
            ));
        }
        Ok(())
    }
}

/// Per-user rules governing whether and when the Twin may act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsentPolicy {
    pub messages_enabled: bool,
    pub feed_suggestions_enabled: bool,
    pub show_badge: bool,
    pub daily_max_auto: u32,
    pub cooldown_seconds: u64,
    pub mode: AgentMode,
    pub allow_list: BTreeSet<String>,
    /// Always wins over `allow_list` for the same contact.
    pub deny_list: BTreeSet<String>,
    pub quiet_hours: QuietHours,
    /// Per-conversation mode, taking precedence over `mode`.
    pub overrides: BTreeMap<String, AgentMode>,
    pub safety: SafetyRules,
}

impl Default for ConsentPolicy {
    fn default() -> Self {
        Self {
            messages_enabled: true,
            feed_suggestions_enabled: true,
            show_badge: true,
            daily_max_auto: 20,
            cooldown_seconds: 120,
            mode: AgentMode::Suggest,
            allow_list: BTreeSet::new(),
            deny_list: BTreeSet::new(),
            quiet_hours: QuietHours::default(),
            overrides: BTreeMap::new(),
            safety: SafetyRules::default(),
        }
    }
}

impl ConsentPolicy {
    pub fn surface_enabled(&self, surface: Surface) -> bool {
        match surface {
            Surface::Messages => self.messages_enabled,
            Surface::Feed => self.feed_suggestions_enabled,
        }
    }

    /// Override for `conversation_id` if present, else the global mode.
    pub fn effective_mode(&self, conversation_id: &str) -> AgentMode {
        self.overrides
            .get(conversation_id)
            .copied()
            .unwrap_or(self.mode)
    }

    pub fn is_denied(&self, contact_id: &str) -> bool {
        self.deny_list.contains(contact_id)
    }

    /// Auto-send is opt-in per contact once an allow list exists.
    pub fn auto_permitted_for(&self, contact_id: &str) -> bool {
        !self.is_denied(contact_id)
            && (self.allow_list.is_empty() || self.allow_list.contains(contact_id))
    }

    pub fn validate(&self) -> Result<()> {
        self.quiet_hours.validate()?;
        self.safety.validate()?;
        if self
            .allow_list
            .iter()
            .chain(&self.deny_list)
            .any(|c| c.trim().is_empty())
        {
            return Err(TwinError::Validation(
                "consent allow/deny lists must not contain blank contact ids".into(),
            ));
        }
        Ok(())
    }
}
