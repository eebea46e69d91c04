use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use strum::Display;

/// How a reply leaves the Twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryMode {
    /// Send immediately (gate said auto, nothing escalated).
    SendNow,
    /// Hold as a suggestion until the user approves it.
    HoldForApproval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Activity log entry this delivery was recorded under.
    pub entry_id: String,
    pub conversation_id: String,
    pub text: String,
    pub mode: DeliveryMode,
    /// Show the "AI assisted" badge next to the content.
    pub badge: bool,
}

/// Outbound side of the pipeline, implemented by the messaging surface.
///
/// Delivery is fire-and-forget: the entry is already logged when this is
/// called, and an error here is only reported.
pub trait DeliverySink {
    fn deliver(&self, delivery: &Delivery) -> anyhow::Result<()>;
}

/// Keeps every delivery in memory. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    delivered: Mutex<Vec<Delivery>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl DeliverySink for CollectingSink {
    fn deliver(&self, delivery: &Delivery) -> anyhow::Result<()> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delivery.clone());
        Ok(())
    }
}
