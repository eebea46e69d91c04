use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ring::RingBuffer;

pub const FEEDBACK_CAPACITY: usize = 200;

/// User verdict on a past reply. Stored as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum FeedbackScore {
    Positive,
    Negative,
}

impl From<FeedbackScore> for i8 {
    fn from(score: FeedbackScore) -> Self {
        match score {
            FeedbackScore::Positive => 1,
            FeedbackScore::Negative => -1,
        }
    }
}

impl TryFrom<i8> for FeedbackScore {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(format!("feedback score must be 1 or -1, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingFeedbackItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub score: FeedbackScore,
}

impl TrainingFeedbackItem {
    pub fn new(text: impl Into<String>, score: FeedbackScore, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            text: text.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackSummary {
    pub positive: usize,
    pub negative: usize,
}

/// Accept/reject signals that bias future generation, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackStore {
    items: RingBuffer<TrainingFeedbackItem>,
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self {
            items: RingBuffer::with_capacity(FEEDBACK_CAPACITY),
        }
    }
}

impl FeedbackStore {
    pub fn from_items(items: Vec<TrainingFeedbackItem>) -> Self {
        Self {
            items: RingBuffer::from_newest_first(items, FEEDBACK_CAPACITY),
        }
    }

    pub fn add(&mut self, item: TrainingFeedbackItem) {
        self.items.push(item);
    }

    /// Returns `false` when no item carries `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> impl Iterator<Item = &TrainingFeedbackItem> {
        self.items.iter()
    }

    pub fn has_positive(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.score == FeedbackScore::Positive)
    }

    pub fn summary(&self) -> FeedbackSummary {
        self.items
            .iter()
            .fold(FeedbackSummary::default(), |mut acc, item| {
                match item.score {
                    FeedbackScore::Positive => acc.positive += 1,
                    FeedbackScore::Negative => acc.negative += 1,
                }
                acc
            })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
