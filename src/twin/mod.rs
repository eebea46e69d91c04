//! Consent-gated, style-conditioned reply agent.
//!
//! Inbound events pass the [`gate`], get a rule-based candidate from the
//! [`generator`], are filtered by [`safety`], land in the [`store`] activity
//! log and finally reach a [`delivery`] sink as either a send or a held
//! suggestion. [`agent::Twin`] wires these together.

pub mod agent;
pub mod consent;
pub mod delivery;
pub mod gate;
pub mod generator;
pub mod safety;
pub mod store;
pub mod style;

pub use agent::{Twin, TwinOutcome};
pub use consent::{AgentMode, ConsentPolicy, QuietHours, Surface};
pub use delivery::{CollectingSink, Delivery, DeliveryMode, DeliverySink};
pub use gate::{GateDecision, GateEvaluator, GateVerdict, InboundEvent, evaluate_gate};
pub use generator::{ReplyGenerator, ReplyRng, ScriptedRng, SeededRng};
pub use safety::{SafetyOutcome, SafetyRules, apply_safety};
pub use store::{
    ACTIVITY_LOG_CAPACITY, ActivityLog, ActivityLogEntry, AutoSendLedger, FeedbackScore,
    FeedbackStore, FileKvStore, KvStore, MemoryKvStore, ModeUsed, TrainingFeedbackItem, TwinStore,
};
pub use style::{StyleProfile, Tone};
