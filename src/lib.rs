#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod error;
pub mod twin;
pub mod utils;

pub use config::TwinConfig;
pub use error::{Result, TwinError};
pub use twin::{
    ConsentPolicy, GateDecision, InboundEvent, ReplyGenerator, SafetyRules, StyleProfile, Twin,
    TwinOutcome, TwinStore, apply_safety, evaluate_gate,
};
