use clap::Subcommand;
use twin::twin::{AgentMode, Tone};

/// Training feedback subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackCommands {
    /// Record feedback on a reply (positive unless --negative)
    Add {
        /// Reply text the feedback refers to
        text: String,
        #[arg(long)]
        negative: bool,
    },
    /// Remove a feedback item
    Remove {
        /// Feedback id
        id: String,
    },
    /// List feedback, newest first, with totals
    List,
}

/// Consent policy subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsentCommands {
    /// Print the policy as JSON
    Show,
    /// Restore defaults
    Reset,
    /// Set the global mode, or a per-conversation override
    Mode {
        /// off, suggest or auto
        mode: AgentMode,
        /// Override only this conversation
        #[arg(long)]
        conversation: Option<String>,
    },
    /// Allow auto-send for a contact
    Allow { contact: String },
    /// Never act for a contact
    Deny { contact: String },
    /// Set the quiet-hours window (local hours, 0-23)
    QuietHours { start: u8, end: u8 },
}

/// Style profile subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StyleCommands {
    /// Print the profile as JSON
    Show,
    /// Restore defaults
    Reset,
    /// Set the tone (casual, professional, friendly, playful)
    Tone { tone: Tone },
    /// Set formality, 0-100
    Formality { value: u8 },
    /// Turn emoji on or off
    Emojis {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Add a preferred topic
    Topic { topic: String },
}
