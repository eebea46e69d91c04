use clap::{ArgGroup, Parser, Subcommand};
use twin::twin::Surface;

mod subcommands;

pub use subcommands::{ConsentCommands, FeedbackCommands, StyleCommands};

/// `Twin` - consent-gated, style-conditioned reply agent.
#[derive(Parser, Debug)]
#[command(name = "twin")]
#[command(version)]
#[command(about = "Draft or send replies in your own voice, within the limits you set.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one inbound message through the full pipeline
    Reply {
        /// Inbound message text
        text: String,

        /// Conversation the message belongs to
        #[arg(long, default_value = "cli")]
        conversation: String,

        /// Contact who sent the message
        #[arg(long, default_value = "cli-user")]
        contact: String,

        /// Inbound surface (messages, feed)
        #[arg(long, default_value = "messages")]
        surface: Surface,
    },

    /// Show how the gate would treat a message right now, without replying
    Gate {
        #[arg(long, default_value = "cli")]
        conversation: String,

        #[arg(long, default_value = "cli-user")]
        contact: String,

        #[arg(long, default_value = "messages")]
        surface: Surface,
    },

    /// Show or clear the activity log
    Log {
        /// Delete every entry
        #[arg(long)]
        clear: bool,

        /// Number of entries to print, newest first
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Approve or reject a logged suggestion
    #[command(group(ArgGroup::new("verdict").required(true).args(["approve", "reject"])))]
    Review {
        /// Activity entry id
        id: String,

        #[arg(long)]
        approve: bool,

        #[arg(long)]
        reject: bool,
    },

    /// Manage training feedback
    Feedback {
        #[command(subcommand)]
        feedback_command: FeedbackCommands,
    },

    /// Inspect or edit the consent policy
    Consent {
        #[command(subcommand)]
        consent_command: ConsentCommands,
    },

    /// Inspect or edit the style profile
    Style {
        #[command(subcommand)]
        style_command: StyleCommands,
    },

    /// Show config paths and a state summary
    Status,
}
