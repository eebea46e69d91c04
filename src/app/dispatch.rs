use anyhow::{Result, bail};
use chrono::Utc;
use std::fmt::Write as _;

use crate::app::status::render_status;
use crate::cli::commands::{Cli, Commands, ConsentCommands, FeedbackCommands, StyleCommands};
use twin::config::TwinConfig;
use twin::twin::{
    ActivityLogEntry, AgentMode, CollectingSink, DeliveryMode, FeedbackScore, InboundEvent,
    Surface, Twin, TwinOutcome,
};

pub fn dispatch(cli: Cli, config: &TwinConfig) -> Result<()> {
    let mut twin = Twin::from_config(config);
    let output = execute(cli.command, &mut twin, config)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn cli_event(
    conversation: String,
    contact: String,
    surface: Surface,
    text: String,
) -> InboundEvent {
    InboundEvent {
        conversation_id: conversation,
        contact_id: contact,
        surface,
        text,
        timestamp_utc: Utc::now(),
    }
}

/// Run one command against `twin` and return what should be printed.
pub fn execute(command: Commands, twin: &mut Twin, config: &TwinConfig) -> Result<String> {
    match command {
        Commands::Reply {
            text,
            conversation,
            contact,
            surface,
        } => {
            let event = cli_event(conversation, contact, surface, text);
            let sink = CollectingSink::new();
            Ok(render_outcome(&twin.handle(&event, &sink)))
        }

        Commands::Gate {
            conversation,
            contact,
            surface,
        } => {
            let event = cli_event(conversation, contact, surface, String::new());
            let verdict = twin.evaluate(&event);
            Ok(format!("{} ({})", verdict.decision, verdict.reason))
        }

        Commands::Log { clear, limit } => {
            if clear {
                twin.clear_activity();
                return Ok("Activity log cleared.".into());
            }
            let activity = twin.store().activity();
            if activity.is_empty() {
                return Ok("No activity yet.".into());
            }
            let lines: Vec<String> = activity.entries().take(limit).map(render_entry).collect();
            Ok(lines.join("\n"))
        }

        Commands::Review {
            id,
            approve,
            reject: _,
        } => {
            if !twin.review(&id, approve) {
                bail!("No activity entry with id {id}");
            }
            Ok(format!(
                "Entry {id} {}.",
                if approve { "approved" } else { "rejected" }
            ))
        }

        Commands::Feedback { feedback_command } => handle_feedback(feedback_command, twin),
        Commands::Consent { consent_command } => handle_consent(consent_command, twin),
        Commands::Style { style_command } => handle_style(style_command, twin),
        Commands::Status => Ok(render_status(config, twin)),
    }
}

fn render_outcome(outcome: &TwinOutcome) -> String {
    match outcome {
        TwinOutcome::Suppressed { reason } => format!("Suppressed: {reason}"),
        TwinOutcome::Replied {
            verdict,
            entry,
            delivery,
        } => {
            let mut out = String::new();
            let label = match delivery.mode {
                DeliveryMode::SendNow => "sent",
                DeliveryMode::HoldForApproval => "held for approval",
            };
            let _ = writeln!(out, "[{label}] {}", delivery.text);
            if delivery.badge {
                let _ = writeln!(out, "  badge: AI assisted");
            }
            if entry.escalated {
                let _ = writeln!(out, "  escalated: needs your review");
            }
            let _ = writeln!(out, "  gate: {} ({})", verdict.decision, verdict.reason);
            let _ = write!(out, "  entry: {}", entry.id);
            out
        }
    }
}

fn render_entry(entry: &ActivityLogEntry) -> String {
    let review = match entry.approved {
        None => "",
        Some(true) => " approved",
        Some(false) => " rejected",
    };
    let escalated = if entry.escalated { " escalated" } else { "" };
    format!(
        "{}  {}  {}{review}{escalated}  {}/{}  \"{}\" -> \"{}\"",
        entry.id,
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.mode_used,
        entry.surface,
        entry.conversation_id,
        entry.input_preview,
        entry.output
    )
}

fn handle_feedback(command: FeedbackCommands, twin: &mut Twin) -> Result<String> {
    match command {
        FeedbackCommands::Add { text, negative } => {
            let score = if negative {
                FeedbackScore::Negative
            } else {
                FeedbackScore::Positive
            };
            let item = twin.record_feedback(text, score);
            Ok(format!("Recorded feedback {}.", item.id))
        }
        FeedbackCommands::Remove { id } => {
            if !twin.remove_feedback(&id) {
                bail!("No feedback item with id {id}");
            }
            Ok(format!("Removed feedback {id}."))
        }
        FeedbackCommands::List => {
            let feedback = twin.store().feedback();
            let summary = feedback.summary();
            let mut out = format!(
                "{} positive, {} negative",
                summary.positive, summary.negative
            );
            for item in feedback.items() {
                let sign = match item.score {
                    FeedbackScore::Positive => '+',
                    FeedbackScore::Negative => '-',
                };
                let _ = write!(out, "\n{sign} {}  {}", item.id, item.text);
            }
            Ok(out)
        }
    }
}

fn handle_consent(command: ConsentCommands, twin: &mut Twin) -> Result<String> {
    let mut policy = twin.consent().clone();
    match command {
        ConsentCommands::Show => return Ok(serde_json::to_string_pretty(&policy)?),
        ConsentCommands::Reset => {
            twin.reset_consent();
            return Ok("Consent policy reset to defaults.".into());
        }
        ConsentCommands::Mode { mode, conversation } => match conversation {
            Some(conversation) => {
                policy.overrides.insert(conversation, mode);
            }
            None => policy.mode = mode,
        },
        ConsentCommands::Allow { contact } => {
            policy.deny_list.remove(&contact);
            policy.allow_list.insert(contact);
        }
        ConsentCommands::Deny { contact } => {
            policy.allow_list.remove(&contact);
            policy.deny_list.insert(contact);
        }
        ConsentCommands::QuietHours { start, end } => {
            policy.quiet_hours.start_hour = start;
            policy.quiet_hours.end_hour = end;
        }
    }
    twin.update_consent(policy)?;
    let mode = twin.consent().mode;
    Ok(format!(
        "Consent policy updated (mode {mode}{}).",
        if mode == AgentMode::Auto {
            ", auto-send limits apply"
        } else {
            ""
        }
    ))
}

fn handle_style(command: StyleCommands, twin: &mut Twin) -> Result<String> {
    let mut style = twin.style().clone();
    match command {
        StyleCommands::Show => return Ok(serde_json::to_string_pretty(&style)?),
        StyleCommands::Reset => {
            twin.reset_style();
            return Ok("Style profile reset to defaults.".into());
        }
        StyleCommands::Tone { tone } => style.tone = tone,
        StyleCommands::Formality { value } => style.formality = value,
        StyleCommands::Emojis { enabled } => style.emojis_enabled = enabled,
        StyleCommands::Topic { topic } => {
            if !style.preferred_topics.contains(&topic) {
                style.preferred_topics.push(topic);
            }
        }
    }
    twin.update_style(style)?;
    Ok("Style profile updated.".into())
}
