use chrono::Utc;
use twin::config::TwinConfig;
use twin::twin::Twin;

pub fn render_status(config: &TwinConfig, twin: &Twin) -> String {
    let consent = twin.consent();
    let style = twin.style();
    let feedback = twin.store().feedback().summary();
    let offset = twin.gate().offset_at(Utc::now());
    let zone = if twin.gate().follows_system_zone() {
        " (system)"
    } else {
        ""
    };

    let mut lines = vec![
        "◆ Twin status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!("State       {}", config.state_dir_path().display()),
        format!("Local time  UTC{offset}{zone}"),
        String::new(),
        format!("  Mode            {}", consent.mode),
        format!(
            "  Surfaces        messages {} / feed {}",
            on_off(consent.messages_enabled),
            on_off(consent.feed_suggestions_enabled)
        ),
        format!(
            "  Auto limits     {}/day, {}s cooldown",
            consent.daily_max_auto, consent.cooldown_seconds
        ),
        format!(
            "  Quiet hours     {:02}:00-{:02}:00",
            consent.quiet_hours.start_hour, consent.quiet_hours.end_hour
        ),
        format!(
            "  Lists           {} allowed, {} denied, {} overrides",
            consent.allow_list.len(),
            consent.deny_list.len(),
            consent.overrides.len()
        ),
        format!("  Badge           {}", on_off(consent.show_badge)),
        String::new(),
        format!(
            "  Style           {} (formality {}, emoji {})",
            style.tone,
            style.formality,
            on_off(style.emojis_enabled)
        ),
        format!("  Activity        {} entries", twin.store().activity().len()),
        format!(
            "  Feedback        {} positive, {} negative",
            feedback.positive, feedback.negative
        ),
    ];

    if let Some(seed) = config.generator.seed {
        lines.push(format!("  Seed            {seed}"));
    }

    lines.join("\n")
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
