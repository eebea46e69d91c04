use super::TwinConfig;

pub(super) const STATE_DIR_VAR: &str = "TWIN_STATE_DIR";
pub(super) const LOG_LEVEL_VAR: &str = "TWIN_LOG_LEVEL";
pub(super) const UTC_OFFSET_VAR: &str = "TWIN_UTC_OFFSET_MINUTES";
pub(super) const SEED_VAR: &str = "TWIN_SEED";

#[cfg(test)]
pub(super) const TWIN_ENV_VARS: [&str; 4] = [STATE_DIR_VAR, LOG_LEVEL_VAR, UTC_OFFSET_VAR, SEED_VAR];

impl TwinConfig {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(STATE_DIR_VAR)
            && !dir.is_empty()
        {
            self.state_dir = dir;
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_VAR)
            && !level.is_empty()
        {
            self.log_level = level;
        }

        if let Ok(offset_str) = std::env::var(UTC_OFFSET_VAR)
            && let Ok(offset) = offset_str.trim().parse::<i32>()
        {
            self.utc_offset_minutes = Some(offset);
        }

        if let Ok(seed_str) = std::env::var(SEED_VAR)
            && let Ok(seed) = seed_str.trim().parse::<u64>()
        {
            self.generator.seed = Some(seed);
        }
    }
}
