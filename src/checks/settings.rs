//! Settings file checks (FW-002 through FW-004).

use crate::checks::environment::{read_signal, signals_disabled};
use crate::checks::{CheckContext, Verdict};
use crate::data::settings::{FirewallSettings, USER_SETTINGS_SOURCE};
use crate::FwCheckError;
use chrono::Utc;
use tracing::{debug, info};

/// Aggregate disabled: either override source is enough.
///
/// `settings_disabled` is `None` when there is no settings file, which counts
/// as enabled.
pub fn aggregate_disabled(env_disabled: bool, settings_disabled: Option<bool>) -> bool {
    env_disabled || settings_disabled.unwrap_or(false)
}

/// Run FW-002: Settings File Test
///
/// Writes a manual-disable snapshot over whatever is at the settings path and
/// reads it straight back.
pub fn check_settings_round_trip(ctx: &CheckContext<'_>) -> Result<Verdict, FwCheckError> {
    let snapshot = FirewallSettings::manual_disable(USER_SETTINGS_SOURCE, Utc::now());
    snapshot.save(ctx.settings_path)?;
    ctx.settings_written.set(true);
    info!(path = %ctx.settings_path.display(), "wrote settings snapshot");

    let loaded = FirewallSettings::load(ctx.settings_path)?;
    let disabled = loaded.is_disabled();
    let manual = loaded.firewall.manually_disabled;

    if disabled && manual {
        Ok(Verdict::pass("Firewall successfully disabled via settings file"))
    } else {
        Ok(Verdict::fail(format!(
            "Firewall not properly disabled (enabled: {}, manual: {})",
            !disabled, manual
        )))
    }
}

/// Run FW-003: Firewall Status Check
pub fn check_firewall_status(ctx: &CheckContext<'_>) -> Result<Verdict, FwCheckError> {
    let env_disabled = signals_disabled(&read_signal(ctx.env, ctx.env_var)?);
    let settings_disabled = FirewallSettings::load_if_present(ctx.settings_path)?
        .map(|settings| settings.is_disabled());

    debug!(env_disabled, ?settings_disabled, "aggregating firewall status");

    if aggregate_disabled(env_disabled, settings_disabled) {
        Ok(Verdict::pass("Firewall status correctly shows as disabled"))
    } else {
        Ok(Verdict::fail(
            "Firewall status shows as enabled when it should be disabled",
        ))
    }
}

/// Run FW-004: Manual Disable Persistence
///
/// Only inspects an existing file; never creates one.
pub fn check_manual_disable_persistence(ctx: &CheckContext<'_>) -> Result<Verdict, FwCheckError> {
    let Some(settings) = FirewallSettings::load_if_present(ctx.settings_path)? else {
        return Ok(Verdict::fail("Settings file not found for persistence test"));
    };

    if settings.is_user_override() {
        Ok(Verdict::pass("Manual disable setting persists correctly"))
    } else {
        Ok(Verdict::fail(format!(
            "Manual disable not persistent (manual: {}, by: {})",
            settings.firewall.manually_disabled, settings.firewall.disabled_by
        )))
    }
}
