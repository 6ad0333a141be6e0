//! Environment variable check (FW-001).

use crate::checks::{CheckContext, Verdict};
use crate::platform::env::EnvSource;
use crate::FwCheckError;

/// Value assumed when the toggle variable is unset.
pub const DEFAULT_SIGNAL: &str = "true";

/// Read the toggle variable, lowercased, defaulting to `"true"`.
pub fn read_signal(env: &dyn EnvSource, name: &str) -> Result<String, FwCheckError> {
    let value = env.var(name)?;
    Ok(value.unwrap_or_else(|| DEFAULT_SIGNAL.to_string()).to_lowercase())
}

/// Only the literal `false` disables; unrecognized values count as enabled.
pub fn signals_disabled(signal: &str) -> bool {
    signal == "false"
}

/// Run FW-001: Environment Variable Test
pub fn check_env_disable(ctx: &CheckContext<'_>) -> Result<Verdict, FwCheckError> {
    let signal = read_signal(ctx.env, ctx.env_var)?;

    if signals_disabled(&signal) {
        Ok(Verdict::pass(format!("{} correctly set to false", ctx.env_var)))
    } else {
        Ok(Verdict::fail(format!(
            "{} is '{}', expected 'false'",
            ctx.env_var, signal
        )))
    }
}
