//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a signed-in session stays valid
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 24 * 30)]
    pub session_ttl_hours: u32,
}

impl AuthConfig {
    /// Session lifetime as a duration.
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
