//! Built-in defaults, the lowest config layer.

use crate::resolver::DEFAULT_RESOLUTION_TIMEOUT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "resolver.timeout_ms",
            DEFAULT_RESOLUTION_TIMEOUT.as_millis() as i64,
        )?
        .set_default("resolver.remote_fetch", true)?
        .set_default("parsing.strict", false)?
        .set_default("logging.level", "info")
}
