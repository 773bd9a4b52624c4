use cacheside_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        cache_enabled = config.cache.enabled,
        cache_backend = %config.cache.backend,
        ttl_seconds = config.cache.ttl_seconds,
        "Configuration loaded"
    );

    Ok(config)
}
