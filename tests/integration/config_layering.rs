use agentbook::config::ConfigLoader;
use agentbook::{CompileOptions, Strictness};
use std::time::Duration;

#[test]
fn file_values_override_defaults_and_env_overrides_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agentbook.toml");
    std::fs::write(
        &path,
        r#"
[resolver]
timeout_ms = 5000
adam_agent_url = "https://s6.ptbk.io/adam"
remote_fetch = false

[parsing]
strict = true

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.resolver.timeout(), Duration::from_millis(5000));
    assert!(!config.resolver.remote_fetch);
    assert_eq!(config.parsing.strictness(), Strictness::Strict);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.output, "stderr");

    let options = CompileOptions::from_config(&config);
    assert_eq!(options.adam_agent_url.as_deref(), Some("https://s6.ptbk.io/adam"));
    assert_eq!(options.strictness, Strictness::Strict);

    std::env::set_var("AGENTBOOK__RESOLVER__TIMEOUT_MS", "750");
    let overridden = ConfigLoader::load_from_file(&path);
    std::env::remove_var("AGENTBOOK__RESOLVER__TIMEOUT_MS");
    assert_eq!(
        overridden.unwrap().resolver.timeout(),
        Duration::from_millis(750)
    );

    let missing = ConfigLoader::load_from_file(&dir.path().join("absent.toml"));
    assert!(missing.is_err());

    let defaults = ConfigLoader::default();
    assert_eq!(defaults.resolver.timeout(), Duration::from_secs(10));
    assert!(defaults.resolver.remote_fetch);
}
