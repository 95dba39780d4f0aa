use logfence::{Error, Level, RouterConfig};

#[test]
fn defaults_are_valid() {
    let config = RouterConfig::default();
    config.validate().unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Info);
    assert!(config.general.color);
    assert_eq!(config.limits.max_message_length, 32_768);
    assert_eq!(config.limits.max_message_lines, 500);
    assert_eq!(config.limits.max_line_length, 4_096);
    assert_eq!(config.limits.max_handles_per_call, 64);
    assert_eq!(config.colorize.timeout_ms, 15);
    assert_eq!(config.html.max_document_bytes, 10 * 1024 * 1024);
    assert_eq!(config.html.max_title_length, 256);
    assert_eq!(config.throttle.max_writes_per_second, 200);
    assert_eq!(config.throttle.window_seconds, 1);
    assert_eq!(config.file.max_file_size_bytes, 200 * 1024 * 1024);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = RouterConfig::from_toml_str("").unwrap();
    assert_eq!(config.limits.max_message_length, 32_768);
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config = RouterConfig::from_toml_str(
        r#"
        [general]
        level = "DEBUG"
        color = false

        [throttle]
        max_writes_per_second = 5
        "#,
    )
    .unwrap();

    assert_eq!(config.parse_level().unwrap(), Level::Debug);
    assert!(!config.general.color);
    assert_eq!(config.throttle.max_writes_per_second, 5);
    // Untouched sections keep their defaults.
    assert_eq!(config.throttle.window_seconds, 1);
    assert_eq!(config.limits.max_line_length, 4_096);
}

#[test]
fn level_strings_parse_case_insensitively() {
    let mut config = RouterConfig::default();
    config.general.level = "debug".to_string();
    assert_eq!(config.parse_level().unwrap(), Level::Debug);
}

#[test]
fn unknown_level_string_is_rejected() {
    let mut config = RouterConfig::default();
    config.general.level = "VERBOSE".to_string();
    assert!(matches!(config.parse_level(), Err(Error::Validation(_))));
}

#[test]
fn zero_limits_are_rejected() {
    let cases: Vec<fn(&mut RouterConfig)> = vec![
        |c| c.limits.max_message_length = 0,
        |c| c.limits.max_message_lines = 0,
        |c| c.limits.max_line_length = 0,
        |c| c.limits.max_handles_per_call = 0,
        |c| c.colorize.timeout_ms = 0,
        |c| c.html.max_document_bytes = 0,
        |c| c.html.max_title_length = 0,
        |c| c.throttle.max_writes_per_second = 0,
        |c| c.throttle.window_seconds = 0,
        |c| c.file.max_file_size_bytes = 0,
    ];
    for mutate in cases {
        let mut config = RouterConfig::default();
        mutate(&mut config);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = RouterConfig::from_toml_str("[general\nlevel = ");
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn zero_limit_in_toml_is_rejected_at_parse() {
    let result = RouterConfig::from_toml_str("[colorize]\ntimeout_ms = 0\n");
    assert!(matches!(result, Err(Error::Validation(_))));
}
