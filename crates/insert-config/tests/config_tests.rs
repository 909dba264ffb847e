//! Round-trip and validation tests for the config file format.

use insert_config::{parse_config, render_config, Catalog, Config, ConfigError, Settings};

#[test]
fn defaults_round_trip_through_toml() {
    let settings = Settings::default();
    let catalog = Catalog::builtin();

    let text = render_config(&settings, &catalog).unwrap();
    let (loaded_settings, loaded_catalog) = parse_config(&text).unwrap();

    assert_eq!(loaded_settings, settings);
    assert_eq!(loaded_catalog, catalog);
}

#[test]
fn empty_document_yields_defaults_and_builtin_catalog() {
    let (settings, catalog) = parse_config("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(catalog, Catalog::builtin());
}

#[test]
fn partial_settings_fill_in_from_defaults() {
    let text = r#"
[settings]
chamfer_mm = 0.5
default_to_through_hole = true
"#;
    let (settings, _catalog) = parse_config(text).unwrap();
    assert_eq!(settings.chamfer_mm, 0.5);
    assert!(settings.default_to_through_hole);
    assert_eq!(settings.extra_depth_mm, Settings::default().extra_depth_mm);
    assert_eq!(
        settings.show_success_message,
        Settings::default().show_success_message
    );
}

#[test]
fn out_of_range_settings_are_replaced_on_load() {
    let text = r#"
[settings]
chamfer_mm = 99.0
extra_depth_mm = -3.0
"#;
    let (settings, _catalog) = parse_config(text).unwrap();
    assert_eq!(settings.chamfer_mm, Settings::default().chamfer_mm);
    assert_eq!(settings.extra_depth_mm, Settings::default().extra_depth_mm);
}

#[test]
fn bad_inserts_are_skipped_and_good_ones_kept() {
    let text = r#"
[[inserts]]
name = "M3 x 5.7mm (standard)"
hole_diameter_mm = 4.4
length_mm = 5.7
min_wall_mm = 1.6

[[inserts]]
name = "broken"
hole_diameter_mm = -1.0
length_mm = 5.7
min_wall_mm = 1.6
"#;
    let (_settings, catalog) = parse_config(text).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("M3 x 5.7mm (standard)").is_some());
    assert!(catalog.get("broken").is_none());
}

#[test]
fn catalog_of_only_bad_inserts_falls_back_to_builtin() {
    let text = r#"
[[inserts]]
name = "broken"
hole_diameter_mm = 0.0
length_mm = 5.7
min_wall_mm = 1.6
"#;
    let (_settings, catalog) = parse_config(text).unwrap();
    assert_eq!(catalog, Catalog::builtin());
}

#[test]
fn stale_last_insert_is_forgotten() {
    let text = r#"
[settings]
last_insert = "no such insert"
"#;
    let (settings, _catalog) = parse_config(text).unwrap();
    assert_eq!(settings.last_insert, None);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = parse_config("[settings\nchamfer_mm = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = std::env::temp_dir().join(format!(
        "insert-config-test-{}-{:?}.toml",
        std::process::id(),
        std::thread::current().id()
    ));
    let _ = std::fs::remove_file(&path);

    let config = Config::load(&path).unwrap();
    assert_eq!(config.settings, Settings::default());
    assert_eq!(config.catalog, Catalog::builtin());
    assert!(path.exists(), "defaults should be written out");

    // A reload reads back what was written.
    let reloaded = Config::load(&path).unwrap();
    assert_eq!(reloaded.settings, config.settings);
    assert_eq!(reloaded.catalog, config.catalog);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn remember_insert_persists_the_selection() {
    let path = std::env::temp_dir().join(format!(
        "insert-config-remember-{}-{:?}.toml",
        std::process::id(),
        std::thread::current().id()
    ));
    let _ = std::fs::remove_file(&path);

    let mut config = Config::load(&path).unwrap();
    config.remember_insert("M6 x 12.7mm").unwrap();

    let reloaded = Config::load(&path).unwrap();
    assert_eq!(reloaded.settings.last_insert.as_deref(), Some("M6 x 12.7mm"));
    assert_eq!(
        reloaded.active_insert().unwrap().name,
        "M6 x 12.7mm"
    );

    // Unknown names are ignored rather than persisted.
    let mut config = reloaded;
    config.remember_insert("nonsense").unwrap();
    assert_eq!(config.settings.last_insert.as_deref(), Some("M6 x 12.7mm"));

    std::fs::remove_file(&path).unwrap();
}
