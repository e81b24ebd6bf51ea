use famtree_core::config::{
    DEFAULT_DESKTOP_HORIZONTAL_SPACING, DEFAULT_LOG_LEVEL, DEFAULT_MAX_TREE_DEPTH,
    DEFAULT_TOUCH_MAX_SCALE, DEFAULT_TOUCH_NODE_WIDTH,
};
use famtree_core::{Config, ConfigError, DisplayPreset};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.display.preset, DisplayPreset::Desktop);
    assert_eq!(
        config.display.metrics().horizontal_spacing,
        DEFAULT_DESKTOP_HORIZONTAL_SPACING
    );
    assert_eq!(config.tree.max_depth, DEFAULT_MAX_TREE_DEPTH);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[display]
preset = "touch"
vertical_spacing = 100.0

[tree]
max_depth = 12
root = "3"

[logging]
level = "famtree_core=debug"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.display.preset, DisplayPreset::Touch);
    assert_eq!(config.display.metrics().vertical_spacing, 100.0);
    assert_eq!(config.display.metrics().node_width, DEFAULT_TOUCH_NODE_WIDTH);
    assert_eq!(config.display.zoom().max_scale, DEFAULT_TOUCH_MAX_SCALE);
    assert_eq!(config.tree.max_depth, 12);
    assert_eq!(config.tree.root, Some("3".to_string()));
    assert_eq!(config.logging.level, "famtree_core=debug");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: Config = toml::from_str("[tree]\nmax_depth = 5\n").unwrap();
    assert_eq!(config.tree.max_depth, 5);
    assert_eq!(config.display, Config::default().display);
    assert_eq!(config.logging, Config::default().logging);
}

#[test]
fn test_default_config_string_parses_back() {
    let toml_str = Config::default_config_string();
    let config: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_file_rejects_bad_toml() {
    let file = write_config("[display\npreset = ");
    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let file = write_config("[display]\nhorizontal_spacing = -10.0\n");
    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_from_file_missing() {
    let result = Config::from_file("/definitely/not/here/famtree.toml");
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}
