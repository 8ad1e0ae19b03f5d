//! The shipped configuration file matches the built-in defaults.

use std::path::Path;

use pathik::{PathikConfig, RoverCore};

fn shipped_config() -> PathikConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/pathik.toml");
    PathikConfig::load(&path).unwrap()
}

#[test]
fn test_shipped_config_matches_defaults() {
    let shipped = shipped_config();
    let defaults = PathikConfig::default();

    assert_eq!(
        toml::to_string(&shipped).unwrap(),
        toml::to_string(&defaults).unwrap()
    );
}

#[test]
fn test_shipped_config_builds_core() {
    let core = RoverCore::new(shipped_config()).unwrap();
    assert_eq!(core.map().size(), 200);
    assert_eq!(core.config().perception.frame_width, 320);
}
