//! Environment overrides live in their own test binary: env vars are process-wide.

use std::env;
use std::fs;

use tempfile::TempDir;

use bintree::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_loading_then_override_files() {
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        r#"
default_nodes = 9

[render]
stroke = "green"
"#,
    )
    .unwrap();

    env::set_var("BINTREE_DEFAULT_NODES", "21");
    env::set_var("BINTREE_RENDER__STROKE", "red");
    let settings = Settings::load_from(None, Some(temp.path()));
    env::remove_var("BINTREE_DEFAULT_NODES");
    env::remove_var("BINTREE_RENDER__STROKE");

    let settings = settings.unwrap();
    assert_eq!(settings.default_nodes, 21);
    assert_eq!(settings.render.stroke, "red");
}
