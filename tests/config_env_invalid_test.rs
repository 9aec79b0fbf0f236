//! Malformed environment overrides; separate binary because env vars are process-wide.

use std::env;
use std::fs;

use tempfile::TempDir;

use bintree::cli::CliError;
use bintree::config::{local_config_path, Settings};

#[test]
fn given_unparseable_env_values_when_loading_then_reports_variable() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "default_nodes = 9\n").unwrap();

    // Checked one at a time so each error names its own variable.
    for (var, value) in [
        ("BINTREE_DEFAULT_NODES", "twenty"),
        ("BINTREE_RENDER__UNIT", "wide"),
        ("BINTREE_RENDER__FONT_SIZE", "-3"),
    ] {
        env::set_var(var, value);
        let result = Settings::load_from(None, Some(temp.path()));
        env::remove_var(var);

        let err = result.expect_err(var);
        assert!(err.to_string().contains(var), "{var}: {err}");
        assert_eq!(CliError::from(err).exit_code(), bintree::exitcode::CONFIG);
    }

    let settings = Settings::load_from(None, Some(temp.path())).unwrap();
    assert_eq!(settings.default_nodes, 9);
}
