//! Environment overrides live in their own test binary: env vars are process-global.

use tempfile::TempDir;

use steptree::config::Settings;

#[test]
fn given_env_vars_when_loading_then_override_files() {
    // Arrange
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".steptree.toml"),
        "canvas = \"file\"\n[play]\nshow_hidden = false\n",
    )
    .unwrap();
    std::env::set_var("STEPTREE_CANVAS", "env");
    std::env::set_var("STEPTREE_PLAY__SHOW_HIDDEN", "true");

    // Act
    let settings = Settings::load_layers(None, Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.canvas, "env");
    assert!(settings.play.show_hidden);
}
