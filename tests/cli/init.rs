use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, MANIM_SCENE, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["acceptedLanguages"], serde_json::json!(["EN", "JA"]));
    assert_eq!(parsed["windowSize"], 10);
    assert_eq!(parsed["windowStride"], 5);
    assert_eq!(parsed["outputRoot"], "sampled");
    assert_eq!(parsed["families"][0], "manim");
    assert_eq!(parsed["repair"]["maxLines"], 1000);

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .scenesiftrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".scenesiftrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".scenesiftrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .scenesiftrc.json already exists\n");
    assert_eq!(test.read_file(".scenesiftrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_file("scene.py", MANIM_SCENE)?;

    test.command().arg("init").output()?;
    let output = test.command().args(["classify", "scene.py"]).output()?;

    assert!(
        output.status.success(),
        "classify should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("manim"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".scenesiftrc.json", r#"{ "windowSize": 0 }"#)?;
    test.write_file("scene.py", MANIM_SCENE)?;

    let output = test.command().args(["classify", "scene.py"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'windowSize' must be at least 1"));

    Ok(())
}
