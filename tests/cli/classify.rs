use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, MANIM_SCENE, TIKZ_ANIMATION, stdout};

#[test]
fn test_classify_manim() -> Result<()> {
    let test = CliTest::with_file("scene.py", MANIM_SCENE)?;

    assert_cmd_snapshot!(test.command().args(["classify", "scene.py"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ scene.py: manim (language EN)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_classify_without_trigger() -> Result<()> {
    let test = CliTest::with_file("plain.py", "print('hello')\n")?;

    let output = test.command().args(["classify", "plain.py"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "\u{2718} plain.py: no library trigger found\n");

    Ok(())
}

#[test]
fn test_classify_blacklisted_manim() -> Result<()> {
    let code = MANIM_SCENE.replace("from manim import *", "from manim import *\nimport manimlib");
    let test = CliTest::with_file("old.py", &code)?;

    let output = test.command().args(["classify", "old.py"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("manim trigger found, rejected by structural filter"));

    Ok(())
}

#[test]
fn test_classify_tikz_animation() -> Result<()> {
    let test = CliTest::with_file("dot.tex", TIKZ_ANIMATION)?;

    let output = test.command().args(["classify", "dot.tex"]).output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert_eq!(stdout(&output), "\u{2713} dot.tex: tikz (language EN)\n");

    Ok(())
}

#[test]
fn test_classify_lottie_has_no_language() -> Result<()> {
    let lottie = r#"{"v": "5.7.4", "fr": 30, "ip": 0, "op": 90, "w": 200, "h": 200, "layers": [{"ty": 4, "nm": "Ball"}]}"#;
    let test = CliTest::with_file("ball.json", lottie)?;

    let output = test.command().args(["classify", "ball.json"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} ball.json: lottie\n");

    Ok(())
}
