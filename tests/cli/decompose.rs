use anyhow::Result;

use crate::{CliTest, MANIM_SCENE, stderr, stdout};

const TWO_SCENES: &str = r#"from manim import *

class First(Scene):
    def construct(self):
        self.play(Create(Circle()))

class Second(Scene):
    def construct(self):
        self.play(Create(Square()))
"#;

#[test]
fn test_single_scene_is_copied_verbatim() -> Result<()> {
    let test = CliTest::with_file("sampled/manim/example_0.py", MANIM_SCENE)?;

    let output = test.command().arg("decompose").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote 1 scene unit from 1 file"));
    assert_eq!(
        test.read_file("sampled/manim_scenes/example_0_CircleScene.py")?,
        MANIM_SCENE
    );

    Ok(())
}

#[test]
fn test_multi_scene_without_api_key_reports_failures() -> Result<()> {
    let test = CliTest::with_file("in/multi.py", TWO_SCENES)?;
    test.write_file("in/helpers.py", "def helper():\n    return 1\n")?;

    let output = test
        .command()
        .args(["decompose", "--input", "in", "--output", "out"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote 0 scene units from 2 files"));
    let err = stderr(&output);
    assert!(err.contains("1 file without a scene class skipped"));
    assert!(err.contains("2 scenes could not be extracted"));

    Ok(())
}

#[test]
fn test_missing_input_dir_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("decompose").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Input directory does not exist"));

    Ok(())
}
