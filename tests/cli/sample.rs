use anyhow::Result;

use crate::{CliTest, MANIM_SCENE, TIKZ_ANIMATION, stderr, stdout};

const MATPLOTLIB_WITHOUT_EXPORT: &str = r#"import matplotlib.animation
import matplotlib.pyplot as plt

# Plot a straight line and keep the figure in memory only.
fig, ax = plt.subplots()
ax.plot([0, 1, 2], [0, 1, 2])
"#;

#[test]
fn test_manim_sample_is_stored() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("corpus.jsonl", &[MANIM_SCENE])?;

    let output = test.sample_command("manim", "corpus.jsonl").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved 1 sample in"));
    assert_eq!(test.read_file("sampled/manim/example_0.py")?, MANIM_SCENE);

    Ok(())
}

#[test]
fn test_tikz_sample_is_stored() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("tex.jsonl", &[TIKZ_ANIMATION])?;

    let output = test.sample_command("tikz", "tex.jsonl").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved 1 sample in"));
    assert_eq!(test.read_file("sampled/tikz/example_0.tex")?, TIKZ_ANIMATION);

    Ok(())
}

#[test]
fn test_matplotlib_without_export_is_not_stored() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("corpus.jsonl", &[MATPLOTLIB_WITHOUT_EXPORT])?;

    let output = test.sample_command("matplotlib", "corpus.jsonl").output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\u{2718} No python samples accepted from 1 record\n"
    );
    assert!(!test.root().join("sampled/matplotlib").exists());

    Ok(())
}

#[test]
fn test_unknown_family_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("corpus.jsonl", &[MANIM_SCENE])?;

    let output = test.sample_command("blender", "corpus.jsonl").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown library family 'blender'"));
    assert!(!test.root().join("sampled").exists());

    Ok(())
}

#[test]
fn test_max_stops_early() -> Result<()> {
    let test = CliTest::new()?;
    let second = MANIM_SCENE.replace("CircleScene", "OtherScene");
    test.write_jsonl("corpus.jsonl", &[MANIM_SCENE, &second])?;

    let output = test
        .sample_command("manim", "corpus.jsonl")
        .args(["--max", "1"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.list_dir("sampled/manim")?, vec!["example_0.py"]);

    Ok(())
}

#[test]
fn test_glob_of_shards_and_custom_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("shards/part-0.jsonl", &[MANIM_SCENE])?;
    test.write_jsonl("shards/part-1.jsonl", &[MATPLOTLIB_WITHOUT_EXPORT])?;

    let output = test
        .sample_command("manim", "shards/*.jsonl")
        .args(["--output", "out", "-v"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Scanned 2 records: 0 without trigger, 1 rejected by filter"));
    assert!(test.root().join("out/manim/example_0.py").exists());

    Ok(())
}

#[test]
fn test_hash_identity_rerun_is_noop() -> Result<()> {
    let test = CliTest::new()?;
    test.write_jsonl("corpus.jsonl", &[MANIM_SCENE])?;

    for _ in 0..2 {
        let output = test
            .sample_command("manim", "corpus.jsonl")
            .args(["--identity", "hash"])
            .output()?;
        assert!(output.status.success());
    }

    let files = test.list_dir("sampled/manim")?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].len(), 64 + ".py".len());

    Ok(())
}

#[test]
fn test_directory_input() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("repo/scenes/circle.py", MANIM_SCENE)?;
    test.write_file("repo/README.md", "from manim import *")?;

    let output = test.sample_command("manim", "repo").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("sampled/manim/example_0.py")?, MANIM_SCENE);

    Ok(())
}

#[test]
fn test_missing_input_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.sample_command("manim", "missing.jsonl").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Input does not exist"));

    Ok(())
}
