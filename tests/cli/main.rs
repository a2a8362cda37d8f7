use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod classify;
mod decompose;
mod init;
mod repair;
mod sample;

const BIN_NAME: &str = "scenesift";

/// A Manim file whose comments are plain English.
pub const MANIM_SCENE: &str = r#"from manim import *

# This example shows how to draw a simple circle on the screen.
# The circle grows from the center and then it moves to the right side.
class CircleScene(Scene):
    def construct(self):
        circle = Circle(color=BLUE)
        self.play(Create(circle))
        self.play(circle.animate.shift(RIGHT * 2))
"#;

/// A TikZ animation whose `%` comments are plain English.
pub const TIKZ_ANIMATION: &str = r"\documentclass{article}
\usepackage{tikz}
\usepackage{animate}
% This document draws a small dot that moves along a straight line.
% The animation has ten frames and it plays again when it reaches the end.
\begin{document}
\begin{animateinline}{12}
\multiframe{10}{rX=0+0.1}{
\begin{tikzpicture}
\fill (\rX, 0) circle (2pt);
\end{tikzpicture}
}
\end{animateinline}
\end{document}
";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the test directory.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write `contents` as a JSON Lines shard, one `{"content": ...}` per line.
    pub fn write_jsonl(&self, path: &str, contents: &[&str]) -> Result<()> {
        let lines: Vec<String> = contents
            .iter()
            .map(|content| serde_json::json!({ "content": content }).to_string())
            .collect();
        self.write_file(path, &(lines.join("\n") + "\n"))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("RUST_LOG", "off"); // Keep stderr to the command's own report
        cmd
    }

    pub fn sample_command(&self, family: &str, input: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["sample", family, "--input", input]);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(self.project_dir.join(path))?
            .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_>>()?;
        names.sort();
        Ok(names)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
