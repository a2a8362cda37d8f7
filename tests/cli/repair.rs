use anyhow::Result;

use crate::{CliTest, stderr};

#[test]
fn test_repair_requires_api_key() -> Result<()> {
    let test = CliTest::with_file("sampled/vpython/example_0.py", "from vpython import *\n")?;

    let output = test.command().args(["repair", "vpython"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("OPENAI_API_KEY"));
    assert!(!test.root().join("sampled/vpython_fixed").exists());

    Ok(())
}

#[test]
fn test_repair_rejects_family_without_prompt() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["repair", "tikz"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Repair is not available for 'tikz'"));

    Ok(())
}
