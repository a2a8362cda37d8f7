//! Prompt text sent to the model.

use crate::core::{LibraryFamily, NO_CHANGE_SENTINEL};

/// Families that [`repair`] has a prompt for.
pub const REPAIRABLE: &[LibraryFamily] = &[
    LibraryFamily::Manim,
    LibraryFamily::Matplotlib,
    LibraryFamily::Vpython,
];

const REPAIR_PREAMBLE: &str = "\
Please generate python source code that modifies parts of the following code to create the intended diagram/visuals.
Ensure the code is compilable and includes only the required preamble statements.
If any external files are referenced, please modify the code to avoid referencing external files and include the content directly.
The output should consist solely of the code itself, without any supplementary text.";

/// Ask for a single scene cut out of a multi-scene file.
pub fn extract_scene(family: LibraryFamily, scene: &str, code: &str) -> String {
    format!(
        "Please extract the {scene} scene from the following {family} code.\n\
         If there is only one scene, respond with '{NO_CHANGE_SENTINEL}'.\n\
         Ensure the extracted code is compilable and includes only the required preamble statements and helper methods.\n\
         The output should consist solely of the code itself, without any supplementary text.\n\
         \nCode:\n{code}"
    )
}

/// Ask for a compilable, self-contained rewrite of a sampled file.
///
/// Returns `None` for families without a repair prompt.
pub fn repair(family: LibraryFamily, file_stem: &str, code: &str) -> Option<String> {
    let requirement = match family {
        LibraryFamily::Manim => "Make sure the code uses manim, instead of manimlib or manimgl.".to_string(),
        LibraryFamily::Matplotlib | LibraryFamily::Vpython => format!(
            "Make sure the code uses {family} animation.\n\
             Make sure the code exports to mp4 format with {file_stem}_<animation name>.mp4 as the filename."
        ),
        _ => return None,
    };
    Some(format!(
        "{REPAIR_PREAMBLE}\n{requirement}\nFilename: {file_stem}\n\nCode:\n{code}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_scene_prompt() {
        let prompt = extract_scene(LibraryFamily::Manim, "Intro", "class Intro(Scene): pass");
        assert!(prompt.starts_with("Please extract the Intro scene from the following manim code."));
        assert!(prompt.contains("'No change needed'"));
        assert!(prompt.ends_with("Code:\nclass Intro(Scene): pass"));
    }

    #[test]
    fn test_repair_prompt_per_family() {
        let prompt = repair(LibraryFamily::Matplotlib, "example_4", "plt.plot()").unwrap();
        assert!(prompt.contains("uses matplotlib animation"));
        assert!(prompt.contains("example_4_<animation name>.mp4"));
        assert!(prompt.ends_with("plt.plot()"));

        let prompt = repair(LibraryFamily::Manim, "example_0", "x").unwrap();
        assert!(prompt.contains("instead of manimlib or manimgl"));
    }

    #[test]
    fn test_repair_unsupported_family() {
        assert_eq!(repair(LibraryFamily::Tikz, "a", "b"), None);
        for family in REPAIRABLE {
            assert!(repair(*family, "a", "b").is_some());
        }
    }
}
