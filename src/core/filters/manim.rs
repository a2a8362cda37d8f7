use regex::Regex;
use std::sync::LazyLock;

use super::StructuralFilter;

/// Substrings of other manim dialects (3b1b `manimgl`, plugins built on it).
const BLACKLIST: &[&str] = &["manimgl", "manim_rubikscube", "manimlib"];

/// Evidence that the scene actually animates something.
const PLAY_MARKER: &str = "self.play(";

/// Imports from `manim_ml` are always visual.
const NEURAL_NETWORK_IMPORT: &str = "from manim_ml.neural_network";

/// Mobject classes that render something other than text.
pub const VISUAL_MOBJECTS: &[&str] = &[
    "Circle",
    "Square",
    "Rectangle",
    "Polygon",
    "Line",
    "Dot",
    "Arrow",
    "Ellipse",
    "Arc",
    "RegularPolygon",
    "Annulus",
    "Sector",
    "Triangle",
    "ImageMobject",
    "SVGMobject",
    "Axes",
    "NumberPlane",
    "Graph",
    "BarChart",
    "Table",
    "Brace",
];

// `name = ClassName(`; group 2 is the constructor.
static CREATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*(\w+)\s*\(").unwrap());

/// Scene-graph filter for manim community edition.
///
/// Only simple single-line assignments are inspected, and only the first
/// assignment on each line. Objects built by factory functions,
/// comprehensions, or constructor calls split over several lines are not
/// seen, so such files are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManimFilter;

impl ManimFilter {
    fn instantiates_visual(code: &str) -> bool {
        code.lines().any(|line| {
            let line = line.replace('\t', "");
            CREATION_REGEX
                .captures(&line)
                .and_then(|caps| caps.get(2))
                .is_some_and(|class| VISUAL_MOBJECTS.contains(&class.as_str()))
        })
    }
}

impl StructuralFilter for ManimFilter {
    fn accepts(&self, code: &str) -> bool {
        if BLACKLIST.iter().any(|kw| code.contains(kw)) {
            return false;
        }
        if !code.contains(PLAY_MARKER) {
            return false;
        }
        if code.contains(NEURAL_NETWORK_IMPORT) {
            return true;
        }
        Self::instantiates_visual(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(code: &str) -> bool {
        ManimFilter.accepts(code)
    }

    #[test]
    fn test_play_and_circle_accepted() {
        let code = r#"from manim import *

class Demo(Scene):
    def construct(self):
        x = Circle()
        self.play(Create(x))
"#;
        assert!(accepts(code));
    }

    #[test]
    fn test_text_only_scene_rejected() {
        let code = r#"from manim import *

class Title(Scene):
    def construct(self):
        t = Text("Hello")
        self.play(Write(t))
"#;
        assert!(!accepts(code));
    }

    #[test]
    fn test_missing_play_rejected() {
        let code = "from manim import *\nc = Circle()\n";
        assert!(!accepts(code));
    }

    #[test]
    fn test_blacklisted_dialect_rejected() {
        let code = "from manimlib import *\nc = Circle()\nself.play(ShowCreation(c))\n";
        assert!(!accepts(code));
        let code = "from manim import *\nimport manim_rubikscube\nc = Circle()\nself.play(c)\n";
        assert!(!accepts(code));
    }

    #[test]
    fn test_neural_network_import_bypasses_scan() {
        let code = "from manim import *\nfrom manim_ml.neural_network import NeuralNetwork\nself.play(nn.make_forward_pass_animation())\n";
        assert!(accepts(code));
    }

    #[test]
    fn test_tabs_are_ignored() {
        let code = "self.play(x)\n\tax\t=\tAxes(x_range=[0, 1])\n";
        assert!(accepts(code));
    }

    #[test]
    fn test_every_visual_mobject_is_recognised() {
        for class in VISUAL_MOBJECTS {
            let code = format!("self.play(obj)\nobj = {}()\n", class);
            assert!(accepts(&code), "{} should be accepted", class);
        }
    }

    #[test]
    fn test_factory_and_multiline_constructions_are_missed() {
        // Known limitation: only `name = Ctor(` on one line counts.
        let code = "self.play(x)\ndots = [Dot() for _ in range(3)]\nshape = make_shape()\n";
        assert!(!accepts(code));
        let code = "self.play(x)\nsq = (\n    Square()\n)\n";
        assert!(!accepts(code));
    }

    #[test]
    fn test_only_first_assignment_per_line_counts() {
        let code = "self.play(x)\na = f(b = Circle())\n";
        assert!(!accepts(code));
    }
}
