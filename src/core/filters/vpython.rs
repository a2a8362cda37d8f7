use regex::Regex;
use std::sync::LazyLock;

use super::StructuralFilter;

const IMPORT_FORMS: &[&str] = &[
    "import vpython",
    "from vpython import",
    "import visual",
    "from visual import",
];

/// 3-D primitive constructors.
const PRIMITIVES: &[&str] = &[
    "sphere(",
    "box(",
    "curve(",
    "cylinder(",
    "cone(",
    "pyramid(",
    "arrow(",
    "ellipsoid(",
    "ring(",
    "helix(",
    "label(",
    "points(",
];

// The dot before `animate` is unescaped: any character followed by
// `animate(` counts, so `_animate(` matches as well as `.animate(`.
static ANIMATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rate\s*\(|.animate\s*\(").unwrap());

static LOOP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bwhile\b|\bfor\b").unwrap());

/// Physics-visualisation filter.
///
/// A static scene builds primitives once; an animation drives them from a
/// `rate()` loop or at least some loop. Any `for` or `while` anywhere in the
/// file satisfies the loop check, and primitive names are matched as plain
/// substrings (`mybox(` counts as `box(`).
#[derive(Debug, Clone, Copy, Default)]
pub struct VpythonFilter;

impl StructuralFilter for VpythonFilter {
    fn accepts(&self, code: &str) -> bool {
        if !IMPORT_FORMS.iter().any(|imp| code.contains(imp)) {
            return false;
        }

        let has_primitive = PRIMITIVES.iter().any(|obj| code.contains(obj));
        let has_driver = ANIMATION_REGEX.is_match(code) || LOOP_REGEX.is_match(code);
        has_primitive && has_driver
    }
}
