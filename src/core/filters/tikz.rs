use regex::Regex;
use std::sync::LazyLock;

use super::StructuralFilter;

static ANIMATION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\\begin\{animateinline(?:\[.*?\])?\}",
        r"\\animategraphics",
        r"\\multiframe",
        r"\\usepackage\{animate\}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// LaTeX diagram filter: a TikZ picture plus the `animate` package.
///
/// The picture and the animation markers are not required to be related;
/// a document with a static picture and an unrelated `\animategraphics`
/// of external frames is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TikzFilter;

impl StructuralFilter for TikzFilter {
    fn accepts(&self, code: &str) -> bool {
        let has_picture =
            code.contains(r"\begin{tikzpicture}") || code.contains(r"\end{tikzpicture}");
        has_picture && ANIMATION_REGEXES.iter().any(|re| re.is_match(code))
    }
}
