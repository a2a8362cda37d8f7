use regex::Regex;
use std::sync::LazyLock;

use super::StructuralFilter;

static ANIMATION_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from\s+matplotlib\.animation\s+import|import\s+matplotlib\.animation").unwrap()
});

static ANIMATION_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(FuncAnimation|ArtistAnimation)\s*\(").unwrap());

static SAVE_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\s*save\s*\(").unwrap());

/// Plotting-animation filter.
///
/// Requires the animation module (imported or called) and a way to see the
/// result: any `show(` call or a `.save(` export. Any function whose name
/// ends in `show` counts, and so does `.save(` on unrelated objects such as
/// `np.save(`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatplotlibFilter;

impl StructuralFilter for MatplotlibFilter {
    fn accepts(&self, code: &str) -> bool {
        let uses_animation =
            ANIMATION_IMPORT_REGEX.is_match(code) || ANIMATION_CALL_REGEX.is_match(code);
        if !uses_animation {
            return false;
        }

        let has_show = code.contains("plt.show()") || code.contains("show(");
        has_show || SAVE_CALL_REGEX.is_match(code)
    }
}
