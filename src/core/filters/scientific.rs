use regex::Regex;
use std::sync::LazyLock;

use super::StructuralFilter;
use crate::core::family::LibraryFamily;

struct Patterns {
    import: Regex,
    animation: Regex,
}

fn patterns(import: &str, animation: &str) -> Patterns {
    Patterns {
        import: Regex::new(import).unwrap(),
        animation: Regex::new(animation).unwrap(),
    }
}

static PYVISTA: LazyLock<Patterns> = LazyLock::new(|| {
    patterns(r"(?im)^\s*(?:from|import)\s+pyvista\b", r"(?i)\.open_movie\s*\(")
});

// Either the mlab animation decorator or a loop over time steps/frames.
static MAYAVI: LazyLock<Patterns> = LazyLock::new(|| {
    patterns(
        r"(?im)^\s*(?:from|import)\s+mayavi\b",
        r"(?is)(mlab\.animate\s*\(|for\s+\w+\s+in\s+.*(range|times?|frames?)\s*\()",
    )
});

static VTK: LazyLock<Patterns> = LazyLock::new(|| {
    patterns(r"(?im)^\s*(?:from|import)\s+vtk\b", r"(?i)vtk(?:AVI|MP4)Writer")
});

static VISIT: LazyLock<Patterns> = LazyLock::new(|| {
    patterns(
        r"(?im)^\s*(?:from|import)\s+visit\b",
        r"(?is)TimeSliderGetNStates\s*\(\s*\).*?for\s+\w+\s+in\s+range\(",
    )
});

/// Movie-export filter shared by the scientific visualisation libraries.
///
/// Requires a line-anchored import of the library and its animation idiom.
/// The Mayavi loop pattern is loose: any `for` whose remaining file text
/// later contains `range(`, `time(` or `frames(` matches.
#[derive(Debug, Clone, Copy)]
pub struct ScientificFilter {
    family: LibraryFamily,
}

impl ScientificFilter {
    pub fn new(family: LibraryFamily) -> Self {
        Self { family }
    }

    fn patterns(&self) -> Option<&'static Patterns> {
        match self.family {
            LibraryFamily::Pyvista => Some(&*PYVISTA),
            LibraryFamily::Mayavi => Some(&*MAYAVI),
            LibraryFamily::Vtk => Some(&*VTK),
            LibraryFamily::Visit => Some(&*VISIT),
            _ => None,
        }
    }
}

impl StructuralFilter for ScientificFilter {
    fn accepts(&self, code: &str) -> bool {
        self.patterns()
            .is_some_and(|p| p.import.is_match(code) && p.animation.is_match(code))
    }
}
