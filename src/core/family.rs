//! Animation library families and their static trigger table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The animation ecosystem a sample targets.
///
/// Declaration order is the default classification order: when several
/// families' triggers appear in one file, the earliest one is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryFamily {
    /// Scene-graph animation (`manim` community edition).
    Manim,
    /// Plotting animation (`matplotlib.animation`).
    Matplotlib,
    /// Physics visualisation (`vpython` / classic `visual`).
    Vpython,
    /// Diagram markup animated with the LaTeX `animate` package.
    Tikz,
    Pyvista,
    Mayavi,
    Vtk,
    Visit,
    /// Vector markup with SMIL or CSS animation.
    Svg,
    /// Lottie motion-graphics JSON.
    Lottie,
}

/// Which slice of the corpus a family's samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    Python,
    Tex,
    Svg,
    Json,
}

impl CorpusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CorpusKind::Python => "python",
            CorpusKind::Tex => "tex",
            CorpusKind::Svg => "svg",
            CorpusKind::Json => "json",
        }
    }
}

impl LibraryFamily {
    pub const ALL: [LibraryFamily; 10] = [
        LibraryFamily::Manim,
        LibraryFamily::Matplotlib,
        LibraryFamily::Vpython,
        LibraryFamily::Tikz,
        LibraryFamily::Pyvista,
        LibraryFamily::Mayavi,
        LibraryFamily::Vtk,
        LibraryFamily::Visit,
        LibraryFamily::Svg,
        LibraryFamily::Lottie,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LibraryFamily::Manim => "manim",
            LibraryFamily::Matplotlib => "matplotlib",
            LibraryFamily::Vpython => "vpython",
            LibraryFamily::Tikz => "tikz",
            LibraryFamily::Pyvista => "pyvista",
            LibraryFamily::Mayavi => "mayavi",
            LibraryFamily::Vtk => "vtk",
            LibraryFamily::Visit => "visit",
            LibraryFamily::Svg => "svg",
            LibraryFamily::Lottie => "lottie",
        }
    }

    /// File extension (without dot) used when a sample is stored.
    pub fn extension(self) -> &'static str {
        match self.corpus() {
            CorpusKind::Python => "py",
            CorpusKind::Tex => "tex",
            CorpusKind::Svg => "svg",
            CorpusKind::Json => "json",
        }
    }

    pub fn corpus(self) -> CorpusKind {
        match self {
            LibraryFamily::Manim
            | LibraryFamily::Matplotlib
            | LibraryFamily::Vpython
            | LibraryFamily::Pyvista
            | LibraryFamily::Mayavi
            | LibraryFamily::Vtk
            | LibraryFamily::Visit => CorpusKind::Python,
            LibraryFamily::Tikz => CorpusKind::Tex,
            LibraryFamily::Svg => CorpusKind::Svg,
            LibraryFamily::Lottie => CorpusKind::Json,
        }
    }

    /// Literal substrings that short-list a blob for this family.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            LibraryFamily::Manim => &["from manim import", "import manim"],
            LibraryFamily::Matplotlib => {
                &["import matplotlib.animation", "from matplotlib.animation"]
            }
            LibraryFamily::Vpython => &[
                "import vpython",
                "from vpython import",
                "from visual import",
                "import visual",
                "from vpython.no_notebook import",
            ],
            LibraryFamily::Tikz => &[
                r"\usepackage{tikz}",
                r"\usepackage{animate}",
                r"\begin{animateinline}",
                r"\begin{tikzpicture}",
            ],
            LibraryFamily::Pyvista => &["import pyvista", "from pyvista"],
            LibraryFamily::Mayavi => &["import mayavi", "from mayavi"],
            LibraryFamily::Vtk => &["import vtk", "from vtk"],
            LibraryFamily::Visit => &["import visit", "from visit"],
            LibraryFamily::Svg => &["<svg"],
            LibraryFamily::Lottie => &[r#""layers""#],
        }
    }

    /// True if `code` contains at least one trigger verbatim.
    pub fn is_triggered_by(self, code: &str) -> bool {
        self.triggers().iter().any(|t| code.contains(t))
    }
}

impl fmt::Display for LibraryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a family name that is not in the trigger table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown library family '{name}'. Choose from: {}", LibraryFamily::ALL.map(|f| f.name()).join(", "))]
pub struct UnknownFamily {
    pub name: String,
}

impl FromStr for LibraryFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LibraryFamily::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| UnknownFamily {
                name: s.to_string(),
            })
    }
}
