//! Structural filters: library-specific checks that a blob actually animates.
//!
//! A trigger substring only says a file mentions a library. The filters here
//! look for evidence of a real, visual animation (an object being drawn and a
//! play/save/loop driving it). They are string and regex heuristics, not
//! parsers; each module documents what it misses.
//!
//! ## Module Structure
//!
//! - `manim`: scene-graph animation
//! - `matplotlib`: plotting animation
//! - `vpython`: physics visualisation
//! - `tikz`: LaTeX diagram animation
//! - `scientific`: PyVista, Mayavi, VTK and VisIt movie exports
//! - `markup`: SVG (SMIL/CSS) and Lottie JSON

mod manim;
mod markup;
mod matplotlib;
mod scientific;
mod tikz;
mod vpython;

use enum_dispatch::enum_dispatch;

use super::family::LibraryFamily;

pub use manim::{ManimFilter, VISUAL_MOBJECTS};
pub use markup::{LottieFilter, SvgFilter};
pub use matplotlib::MatplotlibFilter;
pub use scientific::ScientificFilter;
pub use tikz::TikzFilter;
pub use vpython::VpythonFilter;

/// Decides whether a triggered blob is a genuine animation.
#[enum_dispatch]
pub trait StructuralFilter {
    fn accepts(&self, code: &str) -> bool;
}

/// One filter per family, dispatched without boxing.
#[enum_dispatch(StructuralFilter)]
#[derive(Debug, Clone)]
pub enum Filter {
    Manim(ManimFilter),
    Matplotlib(MatplotlibFilter),
    Vpython(VpythonFilter),
    Tikz(TikzFilter),
    Scientific(ScientificFilter),
    Svg(SvgFilter),
    Lottie(LottieFilter),
}

impl Filter {
    pub fn for_family(family: LibraryFamily) -> Self {
        match family {
            LibraryFamily::Manim => ManimFilter.into(),
            LibraryFamily::Matplotlib => MatplotlibFilter.into(),
            LibraryFamily::Vpython => VpythonFilter.into(),
            LibraryFamily::Tikz => TikzFilter.into(),
            LibraryFamily::Pyvista
            | LibraryFamily::Mayavi
            | LibraryFamily::Vtk
            | LibraryFamily::Visit => ScientificFilter::new(family).into(),
            LibraryFamily::Svg => SvgFilter.into(),
            LibraryFamily::Lottie => LottieFilter.into(),
        }
    }
}
