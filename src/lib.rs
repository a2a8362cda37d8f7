//! scenesift - animation-code sample curation
//!
//! scenesift streams large code corpora, keeps the files that drive a known
//! animation library (Manim, Matplotlib, VPython, TikZ, PyVista, Mayavi, VTK,
//! VisIt, SVG, Lottie), checks that their comments are written in an accepted
//! natural language and stores them as training samples. Stored samples can
//! be split into one file per scene and repaired through an LLM.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Classification and extraction engine (pure, no I/O)
//! - `llm`: LLM client, prompts and token accounting
//! - `pipeline`: Sampling, decomposition and repair passes
//! - `source`: JSON Lines and directory record sources
//! - `store`: On-disk sample store
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod llm;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod utils;
