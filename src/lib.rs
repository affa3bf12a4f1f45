//! Classmap - generate PlantUML class diagrams from codebases
//!
//! Two front ends build the same package/module/class tree: a regex text
//! scanner over source directories and a walker over static descriptor
//! tables. A PlantUML emitter serializes the tree.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scan;
pub mod setter;
pub mod walk;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Class, Function, Module, Node, Package, Variable, Visibility};
pub use output::PlantUmlWriter;
pub use scan::Scanner;
pub use walk::{Walker, WalkResult};
