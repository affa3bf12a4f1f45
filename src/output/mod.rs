//! Output generation for classmap

pub mod plantuml;

pub use plantuml::PlantUmlWriter;
