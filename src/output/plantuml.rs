// PlantUML emitter
//
// Depth-first serialization of the tree into PlantUML class-diagram text.
// The output always opens with @startuml plus a generation note and closes
// with @enduml; everything in between is indented package blocks.

use crate::error::Result;
use crate::model::{Class, Function, Module, Node, Package, Variable};
use std::fmt::Write as _;
use std::path::Path;

/// Label written into the generation note
pub const GENERATOR_LABEL: &str = "Autogenerated by classmap";

const TAB: &str = "    ";

/// `B extends A` connector
const EXTENSION: &str = " <|-down- ";
/// Module-to-dependency connector
const DEPENDENCY: &str = " ..> ";

/// Renders a tree into PlantUML text
pub struct PlantUmlWriter {
    include_dependencies: bool,
}

impl PlantUmlWriter {
    pub fn new() -> Self {
        Self {
            include_dependencies: false,
        }
    }

    /// Also emit dependency edges recorded by the walker
    pub fn with_dependencies(mut self, include: bool) -> Self {
        self.include_dependencies = include;
        self
    }

    /// Render the whole diagram, note block and all
    pub fn render(&self, root: &Node, dependencies: &[(String, String)]) -> String {
        let mut out = String::new();

        out.push_str("@startuml\n");
        out.push_str("note as autonote\n");
        out.push_str(GENERATOR_LABEL);
        out.push('\n');
        let _ = writeln!(out, "{}", chrono::Local::now().format("%c"));
        out.push_str("end note\n\n");

        self.write_node(&mut out, root, 0);

        if self.include_dependencies {
            for (from, to) in dependencies {
                let _ = writeln!(out, "{}{}{}", from, DEPENDENCY, to);
            }
        }

        out.push_str("@enduml\n");
        out
    }

    /// Render and write to a file
    pub fn write_file(
        &self,
        root: &Node,
        dependencies: &[(String, String)],
        path: &Path,
    ) -> Result<()> {
        let text = self.render(root, dependencies);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    fn write_node(&self, out: &mut String, node: &Node, n_tab: usize) {
        match node {
            Node::Package(package) => self.write_package(out, package, n_tab),
            Node::Module(module) => self.write_module(out, module, n_tab),
            Node::Class(class) => self.write_class(out, class, n_tab),
            Node::Function(func) => self.write_function(out, func, n_tab),
            Node::Variable(var) => self.write_variable(out, var, n_tab),
        }
    }

    fn write_package(&self, out: &mut String, package: &Package, n_tab: usize) {
        let _ = writeln!(out, "{}package {} {{", TAB.repeat(n_tab), package.name);

        for module in &package.modules {
            self.write_module(out, module, n_tab + 1);
        }
        for subpackage in &package.subpackages {
            self.write_package(out, subpackage, n_tab + 1);
        }

        let _ = writeln!(out, "{}}}", TAB.repeat(n_tab));
    }

    fn write_module(&self, out: &mut String, module: &Module, n_tab: usize) {
        // Empty modules are invisible in the diagram
        if module.is_empty() {
            return;
        }

        let _ = writeln!(out, "\n{}package {} {{", TAB.repeat(n_tab), module.name);

        if !module.variables.is_empty() || !module.functions.is_empty() {
            // Loose members get a pseudo-class named after the module
            let _ = writeln!(
                out,
                "\n{}class {}.module {{",
                TAB.repeat(n_tab + 1),
                module.name
            );
            for var in &module.variables {
                self.write_variable(out, var, n_tab + 2);
            }
            for func in &module.functions {
                self.write_function(out, func, n_tab + 2);
            }
            let _ = writeln!(out, "{}}}", TAB.repeat(n_tab + 1));
        }

        let mut extensions: Vec<String> = Vec::new();
        for class in &module.classes {
            self.write_class(out, class, n_tab + 1);
            for parent in &class.parents {
                extensions.push(format!("{}{}{}", parent, EXTENSION, class.name));
            }
        }

        for edge in extensions {
            let _ = writeln!(out, "{}{}", TAB.repeat(n_tab + 1), edge);
        }

        let _ = writeln!(out, "{}}}", TAB.repeat(n_tab));
    }

    fn write_class(&self, out: &mut String, class: &Class, n_tab: usize) {
        let _ = writeln!(out, "\n{}class {} {{", TAB.repeat(n_tab), class.name);

        for attr in &class.attributes {
            self.write_variable(out, attr, n_tab + 1);
        }
        for method in &class.methods {
            self.write_function(out, method, n_tab + 1);
        }
        if !class.functions.is_empty() {
            let _ = writeln!(out, "{}-- static methods --", TAB.repeat(n_tab + 1));
            for func in &class.functions {
                self.write_function(out, func, n_tab + 1);
            }
        }

        let _ = writeln!(out, "{}}}", TAB.repeat(n_tab));
    }

    fn write_function(&self, out: &mut String, func: &Function, n_tab: usize) {
        // Return types are never known; a fixed placeholder keeps the
        // signature shape.
        let _ = writeln!(
            out,
            "{}{} void {}({})",
            TAB.repeat(n_tab),
            func.visibility.symbol(),
            func.name,
            func.params.join(", ")
        );
    }

    fn write_variable(&self, out: &mut String, var: &Variable, n_tab: usize) {
        let _ = writeln!(
            out,
            "{}{} {}:{}",
            TAB.repeat(n_tab),
            var.visibility.symbol(),
            var.name,
            var.type_label
        );
    }
}

impl Default for PlantUmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
