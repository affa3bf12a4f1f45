// Tree model shared by both front ends
//
// The scanner and the walker each build this package/module/class/function
// tree; the emitter only ever reads it. Nodes are serializable so the tree
// can be dumped as JSON for debugging or downstream tooling.

use serde::{Deserialize, Serialize};

/// Visibility of a function, method, or variable, derived purely from the
/// name's underscore convention. Never stored separately from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Classify a name by its underscore prefix/suffix.
    ///
    /// Two or more leading underscores combined with two trailing underscores
    /// (`__init__`) is private; exactly one leading underscore (`_helper`) is
    /// protected; everything else is public.
    pub fn of(name: &str) -> Self {
        let leading = name.chars().take_while(|c| *c == '_').count();
        if leading >= 2 && name.len() > leading && name.ends_with("__") {
            Visibility::Private
        } else if leading == 1 {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    /// PlantUML visibility symbol
    pub fn symbol(&self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Protected => '#',
            Visibility::Private => '-',
        }
    }
}

/// One entry in the abstract tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Package(Package),
    Module(Module),
    Class(Class),
    Function(Function),
    Variable(Variable),
}

impl Node {
    /// Name of the node regardless of variant
    pub fn name(&self) -> &str {
        match self {
            Node::Package(p) => &p.name,
            Node::Module(m) => &m.name,
            Node::Class(c) => &c.name,
            Node::Function(f) => &f.name,
            Node::Variable(v) => &v.name,
        }
    }
}

/// A package: a directory of modules and subpackages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub name: String,
    pub modules: Vec<Module>,
    pub subpackages: Vec<Package>,
    /// Non-source files, recorded by name only
    pub misc: Vec<String>,
}

impl Package {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modules: Vec::new(),
            subpackages: Vec::new(),
            misc: Vec::new(),
        }
    }
}

/// A single source module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub name: String,
    pub classes: Vec<Class>,
    /// Free functions not inside any class
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
}

impl Module {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Empty modules are invisible to the emitter
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.variables.is_empty()
    }
}

/// A class definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    pub name: String,
    /// Parent class names. Always a list; empty means no parents.
    pub parents: Vec<String>,
    /// Instance methods
    pub methods: Vec<Function>,
    /// Static and class methods
    pub functions: Vec<Function>,
    pub attributes: Vec<Variable>,
}

impl Class {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parents: Vec::new(),
            methods: Vec::new(),
            functions: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

/// A function or method signature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Function {
    pub name: String,
    pub visibility: Visibility,
    /// Parameter names only; types and defaults are not tracked
    pub params: Vec<String>,
}

impl Function {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::of(name),
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// A module-level variable or class attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub name: String,
    pub visibility: Visibility,
    /// Best-effort type label; not guaranteed accurate on the scanner path
    pub type_label: String,
}

impl Variable {
    pub fn new(name: &str, type_label: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::of(name),
            type_label: type_label.to_string(),
        }
    }
}
