// Static descriptor tables
//
// The walker's input: an explicit description of a loaded module tree,
// standing in for runtime reflection. Tables are built in code through the
// constructors below or loaded from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Descriptor for a module and its ordered members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleDesc {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberDesc>,
}

impl ModuleDesc {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDesc) -> Self {
        self.members.push(member);
        self
    }

    /// Load a descriptor table from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let desc: ModuleDesc = serde_json::from_str(&contents)?;
        if desc.name.is_empty() {
            return Err(Error::descriptor("module name must not be empty"));
        }
        Ok(desc)
    }
}

/// A named member of a module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberDesc {
    Module(ModuleDesc),
    Class(ClassDesc),
    Function(FunctionDesc),
    Variable(VariableDesc),
}

impl MemberDesc {
    pub fn name(&self) -> &str {
        match self {
            MemberDesc::Module(m) => &m.name,
            MemberDesc::Class(c) => &c.name,
            MemberDesc::Function(f) => &f.name,
            MemberDesc::Variable(v) => &v.name,
        }
    }
}

/// Descriptor for a class: bases plus function members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDesc {
    pub name: String,
    /// Dotted name of the module defining this class
    pub module: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub members: Vec<FunctionDesc>,
}

impl ClassDesc {
    pub fn new(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            module: module.to_string(),
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.bases.push(base.to_string());
        self
    }

    pub fn with_member(mut self, member: FunctionDesc) -> Self {
        self.members.push(member);
        self
    }
}

/// Descriptor for a function or method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDesc {
    pub name: String,
    /// Dotted name of the module defining this function
    pub module: String,
    /// Declared parameter names; `None` models a routine whose signature
    /// could not be introspected
    #[serde(default)]
    pub signature: Option<Vec<String>>,
}

impl FunctionDesc {
    pub fn new(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            module: module.to_string(),
            signature: Some(Vec::new()),
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Mark the signature as unintrospectable
    pub fn opaque(mut self) -> Self {
        self.signature = None;
        self
    }
}

/// Descriptor for a plain variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableDesc {
    pub name: String,
    #[serde(default)]
    pub type_label: String,
}

impl VariableDesc {
    pub fn new(name: &str, type_label: &str) -> Self {
        Self {
            name: name.to_string(),
            type_label: type_label.to_string(),
        }
    }
}
