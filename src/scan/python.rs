// Regex-based Python source scanner
//
// Locates class and function declarations by pattern matching without
// executing any code. The patterns are deliberately naive and their quirks
// are load-bearing: a class header matches at most one parenthesized parent,
// multi-parent headers do not match at all, and the top-level function
// pattern's character class admits `=` so default values are tokenized as
// extra parameter names. Downstream consumers rely on this tokenization.

use crate::error::{Error, Result};
use crate::model::{Class, Function, Module};
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Scanner for Python source files
pub struct PythonScanner {
    /// `class Name(Parent):` with an optional single parent
    re_class: Regex,
    /// `def name(params)` indented by exactly four spaces
    re_method: Regex,
    /// Unindented `def name(params)`
    re_func: Regex,
    /// Word runs within a parameter list
    re_param: Regex,
}

impl PythonScanner {
    /// Create a new scanner, compiling the declaration patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_class: Regex::new(r"class (\w+)(\(\w+\))?:\n")?,
            re_method: Regex::new(r"    def (\w+)\(([\w,\s]+)[):]")?,
            re_func: Regex::new(r"def (\w+)\(([\w,=\s]+)[):]")?,
            re_param: Regex::new(r"(\w+)[,\s]*")?,
        })
    }

    /// Scan a Python file into a module node.
    ///
    /// The module name is the file stem, prefixed with `base_name` when
    /// given (`pkg` + `util.py` -> `pkg.util`).
    pub fn scan_file(&self, path: &Path, base_name: Option<&str>) -> Result<Module> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::scan(path, e.to_string()))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let module_name = match base_name {
            Some(base) if !base.is_empty() => format!("{}.{}", base, stem),
            _ => stem,
        };

        Ok(self.scan_source(&source, module_name))
    }

    /// Scan raw source text into a module node
    pub fn scan_source(&self, source: &str, module_name: String) -> Module {
        let mut module = Module::new(&module_name);
        let mut classes: Vec<Class> = Vec::new();
        let mut last_end: Option<usize> = None;

        for caps in self.re_class.captures_iter(source) {
            let header = caps.get(0).expect("whole match");

            // The span since the previous class header holds that class's
            // method declarations.
            if let Some(end) = last_end {
                if let Some(prev) = classes.last_mut() {
                    prev.methods = self.scan_functions(&source[end..header.start()], true);
                }
            }

            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let mut class = Class::new(name);
            class.parents = match caps.get(2) {
                Some(parent) => match parent
                    .as_str()
                    .strip_prefix('(')
                    .and_then(|p| p.strip_suffix(')'))
                {
                    Some(inner) => vec![inner.to_string()],
                    None => {
                        warn!(class = name, "failed to extract parent from class header");
                        Vec::new()
                    }
                },
                None => Vec::new(),
            };
            classes.push(class);
            last_end = Some(header.end());
        }

        if let Some(end) = last_end {
            // The last class absorbs the remaining text
            if let Some(last) = classes.last_mut() {
                last.methods = self.scan_functions(&source[end..], true);
            }
            module.classes = classes;
        } else {
            // No classes at all: scan the whole text for free functions
            module.functions = self.scan_functions(source, false);
        }

        module
    }

    /// Scan a span of text for function declarations.
    ///
    /// With `class_method` set, only four-space-indented declarations match.
    pub fn scan_functions(&self, text: &str, class_method: bool) -> Vec<Function> {
        let pattern = if class_method { &self.re_method } else { &self.re_func };

        pattern
            .captures_iter(text)
            .map(|caps| {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let raw_params = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                let params: Vec<String> = self
                    .re_param
                    .captures_iter(raw_params)
                    .filter_map(|p| p.get(1))
                    .map(|p| p.as_str().to_string())
                    .collect();
                Function::new(name).with_params(params)
            })
            .collect()
    }
}
