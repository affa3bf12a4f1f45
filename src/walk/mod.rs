// Descriptor walker front end
//
// Builds the same tree shape as the directory scanner, but from a static
// descriptor table instead of source text. Classification mirrors what a
// runtime-reflection walk would see: members are bucketed into submodules,
// external dependencies, classes, functions, and plain variables.

pub mod descriptor;

pub use descriptor::{ClassDesc, FunctionDesc, MemberDesc, ModuleDesc, VariableDesc};

use crate::model::{Class, Function, Module, Node, Package, Variable, Visibility};
use tracing::warn;

/// Receiver-parameter convention separating instance methods from
/// static/class functions
const RECEIVER: &str = "self";

/// Members every class inherits from the base object. Always excluded from
/// the walk regardless of access level. Declared constructors (`__init__`,
/// `__call__`) are deliberately not listed so they survive at access
/// level 2.
const OBJECT_MEMBERS: &[&str] = &[
    "__class__",
    "__delattr__",
    "__dict__",
    "__dir__",
    "__doc__",
    "__eq__",
    "__format__",
    "__ge__",
    "__getattribute__",
    "__gt__",
    "__hash__",
    "__init_subclass__",
    "__le__",
    "__lt__",
    "__module__",
    "__ne__",
    "__new__",
    "__reduce__",
    "__reduce_ex__",
    "__repr__",
    "__setattr__",
    "__sizeof__",
    "__str__",
    "__subclasshook__",
    "__weakref__",
];

/// Result of walking a descriptor table
#[derive(Debug, Clone, PartialEq)]
pub struct WalkResult {
    /// Root of the tree: a package or a module node
    pub root: Node,
    /// (module, dependency) name pairs for imports of foreign modules
    pub dependencies: Vec<(String, String)>,
}

/// Walks descriptor tables into package/module trees
pub struct Walker {
    /// 0 = public only, 1 = +protected, 2 = +private
    access_level: u8,
}

impl Walker {
    pub fn new() -> Self {
        Self { access_level: 0 }
    }

    /// Set how much protected/private detail the walk surfaces
    pub fn with_access_level(mut self, level: u8) -> Self {
        self.access_level = level.min(2);
        self
    }

    /// Walk a descriptor table into a tree plus its dependency pairs
    pub fn walk(&self, desc: &ModuleDesc) -> WalkResult {
        let mut dependencies = Vec::new();
        let root = self.walk_module(desc, &mut dependencies);
        WalkResult { root, dependencies }
    }

    fn walk_module(&self, desc: &ModuleDesc, deps: &mut Vec<(String, String)>) -> Node {
        let mut submodules: Vec<&ModuleDesc> = Vec::new();
        let mut classes: Vec<Class> = Vec::new();
        let mut functions: Vec<Function> = Vec::new();
        let mut variables: Vec<Variable> = Vec::new();

        for member in &desc.members {
            if !self.admits(member.name()) {
                continue;
            }

            match member {
                MemberDesc::Module(sub) => {
                    if sub.name == desc.name {
                        warn!(module = %desc.name, "module lists itself as a member, skipping");
                        continue;
                    }
                    if sub.name.starts_with(desc.name.as_str()) {
                        submodules.push(sub);
                    } else {
                        push_dependency(deps, &desc.name, &sub.name);
                    }
                }
                MemberDesc::Class(class) => {
                    if class.module == desc.name {
                        classes.push(self.walk_class(class));
                    } else {
                        push_dependency(deps, &desc.name, &class.module);
                    }
                }
                MemberDesc::Function(func) => {
                    if func.module == desc.name {
                        functions.push(self.walk_function(func));
                    } else {
                        push_dependency(deps, &desc.name, &func.module);
                    }
                }
                MemberDesc::Variable(var) => {
                    variables.push(Variable::new(&var.name, &var.type_label));
                }
            }
        }

        let pure_package = !submodules.is_empty()
            && classes.is_empty()
            && functions.is_empty()
            && variables.is_empty();

        if pure_package {
            let mut package = Package::new(&desc.name);
            for sub in submodules {
                match self.walk_module(sub, deps) {
                    Node::Package(p) => package.subpackages.push(p),
                    Node::Module(m) => package.modules.push(m),
                    other => {
                        warn!(member = other.name(), "unexpected node from submodule walk");
                    }
                }
            }
            Node::Package(package)
        } else {
            if !submodules.is_empty() {
                // The closed tree model gives content-bearing modules no
                // slot for child modules.
                warn!(
                    module = %desc.name,
                    count = submodules.len(),
                    "dropping submodules of a content-bearing module"
                );
            }
            let mut module = Module::new(&desc.name);
            module.classes = classes;
            module.functions = functions;
            module.variables = variables;
            Node::Module(module)
        }
    }

    /// Walk a class descriptor, bucketing members by the receiver convention
    pub fn walk_class(&self, desc: &ClassDesc) -> Class {
        let mut class = Class::new(&desc.name);
        class.parents = desc.bases.clone();

        for func in &desc.members {
            if !self.admits(&func.name) {
                continue;
            }
            let walked = self.walk_function(func);
            let is_instance_method = func
                .signature
                .as_ref()
                .and_then(|params| params.first())
                .map(|first| first == RECEIVER)
                .unwrap_or(false);
            if is_instance_method {
                class.methods.push(walked);
            } else {
                class.functions.push(walked);
            }
        }

        class
    }

    /// Walk a function descriptor; an unintrospectable signature degrades
    /// to an empty parameter list
    pub fn walk_function(&self, desc: &FunctionDesc) -> Function {
        let mut func = Function::new(&desc.name);
        match &desc.signature {
            Some(params) => func.params = params.clone(),
            None => {
                warn!(function = %desc.name, "signature not introspectable, recording no parameters");
            }
        }
        func
    }

    /// Access filter applied before classification
    fn admits(&self, name: &str) -> bool {
        if OBJECT_MEMBERS.contains(&name) {
            return false;
        }
        match Visibility::of(name) {
            Visibility::Public => true,
            Visibility::Protected => self.access_level >= 1,
            Visibility::Private => self.access_level >= 2,
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

fn push_dependency(deps: &mut Vec<(String, String)>, from: &str, to: &str) {
    let pair = (from.to_string(), to.to_string());
    if !deps.contains(&pair) {
        deps.push(pair);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_class() -> ClassDesc {
        // Mirrors the validated-setter fixture: one constructor, one setter.
        ClassDesc::new("Person", "people")
            .with_member(
                FunctionDesc::new("__init__", "people").with_params(["self", "name", "age"]),
            )
            .with_member(FunctionDesc::new("set_age", "people").with_params(["self", "value"]))
    }

    #[test]
    fn test_pure_package_classification() {
        let desc = ModuleDesc::new("boring_stuff")
            .with_member(MemberDesc::Module(ModuleDesc::new(
                "boring_stuff.class_helper",
            )))
            .with_member(MemberDesc::Module(ModuleDesc::new("boring_stuff.parser")));

        let result = Walker::new().walk(&desc);
        match result.root {
            Node::Package(pkg) => {
                assert_eq!(pkg.name, "boring_stuff");
                assert_eq!(pkg.modules.len(), 2); // leaves have no members
            }
            other => panic!("expected package, got {:?}", other),
        }
    }

    #[test]
    fn test_module_classification_with_content() {
        let desc = ModuleDesc::new("pkg")
            .with_member(MemberDesc::Module(ModuleDesc::new("pkg.sub")))
            .with_member(MemberDesc::Function(
                FunctionDesc::new("run", "pkg").with_params(["arg"]),
            ));

        let result = Walker::new().walk(&desc);
        match result.root {
            Node::Module(module) => {
                assert_eq!(module.functions.len(), 1);
            }
            other => panic!("expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_is_skipped() {
        let desc = ModuleDesc::new("loop").with_member(MemberDesc::Module(ModuleDesc::new("loop")));

        let result = Walker::new().walk(&desc);
        match result.root {
            Node::Module(module) => assert!(module.is_empty()),
            other => panic!("expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_module_recorded_as_dependency() {
        let desc = ModuleDesc::new("app")
            .with_member(MemberDesc::Module(ModuleDesc::new("numpy")))
            .with_member(MemberDesc::Function(
                FunctionDesc::new("run", "app").with_params(["arg"]),
            ));

        let result = Walker::new().walk(&desc);
        assert_eq!(
            result.dependencies,
            vec![("app".to_string(), "numpy".to_string())]
        );
    }

    #[test]
    fn test_imported_function_recorded_as_dependency() {
        let desc = ModuleDesc::new("app").with_member(MemberDesc::Function(
            FunctionDesc::new("sqrt", "math").with_params(["x"]),
        ));

        let result = Walker::new().walk(&desc);
        assert_eq!(
            result.dependencies,
            vec![("app".to_string(), "math".to_string())]
        );
        match result.root {
            Node::Module(module) => assert!(module.functions.is_empty()),
            other => panic!("expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_access_level_filters_members() {
        let desc = ModuleDesc::new("app")
            .with_member(MemberDesc::Function(
                FunctionDesc::new("public", "app").with_params(["arg"]),
            ))
            .with_member(MemberDesc::Function(
                FunctionDesc::new("_protected", "app").with_params(["arg"]),
            ))
            .with_member(MemberDesc::Function(
                FunctionDesc::new("__private__", "app").with_params(["arg"]),
            ));

        let count_at = |level: u8| {
            let result = Walker::new().with_access_level(level).walk(&desc);
            match result.root {
                Node::Module(module) => module.functions.len(),
                other => panic!("expected module, got {:?}", other),
            }
        };

        assert_eq!(count_at(0), 1);
        assert_eq!(count_at(1), 2);
        assert_eq!(count_at(2), 3);
    }

    #[test]
    fn test_private_only_module_stays_module_with_empty_lists() {
        let desc = ModuleDesc::new("app")
            .with_member(MemberDesc::Function(
                FunctionDesc::new("__secret__", "app").with_params(["arg"]),
            ))
            .with_member(MemberDesc::Variable(VariableDesc::new("_hidden", "str")));

        let result = Walker::new().walk(&desc);
        match result.root {
            Node::Module(module) => {
                assert!(module.functions.is_empty());
                assert!(module.variables.is_empty());
            }
            other => panic!("expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_object_members_always_excluded() {
        let desc = ClassDesc::new("Thing", "app")
            .with_member(FunctionDesc::new("__repr__", "app").with_params(["self"]))
            .with_member(FunctionDesc::new("__hash__", "app").with_params(["self"]));

        let class = Walker::new().with_access_level(2).walk_class(&desc);
        assert!(class.methods.is_empty());
        assert!(class.functions.is_empty());
    }

    #[test]
    fn test_fixture_class_reports_two_methods() {
        let class = Walker::new().with_access_level(2).walk_class(&fixture_class());
        assert_eq!(class.methods.len(), 2);
        assert!(class.functions.is_empty());
    }

    #[test]
    fn test_receiver_convention_buckets_static_functions() {
        let desc = ClassDesc::new("Util", "app")
            .with_member(FunctionDesc::new("bound", "app").with_params(["self", "x"]))
            .with_member(FunctionDesc::new("loose", "app").with_params(["x"]));

        let class = Walker::new().walk_class(&desc);
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "bound");
        assert_eq!(class.functions.len(), 1);
        assert_eq!(class.functions[0].name, "loose");
    }

    #[test]
    fn test_multiple_bases_stay_ordered() {
        let desc = ClassDesc::new("Child", "app")
            .with_base("Left")
            .with_base("Right");

        let class = Walker::new().walk_class(&desc);
        assert_eq!(class.parents, vec!["Left".to_string(), "Right".to_string()]);
    }

    #[test]
    fn test_opaque_signature_degrades_to_empty_params() {
        let func = Walker::new().walk_function(&FunctionDesc::new("builtin", "app").opaque());
        assert!(func.params.is_empty());
    }

    #[test]
    fn test_nested_packages() {
        let leaf = ModuleDesc::new("top.mid.leaf").with_member(MemberDesc::Function(
            FunctionDesc::new("run", "top.mid.leaf").with_params(["arg"]),
        ));
        let mid = ModuleDesc::new("top.mid").with_member(MemberDesc::Module(leaf));
        let top = ModuleDesc::new("top").with_member(MemberDesc::Module(mid));

        let result = Walker::new().walk(&top);
        match result.root {
            Node::Package(pkg) => {
                assert_eq!(pkg.subpackages.len(), 1);
                assert_eq!(pkg.subpackages[0].name, "top.mid");
                assert_eq!(pkg.subpackages[0].modules.len(), 1);
                assert_eq!(pkg.subpackages[0].modules[0].name, "top.mid.leaf");
            }
            other => panic!("expected package, got {:?}", other),
        }
    }
}
