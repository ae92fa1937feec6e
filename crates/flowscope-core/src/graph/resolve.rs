//! Two-level call target resolution

use std::collections::HashMap;

use super::model::CallGraph;

/// Location of a definition: file and line
type Target = (String, u32);

/// Lookup tables over every definition in the graph.
///
/// Both maps are filled in definition order and later entries overwrite
/// earlier ones, so a duplicated bare name resolves to whichever definition
/// was seen last.
#[derive(Debug, Default)]
pub struct TargetIndex {
    qualified: HashMap<String, Target>,
    bare: HashMap<String, Target>,
}

impl TargetIndex {
    #[must_use]
    pub fn build(graph: &CallGraph) -> Self {
        let mut index = Self::default();
        for f in &graph.functions {
            let target = (f.file_path.clone(), f.line);
            index.qualified.insert(f.qualified_name(), target.clone());
            index.bare.insert(f.name.clone(), target);
        }
        index
    }

    /// Package-qualified lookup first, then bare name.
    ///
    /// A qualifier is tried as a package name; an unqualified call is
    /// looked up in the caller's own package.
    #[must_use]
    pub fn lookup(&self, qualifier: Option<&str>, package: &str, name: &str) -> Option<&Target> {
        let key = format!("{}.{name}", qualifier.unwrap_or(package));
        self.qualified.get(&key).or_else(|| self.bare.get(name))
    }
}

/// Patch every edge of `graph` with its resolved target, if any
pub fn resolve_call_targets(graph: &mut CallGraph) {
    let index = TargetIndex::build(graph);
    for call in &mut graph.calls {
        if let Some((file, line)) = index.lookup(call.qualifier.as_deref(), &call.package, &call.callee)
        {
            call.target_file = Some(file.clone());
            call.target_line = Some(*line);
        }
    }
}
