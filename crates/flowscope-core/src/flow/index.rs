//! In-memory view of one project scan used by the tracer

use std::collections::HashMap;

use tracing::warn;

use crate::scanner::Scanner;
use crate::structure::{CodeStructure, FunctionDecl, StructDecl, StructureExtractor};

/// One analyzed source file
#[derive(Debug, Clone)]
pub struct IndexedFile {
    pub rel_path: String,
    pub content: String,
    pub structure: CodeStructure,
}

/// A function together with the file that declares it
#[derive(Debug, Clone, Copy)]
pub struct FunctionRef<'a> {
    pub file: &'a IndexedFile,
    pub decl: &'a FunctionDecl,
}

impl FunctionRef<'_> {
    /// Body lines with their 1-based numbers. A one-line body yields the
    /// text after its opening brace.
    #[must_use]
    pub fn body_lines(&self) -> Vec<(u32, &str)> {
        let lines: Vec<&str> = self.file.content.lines().collect();
        let start = self.decl.line as usize;
        let end = (self.decl.end_line as usize).min(lines.len());

        if start == end {
            let header = lines.get(start.saturating_sub(1)).copied().unwrap_or_default();
            return header
                .find('{')
                .map(|open| vec![(self.decl.line, &header[open + 1..])])
                .unwrap_or_default();
        }

        (start + 1..=end)
            .filter_map(|n| lines.get(n - 1).map(|l| (u32::try_from(n).unwrap_or(u32::MAX), *l)))
            .collect()
    }

    /// Receiver type name of a method
    #[must_use]
    pub fn receiver_type(&self) -> Option<&str> {
        self.decl.receiver.as_ref().map(|r| r.type_name.as_str())
    }

    /// Whether both refer to the same declaration
    #[must_use]
    pub fn is_same(&self, other: FunctionRef<'_>) -> bool {
        std::ptr::eq(self.decl, other.decl)
    }

    /// Whole body as one string
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body_lines()
            .into_iter()
            .map(|(_, l)| l)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Every readable project file with lookup maps by declaration name
#[derive(Debug, Default)]
pub struct ProjectIndex {
    files: Vec<IndexedFile>,
    functions: HashMap<String, Vec<(usize, usize)>>,
    structs: HashMap<String, (usize, usize)>,
}

impl ProjectIndex {
    /// Read and extract every file the scanner yields.
    ///
    /// Unreadable files are logged and left out.
    #[must_use]
    pub fn build(scanner: &Scanner, extractor: &StructureExtractor) -> Self {
        let files = scanner
            .scan()
            .filter_map(|file| match file.read() {
                Ok(content) => {
                    let structure = extractor.extract(&content, &file.rel_path);
                    Some(IndexedFile {
                        rel_path: file.rel_path,
                        content,
                        structure,
                    })
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file.rel_path, e);
                    None
                }
            })
            .collect();
        Self::from_files(files)
    }

    /// Index already loaded files
    #[must_use]
    pub fn from_files(files: Vec<IndexedFile>) -> Self {
        let mut functions: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        let mut structs = HashMap::new();
        for (fi, file) in files.iter().enumerate() {
            for (di, decl) in file.structure.functions.iter().enumerate() {
                functions.entry(decl.name.clone()).or_default().push((fi, di));
            }
            for (si, decl) in file.structure.structs.iter().enumerate() {
                structs.entry(decl.name.clone()).or_insert((fi, si));
            }
        }
        Self {
            files,
            functions,
            structs,
        }
    }

    #[must_use]
    pub fn file(&self, rel_path: &str) -> Option<&IndexedFile> {
        self.files.iter().find(|f| f.rel_path == rel_path)
    }

    fn function_ref(&self, (fi, di): (usize, usize)) -> Option<FunctionRef<'_>> {
        let file = self.files.get(fi)?;
        let decl = file.structure.functions.get(di)?;
        Some(FunctionRef { file, decl })
    }

    /// All declarations named `name`, in scan order
    #[must_use]
    pub fn functions_named(&self, name: &str) -> Vec<FunctionRef<'_>> {
        self.functions
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|loc| self.function_ref(*loc))
            .collect()
    }

    /// Pick the declaration a call inside `caller` refers to.
    ///
    /// The caller itself is only a candidate for an unqualified call. A
    /// call on the caller's own receiver (`s.helper()`) stays on that
    /// receiver type. Any other qualifier is matched against package names,
    /// then against receiver types (`svc` fits `UserService`), and only then
    /// falls back to a declaration on a different receiver.
    #[must_use]
    pub fn find_callee(
        &self,
        name: &str,
        qualifier: Option<&str>,
        caller: FunctionRef<'_>,
    ) -> Option<FunctionRef<'_>> {
        let Some(q) = qualifier else {
            return self.find_unqualified(name, caller);
        };

        let caller_receiver = caller.receiver_type();
        let candidates: Vec<FunctionRef<'_>> = self
            .functions_named(name)
            .into_iter()
            .filter(|f| !f.is_same(caller))
            .collect();

        let on_own_receiver =
            caller.decl.receiver.as_ref().and_then(|r| r.name.as_deref()) == Some(q);
        if on_own_receiver {
            if let Some(found) = candidates
                .iter()
                .filter(|f| f.receiver_type() == caller_receiver)
                .min_by_key(|f| f.file.rel_path != caller.file.rel_path)
            {
                return Some(*found);
            }
        }

        candidates
            .iter()
            .find(|f| f.file.structure.package == q)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|f| f.receiver_type().is_some_and(|t| abbreviates(q, t)))
            })
            .or_else(|| {
                candidates
                    .iter()
                    .filter(|f| f.receiver_type() != caller_receiver)
                    .min_by_key(|f| f.file.rel_path == caller.file.rel_path)
            })
            .or_else(|| candidates.first())
            .copied()
    }

    /// Unqualified call: the caller's file, then its package, then anywhere
    fn find_unqualified(&self, name: &str, caller: FunctionRef<'_>) -> Option<FunctionRef<'_>> {
        let candidates = self.functions_named(name);
        candidates
            .iter()
            .find(|f| f.file.rel_path == caller.file.rel_path)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|f| f.file.structure.package == caller.file.structure.package)
            })
            .or_else(|| candidates.first())
            .copied()
    }

    /// Declaration a route's handler reference names: one in the route's
    /// file, then one in the qualifier's package, then the first with an
    /// HTTP handler signature, then the first found
    #[must_use]
    pub fn find_handler(
        &self,
        name: &str,
        qualifier: Option<&str>,
        route_file: &str,
    ) -> Option<FunctionRef<'_>> {
        let candidates = self.functions_named(name);
        candidates
            .iter()
            .find(|f| f.file.rel_path == route_file)
            .or_else(|| {
                qualifier.and_then(|q| candidates.iter().find(|f| f.file.structure.package == q))
            })
            .or_else(|| candidates.iter().find(|f| looks_like_handler(f)))
            .or_else(|| candidates.first())
            .copied()
    }

    /// `ServeHTTP` method of a handler type
    #[must_use]
    pub fn serve_http_of(&self, type_name: &str) -> Option<FunctionRef<'_>> {
        self.functions_named("ServeHTTP").into_iter().find(|f| {
            f.decl
                .receiver
                .as_ref()
                .is_some_and(|r| r.type_name == type_name)
        })
    }

    #[must_use]
    pub fn struct_named(&self, name: &str) -> Option<&StructDecl> {
        let (fi, si) = *self.structs.get(name)?;
        self.files.get(fi)?.structure.structs.get(si)
    }

    /// Whether `package` is declared by some project file
    #[must_use]
    pub fn has_package(&self, package: &str) -> bool {
        self.files.iter().any(|f| f.structure.package == package)
    }
}

/// Whether `qualifier` reads as a short form of `type_name`, taking its
/// letters in order: `store` fits `UserStore`, `svc` fits `UserService`
fn abbreviates(qualifier: &str, type_name: &str) -> bool {
    if qualifier.len() < 2 {
        return false;
    }
    let type_name = type_name.to_ascii_lowercase();
    let mut remaining = type_name.chars();
    qualifier
        .to_ascii_lowercase()
        .chars()
        .all(|c| remaining.any(|t| t == c))
}

/// Parameter types that mark an HTTP handler signature
const HANDLER_PARAM_MARKERS: &[&str] =
    &["http.ResponseWriter", "gin.Context", "echo.Context", "fiber.Ctx"];

fn looks_like_handler(function: &FunctionRef<'_>) -> bool {
    function
        .decl
        .parameters
        .iter()
        .any(|p| HANDLER_PARAM_MARKERS.iter().any(|m| p.type_name.contains(m)))
}
