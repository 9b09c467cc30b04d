//! Resolve `@import` statements.
//!
//! LESS imports are replaced by the statements of the imported file. CSS
//! imports are left in the tree and rendered as `@import` rules.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::debug;

use super::{
    ast::{Import, Node},
    error::{Error, ErrorKind, Result},
    parser,
};

/// Inline imported files into a tree.
pub(crate) struct Importer<'p> {
    search_paths: &'p [PathBuf],
    /// Canonical paths of files already imported.
    imported: HashSet<PathBuf>,
    /// Canonical paths of files being imported.
    stack: Vec<PathBuf>,
}

impl<'p> Importer<'p> {
    pub(crate) fn new(search_paths: &'p [PathBuf]) -> Self {
        Self {
            search_paths,
            imported: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Resolve imports of the root file.
    pub(crate) fn expand_root(
        &mut self,
        nodes: Vec<Node>,
        filename: Option<&Path>,
    ) -> Result<Vec<Node>> {
        let current_dir = filename.and_then(Path::parent);

        if let Some(canonical) = filename.and_then(|path| path.canonicalize().ok()) {
            self.imported.insert(canonical.clone());
            self.stack.push(canonical);
        }

        self.expand(nodes, current_dir)
    }

    fn expand(&mut self, nodes: Vec<Node>, current_dir: Option<&Path>) -> Result<Vec<Node>> {
        let mut result = Vec::with_capacity(nodes.len());

        for node in nodes {
            match node {
                Node::Import(import) if !import.is_css() => {
                    result.extend(self.load(&import, current_dir)?);
                },
                Node::Ruleset(mut ruleset) => {
                    ruleset.body = self.expand(ruleset.body, current_dir)?;
                    result.push(Node::Ruleset(ruleset));
                },
                Node::AtRule(mut at_rule) => {
                    if let Some(body) = at_rule.body.take() {
                        at_rule.body = Some(self.expand(body, current_dir)?);
                    }
                    result.push(Node::AtRule(at_rule));
                },
                node => result.push(node),
            }
        }

        Ok(result)
    }

    fn load(&mut self, import: &Import, current_dir: Option<&Path>) -> Result<Vec<Node>> {
        let path = self.resolve(import, current_dir)?;
        let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());

        if self.stack.contains(&canonical) {
            return Err(Error::new(
                ErrorKind::File,
                format!("recursive import of '{}'", path.display()),
            )
            .at(&import.location));
        }

        if !self.imported.insert(canonical.clone()) && !import.options.multiple {
            debug!("Skipping {path:?}, already imported");
            return Ok(Vec::new());
        }

        debug!("Importing {path:?}");

        let content = std::fs::read_to_string(&path).map_err(|error| {
            Error::new(
                ErrorKind::File,
                format!("failed to read '{}': {error}", path.display()),
            )
            .at(&import.location)
        })?;

        let nodes = parser::parse(&content, Some(path.as_path()))?;

        self.stack.push(canonical);
        let result = self.expand(nodes, path.parent());
        self.stack.pop();

        result
    }

    /// Find the file of an import.
    ///
    /// The directory of the importing file is tried first, then each search
    /// path in order.
    fn resolve(&self, import: &Import, current_dir: Option<&Path>) -> Result<PathBuf> {
        let mut file = PathBuf::from(&import.path);
        if file.extension().is_none() {
            file.set_extension("less");
        }

        if file.is_absolute() {
            return if file.is_file() {
                Ok(file)
            } else {
                Err(not_found(import, &file, &[]))
            };
        }

        let candidates: Vec<PathBuf> = current_dir
            .into_iter()
            .chain(self.search_paths.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(&file))
            .collect();

        if let Some(found) = candidates.iter().find(|candidate| candidate.is_file()) {
            return Ok(found.clone());
        }

        if candidates.is_empty() && file.is_file() {
            return Ok(file);
        }

        Err(not_found(import, &file, &candidates))
    }
}

fn not_found(import: &Import, file: &Path, tried: &[PathBuf]) -> Error {
    let mut message = format!("'{}' wasn't found", file.display());
    if !tried.is_empty() {
        let tried = tried
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str(&format!(" (tried: {tried})"));
    }
    Error::new(ErrorKind::File, message).at(&import.location)
}
