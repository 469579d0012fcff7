//! Import extraction from Python source.
//!
//! The source is parsed with the tree-sitter Python grammar and every import
//! statement in the tree is collected, including ones nested in functions or
//! conditionals:
//!
//! - `import a.b, c as d` contributes `a.b` and `c`
//! - `from m import x, y` contributes only `m.x`
//! - `from . import x` contributes `x`, `from .m import x` contributes `m.x`
//! - `from m import *` contributes `m.*`
//!
//! Only the first name of a from-import is kept; the rest are dropped.

use std::collections::BTreeSet;

use tree_sitter::{Node, Parser};

use cleandash_core::ParseError;

/// Something that can list the modules a source text imports.
pub trait ImportExtractor {
    /// Collect the imported module names of `source`.
    ///
    /// Fails with [`ParseError`] when the text is not valid source.
    fn extract_imports(&self, source: &str) -> Result<BTreeSet<String>, ParseError>;
}

/// [`ImportExtractor`] for Python files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonImportExtractor;

impl PythonImportExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl ImportExtractor for PythonImportExtractor {
    fn extract_imports(&self, source: &str) -> Result<BTreeSet<String>, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::new(1, 1, format!("python grammar unavailable: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(1, 1, "parser produced no syntax tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(first_error(root));
        }
        if let Some(err) = legacy_statement(root) {
            return Err(err);
        }

        let mut imports = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => collect_plain_import(node, source, &mut imports),
                "import_from_statement" | "future_import_statement" => {
                    if let Some(entry) = from_import_entry(node, source) {
                        imports.insert(entry);
                    }
                }
                _ => {
                    let mut cursor = node.walk();
                    stack.extend(node.named_children(&mut cursor));
                }
            }
        }

        Ok(imports)
    }
}

/// `import a.b, c as d`: every listed module.
fn collect_plain_import(node: Node<'_>, source: &str, imports: &mut BTreeSet<String>) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(module) = imported_name(name, source) {
            imports.insert(module);
        }
    }
}

/// `from m import x, ...`: a single `m.x` entry built from the first name.
fn from_import_entry(node: Node<'_>, source: &str) -> Option<String> {
    let module = if node.kind() == "future_import_statement" {
        Some("__future__".to_string())
    } else {
        node.child_by_field_name("module_name")
            .and_then(|m| module_name(m, source))
    };

    let mut cursor = node.walk();
    let first = node
        .children_by_field_name("name", &mut cursor)
        .next()
        .and_then(|n| imported_name(n, source))
        .or_else(|| has_wildcard(node).then(|| "*".to_string()))?;

    Some(match module {
        Some(module) => format!("{module}.{first}"),
        None => first,
    })
}

/// The module part of a from-import. Relative prefixes are dropped, and a
/// bare `from . import` has no module at all.
fn module_name(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "dotted_name" => Some(dotted_text(node, source)),
        "relative_import" => {
            let mut cursor = node.walk();
            let dotted = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "dotted_name");
            dotted.map(|d| dotted_text(d, source))
        }
        _ => None,
    }
}

/// The imported (not the alias) name of a `dotted_name` or `aliased_import`.
fn imported_name(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "dotted_name" => Some(dotted_text(node, source)),
        "aliased_import" => node
            .child_by_field_name("name")
            .map(|n| dotted_text(n, source)),
        _ => None,
    }
}

/// Join the identifiers of a dotted name, ignoring any whitespace between
/// the dots.
fn dotted_text(node: Node<'_>, source: &str) -> String {
    if node.kind() != "dotted_name" {
        return node_text(node, source).to_string();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|part| node_text(part, source))
        .collect::<Vec<_>>()
        .join(".")
}

fn has_wildcard(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| c.kind() == "wildcard_import")
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// The grammar still accepts Python 2 `print` and `exec` statements; they
/// are syntax errors in Python 3.
fn legacy_statement(root: Node<'_>) -> Option<ParseError> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            let pos = node.start_position();
            let keyword = node.kind().trim_end_matches("_statement");
            return Some(ParseError::new(
                pos.row + 1,
                pos.column + 1,
                format!("`{keyword}` statement is not valid Python 3"),
            ));
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Locate the first error or missing node in source order.
fn first_error(root: Node<'_>) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                "invalid syntax".to_string()
            };
            return ParseError::new(pos.row + 1, pos.column + 1, message);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    ParseError::new(1, 1, "invalid syntax")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<String> {
        PythonImportExtractor::new()
            .extract_imports(source)
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn plain_imports() {
        assert_eq!(extract("import os\nimport sys, json\n"), vec!["json", "os", "sys"]);
    }

    #[test]
    fn dotted_and_aliased_imports_use_the_module_name() {
        assert_eq!(
            extract("import os.path\nimport numpy as np\n"),
            vec!["numpy", "os.path"]
        );
    }

    #[test]
    fn from_import_with_alias() {
        assert_eq!(extract("from collections import OrderedDict as OD\n"), vec![
            "collections.OrderedDict"
        ]);
    }

    #[test]
    fn relative_imports() {
        assert_eq!(extract("from . import sibling\n"), vec!["sibling"]);
        assert_eq!(extract("from ..pkg.mod import thing\n"), vec!["pkg.mod.thing"]);
    }

    #[test]
    fn wildcard_import() {
        assert_eq!(extract("from os.path import *\n"), vec!["os.path.*"]);
    }

    #[test]
    fn future_import() {
        assert_eq!(
            extract("from __future__ import annotations, division\n"),
            vec!["__future__.annotations"]
        );
    }

    #[test]
    fn parenthesized_from_import_keeps_first_name() {
        let source = "from pkg import (\n    first,\n    second,\n)\n";
        assert_eq!(extract(source), vec!["pkg.first"]);
    }

    #[test]
    fn nested_imports_are_found() {
        let source = "def load():\n    import json\n    if True:\n        from os import path\n    return json\n";
        assert_eq!(extract(source), vec!["json", "os.path"]);
    }

    #[test]
    fn imports_in_strings_are_ignored() {
        let source = "\"\"\"\nimport not_real\n\"\"\"\nx = 'from fake import thing'\n";
        assert!(extract(source).is_empty());
    }

    #[test]
    fn empty_source() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = PythonImportExtractor::new()
            .extract_imports("import os\ndef broken(:\n    pass\n")
            .unwrap_err();
        assert!(err.line >= 1);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn python2_statements_are_rejected() {
        let err = PythonImportExtractor::new()
            .extract_imports("import os\nprint \"hello\"\nexec \"x = 1\"\n")
            .unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("print"));

        let err = PythonImportExtractor::new()
            .extract_imports("import os\nexec \"x = 1\"\n")
            .unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("exec"));
    }

    #[test]
    fn print_function_is_accepted() {
        assert_eq!(extract("import os\nprint(\"hello\")\n"), vec!["os"]);
    }
}
