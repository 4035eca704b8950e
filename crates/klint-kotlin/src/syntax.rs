//! Node-walking helpers for Kotlin rules.
//!
//! Node kinds follow `tree-sitter-kotlin-ng`: `package_header`, `import`,
//! `qualified_identifier`, `class_declaration`, `object_declaration`,
//! `function_declaration`, `function_value_parameters`, `parameter`.

use tree_sitter::Node;

/// Returns the source text covered by `node`.
#[must_use]
pub fn node_text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
    node.utf8_text(src.as_bytes()).unwrap_or("")
}

/// 1-indexed line and column of the node's first character.
///
/// Tree-sitter columns are byte offsets; the returned column counts
/// characters so it lines up with what an editor shows.
#[must_use]
pub fn position(node: &Node<'_>, src: &str) -> (usize, usize) {
    let point = node.start_position();
    let start = node.start_byte();
    let column = src
        .get(start.saturating_sub(point.column)..start)
        .map_or(point.column, |prefix| prefix.chars().count());
    (point.row + 1, column + 1)
}

/// Joins the identifier children of a `qualified_identifier` with dots.
#[must_use]
pub fn qualified_id(node: &Node<'_>, src: &str) -> String {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "identifier")
        .map(|child| node_text(&child, src))
        .collect::<Vec<_>>()
        .join(".")
}

/// First direct child of the given kind.
#[must_use]
pub fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Direct children of the given kind, in source order.
#[must_use]
pub fn children_of_kind<'t>(node: &Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == kind)
        .collect()
}

/// Visits `root` and its descendants in source order.
///
/// `visit` returns whether to descend into the node it was given.
pub fn walk<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !visit(node) {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

/// Every descendant of `root` (inclusive) whose kind is one of `kinds`.
#[must_use]
pub fn descendants_of_kind<'t>(root: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    walk(root, |node| {
        if kinds.contains(&node.kind()) {
            found.push(node);
        }
        true
    });
    found
}

/// The file's `package` header, if any.
#[must_use]
pub fn package_header<'t>(root: &Node<'t>) -> Option<Node<'t>> {
    child_of_kind(root, "package_header")
}

/// Top-level `import` nodes, in source order.
///
/// Some grammar versions wrap imports in an `import_list`; both layouts
/// are handled.
#[must_use]
pub fn imports<'t>(root: &Node<'t>) -> Vec<Node<'t>> {
    let mut found = children_of_kind(root, "import");
    for list in children_of_kind(root, "import_list") {
        found.extend(children_of_kind(&list, "import"));
    }
    found.sort_by_key(Node::start_byte);
    found
}

/// Name of a class, interface or object declaration.
#[must_use]
pub fn declaration_name<'a>(node: &Node<'_>, src: &'a str) -> Option<&'a str> {
    node.child_by_field_name("name")
        .or_else(|| {
            ["identifier", "type_identifier", "simple_identifier"]
                .iter()
                .find_map(|kind| child_of_kind(node, kind))
        })
        .map(|name| node_text(&name, src))
}
