//! Tree dumps: the html5lib test format and a serde JSON snapshot.

use std::fmt::Write as _;

use serde::Serialize;

use crate::{AttributesMap, Document, DomTree, Namespace, NodeId, NodeType, QuirksMode};

/// Owned, serializable view of a node and its subtree.
///
/// Key names follow the `--json` output of the CLI: `type`, `tagName`,
/// `attributes`, `content`, `children`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    /// The document root.
    Document {
        /// Document mode.
        #[serde(rename = "quirksMode")]
        quirks_mode: QuirksMode,
        /// Child nodes.
        children: Vec<NodeSnapshot>,
    },
    /// A DOCTYPE node.
    Doctype {
        /// DOCTYPE name.
        name: String,
        /// Public identifier.
        #[serde(rename = "publicId")]
        public_id: String,
        /// System identifier.
        #[serde(rename = "systemId")]
        system_id: String,
    },
    /// An element.
    Element {
        /// Local name.
        #[serde(rename = "tagName")]
        tag_name: String,
        /// Namespace.
        namespace: Namespace,
        /// Attributes in source order.
        attributes: AttributesMap,
        /// Child nodes.
        children: Vec<NodeSnapshot>,
    },
    /// A text node.
    Text {
        /// Character data.
        content: String,
    },
    /// A comment node.
    Comment {
        /// Comment data.
        content: String,
    },
}

impl NodeSnapshot {
    /// Snapshot the subtree rooted at `id`.
    #[must_use]
    pub fn capture(tree: &DomTree, id: NodeId, quirks_mode: QuirksMode) -> Self {
        let children = || {
            tree.children(id)
                .iter()
                .map(|&child| Self::capture(tree, child, quirks_mode))
                .collect()
        };
        match tree.get(id).map(|n| &n.node_type) {
            Some(NodeType::Document) | None => Self::Document {
                quirks_mode,
                children: children(),
            },
            Some(NodeType::Doctype(data)) => Self::Doctype {
                name: data.name.clone(),
                public_id: data.public_id.clone(),
                system_id: data.system_id.clone(),
            },
            Some(NodeType::Element(data)) => Self::Element {
                tag_name: data.tag_name.clone(),
                namespace: data.namespace,
                attributes: data.attrs.clone(),
                children: children(),
            },
            Some(NodeType::Text(text)) => Self::Text {
                content: text.clone(),
            },
            Some(NodeType::Comment(text)) => Self::Comment {
                content: text.clone(),
            },
        }
    }
}

impl Document {
    /// Serializable snapshot of the whole document.
    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::capture(&self.tree, NodeId::ROOT, self.quirks_mode)
    }

    /// Pretty-printed JSON of [`Document::snapshot`].
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// Render the tree in the html5lib tree-construction test format:
    ///
    /// ```text
    /// | <!DOCTYPE html>
    /// | <html>
    /// |   <head>
    /// |   <body>
    /// |     <p>
    /// |       class="x"
    /// |       "text"
    /// ```
    ///
    /// Attributes are sorted by name and indented one level below their
    /// element. Foreign elements carry an `svg ` or `math ` prefix. Template
    /// children are listed directly under the template.
    #[must_use]
    pub fn to_test_format(&self) -> String {
        let mut out = String::new();
        for &child in self.tree.children(NodeId::ROOT) {
            dump_node(&self.tree, child, 0, &mut out);
        }
        out
    }
}

fn dump_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    match &node.node_type {
        NodeType::Document => {}
        NodeType::Doctype(data) => {
            if data.public_id.is_empty() && data.system_id.is_empty() {
                let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", data.name);
            } else {
                let _ = writeln!(
                    out,
                    "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                    data.name, data.public_id, data.system_id
                );
            }
        }
        NodeType::Element(data) => {
            match data.namespace {
                Namespace::Html => {
                    let _ = writeln!(out, "| {indent}<{}>", data.tag_name);
                }
                foreign => {
                    let _ = writeln!(out, "| {indent}<{foreign} {}>", data.tag_name);
                }
            }
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort_by(|a, b| a.name.cmp(&b.name));
            for attr in attrs {
                let name = display_attribute_name(&attr.name, data.namespace);
                let _ = writeln!(out, "| {indent}  {name}=\"{}\"", attr.value);
            }
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "| {indent}\"{text}\"");
        }
        NodeType::Comment(text) => {
            let _ = writeln!(out, "| {indent}<!-- {text} -->");
        }
    }

    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

/// Namespaced attributes on foreign elements print as `xlink href`.
fn display_attribute_name(name: &str, namespace: Namespace) -> String {
    if namespace != Namespace::Html
        && let Some((prefix, local)) = name.split_once(':')
        && matches!(prefix, "xlink" | "xml" | "xmlns")
    {
        return format!("{prefix} {local}");
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, ElementData, ElementKind};

    #[test]
    fn test_format_sorts_attributes() {
        let mut doc = Document::new();
        let attrs: AttributesMap = [Attribute::new("id", "a"), Attribute::new("class", "b")]
            .into_iter()
            .collect();
        let div = doc
            .tree
            .alloc(NodeType::Element(ElementData::html(ElementKind::Div, "div", attrs)));
        doc.tree.append_child(NodeId::ROOT, div);
        let _ = doc.tree.insert_text(div, None, "hi");

        assert_eq!(
            doc.to_test_format(),
            "| <div>\n|   class=\"b\"\n|   id=\"a\"\n|   \"hi\"\n"
        );
    }
}
