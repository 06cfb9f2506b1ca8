//! The value a parse produces.

use serde::Serialize;
use strum_macros::Display;

use crate::{DoctypeData, DomTree, NodeId, NodeType};

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated ... mode (\"no-quirks\", \"quirks\", or
/// \"limited-quirks\")."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum QuirksMode {
    /// "no-quirks"
    #[default]
    NoQuirks,
    /// "limited-quirks"
    LimitedQuirks,
    /// "quirks"
    Quirks,
}

/// A parsed document: the arena tree plus document-level state.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The node arena. `NodeId::ROOT` is the Document node.
    pub tree: DomTree,
    /// The DOCTYPE node appended to the document, if the input had one in
    /// the initial insertion mode.
    pub doctype: Option<NodeId>,
    /// The document's mode, decided by the DOCTYPE (or its absence).
    pub quirks_mode: QuirksMode,
}

impl Document {
    /// An empty document in no-quirks mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The DOCTYPE's name, public ID and system ID.
    #[must_use]
    pub fn doctype_data(&self) -> Option<&DoctypeData> {
        self.doctype
            .and_then(|id| self.tree.get(id))
            .and_then(|node| match &node.node_type {
                NodeType::Doctype(data) => Some(data),
                _ => None,
            })
    }

    /// The `<html>` element.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.document_element()
    }

    /// The `<body>` (or `<frameset>`) element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.tree.body()
    }
}
