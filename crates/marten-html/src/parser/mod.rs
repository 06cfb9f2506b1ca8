//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

/// Parser state, the dispatcher and node insertion.
pub mod core;
/// SVG and MathML content.
pub mod foreign_content;
/// The list of active formatting elements and the adoption agency algorithm.
mod formatting;
/// One handler per insertion mode.
mod modes;
/// DOCTYPE-based quirks mode classification.
pub mod quirks;
/// The stack of open elements and its scope queries.
mod stack;

pub use self::core::{HTMLParser, InsertionMode, Outcome, ParseOutput};
pub use formatting::FormattingEntry;
pub use quirks::classify_doctype;

#[cfg(test)]
mod tests {
    use marten_dom::{ElementKind, NodeId};
    use quickcheck_macros::quickcheck;

    use super::stack::Scope;
    use super::{HTMLParser, InsertionMode};
    use crate::ParseOptions;
    use crate::tokenizer::{HTMLTokenizer, tokenize};

    fn new_parser(html: &str) -> HTMLParser {
        HTMLParser::new(HTMLTokenizer::from_text(html), &ParseOptions::default())
    }

    /// Run every token except the final end-of-file, so the stack is still
    /// populated.
    fn parser_before_eof(html: &str) -> HTMLParser {
        let mut parser = new_parser(html);
        let steps = tokenize(html).len().saturating_sub(1);
        for _ in 0..steps {
            let _ = parser.step();
        }
        parser
    }

    fn stack_is_ancestor_chain(parser: &HTMLParser) -> bool {
        let Some(&current) = parser.stack_of_open_elements.last() else {
            return true;
        };
        let mut chain: Vec<NodeId> = parser
            .tree
            .ancestors(current)
            .filter(|&id| id != NodeId::ROOT)
            .collect();
        chain.reverse();
        chain.push(current);
        chain == parser.stack_of_open_elements
    }

    #[test]
    fn test_scope_stops_at_table_cell() {
        let parser = parser_before_eof("<p><table><tr><td><span>");
        assert_eq!(parser.insertion_mode(), InsertionMode::InCell);
        assert!(parser.has_element_in_scope(ElementKind::Span));
        assert!(!parser.has_element_in_scope(ElementKind::P));
        assert!(parser.has_element_in_table_scope(ElementKind::Td));
        assert!(parser.has_element_in_table_scope(ElementKind::Table));
    }

    #[test]
    fn test_button_and_list_item_scope() {
        let parser = parser_before_eof("<ul><li><button><p>");
        assert!(parser.has_element_in_button_scope(ElementKind::P));
        assert!(!parser.has_element_in_button_scope(ElementKind::Li));
        assert!(parser.has_element_in(Scope::ListItem, ElementKind::Li));
        assert!(parser.has_element_in(Scope::ListItem, ElementKind::Ul));
    }

    #[test]
    fn test_select_inside_table_cell() {
        let parser = parser_before_eof("<table><tr><td><select>");
        assert_eq!(parser.insertion_mode(), InsertionMode::InSelectInTable);
        assert!(parser.has_element_in_select_scope(ElementKind::Select));
    }

    #[test]
    fn test_formatting_marker_for_cells() {
        let parser = parser_before_eof("<b><table><tr><td>");
        assert_eq!(parser.active_formatting_elements.len(), 2);
        assert_eq!(
            parser.active_formatting_elements.last(),
            Some(&super::FormattingEntry::Marker)
        );
    }

    #[test]
    fn test_insertion_mode_names() {
        assert_eq!(InsertionMode::InTableText.to_string(), "in-table-text");
        assert_eq!(InsertionMode::AfterAfterBody.to_string(), "after-after-body");
    }

    #[test]
    fn test_stack_tracks_nesting() {
        let parser = parser_before_eof("<div><section><p>text");
        assert!(stack_is_ancestor_chain(&parser));
        assert_eq!(parser.stack_of_open_elements.len(), 5);
    }

    const WELL_BEHAVED_TAGS: &[&str] = &[
        "div", "span", "p", "section", "ul", "li", "h1", "blockquote", "dl", "dd",
    ];

    /// Without formatting elements or tables nothing is misnested, so the
    /// stack of open elements is exactly the ancestor chain of the current
    /// node after every token.
    #[quickcheck]
    fn stack_mirrors_ancestor_chain(ops: Vec<(u8, bool)>) -> bool {
        let html: String = ops
            .iter()
            .map(|&(tag, open)| {
                let name = WELL_BEHAVED_TAGS[usize::from(tag) % WELL_BEHAVED_TAGS.len()];
                if open {
                    format!("<{name}>x")
                } else {
                    format!("</{name}>")
                }
            })
            .collect();

        let mut parser = new_parser(&html);
        while parser.step() {
            if !stack_is_ancestor_chain(&parser) {
                return false;
            }
        }
        true
    }
}
