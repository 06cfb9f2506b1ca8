//! The stack of open elements: scope queries, implied end tags and
//! insertion mode reset.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use marten_dom::{ElementData, ElementKind, Namespace, NodeId};

use super::core::{HTMLParser, InsertionMode};

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// The element types that stop a scope search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup` and
    /// `option`.
    Select,
}

impl Scope {
    /// Whether `element` terminates a search in this scope.
    pub(crate) fn is_boundary(self, element: &ElementData) -> bool {
        use ElementKind as K;
        match self {
            Self::Table => element.is_one_of(&[K::Html, K::Table, K::Template]),
            Self::Select => !element.is_one_of(&[K::Optgroup, K::Option]),
            Self::Default | Self::ListItem | Self::Button => {
                let default = match element.namespace {
                    Namespace::Html => matches!(
                        element.kind,
                        K::Applet
                            | K::Caption
                            | K::Html
                            | K::Table
                            | K::Td
                            | K::Th
                            | K::Marquee
                            | K::Object
                            | K::Template
                    ),
                    Namespace::MathMl => matches!(
                        element.kind,
                        K::Mi | K::Mo | K::Mn | K::Ms | K::Mtext | K::AnnotationXml
                    ),
                    Namespace::Svg => {
                        matches!(element.kind, K::ForeignObject | K::Desc | K::Title)
                    }
                };
                default
                    || match self {
                        Self::ListItem => element.is_one_of(&[K::Ol, K::Ul]),
                        Self::Button => element.is(K::Button),
                        _ => false,
                    }
            }
        }
    }
}

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[ElementKind] = &[
    ElementKind::Dd,
    ElementKind::Dt,
    ElementKind::Li,
    ElementKind::Optgroup,
    ElementKind::Option,
    ElementKind::P,
    ElementKind::Rb,
    ElementKind::Rp,
    ElementKind::Rt,
    ElementKind::Rtc,
];

/// "generate all implied end tags thoroughly" adds the table parts.
const THOROUGH_IMPLIED_END_TAGS: &[ElementKind] = &[
    ElementKind::Caption,
    ElementKind::Colgroup,
    ElementKind::Dd,
    ElementKind::Dt,
    ElementKind::Li,
    ElementKind::Optgroup,
    ElementKind::Option,
    ElementKind::P,
    ElementKind::Rb,
    ElementKind::Rp,
    ElementKind::Rt,
    ElementKind::Rtc,
    ElementKind::Tbody,
    ElementKind::Td,
    ElementKind::Tfoot,
    ElementKind::Th,
    ElementKind::Thead,
    ElementKind::Tr,
];

impl HTMLParser {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// Element data of the current node.
    pub(super) fn current_element(&self) -> Option<&ElementData> {
        self.current_node().and_then(|id| self.tree.as_element(id))
    }

    /// Whether the current node is the HTML element of `kind`.
    pub(super) fn current_node_is(&self, kind: ElementKind) -> bool {
        self.current_element().is_some_and(|element| element.is(kind))
    }

    /// Whether the current node is an HTML element of one of `kinds`.
    pub(super) fn current_node_is_one_of(&self, kinds: &[ElementKind]) -> bool {
        self.current_element()
            .is_some_and(|element| element.is_one_of(kinds))
    }

    /// Whether `id` is the HTML element of `kind`.
    pub(super) fn node_is(&self, id: NodeId, kind: ElementKind) -> bool {
        self.tree.as_element(id).is_some_and(|element| element.is(kind))
    }

    /// Index of the bottommost HTML element of `kind` on the stack.
    pub(super) fn position_in_stack(&self, kind: ElementKind) -> Option<usize> {
        self.stack_of_open_elements
            .iter()
            .rposition(|&id| self.node_is(id, kind))
    }

    /// Whether an HTML element of `kind` is anywhere on the stack.
    pub(super) fn stack_contains(&self, kind: ElementKind) -> bool {
        self.position_in_stack(kind).is_some()
    }

    /// Pop the current node.
    pub(super) fn pop_current_node(&mut self) {
        let _ = self.stack_of_open_elements.pop();
    }

    /// "Pop elements from the stack of open elements until an X element has
    /// been popped from the stack."
    pub(super) fn pop_until(&mut self, kind: ElementKind) {
        self.pop_until_one_of(&[kind]);
    }

    /// Pop until an HTML element of one of `kinds` has been popped.
    pub(super) fn pop_until_one_of(&mut self, kinds: &[ElementKind]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .tree
                .as_element(id)
                .is_some_and(|element| element.is_one_of(kinds))
            {
                break;
            }
        }
    }

    /// Remove `node` from the stack wherever it is.
    pub(super) fn remove_from_stack(&mut self, node: NodeId) {
        if let Some(index) = self.stack_of_open_elements.iter().rposition(|&id| id == node) {
            let _ = self.stack_of_open_elements.remove(index);
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// STEP 1: "Initialize node to be the current node (the bottommost node of
    ///          the stack)."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of open
    ///          elements and return to step 2."
    fn in_specific_scope(
        &self,
        scope: Scope,
        is_target: impl Fn(NodeId, &ElementData) -> bool,
    ) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            let Some(element) = self.tree.as_element(id) else {
                continue;
            };
            if is_target(id, element) {
                return true;
            }
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// Whether an HTML element of `kind` is in `scope`.
    pub(super) fn has_element_in(&self, scope: Scope, kind: ElementKind) -> bool {
        self.in_specific_scope(scope, |_, element| element.is(kind))
    }

    /// "has an element in scope"
    pub(super) fn has_element_in_scope(&self, kind: ElementKind) -> bool {
        self.has_element_in(Scope::Default, kind)
    }

    /// "has a p element in button scope"
    pub(super) fn has_element_in_button_scope(&self, kind: ElementKind) -> bool {
        self.has_element_in(Scope::Button, kind)
    }

    /// "has an element in table scope"
    pub(super) fn has_element_in_table_scope(&self, kind: ElementKind) -> bool {
        self.has_element_in(Scope::Table, kind)
    }

    /// "has an element in select scope"
    pub(super) fn has_element_in_select_scope(&self, kind: ElementKind) -> bool {
        self.has_element_in(Scope::Select, kind)
    }

    /// Whether this exact node is in the default scope.
    pub(super) fn has_node_in_scope(&self, node: NodeId) -> bool {
        self.in_specific_scope(Scope::Default, |id, _| id == node)
    }

    /// "has an h1, h2, h3, h4, h5, or h6 element in scope"
    pub(super) fn has_heading_in_scope(&self) -> bool {
        self.in_specific_scope(Scope::Default, |_, element| {
            element.namespace == Namespace::Html && element.kind.is_heading()
        })
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "While the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    ///
    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the above
    /// steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags(&mut self, except: Option<ElementKind>) {
        while let Some(element) = self.current_element()
            && element.namespace == Namespace::Html
            && IMPLIED_END_TAGS.contains(&element.kind)
            && Some(element.kind) != except
        {
            self.pop_current_node();
        }
    }

    /// "generate all implied end tags thoroughly"
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(THOROUGH_IMPLIED_END_TAGS) {
            self.pop_current_node();
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must run the following steps:"
    pub(super) fn close_p_element(&mut self) {
        // STEP 1: "Generate implied end tags, except for p elements."
        self.generate_implied_end_tags(Some(ElementKind::P));
        // STEP 2: "If the current node is not a p element, then this is a parse
        //          error."
        if !self.current_node_is(ElementKind::P) {
            self.parse_error("closing a p element that is not the current node");
        }
        // STEP 3: "Pop elements from the stack of open elements until a p
        //          element has been popped from the stack."
        self.pop_until(ElementKind::P);
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.has_element_in_button_scope(ElementKind::P) {
            self.close_p_element();
        }
    }

    fn clear_stack_back_to(&mut self, kinds: &[ElementKind]) {
        while !self.current_node_is_one_of(kinds) && self.stack_of_open_elements.len() > 1 {
            self.pop_current_node();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&[ElementKind::Table, ElementKind::Template, ElementKind::Html]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "While the current node is not a tbody, tfoot, thead, template, or html
    /// element, pop elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&[
            ElementKind::Tbody,
            ElementKind::Tfoot,
            ElementKind::Thead,
            ElementKind::Template,
            ElementKind::Html,
        ]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "While the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&[ElementKind::Tr, ElementKind::Template, ElementKind::Html]);
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self.current_node_is_one_of(&[ElementKind::Td, ElementKind::Th]) {
            self.parse_error("closing a table cell that is not the current node");
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a
        //          td element or a th element has been popped from the stack."
        self.pop_until_one_of(&[ElementKind::Td, ElementKind::Th]);
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.insertion_mode = InsertionMode::InRow;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        self.insertion_mode = self.appropriate_insertion_mode();
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        use ElementKind as K;

        // STEP 1-3: "Let last be false. Let node be the last node in the stack
        //            of open elements."
        for (index, &node) in self.stack_of_open_elements.iter().enumerate().rev() {
            // "If node is the first node in the stack of open elements, then
            // set last to true."
            let last = index == 0;
            let Some(element) = self
                .tree
                .as_element(node)
                .filter(|element| element.namespace == Namespace::Html)
            else {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            };

            match element.kind {
                // STEP 4: "If node is a select element, run these substeps:"
                K::Select => {
                    // "If last is true, jump to the step below labeled done."
                    if !last {
                        // "Let ancestor be node. Loop: If ancestor is the first
                        // node in the stack of open elements, jump to done. Let
                        // ancestor be the node before ancestor ... If ancestor
                        // is a template node, jump to done. If ancestor is a
                        // table node, switch the insertion mode to "in select
                        // in table" and return."
                        for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                            if self.node_is(ancestor, K::Template) {
                                break;
                            }
                            if self.node_is(ancestor, K::Table) {
                                return InsertionMode::InSelectInTable;
                            }
                        }
                    }
                    // "Done: Switch the insertion mode to "in select" and return."
                    return InsertionMode::InSelect;
                }
                // STEP 5
                K::Td | K::Th if !last => return InsertionMode::InCell,
                // STEP 6-11
                K::Tr => return InsertionMode::InRow,
                K::Tbody | K::Thead | K::Tfoot => return InsertionMode::InTableBody,
                K::Caption => return InsertionMode::InCaption,
                K::Colgroup => return InsertionMode::InColumnGroup,
                K::Table => return InsertionMode::InTable,
                // STEP 12: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                K::Template => {
                    return self
                        .template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InBody);
                }
                // STEP 13
                K::Head if !last => return InsertionMode::InHead,
                // STEP 14-15
                K::Body => return InsertionMode::InBody,
                K::Frameset => return InsertionMode::InFrameset,
                // STEP 16: "If node is an html element, run these substeps: If
                //           the head element pointer is null, switch the
                //           insertion mode to "before head" and return.
                //           Otherwise, switch the insertion mode to "after head"
                //           and return."
                K::Html => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                // STEP 17: "If last is true, then switch the insertion mode to
                //           "in body" and return."
                _ if last => return InsertionMode::InBody,
                // STEP 18-19: "Let node now be the node before node in the stack
                //              of open elements. Return to the step labeled loop."
                _ => {}
            }
        }
        InsertionMode::InBody
    }
}
