//! The list of active formatting elements and the adoption agency algorithm.
//!
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)

use marten_dom::{Namespace, NodeId};

use super::core::HTMLParser;
use crate::tokenizer::Token;

/// "The adoption agency algorithm" gives up after this many outer iterations.
const ADOPTION_AGENCY_OUTER_LIMIT: usize = 8;

/// Nodes between the formatting element and the furthest block that are seen
/// after this many inner iterations are dropped from the list.
const ADOPTION_AGENCY_INNER_LIMIT: usize = 3;

/// "If there are already three elements in the list of active formatting
/// elements after the last marker, if any, ... that have the same tag name,
/// namespace, and attributes as element, then remove the earliest such element
/// from the list of active formatting elements."
const NOAHS_ARK_LIMIT: usize = 3;

/// An entry in the list of active formatting elements.
///
/// Elements are referenced by `NodeId`, the same identity the stack of open
/// elements uses, so "is in the list" and "is on the stack" compare nodes,
/// not tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingEntry {
    /// A formatting element (a, b, big, code, em, font, i, nobr, s, small,
    /// strike, strong, tt, u).
    Element(NodeId),
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element." Pushed when entering applet, object,
    /// marquee, template, td, th and caption.
    Marker,
}

impl FormattingEntry {
    /// The element of an element entry.
    #[must_use]
    pub const fn node(self) -> Option<NodeId> {
        match self {
            Self::Element(id) => Some(id),
            Self::Marker => None,
        }
    }
}

impl HTMLParser {
    /// Index of `node` in the list of active formatting elements.
    pub(super) fn formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .rposition(|&entry| entry == FormattingEntry::Element(node))
    }

    /// Remove `node` from the list of active formatting elements, if present.
    pub(super) fn remove_from_formatting_list(&mut self, node: NodeId) {
        if let Some(index) = self.formatting_index_of(node) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    /// "the last element in the list of active formatting elements that is
    /// between the end of the list and the last marker in the list, if any,
    /// or the start of the list otherwise, and has the tag name `name`"
    pub(super) fn formatting_element_after_last_marker(&self, name: &str) -> Option<(usize, NodeId)> {
        self.active_formatting_elements
            .iter()
            .enumerate()
            .rev()
            .map_while(|(index, entry)| entry.node().map(|id| (index, id)))
            .find(|&(_, id)| {
                self.tree
                    .as_element(id)
                    .is_some_and(|element| element.namespace == Namespace::Html && element.tag_name == name)
            })
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn push_formatting_marker(&mut self) {
        self.active_formatting_elements.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_active_formatting_element(&mut self, node: NodeId) {
        let Some(element) = self.tree.as_element(node) else {
            return;
        };

        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list of active
        //          formatting elements."
        let after_marker = self
            .active_formatting_elements
            .iter()
            .rposition(|&entry| entry == FormattingEntry::Marker)
            .map_or(0, |index| index + 1);
        let matching: Vec<usize> = (after_marker..self.active_formatting_elements.len())
            .filter(|&index| {
                self.active_formatting_elements[index]
                    .node()
                    .and_then(|id| self.tree.as_element(id))
                    .is_some_and(|other| {
                        other.tag_name == element.tag_name
                            && other.namespace == element.namespace
                            && other.attrs.same_set(&element.attrs)
                    })
            })
            .collect();
        if matching.len() >= NOAHS_ARK_LIMIT {
            let _ = self.active_formatting_elements.remove(matching[0]);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(FormattingEntry::Element(node));
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "Remove entries until a marker has been removed."
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if entry == FormattingEntry::Marker {
                break;
            }
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there
        //          is nothing to reconstruct; stop this algorithm."
        let Some(FormattingEntry::Element(last)) = self.active_formatting_elements.last().copied()
        else {
            return;
        };
        if self.stack_of_open_elements.contains(&last) {
            return;
        }

        // STEP 3-6: "Rewind: If there are no entries before entry in the list
        //            of active formatting elements, then jump to the step
        //            labeled create. Let entry be the entry one earlier than
        //            entry ... If entry is neither a marker nor an element that
        //            is also in the stack of open elements, go to the step
        //            labeled rewind."
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 {
            let earlier = self.active_formatting_elements[index - 1];
            let stop = match earlier {
                FormattingEntry::Marker => true,
                FormattingEntry::Element(id) => self.stack_of_open_elements.contains(&id),
            };
            if stop {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: "Create: Insert an HTML element for the token for which
        //             the element entry was created, to obtain new element.
        //             Replace the entry for entry in the list with an entry for
        //             new element. If the entry for new element in the list of
        //             active formatting elements is not the last entry in the
        //             list, return to the step labeled advance."
        for position in index..self.active_formatting_elements.len() {
            let FormattingEntry::Element(entry) = self.active_formatting_elements[position] else {
                continue;
            };
            let Some(clone) = self.tree.clone_element(entry) else {
                continue;
            };
            let location = self.appropriate_place_for_inserting(None);
            self.insert_node_at(location, clone);
            self.stack_of_open_elements.push(clone);
            self.active_formatting_elements[position] = FormattingEntry::Element(clone);
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Returns `false` when the caller must "instead act as described in the
    /// 'any other end tag' entry".
    pub(super) fn run_adoption_agency(&mut self, token: &Token) -> bool {
        // STEP 1: "Let subject be token's tag name."
        let Some(subject) = token.tag_name() else {
            return true;
        };

        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.tree.as_element(current).is_some_and(|element| {
                element.namespace == Namespace::Html && element.tag_name == subject
            })
            && self.formatting_index_of(current).is_none()
        {
            self.pop_current_node();
            return true;
        }

        // STEP 3-4: "Let outer loop counter be 0. While true: If outer loop
        //            counter is greater than or equal to 8, then return.
        //            Increment outer loop counter by 1."
        for _ in 0..ADOPTION_AGENCY_OUTER_LIMIT {
            // STEP 4.3: "Let formatting element be the last element in the list
            //            of active formatting elements that is between the end
            //            of the list and the last marker in the list, if any, or
            //            the start of the list otherwise, and has the tag name
            //            subject. If there is no such element, then return and
            //            instead act as described in the "any other end tag"
            //            entry above."
            let Some((formatting_index, formatting_element)) =
                self.formatting_element_after_last_marker(subject)
            else {
                return false;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the element
            //            from the list, and return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element)
            else {
                self.parse_error(format!("formatting element <{subject}> is no longer open"));
                let _ = self.active_formatting_elements.remove(formatting_index);
                return true;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.has_node_in_scope(formatting_element) {
                self.parse_error(format!("formatting element <{subject}> is not in scope"));
                return true;
            }

            // STEP 4.6: "If formatting element is not the current node, this is
            //            a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error(format!("misnested </{subject}>"));
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //            open elements that is lower in the stack than formatting
            //            element, and is an element in the special category."
            let furthest_block_index = self.stack_of_open_elements[formatting_stack_index + 1..]
                .iter()
                .position(|&id| self.tree.as_element(id).is_some_and(|e| e.is_special()))
                .map(|offset| formatting_stack_index + 1 + offset);

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element from
            //            the list of active formatting elements, and finally
            //            return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.stack_of_open_elements.truncate(formatting_stack_index);
                let _ = self.active_formatting_elements.remove(formatting_index);
                return true;
            };
            let furthest_block = self.stack_of_open_elements[furthest_block_index];

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let common_ancestor = formatting_stack_index
                .checked_sub(1)
                .map_or(NodeId::ROOT, |index| self.stack_of_open_elements[index]);

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let mut bookmark = formatting_index;

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // STEP 4.12-13: "Let inner loop counter be 0. While true:"
            let mut inner_loop_counter = 0;
            loop {
                // STEP 4.13.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //               in the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // STEP 4.13.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node
                //               is in the list of active formatting elements,
                //               then remove node from the list of active
                //               formatting elements."
                let mut node_formatting_index = self.formatting_index_of(node);
                if inner_loop_counter > ADOPTION_AGENCY_INNER_LIMIT
                    && let Some(index) = node_formatting_index.take()
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of open
                //               elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created ... Replace the entry
                //               for node in the list of active formatting elements
                //               with an entry for the new element, replace the
                //               entry for node in the stack of open elements with
                //               an entry for the new element, and let node be the
                //               new element."
                let Some(clone) = self.tree.clone_element(node) else {
                    break;
                };
                self.active_formatting_elements[node_formatting_index] =
                    FormattingEntry::Element(clone);
                self.stack_of_open_elements[node_index] = clone;

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block {
                    bookmark = node_formatting_index + 1;
                }

                // STEP 4.13.8: "Append last node to node."
                self.tree.append_child(clone, last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = clone;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //             previous step at the appropriate place for inserting a
            //             node, but using common ancestor as the override target."
            let location = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_node_at(location, last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with common
            //             ancestor as the intended parent."
            let Some(new_element) = self.tree.clone_element(formatting_element) else {
                return true;
            };

            // STEP 4.16: "Take all of the child nodes of furthest block and
            //             append them to the element created in the last step."
            self.tree.move_children(furthest_block, new_element);

            // STEP 4.17: "Append that new element to furthest block."
            self.tree.append_child(furthest_block, new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into the
            //             list of active formatting elements at the position of
            //             the aforementioned bookmark."
            if let Some(index) = self.formatting_index_of(formatting_element) {
                let _ = self.active_formatting_elements.remove(index);
                if index < bookmark {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements
                .insert(bookmark, FormattingEntry::Element(new_element));

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of furthest
            //             block in that stack."
            self.remove_from_stack(formatting_element);
            let below_furthest_block = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
                .map_or(self.stack_of_open_elements.len(), |index| index + 1);
            self.stack_of_open_elements
                .insert(below_furthest_block, new_element);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use marten_dom::{ElementKind, NodeId};

    use super::FormattingEntry;
    use crate::{ParseOptions, parse_str};

    #[test]
    fn marker_has_no_node() {
        assert_eq!(FormattingEntry::Marker.node(), None);
        assert_eq!(FormattingEntry::Element(NodeId(3)).node(), Some(NodeId(3)));
    }

    #[test]
    fn noahs_ark_keeps_three_identical_entries() {
        let output = parse_str("<b><b><b><b><b>x", &ParseOptions::default());
        let tree = &output.document.tree;
        // The list forgets the oldest <b>, the tree does not.
        let body = output.document.body().unwrap();
        let mut depth = 0;
        let mut node = body;
        while let Some(&child) = tree.children(node).first() {
            if tree.as_element(child).is_some_and(|e| e.kind == ElementKind::B) {
                depth += 1;
            }
            node = child;
        }
        assert_eq!(depth, 5);
    }

    #[test]
    fn noahs_ark_limits_reconstruction() {
        let output = parse_str("<p><b><b><b><b>x</p>y", &ParseOptions::default());
        let tree = &output.document.tree;
        let body = output.document.body().unwrap();
        // "y" is wrapped in reconstructed <b>s, one per surviving entry.
        let last = *tree.children(body).last().unwrap();
        let mut reconstructed = 0;
        let mut node = last;
        loop {
            if tree.as_element(node).is_some_and(|e| e.kind == ElementKind::B) {
                reconstructed += 1;
            }
            match tree.children(node).first() {
                Some(&child) => node = child,
                None => break,
            }
        }
        assert_eq!(reconstructed, 3);
        assert_eq!(tree.text_content(last), "y");
    }
}
