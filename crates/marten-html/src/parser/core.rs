use marten_common::warning::warn_once;
use marten_dom::{
    AttributesMap, ContentModel, DoctypeData, Document, DomTree, ElementData, ElementKind,
    Namespace, NodeId, NodeType, QuirksMode,
};
use strum_macros::Display;

use super::formatting::FormattingEntry;
use crate::error::{ParseFailure, ParseIssue};
use crate::options::ParseOptions;
use crate::tokenizer::{HTMLTokenizer, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// What a mode handler did with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The token is fully handled.
    Consumed,
    /// "Reprocess the token": the handler switched the insertion mode and the
    /// same token must be dispatched again.
    Reprocess,
    /// Tree construction cannot continue.
    Failure(ParseFailure),
}

/// Everything a parse produces.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The constructed document. Partial if `failure` is set.
    pub document: Document,
    /// Tokenizer and tree-construction issues, in the order they were found.
    pub issues: Vec<ParseIssue>,
    /// Why tree construction stopped early, if it did.
    pub failure: Option<ParseFailure>,
}

impl ParseOutput {
    /// True when the parse ran to the end of the input.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Borrowed, pattern-friendly view of a token: tag names become `&str` so
/// mode handlers can match on them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenView<'a> {
    Doctype,
    Comment(&'a str),
    Whitespace(&'a str),
    Data(&'a str),
    StartTag(&'a str),
    EndTag(&'a str),
    Eof,
}

impl<'a> TokenView<'a> {
    pub(crate) fn of(token: &'a Token) -> Self {
        match token {
            Token::Doctype { .. } => Self::Doctype,
            Token::Comment { text } => Self::Comment(text),
            Token::Whitespace { text } => Self::Whitespace(text),
            Token::Data { text } => Self::Data(text),
            Token::OpenTag { name, .. } | Token::SelfCloseTag { name, .. } => Self::StartTag(name),
            Token::CloseTag { name } => Self::EndTag(name),
            Token::EndOfFile => Self::Eof,
        }
    }
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser pulls tokens from its tokenizer and builds a DOM tree.
pub struct HTMLParser {
    /// Source of tokens. The parser drives its content model.
    pub(super) tokenizer: HTMLTokenizer,

    /// DOM tree with parent/sibling pointers.
    /// `NodeId::ROOT` (index 0) is the Document node.
    pub(super) tree: DomTree,

    /// The DOCTYPE node, once appended.
    pub(super) doctype: Option<NodeId>,

    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
    pub(super) quirks_mode: QuirksMode,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// "the original insertion mode", set when entering the text and in
    /// table text modes.
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    ///
    /// "The stack of template insertion modes"
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Index 0 is the `html` element; the last entry is the current node.
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<FormattingEntry>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    ///
    /// "The form element pointer points to the last form element that was opened
    /// and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    pub(super) scripting_enabled: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_character_tokens: Vec<Token>,

    /// Set after `pre`, `listing` and `textarea` start tags: "If the next
    /// token is a U+000A LINE FEED (LF) character token, then ignore that
    /// token and move on to the next one."
    pub(super) ignore_next_line_feed: bool,

    max_depth: usize,
    log_issues: bool,
    issues: Vec<ParseIssue>,
    failure: Option<ParseFailure>,

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    pub(super) stopped: bool,
}

impl HTMLParser {
    /// Create a parser over `tokenizer`.
    #[must_use]
    pub fn new(mut tokenizer: HTMLTokenizer, options: &ParseOptions) -> Self {
        tokenizer.set_log_issues(options.log_issues);
        Self {
            tokenizer,
            tree: DomTree::new(),
            doctype: None,
            quirks_mode: QuirksMode::NoQuirks,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            scripting_enabled: options.scripting_enabled,
            pending_table_character_tokens: Vec::new(),
            ignore_next_line_feed: false,
            max_depth: options.max_depth,
            log_issues: options.log_issues,
            issues: Vec::new(),
            failure: None,
            stopped: false,
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// Pull tokens until end of input (or a failure) and return the
    /// document together with every issue recorded along the way.
    #[must_use]
    pub fn run(mut self) -> ParseOutput {
        while self.step() {}
        self.issues.extend(self.tokenizer.take_issues());

        ParseOutput {
            document: Document {
                tree: self.tree,
                doctype: self.doctype,
                quirks_mode: self.quirks_mode,
            },
            issues: self.issues,
            failure: self.failure,
        }
    }

    /// Pull one token from the tokenizer and run it through tree
    /// construction. Returns false once parsing has stopped.
    pub(super) fn step(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let Some(mut token) = self.tokenizer.next_token() else {
            return false;
        };
        self.issues.extend(self.tokenizer.take_issues());

        if std::mem::take(&mut self.ignore_next_line_feed)
            && let Token::Whitespace { text } = &mut token
            && text.starts_with('\n')
        {
            let _ = text.remove(0);
            if text.is_empty() {
                return true;
            }
        }

        self.process_token(&token);

        // [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
        // "If there is an adjusted current node and it is not an element in
        // the HTML namespace, then switch to the CDATA section state."
        let foreign = self
            .adjusted_current_node()
            .and_then(|id| self.tree.as_element(id))
            .is_some_and(|element| element.namespace != Namespace::Html);
        self.tokenizer.set_cdata_allowed(foreign);
        !self.stopped
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn process_token(&mut self, token: &Token) {
        // "When a start tag token is emitted with its self-closing flag set, if
        // the flag is not acknowledged when it is processed by the tree
        // construction stage, that is a parse error."
        if let Token::OpenTag {
            name,
            self_closing: true,
            ..
        } = token
            && !matches!(name.as_str(), "svg" | "math")
            && self.uses_html_rules(token)
        {
            self.parse_error("non-void-html-element-start-tag-with-trailing-solidus");
        }

        loop {
            let outcome = if self.uses_html_rules(token) {
                self.process_using_rules_for(self.insertion_mode, token)
            } else {
                self.handle_foreign_content(token)
            };
            match self.enforce_depth_limit(outcome) {
                Outcome::Consumed => return,
                Outcome::Reprocess => {}
                Outcome::Failure(failure) => {
                    self.parse_error(failure.to_string());
                    self.failure = Some(failure);
                    self.stopped = true;
                    return;
                }
            }
        }
    }

    /// Turn any outcome into a failure once the stack of open elements or the
    /// list of active formatting elements has outgrown `max_depth`.
    fn enforce_depth_limit(&self, outcome: Outcome) -> Outcome {
        let limit = self.max_depth;
        if self.stack_of_open_elements.len() > limit {
            Outcome::Failure(ParseFailure::NestingTooDeep { limit })
        } else if self.active_formatting_elements.len() > limit {
            Outcome::Failure(ParseFailure::FormattingListTooLong { limit })
        } else {
            outcome
        }
    }

    /// "If the stack of open elements is empty; if the adjusted current node
    /// is an element in the HTML namespace; ... process the token according to
    /// the rules given in the section corresponding to the current insertion
    /// mode in HTML content. Otherwise: process the token according to the
    /// rules given in the section for parsing tokens in foreign content."
    fn uses_html_rules(&self, token: &Token) -> bool {
        let Some(element) = self
            .adjusted_current_node()
            .and_then(|id| self.tree.as_element(id))
        else {
            return true;
        };
        if element.namespace == Namespace::Html {
            return true;
        }

        let view = TokenView::of(token);
        let is_character = matches!(view, TokenView::Whitespace(_) | TokenView::Data(_));

        // "If the adjusted current node is a MathML text integration point and
        // the token is a start tag whose tag name is neither "mglyph" nor
        // "malignmark"" / "... and the token is a character token"
        if is_mathml_text_integration_point(element) {
            match view {
                TokenView::StartTag(name) if !matches!(name, "mglyph" | "malignmark") => {
                    return true;
                }
                _ if is_character => return true,
                _ => {}
            }
        }

        // "If the adjusted current node is a MathML annotation-xml element and
        // the token is a start tag whose tag name is "svg""
        if element.namespace == Namespace::MathMl
            && element.kind == ElementKind::AnnotationXml
            && view == TokenView::StartTag("svg")
        {
            return true;
        }

        // "If the adjusted current node is an HTML integration point and the
        // token is a start tag" / "... and the token is a character token"
        if is_html_integration_point(element)
            && (is_character || matches!(view, TokenView::StartTag(_)))
        {
            return true;
        }

        // "If the token is an end-of-file token"
        view == TokenView::Eof
    }

    /// "Process the token using the rules for the X insertion mode": a direct
    /// call that leaves the insertion mode alone.
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) -> Outcome {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// Switch modes and ask the driver to dispatch the token again.
    pub(super) const fn reprocess_in(&mut self, mode: InsertionMode) -> Outcome {
        self.insertion_mode = mode;
        Outcome::Reprocess
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a tree-construction issue at the tokenizer's current position.
    pub(super) fn parse_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.log_issues {
            let _ = warn_once("HTML Parser", &message);
        }
        let position = self.tokenizer.position();
        self.issues.push(ParseIssue::new(message, position));
    }

    /// Record "unexpected token" for the current mode. Returns `Consumed`
    /// so "parse error; ignore the token" reads as one expression.
    pub(super) fn ignore_unexpected(&mut self, token: &Token) -> Outcome {
        self.parse_error(format!(
            "unexpected {token} in {} insertion mode",
            self.insertion_mode
        ));
        Outcome::Consumed
    }

    /// Record "unexpected token" without ignoring it.
    pub(super) fn report_unexpected(&mut self, token: &Token) {
        let _ = self.ignore_unexpected(token);
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) -> Outcome {
        self.stack_of_open_elements.clear();
        self.stopped = true;
        Outcome::Consumed
    }

    // ===== Creating and inserting nodes =====

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack
    /// of open elements has only one element in it ...; otherwise, the
    /// adjusted current node is the current node."
    ///
    /// Documents are always parsed whole, so this is the current node.
    pub(super) fn adjusted_current_node(&self) -> Option<NodeId> {
        self.current_node()
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target."
    ///
    /// Returns `(parent, before)`. When `before` is `Some`, the node goes
    /// immediately before that child; otherwise it is appended.
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> (NodeId, Option<NodeId>) {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "If foster parenting is enabled and target is a table, tbody,
        //          tfoot, thead, or tr element"
        let fosters = self.foster_parenting
            && self.tree.as_element(target).is_some_and(|element| {
                element.is_one_of(&[
                    ElementKind::Table,
                    ElementKind::Tbody,
                    ElementKind::Tfoot,
                    ElementKind::Thead,
                    ElementKind::Tr,
                ])
            });
        if !fosters {
            // "Otherwise: Let adjusted insertion location be inside target,
            // after its last child (if any)."
            return (target, None);
        }

        // STEP 2.1: "Let last template be the last template element in the
        //            stack of open elements, if any."
        // STEP 2.2: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_template = self.position_in_stack(ElementKind::Template);
        let last_table = self.position_in_stack(ElementKind::Table);

        // STEP 2.3: "If there is a last template and either there is no last
        //            table, or there is one, but last template is lower (more
        //            recently added) than last table in the stack of open
        //            elements, then: let adjusted insertion location be inside
        //            last template's template contents, after its last child."
        if let Some(template) = last_template
            && last_table.is_none_or(|table| template > table)
        {
            return (self.stack_of_open_elements[template], None);
        }

        // STEP 2.4: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element), after its last child."
        let Some(table_index) = last_table else {
            let html = self
                .stack_of_open_elements
                .first()
                .copied()
                .unwrap_or(NodeId::ROOT);
            return (html, None);
        };

        // STEP 2.5: "If last table has a parent node, then let adjusted
        //            insertion location be inside last table's parent node,
        //            immediately before last table."
        let table = self.stack_of_open_elements[table_index];
        if let Some(parent) = self.tree.parent(table) {
            return (parent, Some(table));
        }

        // STEP 2.6-2.7: "Let previous element be the element immediately above
        //                last table in the stack of open elements. Let adjusted
        //                insertion location be inside previous element, after
        //                its last child."
        let previous = table_index
            .checked_sub(1)
            .map_or(NodeId::ROOT, |index| self.stack_of_open_elements[index]);
        (previous, None)
    }

    /// Place an already-allocated node at an insertion location.
    pub(super) fn insert_node_at(&mut self, (parent, before): (NodeId, Option<NodeId>), node: NodeId) {
        match before {
            Some(reference) => self.tree.insert_before(parent, node, reference),
            None => self.tree.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Inserts a whole run of characters at once; adjacent text merges into
    /// the preceding Text node.
    pub(super) fn insert_characters(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // STEP 2: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let (parent, before) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is inside a Document
        //          node, then return."
        if parent == NodeId::ROOT {
            return;
        }

        // STEP 4-5: append to an adjacent Text node or create a new one.
        let _ = self.tree.insert_text(parent, before, text);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "Let data be the data given in the comment token being processed. If
    /// position was specified, then let the adjusted insertion location be
    /// position. Otherwise, let adjusted insertion location be the appropriate
    /// place for inserting a node."
    ///
    /// `position` is always "the last child of" some node.
    pub(super) fn insert_comment(&mut self, text: &str, position: Option<NodeId>) {
        let location = position.map_or_else(
            || self.appropriate_place_for_inserting(None),
            |parent| (parent, None),
        );
        let comment = self.tree.alloc(NodeType::Comment(text.to_string()));
        self.insert_node_at(location, comment);
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// The element's kind comes from the lowercased tag name, so SVG's
    /// `foreignObject` still classifies as an integration point.
    pub(super) fn create_element_for_token(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let name = token.tag_name().unwrap_or_default();
        let attrs = token.attributes().cloned().unwrap_or_default();
        self.create_element(name, attrs, namespace)
    }

    pub(super) fn create_element(&mut self, name: &str, attrs: AttributesMap, namespace: Namespace) -> NodeId {
        let kind = ElementKind::from_name(&name.to_ascii_lowercase());
        self.tree.alloc(NodeType::Element(ElementData {
            kind,
            tag_name: name.to_string(),
            namespace,
            attrs,
        }))
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Let the adjusted insertion location be the appropriate place for
    /// inserting a node. Let element be the result of creating an element for
    /// the token ... Append element to the adjusted insertion location. Push
    /// element onto the stack of open elements so that it is the new current
    /// node. Return element."
    pub(super) fn insert_element(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let location = self.appropriate_place_for_inserting(None);
        let element = self.create_element_for_token(token, namespace);
        self.insert_node_at(location, element);
        self.stack_of_open_elements.push(element);
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the token,
    /// in the HTML namespace."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        self.insert_element(token, Namespace::Html)
    }

    /// Insert an HTML element for "a start tag token whose tag name is
    /// `name`, with no attributes", as the recovery steps phrase it.
    pub(super) fn insert_implied_element(&mut self, name: &str) -> NodeId {
        self.insert_html_element(&Token::implied_start_tag(name))
    }

    /// Insert a void element and pop it right away, acknowledging any
    /// self-closing flag.
    pub(super) fn insert_void_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        let _ = self.stack_of_open_elements.pop();
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// The generic raw text and generic RCDATA element parsing algorithms,
    /// and the script-specific variant of the same steps.
    pub(super) fn parse_text_element(&mut self, token: &Token, model: ContentModel) -> Outcome {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //          element parsing algorithm, switch the tokenizer to the
        //          RAWTEXT state; otherwise ... switch the tokenizer to the
        //          RCDATA state."
        self.tokenizer.switch_content_model(model);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
        Outcome::Consumed
    }

    /// Tell the tokenizer which content model the element just opened needs.
    pub(super) fn switch_tokenizer_to(&mut self, model: ContentModel) {
        self.tokenizer.switch_content_model(model);
    }

    /// Add every attribute of `token` that `element` does not already have.
    /// Used for stray `<html>` and `<body>` start tags.
    pub(super) fn merge_attributes(&mut self, element: NodeId, token: &Token) {
        let Some(attributes) = token.attributes() else {
            return;
        };
        if let Some(data) = self.tree.as_element_mut(element) {
            for attribute in attributes {
                let _ = data.attrs.insert(attribute.clone());
            }
        }
    }

    /// Append a DOCTYPE node to the document.
    pub(super) fn append_doctype(&mut self, data: DoctypeData) {
        let doctype = self.tree.alloc(NodeType::Doctype(data));
        self.tree.append_child(NodeId::ROOT, doctype);
        self.doctype = Some(doctype);
    }
}

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
///
/// "A node is a MathML text integration point if it is one of the following
/// elements: A MathML mi element, A MathML mo element, A MathML mn element,
/// A MathML ms element, A MathML mtext element."
pub(super) fn is_mathml_text_integration_point(element: &ElementData) -> bool {
    element.namespace == Namespace::MathMl
        && matches!(
            element.kind,
            ElementKind::Mi | ElementKind::Mo | ElementKind::Mn | ElementKind::Ms | ElementKind::Mtext
        )
}

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
///
/// "A node is an HTML integration point if it is one of the following
/// elements: A MathML annotation-xml element whose start tag token had an
/// attribute with the name "encoding" whose value was an ASCII
/// case-insensitive match for the string "text/html"; [or]
/// "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
/// element; An SVG title element."
pub(super) fn is_html_integration_point(element: &ElementData) -> bool {
    match element.namespace {
        Namespace::MathMl => {
            element.kind == ElementKind::AnnotationXml
                && element.attrs.get("encoding").is_some_and(|encoding| {
                    encoding.eq_ignore_ascii_case("text/html")
                        || encoding.eq_ignore_ascii_case("application/xhtml+xml")
                })
        }
        Namespace::Svg => matches!(
            element.kind,
            ElementKind::ForeignObject | ElementKind::Desc | ElementKind::Title
        ),
        Namespace::Html => false,
    }
}
