use core::fmt;

use marten_dom::{Attribute, AttributesMap, is_void};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Character tokens are delivered in runs: a maximal run of ASCII whitespace is
/// one [`Token::Whitespace`], a maximal run of anything else one [`Token::Data`].
/// Start tags for void elements arrive as [`Token::SelfCloseTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag." Missing identifiers are `None`, which is
    /// distinct from the empty string.
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_id: Option<String>,
        /// "a system identifier"
        system_id: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        text: String,
    },

    /// Run of character tokens containing no ASCII whitespace.
    Data {
        /// The characters.
        text: String,
    },

    /// Run of U+0009 TAB, U+000A LF, U+000C FF and U+0020 SPACE.
    Whitespace {
        /// The characters.
        text: String,
    },

    /// Start tag for a non-void element.
    OpenTag {
        /// "a tag name", lowercased.
        name: String,
        /// "a list of attributes", first occurrence of each name.
        attributes: AttributesMap,
        /// "a self-closing flag"
        self_closing: bool,
    },

    /// Start tag for a void element. `self_closing` records whether the
    /// source actually carried a trailing slash.
    SelfCloseTag {
        /// "a tag name", lowercased.
        name: String,
        /// "a list of attributes"
        attributes: AttributesMap,
        /// "a self-closing flag"
        self_closing: bool,
    },

    /// End tag. Attributes on end tags are a parse error and are dropped.
    CloseTag {
        /// "a tag name", lowercased.
        name: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::OpenTag { name, .. } | Self::SelfCloseTag { name, .. } | Self::CloseTag { name } => {
                Some(name)
            }
            _ => None,
        }
    }

    /// Whether this is a start tag (void or not).
    #[must_use]
    pub const fn is_start_tag(&self) -> bool {
        matches!(self, Self::OpenTag { .. } | Self::SelfCloseTag { .. })
    }

    /// Attributes of a start tag.
    #[must_use]
    pub const fn attributes(&self) -> Option<&AttributesMap> {
        match self {
            Self::OpenTag { attributes, .. } | Self::SelfCloseTag { attributes, .. } => {
                Some(attributes)
            }
            _ => None,
        }
    }

    /// Whether a start tag carried a trailing slash.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        matches!(
            self,
            Self::OpenTag {
                self_closing: true,
                ..
            } | Self::SelfCloseTag {
                self_closing: true,
                ..
            }
        )
    }

    /// A start tag with no attributes, for elements the tree builder
    /// inserts implicitly.
    #[must_use]
    pub fn implied_start_tag(name: &str) -> Self {
        let attributes = AttributesMap::new();
        if is_void(name) {
            Self::SelfCloseTag {
                name: name.to_owned(),
                attributes,
                self_closing: false,
            }
        } else {
            Self::OpenTag {
                name: name.to_owned(),
                attributes,
                self_closing: false,
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_id,
                system_id,
                force_quirks,
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_id {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_id {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::OpenTag {
                name,
                attributes,
                self_closing,
            }
            | Self::SelfCloseTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::CloseTag { name } => write!(f, "</{name}>"),
            Self::Comment { text } => write!(f, "<!--{text}-->"),
            Self::Data { text } => write!(f, "Data({text:?})"),
            Self::Whitespace { text } => write!(f, "Whitespace({text:?})"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// The start or end tag currently being built.
///
/// The attribute being tokenized is held apart from the finished list so that
/// duplicate detection happens once its name is complete.
#[derive(Debug, Clone, Default)]
pub(crate) struct TagBuilder {
    pub(crate) name: String,
    pub(crate) is_end: bool,
    pub(crate) self_closing: bool,
    pub(crate) attributes: AttributesMap,
    pub(crate) pending_attribute: Option<Attribute>,
    /// Set once any attribute was seen, including dropped duplicates.
    pub(crate) had_attributes: bool,
}

impl TagBuilder {
    pub(crate) fn start_tag() -> Self {
        Self::default()
    }

    pub(crate) fn end_tag() -> Self {
        Self {
            is_end: true,
            ..Self::default()
        }
    }

    /// "Start a new attribute in the current tag token." Returns `false` if
    /// the previous attribute had to be dropped as a duplicate.
    pub(crate) fn start_attribute(&mut self, first: Option<char>) -> bool {
        let kept = self.commit_attribute();
        self.had_attributes = true;
        self.pending_attribute = Some(Attribute::new(first.map(String::from).unwrap_or_default(), ""));
        kept
    }

    pub(crate) fn push_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.pending_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    pub(crate) fn push_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.pending_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    pub(crate) fn push_attribute_value_str(&mut self, s: &str) {
        if let Some(attr) = self.pending_attribute.as_mut() {
            attr.value.push_str(s);
        }
    }

    /// Move the pending attribute into the list. Returns `false` when it was
    /// a duplicate and got dropped.
    pub(crate) fn commit_attribute(&mut self) -> bool {
        self.pending_attribute
            .take()
            .is_none_or(|attr| self.attributes.insert(attr))
    }
}

/// The DOCTYPE currently being built.
#[derive(Debug, Clone, Default)]
pub(crate) struct DoctypeBuilder {
    pub(crate) name: Option<String>,
    pub(crate) public_id: Option<String>,
    pub(crate) system_id: Option<String>,
    pub(crate) force_quirks: bool,
}

impl DoctypeBuilder {
    pub(crate) fn into_token(self) -> Token {
        Token::Doctype {
            name: self.name,
            public_id: self.public_id,
            system_id: self.system_id,
            force_quirks: self.force_quirks,
        }
    }
}
