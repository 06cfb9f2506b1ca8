//! Element registry: the closed set of element kinds the parser knows about.
//!
//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
//!
//! Every tag name maps to an [`ElementKind`]; names the parser has no rules for
//! map to [`ElementKind::Unknown`]. All category questions (void, special,
//! formatting, tokenizer content model) are answered from the kind alone, so
//! the tokenizer and the tree builder never compare tag strings.

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// [§ 2.1.3 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// Only the three namespaces the HTML parser can create elements in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// "http://www.w3.org/1999/xhtml"
    #[default]
    #[strum(serialize = "html")]
    Html,
    /// "http://www.w3.org/2000/svg"
    #[strum(serialize = "svg")]
    Svg,
    /// "http://www.w3.org/1998/Math/MathML"
    #[strum(serialize = "math")]
    MathMl,
}

/// Tokenizer state family selected by the most recently opened element.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ContentModel {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    Rcdata,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PlainText,
}

/// Every element the tree builder has specific rules for.
///
/// The string form is the lowercase tag name as produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum ElementKind {
    A,
    Abbr,
    Address,
    Applet,
    Area,
    Article,
    Aside,
    Audio,
    B,
    Base,
    Basefont,
    Bdi,
    Bdo,
    Bgsound,
    Big,
    Blockquote,
    Body,
    Br,
    Button,
    Canvas,
    Caption,
    Center,
    Cite,
    Code,
    Col,
    Colgroup,
    Data,
    Datalist,
    Dd,
    Del,
    Details,
    Dfn,
    Dialog,
    Dir,
    Div,
    Dl,
    Dt,
    Em,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Font,
    Footer,
    Form,
    Frame,
    Frameset,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hgroup,
    Hr,
    Html,
    I,
    Iframe,
    Image,
    Img,
    Input,
    Ins,
    Kbd,
    Keygen,
    Label,
    Legend,
    Li,
    Link,
    Listing,
    Main,
    Map,
    Mark,
    Marquee,
    Menu,
    Meta,
    Meter,
    Nav,
    Nobr,
    Noembed,
    Noframes,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    Output,
    P,
    Param,
    Picture,
    Plaintext,
    Pre,
    Progress,
    Q,
    Rb,
    Rp,
    Rt,
    Rtc,
    Ruby,
    S,
    Samp,
    Script,
    Search,
    Section,
    Select,
    Slot,
    Small,
    Source,
    Span,
    Strike,
    Strong,
    Style,
    Sub,
    Summary,
    Sup,
    Table,
    Tbody,
    Td,
    Template,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Time,
    Title,
    Tr,
    Track,
    Tt,
    U,
    Ul,
    Var,
    Video,
    Wbr,
    Xmp,
    // Foreign content roots and integration points.
    Svg,
    Math,
    Desc,
    #[strum(serialize = "foreignobject")]
    ForeignObject,
    Mi,
    Mo,
    Mn,
    Ms,
    Mtext,
    Mglyph,
    Malignmark,
    #[strum(serialize = "annotation-xml")]
    AnnotationXml,
    /// Any tag name without dedicated parser rules. Tag names always start
    /// with an ASCII letter, so this spelling never matches a parsed tag.
    #[strum(serialize = "#unknown")]
    Unknown,
}

/// Everything the parser needs to know about a tag name, in one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    /// The element kind the name maps to.
    pub kind: ElementKind,
    /// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
    pub is_void: bool,
    /// [§ 13.2.4.3 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    /// (HTML namespace membership).
    pub is_special: bool,
    /// [§ 13.2.4.3 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
    pub is_formatting: bool,
    /// Content model the tokenizer switches to when this element is opened
    /// with scripting disabled. See [`ElementKind::content_model`].
    pub content_model: ContentModel,
}

/// Classify a lowercase tag name.
#[must_use]
pub fn classify(name: &str) -> ElementInfo {
    ElementKind::from_name(name).info()
}

/// Whether a tag name is a void element ("br", "img", ...).
#[must_use]
pub fn is_void(name: &str) -> bool {
    ElementKind::from_name(name).is_void()
}

impl ElementKind {
    /// Map a lowercase tag name to its kind, or [`ElementKind::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::from_str(name).unwrap_or(Self::Unknown)
    }

    /// The canonical lowercase tag name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// All metadata for this kind.
    #[must_use]
    pub const fn info(self) -> ElementInfo {
        ElementInfo {
            kind: self,
            is_void: self.is_void(),
            is_special: self.is_special_html(),
            is_formatting: self.is_formatting(),
            content_model: self.content_model(false),
        }
    }

    /// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
    ///
    /// "area, base, br, col, embed, hr, img, input, link, meta, source, track, wbr"
    /// plus the legacy void elements the parser also never gives children.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(
            self,
            Self::Area
                | Self::Base
                | Self::Basefont
                | Self::Bgsound
                | Self::Br
                | Self::Col
                | Self::Embed
                | Self::Frame
                | Self::Hr
                | Self::Img
                | Self::Input
                | Self::Keygen
                | Self::Link
                | Self::Meta
                | Self::Param
                | Self::Source
                | Self::Track
                | Self::Wbr
        )
    }

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
    ///
    /// "The elements in the formatting category are: a, b, big, code, em, font,
    /// i, nobr, s, small, strike, strong, tt, u."
    #[must_use]
    pub const fn is_formatting(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::B
                | Self::Big
                | Self::Code
                | Self::Em
                | Self::Font
                | Self::I
                | Self::Nobr
                | Self::S
                | Self::Small
                | Self::Strike
                | Self::Strong
                | Self::Tt
                | Self::U
        )
    }

    /// [§ 13.2.4.3 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    ///
    /// Membership of the HTML-namespace part of the special category.
    #[must_use]
    pub const fn is_special_html(self) -> bool {
        matches!(
            self,
            Self::Address
                | Self::Applet
                | Self::Area
                | Self::Article
                | Self::Aside
                | Self::Base
                | Self::Basefont
                | Self::Bgsound
                | Self::Blockquote
                | Self::Body
                | Self::Br
                | Self::Button
                | Self::Caption
                | Self::Center
                | Self::Col
                | Self::Colgroup
                | Self::Dd
                | Self::Details
                | Self::Dir
                | Self::Div
                | Self::Dl
                | Self::Dt
                | Self::Embed
                | Self::Fieldset
                | Self::Figcaption
                | Self::Figure
                | Self::Footer
                | Self::Form
                | Self::Frame
                | Self::Frameset
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Head
                | Self::Header
                | Self::Hgroup
                | Self::Hr
                | Self::Html
                | Self::Iframe
                | Self::Img
                | Self::Input
                | Self::Keygen
                | Self::Li
                | Self::Link
                | Self::Listing
                | Self::Main
                | Self::Marquee
                | Self::Menu
                | Self::Meta
                | Self::Nav
                | Self::Noembed
                | Self::Noframes
                | Self::Noscript
                | Self::Object
                | Self::Ol
                | Self::P
                | Self::Param
                | Self::Plaintext
                | Self::Pre
                | Self::Script
                | Self::Search
                | Self::Section
                | Self::Select
                | Self::Source
                | Self::Style
                | Self::Summary
                | Self::Table
                | Self::Tbody
                | Self::Td
                | Self::Template
                | Self::Textarea
                | Self::Tfoot
                | Self::Th
                | Self::Thead
                | Self::Title
                | Self::Tr
                | Self::Track
                | Self::Ul
                | Self::Wbr
                | Self::Xmp
        )
    }

    /// Special category membership for an element in `namespace`.
    ///
    /// "MathML mi, MathML mo, MathML mn, MathML ms, MathML mtext, and MathML
    /// annotation-xml; and SVG foreignObject, SVG desc, and SVG title."
    #[must_use]
    pub const fn is_special_in(self, namespace: Namespace) -> bool {
        match namespace {
            Namespace::Html => self.is_special_html(),
            Namespace::MathMl => matches!(
                self,
                Self::Mi | Self::Mo | Self::Mn | Self::Ms | Self::Mtext | Self::AnnotationXml
            ),
            Namespace::Svg => matches!(self, Self::ForeignObject | Self::Desc | Self::Title),
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// The tokenizer state an HTML element of this kind switches to when it is
    /// inserted. `noscript` is only raw text when scripting is enabled.
    #[must_use]
    pub const fn content_model(self, scripting_enabled: bool) -> ContentModel {
        match self {
            Self::Title | Self::Textarea => ContentModel::Rcdata,
            Self::Style | Self::Xmp | Self::Iframe | Self::Noembed | Self::Noframes => {
                ContentModel::RawText
            }
            Self::Noscript if scripting_enabled => ContentModel::RawText,
            Self::Script => ContentModel::ScriptData,
            Self::Plaintext => ContentModel::PlainText,
            _ => ContentModel::Data,
        }
    }

    /// h1 through h6.
    #[must_use]
    pub const fn is_heading(self) -> bool {
        matches!(
            self,
            Self::H1 | Self::H2 | Self::H3 | Self::H4 | Self::H5 | Self::H6
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_registry() {
        assert_eq!(ElementKind::from_name("annotation-xml"), ElementKind::AnnotationXml);
        assert_eq!(ElementKind::from_name("foreignobject"), ElementKind::ForeignObject);
        assert_eq!(ElementKind::from_name("h3"), ElementKind::H3);
        assert_eq!(ElementKind::H3.name(), "h3");
        assert_eq!(ElementKind::from_name("blink"), ElementKind::Unknown);
        assert_eq!(ElementKind::from_name("DIV"), ElementKind::Unknown);
    }
}
