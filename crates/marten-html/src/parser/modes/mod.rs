//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One `handle_*_mode` method on [`HTMLParser`](super::HTMLParser) per
//! insertion mode, grouped by the part of the document they build.

mod after;
mod body;
mod head;
mod initial;
mod select;
mod table;
mod template;
mod text;
