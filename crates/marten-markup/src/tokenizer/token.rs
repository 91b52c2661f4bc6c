use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// Tag names that never receive a closing tag in markup.
///
/// The tokenizer lexically recognizes `<input type="text">` the same way as
/// any other opening tag, then reclassifies it to [`TokenKind::AutoClosingTag`]
/// at commit time, once the tag name is known. Without the reclassification the
/// tree builder would push such a tag onto the open-element stack and wait
/// forever for a closing tag that cannot appear.
pub const VOID_ELEMENTS: &[&str] = &[
    "meta", "img", "link", "br", "hr", "input", "area", "param", "col", "base",
];

/// A single key/value pair scanned from a tag's attribute region.
///
/// Duplicate keys are permitted; a `class` attribute is split into one entry
/// per whitespace-separated class token, all sharing the key `class`. Keys are
/// kept exactly as written in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// The attribute name, case-sensitive as written.
    pub key: String,
    /// The attribute value. Empty for valueless attributes such as `disabled`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given key and value.
    #[must_use]
    pub const fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

/// An ordered, insertion-order-preserving list of [`Attribute`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, preserving insertion order.
    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Number of attributes in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the list holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The first attribute with the given key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.key == key)
    }

    /// All attributes with the given key, in insertion order.
    ///
    /// A `class="a b"` attribute yields two entries keyed `class`, so this is
    /// the way to retrieve every class token of a tag.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.key == key)
            .collect()
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = core::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// The syntactic classification of a scanned lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TokenKind {
    /// A `<!DOCTYPE ...>` declaration.
    Doctype,
    /// An opening tag such as `<div class="a">`.
    OpenTag,
    /// A closing tag such as `</div>`.
    ClosingTag,
    /// A tag that opens no element body: either explicitly self-closed with
    /// `/>` or an opening tag whose name is in [`VOID_ELEMENTS`]. Both forms
    /// resolve to this kind.
    AutoClosingTag,
    /// Text between tags, whitespace-trimmed.
    Content,
    /// A well-formed `<!-- ... -->` comment.
    Comment,
    /// A `<! ... >` construct that is neither a valid comment nor a doctype.
    BogusComment,
}

/// A classified span of markup produced by the tokenizer.
///
/// Tokens are immutable once constructed. `text` holds the verbatim source
/// slice for tag, comment, and doctype tokens; for [`TokenKind::Content`] it
/// holds the trimmed text instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What kind of lexeme this is.
    pub kind: TokenKind,
    /// The tag name, present only for tag-kind tokens.
    pub tag_name: Option<String>,
    /// The scanned attributes, present only for opening and auto-closing tags
    /// and only when at least one attribute was committed.
    pub attributes: Option<AttributeList>,
    /// The source slice of the lexeme (trimmed for content tokens).
    pub text: String,
    /// Char index into the original markup where the lexeme starts.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    ///
    /// A tag token with zero attributes carries no attribute list at all, so
    /// an empty list is normalized to `None` here.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        tag_name: Option<String>,
        attributes: Option<AttributeList>,
        text: String,
        position: usize,
    ) -> Self {
        let attributes = attributes.filter(|list| !list.is_empty());
        Self {
            kind,
            tag_name,
            attributes,
            text,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::OpenTag | TokenKind::AutoClosingTag => {
                write!(f, "<{}", self.tag_name.as_deref().unwrap_or(""))?;
                if let Some(attributes) = &self.attributes {
                    for attribute in attributes {
                        if attribute.value.is_empty() {
                            write!(f, " {}", attribute.key)?;
                        } else {
                            write!(f, " {}=\"{}\"", attribute.key, attribute.value)?;
                        }
                    }
                }
                if self.kind == TokenKind::AutoClosingTag {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            TokenKind::ClosingTag => {
                write!(f, "</{}>", self.tag_name.as_deref().unwrap_or(""))
            }
            _ => write!(f, "{}", self.text),
        }
    }
}
