//! Owned element tree built from the token stream.

use log::trace;

use crate::error::{Error, Result};

use super::{
    lexer::Lexer,
    text::TextBuffer,
    token::{Ty, Token},
    value,
};

/// An element of a reply with its collected text and child elements.
///
/// Attributes are not kept; the GUI RPC schema does not use them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element without text or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// The tag name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's own character data.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The child elements in document order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The first child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// The text of the first child with the given name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// Returns true if there is a child with the given name.
    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Depth-first search for the first element with the given name,
    /// starting with this element.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Element> {
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.name == name {
                return Some(element);
            }
            pending.extend(element.children.iter().rev());
        }
        None
    }

    /// Collects the outermost elements with the given name.
    ///
    /// Elements nested inside a match are not visited, so a `<project>`
    /// inside a `<project>` is part of the outer record.
    #[must_use]
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.name == name {
                found.push(element);
            } else {
                pending.extend(element.children.iter().rev());
            }
        }
        found
    }

    /// The text as an owned string.
    #[inline]
    #[must_use]
    pub fn string(&self) -> String {
        self.text.clone()
    }

    /// The text as a 32-bit integer, `None` if it does not parse.
    #[must_use]
    pub fn int(&self) -> Option<i32> {
        self.lenient(value::int(&self.text))
    }

    /// The text as a 64-bit integer, `None` if it does not parse.
    #[must_use]
    pub fn long(&self) -> Option<i64> {
        self.lenient(value::long(&self.text))
    }

    /// The text as a double, `None` if it does not parse.
    #[must_use]
    pub fn double(&self) -> Option<f64> {
        self.lenient(value::double(&self.text))
    }

    /// The text as a decimal number truncated to an integer.
    #[must_use]
    pub fn truncated(&self) -> Option<i64> {
        self.lenient(value::truncated(&self.text))
    }

    /// See [`value::truthy()`].
    #[inline]
    #[must_use]
    pub fn truthy(&self) -> bool {
        value::truthy(&self.text)
    }

    /// See [`value::flag()`].
    #[inline]
    #[must_use]
    pub fn flag(&self) -> bool {
        value::flag(&self.text)
    }

    fn lenient<T>(&self, value: Option<T>) -> Option<T> {
        if value.is_none() {
            trace!("ignoring <{}> value {:?}", self.name, self.text);
        }
        value
    }
}

/// Deepest element nesting accepted in a document.
///
/// Replies of the core client are a few levels deep; a start tag beyond
/// this depth makes [`parse_document()`] fail with [`Error::Malformed`].
pub const MAX_DEPTH: usize = 256;

/// An element which has been opened but not closed yet.
#[derive(Debug)]
struct Open {
    element: Element,
    text: TextBuffer,
}

impl Open {
    fn new(name: &str) -> Self {
        Self {
            element: Element::new(name),
            text: TextBuffer::new(),
        }
    }

    fn close(mut self) -> Element {
        self.text.trim_end();
        self.element.text = self.text.into_string();
        self.element
    }
}

/// Builds the tree while the tokens of one document are fed to it.
#[derive(Debug, Default)]
struct Builder {
    stack: Vec<Open>,
    root: Option<Element>,
}

impl Builder {
    fn attach(&mut self, element: Element, offset: usize) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.element.children.push(element),
            None if self.root.is_none() => self.root = Some(element),
            None => return Err(Error::malformed(offset, "more than one root element")),
        }
        Ok(())
    }

    fn text(&mut self, text: &str, offset: usize) -> Result<()> {
        match self.stack.last_mut() {
            Some(open) => open.text.append(text),
            None if text.trim().is_empty() => {}
            None => return Err(Error::malformed(offset, "text outside of the root element")),
        }
        Ok(())
    }

    fn feed(&mut self, token: Token<'_>) -> Result<()> {
        let offset = token.offset();
        match token.ty() {
            Ty::StartTag(tag) => {
                if self.stack.is_empty() && self.root.is_some() {
                    return Err(Error::malformed(offset, "more than one root element"));
                }
                if self.stack.len() >= MAX_DEPTH {
                    return Err(Error::malformed(offset, "nesting too deep"));
                }
                self.stack.push(Open::new(tag.name()));
            }
            Ty::EmptyElementTag(tag) => self.attach(Element::new(tag.name()), offset)?,
            Ty::EndTag(tag) => {
                let open = self
                    .stack
                    .pop()
                    .ok_or(Error::malformed(offset, "end tag without start tag"))?;
                if open.element.name != tag.name() {
                    return Err(Error::malformed(offset, "mismatched end tag"));
                }
                self.attach(open.close(), offset)?;
            }
            Ty::Characters(chars) => self.text(&chars.content(), offset)?,
            Ty::Cdata(cdata) => self.text(cdata.content(), offset)?,
            Ty::ProcessingInstruction(_) | Ty::Declaration(_) | Ty::Comment(_) => {}
        }
        Ok(())
    }
}

/// Parses a complete document into its root element.
///
/// # Errors
///
/// [`Error::EmptyInput`] if the input has no element at all and
/// [`Error::Malformed`] if the tags are not balanced, a token is incomplete
/// or there is content after the root element.
///
/// # Examples
///
/// ```
/// use boinc_rpc::xml::parse_document;
///
/// let root = parse_document("<msgs><msg><seqno>3</seqno></msg></msgs>")?;
/// assert_eq!("msgs", root.name());
/// let seqno = root.find("seqno").and_then(|e| e.int());
/// assert_eq!(Some(3), seqno);
/// # Ok::<(), boinc_rpc::Error>(())
/// ```
pub fn parse_document(input: &str) -> Result<Element> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let lexer = Lexer::new(input);
    let mut builder = Builder::default();
    let mut pos = 0;
    while let Some(token) = lexer.tokenize(&mut pos) {
        builder.feed(token)?;
    }

    if pos != input.len() {
        return Err(Error::malformed(pos, "incomplete token"));
    }
    if !builder.stack.is_empty() {
        return Err(Error::malformed(pos, "unclosed element"));
    }
    builder.root.ok_or(Error::EmptyInput)
}
