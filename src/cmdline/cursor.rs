//! Immutable input cursors
//!
//! A cursor is the "remaining input" threaded through every parser. Cursors are
//! values: consuming input never mutates a cursor, it produces a new one that is
//! the same length or shorter. Both instantiations share their backing storage
//! through an `Arc`, so cloning a cursor is cheap.

use std::sync::Arc;

use super::elements::CommandLineElement;

/// Remaining input for a parser.
pub trait Cursor: Clone {
    /// The atomic unit consumed by [`satisfy`](super::combinators::satisfy).
    type Item;

    /// Split off the next item, returning it together with the advanced cursor.
    fn next_item(&self) -> Option<(Self::Item, Self)>;

    /// Units left to consume.
    fn remaining(&self) -> usize;

    /// Units consumed since the start of the input.
    fn offset(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Character cursor over the raw invocation text. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrCursor {
    text: Arc<str>,
    offset: usize,
}

impl StrCursor {
    pub fn new(text: &str) -> Self {
        StrCursor {
            text: Arc::from(text),
            offset: 0,
        }
    }

    /// The unconsumed part of the text.
    pub fn rest(&self) -> &str {
        &self.text[self.offset..]
    }
}

impl Cursor for StrCursor {
    type Item = char;

    fn next_item(&self) -> Option<(char, Self)> {
        let ch = self.rest().chars().next()?;
        let advanced = StrCursor {
            text: Arc::clone(&self.text),
            offset: self.offset + ch.len_utf8(),
        };
        Some((ch, advanced))
    }

    fn remaining(&self) -> usize {
        self.text.len() - self.offset
    }

    fn offset(&self) -> usize {
        self.offset
    }
}

/// Element cursor over a tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCursor {
    elements: Arc<[CommandLineElement]>,
    offset: usize,
}

impl ElementCursor {
    pub fn new(elements: Vec<CommandLineElement>) -> Self {
        ElementCursor {
            elements: Arc::from(elements),
            offset: 0,
        }
    }

    pub fn rest(&self) -> &[CommandLineElement] {
        &self.elements[self.offset..]
    }

    /// A cursor positioned one element further, dropping the current element.
    pub fn skip(&self) -> Self {
        ElementCursor {
            elements: Arc::clone(&self.elements),
            offset: (self.offset + 1).min(self.elements.len()),
        }
    }
}

impl Cursor for ElementCursor {
    type Item = CommandLineElement;

    fn next_item(&self) -> Option<(CommandLineElement, Self)> {
        let element = self.rest().first()?.clone();
        Some((element, self.skip()))
    }

    fn remaining(&self) -> usize {
        self.elements.len() - self.offset
    }

    fn offset(&self) -> usize {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_cursor_advances_without_mutating() {
        let cursor = StrCursor::new("ab");
        let (first, rest) = cursor.next_item().unwrap();

        assert_eq!(first, 'a');
        assert_eq!(rest.rest(), "b");
        assert_eq!(cursor.rest(), "ab");
        assert_eq!(rest.offset(), 1);
    }

    #[test]
    fn test_str_cursor_multibyte_offsets() {
        let cursor = StrCursor::new("é!");
        let (ch, rest) = cursor.next_item().unwrap();

        assert_eq!(ch, 'é');
        assert_eq!(rest.offset(), 2);
        assert_eq!(rest.remaining(), 1);
    }

    #[test]
    fn test_str_cursor_empty() {
        let cursor = StrCursor::new("");
        assert!(cursor.next_item().is_none());
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_element_cursor_skip_is_bounded() {
        let cursor = ElementCursor::new(vec![CommandLineElement::argument("install")]);
        let end = cursor.skip().skip();

        assert!(end.is_empty());
        assert_eq!(end.offset(), 1);
        assert_eq!(cursor.remaining(), 1);
    }
}
