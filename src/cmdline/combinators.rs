//! Parser combinators over an abstract [`Cursor`]
//!
//! A [`Parser`] consumes a prefix of its input and yields either
//! `Matched(value, remainder)` or `NoMatch`. Parsers never fail in any other
//! way: absence of a match is an ordinary value. Parsers hold no mutable
//! state, so a parser built once can be shared and reused for any number of
//! parses.
//!
//! Composition is left-biased and backtracking-free: [`Parser::bind`] never
//! retries a different split of the input, and [`Parser::or`] only tries its
//! alternative when the first parser produced `NoMatch`.

use std::sync::Arc;

use super::cursor::Cursor;

/// Result of running a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T, C> {
    Matched(T, C),
    NoMatch,
}

impl<T, C> ParseOutcome<T, C> {
    pub fn is_match(&self) -> bool {
        matches!(self, ParseOutcome::Matched(..))
    }

    /// The matched value, discarding the remainder.
    pub fn value(self) -> Option<T> {
        match self {
            ParseOutcome::Matched(value, _) => Some(value),
            ParseOutcome::NoMatch => None,
        }
    }

    pub fn into_parts(self) -> Option<(T, C)> {
        match self {
            ParseOutcome::Matched(value, rest) => Some((value, rest)),
            ParseOutcome::NoMatch => None,
        }
    }
}

type ParseFn<C, T> = dyn Fn(C) -> ParseOutcome<T, C> + Send + Sync;

/// A reusable parser from cursor `C` to values of type `T`.
pub struct Parser<C, T> {
    run_fn: Arc<ParseFn<C, T>>,
}

impl<C, T> Clone for Parser<C, T> {
    fn clone(&self) -> Self {
        Parser {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<C: Cursor + 'static, T: 'static> Parser<C, T> {
    /// Wrap a parse function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(C) -> ParseOutcome<T, C> + Send + Sync + 'static,
    {
        Parser {
            run_fn: Arc::new(f),
        }
    }

    pub fn parse(&self, input: C) -> ParseOutcome<T, C> {
        (self.run_fn)(input)
    }

    /// Transform the matched value, keeping the remainder.
    pub fn map<U, F>(self, f: F) -> Parser<C, U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |input| match self.parse(input) {
            ParseOutcome::Matched(value, rest) => ParseOutcome::Matched(f(value), rest),
            ParseOutcome::NoMatch => ParseOutcome::NoMatch,
        })
    }

    /// Sequence: run `f(value)` on the remainder left by this parser.
    pub fn bind<U, F>(self, f: F) -> Parser<C, U>
    where
        U: 'static,
        F: Fn(T) -> Parser<C, U> + Send + Sync + 'static,
    {
        Parser::new(move |input| match self.parse(input) {
            ParseOutcome::Matched(value, rest) => f(value).parse(rest),
            ParseOutcome::NoMatch => ParseOutcome::NoMatch,
        })
    }

    /// Left-biased ordered choice. `other` sees the original input.
    pub fn or(self, other: Parser<C, T>) -> Parser<C, T> {
        Parser::new(move |input: C| match self.parse(input.clone()) {
            ParseOutcome::NoMatch => other.parse(input),
            matched => matched,
        })
    }

    /// Keep a match only when `pred` holds for its value.
    pub fn filter<F>(self, pred: F) -> Parser<C, T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Parser::new(move |input| match self.parse(input) {
            ParseOutcome::Matched(value, rest) if pred(&value) => {
                ParseOutcome::Matched(value, rest)
            }
            _ => ParseOutcome::NoMatch,
        })
    }

    /// Map and filter in one step; `None` turns the match into `NoMatch`.
    pub fn filter_map<U, F>(self, f: F) -> Parser<C, U>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        Parser::new(move |input| match self.parse(input) {
            ParseOutcome::Matched(value, rest) => match f(value) {
                Some(mapped) => ParseOutcome::Matched(mapped, rest),
                None => ParseOutcome::NoMatch,
            },
            ParseOutcome::NoMatch => ParseOutcome::NoMatch,
        })
    }

    /// Run `next` after this parser and pair both values.
    pub fn then<U: 'static>(self, next: Parser<C, U>) -> Parser<C, (T, U)> {
        Parser::new(move |input| match self.parse(input) {
            ParseOutcome::Matched(first, rest) => match next.parse(rest) {
                ParseOutcome::Matched(second, rest) => ParseOutcome::Matched((first, second), rest),
                ParseOutcome::NoMatch => ParseOutcome::NoMatch,
            },
            ParseOutcome::NoMatch => ParseOutcome::NoMatch,
        })
    }

    /// Run `next` after this parser, keeping only `next`'s value.
    pub fn ignore_then<U: 'static>(self, next: Parser<C, U>) -> Parser<C, U> {
        self.then(next).map(|(_, second)| second)
    }

    /// Run `next` after this parser, keeping only this parser's value.
    pub fn then_ignore<U: 'static>(self, next: Parser<C, U>) -> Parser<C, T> {
        self.then(next).map(|(first, _)| first)
    }

    /// Zero-or-one; never fails.
    pub fn optional(self) -> Parser<C, Option<T>> {
        Parser::new(move |input: C| match self.parse(input.clone()) {
            ParseOutcome::Matched(value, rest) => ParseOutcome::Matched(Some(value), rest),
            ParseOutcome::NoMatch => ParseOutcome::Matched(None, input),
        })
    }

    /// Record the cursor offsets spanned by a match.
    pub fn spanned(self) -> Parser<C, (T, std::ops::Range<usize>)> {
        Parser::new(move |input: C| {
            let start = input.offset();
            match self.parse(input) {
                ParseOutcome::Matched(value, rest) => {
                    let end = rest.offset();
                    ParseOutcome::Matched((value, start..end), rest)
                }
                ParseOutcome::NoMatch => ParseOutcome::NoMatch,
            }
        })
    }
}

/// Always matches `value` without consuming input.
pub fn succeed<C, T>(value: T) -> Parser<C, T>
where
    C: Cursor + 'static,
    T: Clone + Send + Sync + 'static,
{
    Parser::new(move |input| ParseOutcome::Matched(value.clone(), input))
}

/// Never matches.
pub fn fail<C: Cursor + 'static, T: 'static>() -> Parser<C, T> {
    Parser::new(|_| ParseOutcome::NoMatch)
}

/// Consume exactly one item when `pred` holds for it.
pub fn satisfy<C, F>(pred: F) -> Parser<C, C::Item>
where
    C: Cursor + 'static,
    C::Item: 'static,
    F: Fn(&C::Item) -> bool + Send + Sync + 'static,
{
    Parser::new(move |input: C| match input.next_item() {
        Some((item, rest)) if pred(&item) => ParseOutcome::Matched(item, rest),
        _ => ParseOutcome::NoMatch,
    })
}

/// Consume any single item.
pub fn any<C>() -> Parser<C, C::Item>
where
    C: Cursor + 'static,
    C::Item: 'static,
{
    satisfy(|_| true)
}

/// Match only at the end of input, consuming nothing.
pub fn end<C: Cursor + 'static>() -> Parser<C, ()> {
    Parser::new(|input: C| {
        if input.is_empty() {
            ParseOutcome::Matched((), input)
        } else {
            ParseOutcome::NoMatch
        }
    })
}

/// Zero-or-more repetitions. Never fails: when `parser` does not match at all
/// the result is `Matched([], input)`. Repetition stops as soon as an
/// iteration consumes nothing, so it cannot diverge.
pub fn repeat<C: Cursor + 'static, T: 'static>(parser: Parser<C, T>) -> Parser<C, Vec<T>> {
    Parser::new(move |input: C| {
        let mut values = Vec::new();
        let mut rest = input;
        while let ParseOutcome::Matched(value, next) = parser.parse(rest.clone()) {
            let progressed = next.remaining() < rest.remaining();
            values.push(value);
            rest = next;
            if !progressed {
                break;
            }
        }
        ParseOutcome::Matched(values, rest)
    })
}

/// One-or-more repetitions: the first match followed by [`repeat`].
pub fn repeat1<C: Cursor + 'static, T: 'static>(parser: Parser<C, T>) -> Parser<C, Vec<T>> {
    let tail = repeat(parser.clone());
    Parser::new(move |input| match parser.parse(input) {
        ParseOutcome::Matched(first, rest) => match tail.parse(rest) {
            ParseOutcome::Matched(mut values, rest) => {
                values.insert(0, first);
                ParseOutcome::Matched(values, rest)
            }
            ParseOutcome::NoMatch => ParseOutcome::NoMatch,
        },
        ParseOutcome::NoMatch => ParseOutcome::NoMatch,
    })
}

/// Try each parser in order on the same input; the first match wins.
pub fn first_match<C, T, I>(parsers: I) -> Parser<C, T>
where
    C: Cursor + 'static,
    T: 'static,
    I: IntoIterator<Item = Parser<C, T>>,
{
    let parsers: Vec<Parser<C, T>> = parsers.into_iter().collect();
    Parser::new(move |input: C| {
        parsers
            .iter()
            .map(|parser| parser.parse(input.clone()))
            .find(ParseOutcome::is_match)
            .unwrap_or(ParseOutcome::NoMatch)
    })
}
