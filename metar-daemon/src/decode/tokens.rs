//! Whitespace token stream over the raw report text.

/// The tokens of one raw report, in order.
///
/// Extractors only look things up by predicate or index; nothing is ever
/// removed, so every extractor sees the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// Split raw report text on whitespace. Repeated spaces yield no empty
    /// tokens.
    pub fn split(raw: &'a str) -> Self {
        Self {
            items: raw.split_whitespace().collect(),
        }
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First token matching `pred`.
    pub fn find(&self, pred: impl Fn(&str) -> bool) -> Option<&'a str> {
        self.items.iter().copied().find(|t| pred(t))
    }

    /// Index of the first token equal to `literal`.
    pub fn position(&self, literal: &str) -> Option<usize> {
        self.items.iter().position(|t| *t == literal)
    }

    /// All tokens after `index`.
    pub fn after(&self, index: usize) -> &[&'a str] {
        self.items.get(index + 1..).unwrap_or(&[])
    }
}
