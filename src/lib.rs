//! Symbol demangler for the legacy ARM C++ mangling scheme.
//!
//! The ARM scheme is the cfront-era encoding described in the annotated
//! C++ reference manual, still found in the symbol tables of older
//! toolchains. [`arm::parse`] turns one mangled symbol back into a
//! readable declaration. Malformed or unsupported symbols report a typed
//! [`arm::Error`] so callers can fall back to another scheme or print the
//! symbol unchanged.

use std::borrow::Cow;

pub mod arm;

/// Scratch buffer the demangler renders into.
///
/// Output is assembled as an ordered list of text fragments so that a
/// provisional fragment can be retracted while the surrounding name is
/// still being resolved. Flattening concatenates the fragments in push
/// order.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Cow<'static, str>>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self {
            tokens: Vec::with_capacity(16),
        }
    }

    /// Number of fragments pushed so far, used to mark the start of a
    /// fragment range.
    #[inline]
    pub fn mark(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn push(&mut self, text: &'static str) {
        self.tokens.push(Cow::Borrowed(text));
    }

    #[inline]
    pub fn push_string(&mut self, text: String) {
        self.tokens.push(Cow::Owned(text));
    }

    #[inline]
    pub fn push_cow(&mut self, text: Cow<'static, str>) {
        self.tokens.push(text);
    }

    /// Removes and returns the most recently pushed fragment.
    #[inline]
    pub fn pop(&mut self) -> Option<Cow<'static, str>> {
        self.tokens.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(|token| &token[..])
    }

    /// Flattened text of every fragment pushed since `mark`.
    pub fn text_from(&self, mark: usize) -> String {
        self.tokens[mark..].concat()
    }

    pub fn flatten(&self) -> String {
        self.tokens.concat()
    }
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}
