//! Path suffix → ordered token list.

/// Ordered, trimmed, non-empty path segments that have not been consumed yet.
///
/// Extraction steps never mutate a shared list: they take `Tokens` by value and
/// hand back the reduced set, see [`Tokens::without`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    /// Split `inner_path` on `/`, trim each segment and drop empty ones.
    ///
    /// Order is preserved so "first remaining token" stays well defined.
    pub fn tokenize(inner_path: &str) -> Self {
        Tokens(
            inner_path
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Tokens in original order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of remaining tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First remaining token, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Position of the first token equal to `value`.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.0.iter().position(|t| t == value)
    }

    /// The same tokens minus those at `consumed` positions.
    pub fn without(self, consumed: &[usize]) -> Self {
        Tokens(
            self.0
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !consumed.contains(i))
                .map(|(_, t)| t)
                .collect(),
        )
    }

    /// Give back the underlying vector.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Tokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tokens(iter.into_iter().map(Into::into).collect())
    }
}
