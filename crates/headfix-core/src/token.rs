//! Token value type and kind tags

/// Kind tag for a single token.
///
/// This is the closed set of kinds the header fixer distinguishes. Everything
/// the fixer does not care about (names, operators, literals, ...) is
/// [`TokenKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The opening tag of the file (`<?php`, possibly with trailing whitespace)
    OpenTag,
    /// A non-doc comment (`/* ... */`, `// ...`, `# ...`)
    Comment,
    /// A doc comment (`/** ... */`)
    DocComment,
    /// A run of whitespace
    Whitespace,
    /// The `declare` keyword
    Declare,
    /// A statement-terminating `;`
    Semicolon,
    /// Any other token
    Other,
}

impl TokenKind {
    /// Whether this kind is a comment of either flavor
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DocComment)
    }
}

/// A single token: a kind tag plus its raw source text.
///
/// Content is the verbatim source slice, including comment delimiters and any
/// embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    content: String,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// The kind tag
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw source text
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Whether this is a whitespace token
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Number of newline characters in the token's content
    pub fn newline_count(&self) -> usize {
        self.content.matches('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_comment() {
        assert!(TokenKind::Comment.is_comment());
        assert!(TokenKind::DocComment.is_comment());
        assert!(!TokenKind::Whitespace.is_comment());
        assert!(!TokenKind::OpenTag.is_comment());
    }

    #[test]
    fn test_newline_count() {
        assert_eq!(Token::new(TokenKind::Whitespace, "\n\n").newline_count(), 2);
        assert_eq!(Token::new(TokenKind::OpenTag, "<?php\n").newline_count(), 1);
        assert_eq!(Token::new(TokenKind::Other, "namespace").newline_count(), 0);
    }

    #[test]
    fn test_is_whitespace() {
        assert!(Token::new(TokenKind::Whitespace, " ").is_whitespace());
        assert!(!Token::new(TokenKind::Other, " ").is_whitespace());
    }
}
