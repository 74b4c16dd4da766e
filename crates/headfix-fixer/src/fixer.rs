//! The header comment fixer
//!
//! One fix pass per file: any existing header in the prefix region is removed
//! first, then (if a non-empty header resolves for the file) a fresh header
//! comment is inserted at the configured anchor and the blank lines around it
//! are normalized to the exact configured counts.

use std::path::Path;

use headfix_core::{Token, TokenKind, TokenStream};

use crate::config::{CommentStyle, HeaderConfig, HeaderLocation};
use crate::header::HeaderResolver;

/// Synchronizes the header comment of one file's token stream.
///
/// The fixer never fails: malformed manifests fall back to the static header,
/// a file without an opening tag is left untouched, and an empty resolved
/// header means remove-only.
#[derive(Debug)]
pub struct HeaderCommentFixer {
    config: HeaderConfig,
    resolver: HeaderResolver,
}

impl HeaderCommentFixer {
    /// Create a fixer from a configuration
    pub fn new(config: HeaderConfig) -> Self {
        let resolver = HeaderResolver::new(&config);
        Self { config, resolver }
    }

    /// Create a fixer with a fixed `{year}` value, for deterministic output
    pub fn with_year(config: HeaderConfig, year: i32) -> Self {
        let resolver = HeaderResolver::with_year(&config, year);
        Self { config, resolver }
    }

    /// Replace the configuration wholesale. Drops the package cache, since
    /// cached names may have been produced under different package roots.
    pub fn configure(&mut self, config: HeaderConfig) {
        self.resolver = HeaderResolver::new(&config);
        self.config = config;
    }

    /// The active configuration
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// The per-file header resolver (exposes the package cache state)
    pub fn resolver(&self) -> &HeaderResolver {
        &self.resolver
    }

    /// Cheap pre-check: a stream without an opening tag can never be fixed
    pub fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.contains_kind(TokenKind::OpenTag)
    }

    /// Run one fix pass over `stream` for the file at `file_path`.
    ///
    /// With `enabled == false`, or when the resolved header text is empty,
    /// this only removes an existing header.
    pub fn fix(&mut self, stream: &mut TokenStream, file_path: &Path) {
        if !self.config.enabled {
            self.remove_header(stream);
            return;
        }

        self.remove_header(stream);

        let header_text = self.resolver.resolve(file_path);
        if header_text.is_empty() {
            return;
        }

        self.insert_header(stream, &header_text);
    }

    /// Remove an existing header comment plus its adjacent whitespace.
    ///
    /// Idempotent: a second call finds nothing and is a no-op.
    pub fn remove_header(&self, stream: &mut TokenStream) {
        let Some(header_index) = self.find_existing_header(stream) else {
            return;
        };

        if let Some(prev) = stream.prev_occupied(header_index) {
            if stream.get(prev).is_some_and(Token::is_whitespace) {
                stream.clear_at(prev);
            }
        }

        stream.clear_at(header_index);

        // clear the contiguous whitespace run after the header so no stray
        // blank lines are left behind
        let mut index = header_index + 1;
        while index < stream.len() {
            match stream.get(index) {
                None => {}
                Some(token) if token.is_whitespace() => stream.clear_at(index),
                Some(_) => break,
            }
            index += 1;
        }
    }

    /// Find the index of an existing header comment, if any.
    ///
    /// A header is the first plain block comment (`/*` but not `/**`) sitting
    /// in the prefix region after the anchor, before any real code. A doc
    /// comment or line comment in that position is skipped over; the scan
    /// stops at the first token that is neither whitespace nor a comment.
    /// Note this cannot tell a managed header apart from an unrelated legacy
    /// block comment in the same position; such a comment gets replaced.
    fn find_existing_header(&self, stream: &TokenStream) -> Option<usize> {
        if stream.get(0)?.kind() != TokenKind::OpenTag {
            return None;
        }

        let mut search_from = 1;
        if let Some(declare) = stream.next_of_kind(0, TokenKind::Declare) {
            if let Some(semicolon) = stream.next_of_kind(declare, TokenKind::Semicolon) {
                search_from = semicolon + 1;
            }
        }

        let mut index = search_from;
        while index < stream.len() {
            match stream.get(index) {
                None => {}
                Some(token) if token.is_whitespace() => {}
                Some(token) if token.kind().is_comment() => {
                    let content = token.content();
                    if content.starts_with("/*") && !content.starts_with("/**") {
                        return Some(index);
                    }
                }
                Some(_) => break,
            }
            index += 1;
        }
        None
    }

    /// Find the index where the header must be inserted, or `None` when the
    /// stream does not start with an opening tag.
    fn insertion_point(&self, stream: &TokenStream) -> Option<usize> {
        if stream.get(0)?.kind() != TokenKind::OpenTag {
            return None;
        }

        if self.config.location == HeaderLocation::AfterDeclareStrict {
            if let Some(declare) = stream.next_of_kind(0, TokenKind::Declare) {
                if let Some(semicolon) = stream.next_of_kind(declare, TokenKind::Semicolon) {
                    return Some(stream.skip_whitespace(semicolon + 1));
                }
            }
            // no declare statement: fall through to after-open placement
        }

        Some(stream.skip_whitespace(1))
    }

    fn insert_header(&self, stream: &mut TokenStream, header_text: &str) {
        self.remove_header(stream);

        let comment = self.build_header_comment(header_text);
        if comment.is_empty() {
            return;
        }

        let Some(index) = self.insertion_point(stream) else {
            return;
        };

        let kind = match self.config.comment_style {
            CommentStyle::Block => TokenKind::Comment,
            CommentStyle::Doc => TokenKind::DocComment,
        };
        stream.insert_at(index, Token::new(kind, comment));

        self.normalize_whitespace(stream, index);
    }

    /// Render the header text as a comment token's content. Empty text (after
    /// trimming) yields an empty string, which callers treat as "no header".
    fn build_header_comment(&self, header_text: &str) -> String {
        let text = header_text.replace('\r', "");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let opener = match self.config.comment_style {
            CommentStyle::Block => "/*",
            CommentStyle::Doc => "/**",
        };

        let mut comment = String::from(opener);
        comment.push('\n');
        for line in trimmed.split('\n') {
            comment.push_str(format!(" * {line}").trim_end());
            comment.push('\n');
        }
        comment.push_str(" */");
        comment
    }

    /// Enforce the exact blank line counts around the header at `header_index`.
    ///
    /// The run after the header is fixed first so its indices are not shifted
    /// by the leading insertion.
    fn normalize_whitespace(&self, stream: &mut TokenStream, header_index: usize) {
        self.normalize_after(stream, header_index);
        self.normalize_before(stream, header_index);
    }

    fn normalize_after(&self, stream: &mut TokenStream, header_index: usize) {
        let has_next = stream.next_non_whitespace(header_index).is_some();
        let expected = if self.config.separate.below() && has_next { 2 } else { 1 };
        let actual = line_break_count_after(stream, header_index);

        if actual < expected {
            let missing = "\n".repeat(expected - actual);
            let following_whitespace = stream
                .next_occupied(header_index)
                .filter(|&i| stream.get(i).is_some_and(Token::is_whitespace));
            match following_whitespace {
                Some(next) => {
                    let existing = stream.get(next).map(Token::content).unwrap_or_default();
                    let content = format!("{missing}{existing}");
                    stream.set(next, Token::new(TokenKind::Whitespace, content));
                }
                None => {
                    stream.insert_at(header_index + 1, Token::new(TokenKind::Whitespace, missing));
                }
            }
        } else if actual > expected {
            if let Some(next) = stream.next_occupied(header_index) {
                if let Some(mut content) = stream
                    .get(next)
                    .filter(|token| token.is_whitespace())
                    .map(|token| token.content().to_string())
                {
                    let mut excess = actual - expected;
                    while excess > 0 && content.starts_with('\n') {
                        content.remove(0);
                        excess -= 1;
                    }
                    if content.is_empty() {
                        stream.clear_at(next);
                    } else {
                        stream.set(next, Token::new(TokenKind::Whitespace, content));
                    }
                }
            }
        }
    }

    fn normalize_before(&self, stream: &mut TokenStream, header_index: usize) {
        // an open tag ending in horizontal whitespace (`<?php `) gets that
        // whitespace rewritten to a single newline before counting
        if let Some(prev) = stream.prev_non_whitespace(header_index) {
            if let Some(token) = stream.get(prev) {
                if token.kind() == TokenKind::OpenTag
                    && token.content().ends_with([' ', '\t'])
                {
                    let rewritten = format!(
                        "{}\n",
                        token.content().trim_end_matches([' ', '\t'])
                    );
                    stream.set(prev, Token::new(TokenKind::OpenTag, rewritten));
                }
            }
        }

        let expected = if self.config.separate.above() { 2 } else { 1 };
        let actual = line_break_count_before(stream, header_index);

        if actual < expected {
            let missing = "\n".repeat(expected - actual);
            stream.insert_at(header_index, Token::new(TokenKind::Whitespace, missing));
        } else if actual > expected {
            if let Some(prev) = stream.prev_occupied(header_index) {
                if let Some(mut content) = stream
                    .get(prev)
                    .filter(|token| token.is_whitespace())
                    .map(|token| token.content().to_string())
                {
                    let mut excess = actual - expected;
                    while excess > 0 && content.ends_with('\n') {
                        content.pop();
                        excess -= 1;
                    }
                    if content.is_empty() {
                        stream.clear_at(prev);
                    } else {
                        stream.set(prev, Token::new(TokenKind::Whitespace, content));
                    }
                }
            }
        }
    }
}

/// Newlines in the contiguous whitespace run after `index`. Cleared slots are
/// skipped; the run ends at the first occupied non-whitespace token.
fn line_break_count_after(stream: &TokenStream, index: usize) -> usize {
    let mut count = 0;
    for i in index + 1..stream.len() {
        match stream.get(i) {
            None => {}
            Some(token) if token.is_whitespace() => count += token.newline_count(),
            Some(_) => break,
        }
    }
    count
}

/// Newlines in the whitespace run before `index`. When the run reaches the
/// opening tag, newlines embedded in the tag's content count too.
fn line_break_count_before(stream: &TokenStream, index: usize) -> usize {
    let mut count = 0;
    for i in (0..index.min(stream.len())).rev() {
        match stream.get(i) {
            None => {}
            Some(token) if token.is_whitespace() => count += token.newline_count(),
            Some(token) if token.kind() == TokenKind::OpenTag => {
                count += token.newline_count();
                break;
            }
            Some(_) => break,
        }
    }
    count
}
