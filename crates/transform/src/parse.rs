//! Comment stripping and block-structure parsing.
//!
//! The parser only recovers the brace structure of the input. Declarations
//! and preludes are kept as trimmed text; nothing below the statement level
//! is validated.

use crate::error::{Result, TransformError};

/// One statement of the parsed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
	/// Text terminated by `;` or by the end of its block.
	Statement(String),
	/// `prelude { children }`.
	Block { prelude: String, children: Vec<Node> },
}

/// Removes `/* ... */` comments and lines whose first non-blank characters
/// are `//`.
pub(crate) fn strip_comments(css: &str) -> Result<String> {
	let mut without_lines = String::with_capacity(css.len());
	for line in css.split_inclusive('\n') {
		if line.trim_start().starts_with("//") {
			if line.ends_with('\n') {
				without_lines.push('\n');
			}
			continue;
		}
		without_lines.push_str(line);
	}

	let bytes = without_lines.as_bytes();
	let mut out = String::with_capacity(without_lines.len());
	let mut copied = 0;
	let mut pos = 0;
	let mut quote: Option<u8> = None;

	while pos < bytes.len() {
		let b = bytes[pos];
		match quote {
			Some(q) => {
				if b == b'\\' {
					pos += 1;
				} else if b == q {
					quote = None;
				}
			}
			None if b == b'"' || b == b'\'' => quote = Some(b),
			None if b == b'/' && bytes.get(pos + 1) == Some(&b'*') => {
				let end = without_lines[pos + 2..]
					.find("*/")
					.ok_or(TransformError::UnterminatedComment { offset: pos })?;
				out.push_str(&without_lines[copied..pos]);
				pos += 2 + end + 2;
				copied = pos;
				continue;
			}
			None => {}
		}
		pos += 1;
	}
	out.push_str(&without_lines[copied.min(without_lines.len())..]);
	Ok(out)
}

/// Parses comment-free CSS into a statement tree.
pub(crate) fn parse(css: &str) -> Result<Vec<Node>> {
	let mut parser = Parser {
		src: css,
		bytes: css.as_bytes(),
		pos: 0,
	};
	parser.nodes(None)
}

struct Parser<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
}

impl Parser<'_> {
	/// Parses statements until the closing brace of `open` (or the end of
	/// input at the top level).
	fn nodes(&mut self, open: Option<&str>) -> Result<Vec<Node>> {
		let mut nodes = Vec::new();
		let mut start = self.pos;
		let mut parens = 0usize;

		while self.pos < self.bytes.len() {
			let b = self.bytes[self.pos];
			match b {
				b'"' | b'\'' => {
					self.skip_string(b)?;
					continue;
				}
				b'(' | b'[' => parens += 1,
				b')' | b']' => parens = parens.saturating_sub(1),
				b';' if parens == 0 => {
					push_statement(&mut nodes, &self.src[start..self.pos]);
					start = self.pos + 1;
				}
				b'{' if parens == 0 => {
					let prelude = collapse_whitespace(&self.src[start..self.pos]);
					self.pos += 1;
					let children = self.nodes(Some(&prelude))?;
					nodes.push(Node::Block { prelude, children });
					start = self.pos;
					continue;
				}
				b'}' if parens == 0 => {
					if open.is_none() {
						return Err(TransformError::UnbalancedBrace { offset: self.pos });
					}
					push_statement(&mut nodes, &self.src[start..self.pos]);
					self.pos += 1;
					return Ok(nodes);
				}
				_ => {}
			}
			self.pos += 1;
		}

		if let Some(prelude) = open {
			return Err(TransformError::UnclosedBlock {
				prelude: prelude.to_string(),
			});
		}
		push_statement(&mut nodes, &self.src[start..]);
		Ok(nodes)
	}

	fn skip_string(&mut self, quote: u8) -> Result<()> {
		let offset = self.pos;
		self.pos += 1;
		while self.pos < self.bytes.len() {
			match self.bytes[self.pos] {
				b'\\' => self.pos += 2,
				b if b == quote => {
					self.pos += 1;
					return Ok(());
				}
				_ => self.pos += 1,
			}
		}
		Err(TransformError::UnterminatedString { offset })
	}
}

fn push_statement(nodes: &mut Vec<Node>, text: &str) {
	let text = text.trim();
	if !text.is_empty() {
		nodes.push(Node::Statement(text.to_string()));
	}
}

/// Collapses runs of ASCII whitespace to one space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
	text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `text` on commas that are not nested in parentheses, brackets or
/// strings.
pub(crate) fn split_top_level_commas(text: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0usize;
	let mut quote: Option<char> = None;
	let mut start = 0;
	for (i, c) in text.char_indices() {
		match (quote, c) {
			(Some(q), c) if c == q => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(c),
			(None, '(' | '[') => depth += 1,
			(None, ')' | ']') => depth = depth.saturating_sub(1),
			(None, ',') if depth == 0 => {
				parts.push(&text[start..i]);
				start = i + 1;
			}
			_ => {}
		}
	}
	parts.push(&text[start..]);
	parts
}
