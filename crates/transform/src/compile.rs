//! Expands the parsed statement tree into flat top-level rules.
//!
//! Declarations of a block are emitted as one rule ahead of the block's
//! nested rules, regardless of where they appear between nested blocks.

use crate::parse::{Node, collapse_whitespace, split_top_level_commas};
use crate::rule::{CssRule, Declaration, StyleRule};

/// At-rules whose body is more rules for the current selector.
const CONDITIONAL_AT_RULES: &[&str] = &[
	"media",
	"supports",
	"container",
	"document",
	"-moz-document",
	"layer",
];

pub(crate) fn compile(nodes: &[Node], root_selectors: &[String]) -> Vec<CssRule> {
	let mut rules = Vec::new();
	compile_block(&mut rules, nodes, root_selectors, &[]);
	rules
}

fn compile_block(out: &mut Vec<CssRule>, nodes: &[Node], selectors: &[String], conditions: &[String]) {
	let mut declarations = Vec::new();
	let mut bare = Vec::new();
	for node in nodes {
		let Node::Statement(text) = node else { continue };
		if selectors.is_empty() {
			bare.push(statement_text(text));
			continue;
		}
		match Declaration::parse(text) {
			Some(decl) => declarations.push(decl),
			None => tracing::trace!(statement = %text, "dropping non-declaration statement"),
		}
	}

	if !declarations.is_empty() {
		out.push(CssRule::Style(StyleRule {
			conditions: conditions.to_vec(),
			selectors: selectors.to_vec(),
			declarations,
		}));
	}
	for text in bare {
		out.push(CssRule::Verbatim {
			conditions: conditions.to_vec(),
			text,
		});
	}

	for node in nodes {
		let Node::Block { prelude, children } = node else { continue };
		match at_keyword(prelude) {
			Some(keyword) if CONDITIONAL_AT_RULES.contains(&keyword.as_str()) => {
				let mut nested = conditions.to_vec();
				nested.push(prelude.clone());
				compile_block(out, children, selectors, &nested);
			}
			Some(_) => out.push(CssRule::Verbatim {
				conditions: conditions.to_vec(),
				text: serialize_block(prelude, children),
			}),
			None => {
				let nested = nest_selectors(selectors, prelude);
				if nested.is_empty() {
					continue;
				}
				compile_block(out, children, &nested, conditions);
			}
		}
	}
}

fn at_keyword(prelude: &str) -> Option<String> {
	let rest = prelude.strip_prefix('@')?;
	let end = rest
		.find(|c: char| c.is_ascii_whitespace() || c == '(')
		.unwrap_or(rest.len());
	Some(rest[..end].to_ascii_lowercase())
}

fn statement_text(text: &str) -> String {
	match Declaration::parse(text) {
		Some(decl) if !text.starts_with('@') => decl.to_string(),
		_ => format!("{};", collapse_whitespace(text)),
	}
}

fn serialize_block(prelude: &str, children: &[Node]) -> String {
	let mut text = format!("{prelude}{{");
	for child in children {
		match child {
			Node::Statement(stmt) => text.push_str(&statement_text(stmt)),
			Node::Block { prelude, children } => text.push_str(&serialize_block(prelude, children)),
		}
	}
	text.push('}');
	text
}

/// Combines every parent selector with every selector of `prelude`.
///
/// `&` stands for the parent; a leading pseudo-class attaches directly to
/// the parent; anything else becomes a descendant (combinators such as
/// `> a` read naturally as `parent > a`).
pub(crate) fn nest_selectors(parents: &[String], prelude: &str) -> Vec<String> {
	let children: Vec<String> = split_top_level_commas(prelude)
		.into_iter()
		.map(collapse_whitespace)
		.filter(|child| !child.is_empty())
		.collect();

	if parents.is_empty() {
		return children
			.into_iter()
			.map(|child| collapse_whitespace(&child.replace('&', "")))
			.filter(|child| !child.is_empty())
			.collect();
	}

	let mut nested = Vec::with_capacity(children.len() * parents.len());
	for child in &children {
		for parent in parents {
			let selector = if child.contains('&') {
				child.replace('&', parent)
			} else if child.starts_with(':') {
				format!("{parent}{child}")
			} else {
				format!("{parent} {child}")
			};
			nested.push(selector);
		}
	}
	nested
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::parse::parse;

	fn render(css: &str, root: &[&str]) -> Vec<String> {
		let root: Vec<String> = root.iter().map(|s| s.to_string()).collect();
		compile(&parse(css).unwrap(), &root)
			.iter()
			.map(ToString::to_string)
			.collect()
	}

	#[test]
	fn test_declarations_hoist_before_nested_rules() {
		assert_eq!(
			render("color: red; &:hover { color: blue; } margin: 0;", &[".a"]),
			vec![".a{color:red;margin:0;}", ".a:hover{color:blue;}"]
		);
	}

	#[test]
	fn test_descendant_and_combinator_nesting() {
		assert_eq!(
			render("span { color: red; } > b { color: blue; }", &[".a"]),
			vec![".a span{color:red;}", ".a > b{color:blue;}"]
		);
	}

	#[test]
	fn test_parent_reference_in_the_middle() {
		assert_eq!(
			render(".dark & { color: white; }", &[".a"]),
			vec![".dark .a{color:white;}"]
		);
	}

	#[test]
	fn test_media_wraps_current_selector() {
		assert_eq!(
			render("@media (max-width: 10px) { color: red; &:focus { outline: 0; } }", &[".a"]),
			vec![
				"@media (max-width: 10px){.a{color:red;}}",
				"@media (max-width: 10px){.a:focus{outline:0;}}",
			]
		);
	}

	#[test]
	fn test_keyframes_pass_through() {
		assert_eq!(
			render("@keyframes spin { from { opacity: 0; } to { opacity: 1; } }", &[]),
			vec!["@keyframes spin{from{opacity:0;}to{opacity:1;}}"]
		);
	}

	#[test]
	fn test_selector_lists_multiply() {
		assert_eq!(
			nest_selectors(&[".a".into(), ".b".into()], "&:hover, span"),
			vec![".a:hover", ".b:hover", ".a span", ".b span"]
		);
	}

	#[test]
	fn test_root_statements_without_selector() {
		assert_eq!(render("@import url(x.css);", &[]), vec!["@import url(x.css);"]);
	}
}
