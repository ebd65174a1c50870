use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;

struct Named(&'static str);

impl Stage for Named {
	fn name(&self) -> &str {
		self.0
	}

	fn apply(&self, _rule: &mut StyleRule, _cx: &StageContext<'_>) {}
}

struct Uppercase;

impl Stage for Uppercase {
	fn name(&self) -> &str {
		"uppercase-values"
	}

	fn apply(&self, rule: &mut StyleRule, _cx: &StageContext<'_>) {
		for decl in &mut rule.declarations {
			decl.value = decl.value.to_uppercase();
		}
	}
}

#[test]
fn test_self_reference_sibling_is_substituted() {
	let out = Transformer::new()
		.transform("& + & { color: red; }", Some(".y1"), None, Some("x1"))
		.unwrap();
	assert_eq!(out, vec![".y1 + .x1{color:red;}"]);
}

#[test]
fn test_consecutive_self_reference_is_untouched() {
	let out = Transformer::new()
		.transform("&& { color: red; }", Some(".y1"), None, Some("x1"))
		.unwrap();
	assert_eq!(out, vec![".y1.y1{color:red;}"]);
}

#[test]
fn test_without_scoping_id_nothing_is_substituted() {
	let out = Transformer::new()
		.transform("& + & { color: red; }", Some(".y1"), None, None)
		.unwrap();
	assert_eq!(out, vec![".y1 + .y1{color:red;}"]);
}

#[test]
fn test_flat_component_css() {
	let css = "
		color: red;
		// padding: 3px;
		&:hover { color: blue; }
		@media (min-width: 500px) { font-size: 2em; }
	";
	let out = Transformer::new()
		.transform(css, Some(".abc"), None, Some("Button-x"))
		.unwrap();
	assert_eq!(
		out,
		vec![
			".abc{color:red;}",
			".abc:hover{color:blue;}",
			"@media (min-width: 500px){.abc{font-size:2em;}}",
		]
	);
}

#[test]
fn test_keyframes_prefix() {
	let out = Transformer::new()
		.transform("from { opacity: 0; } to { opacity: 1; }", Some("fade"), Some("@keyframes"), None)
		.unwrap();
	assert_eq!(out, vec!["@keyframes fade{from{opacity:0;}to{opacity:1;}}"]);
}

#[test]
fn test_empty_input_yields_no_rules() {
	let out = Transformer::new().transform("  ", Some(".a"), None, None).unwrap();
	assert!(out.is_empty());
}

#[test]
fn test_malformed_input_fails_fast() {
	let err = Transformer::new()
		.transform("&:hover { color: red;", Some(".a"), None, None)
		.unwrap_err();
	assert_eq!(
		err,
		TransformError::UnclosedBlock {
			prelude: "&:hover".into()
		}
	);
}

#[test]
fn test_unnamed_stage_rejected_at_construction() {
	let err = Transformer::with_stages(vec![Arc::new(Named("ok")), Arc::new(Named("  "))]).unwrap_err();
	assert_eq!(err, TransformError::UnnamedStage { index: 1 });
}

#[test]
fn test_config_hash_tracks_stage_names_and_order() {
	let none = Transformer::new();
	let ab = Transformer::with_stages(vec![Arc::new(Named("a")), Arc::new(Named("b"))]).unwrap();
	let ba = Transformer::with_stages(vec![Arc::new(Named("b")), Arc::new(Named("a"))]).unwrap();
	let ab_again = Transformer::with_stages(vec![Arc::new(Named("a")), Arc::new(Named("b"))]).unwrap();

	assert_eq!(none.config_hash(), None);
	assert!(ab.config_hash().is_some());
	assert_ne!(ab.config_hash(), ba.config_hash());
	assert_eq!(ab.config_hash(), ab_again.config_hash());
}

#[test]
fn test_user_stages_run_before_substitution() {
	let transformer = Transformer::with_stages(vec![Arc::new(Uppercase)]).unwrap();
	let out = transformer
		.transform("color: red; & ~ & { color: blue; }", Some(".a"), None, Some("id"))
		.unwrap();
	assert_eq!(out, vec![".a{color:RED;}", ".a ~ .id{color:BLUE;}"]);
	assert_eq!(transformer.stage_names().collect::<Vec<_>>(), vec!["uppercase-values"]);
}
