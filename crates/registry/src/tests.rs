use pretty_assertions::assert_eq;
use rstest::rstest;
use tincture_primitives::{ComponentId, GeneratedName};

use super::*;

fn id(s: &str) -> ComponentId {
	ComponentId::from(s)
}

fn name(s: &str) -> GeneratedName {
	GeneratedName::from(s)
}

fn rule(name: &str, decl: &str) -> String {
	format!(".{name}{{{decl}}}")
}

fn registry(strategy: Strategy) -> StyleRegistry {
	StyleRegistry::new(RegistryOptions::default().with_strategy(strategy))
}

/// Position of `needle` in the materialized sheet, panicking if absent.
fn pos(css: &str, needle: &str) -> usize {
	css.find(needle)
		.unwrap_or_else(|| panic!("{needle:?} missing from {css:?}"))
}

#[rstest]
#[case(Strategy::Direct)]
#[case(Strategy::Text)]
fn test_insert_is_idempotent(#[case] strategy: Strategy) {
	let mut reg = registry(strategy);
	let (a, x) = (id("A"), name("x"));
	reg.register_id(&a);

	assert!(!reg.has_name("A", "x"));
	assert!(reg.insert(&a, &x, vec![rule("x", "color:red;")]));
	assert!(reg.has_name("A", "x"));
	assert!(!reg.insert(&a, &x, vec![rule("x", "color:red;")]));
	assert!(reg.has_name("A", "x"));

	assert_eq!(reg.tags()[0].rule_count(), 1);
	assert_eq!(reg.to_css().matches(".x{color:red;}").count(), 1);
}

#[rstest]
#[case(Strategy::Direct)]
#[case(Strategy::Text)]
fn test_registration_order_wins_over_insertion_order(#[case] strategy: Strategy) {
	let mut reg = registry(strategy);
	let (a, b) = (id("A"), id("B"));
	reg.register_id(&a);
	reg.register_id(&b);

	reg.insert(&b, &name("bb"), vec![rule("bb", "color:blue;")]);
	reg.insert(&a, &name("aa"), vec![rule("aa", "color:red;")]);
	reg.insert(&b, &name("bc"), vec![rule("bc", "color:green;")]);
	reg.insert(&a, &name("ab"), vec![rule("ab", "margin:0;"), rule("ab:hover", "margin:1px;")]);

	let css = reg.to_css();
	assert!(pos(&css, ".aa{") < pos(&css, ".ab{"));
	assert!(pos(&css, ".ab{") < pos(&css, ".ab:hover{"));
	assert!(pos(&css, ".ab:hover{") < pos(&css, ".bb{"));
	assert!(pos(&css, ".bb{") < pos(&css, ".bc{"));
	assert_eq!(reg.ids().map(ComponentId::as_str).collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_direct_strategy_tracks_indices() {
	let mut reg = registry(Strategy::Direct);
	for group in ["A", "B", "C"] {
		reg.register_id(&id(group));
	}
	reg.insert(&id("C"), &name("c"), vec![rule("c", "top:0;")]);
	reg.insert(&id("A"), &name("a"), vec![rule("a", "top:1px;")]);
	reg.insert(&id("B"), &name("b"), vec![rule("b", "top:2px;")]);
	reg.insert(&id("A"), &name("a2"), vec![rule("a2", "top:3px;")]);

	assert_eq!(
		reg.tags()[0].rules(),
		[".a{top:1px;}", ".a2{top:3px;}", ".b{top:2px;}", ".c{top:0;}"]
	);
	assert_eq!(reg.group("A").map(Group::cursor), Some(2));
}

#[rstest]
#[case(Strategy::Direct)]
#[case(Strategy::Text)]
fn test_order_holds_across_chained_tags(#[case] strategy: Strategy) {
	let options = RegistryOptions {
		strategy,
		max_groups_per_tag: 2,
		..RegistryOptions::default()
	};
	let mut reg = StyleRegistry::new(options);
	let groups = ["A", "B", "C", "D", "E"];
	for group in groups {
		reg.register_id(&id(group));
	}
	assert_eq!(reg.tags().len(), 3);
	assert_eq!(
		reg.tags().iter().map(|t| t.marker().index).collect::<Vec<_>>(),
		vec![0, 1, 2]
	);

	for group in groups.iter().rev() {
		let n = group.to_lowercase();
		reg.insert(&id(group), &name(&n), vec![rule(&n, "color:red;")]);
	}

	let css = reg.to_css();
	for pair in groups.windows(2) {
		let (first, second) = (pair[0].to_lowercase(), pair[1].to_lowercase());
		assert!(pos(&css, &format!(".{first}{{")) < pos(&css, &format!(".{second}{{")));
	}
}

#[test]
fn test_rule_ceiling_opens_new_tag() {
	let options = RegistryOptions {
		max_rules_per_tag: 2,
		..RegistryOptions::default()
	};
	let mut reg = StyleRegistry::new(options);
	reg.insert(&id("A"), &name("a"), vec![rule("a", "top:0;"), rule("a:hover", "top:1px;")]);
	reg.register_id(&id("B"));
	assert_eq!(reg.group("A").map(Group::tag), Some(0));
	assert_eq!(reg.group("B").map(Group::tag), Some(1));
}

#[test]
fn test_same_name_tracked_per_identifier() {
	let mut reg = registry(Strategy::Direct);
	let shared = name("abc");
	reg.register_id(&id("D1"));
	reg.register_id(&id("D2"));

	assert!(reg.insert(&id("D1"), &shared, vec![rule("abc", "color:red;")]));
	assert!(!reg.has_name("D2", "abc"));
	assert!(reg.insert(&id("D2"), &shared, vec![rule("abc", "color:red;")]));
	assert_eq!(reg.tags()[0].rule_count(), 2);
}

#[test]
fn test_insert_registers_unknown_identifier() {
	let mut reg = registry(Strategy::Direct);
	reg.register_id(&id("A"));
	assert!(reg.insert(&id("Z"), &name("z"), vec![rule("z", "top:0;")]));
	assert_eq!(reg.ids().map(ComponentId::as_str).collect::<Vec<_>>(), vec!["A", "Z"]);
}

#[test]
fn test_rejected_rule_degrades_to_empty_block() {
	let mut reg = registry(Strategy::Direct);
	assert!(reg.insert(&id("A"), &name("a"), vec!["color:red;".into()]));
	assert!(reg.has_name("A", "a"));
	assert_eq!(reg.tags()[0].rule_count(), 0);
	assert_eq!(reg.group("A").map(Group::cursor), Some(0));
}

#[test]
fn test_clone_is_isolated() {
	let mut reg = registry(Strategy::Direct);
	reg.register_id(&id("A"));
	reg.register_id(&id("B"));

	let mut pass = reg.clone();
	pass.insert(&id("B"), &name("b"), vec![rule("b", "top:0;")]);

	assert!(pass.has_name("B", "b"));
	assert!(!reg.has_name("B", "b"));
	assert_eq!(reg.to_css(), "");
	assert_eq!(pass.ids().collect::<Vec<_>>(), reg.ids().collect::<Vec<_>>());
}

#[test]
fn test_reset_empties_registry() {
	let mut reg = registry(Strategy::Text);
	reg.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);
	reg.reset();
	assert!(reg.is_empty());
	assert!(reg.tags().is_empty());
	assert!(!reg.has_name("A", "a"));
	assert!(reg.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]));
}

#[test]
fn test_text_tag_has_group_markers() {
	let mut reg = registry(Strategy::Text);
	reg.register_id(&id("A"));
	reg.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);
	assert_eq!(reg.to_css(), "/* tc-component-id: A */\n.a{top:0;}/*!tc*/\n");
}

#[test]
fn test_output_sheet_format() {
	let mut reg = registry(Strategy::Direct);
	reg.register_id(&id("A"));
	reg.register_id(&id("B"));
	reg.insert(&id("A"), &name("x"), vec![rule("x", "color:red;")]);
	reg.insert(&id("A"), &name("y"), vec![]);

	assert_eq!(
		reg.output_sheet(),
		".x{color:red;}/*!tc*/\ndata-tincture.g0[id=\"A\"]{content:\"x,y,\"}/*!tc*/\n"
	);
}

#[test]
fn test_manifest_round_trip_suppresses_regeneration() {
	let mut server = registry(Strategy::Direct);
	server.register_id(&id("A"));
	server.register_id(&id("B"));
	server.insert(&id("B"), &name("b"), vec![rule("b", "top:0;")]);
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:1px;"), rule("a:hover", "top:2px;")]);

	let json = server.manifest().to_json().unwrap();
	let manifest = Manifest::from_json(&json).unwrap();
	assert_eq!(manifest.names.len(), 2);

	let mut client = StyleRegistry::from_manifest(RegistryOptions::default(), &manifest);
	assert!(client.has_name("A", "a"));
	assert!(client.has_name("B", "b"));
	assert!(!client.insert(&id("A"), &name("a"), vec![rule("a", "top:1px;")]));
	assert_eq!(client.ids().map(ComponentId::as_str).collect::<Vec<_>>(), vec!["A", "B"]);
	assert_eq!(client.to_css(), server.to_css());
	assert_eq!(client.output_sheet(), server.output_sheet());
}

#[test]
fn test_stale_host_styles_are_skipped() {
	let mut server = registry(Strategy::Direct);
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);
	let mut styles = server.host_styles();
	styles[0].version = Some("0.0.0-old".into());
	styles.push(HostStyle {
		version: None,
		css: styles[0].css.clone(),
	});

	let mut client = registry(Strategy::Direct);
	assert_eq!(client.rehydrate(&styles), 0);
	assert!(client.is_empty());
}

#[test]
fn test_host_styles_rehydrate_across_tags() {
	let options = RegistryOptions {
		max_groups_per_tag: 1,
		..RegistryOptions::default()
	};
	let mut server = StyleRegistry::new(options.clone());
	server.register_id(&id("A"));
	server.register_id(&id("B"));
	server.insert(&id("B"), &name("b"), vec![rule("b", "top:0;")]);
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:1px;")]);

	let styles = server.host_styles();
	assert_eq!(styles.len(), 2);

	let mut client = StyleRegistry::new(options);
	assert_eq!(client.rehydrate(&styles), 2);
	assert_eq!(client.tags().len(), 2);
	assert_eq!(client.to_css(), server.to_css());
	assert_eq!(client.names("A").map(GeneratedName::as_str).collect::<Vec<_>>(), vec!["a"]);
}

#[rstest]
#[case(Strategy::Direct)]
#[case(Strategy::Text)]
fn test_escaped_quotes_materialize_in_every_strategy(#[case] strategy: Strategy) {
	let mut reg = registry(strategy);
	let quoted = r#".q{content:"\"}";}"#;
	assert!(reg.insert(&id("A"), &name("q"), vec![quoted.to_string()]));

	assert_eq!(reg.tags()[0].rule_count(), 1);
	assert_eq!(reg.group("A").map(Group::cursor), Some(1));
	assert!(reg.to_css().contains(quoted), "{}", reg.to_css());
}

#[rstest]
#[case(Strategy::Direct)]
#[case(Strategy::Text)]
fn test_rehydrating_a_populated_group_never_duplicates_rules(#[case] strategy: Strategy) {
	let mut server = registry(Strategy::Direct);
	server.insert(&id("A"), &name("x"), vec![rule("x", "top:0;")]);
	server.insert(&id("A"), &name("y"), vec![rule("y", "top:1px;")]);

	let mut client = registry(strategy);
	client.insert(&id("A"), &name("x"), vec![rule("x", "top:0;")]);
	assert_eq!(client.rehydrate_manifest(&server.manifest()), 0);

	let css = client.to_css();
	assert_eq!(css.matches(".x{top:0;}").count(), 1, "{css}");
	assert!(!client.has_name("A", "y"));

	assert!(client.insert(&id("A"), &name("y"), vec![rule("y", "top:1px;")]));
	let css = client.to_css();
	assert_eq!(css.matches(".x{top:0;}").count(), 1, "{css}");
	assert_eq!(css.matches(".y{top:1px;}").count(), 1, "{css}");
}

#[test]
fn test_rehydration_fills_untouched_groups_only() {
	let mut server = registry(Strategy::Direct);
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);
	server.insert(&id("B"), &name("b"), vec![rule("b", "top:1px;")]);

	let mut client = registry(Strategy::Direct);
	client.insert(&id("A"), &name("a2"), vec![rule("a2", "top:2px;")]);
	assert_eq!(client.rehydrate_manifest(&server.manifest()), 1);

	assert!(!client.has_name("A", "a"));
	assert!(client.has_name("B", "b"));
	assert_eq!(client.to_css(), ".a2{top:2px;}\n.b{top:1px;}\n");
}

#[test]
fn test_style_tags_carry_version_attribute() {
	let options = RegistryOptions {
		attribute: "data-x".into(),
		version_attribute: "data-x-version".into(),
		version: "9".into(),
		..RegistryOptions::default()
	};
	let mut server = StyleRegistry::new(options.clone());
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);

	let html = server.style_tags();
	assert!(
		html.starts_with("<style data-x=\"active\" data-x-version=\"9\">.a{top:0;}/*!tc*/\n"),
		"{html}"
	);
	assert!(html.ends_with("</style>"), "{html}");
}

#[test]
fn test_host_style_from_element_reads_configured_attributes() {
	let options = RegistryOptions {
		version_attribute: "data-v".into(),
		..RegistryOptions::default()
	};
	let mut server = StyleRegistry::new(options.clone());
	server.insert(&id("A"), &name("a"), vec![rule("a", "top:0;")]);
	let css = server.host_styles().remove(0).css;
	let version = options.version.clone();

	let foreign = HostStyle::from_element(&options, [("data-other", "active")], css.clone());
	assert_eq!(foreign, None);

	let unversioned = HostStyle::from_element(
		&options,
		[(DEFAULT_ATTRIBUTE, "active"), (DEFAULT_VERSION_ATTRIBUTE, version.as_str())],
		css.clone(),
	);
	assert_eq!(unversioned.as_ref().and_then(|s| s.version.as_deref()), None);

	let host = HostStyle::from_element(
		&options,
		[(DEFAULT_ATTRIBUTE, "active"), ("data-v", version.as_str())],
		css,
	)
	.unwrap();
	let mut client = StyleRegistry::new(options);
	assert_eq!(client.rehydrate(std::slice::from_ref(&host)), 1);
	assert!(client.has_name("A", "a"));

	let mut stale = StyleRegistry::new(RegistryOptions::default());
	assert_eq!(stale.rehydrate(&unversioned.into_iter().collect::<Vec<_>>()), 0);
}
