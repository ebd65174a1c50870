use std::io::Write;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tincture_transform::{StageContext, StyleRule};

use super::*;

struct Anonymous;

impl Stage for Anonymous {
	fn name(&self) -> &str {
		""
	}

	fn apply(&self, _rule: &mut StyleRule, _cx: &StageContext<'_>) {}
}

#[test]
fn test_empty_input_uses_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.registry_options(), RegistryOptions::default());
	assert_eq!(config.transformer().unwrap().config_hash(), None);
}

#[test]
fn test_full_config() {
	let config = Config::parse(
		r#"
		[sheet]
		strategy = "text"
		attribute = "data-app"
		max_groups_per_tag = 2

		[naming]
		class_prefix = "app"

		[transform]
		stages = ["prefixer", "minify"]
		"#,
	)
	.unwrap();

	let options = config.registry_options();
	assert_eq!(options.strategy, Strategy::Text);
	assert_eq!(options.attribute, "data-app");
	assert_eq!(options.max_groups_per_tag, 2);
	assert_eq!(options.max_rules_per_tag, RegistryOptions::default().max_rules_per_tag);
	assert_eq!(config.naming.class_prefix, "app");

	let transformer = config.transformer().unwrap();
	assert_eq!(transformer.stage_names().collect::<Vec<_>>(), vec!["prefixer", "minify"]);
	assert!(transformer.config_hash().is_some());
}

#[test]
fn test_unknown_stage() {
	let config = Config::parse("[transform]\nstages = [\"rtl\"]").unwrap();
	assert!(matches!(config.transformer(), Err(ConfigError::UnknownStage(name)) if name == "rtl"));
}

#[test]
fn test_custom_stage_lookup_is_validated() {
	let config = Config::parse("[transform]\nstages = [\"mine\"]").unwrap();
	let err = config
		.transformer_with(|name| (name == "mine").then(|| Arc::new(Anonymous) as Arc<dyn Stage>))
		.unwrap_err();
	assert!(matches!(err, ConfigError::Transform(_)));
}

#[test]
fn test_invalid_values_rejected() {
	assert!(matches!(
		Config::parse("[sheet]\nmax_groups_per_tag = 0"),
		Err(ConfigError::InvalidValue { field: "sheet.max_groups_per_tag", .. })
	));
	assert!(matches!(Config::parse("[sheet]\nbogus = 1"), Err(ConfigError::Toml(_))));
	assert!(matches!(Config::parse("[sheet]\nstrategy = \"fast\""), Err(ConfigError::Toml(_))));
}

#[test]
fn test_load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[naming]\nclass_prefix = \"x\"").unwrap();
	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.naming.class_prefix, "x");

	let missing = file.path().with_extension("missing");
	assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
}
