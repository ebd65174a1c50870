//! Property-name and value conversion for declaration mappings.

/// Properties whose numeric values are rendered without a unit.
const UNITLESS: &[&str] = &[
	"animation-iteration-count",
	"aspect-ratio",
	"border-image-outset",
	"border-image-slice",
	"border-image-width",
	"box-flex",
	"box-flex-group",
	"box-ordinal-group",
	"column-count",
	"columns",
	"fill-opacity",
	"flex",
	"flex-grow",
	"flex-negative",
	"flex-order",
	"flex-positive",
	"flex-shrink",
	"flood-opacity",
	"font-weight",
	"grid-area",
	"grid-column",
	"grid-column-end",
	"grid-column-span",
	"grid-column-start",
	"grid-row",
	"grid-row-end",
	"grid-row-span",
	"grid-row-start",
	"line-clamp",
	"line-height",
	"opacity",
	"order",
	"orphans",
	"scale",
	"stop-opacity",
	"stroke-dasharray",
	"stroke-dashoffset",
	"stroke-miterlimit",
	"stroke-opacity",
	"stroke-width",
	"tab-size",
	"widows",
	"z-index",
	"zoom",
];

/// `--name` custom property.
pub fn is_custom_property(name: &str) -> bool {
	name.starts_with("--")
}

/// Converts a camelCase key to CSS case.
///
/// `backgroundColor` becomes `background-color`, `WebkitTransition`
/// becomes `-webkit-transition` and `msTransform` becomes `-ms-transform`.
/// Custom properties and keys already in CSS case are returned unchanged.
pub fn hyphenate(name: &str) -> String {
	if is_custom_property(name) {
		return name.to_string();
	}
	let mut out = String::with_capacity(name.len() + 4);
	for ch in name.chars() {
		if ch.is_ascii_uppercase() {
			out.push('-');
			out.push(ch.to_ascii_lowercase());
		} else {
			out.push(ch);
		}
	}
	if out.starts_with("ms-") {
		out.insert(0, '-');
	}
	out
}

/// Whether numbers for `property` (CSS case) stay unitless.
///
/// Vendor-prefixed names are looked up without their prefix.
pub fn is_unitless(property: &str) -> bool {
	let bare = strip_vendor_prefix(property);
	UNITLESS.contains(&bare)
}

fn strip_vendor_prefix(property: &str) -> &str {
	let Some(rest) = property.strip_prefix('-') else {
		return property;
	};
	if rest.starts_with('-') {
		return property;
	}
	rest.split_once('-').map_or(property, |(_, bare)| bare)
}

/// Shortest display form of a number (`4`, `1.5`, `-0.25`).
pub fn format_number(n: f64) -> String {
	if n == 0.0 {
		return "0".to_string();
	}
	format!("{n}")
}

/// Renders a numeric value for `property`, adding `px` where a unit is
/// expected.
pub fn add_unit(property: &str, n: f64) -> String {
	let text = format_number(n);
	if n == 0.0 || is_custom_property(property) || is_unitless(property) {
		text
	} else {
		format!("{text}px")
	}
}
