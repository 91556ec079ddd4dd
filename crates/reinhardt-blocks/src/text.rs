//! String utilities for block labels

/// Capitalize the first character of a string
///
/// # Examples
///
/// ```
/// use reinhardt_blocks::text::capfirst;
///
/// assert_eq!(capfirst("heading"), "Heading");
/// assert_eq!(capfirst("éclair"), "Éclair");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		None => String::new(),
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
	}
}

/// Derive a human-readable label from a block name
///
/// Underscores become spaces and the first letter is capitalized.
///
/// # Examples
///
/// ```
/// use reinhardt_blocks::text::label_from_name;
///
/// assert_eq!(label_from_name("body_text"), "Body text");
/// ```
pub fn label_from_name(name: &str) -> String {
	capfirst(&name.replace('_', " "))
}
