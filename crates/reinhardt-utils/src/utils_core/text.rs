//! Text helpers for identifiers and templates

/// Upper-case the first character of `text`, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_utils::utils_core::text::capfirst;
///
/// assert_eq!(capfirst("json"), "Json");
/// assert_eq!(capfirst("Php"), "Php");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Substitute `{name}` placeholders in `template` with values from `context`.
///
/// The template is scanned once, so a substituted value is never itself
/// expanded. Placeholders without an entry in `context` are copied through
/// unchanged, as are unbalanced braces.
///
/// # Examples
///
/// ```
/// use reinhardt_utils::utils_core::text::interpolate;
///
/// let path = interpolate(
///     "{library}/tests/fixtures/{file}.{type}",
///     &[("library", "/app"), ("file", "models/posts"), ("type", "json")],
/// );
/// assert_eq!(path, "/app/tests/fixtures/models/posts.json");
///
/// assert_eq!(interpolate("{unknown}/{file}", &[("file", "a")]), "{unknown}/a");
/// ```
pub fn interpolate(template: &str, context: &[(&str, &str)]) -> String {
	let mut result = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		result.push_str(&rest[..open]);
		let candidate = &rest[open..];

		let Some(close) = candidate[1..].find(['{', '}']) else {
			result.push_str(candidate);
			return result;
		};

		// `close` is relative to candidate[1..]
		let end = close + 1;
		if candidate.as_bytes()[end] == b'{' {
			// Another opening brace before any closing one: emit the literal prefix
			result.push_str(&candidate[..end]);
			rest = &candidate[end..];
			continue;
		}

		let key = &candidate[1..end];
		match context.iter().find(|(name, _)| *name == key) {
			Some((_, value)) => result.push_str(value),
			None => result.push_str(&candidate[..=end]),
		}
		rest = &candidate[end + 1..];
	}

	result.push_str(rest);
	result
}
