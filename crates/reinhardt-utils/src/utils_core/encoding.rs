//! Slug encoding for file and path segments

/// Convert string to slug (file-name friendly format)
///
/// Letters are lower-cased and digits are kept, in any script. Every run of
/// other characters becomes a single `-`. Leading and trailing separators are
/// dropped, so applying `slugify` to its own output returns it unchanged.
///
/// # Examples
///
/// ```
/// use reinhardt_utils::utils_core::encoding::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Hello  World"), "hello-world");
/// assert_eq!(slugify("BlogPosts_2024"), "blogposts-2024");
/// assert_eq!(slugify("Special!@#Characters"), "special-characters");
/// assert_eq!(slugify("Caf\u{e9} Noir"), "caf\u{e9}-noir");
/// ```
pub fn slugify(text: &str) -> String {
	let mut slug = String::with_capacity(text.len());
	let mut pending_separator = false;

	// Lower-casing may expand a letter into a letter plus a combining mark;
	// only alphanumeric output is kept so the result stays a fixed point.
	for ch in text.chars().flat_map(char::to_lowercase) {
		if ch.is_alphanumeric() {
			if pending_separator && !slug.is_empty() {
				slug.push('-');
			}
			pending_separator = false;
			slug.push(ch);
		} else {
			pending_separator = true;
		}
	}

	slug
}

/// Returns true when `text` is already in slug form.
///
/// # Examples
///
/// ```
/// use reinhardt_utils::utils_core::encoding::is_slug;
///
/// assert!(is_slug("black-pearl"));
/// assert!(!is_slug("Black Pearl"));
/// ```
pub fn is_slug(text: &str) -> bool {
	slugify(text) == text
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Hello World", "hello-world")]
	#[case("Hello  World", "hello-world")]
	#[case("Hello-World", "hello-world")]
	#[case("Pirates", "pirates")]
	#[case("Test 123", "test-123")]
	#[case("--leading and trailing--", "leading-and-trailing")]
	#[case("hello---world", "hello-world")]
	fn test_slugify(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(slugify(input), expected);
	}

	#[rstest]
	fn test_slugify_empty() {
		assert_eq!(slugify(""), "");
		assert_eq!(slugify("!!!"), "");
	}

	#[rstest]
	fn test_slugify_unicode() {
		assert_eq!(slugify("Hello 世界"), "hello-世界");
		assert_eq!(slugify("Caf\u{e9} Noir"), "caf\u{e9}-noir");
		assert_eq!(slugify("\u{c9}COLE"), "\u{e9}cole");
		assert_eq!(slugify("\u{2603} snow"), "snow");
	}

	#[rstest]
	fn test_is_slug() {
		assert!(is_slug("pirates"));
		assert!(is_slug(""));
		assert!(!is_slug("Pirates"));
		assert!(!is_slug("-pirates"));
	}
}
