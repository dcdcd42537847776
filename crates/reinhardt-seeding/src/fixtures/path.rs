//! Fixture path resolution.
//!
//! Turns a fixture name such as `"models/Pirates"` into a concrete file path by
//! slugifying each name segment and filling the `{library}`, `{file}` and
//! `{type}` placeholders of a path template. Nothing here touches the
//! filesystem.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use reinhardt_utils::{interpolate, slugify};

use crate::error::{FixtureError, FixtureResult};

/// Template used when the options do not supply one.
pub const DEFAULT_PATH_TEMPLATE: &str = "{library}/tests/fixtures/{file}.{type}";

/// Selects the root directory substituted for `{library}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LibraryRoot {
	/// The active library of the [`Libraries`] registry.
	#[default]
	Active,
	/// A library registered under this name.
	Named(String),
	/// An explicit directory, used verbatim.
	Path(PathBuf),
}

impl LibraryRoot {
	/// Shorthand for [`LibraryRoot::Named`].
	pub fn named(name: impl Into<String>) -> Self {
		Self::Named(name.into())
	}

	/// Shorthand for [`LibraryRoot::Path`].
	pub fn path(path: impl Into<PathBuf>) -> Self {
		Self::Path(path.into())
	}
}

impl From<PathBuf> for LibraryRoot {
	fn from(path: PathBuf) -> Self {
		Self::Path(path)
	}
}

impl From<&Path> for LibraryRoot {
	fn from(path: &Path) -> Self {
		Self::Path(path.to_path_buf())
	}
}

/// Registry of library names and their root directories.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use reinhardt_seeding::fixtures::Libraries;
///
/// let libraries = Libraries::new("app", "/srv/app").with_library("blog", "/srv/blog");
/// assert_eq!(libraries.get_library_path(None).unwrap(), Path::new("/srv/app"));
/// assert_eq!(libraries.get_library_path(Some("blog")).unwrap(), Path::new("/srv/blog"));
/// assert!(libraries.get_library_path(Some("shop")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Libraries {
	roots: IndexMap<String, PathBuf>,
	active: String,
}

impl Libraries {
	/// Creates a registry whose active library is `name` rooted at `root`.
	pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
		let name = name.into();
		let mut roots = IndexMap::new();
		roots.insert(name.clone(), root.into());
		Self {
			roots,
			active: name,
		}
	}

	/// Adds or replaces a library.
	pub fn with_library(mut self, name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
		self.add(name, root);
		self
	}

	/// Adds or replaces a library in place.
	pub fn add(&mut self, name: impl Into<String>, root: impl Into<PathBuf>) {
		self.roots.insert(name.into(), root.into());
	}

	/// Makes `name` the active library.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::LibraryNotFound`] if `name` is not registered.
	pub fn set_active(&mut self, name: &str) -> FixtureResult<()> {
		if !self.roots.contains_key(name) {
			return Err(FixtureError::LibraryNotFound(name.to_string()));
		}
		self.active = name.to_string();
		Ok(())
	}

	/// Name of the active library.
	pub fn active(&self) -> &str {
		&self.active
	}

	/// Registered library names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.roots.keys().map(String::as_str)
	}

	/// Returns the root of `name`, or of the active library when `name` is `None`.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::LibraryNotFound`] for an unregistered name.
	pub fn get_library_path(&self, name: Option<&str>) -> FixtureResult<&Path> {
		let name = name.unwrap_or(self.active.as_str());
		self.roots
			.get(name)
			.map(PathBuf::as_path)
			.ok_or_else(|| FixtureError::LibraryNotFound(name.to_string()))
	}

	/// Resolves a [`LibraryRoot`] selector to a directory.
	pub fn root_for(&self, library: &LibraryRoot) -> FixtureResult<PathBuf> {
		match library {
			LibraryRoot::Active => self.get_library_path(None).map(Path::to_path_buf),
			LibraryRoot::Named(name) => self.get_library_path(Some(name.as_str())).map(Path::to_path_buf),
			LibraryRoot::Path(path) => Ok(path.clone()),
		}
	}
}

/// Slugifies every `/`-separated segment of a fixture name.
///
/// Leading, trailing and doubled slashes are ignored, so the result is never
/// absolute and has no empty components.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidName`] when a segment has no letters or
/// digits (`..`, `!!!`), or when the name has no segments at all. Dropping
/// such a segment would point the name at a different fixture.
///
/// # Example
///
/// ```
/// use reinhardt_seeding::fixtures::fixture_slug;
///
/// assert_eq!(fixture_slug("models/Pirates").unwrap(), "models/pirates");
/// assert_eq!(fixture_slug("Ship Logs/Black Pearl!").unwrap(), "ship-logs/black-pearl");
/// assert!(fixture_slug("models/..").is_err());
/// ```
pub fn fixture_slug(name: &str) -> FixtureResult<String> {
	let mut segments = Vec::new();
	for segment in name.split('/').filter(|segment| !segment.is_empty()) {
		let slug = slugify(segment);
		if slug.is_empty() {
			return Err(FixtureError::InvalidName {
				name: name.to_string(),
				reason: format!("segment `{}` has no letters or digits", segment),
			});
		}
		segments.push(slug);
	}

	if segments.is_empty() {
		return Err(FixtureError::InvalidName {
			name: name.to_string(),
			reason: "name is empty".to_string(),
		});
	}
	Ok(segments.join("/"))
}

/// Computes the file path of a fixture.
///
/// `library_root` replaces `{library}`, the slugified `name` replaces `{file}`
/// and `extension` replaces `{type}`. Other placeholders are left untouched.
///
/// # Errors
///
/// Fails like [`fixture_slug`] on names that do not slugify cleanly.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use reinhardt_seeding::fixtures::{DEFAULT_PATH_TEMPLATE, resolve_path};
///
/// let path = resolve_path("models/Pirates", DEFAULT_PATH_TEMPLATE, Path::new("/srv/app"), "json")?;
/// assert_eq!(path, PathBuf::from("/srv/app/tests/fixtures/models/pirates.json"));
/// # Ok::<(), reinhardt_seeding::FixtureError>(())
/// ```
pub fn resolve_path(
	name: &str,
	template: &str,
	library_root: &Path,
	extension: &str,
) -> FixtureResult<PathBuf> {
	let library = library_root.to_string_lossy();
	let file = fixture_slug(name)?;
	Ok(PathBuf::from(interpolate(
		template,
		&[
			("library", library.as_ref()),
			("file", file.as_str()),
			("type", extension),
		],
	)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("pirates", "pirates")]
	#[case("models/Pirates", "models/pirates")]
	#[case("Models/Black Pearl", "models/black-pearl")]
	#[case("/models//pirates/", "models/pirates")]
	#[case("models/\u{65e5}\u{672c}", "models/\u{65e5}\u{672c}")]
	#[case("Caf\u{e9}", "caf\u{e9}")]
	fn test_fixture_slug(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(fixture_slug(name).unwrap(), expected);
	}

	#[rstest]
	#[case("")]
	#[case("///")]
	#[case("a/../b")]
	#[case("models/..")]
	#[case("models/!!!")]
	#[case("models/\u{2603}")]
	fn test_fixture_slug_rejects_unusable_segments(#[case] name: &str) {
		let error = fixture_slug(name).unwrap_err();

		assert!(matches!(error, FixtureError::InvalidName { name: ref given, .. } if given == name));
	}

	#[rstest]
	fn test_fixture_slug_idempotent() {
		let once = fixture_slug("Ship Logs/Black Pearl!").unwrap();
		assert_eq!(fixture_slug(&once).unwrap(), once);
	}

	#[rstest]
	#[case("models/\u{65e5}\u{672c}", "models")]
	#[case("Caf\u{e9}", "caf")]
	#[case("\u{c9}cole", "cole")]
	fn test_non_ascii_names_keep_their_own_path(#[case] name: &str, #[case] ascii: &str) {
		// Arrange
		let root = Path::new("/srv/app");

		// Act
		let unicode_path = resolve_path(name, DEFAULT_PATH_TEMPLATE, root, "json").unwrap();
		let ascii_path = resolve_path(ascii, DEFAULT_PATH_TEMPLATE, root, "json").unwrap();

		// Assert
		assert_ne!(unicode_path, ascii_path);
		assert!(unicode_path.starts_with("/srv/app/tests/fixtures"));
	}

	#[rstest]
	#[case(DEFAULT_PATH_TEMPLATE, "/srv/app/tests/fixtures/models/pirates.json")]
	#[case("{library}/data/{file}.{type}", "/srv/app/data/models/pirates.json")]
	#[case("{library}/{env}/{file}.{type}", "/srv/app/{env}/models/pirates.json")]
	#[case("/static/{file}.fixture", "/static/models/pirates.fixture")]
	fn test_resolve_path(#[case] template: &str, #[case] expected: &str) {
		let path = resolve_path("models/Pirates", template, Path::new("/srv/app"), "json").unwrap();
		assert_eq!(path, PathBuf::from(expected));
	}

	#[rstest]
	fn test_resolve_path_is_pure() {
		let first = resolve_path("pirates", DEFAULT_PATH_TEMPLATE, Path::new("/x"), "php").unwrap();
		let second = resolve_path("pirates", DEFAULT_PATH_TEMPLATE, Path::new("/x"), "php").unwrap();
		assert_eq!(first, second);
		assert!(!first.exists());
	}

	#[rstest]
	fn test_libraries_root_for() {
		// Arrange
		let libraries = Libraries::new("app", "/srv/app").with_library("blog", "/srv/blog");

		// Act
		let active = libraries.root_for(&LibraryRoot::Active).unwrap();
		let named = libraries.root_for(&LibraryRoot::named("blog")).unwrap();
		let explicit = libraries.root_for(&LibraryRoot::path("/tmp/lib")).unwrap();

		// Assert
		assert_eq!(active, PathBuf::from("/srv/app"));
		assert_eq!(named, PathBuf::from("/srv/blog"));
		assert_eq!(explicit, PathBuf::from("/tmp/lib"));
	}

	#[rstest]
	fn test_libraries_unknown_name() {
		let libraries = Libraries::new("app", "/srv/app");

		let error = libraries.root_for(&LibraryRoot::named("shop")).unwrap_err();
		assert!(matches!(error, FixtureError::LibraryNotFound(ref name) if name == "shop"));
	}

	#[rstest]
	fn test_libraries_set_active() {
		let mut libraries = Libraries::new("app", "/srv/app").with_library("blog", "/srv/blog");

		libraries.set_active("blog").unwrap();
		assert_eq!(libraries.active(), "blog");
		assert_eq!(libraries.get_library_path(None).unwrap(), Path::new("/srv/blog"));

		assert!(libraries.set_active("shop").is_err());
		assert_eq!(libraries.active(), "blog");
		assert_eq!(libraries.names().collect::<Vec<_>>(), vec!["app", "blog"]);
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn fixture_slug_is_idempotent(name in "\\PC{0,40}") {
				if let Ok(once) = fixture_slug(&name) {
					prop_assert_eq!(fixture_slug(&once).unwrap(), once);
				}
			}

			#[test]
			fn resolved_path_stays_under_fixture_dir(name in "[a-zA-Z0-9 ./_-]{0,40}") {
				if let Ok(path) = resolve_path(&name, DEFAULT_PATH_TEMPLATE, Path::new("/srv/app"), "json") {
					prop_assert!(path.starts_with("/srv/app/tests/fixtures"));
					prop_assert!(!path.components().any(|c| c == std::path::Component::ParentDir));
				}
			}

			#[test]
			fn distinct_segments_never_share_a_path(
				first in "[a-z]{1,8}",
				second in "[^/]{1,8}",
			) {
				let nested = format!("{}/{}", first, second);
				if let Ok(path) = resolve_path(&nested, DEFAULT_PATH_TEMPLATE, Path::new("/srv/app"), "json") {
					let parent = resolve_path(&first, DEFAULT_PATH_TEMPLATE, Path::new("/srv/app"), "json").unwrap();
					prop_assert_ne!(path, parent);
				}
			}
		}
	}
}
