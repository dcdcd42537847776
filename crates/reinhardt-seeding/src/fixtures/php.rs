//! PHP array-literal fixture adapter.
//!
//! Fixture files hold a single `$data = ...;` assignment in the layout
//! produced by PHP's `var_export`:
//!
//! ```text
//! <?php
//!
//! $data = array (
//!   'pearl' =>
//!   array (
//!     'name' => 'The Black Pearl',
//!   ),
//! );
//!
//! ?>
//! ```
//!
//! The file is never executed. The literal is parsed with a small nom grammar
//! covering `array(...)` and `[...]` arrays, string and integer keys, quoted
//! strings, numbers, booleans, `null`, trailing commas, and comments.
//! Arrays may nest up to 128 levels.
//!
//! Only the escapes `\\`, the quote itself, `\n`, `\t`, `\r`, `\v`, `\e`, `\f`,
//! `\0` and `\$` are decoded in double-quoted strings. Hex (`\x41`), Unicode
//! (`\u{41}`) and octal (`\101`) escapes are kept as written, and `$var`
//! is never interpolated, since fixtures carry data rather than code.
//!
//! Arrays keyed exactly `0..n` in order decode to JSON arrays, everything else
//! to objects. Objects are encoded with quoted keys and empty objects as
//! `(object) array ()`, so a round trip never turns an object into a list.

use std::path::Path;

use indexmap::IndexMap;
use nom::{
	IResult, Parser,
	branch::alt,
	bytes::complete::{tag, tag_no_case, take_until, take_while},
	character::complete::{char, digit0, digit1, multispace1, one_of},
	combinator::{all_consuming, map, map_res, opt, recognize, value},
	error::{Error, ErrorKind},
	multi::many0,
	sequence::{delimited, pair, preceded},
};
use serde_json::{Number, Value};

use super::adapter::{FixtureAdapter, read_fixture};
use crate::error::{FixtureError, FixtureResult};

const HEADER: &str = "<?php\n\n$data = ";
const FOOTER: &str = ";\n\n?>\n";

/// Deepest array nesting accepted, matching serde_json's recursion limit.
const MAX_NESTING: usize = 128;

/// Reads and writes `.php` fixture files holding a `$data` array literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpAdapter;

impl PhpAdapter {
	/// Creates a new PHP literal adapter.
	pub fn new() -> Self {
		Self
	}

	/// Parses the text of a fixture file.
	///
	/// Returns a human readable reason on failure; [`FixtureAdapter::parse`]
	/// attaches the file path.
	pub fn parse_str(&self, text: &str) -> Result<Value, String> {
		match all_consuming(document).parse(text) {
			Ok((_, data)) => Ok(data),
			Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(describe_error(text, &e)),
			Err(nom::Err::Incomplete(_)) => Err("incomplete input".to_string()),
		}
	}

	/// Renders `data` as a complete fixture file.
	pub fn encode_str(&self, data: &Value) -> String {
		let mut output = String::from(HEADER);
		export(data, "", &mut output);
		output.push_str(FOOTER);
		output
	}
}

impl FixtureAdapter for PhpAdapter {
	fn name(&self) -> &str {
		"Php"
	}

	fn extension(&self) -> &str {
		"php"
	}

	fn parse(&self, path: &Path) -> FixtureResult<Value> {
		let content = read_fixture(path)?;
		let text =
			std::str::from_utf8(&content).map_err(|e| FixtureError::parse(path, "php", e))?;
		self.parse_str(text)
			.map_err(|reason| FixtureError::parse(path, "php", reason))
	}

	fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>> {
		Ok(self.encode_str(data).into_bytes())
	}
}

fn describe_error(text: &str, error: &Error<&str>) -> String {
	let remaining = error.input;
	let offset = text.len() - remaining.len();
	let consumed = &text[..offset];
	let line = consumed.matches('\n').count() + 1;
	let column = consumed.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;

	if error.code == ErrorKind::TooLarge {
		format!(
			"arrays nested deeper than {} levels at line {}, column {}",
			MAX_NESTING, line, column
		)
	} else if error.code == ErrorKind::Verify {
		format!(
			"cannot append to array at line {}, column {}: next index is out of range",
			line, column
		)
	} else if remaining.is_empty() {
		format!("unexpected end of input at line {}, column {}", line, column)
	} else if !text.contains("$data") {
		"no `$data` assignment found".to_string()
	} else {
		format!("unexpected input at line {}, column {}", line, column)
	}
}

// ============================================================================
// Encoder
// ============================================================================

fn export(data: &Value, indent: &str, out: &mut String) {
	match data {
		Value::Null => out.push_str("NULL"),
		Value::Bool(true) => out.push_str("true"),
		Value::Bool(false) => out.push_str("false"),
		Value::Number(n) => export_number(n, out),
		Value::String(s) => export_string(s, out),
		Value::Array(items) => export_entries(
			items.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
			indent,
			out,
		),
		Value::Object(map) if map.is_empty() => {
			out.push_str("(object) ");
			export_entries(std::iter::empty::<(String, &Value)>(), indent, out);
		}
		Value::Object(map) => export_entries(
			map.iter().map(|(k, v)| {
				let mut key = String::with_capacity(k.len() + 2);
				export_string(k, &mut key);
				(key, v)
			}),
			indent,
			out,
		),
	}
}

fn export_entries<'a>(
	entries: impl Iterator<Item = (String, &'a Value)>,
	indent: &str,
	out: &mut String,
) {
	let inner = format!("{}  ", indent);
	out.push_str("array (\n");
	for (key, item) in entries {
		out.push_str(&inner);
		out.push_str(&key);
		out.push_str(" => ");
		if item.is_array() || item.is_object() {
			out.push('\n');
			out.push_str(&inner);
		}
		export(item, &inner, out);
		out.push_str(",\n");
	}
	out.push_str(indent);
	out.push(')');
}

fn export_number(number: &Number, out: &mut String) {
	match number.as_f64() {
		Some(f) if number.is_f64() => out.push_str(&format!("{:?}", f)),
		_ => out.push_str(&number.to_string()),
	}
}

fn export_string(text: &str, out: &mut String) {
	out.push('\'');
	for ch in text.chars() {
		match ch {
			'\\' => out.push_str("\\\\"),
			'\'' => out.push_str("\\'"),
			_ => out.push(ch),
		}
	}
	out.push('\'');
}

// ============================================================================
// Parser
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Key {
	Index(i64),
	Name(String),
}

fn line_comment(input: &str) -> IResult<&str, &str> {
	recognize(pair(alt((tag("//"), tag("#"))), take_while(|c| c != '\n'))).parse(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
	recognize(delimited(tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}

/// Skips whitespace and comments.
fn ws(input: &str) -> IResult<&str, ()> {
	value((), many0(alt((multispace1, line_comment, block_comment)))).parse(input)
}

fn quoted(input: &str, quote: char) -> IResult<&str, String> {
	let (body, _) = char(quote).parse(input)?;
	let mut out = String::new();
	let mut chars = body.char_indices();

	while let Some((idx, ch)) = chars.next() {
		if ch == quote {
			return Ok((&body[idx + ch.len_utf8()..], out));
		}
		if ch != '\\' {
			out.push(ch);
			continue;
		}
		let Some((_, escaped)) = chars.next() else {
			break;
		};
		match (quote, escaped) {
			(_, '\\') => out.push('\\'),
			(q, e) if q == e => out.push(e),
			('"', 'n') => out.push('\n'),
			('"', 't') => out.push('\t'),
			('"', 'r') => out.push('\r'),
			('"', 'v') => out.push('\u{0B}'),
			('"', 'e') => out.push('\u{1B}'),
			('"', 'f') => out.push('\u{0C}'),
			('"', '0') => out.push('\0'),
			('"', '$') => out.push('$'),
			(_, other) => {
				out.push('\\');
				out.push(other);
			}
		}
	}

	// Unterminated string: no other branch can succeed from here
	Err(nom::Err::Failure(Error::new(input, ErrorKind::Char)))
}

fn single_quoted(input: &str) -> IResult<&str, String> {
	quoted(input, '\'')
}

fn double_quoted(input: &str) -> IResult<&str, String> {
	quoted(input, '"')
}

fn string(input: &str) -> IResult<&str, String> {
	alt((single_quoted, double_quoted)).parse(input)
}

fn number(input: &str) -> IResult<&str, Value> {
	let (rest, text) = recognize((
		opt(one_of("+-")),
		alt((
			recognize(pair(digit1, opt(pair(char('.'), digit0)))),
			recognize(pair(char('.'), digit1)),
		)),
		opt((one_of("eE"), opt(one_of("+-")), digit1)),
	))
	.parse(input)?;

	let text = text.strip_prefix('+').unwrap_or(text);
	let is_float = text.contains(['.', 'e', 'E']);
	let integer = if is_float {
		None
	} else {
		text.parse::<i64>()
			.map(Number::from)
			.or_else(|_| text.parse::<u64>().map(Number::from))
			.ok()
	};

	match integer.or_else(|| text.parse::<f64>().ok().and_then(Number::from_f64)) {
		Some(n) => Ok((rest, Value::Number(n))),
		None => Err(nom::Err::Error(Error::new(input, ErrorKind::Float))),
	}
}

fn constant(input: &str) -> IResult<&str, Value> {
	alt((
		value(Value::Bool(true), tag_no_case("true")),
		value(Value::Bool(false), tag_no_case("false")),
		value(Value::Null, tag_no_case("null")),
	))
	.parse(input)
}

fn integer_key(input: &str) -> IResult<&str, i64> {
	map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>).parse(input)
}

fn key(input: &str) -> IResult<&str, Key> {
	alt((map(string, Key::Name), map(integer_key, Key::Index))).parse(input)
}

fn entry(input: &str, depth: usize) -> IResult<&str, (Option<Key>, Value)> {
	if let Ok((rest, name)) = preceded(ws, key).parse(input) {
		if let Ok((rest, _)) = preceded(ws, tag("=>")).parse(rest) {
			let (rest, item) = literal(rest, depth)?;
			return Ok((rest, (Some(name), item)));
		}
	}
	let (rest, item) = literal(input, depth)?;
	Ok((rest, (None, item)))
}

fn array(input: &str, depth: usize) -> IResult<&str, Value> {
	let (body, close) = alt((
		value(')', pair(tag_no_case("array"), preceded(ws, char('(')))),
		value(']', char('[')),
	))
	.parse(input)?;
	if depth >= MAX_NESTING {
		return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
	}

	let mut entries = Vec::new();
	let mut rest = body;
	loop {
		match entry(rest, depth + 1) {
			Ok((next, item)) => {
				entries.push(item);
				rest = next;
			}
			Err(nom::Err::Error(_)) => break,
			Err(e) => return Err(e),
		}
		match preceded(ws, char(',')).parse(rest) {
			Ok((next, _)) => rest = next,
			Err(nom::Err::Error(_)) => break,
			Err(e) => return Err(e),
		}
	}
	let (rest, _) = opt(preceded(ws, char(','))).parse(rest)?;
	let (rest, _) = preceded(ws, char(close)).parse(rest)?;

	match build_array(entries) {
		Some(data) => Ok((rest, data)),
		None => Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify))),
	}
}

/// `(object) array(...)`, the form `var_export` uses for objects.
fn object_cast(input: &str, depth: usize) -> IResult<&str, Value> {
	let (input, _) = pair(tag_no_case("(object)"), ws).parse(input)?;
	let (rest, data) = array(input, depth)?;
	let data = match data {
		Value::Array(items) => Value::Object(
			items
				.into_iter()
				.enumerate()
				.map(|(i, v)| (i.to_string(), v))
				.collect(),
		),
		other => other,
	};
	Ok((rest, data))
}

/// Any value; `depth` counts the arrays enclosing it.
fn literal(input: &str, depth: usize) -> IResult<&str, Value> {
	let (input, _) = ws(input)?;
	match object_cast(input, depth) {
		Err(nom::Err::Error(_)) => {}
		parsed => return parsed,
	}
	match array(input, depth) {
		Err(nom::Err::Error(_)) => {}
		parsed => return parsed,
	}
	alt((map(string, Value::String), number, constant)).parse(input)
}

fn document(input: &str) -> IResult<&str, Value> {
	let (input, _) = preceded(ws, opt(tag_no_case("<?php"))).parse(input)?;
	let (input, _) = preceded(ws, tag("$data")).parse(input)?;
	let (input, _) = preceded(ws, char('=')).parse(input)?;
	let (input, data) = literal(input, 0)?;
	let (input, _) = preceded(ws, char(';')).parse(input)?;
	let (input, _) = preceded(ws, opt(tag("?>"))).parse(input)?;
	let (input, _) = ws(input)?;
	Ok((input, data))
}

/// Applies PHP key semantics: implicit keys continue after the largest integer
/// key, and repeated keys overwrite in place.
///
/// Returns `None` when an implicit key follows `i64::MAX`, which PHP rejects
/// because the next index is already taken.
fn build_array(entries: Vec<(Option<Key>, Value)>) -> Option<Value> {
	let mut map: IndexMap<String, Value> = IndexMap::with_capacity(entries.len());
	let mut next_index: Option<i64> = Some(0);
	let mut all_indexed = true;

	for (key, item) in entries {
		let key = match key {
			None => Key::Index(next_index?),
			Some(k) => k,
		};
		match key {
			Key::Index(i) => {
				if next_index.is_some_and(|next| i >= next) {
					next_index = i.checked_add(1);
				}
				map.insert(i.to_string(), item);
			}
			Key::Name(name) => {
				all_indexed = false;
				map.insert(name, item);
			}
		}
	}

	let is_list = all_indexed && map.keys().enumerate().all(|(i, k)| *k == i.to_string());
	Some(if is_list {
		Value::Array(map.into_values().collect())
	} else {
		Value::Object(map.into_iter().collect())
	})
}
