//! MIME token and parameter grammar (RFC 2045 §5.1, RFC 7231 §3.1.1.1).

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ParseError, ParseResult};

const TSPECIALS: &str = "()<>@,;:\\\"/[]?=";

/// Returns true if `c` may appear in a MIME token.
pub(crate) fn is_token_char(c: char) -> bool {
	c.is_ascii() && c > ' ' && c != '\x7f' && !TSPECIALS.contains(c)
}

/// Returns true if `s` is a non-empty MIME token.
pub(crate) fn is_token(s: &str) -> bool {
	!s.is_empty() && s.chars().all(is_token_char)
}

/// Splits `s` into its leading token and the remainder.
fn consume_token(s: &str) -> (&str, &str) {
	let end = s.find(|c: char| !is_token_char(c)).unwrap_or(s.len());
	s.split_at(end)
}

/// Parses the `type/subtype` part of a media type, lowercasing both halves.
///
/// A bare `type` without a slash is accepted and yields an empty subtype.
pub(crate) fn parse_essence(input: &str) -> ParseResult<(String, String)> {
	let lowered = input.trim().to_ascii_lowercase();
	let (type_, rest) = consume_token(&lowered);
	if type_.is_empty() {
		return Err(ParseError::NoMediaType);
	}
	if rest.is_empty() {
		return Ok((type_.to_string(), String::new()));
	}

	let rest = rest
		.strip_prefix('/')
		.ok_or(ParseError::ExpectedSlashAfterType)?;
	let (subtype, rest) = consume_token(rest);
	if subtype.is_empty() {
		return Err(ParseError::ExpectedTokenAfterSlash);
	}
	if !rest.is_empty() {
		return Err(ParseError::UnexpectedContentAfterSubtype);
	}

	Ok((type_.to_string(), subtype.to_string()))
}

/// Parses a `; name=value` parameter list.
///
/// `input` starts at the first `;` following the essence. Names are lowercased,
/// quoted values are unquoted, and trailing semicolons are ignored.
pub(crate) fn parse_params(input: &str) -> ParseResult<BTreeMap<String, String>> {
	let mut params = BTreeMap::new();
	let mut rest = input;

	loop {
		rest = rest.trim_start();
		if rest.is_empty() {
			break;
		}

		let Some((name, value, remaining)) = consume_param(rest) else {
			if rest.trim() == ";" {
				break;
			}
			return Err(ParseError::InvalidMediaParameter);
		};

		if params.contains_key(&name) {
			return Err(ParseError::DuplicateParameterName(name));
		}
		params.insert(name, value);
		rest = remaining;
	}

	Ok(params)
}

/// Consumes one `; name=value` pair, returning `None` when the input is malformed.
fn consume_param(input: &str) -> Option<(String, String, &str)> {
	let rest = input.trim_start().strip_prefix(';')?.trim_start();

	let (name, rest) = consume_token(rest);
	if name.is_empty() {
		return None;
	}

	let rest = rest.trim_start().strip_prefix('=')?.trim_start();
	let (value, rest) = consume_value(rest)?;

	Some((name.to_ascii_lowercase(), value, rest))
}

/// Consumes a token or a quoted string.
fn consume_value(input: &str) -> Option<(String, &str)> {
	let Some(quoted) = input.strip_prefix('"') else {
		let (token, rest) = consume_token(input);
		if token.is_empty() {
			return None;
		}
		return Some((token.to_string(), rest));
	};

	let mut value = String::new();
	let mut chars = quoted.char_indices();
	while let Some((i, c)) = chars.next() {
		match c {
			'"' => return Some((value, &quoted[i + 1..])),
			'\\' => value.push(chars.next()?.1),
			'\r' | '\n' => return None,
			_ => value.push(c),
		}
	}

	// unterminated quoted string
	None
}

/// Writes a parameter value, quoting it unless it is a plain token.
pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
	if is_token(value) {
		return f.write_str(value);
	}

	f.write_str("\"")?;
	for c in value.chars() {
		if c == '"' || c == '\\' {
			f.write_str("\\")?;
		}
		write!(f, "{c}")?;
	}
	f.write_str("\"")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("text/plain", "text", "plain")]
	#[case("  Text/HTML ", "text", "html")]
	#[case("text", "text", "")]
	#[case("*/*", "*", "*")]
	#[case("application/vnd.api+json", "application", "vnd.api+json")]
	fn test_parse_essence(#[case] input: &str, #[case] type_: &str, #[case] subtype: &str) {
		let (t, s) = parse_essence(input).unwrap();
		assert_eq!(t, type_);
		assert_eq!(s, subtype);
	}

	#[rstest]
	#[case("", ParseError::NoMediaType)]
	#[case("/", ParseError::NoMediaType)]
	#[case("/plain", ParseError::NoMediaType)]
	#[case("text/", ParseError::ExpectedTokenAfterSlash)]
	#[case("text plain", ParseError::ExpectedSlashAfterType)]
	#[case("text/plain/a", ParseError::UnexpectedContentAfterSubtype)]
	#[case("text/pl ain", ParseError::UnexpectedContentAfterSubtype)]
	fn test_parse_essence_errors(#[case] input: &str, #[case] expected: ParseError) {
		assert_eq!(parse_essence(input).unwrap_err(), expected);
	}

	#[rstest]
	fn test_parse_params_normalizes_names() {
		// Act
		let params = parse_params("; Charset=UTF-8 ;q=0.5").unwrap();

		// Assert
		assert_eq!(params.len(), 2);
		assert_eq!(params["charset"], "UTF-8");
		assert_eq!(params["q"], "0.5");
	}

	#[rstest]
	fn test_parse_params_quoted_value() {
		let params = parse_params(r#"; title="a \"b\"; c""#).unwrap();
		assert_eq!(params["title"], r#"a "b"; c"#);
	}

	#[rstest]
	#[case(";")]
	#[case("; ")]
	#[case("; p=1;")]
	fn test_parse_params_ignores_trailing_semicolon(#[case] input: &str) {
		assert!(parse_params(input).is_ok());
	}

	#[rstest]
	#[case("; =1")]
	#[case("; p")]
	#[case("; p=")]
	#[case("; p=1 x")]
	#[case("; p=\"open")]
	#[case(";;")]
	fn test_parse_params_rejects_malformed(#[case] input: &str) {
		assert_eq!(
			parse_params(input).unwrap_err(),
			ParseError::InvalidMediaParameter
		);
	}

	#[rstest]
	fn test_parse_params_rejects_duplicates() {
		assert_eq!(
			parse_params("; p=1; P=2").unwrap_err(),
			ParseError::DuplicateParameterName("p".to_string())
		);
	}

	#[rstest]
	#[case("utf-8", true)]
	#[case("*", true)]
	#[case("", false)]
	#[case("a b", false)]
	#[case("a/b", false)]
	#[case("é", false)]
	fn test_is_token(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_token(input), expected);
	}
}
