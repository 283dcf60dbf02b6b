//! Decoding of serialized list-valued cells.
//!
//! Alias lists arrive in a bracketed, single-quoted form, e.g.
//! `['Oxana' 'Maria the Couturier']`. Items are whatever sits between
//! single quotes; separators between items are not significant.

use std::sync::LazyLock;

use regex::Regex;

static QUOTED_ITEM: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"'([^']+)'").expect("static regex"));

/// Decode a serialized list cell. Empty input and `[]` decode to an
/// empty list; anything non-empty that is not a bracketed list, or a
/// bracketed list with content but no quoted items, is malformed.
pub fn decode_list(raw: &str) -> Result<Vec<String>, String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(Vec::new());
  }

  let inner = trimmed
    .strip_prefix('[')
    .and_then(|s| s.strip_suffix(']'))
    .ok_or_else(|| format!("not a bracketed list: {trimmed:?}"))?;

  let items: Vec<String> = QUOTED_ITEM
    .captures_iter(inner)
    .map(|c| c[1].to_owned())
    .collect();

  if items.is_empty() && !inner.trim().is_empty() {
    return Err(format!("no quoted items in list: {trimmed:?}"));
  }
  Ok(items)
}
