//! Name matching between roster entries and feed text.
//!
//! Play descriptions abbreviate players as first initial, a dot and the rest of
//! the name (`J.Jefferson`); scoring summaries spell out the full name. Matching
//! is literal: no fuzzy or case-folded comparison, and multi-token surnames are
//! taken as-is (`Calvin Austin III` becomes `C.Austin III`).

/// First initial + `.` + everything after the first space.
///
/// Returns `None` for a single-token name, which can never appear abbreviated.
pub fn abbreviate(full_name: &str) -> Option<String> {
	let full_name = full_name.trim();
	let initial = full_name.chars().next()?;
	let (_, surname) = full_name.split_once(' ')?;
	let surname = surname.trim_start();

	if surname.is_empty() {
		return None;
	}
	Some(format!("{initial}.{surname}"))
}

/// Byte offset of `name` in `text`, if it occurs.
pub fn position_in(text: &str, name: &str) -> Option<usize> {
	if name.is_empty() {
		return None;
	}
	text.find(name)
}

/// Whether a scoring summary is credited to `full_name` as the primary scorer.
pub fn leads_with(text: &str, full_name: &str) -> bool {
	!full_name.is_empty() && text.starts_with(full_name)
}

/// Whether `full_name` appears in a scoring summary ahead of the first `(` or
/// the first `,`, i.e. in the headline rather than the kicker/holder trailer.
pub fn named_in_headline(text: &str, full_name: &str) -> bool {
	let Some(position) = position_in(text, full_name) else {
		return false;
	};

	text.find(['(', ',']).is_some_and(|headline_end| position < headline_end)
}
