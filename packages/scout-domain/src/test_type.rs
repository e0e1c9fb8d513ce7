/// Splits a comma-joined test-type field into trimmed category tokens,
/// preserving order and dropping empty segments.
pub fn split_categories(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|token| !token.is_empty())
		.map(str::to_string)
		.collect()
}
