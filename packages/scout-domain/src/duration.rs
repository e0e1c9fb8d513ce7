use regex::Regex;

/// Coerces a free-form duration field to whole minutes: a direct integer
/// parse first, else the first embedded digit run, else `None`. Catalog
/// payloads carry everything from `30` to `"45 minutes"` to `"N/A"`.
pub fn coerce_minutes(raw: &str) -> Option<i64> {
	let trimmed = raw.trim();

	if let Ok(minutes) = trimmed.parse::<i64>() {
		return Some(minutes);
	}

	Regex::new(r"\d+")
		.ok()
		.and_then(|re| re.find(trimmed).and_then(|m| m.as_str().parse().ok()))
}
