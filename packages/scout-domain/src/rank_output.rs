use regex::Regex;

/// Outcome of parsing a model's rerank response. The model is under no
/// obligation to honor the requested format, so callers must handle
/// `Unparseable` as an expected state, not a fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RankParse {
	Parsed(Vec<String>),
	Unparseable,
}

/// Extraction layers, most trusted first: the `||name||` delimiters the
/// prompt demands, then numbered-list lines, then bullet-list lines. The
/// first layer that yields at least one non-blank name wins.
const LAYER_PATTERNS: [&str; 3] = [
	r"\|\|(.*?)\|\|",
	r"(?m)^\s*\d+[.)]\s+(.*?)(?:\s+-\s|\s*\(|$)",
	r"(?m)^\s*[-*]\s+(.*?)(?:\s+-\s|\s*\(|$)",
];

pub fn parse_ranked_names(raw: &str) -> RankParse {
	for pattern in LAYER_PATTERNS {
		let Ok(re) = Regex::new(pattern) else {
			continue;
		};
		let names: Vec<String> = re
			.captures_iter(raw)
			.filter_map(|caps| caps.get(1))
			.map(|m| m.as_str().trim().to_string())
			.filter(|name| !name.is_empty())
			.collect();

		if !names.is_empty() {
			return RankParse::Parsed(names);
		}
	}

	RankParse::Unparseable
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_delimited_names() {
		let raw = "||Java Coding Test||\n||SQL Basics||\n";

		assert_eq!(
			parse_ranked_names(raw),
			RankParse::Parsed(vec!["Java Coding Test".to_string(), "SQL Basics".to_string()])
		);
	}

	#[test]
	fn delimited_layer_wins_over_numbered_lines() {
		let raw = "1. Wrong Name\n||Right Name||";

		assert_eq!(parse_ranked_names(raw), RankParse::Parsed(vec!["Right Name".to_string()]));
	}

	#[test]
	fn falls_back_to_numbered_lines() {
		let raw = "Here is my ranking:\n1. Java Coding Test\n2) SQL Basics (strong match)\n";

		assert_eq!(
			parse_ranked_names(raw),
			RankParse::Parsed(vec!["Java Coding Test".to_string(), "SQL Basics".to_string()])
		);
	}

	#[test]
	fn falls_back_to_bullet_lines() {
		let raw = "- Java Coding Test\n* SQL Basics\n";

		assert_eq!(
			parse_ranked_names(raw),
			RankParse::Parsed(vec!["Java Coding Test".to_string(), "SQL Basics".to_string()])
		);
	}

	#[test]
	fn ignores_blank_captures() {
		let raw = "|| ||\n||Java Coding Test||";

		assert_eq!(
			parse_ranked_names(raw),
			RankParse::Parsed(vec!["Java Coding Test".to_string()])
		);
	}

	#[test]
	fn tolerates_surrounding_prose() {
		let raw = "Sure! Based on the query, the best assessments are:\n\n\
			||Java Coding Test||\n||SQL Basics||\n\nLet me know if you need more.";

		assert_eq!(
			parse_ranked_names(raw),
			RankParse::Parsed(vec!["Java Coding Test".to_string(), "SQL Basics".to_string()])
		);
	}

	#[test]
	fn empty_input_is_unparseable() {
		assert_eq!(parse_ranked_names(""), RankParse::Unparseable);
	}

	#[test]
	fn prose_without_lists_is_unparseable() {
		let raw = "I am sorry, I cannot rank these assessments.";

		assert_eq!(parse_ranked_names(raw), RankParse::Unparseable);
	}
}
