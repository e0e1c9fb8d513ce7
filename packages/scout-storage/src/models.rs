use std::collections::HashMap;

use qdrant_client::qdrant::{Value as QdrantValue, value::Kind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use scout_domain::{duration, test_type};

/// One catalog record as stored in a vector-store payload. The catalog is
/// scraped from vendor pages, so every field except `name` and `url` may be
/// missing, numeric, or free text.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Assessment {
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub duration: Option<DurationField>,
	#[serde(default)]
	pub test_type: Option<TestTypeField>,
	#[serde(default)]
	pub remote_testing: Option<FlagField>,
	#[serde(default)]
	pub adaptive_support: Option<FlagField>,
	pub url: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationField {
	Number(i64),
	Text(String),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TestTypeField {
	Joined(String),
	Split(Vec<String>),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FlagField {
	Text(String),
	Truth(bool),
}

impl Assessment {
	/// Duration coerced to whole minutes; `None` when the payload value is
	/// missing or unparseable.
	pub fn duration_minutes(&self) -> Option<i64> {
		match self.duration.as_ref()? {
			DurationField::Number(minutes) => Some(*minutes),
			DurationField::Text(raw) => duration::coerce_minutes(raw),
		}
	}

	pub fn test_type_list(&self) -> Vec<String> {
		match &self.test_type {
			Some(TestTypeField::Joined(raw)) => test_type::split_categories(raw),
			Some(TestTypeField::Split(list)) => list.clone(),
			None => Vec::new(),
		}
	}

	pub fn remote_support_text(&self) -> String {
		flag_text(self.remote_testing.as_ref())
	}

	pub fn adaptive_support_text(&self) -> String {
		flag_text(self.adaptive_support.as_ref())
	}
}

fn flag_text(flag: Option<&FlagField>) -> String {
	match flag {
		Some(FlagField::Text(raw)) => raw.clone(),
		Some(FlagField::Truth(true)) => "Yes".to_string(),
		Some(FlagField::Truth(false)) => "No".to_string(),
		None => String::new(),
	}
}

/// Decodes one search hit's payload. Returns `None` when the payload does
/// not carry a usable assessment record (no name or no url); callers log
/// and skip such points instead of failing the search.
pub fn assessment_from_payload(payload: &HashMap<String, QdrantValue>) -> Option<Assessment> {
	let mut fields = serde_json::Map::with_capacity(payload.len());

	for (key, value) in payload {
		fields.insert(key.clone(), kind_to_json(value));
	}

	let assessment: Assessment = serde_json::from_value(Value::Object(fields)).ok()?;

	if assessment.name.trim().is_empty() || assessment.url.trim().is_empty() {
		return None;
	}

	Some(assessment)
}

fn kind_to_json(value: &QdrantValue) -> Value {
	match &value.kind {
		None | Some(Kind::NullValue(_)) => Value::Null,
		Some(Kind::BoolValue(flag)) => Value::Bool(*flag),
		Some(Kind::IntegerValue(number)) => Value::from(*number),
		Some(Kind::DoubleValue(number)) => Value::from(*number),
		Some(Kind::StringValue(text)) => Value::String(text.clone()),
		Some(Kind::ListValue(list)) => Value::Array(list.values.iter().map(kind_to_json).collect()),
		Some(Kind::StructValue(fields)) => Value::Object(
			fields.fields.iter().map(|(key, value)| (key.clone(), kind_to_json(value))).collect(),
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payload(fields: &[(&str, QdrantValue)]) -> HashMap<String, QdrantValue> {
		fields.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
	}

	#[test]
	fn decodes_text_heavy_payload() {
		let payload = payload(&[
			("name", QdrantValue::from("Java Coding Test")),
			("description", QdrantValue::from("Core Java skills")),
			("duration", QdrantValue::from("45 minutes")),
			("test_type", QdrantValue::from("Knowledge & Skills, Simulations")),
			("remote_testing", QdrantValue::from("Yes")),
			("adaptive_support", QdrantValue::from("No")),
			("url", QdrantValue::from("https://example.com/java")),
		]);
		let assessment =
			assessment_from_payload(&payload).expect("Failed to decode assessment payload.");

		assert_eq!(assessment.name, "Java Coding Test");
		assert_eq!(assessment.duration_minutes(), Some(45));
		assert_eq!(
			assessment.test_type_list(),
			vec!["Knowledge & Skills".to_string(), "Simulations".to_string()]
		);
		assert_eq!(assessment.remote_support_text(), "Yes");
	}

	#[test]
	fn decodes_numeric_duration_and_bool_flags() {
		let payload = payload(&[
			("name", QdrantValue::from("SQL Basics")),
			("duration", QdrantValue::from(30_i64)),
			("remote_testing", QdrantValue::from(true)),
			("adaptive_support", QdrantValue::from(false)),
			("url", QdrantValue::from("https://example.com/sql")),
		]);
		let assessment =
			assessment_from_payload(&payload).expect("Failed to decode assessment payload.");

		assert_eq!(assessment.duration_minutes(), Some(30));
		assert_eq!(assessment.remote_support_text(), "Yes");
		assert_eq!(assessment.adaptive_support_text(), "No");
		assert!(assessment.test_type_list().is_empty());
	}

	#[test]
	fn skips_payload_without_name() {
		let payload = payload(&[("url", QdrantValue::from("https://example.com/anon"))]);

		assert!(assessment_from_payload(&payload).is_none());
	}

	#[test]
	fn skips_payload_with_blank_url() {
		let payload =
			payload(&[("name", QdrantValue::from("Nameless")), ("url", QdrantValue::from(" "))]);

		assert!(assessment_from_payload(&payload).is_none());
	}

	#[test]
	fn unparseable_duration_is_none() {
		let payload = payload(&[
			("name", QdrantValue::from("Untimed Exercise")),
			("duration", QdrantValue::from("N/A")),
			("url", QdrantValue::from("https://example.com/untimed")),
		]);
		let assessment =
			assessment_from_payload(&payload).expect("Failed to decode assessment payload.");

		assert_eq!(assessment.duration_minutes(), None);
	}
}
