use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use pgschema_core::StringSchema;

use super::first_enum_value;

const PAD_CHAR: char = 'x';

/// Deterministic UUID-shaped identifier for `table.property`.
///
/// The first 16 bytes of the SHA-256 digest of `"<table>.<property>"`,
/// rendered as 8-4-4-4-12 lowercase hex.
pub fn sample_uuid(table: &str, property: &str) -> String {
    let digest = Sha256::digest(format!("{table}.{property}").as_bytes());
    let mut bytes = [0_u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes).to_string()
}

pub(super) fn sample_string(table: &str, property: &str, schema: &StringSchema) -> Value {
    if let Some(default) = &schema.default {
        return Value::String(default.clone());
    }
    if let Some(value) = &schema.const_value {
        return Value::String(value.clone());
    }
    if let Some(value) = first_enum_value(&schema.enum_values) {
        return value.clone();
    }

    let text = pattern_hint(property, schema.pattern.as_deref())
        .map(str::to_string)
        .or_else(|| property.contains("timezone").then(|| "Asia/Tehran".to_string()))
        .or_else(|| format_hint(table, property, schema.format.as_deref()))
        .or_else(|| property.ends_with("_id").then(|| sample_uuid(table, property)))
        .or_else(|| name_hint(property).map(str::to_string))
        .unwrap_or_else(|| clamp(format!("{} Sample", title_case(property)), schema));
    Value::String(text)
}

/// Matchers run against the pattern text itself: they recognise a pattern
/// pinned to one literal code, such as `^EUR$` or `^DE$`.
struct CodePatterns {
    currency: Regex,
    country: Regex,
}

fn code_patterns() -> Option<&'static CodePatterns> {
    static CODE_PATTERNS: OnceLock<Option<CodePatterns>> = OnceLock::new();
    CODE_PATTERNS
        .get_or_init(|| {
            Some(CodePatterns {
                currency: Regex::new(r"\^[A-Z]{3}\$").ok()?,
                country: Regex::new(r"\^[A-Z]{2}\$").ok()?,
            })
        })
        .as_ref()
}

fn pattern_hint(property: &str, pattern: Option<&str>) -> Option<&'static str> {
    let pattern = pattern?;
    let codes = code_patterns();
    if codes.is_some_and(|codes| codes.currency.is_match(pattern)) {
        Some("USD")
    } else if codes.is_some_and(|codes| codes.country.is_match(pattern)) {
        Some("US")
    } else if property.contains("slug") {
        Some("sample-slug")
    } else {
        None
    }
}

fn format_hint(table: &str, property: &str, format: Option<&str>) -> Option<String> {
    let value = match format? {
        "uuid" => return Some(sample_uuid(table, property)),
        "email" => "sample@example.com",
        "uri" | "url" => "https://example.com",
        "date-time" => "2024-01-01T00:00:00Z",
        "date" => "2024-01-01",
        "time" => "12:00:00",
        "phone" => "+989121234567",
        _ => return None,
    };
    Some(value.to_string())
}

fn name_hint(property: &str) -> Option<&'static str> {
    if property.to_lowercase().contains("currency") {
        Some("IRR")
    } else if property.contains("country_code") {
        Some("IR")
    } else {
        None
    }
}

/// `created_by_name` -> `Created By Name`.
fn title_case(property: &str) -> String {
    property
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Truncate to `maxLength`, then right-pad to `minLength`. Lengths count chars.
fn clamp(value: String, schema: &StringSchema) -> String {
    let mut result = match schema.max_length {
        Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
        _ => value,
    };
    if let Some(min) = schema.min_length {
        let length = result.chars().count();
        if length < min {
            result.extend(std::iter::repeat_n(PAD_CHAR, min - length));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string_schema() -> StringSchema {
        StringSchema::default()
    }

    fn sample(property: &str, schema: StringSchema) -> Value {
        sample_string("accounts", property, &schema)
    }

    #[test]
    fn uuid_is_stable_and_well_formed() {
        let first = sample_uuid("users", "id");
        assert_eq!(first, sample_uuid("users", "id"));
        assert_eq!(first.len(), 36);
        let groups: Vec<usize> = first.split('-').map(str::len).collect();
        assert_eq!(groups, [8, 4, 4, 4, 12]);
        assert!(
            first
                .chars()
                .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert_ne!(first, sample_uuid("users", "email"));
        assert_ne!(first, sample_uuid("orders", "id"));
    }

    #[test]
    fn default_const_and_enum_take_precedence() {
        let schema = StringSchema {
            default: Some("fallback".to_string()),
            const_value: Some("fixed".to_string()),
            format: Some("email".to_string()),
            ..string_schema()
        };
        assert_eq!(sample("contact", schema), json!("fallback"));

        let schema = StringSchema {
            const_value: Some("fixed".to_string()),
            enum_values: vec![json!("a")],
            ..string_schema()
        };
        assert_eq!(sample("contact", schema), json!("fixed"));

        let schema = StringSchema {
            enum_values: vec![Value::Null, json!("active"), json!("closed")],
            format: Some("uuid".to_string()),
            ..string_schema()
        };
        assert_eq!(sample("status", schema), json!("active"));
    }

    #[test]
    fn pattern_hints() {
        let with_pattern = |pattern: &str| StringSchema {
            pattern: Some(pattern.to_string()),
            ..string_schema()
        };
        assert_eq!(sample("code", with_pattern("^EUR$")), json!("USD"));
        assert_eq!(sample("region", with_pattern("^DE$")), json!("US"));
        assert_eq!(sample("url_slug", with_pattern("^(EUR|USD)$")), json!("sample-slug"));
        assert_eq!(sample("url_slug", with_pattern("^[a-z0-9-]+$")), json!("sample-slug"));
        assert_eq!(sample("code", with_pattern("^[0-9]+$")), json!("Code Sample"));
    }

    #[test]
    fn character_class_patterns_fall_through_to_name_hints() {
        let with_pattern = |pattern: &str| StringSchema {
            pattern: Some(pattern.to_string()),
            ..string_schema()
        };
        assert_eq!(sample("currency", with_pattern("^[A-Z]{3}$")), json!("IRR"));
        assert_eq!(sample("country_code", with_pattern("^[A-Z]{2}$")), json!("IR"));
        assert_eq!(sample("code", with_pattern("^[A-Z]{3}$")), json!("Code Sample"));
    }

    #[test]
    fn format_hints() {
        let with_format = |format: &str| StringSchema {
            format: Some(format.to_string()),
            ..string_schema()
        };
        assert_eq!(sample("contact", with_format("email")), json!("sample@example.com"));
        assert_eq!(sample("homepage", with_format("uri")), json!("https://example.com"));
        assert_eq!(sample("homepage", with_format("url")), json!("https://example.com"));
        assert_eq!(sample("created_at", with_format("date-time")), json!("2024-01-01T00:00:00Z"));
        assert_eq!(sample("born_on", with_format("date")), json!("2024-01-01"));
        assert_eq!(sample("opens_at", with_format("time")), json!("12:00:00"));
        assert_eq!(sample("mobile", with_format("phone")), json!("+989121234567"));
        assert_eq!(
            sample("external_ref", with_format("uuid")),
            json!(sample_uuid("accounts", "external_ref"))
        );
    }

    #[test]
    fn name_hints() {
        assert_eq!(sample("timezone", string_schema()), json!("Asia/Tehran"));
        assert_eq!(
            sample("owner_id", string_schema()),
            json!(sample_uuid("accounts", "owner_id"))
        );
        assert_eq!(sample("BaseCurrency", string_schema()), json!("IRR"));
        assert_eq!(sample("country_code", string_schema()), json!("IR"));
    }

    #[test]
    fn timezone_beats_format() {
        let schema = StringSchema {
            format: Some("email".to_string()),
            ..string_schema()
        };
        assert_eq!(sample("default_timezone", schema), json!("Asia/Tehran"));
    }

    #[test]
    fn fallback_title_cases_property_name() {
        assert_eq!(sample("display_name", string_schema()), json!("Display Name Sample"));
        assert_eq!(title_case("a__b"), "A  B");
    }

    #[test]
    fn fallback_truncates_to_max_length() {
        let schema = StringSchema {
            max_length: Some(5),
            ..string_schema()
        };
        assert_eq!(sample("display_name", schema), json!("Displ"));
    }

    #[test]
    fn fallback_pads_to_min_length() {
        let schema = StringSchema {
            min_length: Some(8),
            max_length: Some(3),
            ..string_schema()
        };
        assert_eq!(sample("note", schema), json!("Notxxxxx"));

        let schema = StringSchema {
            min_length: Some(20),
            ..string_schema()
        };
        assert_eq!(sample("note", schema), json!("Note Samplexxxxxxxxx"));
    }
}
