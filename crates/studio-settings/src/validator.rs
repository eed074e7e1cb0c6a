//! Leaf validators
//!
//! Each validator checks a raw, untrusted JSON value and turns it into a
//! [`SettingValue`]. With `allow_coercion` set, string input is converted to
//! the target type; this is only enabled for sources that can't carry types,
//! i.e. URL query parameters.

use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::prelude::*;
use crate::value::{AclRoles, AclSetting, FieldState, SettingValue};

/// Reason a single value was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	Type { expected: &'static str, found: &'static str },
	Coercion { expected: &'static str, input: String },
	NotPositive(i64),
	InvalidChoice { found: String, choices: &'static [&'static str] },
	ArrayLiteral(String),
	Element { index: usize, inner: Box<ValidationError> },
	Acl(String),
	Url(String),
	Untrusted(Source),
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValidationError::Type { expected, found } => {
				write!(f, "expected {}, found {}", expected, found)
			}
			ValidationError::Coercion { expected, input } => {
				write!(f, "cannot read {:?} as {}", input, expected)
			}
			ValidationError::NotPositive(n) => write!(f, "must be positive, got {}", n),
			ValidationError::InvalidChoice { found, choices } => {
				write!(f, "{:?} is not one of: {}", found, choices.join(", "))
			}
			ValidationError::ArrayLiteral(msg) => write!(f, "invalid array literal: {}", msg),
			ValidationError::Element { index, inner } => {
				write!(f, "element {}: {}", index, inner)
			}
			ValidationError::Acl(msg) => write!(f, "invalid ACL: {}", msg),
			ValidationError::Url(msg) => write!(f, "invalid server URL: {}", msg),
			ValidationError::Untrusted(source) => {
				write!(f, "may only be set by the server settings file, not via {}", source)
			}
		}
	}
}

impl std::error::Error for ValidationError {}

/// JSON type name for diagnostics
pub(crate) fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Validator of a single schema leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
	String,
	Int,
	PositiveInt,
	Bool,
	FieldState,
	/// Opencast server base URL
	ServerUrl,
	Acl,
	Array(Box<Validator>),
	/// Rejects every source but the server settings file
	OnlyFromServer(Box<Validator>),
}

impl Validator {
	pub fn array(element: Validator) -> Self {
		Validator::Array(Box::new(element))
	}

	pub fn only_from_server(inner: Validator) -> Self {
		Validator::OnlyFromServer(Box::new(inner))
	}

	pub fn validate(
		&self,
		raw: &Value,
		allow_coercion: bool,
		source: Source,
	) -> Result<SettingValue, ValidationError> {
		match self {
			Validator::String => validate_string(raw).map(SettingValue::String),
			Validator::Int => validate_int(raw, allow_coercion).map(SettingValue::Int),
			Validator::PositiveInt => {
				let n = validate_int(raw, allow_coercion)?;
				if n <= 0 {
					return Err(ValidationError::NotPositive(n));
				}
				Ok(SettingValue::Int(n))
			}
			Validator::Bool => validate_bool(raw, allow_coercion).map(SettingValue::Bool),
			Validator::FieldState => validate_field_state(raw).map(SettingValue::FieldState),
			Validator::ServerUrl => validate_server_url(raw).map(SettingValue::String),
			Validator::Acl => validate_acl(raw, allow_coercion).map(SettingValue::Acl),
			Validator::Array(element) => {
				validate_array(element, raw, allow_coercion, source).map(SettingValue::List)
			}
			Validator::OnlyFromServer(inner) => {
				if !source.is_trusted() {
					return Err(ValidationError::Untrusted(source));
				}
				inner.validate(raw, allow_coercion, source)
			}
		}
	}
}

fn validate_string(raw: &Value) -> Result<String, ValidationError> {
	match raw {
		Value::String(s) => Ok(s.clone()),
		other => Err(ValidationError::Type { expected: "string", found: json_type(other) }),
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn validate_int(raw: &Value, allow_coercion: bool) -> Result<i64, ValidationError> {
	match raw {
		Value::Number(n) => {
			if let Some(i) = n.as_i64() {
				return Ok(i);
			}
			// TOML floats like `5.0` still denote an integer
			match n.as_f64() {
				Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
					Ok(f as i64)
				}
				_ => Err(ValidationError::Type { expected: "integer", found: "number" }),
			}
		}
		Value::String(s) if allow_coercion => {
			let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
			if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
				return Err(ValidationError::Coercion { expected: "integer", input: s.clone() });
			}
			s.parse::<i64>()
				.map_err(|_| ValidationError::Coercion { expected: "integer", input: s.clone() })
		}
		other => Err(ValidationError::Type { expected: "integer", found: json_type(other) }),
	}
}

fn validate_bool(raw: &Value, allow_coercion: bool) -> Result<bool, ValidationError> {
	match raw {
		Value::Bool(b) => Ok(*b),
		Value::String(s) if allow_coercion => match s.as_str() {
			"true" => Ok(true),
			"false" => Ok(false),
			_ => Err(ValidationError::Coercion { expected: "boolean", input: s.clone() }),
		},
		other => Err(ValidationError::Type { expected: "boolean", found: json_type(other) }),
	}
}

fn validate_field_state(raw: &Value) -> Result<FieldState, ValidationError> {
	let s = validate_string(raw)?;
	FieldState::parse(&s)
		.ok_or(ValidationError::InvalidChoice { found: s, choices: FieldState::CHOICES })
}

fn validate_server_url(raw: &Value) -> Result<String, ValidationError> {
	let s = validate_string(raw)?;
	// Same origin as the app itself
	if s == "/" {
		return Ok(s);
	}
	let url = Url::parse(&s).map_err(|e| ValidationError::Url(e.to_string()))?;
	if url.scheme() != "http" && url.scheme() != "https" {
		return Err(ValidationError::Url(format!(
			"scheme must be http or https, got {:?}",
			url.scheme()
		)));
	}
	Ok(s.trim_end_matches('/').to_string())
}

fn validate_array(
	element: &Validator,
	raw: &Value,
	allow_coercion: bool,
	source: Source,
) -> Result<Vec<SettingValue>, ValidationError> {
	let decoded;
	let raw = match raw {
		Value::String(s) if allow_coercion => {
			decoded = serde_json::from_str::<Value>(s)
				.map_err(|e| ValidationError::ArrayLiteral(e.to_string()))?;
			&decoded
		}
		other => other,
	};
	let Value::Array(items) = raw else {
		return Err(ValidationError::Type { expected: "array", found: json_type(raw) });
	};

	items
		.iter()
		.enumerate()
		.map(|(index, item)| {
			element
				.validate(item, allow_coercion, source)
				.map_err(|e| ValidationError::Element { index, inner: Box::new(e) })
		})
		.collect()
}

fn validate_acl(raw: &Value, allow_coercion: bool) -> Result<AclSetting, ValidationError> {
	let decoded;
	let raw = match raw {
		Value::Bool(b) => return Ok(AclSetting::Enabled(*b)),
		Value::String(s) if s.starts_with('<') => return Ok(AclSetting::Template(s.clone())),
		Value::String(s) if allow_coercion => match s.as_str() {
			"true" => return Ok(AclSetting::Enabled(true)),
			"false" => return Ok(AclSetting::Enabled(false)),
			_ => {
				let text = percent_decode_str(s)
					.decode_utf8()
					.map_err(|e| ValidationError::Acl(e.to_string()))?;
				decoded = serde_json::from_str::<Value>(&text)
					.map_err(|e| ValidationError::Acl(e.to_string()))?;
				&decoded
			}
		},
		other => other,
	};
	let Value::Object(map) = raw else {
		return Err(ValidationError::Type { expected: "ACL object", found: json_type(raw) });
	};

	let mut roles = AclRoles::with_capacity(map.len());
	for (role, actions) in map {
		let Value::Array(actions) = actions else {
			return Err(ValidationError::Acl(format!(
				"actions of role {:?} must be an array, found {}",
				role,
				json_type(actions)
			)));
		};
		let actions = actions
			.iter()
			.map(|action| match action {
				Value::String(a) => Ok(a.clone()),
				other => Err(ValidationError::Acl(format!(
					"action of role {:?} must be a string, found {}",
					role,
					json_type(other)
				))),
			})
			.collect::<Result<Vec<_>, _>>()?;
		roles.insert(role.clone(), actions);
	}
	Ok(AclSetting::Roles(roles))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	const SRV: Source = Source::ServerFile;

	#[test]
	fn test_string_requires_string() {
		assert_eq!(Validator::String.validate(&json!("abc"), true, SRV), Ok("abc".into()));
		assert!(Validator::String.validate(&json!(5), true, SRV).is_err());
	}

	#[test]
	fn test_int_without_coercion() {
		assert_eq!(Validator::Int.validate(&json!(42), false, SRV), Ok(SettingValue::Int(42)));
		assert_eq!(Validator::Int.validate(&json!(-3.0), false, SRV), Ok(SettingValue::Int(-3)));
		assert!(Validator::Int.validate(&json!("42"), false, SRV).is_err());
		assert!(Validator::Int.validate(&json!(4.5), false, SRV).is_err());
	}

	#[test]
	fn test_int_coercion() {
		assert_eq!(Validator::Int.validate(&json!("+17"), true, SRV), Ok(SettingValue::Int(17)));
		assert_eq!(Validator::Int.validate(&json!("-8"), true, SRV), Ok(SettingValue::Int(-8)));
		for bad in ["", "+", "1.5", " 3", "3a", "0x10", "99999999999999999999"] {
			assert!(Validator::Int.validate(&json!(bad), true, SRV).is_err(), "{:?}", bad);
		}
	}

	#[test]
	fn test_positive_int() {
		assert_eq!(
			Validator::PositiveInt.validate(&json!("5000"), true, SRV),
			Ok(SettingValue::Int(5000))
		);
		assert_eq!(
			Validator::PositiveInt.validate(&json!(0), false, SRV),
			Err(ValidationError::NotPositive(0))
		);
		assert!(Validator::PositiveInt.validate(&json!(-1), false, SRV).is_err());
	}

	#[test]
	fn test_bool() {
		assert_eq!(Validator::Bool.validate(&json!(true), false, SRV), Ok(true.into()));
		assert_eq!(Validator::Bool.validate(&json!("false"), true, SRV), Ok(false.into()));
		assert!(Validator::Bool.validate(&json!("true"), false, SRV).is_err());
		assert!(Validator::Bool.validate(&json!("TRUE"), true, SRV).is_err());
		assert!(Validator::Bool.validate(&json!("1"), true, SRV).is_err());
	}

	#[test]
	fn test_field_state_names_choices() {
		assert_eq!(
			Validator::FieldState.validate(&json!("optional"), false, SRV),
			Ok(FieldState::Optional.into())
		);
		let err = Validator::FieldState.validate(&json!("shown"), true, SRV).unwrap_err();
		assert_eq!(err.to_string(), "\"shown\" is not one of: hidden, optional, required");
	}

	#[test]
	fn test_array_of_strings() {
		let v = Validator::array(Validator::String);
		assert_eq!(
			v.validate(&json!(["a", "b"]), false, SRV),
			Ok(SettingValue::List(vec!["a".into(), "b".into()]))
		);
		assert_eq!(
			v.validate(&json!("[\"x\"]"), true, SRV),
			Ok(SettingValue::List(vec!["x".into()]))
		);
		assert!(matches!(
			v.validate(&json!("x"), true, SRV),
			Err(ValidationError::ArrayLiteral(_))
		));
		assert!(v.validate(&json!("[\"x\"]"), false, SRV).is_err());
	}

	#[test]
	fn test_array_reports_element_position() {
		let v = Validator::array(Validator::String);
		let err = v.validate(&json!(["a", 3, "c"]), false, SRV).unwrap_err();
		assert!(matches!(err, ValidationError::Element { index: 1, .. }));
		assert!(err.to_string().starts_with("element 1:"));
	}

	#[test]
	fn test_acl_variants() {
		assert_eq!(
			Validator::Acl.validate(&json!(false), false, SRV),
			Ok(SettingValue::Acl(AclSetting::Enabled(false)))
		);
		assert_eq!(
			Validator::Acl.validate(&json!("true"), true, SRV),
			Ok(SettingValue::Acl(AclSetting::Enabled(true)))
		);
		assert_eq!(
			Validator::Acl.validate(&json!("<Policy/>"), false, SRV),
			Ok(SettingValue::Acl(AclSetting::Template("<Policy/>".into())))
		);

		let mut roles = AclRoles::new();
		roles.insert("ROLE_ADMIN".into(), vec!["read".into(), "write".into()]);
		let expected = Ok(SettingValue::Acl(AclSetting::Roles(roles)));
		assert_eq!(
			Validator::Acl.validate(&json!({ "ROLE_ADMIN": ["read", "write"] }), false, SRV),
			expected
		);
		assert_eq!(
			Validator::Acl.validate(
				&json!("%7B%22ROLE_ADMIN%22%3A%5B%22read%22%2C%22write%22%5D%7D"),
				true,
				SRV
			),
			expected
		);
	}

	#[test]
	fn test_acl_rejects_bad_shapes() {
		assert!(Validator::Acl.validate(&json!({ "ROLE_A": "read" }), false, SRV).is_err());
		assert!(Validator::Acl.validate(&json!({ "ROLE_A": [1] }), false, SRV).is_err());
		assert!(Validator::Acl.validate(&json!("{}"), false, SRV).is_err());
		assert!(Validator::Acl.validate(&json!(3), true, SRV).is_err());
	}

	#[test]
	fn test_server_url() {
		assert_eq!(
			Validator::ServerUrl.validate(&json!("https://oc.example.org/"), false, SRV),
			Ok("https://oc.example.org".into())
		);
		assert_eq!(Validator::ServerUrl.validate(&json!("/"), false, SRV), Ok("/".into()));
		assert!(Validator::ServerUrl.validate(&json!("ftp://oc.example.org"), false, SRV).is_err());
		assert!(Validator::ServerUrl.validate(&json!("oc.example.org"), false, SRV).is_err());
	}

	#[test]
	fn test_only_from_server() {
		let v = Validator::only_from_server(Validator::array(Validator::String));
		assert!(v.validate(&json!(["a.com"]), false, Source::ServerFile).is_ok());
		assert_eq!(
			v.validate(&json!(["a.com"]), false, Source::Url),
			Err(ValidationError::Untrusted(Source::Url))
		);
		assert_eq!(
			v.validate(&json!(["a.com"]), false, Source::LocalStorage),
			Err(ValidationError::Untrusted(Source::LocalStorage))
		);
	}
}

// vim: ts=4
