//! Validated settings values and documents
//!
//! A [`Document`] only ever holds values that passed schema validation. It is an
//! ordered map without any implicit members, namespaces nest exactly one level
//! in practice but the type does not limit depth.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// State of a metadata form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
	Hidden,
	Optional,
	Required,
}

impl FieldState {
	pub const CHOICES: &'static [&'static str] = &["hidden", "optional", "required"];

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"hidden" => Some(FieldState::Hidden),
			"optional" => Some(FieldState::Optional),
			"required" => Some(FieldState::Required),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			FieldState::Hidden => "hidden",
			FieldState::Optional => "optional",
			FieldState::Required => "required",
		}
	}
}

impl fmt::Display for FieldState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Role name to permitted actions. Compared without regard to role order.
pub type AclRoles = IndexMap<String, Vec<String>>;

/// Access control setting for uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AclSetting {
	/// `true` uploads the default ACL, `false` uploads none
	Enabled(bool),
	/// Serialized ACL document in another format, passed through untouched
	Template(String),
	Roles(AclRoles),
}

/// A validated leaf value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool),
	Int(i64),
	String(String),
	FieldState(FieldState),
	List(Vec<SettingValue>),
	Acl(AclSetting),
}

impl SettingValue {
	/// Get the type name for diagnostics
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::Int(_) => "int",
			SettingValue::String(_) => "string",
			SettingValue::FieldState(_) => "field state",
			SettingValue::List(_) => "list",
			SettingValue::Acl(_) => "acl",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[SettingValue]> {
		match self {
			SettingValue::List(items) => Some(items),
			_ => None,
		}
	}
}

impl From<&str> for SettingValue {
	fn from(s: &str) -> Self {
		SettingValue::String(s.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(s: String) -> Self {
		SettingValue::String(s)
	}
}

impl From<i64> for SettingValue {
	fn from(i: i64) -> Self {
		SettingValue::Int(i)
	}
}

impl From<bool> for SettingValue {
	fn from(b: bool) -> Self {
		SettingValue::Bool(b)
	}
}

impl From<FieldState> for SettingValue {
	fn from(state: FieldState) -> Self {
		SettingValue::FieldState(state)
	}
}

/// Either a nested namespace or a leaf value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
	Namespace(Document),
	Value(SettingValue),
}

/// Validated configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Node>);

impl Document {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn get(&self, key: &str) -> Option<&Node> {
		self.0.get(key)
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
		self.0.get_mut(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
		self.0.insert(key.into(), node)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
		self.0.iter()
	}

	/// Looks up a dotted path (`"opencast.loginName"`)
	pub fn get_path(&self, path: &str) -> Option<&Node> {
		let mut segments = path.split('.');
		let mut node = self.0.get(segments.next()?)?;
		for segment in segments {
			match node {
				Node::Namespace(doc) => node = doc.0.get(segment)?,
				Node::Value(_) => return None,
			}
		}
		Some(node)
	}

	/// True when every segment of the dotted path exists
	pub fn contains_path(&self, path: &str) -> bool {
		self.get_path(path).is_some()
	}

	/// Looks up a leaf value by dotted path
	pub fn value(&self, path: &str) -> Option<&SettingValue> {
		match self.get_path(path)? {
			Node::Value(value) => Some(value),
			Node::Namespace(_) => None,
		}
	}

	pub fn get_str(&self, path: &str) -> Option<&str> {
		self.value(path)?.as_str()
	}

	pub fn get_int(&self, path: &str) -> Option<i64> {
		self.value(path)?.as_int()
	}

	pub fn get_bool(&self, path: &str) -> Option<bool> {
		self.value(path)?.as_bool()
	}

	/// Sets a leaf value, creating namespaces along the way.
	/// A leaf standing where a namespace is needed gets replaced.
	pub fn set_path(&mut self, path: &str, value: impl Into<SettingValue>) {
		match path.split_once('.') {
			None => {
				self.0.insert(path.to_string(), Node::Value(value.into()));
			}
			Some((head, rest)) => {
				let entry =
					self.0.entry(head.to_string()).or_insert_with(|| Node::Namespace(Self::new()));
				if let Node::Value(_) = entry {
					*entry = Node::Namespace(Self::new());
				}
				if let Node::Namespace(doc) = entry {
					doc.set_path(rest, value);
				}
			}
		}
	}

	/// Builder-style [`Document::set_path`]
	pub fn with(mut self, path: &str, value: impl Into<SettingValue>) -> Self {
		self.set_path(path, value);
		self
	}

	pub fn to_json(&self) -> Value {
		serde_json::to_value(self).unwrap_or_default()
	}
}

impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_json())
	}
}


// vim: ts=4
