//! Validation engine
//!
//! Walks an untrusted raw object and the schema in lockstep. Every failure is
//! local to its key: the key is dropped with a warning and its siblings are
//! still validated. Nothing in here returns an error to the caller.

use serde_json::Value;
use std::fmt;

use crate::prelude::*;
use crate::schema::{SchemaNode, schema};
use crate::validator::{ValidationError, json_type};
use crate::value::{Document, Node};

/// Why a key was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
	/// Key is not part of the schema
	Unrecognized,
	/// Schema expects a namespace here
	NotANamespace,
	Invalid(ValidationError),
}

/// A dropped key together with its raw value
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
	pub path: String,
	pub value: Value,
	pub kind: IssueKind,
}

impl fmt::Display for Issue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let path = if self.path.is_empty() { "<root>" } else { &self.path };
		match &self.kind {
			IssueKind::Unrecognized => write!(f, "'{}' is not a valid settings key", path),
			IssueKind::NotANamespace => {
				write!(f, "'{}' must be a table, found {}", path, json_type(&self.value))
			}
			IssueKind::Invalid(err) => {
				write!(f, "'{}' has invalid value {}: {}", path, self.value, err)
			}
		}
	}
}

/// Validation outcome: the sanitized document and everything that was dropped
#[derive(Debug, Clone, Default)]
pub struct Validated {
	pub document: Document,
	pub issues: Vec<Issue>,
}

/// Validates `raw` against the application schema, logging every dropped key
pub fn validate(raw: &Value, allow_coercion: bool, source: Source, description: &str) -> Document {
	validate_report(raw, allow_coercion, source, description).document
}

/// Like [`validate`], but also returns the dropped keys
pub fn validate_report(
	raw: &Value,
	allow_coercion: bool,
	source: Source,
	description: &str,
) -> Validated {
	validate_with_schema(schema(), raw, allow_coercion, source, description)
}

/// Validates `raw` against an arbitrary schema
pub fn validate_with_schema(
	schema: &SchemaNode,
	raw: &Value,
	allow_coercion: bool,
	source: Source,
	description: &str,
) -> Validated {
	let mut walker = Walker { allow_coercion, source, issues: Vec::new() };
	let document = match walker.walk(schema, raw, "") {
		Some(Node::Namespace(doc)) => doc,
		// A leaf root only happens with hand-built schemas in tests
		Some(Node::Value(_)) | None => Document::new(),
	};

	for issue in &walker.issues {
		warn!(source = %source, "Ignoring setting from {}: {}", description, issue);
	}
	debug!(
		"Validated settings from {}: {} keys kept, {} dropped",
		description,
		document.len(),
		walker.issues.len()
	);

	Validated { document, issues: walker.issues }
}

struct Walker {
	allow_coercion: bool,
	source: Source,
	issues: Vec<Issue>,
}

impl Walker {
	fn walk(&mut self, schema: &SchemaNode, raw: &Value, path: &str) -> Option<Node> {
		match schema {
			SchemaNode::Leaf(validator) => {
				match validator.validate(raw, self.allow_coercion, self.source) {
					Ok(value) => Some(Node::Value(value)),
					Err(err) => {
						self.drop_key(path, raw, IssueKind::Invalid(err));
						None
					}
				}
			}
			SchemaNode::Namespace(children) => {
				let Value::Object(map) = raw else {
					self.drop_key(path, raw, IssueKind::NotANamespace);
					return None;
				};

				let mut doc = Document::new();
				for (key, value) in map {
					let child_path =
						if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
					match children.get(key.as_str()) {
						Some(child) => match self.walk(child, value, &child_path) {
							Some(Node::Namespace(inner)) if inner.is_empty() => {}
							Some(node) => {
								doc.insert(key.clone(), node);
							}
							None => {}
						},
						None => self.drop_key(&child_path, value, IssueKind::Unrecognized),
					}
				}
				Some(Node::Namespace(doc))
			}
		}
	}

	fn drop_key(&mut self, path: &str, raw: &Value, kind: IssueKind) {
		self.issues.push(Issue { path: path.to_string(), value: raw.clone(), kind });
	}
}


// vim: ts=4
