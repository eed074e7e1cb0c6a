//! Settings schema
//!
//! The schema is the only place that decides which keys exist. It is built
//! once and never changes for the lifetime of the process.

use indexmap::IndexMap;
use std::sync::LazyLock;

use crate::validator::Validator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
	Leaf(Validator),
	Namespace(IndexMap<&'static str, SchemaNode>),
}

impl SchemaNode {
	pub fn namespace<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (&'static str, SchemaNode)>,
	{
		SchemaNode::Namespace(entries.into_iter().collect())
	}

	pub fn leaf(validator: Validator) -> Self {
		SchemaNode::Leaf(validator)
	}

	/// Looks up a dotted path
	pub fn get_path(&self, path: &str) -> Option<&SchemaNode> {
		path.split('.').try_fold(self, |node, segment| match node {
			SchemaNode::Namespace(children) => children.get(segment),
			SchemaNode::Leaf(_) => None,
		})
	}

	/// All leaf paths in declaration order
	pub fn leaf_paths(&self) -> Vec<String> {
		fn collect(node: &SchemaNode, prefix: &str, out: &mut Vec<String>) {
			match node {
				SchemaNode::Leaf(_) => out.push(prefix.to_string()),
				SchemaNode::Namespace(children) => {
					for (key, child) in children {
						let path = if prefix.is_empty() {
							(*key).to_string()
						} else {
							format!("{}.{}", prefix, key)
						};
						collect(child, &path, out);
					}
				}
			}
		}
		let mut out = Vec::new();
		collect(self, "", &mut out);
		out
	}
}

static SCHEMA: LazyLock<SchemaNode> = LazyLock::new(build_schema);

/// The settings schema of the application
pub fn schema() -> &'static SchemaNode {
	&SCHEMA
}

fn build_schema() -> SchemaNode {
	use SchemaNode as S;
	use Validator as V;

	S::namespace([
		(
			"opencast",
			S::namespace([
				("serverUrl", S::leaf(V::ServerUrl)),
				("loginName", S::leaf(V::String)),
				("loginPassword", S::leaf(V::String)),
				("loginProvided", S::leaf(V::Bool)),
			]),
		),
		(
			"upload",
			S::namespace([
				("seriesId", S::leaf(V::String)),
				("workflowId", S::leaf(V::String)),
				("acl", S::leaf(V::Acl)),
				("dcc", S::leaf(V::String)),
				("titleField", S::leaf(V::FieldState)),
				("presenterField", S::leaf(V::FieldState)),
			]),
		),
		(
			"recording",
			S::namespace([
				("videoBitrate", S::leaf(V::PositiveInt)),
				("mimes", S::leaf(V::array(V::String))),
			]),
		),
		("review", S::namespace([("disableCutting", S::leaf(V::Bool))])),
		(
			"display",
			S::namespace([
				("maxHeight", S::leaf(V::PositiveInt)),
				("maxFps", S::leaf(V::PositiveInt)),
			]),
		),
		(
			"camera",
			S::namespace([
				("maxHeight", S::leaf(V::PositiveInt)),
				("maxFps", S::leaf(V::PositiveInt)),
			]),
		),
		(
			"return",
			S::namespace([
				("allowedDomains", S::leaf(V::only_from_server(V::array(V::String)))),
				("label", S::leaf(V::String)),
				("target", S::leaf(V::String)),
			]),
		),
	])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_schema_is_two_levels_deep() {
		let paths = schema().leaf_paths();
		assert!(paths.iter().all(|p| p.split('.').count() == 2), "{:?}", paths);
		assert!(paths.contains(&"opencast.loginName".to_string()));
		assert!(paths.contains(&"return.allowedDomains".to_string()));
	}

	#[test]
	fn test_allowed_domains_is_server_only() {
		assert!(matches!(
			schema().get_path("return.allowedDomains"),
			Some(SchemaNode::Leaf(Validator::OnlyFromServer(_)))
		));
		assert!(matches!(
			schema().get_path("return.target"),
			Some(SchemaNode::Leaf(Validator::String))
		));
	}

	#[test]
	fn test_get_path_misses() {
		assert!(schema().get_path("opencast.nope").is_none());
		assert!(schema().get_path("opencast.loginName.deeper").is_none());
		assert!(matches!(schema().get_path("upload"), Some(SchemaNode::Namespace(_))));
	}
}

// vim: ts=4
