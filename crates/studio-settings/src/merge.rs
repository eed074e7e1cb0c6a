//! Deep merge of settings documents
//!
//! Namespaces merge key by key, everything else is atomic: a later list or ACL
//! replaces the earlier one entirely.

use crate::value::{Document, Node};

/// Merges `overlay` into `target`, overlay wins at the leaves
pub fn merge_into(target: &mut Document, overlay: &Document) {
	for (key, node) in overlay.iter() {
		match (target.get_mut(key), node) {
			(Some(Node::Namespace(existing)), Node::Namespace(incoming)) => {
				merge_into(existing, incoming);
			}
			_ => {
				target.insert(key.clone(), node.clone());
			}
		}
	}
}

/// Merges documents in order, later ones take precedence
pub fn merge<'a, I>(docs: I) -> Document
where
	I: IntoIterator<Item = &'a Document>,
{
	let mut out = Document::new();
	for doc in docs {
		merge_into(&mut out, doc);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::{AclRoles, AclSetting, SettingValue};

	#[test]
	fn test_recursive_at_namespace() {
		let a = Document::new().with("a.x", 1_i64).with("a.y", 2_i64);
		let b = Document::new().with("a.y", 3_i64);

		assert_eq!(merge([&a, &b]), Document::new().with("a.x", 1_i64).with("a.y", 3_i64));
	}

	#[test]
	fn test_lists_are_replaced() {
		let list = |items: &[i64]| SettingValue::List(items.iter().map(|i| (*i).into()).collect());
		let a = Document::new().with("a.l", list(&[1, 2]));
		let b = Document::new().with("a.l", list(&[3]));

		assert_eq!(merge([&a, &b]).value("a.l"), Some(&list(&[3])));
	}

	#[test]
	fn test_acl_is_atomic() {
		let mut first = AclRoles::new();
		first.insert("ROLE_A".into(), vec!["read".into()]);
		first.insert("ROLE_B".into(), vec!["read".into()]);
		let mut second = AclRoles::new();
		second.insert("ROLE_C".into(), vec!["write".into()]);

		let a = Document::new().with("upload.acl", SettingValue::Acl(AclSetting::Roles(first)));
		let b = Document::new()
			.with("upload.acl", SettingValue::Acl(AclSetting::Roles(second.clone())));

		assert_eq!(
			merge([&a, &b]).value("upload.acl"),
			Some(&SettingValue::Acl(AclSetting::Roles(second)))
		);
	}

	#[test]
	fn test_inputs_are_untouched() {
		let a = Document::new().with("a.x", 1_i64);
		let b = Document::new().with("a.x", 2_i64).with("b.z", true);
		let merged = merge([&a, &b]);

		assert_eq!(a.get_int("a.x"), Some(1));
		assert_eq!(merged.get_int("a.x"), Some(2));
		assert_eq!(merged.get_bool("b.z"), Some(true));
	}

	#[test]
	fn test_empty_inputs() {
		assert!(merge(std::iter::empty::<&Document>()).is_empty());
		let a = Document::new().with("a.x", "v");
		assert_eq!(merge([&Document::new(), &a, &Document::new()]), a);
	}
}

// vim: ts=4
