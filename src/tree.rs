use crate::path::NodePath;
use crate::value::{PkValue, ValueKind};

/// One row of the tree view: a disposable projection of a single document
/// location. Rebuilt from scratch after every accepted mutation; edits never
/// touch a node directly, they go back through the store by path.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    /// Key or stringified index under the parent container.
    pub label: String,
    /// Scalar display text, or a container marker.
    pub value_text: String,
    pub path: NodePath,
    pub kind: ValueKind,
    pub editable: bool,
    pub children: Vec<DisplayNode>,
}

/// Projects the document into tree rows: one per entry for an object root,
/// one per element for an array root, a single row for a scalar root.
/// Deterministic: projecting an unmutated document twice yields equal trees.
pub fn project(root: &PkValue) -> Vec<DisplayNode> {
    match root {
        PkValue::Object(map) => map
            .iter()
            .map(|(k, v)| node_for(k.clone(), NodePath::root().child_key(k.clone()), v))
            .collect(),
        PkValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| node_for(i.to_string(), NodePath::root().child_index(i), v))
            .collect(),
        scalar => vec![node_for(scalar.display_text(), NodePath::root(), scalar)],
    }
}

fn node_for(label: String, path: NodePath, value: &PkValue) -> DisplayNode {
    let kind = value.kind();
    let children = match value {
        PkValue::Object(map) => map
            .iter()
            .map(|(k, v)| node_for(k.clone(), path.child_key(k.clone()), v))
            .collect(),
        PkValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| node_for(i.to_string(), path.child_index(i), v))
            .collect(),
        _ => Vec::new(),
    };
    DisplayNode {
        label,
        value_text: value.display_text(),
        path,
        kind,
        editable: kind.is_leaf(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayNode, project};
    use crate::path::NodePath;
    use crate::value::{PkValue, ValueKind};

    fn find<'a>(nodes: &'a [DisplayNode], label: &str) -> &'a DisplayNode {
        nodes.iter().find(|n| n.label == label).unwrap()
    }

    #[test]
    fn object_root_projects_one_row_per_entry() {
        let v = PkValue::parse_json(r#"{"name": "47", "stats": {"Level": 3}, "tags": [true]}"#)
            .unwrap();
        let tree = project(&v);
        assert_eq!(tree.len(), 3);

        let name = find(&tree, "name");
        assert_eq!(name.value_text, "47");
        assert_eq!(name.kind, ValueKind::String);
        assert!(name.editable);
        assert!(name.children.is_empty());
        assert_eq!(name.path, NodePath::from_keys(&["name"]));

        let stats = find(&tree, "stats");
        assert_eq!(stats.value_text, "<object>");
        assert!(!stats.editable);
        assert_eq!(stats.children[0].label, "Level");
        assert_eq!(
            stats.children[0].path,
            NodePath::from_keys(&["stats", "Level"])
        );

        let tags = find(&tree, "tags");
        assert_eq!(tags.kind, ValueKind::Array);
        assert_eq!(tags.children[0].label, "0");
        assert_eq!(tags.children[0].value_text, "true");
        assert_eq!(tags.children[0].path, NodePath::from_keys(&["tags"]).child_index(0));
    }

    #[test]
    fn scalar_root_projects_a_single_editable_row() {
        let tree = project(&PkValue::integer(9));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].label, "9");
        assert!(tree[0].editable);
        assert!(tree[0].path.is_root());
    }

    #[test]
    fn projection_is_deterministic() {
        let v = PkValue::parse_json(r#"{"a": [1, {"b": null}], "c": 2.5}"#).unwrap();
        assert_eq!(project(&v), project(&v));
    }
}
