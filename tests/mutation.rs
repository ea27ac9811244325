use pretty_assertions::assert_eq;
use pupe::{DisplayNode, DocError, LoadedProfile, NodePath, PkValue, project};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn profile(json: &str) -> LoadedProfile {
    LoadedProfile::new(PkValue::parse_json(json).expect("fixture parses"))
}

fn all_paths(nodes: &[DisplayNode], out: &mut Vec<NodePath>) {
    for node in nodes {
        out.push(node.path.clone());
        all_paths(&node.children, out);
    }
}

#[test]
fn set_changes_only_the_addressed_value() -> Result<()> {
    let mut p = profile(
        r#"{
            "a": {"x": 1, "y": [10, 20]},
            "b": {"x": 1}
        }"#,
    );
    let target = NodePath::from_keys(&["a", "y"]).child_index(1);

    let mut paths = Vec::new();
    all_paths(&project(&p.root), &mut paths);
    let before: Vec<(NodePath, PkValue)> = paths
        .iter()
        .map(|path| (path.clone(), p.get(path).unwrap().clone()))
        .collect();

    p.set(&target, PkValue::integer(99))?;

    assert_eq!(p.get(&target)?, &PkValue::integer(99));
    // Every path that shares no prefix with the target is untouched.
    for (path, value) in &before {
        if path.starts_with(&target) || target.starts_with(path) {
            continue;
        }
        assert_eq!(p.get(path)?, value, "at {path}");
    }
    Ok(())
}

#[test]
fn append_returns_the_new_element_path() -> Result<()> {
    let mut p = profile(r#"{"items": [1]}"#);
    let items = NodePath::from_keys(&["items"]);

    let new_path = p.append(&items, PkValue::String("tag".into()))?;
    assert_eq!(new_path, items.child_index(1));
    assert_eq!(p.get(&new_path)?, &PkValue::String("tag".into()));

    // Appending to a non-array is a type mismatch.
    let err = p
        .append(&NodePath::root(), PkValue::Null)
        .unwrap_err();
    assert!(matches!(err, DocError::TypeMismatch { .. }));
    Ok(())
}

#[test]
fn delete_many_is_idempotent() -> Result<()> {
    let mut p = profile(r#"{"keep": 1, "drop1": 2, "nest": {"drop2": 3}}"#);
    let targets = vec![
        NodePath::from_keys(&["drop1"]),
        NodePath::from_keys(&["nest", "drop2"]),
    ];

    assert_eq!(p.delete_many(&targets)?, 2);
    let after_first = p.root.to_pretty();

    // Second pass: nothing left to remove, no error, no structural change.
    assert_eq!(p.delete_many(&targets)?, 0);
    assert_eq!(p.root.to_pretty(), after_first);

    assert!(p.get(&NodePath::from_keys(&["keep"])).is_ok());
    assert!(matches!(
        p.get(&NodePath::from_keys(&["drop1"])),
        Err(DocError::PathNotFound(_))
    ));
    Ok(())
}

#[test]
fn array_deletions_run_in_descending_index_order() -> Result<()> {
    let mut p = profile(r#"{"items": ["a", "b", "c", "d"]}"#);
    let items = NodePath::from_keys(&["items"]);

    // Deleting 0 and 2 in one batch must drop "a" and "c", not "a" and "d".
    let removed = p.delete_many(&[items.child_index(0), items.child_index(2)])?;
    assert_eq!(removed, 2);
    assert_eq!(
        p.get(&items)?,
        &PkValue::parse_json(r#"["b", "d"]"#)?
    );
    Ok(())
}

#[test]
fn delete_many_skips_entries_whose_parent_was_deleted_in_the_same_batch() -> Result<()> {
    let mut p = profile(r#"{"nest": {"inner": 1}}"#);
    let removed = p.delete_many(&[
        NodePath::from_keys(&["nest"]),
        NodePath::from_keys(&["nest", "inner"]),
    ])?;

    // Either order of processing leaves the same result: "nest" is gone.
    assert!(removed >= 1);
    assert!(matches!(
        p.get(&NodePath::from_keys(&["nest"])),
        Err(DocError::PathNotFound(_))
    ));
    Ok(())
}

#[test]
fn dirty_tracks_mutations_and_clears_on_save() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("profile.json");
    std::fs::write(&path, b"{\n    \"a\": 1\n}\n")?;

    let mut p = LoadedProfile::load_path(&path)?;
    assert!(!p.dirty);

    p.set(&NodePath::from_keys(&["a"]), PkValue::integer(2))?;
    p.refresh_dirty();
    assert!(p.dirty);

    p.save_to_path(&path)?;
    assert!(!p.dirty);
    Ok(())
}
