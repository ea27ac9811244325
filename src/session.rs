use crate::cheats::Cheat;
use crate::edit;
use crate::path::NodePath;
use crate::profile::{DocError, LoadedProfile};
use crate::search::{self, SearchHits};
use crate::tree::{self, DisplayNode};
use crate::value::PkValue;
use std::path::Path;

/// One editing session: the profile (single source of truth) plus its two
/// derived projections. Every accepted mutation rebuilds both projections
/// before the next user intent is handled, so neither view can go stale.
#[derive(Debug, Clone)]
pub struct EditorSession {
    profile: LoadedProfile,
    tree: Vec<DisplayNode>,
    raw_text: String,
}

/// Result of editing several selected leaves with one input. Successes are
/// kept and counted; per-item failures are collected instead of aborting the
/// rest of the batch.
#[derive(Debug, Default)]
pub struct BatchEditOutcome {
    pub applied: usize,
    pub failures: Vec<(NodePath, DocError)>,
}

impl EditorSession {
    pub fn new(profile: LoadedProfile) -> Self {
        let mut session = Self {
            profile,
            tree: Vec::new(),
            raw_text: String::new(),
        };
        session.refresh_projections();
        session
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(LoadedProfile::load_path(path)?))
    }

    pub fn profile(&self) -> &LoadedProfile {
        &self.profile
    }

    pub fn tree(&self) -> &[DisplayNode] {
        &self.tree
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        self.profile.save_to_path(path)
    }

    fn refresh_projections(&mut self) {
        self.tree = tree::project(&self.profile.root);
        self.raw_text = self.profile.root.to_pretty();
        self.profile.refresh_dirty();
    }

    /// Current authoritative display text at `path`, used to revert an editor
    /// buffer after a rejected edit.
    pub fn display_text_at(&self, path: &NodePath) -> Result<String, DocError> {
        Ok(self.profile.get(path)?.display_text())
    }

    pub fn edit_leaf(&mut self, path: &NodePath, raw: &str) -> Result<(), DocError> {
        let translated = {
            let original = self.profile.get(path)?;
            edit::translate(raw, original)?
        };
        self.profile.set(path, translated)?;
        self.refresh_projections();
        Ok(())
    }

    /// Applies one input to every selected leaf. A failed item never blocks
    /// the rest; the document keeps all successful edits.
    pub fn edit_leaves(&mut self, paths: &[NodePath], raw: &str) -> BatchEditOutcome {
        let mut outcome = BatchEditOutcome::default();
        for path in paths {
            let translated = match self.profile.get(path) {
                Ok(original) => edit::translate(raw, original),
                Err(e) => Err(e),
            };
            match translated.and_then(|value| self.profile.set(path, value)) {
                Ok(()) => outcome.applied += 1,
                Err(e) => outcome.failures.push((path.clone(), e)),
            }
        }
        if outcome.applied > 0 {
            self.refresh_projections();
        }
        outcome
    }

    pub fn add_key(
        &mut self,
        parent: &NodePath,
        key: &str,
        value: PkValue,
    ) -> Result<NodePath, DocError> {
        let path = parent.child_key(key);
        self.profile.set(&path, value)?;
        self.refresh_projections();
        Ok(path)
    }

    pub fn append_item(&mut self, parent: &NodePath, value: PkValue) -> Result<NodePath, DocError> {
        let path = self.profile.append(parent, value)?;
        self.refresh_projections();
        Ok(path)
    }

    pub fn delete_entries(&mut self, paths: &[NodePath]) -> Result<usize, DocError> {
        let removed = self.profile.delete_many(paths)?;
        if removed > 0 {
            self.refresh_projections();
        }
        Ok(removed)
    }

    pub fn invoke_cheat(&mut self, cheat: &Cheat) -> Result<(), DocError> {
        cheat.apply(&mut self.profile.root)?;
        self.refresh_projections();
        Ok(())
    }

    pub fn search(&self, term: &str) -> SearchHits {
        search::search(term, &self.tree)
    }

    /// Replaces the whole document from edited raw text. On a parse failure
    /// the document and both projections are untouched and the raw buffer
    /// should revert to [`EditorSession::raw_text`].
    pub fn edit_raw_text(&mut self, raw: &str) -> Result<(), DocError> {
        let value = PkValue::parse_json(raw).map_err(|e| DocError::Parse(e.to_string()))?;
        self.profile.root = value;
        self.refresh_projections();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EditorSession;
    use crate::path::NodePath;
    use crate::profile::LoadedProfile;
    use crate::value::PkValue;

    fn session(json: &str) -> EditorSession {
        EditorSession::new(LoadedProfile::new(PkValue::parse_json(json).unwrap()))
    }

    #[test]
    fn accepted_edits_refresh_both_projections() {
        let mut s = session(r#"{"hitman": {"Level": 1}}"#);
        let path = NodePath::from_keys(&["hitman", "Level"]);

        s.edit_leaf(&path, "7").unwrap();

        assert!(s.raw_text().contains("\"Level\": 7"));
        let node = &s.tree()[0].children[0];
        assert_eq!(node.value_text, "7");
        assert!(s.profile().dirty);
    }

    #[test]
    fn rejected_edits_leave_document_and_projections_alone() {
        let mut s = session(r#"{"Level": 1}"#);
        let path = NodePath::from_keys(&["Level"]);
        let before_raw = s.raw_text().to_string();
        let before_tree = s.tree().to_vec();

        assert!(s.edit_leaf(&path, "not a number").is_err());

        assert_eq!(s.raw_text(), before_raw);
        assert_eq!(s.tree(), &before_tree[..]);
        assert_eq!(s.display_text_at(&path).unwrap(), "1");
    }

    #[test]
    fn raw_parse_failure_is_atomic() {
        let mut s = session(r#"{"a": 1}"#);
        let before = s.raw_text().to_string();

        let err = s.edit_raw_text("{\"a\": }").unwrap_err();
        assert!(err.to_string().contains("line"));
        assert_eq!(s.raw_text(), before);

        s.edit_raw_text(r#"{"a": 2}"#).unwrap();
        assert!(s.raw_text().contains("\"a\": 2"));
    }
}
