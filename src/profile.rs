use crate::path::{NodePath, Segment};
use crate::statics;
use crate::value::PkValue;
use anyhow::Context;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Structured errors for every document operation. Messages name the path
/// that failed so the GUI can surface them verbatim.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("path not found: {0}")]
    PathNotFound(NodePath),
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: NodePath,
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot convert {text:?} to {wanted}")]
    Conversion { text: String, wanted: &'static str },
    #[error("not valid JSON: {0}")]
    Parse(String),
    #[error("{target} has an unsupported shape: {found}")]
    Shape {
        target: String,
        found: &'static str,
    },
}

/// Walks `root` along `path`. Fails with `PathNotFound` when a container lacks
/// the segment and `TypeMismatch` when a value is the wrong container kind,
/// naming the prefix that failed.
pub fn resolve<'a>(root: &'a PkValue, path: &NodePath) -> Result<&'a PkValue, DocError> {
    let mut cur = root;
    let mut walked = NodePath::root();
    for seg in path.segments() {
        cur = match (seg, cur) {
            (Segment::Key(k), PkValue::Object(map)) => map
                .get(k)
                .ok_or_else(|| DocError::PathNotFound(walked.child_key(k.clone())))?,
            (Segment::Index(i), PkValue::Array(items)) => items
                .get(*i)
                .ok_or_else(|| DocError::PathNotFound(walked.child_index(*i)))?,
            (Segment::Key(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: walked,
                    expected: statics::EN_TYPE_OBJECT,
                    found: other.type_name(),
                });
            }
            (Segment::Index(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: walked,
                    expected: statics::EN_TYPE_ARRAY,
                    found: other.type_name(),
                });
            }
        };
        walked = match seg {
            Segment::Key(k) => walked.child_key(k.clone()),
            Segment::Index(i) => walked.child_index(*i),
        };
    }
    Ok(cur)
}

/// Mutable twin of [`resolve`], same failure modes.
pub fn resolve_mut<'a>(
    root: &'a mut PkValue,
    path: &NodePath,
) -> Result<&'a mut PkValue, DocError> {
    let mut cur = root;
    let mut walked = NodePath::root();
    for seg in path.segments() {
        cur = match (seg, cur) {
            (Segment::Key(k), PkValue::Object(map)) => map
                .get_mut(k)
                .ok_or_else(|| DocError::PathNotFound(walked.child_key(k.clone())))?,
            (Segment::Index(i), PkValue::Array(items)) => items
                .get_mut(*i)
                .ok_or_else(|| DocError::PathNotFound(walked.child_index(*i)))?,
            (Segment::Key(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: walked,
                    expected: statics::EN_TYPE_OBJECT,
                    found: other.type_name(),
                });
            }
            (Segment::Index(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: walked,
                    expected: statics::EN_TYPE_ARRAY,
                    found: other.type_name(),
                });
            }
        };
        walked = match seg {
            Segment::Key(k) => walked.child_key(k.clone()),
            Segment::Index(i) => walked.child_index(*i),
        };
    }
    Ok(cur)
}

/// A loaded user profile. Owns the document root; every other component
/// addresses it through [`NodePath`]-qualified operations only.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub source_path: Option<PathBuf>,
    pub root: PkValue,
    pub dirty: bool,
    /// Serialized form the session started from, for dirty tracking.
    baseline: String,
}

impl LoadedProfile {
    pub fn new(root: PkValue) -> Self {
        let baseline = root.to_pretty();
        Self {
            source_path: None,
            root,
            dirty: false,
            baseline,
        }
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let text = std::str::from_utf8(&bytes).context("profile is not valid UTF-8")?;
        let root = PkValue::parse_json(text).context("parsing profile JSON")?;

        let mut profile = Self::new(root);
        profile.source_path = Some(path.to_path_buf());
        Ok(profile)
    }

    pub fn save_bytes(&self) -> Vec<u8> {
        let mut text = self.root.to_pretty();
        text.push('\n');
        text.into_bytes()
    }

    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let bytes = self.save_bytes();
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;

        self.source_path = Some(path.to_path_buf());
        self.baseline = self.root.to_pretty();
        self.dirty = false;
        Ok(())
    }

    /// Recompute `dirty` against the baseline, so hand-reverting an edit
    /// clears the badge again.
    pub fn refresh_dirty(&mut self) {
        self.dirty = self.root.to_pretty() != self.baseline;
    }

    pub fn get(&self, path: &NodePath) -> Result<&PkValue, DocError> {
        resolve(&self.root, path)
    }

    /// Assigns `value` at `path`. New object keys are created; array indices
    /// must already exist. Setting the root path replaces the whole document.
    /// Projections are the caller's responsibility to rebuild.
    pub fn set(&mut self, path: &NodePath, value: PkValue) -> Result<(), DocError> {
        let Some((parent_path, last)) = path.split_last() else {
            self.root = value;
            return Ok(());
        };

        let parent = resolve_mut(&mut self.root, &parent_path)?;
        match (last, parent) {
            (Segment::Key(k), PkValue::Object(map)) => {
                map.insert(k.clone(), value);
            }
            (Segment::Index(i), PkValue::Array(items)) => {
                if *i >= items.len() {
                    return Err(DocError::PathNotFound(path.clone()));
                }
                items[*i] = value;
            }
            (Segment::Key(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: parent_path,
                    expected: statics::EN_TYPE_OBJECT,
                    found: other.type_name(),
                });
            }
            (Segment::Index(_), other) => {
                return Err(DocError::TypeMismatch {
                    path: parent_path,
                    expected: statics::EN_TYPE_ARRAY,
                    found: other.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Deletes a batch of entries, grouped per parent container. Already-absent
    /// keys/indices are skipped (idempotent delete), as are parents that no
    /// longer resolve. Within one array parent, indices are removed in
    /// descending order so earlier removals cannot shift later ones. Segment
    /// kinds are validated against every parent before anything is removed, so
    /// a mismatch aborts with no partial mutation. Returns the removed count.
    pub fn delete_many(&mut self, paths: &[NodePath]) -> Result<usize, DocError> {
        let mut by_parent: BTreeMap<NodePath, (Vec<String>, Vec<usize>)> = BTreeMap::new();
        for path in paths {
            let Some((parent, last)) = path.split_last() else {
                continue; // the root itself is never deleted
            };
            let slot = by_parent.entry(parent).or_default();
            match last {
                Segment::Key(k) => slot.0.push(k.clone()),
                Segment::Index(i) => slot.1.push(*i),
            }
        }

        for (parent_path, (keys, indices)) in &by_parent {
            let Ok(parent) = resolve(&self.root, parent_path) else {
                continue;
            };
            let conflict = match parent {
                PkValue::Object(_) if indices.is_empty() => None,
                PkValue::Array(_) if keys.is_empty() => None,
                PkValue::Object(_) => Some(statics::EN_TYPE_ARRAY),
                PkValue::Array(_) => Some(statics::EN_TYPE_OBJECT),
                _ if keys.is_empty() => Some(statics::EN_TYPE_ARRAY),
                _ => Some(statics::EN_TYPE_OBJECT),
            };
            if let Some(expected) = conflict {
                return Err(DocError::TypeMismatch {
                    path: parent_path.clone(),
                    expected,
                    found: parent.type_name(),
                });
            }
        }

        let mut removed = 0usize;
        for (parent_path, (keys, mut indices)) in by_parent {
            let Ok(parent) = resolve_mut(&mut self.root, &parent_path) else {
                continue;
            };
            match parent {
                PkValue::Object(map) => {
                    for key in &keys {
                        if map.shift_remove(key).is_some() {
                            removed += 1;
                        }
                    }
                }
                PkValue::Array(items) => {
                    indices.sort_unstable_by(|a, b| b.cmp(a));
                    indices.dedup();
                    for i in indices {
                        if i < items.len() {
                            items.remove(i);
                            removed += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(removed)
    }

    /// Pushes `value` onto the array at `path` and returns the new element's path.
    pub fn append(&mut self, path: &NodePath, value: PkValue) -> Result<NodePath, DocError> {
        let target = resolve_mut(&mut self.root, path)?;
        match target {
            PkValue::Array(items) => {
                items.push(value);
                Ok(path.child_index(items.len() - 1))
            }
            other => Err(DocError::TypeMismatch {
                path: path.clone(),
                expected: statics::EN_TYPE_ARRAY,
                found: other.type_name(),
            }),
        }
    }
}
