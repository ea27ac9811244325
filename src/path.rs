use std::fmt;

/// One step of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// An immutable key/index sequence addressing one location in the document.
/// Components re-resolve through paths instead of holding references into the
/// document's interior, so a structural mutation can never leave a stale view
/// editing the wrong (rebuilt) node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: &[&str]) -> Self {
        Self {
            segments: keys.iter().map(|k| Segment::Key((*k).to_string())).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Parent path plus final segment; `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &Segment)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            NodePath {
                segments: parent.to_vec(),
            },
            last,
        ))
    }

    /// Proper non-root prefixes, outermost first. These are the containers a
    /// tree view must expand to make this path visible.
    pub fn ancestors(&self) -> Vec<NodePath> {
        (1..self.segments.len())
            .map(|n| NodePath {
                segments: self.segments[..n].to_vec(),
            })
            .collect()
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NodePath;

    #[test]
    fn display_joins_segments_with_slash() {
        let path = NodePath::from_keys(&["Extensions", "progression"]).child_index(2);
        assert_eq!(path.to_string(), "Extensions/progression/2");
        assert_eq!(NodePath::root().to_string(), "<root>");
    }

    #[test]
    fn split_last_separates_the_final_segment() {
        let path = NodePath::from_keys(&["a", "b"]);
        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent, NodePath::from_keys(&["a"]));
        assert_eq!(last.to_string(), "b");
        assert!(NodePath::root().split_last().is_none());
    }

    #[test]
    fn ancestors_are_proper_nonroot_prefixes() {
        let path = NodePath::from_keys(&["a", "b"]).child_index(0);
        assert_eq!(
            path.ancestors(),
            vec![
                NodePath::from_keys(&["a"]),
                NodePath::from_keys(&["a", "b"]),
            ]
        );
        assert!(NodePath::from_keys(&["a"]).ancestors().is_empty());
    }

    #[test]
    fn starts_with_requires_matching_prefix() {
        let path = NodePath::from_keys(&["a", "b", "c"]);
        assert!(path.starts_with(&NodePath::root()));
        assert!(path.starts_with(&NodePath::from_keys(&["a", "b"])));
        assert!(!path.starts_with(&NodePath::from_keys(&["a", "x"])));
        assert!(!NodePath::from_keys(&["a"]).starts_with(&path));
    }
}
