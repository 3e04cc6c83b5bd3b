//! Asset tree variant.
//!
//! A user's `asset_info` is a nested mapping: the reserved `__files` key holds
//! a list of `{name, hash}` descriptors, every other key names a subfolder
//! with the same shape.

use serde_json::Value;

/// Reserved key marking the file list of a folder.
pub const FILES_KEY: &str = "__files";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetNode {
    Folder { name: String, children: Vec<AssetNode> },
    File { name: String, hash: String },
}

impl AssetNode {
    /// Parses the children of one folder level, in document order.
    ///
    /// A value that is not a mapping is an empty subtree. File descriptors
    /// missing a name or hash are skipped.
    pub fn parse_tree(value: &Value) -> Vec<AssetNode> {
        let Some(entries) = value.as_object() else {
            return Vec::new();
        };

        let mut nodes = Vec::with_capacity(entries.len());
        for (key, child) in entries {
            if key == FILES_KEY {
                nodes.extend(
                    child
                        .as_array()
                        .into_iter()
                        .flatten()
                        .filter_map(AssetNode::parse_file),
                );
            } else {
                nodes.push(AssetNode::Folder {
                    name: key.clone(),
                    children: AssetNode::parse_tree(child),
                });
            }
        }
        nodes
    }

    fn parse_file(descriptor: &Value) -> Option<AssetNode> {
        let name = descriptor.get("name")?.as_str()?;
        let hash = descriptor.get("hash")?.as_str()?;
        Some(AssetNode::File {
            name: name.to_string(),
            hash: hash.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            AssetNode::Folder { name, .. } | AssetNode::File { name, .. } => name,
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        match self {
            AssetNode::Folder { children, .. } => {
                1 + children.iter().map(AssetNode::node_count).sum::<usize>()
            }
            AssetNode::File { .. } => 1,
        }
    }
}
