//! Asset tree flattening.
//!
//! A user's folder/file tree is walked depth first, parents before children,
//! so every record's parent has already been written when the record itself
//! is inserted.
use save_migrate_repository::DestinationRepository;
use save_migrate_shared::{AssetNode, NewAsset};
use serde_json::Value;
use sqlx::SqliteConnection;

use crate::errors::{MigrationError, WriteContext};

/// One node of a flattened tree. `parent` indexes into the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatAsset {
    pub parent: Option<usize>,
    pub name: String,
    pub file_hash: Option<String>,
}

/// Flattens a forest into pre-order records.
pub fn flatten(nodes: &[AssetNode]) -> Vec<FlatAsset> {
    let mut flat = Vec::new();
    flatten_into(nodes, None, &mut flat);
    flat
}

fn flatten_into(nodes: &[AssetNode], parent: Option<usize>, flat: &mut Vec<FlatAsset>) {
    for node in nodes {
        match node {
            AssetNode::File { name, hash } => flat.push(FlatAsset {
                parent,
                name: name.clone(),
                file_hash: Some(hash.clone()),
            }),
            AssetNode::Folder { name, children } => {
                let index = flat.len();
                flat.push(FlatAsset {
                    parent,
                    name: name.clone(),
                    file_hash: None,
                });
                flatten_into(children, Some(index), flat);
            }
        }
    }
}

/// Writes the asset tree of one user and returns the number of records.
pub async fn write_asset_tree<R: DestinationRepository>(
    repository: &R,
    conn: &mut SqliteConnection,
    owner: &str,
    owner_id: i64,
    asset_info: &Value,
) -> Result<usize, MigrationError> {
    let flat = flatten(&AssetNode::parse_tree(asset_info));

    let mut ids: Vec<i64> = Vec::with_capacity(flat.len());
    for asset in &flat {
        let id = repository
            .insert_asset(
                conn,
                &NewAsset {
                    owner_id,
                    parent_id: asset.parent.map(|index| ids[index]),
                    name: asset.name.clone(),
                    file_hash: asset.file_hash.clone(),
                },
            )
            .await
            .entity(|| format!("asset {} of user {}", asset.name, owner))?;
        ids.push(id);
    }

    Ok(flat.len())
}
