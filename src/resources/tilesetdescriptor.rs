//! JSON tileset descriptor.
//!
//! The serialized form of a tileset: the tile count plus one entry per tile
//! that declares any property. [`TilesetDescriptor::build_table`] feeds every
//! entry through [`TileTableBuilder`], so a descriptor either produces a
//! complete table or an error and nothing else.
//!
//! ```json
//! { "name": "tileset", "tile_count": 1024,
//!   "tiles": [ { "id": 6, "breakability": "Solid" },
//!              { "id": 128, "damage": 10.0 } ] }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::components::tileattributes::{CasePolicy, TileTypeId};
use crate::error::DescriptorError;
use crate::resources::tiledefinitions::{TileDefinitionTable, TileProperties, TileTableBuilder};

/// One declared tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub id: TileTypeId,
    #[serde(flatten)]
    pub properties: TileProperties,
}

/// Whole tileset as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilesetDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tile_count: u32,
    #[serde(default)]
    pub tiles: Vec<TileDescriptor>,
}

impl TilesetDescriptor {
    /// Read and parse a descriptor file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let descriptor = Self::from_json_str(&text)?;
        info!(
            "Read tileset descriptor {:?}: {} tiles, {} declared",
            path,
            descriptor.tile_count,
            descriptor.tiles.len()
        );
        Ok(descriptor)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String, DescriptorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every entry and build the frozen definition table.
    pub fn build_table(
        &self,
        case_policy: CasePolicy,
    ) -> Result<TileDefinitionTable, DescriptorError> {
        let mut builder = TileTableBuilder::new(self.tile_count).with_case_policy(case_policy);
        for tile in &self.tiles {
            builder.define(tile.id, tile.properties.clone())?;
        }
        Ok(builder.build()?)
    }
}
