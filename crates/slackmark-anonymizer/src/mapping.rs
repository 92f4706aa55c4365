//! Real value → dummy value tables, persisted as a JSON sidecar

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::generator::{dummy_company, dummy_id, dummy_name, IdKind, NameStyle};
use crate::{AnonymizeError, Result};

/// Prefix of synthetic display-name labels (`display_0`, `display_1`, ...)
pub const DISPLAY_PREFIX: &str = "display_";

/// What kind of value is being replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    WorkspaceId,
    UserId,
    ChannelId,
    /// A personal name; the style picks the pool new dummies come from
    PersonalName(NameStyle),
    /// A `@handle`; shares the personal-name table
    DisplayName,
    CompanyName,
}

/// The five persisted tables. Field names are the sidecar's JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTable {
    #[serde(default)]
    pub workspace_id_map: IndexMap<String, String>,
    #[serde(default)]
    pub user_id_map: IndexMap<String, String>,
    #[serde(default)]
    pub channel_id_map: IndexMap<String, String>,
    #[serde(default)]
    pub name_map: IndexMap<String, String>,
    #[serde(default)]
    pub company_map: IndexMap<String, String>,
}

impl MappingTable {
    pub fn get(&self, category: Category) -> &IndexMap<String, String> {
        match category {
            Category::WorkspaceId => &self.workspace_id_map,
            Category::UserId => &self.user_id_map,
            Category::ChannelId => &self.channel_id_map,
            Category::PersonalName(_) | Category::DisplayName => &self.name_map,
            Category::CompanyName => &self.company_map,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut IndexMap<String, String> {
        match category {
            Category::WorkspaceId => &mut self.workspace_id_map,
            Category::UserId => &mut self.user_id_map,
            Category::ChannelId => &mut self.channel_id_map,
            Category::PersonalName(_) | Category::DisplayName => &mut self.name_map,
            Category::CompanyName => &mut self.company_map,
        }
    }

    /// Number of `display_<n>` labels handed out so far
    pub fn display_count(&self) -> usize {
        self.name_map
            .values()
            .filter(|v| v.starts_with(DISPLAY_PREFIX))
            .count()
    }

    pub fn len(&self) -> usize {
        self.workspace_id_map.len()
            + self.user_id_map.len()
            + self.channel_id_map.len()
            + self.name_map.len()
            + self.company_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the sidecar. Missing or unparseable files yield empty tables.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No mapping file at {} ({}), starting empty", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<MappingTable>(&content) {
            Ok(table) => {
                info!(
                    "Loaded mappings from {}: {} names, {} companies",
                    path.display(),
                    table.name_map.len(),
                    table.company_map.len()
                );
                table
            }
            Err(e) => {
                warn!("Ignoring unreadable mapping file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Overwrite the sidecar: UTF-8, non-ASCII kept as is, 2-space indent
    pub fn save(&self, path: &Path) -> Result<()> {
        let mapping_error = |message: String| AnonymizeError::Mapping {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| mapping_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| mapping_error(e.to_string()))?;
        info!("Saved mappings to {}", path.display());
        Ok(())
    }
}

/// Consistent replacement of real values with generated dummies
pub struct Mapper {
    table: MappingTable,
    rng: StdRng,
}

impl Mapper {
    pub fn new(table: MappingTable, rng: StdRng) -> Self {
        Self { table, rng }
    }

    /// Empty tables and a fixed seed, for reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self::new(MappingTable::default(), StdRng::seed_from_u64(seed))
    }

    /// Load tables from the sidecar and seed from OS entropy
    pub fn load(path: &Path) -> Self {
        Self::new(MappingTable::load(path), StdRng::from_entropy())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.table.save(path)
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn lookup(&self, category: Category, real: &str) -> Option<&str> {
        self.table.get(category).get(real).map(String::as_str)
    }

    /// Stored dummy for `real`, generating and recording one on first sight
    pub fn lookup_or_create(&mut self, category: Category, real: &str) -> String {
        if let Some(existing) = self.lookup(category, real) {
            return existing.to_string();
        }

        let dummy = match category {
            Category::WorkspaceId => dummy_id(&mut self.rng, IdKind::Workspace),
            Category::UserId => dummy_id(&mut self.rng, IdKind::User),
            Category::ChannelId => dummy_id(&mut self.rng, IdKind::Channel),
            Category::PersonalName(style) => dummy_name(&mut self.rng, style),
            Category::DisplayName => format!("{}{}", DISPLAY_PREFIX, self.table.display_count()),
            Category::CompanyName => dummy_company(&mut self.rng),
        };

        self.table
            .get_mut(category)
            .insert(real.to_string(), dummy.clone());
        dummy
    }

    /// The first workspace dummy ever recorded. Every member link is
    /// rewritten to this team, whichever workspace it pointed at.
    ///
    /// With no workspace mapped yet, `fallback_real` is registered so the
    /// answer stays stable for the rest of the run and later runs.
    pub fn primary_workspace(&mut self, fallback_real: &str) -> String {
        match self.table.workspace_id_map.values().next() {
            Some(dummy) => dummy.clone(),
            None => self.lookup_or_create(Category::WorkspaceId, fallback_real),
        }
    }

    /// Known company names with their dummies, in insertion order
    pub fn companies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table
            .company_map
            .iter()
            .map(|(real, dummy)| (real.as_str(), dummy.as_str()))
    }
}
