//! Vendor name tables.
//!
//! [`VendorTable`] starts from a small built-in list of Bluetooth SIG company
//! identifiers and can be extended from a JSON file exported by the external
//! vendor database workflow. Sub-type tables are fixed and exist only for the
//! allow-listed vendors below.

use std::collections::HashMap;
use std::path::Path;

use sniffr_common::vendors::{VendorId, VendorRepository};
use tracing::debug;

use crate::error::CoreError;
use crate::tags;

const BUILTIN_VENDORS: &[(u16, &str)] = &[
    (0x0006, "Microsoft"),
    (0x000f, "Broadcom"),
    (0x004c, "Apple"),
    (0x0059, "Nordic Semiconductor"),
    (0x0075, "Samsung Electronics"),
    (0x0087, "Garmin International"),
    (0x009e, "Bose Corporation"),
    (0x00e0, "Google"),
    (0x012d, "Sony Corporation"),
    (0x0157, "Anhui Huami Information Technology"),
    (0x0171, "Amazon.com Services"),
    (0x02e5, "Espressif"),
    (0x038f, "Xiaomi"),
    (0x0499, "Ruuvi Innovations"),
    (0x067c, "Tile"),
];

fn sub_type_table(id: VendorId) -> Option<&'static [(u8, &'static str)]> {
    match id {
        VendorId::APPLE => Some(tags::apple::SUB_TYPES),
        VendorId::MICROSOFT => Some(tags::microsoft::SUB_TYPES),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    names: HashMap<VendorId, String>,
}

impl VendorTable {
    pub fn builtin() -> Self {
        BUILTIN_VENDORS
            .iter()
            .map(|(raw, name)| (VendorId::new(*raw), name.to_string()))
            .collect()
    }

    pub fn insert(&mut self, id: VendorId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All entries, ordered by vendor id.
    pub fn entries(&self) -> Vec<(VendorId, &str)> {
        let mut entries: Vec<(VendorId, &str)> = self
            .names
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Layers a `{"004c": "Apple", ...}` file over the current entries.
    ///
    /// Returns the number of entries read from the file.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: HashMap<VendorId, String> =
            serde_json::from_str(&contents).map_err(|source| CoreError::VendorDb {
                path: path.to_path_buf(),
                source,
            })?;

        let count = parsed.len();
        self.names.extend(parsed);
        debug!("merged {count} vendor entries from {}", path.display());
        Ok(count)
    }
}

impl FromIterator<(VendorId, String)> for VendorTable {
    fn from_iter<T: IntoIterator<Item = (VendorId, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl VendorRepository for VendorTable {
    fn vendor_name(&self, id: VendorId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    fn has_sub_types(&self, id: VendorId) -> bool {
        sub_type_table(id).is_some()
    }

    fn sub_type(&self, id: VendorId, code: u8) -> Option<String> {
        sub_type_table(id)?
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, tag)| tag.to_string())
    }
}

/// Writes the unresolved vendor ids as a JSON array for the vendor database workflow.
pub fn export_unknown<'a, I>(ids: I, path: &Path) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a VendorId>,
{
    let ids: Vec<&VendorId> = ids.into_iter().collect();
    let json = serde_json::to_string_pretty(&ids).map_err(|source| CoreError::VendorDb {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
