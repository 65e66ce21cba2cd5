/// Save slots persisted as a two-column CSV file (`Name,Score`).
///
/// The row index is the slot number. The whole file is rewritten on every
/// save; there is no append or partial update.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;

/// One saved game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlot {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: u32,
}

impl SaveSlot {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// In-memory copy of the save file, keyed by slot index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveTable {
    slots: BTreeMap<usize, SaveSlot>,
}

impl SaveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the table from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, SaveError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no save file at {}, starting with no slots", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(SaveError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut slots = BTreeMap::new();
        for (index, record) in reader.deserialize::<SaveSlot>().enumerate() {
            let slot = record.map_err(|source| SaveError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            slots.insert(index, slot);
        }
        info!("loaded {} save slot(s) from {}", slots.len(), path.display());
        Ok(Self { slots })
    }

    /// Like [`SaveTable::load`], but an unreadable or malformed file is
    /// logged and treated as empty.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{}; continuing without saved games", e);
            Self::new()
        })
    }

    /// Rewrite `path` with every slot, in slot order.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let io_err = |source: io::Error| SaveError::Io {
            path: path.to_path_buf(),
            source,
        };
        let csv_err = |source: csv::Error| SaveError::Csv {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        if self.slots.is_empty() {
            // serde only emits the header alongside the first record
            writer.write_record(["Name", "Score"]).map_err(csv_err)?;
        }
        for slot in self.slots.values() {
            writer.serialize(slot).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
        info!("wrote {} save slot(s) to {}", self.slots.len(), path.display());
        Ok(())
    }

    /// Store `slot` at `index`. Indices must stay contiguous from zero so the
    /// row order on disk matches the slot numbers; `index` may be at most
    /// `len()`.
    pub fn set(&mut self, index: usize, slot: SaveSlot) -> Result<(), SaveError> {
        if index > self.slots.len() {
            return Err(SaveError::SlotOutOfRange {
                slot: index,
                max: self.slots.len() + 1,
            });
        }
        self.slots.insert(index, slot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&SaveSlot> {
        self.slots.get(&index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SaveSlot)> {
        self.slots.iter().map(|(&i, s)| (i, s))
    }

    pub fn as_map(&self) -> &BTreeMap<usize, SaveSlot> {
        &self.slots
    }
}

impl From<BTreeMap<usize, SaveSlot>> for SaveTable {
    fn from(slots: BTreeMap<usize, SaveSlot>) -> Self {
        Self { slots }
    }
}
