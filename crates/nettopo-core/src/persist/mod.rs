//! Topology persistence.
//!
//! A diagram is saved and loaded as one JSON document, written in full on
//! every save — there are no incremental or streaming updates.  Loading
//! builds a brand-new [`Topology`] and returns it only on full success: the
//! caller swaps it in for the live one, so a failed load leaves the open
//! diagram exactly as it was.

pub mod document;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::error::TopologyError;
use crate::domain::topology::Topology;

pub use document::{
    from_document, to_document, BoundaryEntry, ConnectionEntry, DeviceEntry, TopologyDocument,
};

/// Errors that can occur while saving or loading a topology file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing topology file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, is missing a required key, or contains an
    /// unrecognized device/connection type string.
    #[error("invalid topology file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A connection entry references a device name absent from the document.
    /// This is a hard failure: the load is abandoned and nothing is replaced.
    #[error("connection {device1} <-> {device2} references unknown device {missing}")]
    UnknownDevice {
        device1: String,
        device2: String,
        missing: String,
    },

    /// An entry violates a model rule (empty name, duplicate name, malformed
    /// IP string, self-connection).
    #[error("invalid topology data: {0}")]
    Model(#[from] TopologyError),
}

/// Writes `topology` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PersistError::Io`] for file-system failures and
/// [`PersistError::Parse`] if serialization fails.
pub fn save_topology(topology: &Topology, path: &Path) -> Result<(), PersistError> {
    let doc = to_document(topology);
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "saved topology to {} ({} devices, {} connections, {} boundaries)",
        path.display(),
        doc.devices.len(),
        doc.connections.len(),
        doc.boundaries.len()
    );
    Ok(())
}

/// Reads a topology file and builds a fresh [`Topology`] from it.
///
/// # Errors
///
/// Returns [`PersistError::Io`] if the file cannot be read (including a
/// missing file — opening a nonexistent diagram is an error, unlike missing
/// configuration), [`PersistError::Parse`] for malformed JSON or unknown
/// enum strings, and [`PersistError::UnknownDevice`] /
/// [`PersistError::Model`] for documents that parse but violate model rules.
pub fn load_topology(path: &Path) -> Result<Topology, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: TopologyDocument = serde_json::from_str(&content)?;
    let topology = from_document(&doc)?;
    info!(
        "loaded topology from {} ({} devices, {} connections, {} boundaries)",
        path.display(),
        topology.device_count(),
        topology.connection_count(),
        topology.boundary_count()
    );
    Ok(topology)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::connection::LinkKind;
    use crate::domain::device::{DeviceConfig, DeviceKind};
    use crate::domain::geom::Point;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nettopo_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        let dir = temp_dir();
        let path = dir.join("diagram.json");

        let mut topo = Topology::new();
        topo.add_device(DeviceConfig::new("R1", DeviceKind::Router), Point::new(10.0, 10.0))
            .unwrap();
        topo.add_device(DeviceConfig::new("S1", DeviceKind::Switch), Point::new(200.0, 10.0))
            .unwrap();
        topo.connect("R1", "S1", LinkKind::Fiber).unwrap();

        save_topology(&topo, &path).unwrap();
        let loaded = load_topology(&path).unwrap();

        assert_eq!(loaded.device_count(), 2);
        assert_eq!(loaded.connection_count(), 1);
        assert_eq!(loaded.device("S1").unwrap().position, Point::new(200.0, 10.0));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_returns_io_error() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/diagram.json");
        let result = load_topology(&path);
        assert!(matches!(result, Err(PersistError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json_returns_parse_error() {
        let dir = temp_dir();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{{{ not json").unwrap();

        let result = load_topology(&path);

        assert!(matches!(result, Err(PersistError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_empty_topology_then_load_is_empty() {
        let dir = temp_dir();
        let path = dir.join("empty.json");

        save_topology(&Topology::new(), &path).unwrap();
        let loaded = load_topology(&path).unwrap();

        assert!(loaded.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
