//! Typed links between two devices.
//!
//! Connections are owned centrally by the
//! [`Topology`](crate::domain::topology::Topology); the two endpoint devices
//! carry back-references by [`ConnectionId`] only.  Creating or removing a
//! connection always updates both endpoints' lists in the same operation, so
//! the "appears in both or neither" invariant holds by construction.
//!
//! Endpoints are recorded by device name.  The rendered line between them is
//! derived from the devices' live positions at query time
//! ([`Topology::connection_line`](crate::domain::topology::Topology::connection_line));
//! nothing is cached on the connection itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::TopologyError;

/// Unique identifier for a connection, derived from UUID v4.
///
/// Names identify devices and boundaries; connections have no user-facing
/// name (and duplicates between the same pair are allowed), so they get a
/// generated id instead.
pub type ConnectionId = Uuid;

/// The kinds of link that can join two devices.
///
/// The snake_case string form is what gets persisted in topology files.  The
/// visual style of each kind (color, dash pattern) is presentation metadata
/// and lives with the renderer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Ethernet,
    Fiber,
    Wireless,
    Vpn,
    Serial,
    Usb,
}

impl LinkKind {
    /// All kinds, in the order they appear in the connection dialog.
    pub const ALL: [LinkKind; 6] = [
        LinkKind::Ethernet,
        LinkKind::Fiber,
        LinkKind::Wireless,
        LinkKind::Vpn,
        LinkKind::Serial,
        LinkKind::Usb,
    ];

    /// The persisted string form of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Ethernet => "ethernet",
            LinkKind::Fiber => "fiber",
            LinkKind::Wireless => "wireless",
            LinkKind::Vpn => "vpn",
            LinkKind::Serial => "serial",
            LinkKind::Usb => "usb",
        }
    }
}

impl FromStr for LinkKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "ethernet" => Ok(LinkKind::Ethernet),
            "fiber" => Ok(LinkKind::Fiber),
            "wireless" => Ok(LinkKind::Wireless),
            "vpn" => Ok(LinkKind::Vpn),
            "serial" => Ok(LinkKind::Serial),
            "usb" => Ok(LinkKind::Usb),
            _ => Err(()),
        }
    }
}

/// A typed edge between two distinct devices.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    device1: String,
    device2: String,
    pub kind: LinkKind,
}

impl Connection {
    /// Creates a connection between two device names.
    ///
    /// Only the [`Topology`](crate::domain::topology::Topology) calls this;
    /// it has already checked that both names resolve to devices.  Duplicate
    /// parallel connections between the same pair are allowed deliberately —
    /// a consumer wanting uniqueness checks
    /// [`connections_between`](crate::domain::topology::Topology::connections_between)
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::SelfConnection`] when both names are equal.
    pub(crate) fn new(
        device1: String,
        device2: String,
        kind: LinkKind,
    ) -> Result<Self, TopologyError> {
        if device1 == device2 {
            return Err(TopologyError::SelfConnection(device1));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            device1,
            device2,
            kind,
        })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn device1(&self) -> &str {
        &self.device1
    }

    pub fn device2(&self) -> &str {
        &self.device2
    }

    /// Returns `true` if `name` is one of the two endpoints.
    pub fn touches(&self, name: &str) -> bool {
        self.device1 == name || self.device2 == name
    }

    /// Given one endpoint name, returns the other.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotAnEndpoint`] if `name` is neither endpoint.
    pub fn other_endpoint(&self, name: &str) -> Result<&str, TopologyError> {
        if self.device1 == name {
            Ok(&self.device2)
        } else if self.device2 == name {
            Ok(&self.device1)
        } else {
            Err(TopologyError::NotAnEndpoint {
                connection: self.id,
                device: name.to_string(),
            })
        }
    }

    /// The unordered endpoint pair, sorted lexicographically.
    ///
    /// Two parallel connections between the same devices produce the same
    /// key regardless of endpoint order; the serializer uses this to collapse
    /// duplicates on save.
    pub fn pair_key(&self) -> (String, String) {
        if self.device1 <= self.device2 {
            (self.device1.clone(), self.device2.clone())
        } else {
            (self.device2.clone(), self.device1.clone())
        }
    }

    pub(crate) fn rename_endpoint(&mut self, old: &str, new: &str) {
        if self.device1 == old {
            self.device1 = new.to_string();
        }
        if self.device2 == old {
            self.device2 = new.to_string();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
