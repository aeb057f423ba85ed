//! Change notifications from the topology to the presentation layer.
//!
//! The core holds only geometry, identity, and relationships.  A renderer
//! keeps its own mapping from entity to drawable handle and updates it by
//! subscribing a [`TopologyObserver`]; the core never reaches into a
//! rendering API.  Events fire after the mutation has fully applied, so an
//! observer reading back through the topology always sees the new state.

use crate::domain::connection::ConnectionId;

/// One structural change to a topology.
///
/// Entities are identified the same way the aggregate identifies them:
/// devices and boundaries by name, connections by id.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyEvent {
    DeviceAdded { name: String },
    DeviceRemoved { name: String },
    DeviceMoved { name: String },
    DeviceRenamed { old: String, new: String },
    /// Kind or IP address changed.
    DeviceUpdated { name: String },
    ConnectionAdded { id: ConnectionId },
    ConnectionRemoved { id: ConnectionId },
    BoundaryAdded { name: String },
    BoundaryRemoved { name: String },
    BoundaryMoved { name: String },
    BoundaryResized { name: String },
    /// Subnet, description, or color changed.
    BoundaryUpdated { name: String },
    /// Everything was removed at once.
    Cleared,
}

/// Receiver for topology change notifications.
///
/// Observers run on the single control thread that drives the topology; a
/// callback must not call back into the topology that invoked it.
#[cfg_attr(test, mockall::automock)]
pub trait TopologyObserver {
    fn topology_changed(&mut self, event: TopologyEvent);
}
