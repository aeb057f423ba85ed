//! Errors raised by the topology data model.

use thiserror::Error;

use crate::domain::connection::ConnectionId;

/// Errors that can occur when mutating or querying a topology.
///
/// All operations fail fast: an operation that returns one of these has not
/// modified the topology at all.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    /// A device or boundary name was empty (after trimming whitespace).
    #[error("name must not be empty")]
    EmptyName,

    /// An IP address string was neither empty nor a valid IPv4/IPv6 literal.
    #[error("invalid IP address literal: {0}")]
    InvalidIpAddress(String),

    /// The name is already taken by a device or boundary.  Devices and
    /// boundaries share one namespace.
    #[error("name already in use: {0}")]
    DuplicateName(String),

    /// The operation referenced a name that is not present in the topology.
    #[error("no device or boundary named {0}")]
    NotFound(String),

    /// A connection was requested between a device and itself.
    #[error("cannot connect device {0} to itself")]
    SelfConnection(String),

    /// `other_endpoint` was asked about a device the connection does not touch.
    #[error("device {device} is not an endpoint of connection {connection}")]
    NotAnEndpoint {
        connection: ConnectionId,
        device: String,
    },
}
