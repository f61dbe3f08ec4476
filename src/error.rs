//! Link-level error types

use fe2o3_amqp_types::definitions;

/// Failure resolving the link open handshake.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpenError {
    /// The remote peer closed or detached the link before the handshake
    /// resolved, without supplying an error condition
    #[error("Remote peer closed the link")]
    RemoteClosed,

    /// The remote peer closed or detached the link with an error condition
    #[error("Remote peer closed the link with error: {:?}", .0)]
    RemoteClosedWithError(definitions::Error),
}

/// Error handling an inbound delivery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecvError {
    /// The payload of a fully received delivery could not be decoded into
    /// a message
    #[error("Decode error in message")]
    MessageDecodeError,
}
