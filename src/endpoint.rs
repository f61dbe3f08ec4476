//! Traits abstracting the engine-owned link and delivery endpoints

use fe2o3_amqp_types::{definitions, messaging::Source};

/// The receiving half of a link, owned by the transport engine.
///
/// A reference is handed to the handler for the duration of one event and
/// MUST NOT be retained past it.
pub trait ReceiverLink {
    /// The link name negotiated at attach time
    fn name(&self) -> &str;

    /// The locally configured source terminus
    fn local_source(&self) -> Option<&Source>;

    /// The source terminus advertised by the remote peer, once the open
    /// handshake has been answered
    fn remote_source(&self) -> Option<&Source>;

    /// The error condition carried by a remote close or detach, if any
    fn remote_condition(&self) -> Option<definitions::Error>;

    /// Remaining link credit. Reported for diagnostics only
    fn credit(&self) -> u32;

    /// Copies the pending bytes of the current delivery into `buffer`
    /// and returns the number of bytes copied
    fn recv(&mut self, buffer: &mut [u8]) -> usize;
}

/// One inbound transfer on a receiving link.
pub trait IncomingDelivery {
    /// Whether bytes are available to read
    fn is_readable(&self) -> bool;

    /// Whether more frames of this delivery are still in flight
    fn is_partial(&self) -> bool;

    /// Number of bytes currently pending
    fn pending(&self) -> usize;

    /// Settles the delivery, finalizing its outcome to the peer.
    ///
    /// Settlement is irrevocable. It MUST happen at most once per delivery
    /// and only after the delivery has been fully consumed.
    fn settle(&mut self);
}
