//! Link-scoped reactor events

/// A link-scoped event delivered by the reactor.
///
/// The reactor hands the handler exactly one event object per occurrence.
/// Link and delivery references are only valid for the duration of the
/// event.
#[derive(Debug)]
pub enum LinkEvent<'a, L, D> {
    /// The local half of the link has been opened
    LocalOpen(&'a L),

    /// The remote peer has answered the open handshake
    RemoteOpen(&'a L),

    /// The remote peer has closed the link
    RemoteClose(&'a L),

    /// The remote peer has detached the link
    RemoteDetach(&'a L),

    /// An inbound transfer is ready for inspection
    Delivery(&'a mut L, &'a mut D),
}
