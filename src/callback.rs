//! The application-facing receiver contract

use std::sync::Arc;

use fe2o3_amqp_types::{
    definitions,
    messaging::{Body, Message},
    primitives::Value,
};

use crate::error::{OpenError, RecvError};

/// Callback contract implemented by the owning receiver.
///
/// Methods take `&self` because the reactor may drive the handler from more
/// than one thread over the link's lifetime. Implementors that record state
/// use interior mutability.
pub trait ReceiverCallback<B = Body<Value>> {
    /// Called exactly once per link, when the open handshake resolves.
    ///
    /// Resolution is triggered by whichever of remote-open-with-source,
    /// first full delivery, or remote close/detach happens first. The last
    /// of these resolves with an [`OpenError`] derived from the peer
    /// condition.
    fn on_open_complete(&self, result: Result<(), OpenError>);

    /// Called once per fully received delivery, in the order deliveries
    /// arrive.
    ///
    /// A decode failure is scoped to that one message and does not close
    /// the link.
    fn on_receive_complete(&self, outcome: Result<Message<B>, RecvError>);

    /// Called when the remote peer closes or detaches the link.
    ///
    /// `None` is a clean shutdown; `Some` carries the peer condition
    /// verbatim.
    fn on_close(&self, condition: Option<definitions::Error>);
}

impl<B, T> ReceiverCallback<B> for Arc<T>
where
    T: ReceiverCallback<B> + ?Sized,
{
    fn on_open_complete(&self, result: Result<(), OpenError>) {
        (**self).on_open_complete(result)
    }

    fn on_receive_complete(&self, outcome: Result<Message<B>, RecvError>) {
        (**self).on_receive_complete(outcome)
    }

    fn on_close(&self, condition: Option<definitions::Error>) {
        (**self).on_close(condition)
    }
}
