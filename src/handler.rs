//! Conversion of link-scoped reactor events into receiver semantics

use std::marker::PhantomData;

use bytes::BytesMut;
use fe2o3_amqp_types::{
    definitions,
    messaging::{message::DecodeIntoMessage, Body},
    primitives::Value,
};
use tracing::{debug, instrument, trace};

use crate::{
    callback::ReceiverCallback,
    endpoint::{IncomingDelivery, ReceiverLink},
    error::{OpenError, RecvError},
    event::LinkEvent,
    util::ResolveOnce,
};

/// The receive-side link event handler.
///
/// One handler serves exactly one receiving link for the lifetime of that
/// link. It converts the lifecycle and delivery events the reactor hands it
/// into the [`ReceiverCallback`] contract, issuing zero or one callback
/// invocation per event.
///
/// The open completion is resolved by whichever of remote-open-with-source,
/// first full delivery, or remote close/detach happens first; the resolution is
/// guarded by a one-shot cell so the callback fires exactly once even when
/// the reactor drives the handler from more than one thread. [`handle`]
/// therefore takes `&self` and the handler can be shared behind an `Arc`.
///
/// The type parameter `B` selects the body section type messages are decoded
/// into; the default [`Body<Value>`] accepts any well-formed message.
///
/// [`handle`]: ReceiveLinkHandler::handle
#[derive(Debug)]
pub struct ReceiveLinkHandler<C, B = Body<Value>> {
    callback: C,
    first_response: ResolveOnce,
    marker: PhantomData<fn() -> B>,
}

impl<C, B> ReceiveLinkHandler<C, B>
where
    C: ReceiverCallback<B>,
    B: DecodeIntoMessage,
{
    /// Creates a handler forwarding to `callback`
    pub fn new(callback: C) -> Self {
        Self {
            callback,
            first_response: ResolveOnce::new(),
            marker: PhantomData,
        }
    }

    /// Get a reference to the callback target
    pub fn callback(&self) -> &C {
        &self.callback
    }

    /// Dispatches one reactor event for the link this handler serves.
    ///
    /// The handler raises no errors of its own; every outcome flows through
    /// the callback.
    #[instrument(skip_all)]
    pub fn handle<L, D>(&self, event: LinkEvent<'_, L, D>)
    where
        L: ReceiverLink,
        D: IncomingDelivery,
    {
        match event {
            LinkEvent::LocalOpen(link) => self.on_local_open(link),
            LinkEvent::RemoteOpen(link) => self.on_remote_open(link),
            LinkEvent::RemoteClose(link) => self.on_remote_close(link),
            LinkEvent::RemoteDetach(link) => self.on_remote_detach(link),
            LinkEvent::Delivery(link, delivery) => self.on_delivery(link, delivery),
        }
    }

    fn on_local_open<L>(&self, link: &L)
    where
        L: ReceiverLink,
    {
        debug!(name = %link.name(), local_source = ?link.local_source());
    }

    fn on_remote_open<L>(&self, link: &L)
    where
        L: ReceiverLink,
    {
        match link.remote_source() {
            Some(remote_source) => {
                debug!(name = %link.name(), ?remote_source);

                if self.first_response.resolve() {
                    self.callback.on_open_complete(Ok(()));
                }
            }
            None => {
                // The peer has not supplied a source; an error frame usually
                // follows. Resolution arrives with a later close or detach.
                debug!(name = %link.name(), remote_source = "none", action = "waiting_for_error");
            }
        }
    }

    fn on_remote_close<L>(&self, link: &L)
    where
        L: ReceiverLink,
    {
        self.process_close(link.remote_condition());
    }

    fn on_remote_detach<L>(&self, link: &L)
    where
        L: ReceiverLink,
    {
        // Detach with error carries the same meaning as close with error at
        // the link level
        self.process_close(link.remote_condition());
    }

    /// Shared close path for remote close and remote detach.
    ///
    /// A still-pending open completion is resolved with a failure derived
    /// from the condition before the close notification fires, so no caller
    /// awaiting the handshake is left hanging and no later event can resolve
    /// it with success.
    fn process_close(&self, condition: Option<definitions::Error>) {
        debug!(?condition);

        if self.first_response.resolve() {
            let error = match &condition {
                Some(condition) => OpenError::RemoteClosedWithError(condition.clone()),
                None => OpenError::RemoteClosed,
            };
            self.callback.on_open_complete(Err(error));
        }

        self.callback.on_close(condition);
    }

    fn on_delivery<L, D>(&self, link: &mut L, delivery: &mut D)
    where
        L: ReceiverLink,
        D: IncomingDelivery,
    {
        if !delivery.is_readable() || delivery.is_partial() {
            // Not all bytes have arrived. The delivery is left untouched so
            // the reactor can replay it once complete; settling now would be
            // an irrevocable acknowledgment of bytes never consumed.
            trace!(
                name = %link.name(),
                readable = delivery.is_readable(),
                partial = delivery.is_partial()
            );
            return;
        }

        // A fully readable delivery is proof that the link is functionally
        // open even if no remote-open carrying a source was ever observed
        if self.first_response.is_pending() && self.first_response.resolve() {
            self.callback.on_open_complete(Ok(()));
        }

        let size = delivery.pending();
        let mut buffer = BytesMut::zeroed(size);
        let read = link.recv(&mut buffer);

        match B::decode_message_from_reader(serde_amqp::read::SliceReader::new(&buffer[..read])) {
            Ok(message) => {
                trace!(name = %link.name(), credit = link.credit());

                self.callback.on_receive_complete(Ok(message));
                delivery.settle();
            }
            Err(_) => {
                // Local failure scoped to this one message. The delivery is
                // not settled and the link remains usable.
                debug!(name = %link.name(), "message decode failed");
                self.callback
                    .on_receive_complete(Err(RecvError::MessageDecodeError));
            }
        }
    }
}
