//! Frame router: bytes in, dispatched method bodies out.
//!
//! The router owns a [`FrameBuffer`] and the method table of one protocol
//! version. Every complete method frame is decoded through the version's
//! registry and handed to a dispatcher; heartbeats and content frames are
//! passed back untouched.

use std::collections::VecDeque;
use std::marker::PhantomData;

use thiserror::Error;

use crate::config::CodecConfig;
use crate::error::WireError;
use crate::method::{Dispatch, MethodBody, MethodTable};
use crate::protocol::{Frame, FrameBuffer, FrameType, ProtocolVersion};

/// A frame after routing.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed<M: MethodTable> {
    /// A method frame, already dispatched.
    Method {
        /// Channel the frame arrived on.
        channel: u16,
        /// Decoded body.
        body: MethodBody<M>,
    },
    /// A heartbeat.
    Heartbeat,
    /// A content header or body frame.
    Content(Frame),
}

/// Routing failure.
#[derive(Debug, Error)]
pub enum RouteError<E> {
    /// The bytes did not decode.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The dispatcher rejected a method.
    #[error("handler error: {0}")]
    Handler(E),
}

/// Routes the frames of one connection to a dispatcher.
///
/// # Example
///
/// ```
/// use amqp_wire::handler::{FrameRouter, Routed};
/// use amqp_wire::method::{v0_9_1, MethodBody, UnhandledMethod};
/// use amqp_wire::protocol::Frame;
///
/// struct Tx(u32);
///
/// impl v0_9_1::MethodDispatcher for Tx {
///     type Error = UnhandledMethod;
///
///     fn dispatch_tx_select(
///         &mut self,
///         _channel_id: u16,
///         _body: &MethodBody<v0_9_1::Method>,
///     ) -> Result<(), Self::Error> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut router = FrameRouter::<v0_9_1::Method>::new();
/// let bytes = Frame::method(1, &MethodBody::with_defaults(v0_9_1::Method::TxSelect)).encode();
///
/// let mut tx = Tx(0);
/// let routed = router.push(&bytes, &mut tx).unwrap();
/// assert_eq!(tx.0, 1);
/// assert!(matches!(routed[0], Routed::Method { channel: 1, .. }));
/// ```
#[derive(Debug)]
pub struct FrameRouter<M: MethodTable> {
    frames: FrameBuffer,
    pending: VecDeque<Frame>,
    /// Framing error found behind frames that were still routed.
    broken: Option<WireError>,
    _table: PhantomData<M>,
}

impl<M: MethodTable> Default for FrameRouter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MethodTable> FrameRouter<M> {
    /// Router with the default frame size limit.
    pub fn new() -> Self {
        Self {
            frames: FrameBuffer::new(),
            pending: VecDeque::new(),
            broken: None,
            _table: PhantomData,
        }
    }

    /// Router built from a configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration is invalid or names a protocol
    /// version other than `M`'s.
    pub fn from_config(config: &CodecConfig) -> Result<Self, WireError> {
        config.validate()?;
        if config.protocol != M::VERSION {
            return Err(WireError::InvalidConfig(format!(
                "configured protocol {} does not match the {} method table",
                config.protocol,
                M::VERSION
            )));
        }

        Ok(Self {
            frames: FrameBuffer::from_config(config),
            pending: VecDeque::new(),
            broken: None,
            _table: PhantomData,
        })
    }

    /// Protocol version this router decodes.
    pub fn version(&self) -> ProtocolVersion {
        M::VERSION
    }

    /// Frames received but not yet routed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Feed bytes and route every complete frame.
    ///
    /// Stops at the first failing frame. That frame is dropped; frames
    /// behind it stay queued and are routed by the next call, which may
    /// pass an empty slice.
    ///
    /// Frames that arrived ahead of a framing error are routed first. The
    /// framing error is returned once they are out, by this call when
    /// nothing was routed and by the next one otherwise.
    ///
    /// # Errors
    ///
    /// - `RouteError::Wire` for framing errors or an undecodable method.
    /// - `RouteError::Handler` with the dispatcher's own error.
    pub fn push<D, E>(
        &mut self,
        data: &[u8],
        dispatcher: &mut D,
    ) -> Result<Vec<Routed<M>>, RouteError<E>>
    where
        D: ?Sized,
        MethodBody<M>: Dispatch<D, Error = E>,
    {
        if self.broken.is_none() {
            self.frames.extend(data);
            loop {
                match self.frames.next_frame() {
                    Ok(Some(frame)) => self.pending.push_back(frame),
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("Framing error after {} frames: {}", self.pending.len(), e);
                        self.broken = Some(e);
                        break;
                    }
                }
            }
        }

        let mut routed = Vec::with_capacity(self.pending.len());
        while let Some(frame) = self.pending.pop_front() {
            routed.push(self.route(frame, dispatcher)?);
        }

        if routed.is_empty() {
            if let Some(e) = self.broken.take() {
                return Err(RouteError::Wire(e));
            }
        }
        Ok(routed)
    }

    fn route<D, E>(&self, frame: Frame, dispatcher: &mut D) -> Result<Routed<M>, RouteError<E>>
    where
        D: ?Sized,
        MethodBody<M>: Dispatch<D, Error = E>,
    {
        let channel = frame.channel();
        match frame.frame_type() {
            FrameType::Heartbeat => {
                tracing::trace!("Heartbeat");
                Ok(Routed::Heartbeat)
            }
            FrameType::Header | FrameType::Body => {
                tracing::trace!(
                    "Content frame {:?} on channel {} ({} bytes)",
                    frame.frame_type(),
                    channel,
                    frame.payload().len()
                );
                Ok(Routed::Content(frame))
            }
            FrameType::Method => {
                let body = match M::registry().decode_payload(frame.payload_bytes()) {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!("Dropping method frame on channel {}: {}", channel, e);
                        return Err(RouteError::Wire(e));
                    }
                };

                tracing::debug!("Dispatching {} on channel {}", body.name(), channel);
                Dispatch::dispatch(&body, dispatcher, channel).map_err(RouteError::Handler)?;
                Ok(Routed::Method { channel, body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{v0_8, v0_9_1, UnhandledMethod};
    use crate::protocol::{build_frame, FRAME_END};

    #[derive(Default)]
    struct Recorder {
        acks: Vec<(u16, u64)>,
    }

    impl v0_9_1::MethodDispatcher for Recorder {
        type Error = UnhandledMethod;

        fn dispatch_basic_ack(
            &mut self,
            channel_id: u16,
            body: &MethodBody<v0_9_1::Method>,
        ) -> Result<(), Self::Error> {
            self.acks
                .push((channel_id, body.long_long("delivery_tag").unwrap_or_default()));
            Ok(())
        }
    }

    fn ack(tag: u64) -> Vec<u8> {
        let body = MethodBody::builder(v0_9_1::Method::BasicAck)
            .set("delivery_tag", tag)
            .build()
            .unwrap();
        Frame::method(3, &body).encode().to_vec()
    }

    #[test]
    fn test_routes_fragmented_frames() {
        let mut bytes = ack(1);
        bytes.extend(ack(2));

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let mut recorder = Recorder::default();
        let (a, b) = bytes.split_at(5);

        assert!(router.push(a, &mut recorder).unwrap().is_empty());
        let routed = router.push(b, &mut recorder).unwrap();
        assert_eq!(routed.len(), 2);
        assert_eq!(recorder.acks, vec![(3, 1), (3, 2)]);
    }

    #[test]
    fn test_heartbeat_and_content_pass_through() {
        let mut bytes = Frame::heartbeat().encode().to_vec();
        bytes.extend(build_frame(FrameType::Body, 3, b"hello"));

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let routed = router.push(&bytes, &mut Recorder::default()).unwrap();
        assert_eq!(routed[0], Routed::Heartbeat);
        match &routed[1] {
            Routed::Content(frame) => assert_eq!(frame.payload(), b"hello"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handler_error_keeps_remaining_frames() {
        let select = MethodBody::with_defaults(v0_9_1::Method::TxSelect);
        let mut bytes = Frame::method(1, &select).encode().to_vec();
        bytes.extend(ack(7));

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let mut recorder = Recorder::default();

        let err = router.push(&bytes, &mut recorder).unwrap_err();
        match err {
            RouteError::Handler(e) => assert_eq!(e.method, "tx.select"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(router.pending(), 1);

        let routed = router.push(&[], &mut recorder).unwrap();
        assert_eq!(routed.len(), 1);
        assert_eq!(recorder.acks, vec![(3, 7)]);
    }

    #[test]
    fn test_frames_ahead_of_bad_frame_are_routed() {
        let mut bytes = ack(4);
        let bad = bytes.len();
        bytes.extend(ack(5));
        bytes[bad] = 9;

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let mut recorder = Recorder::default();

        let routed = router.push(&bytes, &mut recorder).unwrap();
        assert_eq!(routed.len(), 1);
        assert_eq!(recorder.acks, vec![(3, 4)]);

        let err = router.push(&[], &mut recorder).unwrap_err();
        assert!(matches!(err, RouteError::Wire(WireError::MalformedFrame(_))));
        assert_eq!(recorder.acks, vec![(3, 4)]);
    }

    #[test]
    fn test_bad_frame_behind_failing_handler() {
        let select = MethodBody::with_defaults(v0_9_1::Method::TxSelect);
        let mut bytes = Frame::method(1, &select).encode().to_vec();
        let bad = bytes.len();
        bytes.extend(ack(6));
        bytes[bad] = 9;

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let mut recorder = Recorder::default();

        match router.push(&bytes, &mut recorder).unwrap_err() {
            RouteError::Handler(e) => assert_eq!(e.method, "tx.select"),
            other => panic!("unexpected {:?}", other),
        }
        let err = router.push(&[], &mut recorder).unwrap_err();
        assert!(matches!(err, RouteError::Wire(WireError::MalformedFrame(_))));
        assert!(recorder.acks.is_empty());
    }

    #[test]
    fn test_unknown_method_is_wire_error() {
        // file class exists only in 0-8
        let bytes = build_frame(FrameType::Method, 1, &[0, 70, 0, 10]);
        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let err = router.push(&bytes, &mut Recorder::default()).unwrap_err();
        assert!(matches!(
            err,
            RouteError::Wire(WireError::UnknownMethod {
                class_id: 70,
                method_id: 10
            })
        ));
    }

    #[test]
    fn test_bad_frame_end() {
        let mut bytes = ack(1);
        let last = bytes.len() - 1;
        assert_eq!(bytes[last], FRAME_END);
        bytes[last] = 0;

        let mut router = FrameRouter::<v0_9_1::Method>::new();
        let err = router.push(&bytes, &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, RouteError::Wire(WireError::MalformedFrame(_))));
    }

    #[test]
    fn test_from_config_checks_version() {
        let config = CodecConfig::default();
        assert!(FrameRouter::<v0_9_1::Method>::from_config(&config).is_ok());

        let err = FrameRouter::<v0_8::Method>::from_config(&config).unwrap_err();
        assert!(matches!(err, WireError::InvalidConfig(_)));

        let config = CodecConfig {
            protocol: ProtocolVersion::V0_8,
            ..CodecConfig::default()
        };
        let router = FrameRouter::<v0_8::Method>::from_config(&config).unwrap();
        assert_eq!(router.version(), ProtocolVersion::V0_8);
    }
}
