use log::{info, warn};

use ferry_shared::{decode, DecodeError, MessageKind, RawEvent, RawEventKind};

use crate::{
    connection::session::TransportSession,
    dispatcher::{Dispatcher, MessageContext},
};

/// What a single [`pump_once`] call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpOutcome {
    /// No event was pending, or the session is not connected
    Idle,
    /// A message was decoded and handed to the dispatcher
    Dispatched(MessageKind),
    /// A datagram arrived but could not be decoded, and was discarded
    Dropped(DecodeError),
    /// A transport-level event was observed and logged
    Transport(RawEventKind),
}

/// Takes at most one event off the session and routes it.
///
/// Exactly one event is consumed per call. Events that arrive faster than the
/// caller ticks stay queued in the substrate rather than stretching this tick.
pub fn pump_once(session: &mut TransportSession, dispatcher: &mut Dispatcher) -> PumpOutcome {
    match session.poll_raw() {
        RawEvent::Nothing => PumpOutcome::Idle,
        RawEvent::Data {
            host,
            connection,
            channel,
            payload,
        } => match decode(&payload) {
            Ok(message) => {
                let kind = message.kind();
                let context = MessageContext {
                    host,
                    connection,
                    channel,
                };
                dispatcher.dispatch(&context, &message);
                PumpOutcome::Dispatched(kind)
            }
            Err(error) => {
                warn!(
                    "Dropping {} byte datagram from {} on {}: {}",
                    payload.len(),
                    connection,
                    channel,
                    error
                );
                PumpOutcome::Dropped(error)
            }
        },
        RawEvent::Error(code) => {
            warn!("Received Event of Type: Error ({})", code);
            PumpOutcome::Transport(RawEventKind::Error)
        }
        other => {
            info!("Received Event of Type: {:?}", other.kind());
            PumpOutcome::Transport(other.kind())
        }
    }
}
