use std::collections::HashMap;

use log::debug;

use ferry_shared::{ChannelId, ConnectionId, HostId, Message, MessageKind, MessagePayload};

/// Where a dispatched message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageContext {
    pub host: HostId,
    pub connection: ConnectionId,
    pub channel: ChannelId,
}

type Handler = Box<dyn FnMut(&MessageContext, &Message)>;

/// Routes decoded messages to the handler registered for their kind.
///
/// Kinds without a handler are logged and skipped, so a server can start
/// sending a new kind before every client handles it.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<MessageKind, Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for messages of kind `M::KIND`, replacing any
    /// handler already registered for that kind.
    pub fn on<M, F>(&mut self, mut handler: F) -> &mut Self
    where
        M: MessagePayload + 'static,
        F: FnMut(&MessageContext, &M) + 'static,
    {
        let route = move |context: &MessageContext, message: &Message| {
            if let Some(body) = M::from_message(message) {
                handler(context, body);
            }
        };
        if self.handlers.insert(M::KIND, Box::new(route)).is_some() {
            debug!("Replaced handler for {}", M::KIND);
        }
        self
    }

    pub fn remove(&mut self, kind: MessageKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    pub fn has_handler(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Invokes the handler for the message's kind. Returns whether one ran.
    pub fn dispatch(&mut self, context: &MessageContext, message: &Message) -> bool {
        let kind = message.kind();
        match self.handlers.get_mut(&kind) {
            Some(handler) => {
                handler(context, message);
                true
            }
            None => {
                debug!("No handler for {} from {}, dropping", kind, context.connection);
                false
            }
        }
    }
}
