use std::collections::HashMap;

use audiohub_core::{ConnectionState, ProgressEvent};

/// Typed event delivered by the push channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Progress(ProgressEvent),
    Connection(ConnectionState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Progress,
    Connection,
}

impl PushEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PushEvent::Progress(_) => EventKind::Progress,
            PushEvent::Connection(_) => EventKind::Connection,
        }
    }
}

type Handler = Box<dyn Fn(&PushEvent) + Send + Sync>;

/// Event kind → handlers table. Handlers run synchronously, in registration
/// order, on the task that received the event.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: Fn(&PushEvent) + Send + Sync + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
        self
    }

    /// Returns how many handlers saw the event.
    pub fn dispatch(&self, event: &PushEvent) -> usize {
        match self.handlers.get(&event.kind()) {
            Some(handlers) => {
                for handler in handlers {
                    handler(event);
                }
                handlers.len()
            }
            None => 0,
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("Dispatcher").field("handlers", &counts).finish()
    }
}
