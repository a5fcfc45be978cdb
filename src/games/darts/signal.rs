//! Game-over broadcast owned by one game.
//!
//! Subscribers are invoked synchronously, in subscription order, once per
//! [`GameOverSignal::publish`]. Each game owns its own signal, so separate
//! games never cross-signal.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, instrument};

type Handler = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Subscription registry for the game-over event.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct GameOverSignal {
    registry: Rc<RefCell<Registry>>,
}

/// Handle returned by [`GameOverSignal::subscribe`].
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    registry: Rc<RefCell<Registry>>,
}

impl GameOverSignal {
    /// Creates an empty signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` and returns its subscription.
    #[instrument(skip(self, handler))]
    pub fn subscribe(&self, handler: impl Fn() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Rc::new(handler)));
        debug!(id, subscribers = registry.handlers.len(), "Subscribed to game over");
        Subscription {
            id,
            registry: Rc::clone(&self.registry),
        }
    }

    /// Invokes every current subscriber once.
    ///
    /// The subscriber list is captured before delivery starts: handlers may
    /// subscribe or unsubscribe (themselves or others) without changing who
    /// receives this publish.
    #[instrument(skip(self))]
    pub fn publish(&self) {
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        debug!(subscribers = handlers.len(), "Publishing game over");
        for handler in handlers {
            handler();
        }
    }

    /// Removes every subscriber.
    #[instrument(skip(self))]
    pub fn clear_all(&self) {
        self.registry.borrow_mut().handlers.clear();
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl Subscription {
    /// Removes this subscription's handler. Later calls do nothing.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn unsubscribe(&self) {
        self.registry
            .borrow_mut()
            .handlers
            .retain(|(id, _)| *id != self.id);
    }
}

impl std::fmt::Debug for GameOverSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameOverSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
