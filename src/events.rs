use tracing::trace;

use crate::types::GameEvent;

/// Receives engine notifications synchronously, in emission order.
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Buffers events for polling callers and forwards them to registered listeners.
#[derive(Default)]
pub struct EventBus {
    pending: Vec<GameEvent>,
    listeners: Vec<Box<dyn GameListener>>,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, event: GameEvent) {
        trace!(?event, "emit");
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_see_events_in_order_and_buffer_drains() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bus = EventBus::default();
        bus.subscribe(Box::new(move |event: &GameEvent| {
            sink.borrow_mut().push(event.clone())
        }));

        bus.emit(GameEvent::ScoreChanged { score: 10 });
        bus.emit(GameEvent::BonusOn);

        assert_eq!(
            *seen.borrow(),
            vec![GameEvent::ScoreChanged { score: 10 }, GameEvent::BonusOn]
        );
        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
        assert_eq!(seen.borrow().len(), 2);
    }
}
