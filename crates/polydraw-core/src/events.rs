//! Pointer event subscriptions.
//!
//! Every subscription is an individually tracked value; dropping interest in
//! an event means handing the [`Subscription`] back to the hub.

use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pointer event kinds an object can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    UpOutside,
}

impl PointerKind {
    /// Every kind a draggable object listens to.
    pub const ALL: [PointerKind; 4] = [
        PointerKind::Down,
        PointerKind::Move,
        PointerKind::Up,
        PointerKind::UpOutside,
    ];
}

/// Identifier of a single subscription, increasing in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// A live registration of `target` for one pointer event kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
    target: ShapeId,
    kind: PointerKind,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn target(&self) -> ShapeId {
        self.target
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}

/// Registry routing pointer events to subscribed objects.
#[derive(Debug, Default)]
pub struct EventHub {
    next_id: u64,
    entries: BTreeMap<SubscriptionId, (ShapeId, PointerKind)>,
}

impl EventHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` for events of `kind`.
    pub fn subscribe(&mut self, target: ShapeId, kind: PointerKind) -> Subscription {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.insert(id, (target, kind));
        Subscription { id, target, kind }
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.entries.remove(&subscription.id).is_some()
    }

    /// Targets subscribed to `kind`, in registration order.
    pub fn targets(&self, kind: PointerKind) -> Vec<ShapeId> {
        self.entries
            .values()
            .filter(|(_, k)| *k == kind)
            .map(|(target, _)| *target)
            .collect()
    }

    /// Check whether `target` listens to `kind`.
    pub fn is_subscribed(&self, target: ShapeId, kind: PointerKind) -> bool {
        self.entries.values().any(|&(t, k)| t == target && k == kind)
    }

    /// Number of subscriptions held by `target`.
    pub fn count_for(&self, target: ShapeId) -> usize {
        self.entries.values().filter(|(t, _)| *t == target).count()
    }

    /// Total number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_and_route() {
        let mut hub = EventHub::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        hub.subscribe(a, PointerKind::Down);
        hub.subscribe(b, PointerKind::Down);
        hub.subscribe(b, PointerKind::Move);

        assert_eq!(hub.targets(PointerKind::Down), vec![a, b]);
        assert_eq!(hub.targets(PointerKind::Move), vec![b]);
        assert!(hub.targets(PointerKind::Up).is_empty());
    }

    #[test]
    fn test_unsubscribe_is_individual() {
        let mut hub = EventHub::new();
        let a = Uuid::new_v4();
        let down = hub.subscribe(a, PointerKind::Down);
        let _move = hub.subscribe(a, PointerKind::Move);

        assert!(hub.unsubscribe(down));
        assert!(!hub.is_subscribed(a, PointerKind::Down));
        assert!(hub.is_subscribed(a, PointerKind::Move));
        assert_eq!(hub.count_for(a), 1);
    }

    #[test]
    fn test_subscription_ids_increase() {
        let mut hub = EventHub::new();
        let target = Uuid::new_v4();
        let first = hub.subscribe(target, PointerKind::Up);
        let second = hub.subscribe(target, PointerKind::Up);
        assert!(first.id() < second.id());
        assert_eq!(first.target(), target);
        assert_eq!(second.kind(), PointerKind::Up);
        assert_eq!(hub.len(), 2);
    }
}
