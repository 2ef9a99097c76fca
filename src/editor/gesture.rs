//! Pointer listener bookkeeping for in-progress gestures
//!
//! A drag or resize needs canvas-wide pointer-move and pointer-up delivery for
//! as long as it lasts. Each registration is held by a [`ListenerGuard`] that
//! removes it when dropped, so a gesture that ends any way at all (release,
//! abort, replacement by another gesture, the editor going away) can never
//! leave a listener behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde::Serialize;

/// Pointer events the host must forward while a gesture is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerListener {
    PointerMove,
    PointerUp,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeMap<u64, PointerListener>,
}

/// Shared table of registered pointer listeners
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it stays registered until the guard is dropped
    pub fn register(&self, listener: PointerListener) -> ListenerGuard {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id, listener);
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Currently registered listeners, oldest first
    pub fn active(&self) -> Vec<PointerListener> {
        self.inner.borrow().active.values().copied().collect()
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

/// Keeps one listener registered for its lifetime
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
        }
    }
}

/// The move + up listener pair every gesture holds
#[derive(Debug)]
pub struct PointerCapture {
    _move: ListenerGuard,
    _up: ListenerGuard,
}

impl PointerCapture {
    pub fn acquire(registry: &ListenerRegistry) -> Self {
        Self {
            _move: registry.register(PointerListener::PointerMove),
            _up: registry.register(PointerListener::PointerUp),
        }
    }
}
