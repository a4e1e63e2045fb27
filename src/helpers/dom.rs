//! Minimal document model: a node tree with stable handles and a
//! document-level pointer event registry.

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    MouseDown,
    Click,
    TouchStart,
    TouchEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub target: NodeId,
}

pub type Listener = Arc<dyn Fn(&Document, &PointerEvent) + Send + Sync>;

#[derive(Default)]
struct DocumentInner {
    parents: Vec<Option<NodeId>>,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    next_listener: u64,
}

/// Shared handle; clones refer to the same document.
#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<DocumentInner>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let inner = DocumentInner {
            parents: vec![None],
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentInner> {
        // Listeners never run under the lock.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn create_element(&self, parent: NodeId) -> NodeId {
        let mut inner = self.lock();
        inner.parents.push(Some(parent));
        NodeId(inner.parents.len() - 1)
    }

    /// True when `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let inner = self.lock();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = inner.parents.get(id.0).copied().flatten();
        }
        false
    }

    pub fn add_event_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&Document, &PointerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut inner = self.lock();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push((id, kind, Arc::new(listener)));
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Delivers `event` to every listener registered for its kind.
    pub fn dispatch(&self, event: PointerEvent) {
        let listeners: Vec<Listener> = self
            .lock()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(self, &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_walks_parents() {
        let document = Document::new();
        let wrapper = document.create_element(document.root());
        let input = document.create_element(wrapper);
        let sibling = document.create_element(document.root());

        assert!(document.contains(wrapper, input));
        assert!(document.contains(wrapper, wrapper));
        assert!(!document.contains(wrapper, sibling));
        assert!(!document.contains(input, wrapper));
    }

    #[test]
    fn removed_listener_is_not_called() {
        let document = Document::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let id = document.add_event_listener(EventKind::Click, move |_, _| {
            *counter.lock().unwrap() += 1;
        });

        let event = PointerEvent { kind: EventKind::Click, target: document.root() };
        document.dispatch(event);
        assert!(document.remove_event_listener(id));
        assert!(!document.remove_event_listener(id));
        document.dispatch(event);

        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
