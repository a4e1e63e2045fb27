use tracing::debug;
use crate::helpers::dom::{Document, EventKind, ListenerId, NodeId};

/// Calls `on_outside` for every mouse-down or touch-end whose target lies
/// outside `boundary`. Listeners are removed when the guard is dropped.
pub struct ClickOutside {
    document: Document,
    listeners: Vec<ListenerId>,
}

impl ClickOutside {
    pub fn register(
        document: &Document,
        boundary: NodeId,
        on_outside: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let on_outside = std::sync::Arc::new(on_outside);
        let listeners = [EventKind::MouseDown, EventKind::TouchEnd]
            .into_iter()
            .map(|kind| {
                let on_outside = on_outside.clone();
                document.add_event_listener(kind, move |document, event| {
                    if !document.contains(boundary, event.target) {
                        on_outside();
                    }
                })
            })
            .collect();

        Self {
            document: document.clone(),
            listeners,
        }
    }
}

impl Drop for ClickOutside {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            self.document.remove_event_listener(id);
        }
        debug!("Removed outside-click listeners");
    }
}
