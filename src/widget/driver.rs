use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;
use crate::error::PlacesError;
use crate::models::{AutocompleteSuggestion, PlaceDetail, StudioLocation};
use crate::repositories::google_places::PlacesApi;
use crate::widget::{
    LocationInput, LocationInputProps, LocationInputView, PlaceDetailRequest, RequestId,
    SuggestionRequest,
};

#[derive(Debug)]
pub enum WidgetEvent {
    Change(String),
    Focus,
    Select(usize),
    Clear,
    Dismiss,
    SetValue(Option<StudioLocation>),
    SuggestionsLoaded {
        request: RequestId,
        result: Result<Vec<AutocompleteSuggestion>, PlacesError>,
    },
    PlaceDetailLoaded {
        request: RequestId,
        result: Result<PlaceDetail, PlacesError>,
    },
}

/// Handle to a location input running on its own event loop task.
///
/// The loop ends once every handle and in-flight fetch has been dropped.
#[derive(Clone)]
pub struct LocationInputHandle {
    events: mpsc::UnboundedSender<WidgetEvent>,
    view: watch::Receiver<LocationInputView>,
}

impl LocationInputHandle {
    fn send(&self, event: WidgetEvent) {
        if self.events.send(event).is_err() {
            debug!("Location input event loop has stopped");
        }
    }

    pub fn change(&self, text: &str) {
        self.send(WidgetEvent::Change(text.to_string()));
    }

    pub fn focus(&self) {
        self.send(WidgetEvent::Focus);
    }

    pub fn select(&self, index: usize) {
        self.send(WidgetEvent::Select(index));
    }

    pub fn clear(&self) {
        self.send(WidgetEvent::Clear);
    }

    pub fn dismiss(&self) {
        self.send(WidgetEvent::Dismiss);
    }

    pub fn set_value(&self, value: Option<StudioLocation>) {
        self.send(WidgetEvent::SetValue(value));
    }

    /// Callback suitable for [`crate::helpers::click_outside::ClickOutside`].
    pub fn dismisser(&self) -> impl Fn() + Send + Sync + 'static {
        let events = self.events.clone();
        move || {
            let _ = events.send(WidgetEvent::Dismiss);
        }
    }

    pub fn view(&self) -> LocationInputView {
        self.view.borrow().clone()
    }

    /// Resolves with the first view published after this call, or `None`
    /// once the event loop has stopped.
    pub fn changed(&mut self) -> impl Future<Output = Option<LocationInputView>> + '_ {
        drop(self.view.borrow_and_update());
        async move {
            self.view.changed().await.ok()?;
            let view = self.view.borrow_and_update().clone();
            Some(view)
        }
    }

    /// Waits until the view satisfies `predicate`, returning it.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&LocationInputView) -> bool,
    ) -> Option<LocationInputView> {
        let mut view = self.view.clone();
        loop {
            {
                let current = view.borrow_and_update();
                if predicate(&*current) {
                    return Some(current.clone());
                }
            }
            if view.changed().await.is_err() {
                return None;
            }
        }
    }
}

pub fn spawn_location_input<P>(
    places: Arc<P>,
    props: LocationInputProps,
    on_select: impl FnMut(Option<StudioLocation>) + Send + 'static,
) -> (LocationInputHandle, JoinHandle<()>)
where
    P: PlacesApi + 'static,
{
    let input = LocationInput::new(props, on_select);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(input.snapshot());

    let task = tokio::spawn(run_event_loop(input, places, events_tx.downgrade(), events_rx, view_tx));

    (
        LocationInputHandle {
            events: events_tx,
            view: view_rx,
        },
        task,
    )
}

async fn run_event_loop<P>(
    mut input: LocationInput,
    places: Arc<P>,
    events_tx: mpsc::WeakUnboundedSender<WidgetEvent>,
    mut events_rx: mpsc::UnboundedReceiver<WidgetEvent>,
    view_tx: watch::Sender<LocationInputView>,
) where
    P: PlacesApi + 'static,
{
    while let Some(event) = events_rx.recv().await {
        match event {
            WidgetEvent::Change(text) => {
                if let Some(request) = input.on_change(&text) {
                    spawn_suggestion_fetch(&places, &events_tx, request);
                }
            }
            WidgetEvent::Focus => {
                if let Some(request) = input.on_focus() {
                    spawn_suggestion_fetch(&places, &events_tx, request);
                }
            }
            WidgetEvent::Select(index) => {
                if let Some(request) = input.select(index) {
                    spawn_place_detail_fetch(&places, &events_tx, request);
                }
            }
            WidgetEvent::Clear => input.clear(),
            WidgetEvent::Dismiss => input.dismiss_suggestions(),
            WidgetEvent::SetValue(value) => input.set_value(value),
            WidgetEvent::SuggestionsLoaded { request, result } => input.on_suggestions(request, result),
            WidgetEvent::PlaceDetailLoaded { request, result } => input.on_place_detail(request, result),
        }

        view_tx.send_replace(input.snapshot());
    }
    debug!("Location input event loop finished");
}

fn spawn_suggestion_fetch<P>(
    places: &Arc<P>,
    events_tx: &mpsc::WeakUnboundedSender<WidgetEvent>,
    request: SuggestionRequest,
) where
    P: PlacesApi + 'static,
{
    let Some(events) = events_tx.upgrade() else {
        return;
    };
    let places = places.clone();
    tokio::spawn(async move {
        let result = places
            .autocomplete(&request.input, request.types.as_deref())
            .await;
        let _ = events.send(WidgetEvent::SuggestionsLoaded {
            request: request.id,
            result,
        });
    });
}

fn spawn_place_detail_fetch<P>(
    places: &Arc<P>,
    events_tx: &mpsc::WeakUnboundedSender<WidgetEvent>,
    request: PlaceDetailRequest,
) where
    P: PlacesApi + 'static,
{
    let Some(events) = events_tx.upgrade() else {
        return;
    };
    let places = places.clone();
    tokio::spawn(async move {
        let result = places.place_detail(&request.place_id).await;
        let _ = events.send(WidgetEvent::PlaceDetailLoaded {
            request: request.id,
            result,
        });
    });
}
