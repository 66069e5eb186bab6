//! Input event model and an in-memory event source

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::classifier::{PointerType, PRIMARY_BUTTON};

/// Identifier the host assigns to a pointer for the duration of a contact
pub type PointerId = i32;

/// Identifier returned when a listener is registered
pub type ListenerId = u64;

/// Callback invoked for every matching event
pub type Listener = Rc<dyn Fn(&mut InputEvent)>;

/// Input events the interaction layer consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    DoubleClick,
    Blur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Run ahead of bubbling listeners
    pub capture: bool,
}

impl ListenerOptions {
    pub const CAPTURE: ListenerOptions = ListenerOptions { capture: true };
    pub const BUBBLE: ListenerOptions = ListenerOptions { capture: false };
}

/// A pointer, double-click or focus event
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub pointer_id: Option<PointerId>,
    pub pointer_type: PointerType,
    pub button: i16,
    pub alt_key: bool,
    pub shift_key: bool,
    pub client_x: f64,
    pub client_y: f64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Default for InputEvent {
    fn default() -> Self {
        Self {
            pointer_id: None,
            pointer_type: PointerType::Mouse,
            button: PRIMARY_BUTTON,
            alt_key: false,
            shift_key: false,
            client_x: 0.0,
            client_y: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}

impl InputEvent {
    /// Mouse event for `button` from pointer `pointer_id`
    pub fn mouse(pointer_id: PointerId, button: i16) -> Self {
        Self {
            pointer_id: Some(pointer_id),
            button,
            ..Default::default()
        }
    }

    /// Touch contact `pointer_id`
    pub fn touch(pointer_id: PointerId) -> Self {
        Self {
            pointer_id: Some(pointer_id),
            pointer_type: PointerType::Touch,
            ..Default::default()
        }
    }

    /// Focus loss; carries no pointer data
    pub fn blur() -> Self {
        Self::default()
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn at(mut self, client_x: f64, client_y: f64) -> Self {
        self.client_x = client_x;
        self.client_y = client_y;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Something listeners can be attached to, such as a document or a canvas element
pub trait EventSource {
    fn add_listener(&self, kind: EventKind, listener: Listener, options: ListenerOptions) -> ListenerId;

    /// Remove a listener; returns false if it was not registered with these options
    fn remove_listener(&self, kind: EventKind, id: ListenerId, options: ListenerOptions) -> bool;
}

struct Registration {
    id: ListenerId,
    kind: EventKind,
    options: ListenerOptions,
    listener: Listener,
}

/// Single-target event source that delivers events synchronously.
///
/// Capturing listeners run before bubbling ones, each group in registration order.
/// Once a listener stops propagation no bubbling listener runs.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: Cell<ListenerId>,
    registrations: RefCell<Vec<Registration>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, kind: EventKind, event: &mut InputEvent) {
        // snapshot so listeners may add or remove registrations while running
        let (capturing, bubbling): (Vec<_>, Vec<_>) = {
            let registrations = self.registrations.borrow();
            let matching = registrations.iter().filter(|r| r.kind == kind);
            (
                matching
                    .clone()
                    .filter(|r| r.options.capture)
                    .map(|r| Rc::clone(&r.listener))
                    .collect(),
                matching
                    .filter(|r| !r.options.capture)
                    .map(|r| Rc::clone(&r.listener))
                    .collect(),
            )
        };

        for listener in capturing {
            listener(event);
        }
        if event.propagation_stopped() {
            return;
        }
        for listener in bubbling {
            listener(event);
        }
    }

    /// Number of registered listeners across all kinds
    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl EventSource for EventDispatcher {
    fn add_listener(&self, kind: EventKind, listener: Listener, options: ListenerOptions) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.registrations.borrow_mut().push(Registration {
            id,
            kind,
            options,
            listener,
        });
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId, options: ListenerOptions) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| !(r.id == id && r.kind == kind && r.options == options));
        registrations.len() != before
    }
}
