//! Pointer interaction state machine
//!
//! [`install`] subscribes to pointer, double-click and blur events on a document-level
//! and an element-level [`EventSource`], tracks touch contacts and the active mouse
//! pointer, and drives the host's controller and camera:
//!
//! - touch: one contact pans, two or more pinch
//! - primary button pans, alt + primary orbits, shift + primary tilts
//! - double-click zooms towards the target
//! - window blur resets everything, so a lost pointer-up cannot leave a gesture stuck
//!
//! The machine is inert after [`InteractionHandle::cleanup`] or when the handle is
//! dropped.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use viewcrate_core::{
    compute_tilt_angle_from_drag, compute_zoomed_camera_distance, Error, InteractionMode,
    InteractionTuning, Result,
};

use crate::classifier::{classify, resolve_left_mouse_action, MouseAction, PointerType, PRIMARY_BUTTON};
use crate::controller::{ActionCodes, CameraPose, EditModeFlag, OrbitController};
use crate::events::{EventKind, EventSource, InputEvent, Listener, ListenerId, ListenerOptions, PointerId};
use crate::tilt::select_tilt_strategy;

/// Callback fired whenever user input moved the camera
pub type NavigateCallback = Rc<dyn Fn()>;

/// Collaborators and tuning for [`install`].
///
/// Event sources, controller, camera and action codes are required.
#[derive(Default)]
pub struct InteractionConfig {
    document: Option<Rc<dyn EventSource>>,
    element: Option<Rc<dyn EventSource>>,
    controller: Option<Rc<RefCell<dyn OrbitController>>>,
    camera: Option<Rc<RefCell<dyn CameraPose>>>,
    action_codes: Option<ActionCodes>,
    edit_mode: EditModeFlag,
    on_navigate: Option<NavigateCallback>,
    tuning: InteractionTuning,
}

impl InteractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source of pointer-move, pointer-up/cancel and blur events
    pub fn with_document(mut self, document: Rc<dyn EventSource>) -> Self {
        self.document = Some(document);
        self
    }

    /// Source of pointer-down and double-click events on the viewport surface
    pub fn with_element(mut self, element: Rc<dyn EventSource>) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_controller(mut self, controller: Rc<RefCell<dyn OrbitController>>) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_camera(mut self, camera: Rc<RefCell<dyn CameraPose>>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_action_codes(mut self, action_codes: ActionCodes) -> Self {
        self.action_codes = Some(action_codes);
        self
    }

    pub fn with_edit_mode(mut self, edit_mode: EditModeFlag) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    pub fn with_on_navigate(mut self, on_navigate: impl Fn() + 'static) -> Self {
        self.on_navigate = Some(Rc::new(on_navigate));
        self
    }

    pub fn with_tuning(mut self, tuning: InteractionTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ShiftTilt {
    active: bool,
    pointer_id: Option<PointerId>,
    last_y: f64,
}

#[derive(Debug, Default)]
struct PointerState {
    mode: InteractionMode,
    touch_pointer_ids: HashSet<PointerId>,
    active_mouse_pointer_id: Option<PointerId>,
    /// Gesture classified from the last desktop pointer-down, until released
    mouse_mode: Option<InteractionMode>,
    shift_tilt: ShiftTilt,
}

impl PointerState {
    /// Derive the current mode; two or more touch contacts always pinch
    fn refresh_mode(&mut self) {
        let contacts = self.touch_pointer_ids.len();
        let mode = if contacts >= 2 {
            classify(PointerType::Touch, PRIMARY_BUTTON, false, false, contacts)
        } else if self.shift_tilt.active {
            InteractionMode::Tilt
        } else if let Some(mouse_mode) = self.mouse_mode {
            mouse_mode
        } else if contacts == 1 {
            classify(PointerType::Touch, PRIMARY_BUTTON, false, false, contacts)
        } else {
            InteractionMode::None
        };

        if self.mode != mode {
            debug!("Interaction mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }
}

struct Machine {
    state: RefCell<PointerState>,
    controller: Rc<RefCell<dyn OrbitController>>,
    camera: Rc<RefCell<dyn CameraPose>>,
    action_codes: ActionCodes,
    edit_mode: EditModeFlag,
    on_navigate: Option<NavigateCallback>,
    tuning: InteractionTuning,
}

type Handler = fn(&Machine, &mut InputEvent);

impl Machine {
    fn reset_left_button(&self) {
        self.controller
            .borrow_mut()
            .set_left_button_action(self.action_codes.code_for(MouseAction::Pan));
    }

    fn notify_navigation(&self) {
        if let Some(on_navigate) = &self.on_navigate {
            on_navigate();
        }
    }

    fn on_pointer_down(&self, event: &mut InputEvent) {
        if self.edit_mode.is_active() {
            return;
        }

        if !event.pointer_type.is_desktop() {
            let mut state = self.state.borrow_mut();
            if let Some(id) = event.pointer_id {
                state.touch_pointer_ids.insert(id);
            }
            state.refresh_mode();
            return;
        }

        let mode = {
            let mut state = self.state.borrow_mut();
            let mode = classify(
                event.pointer_type,
                event.button,
                event.alt_key,
                event.shift_key,
                state.touch_pointer_ids.len(),
            );
            state.mouse_mode = Some(mode);
            if event.button == PRIMARY_BUTTON {
                state.active_mouse_pointer_id = event.pointer_id;
            }
            if mode == InteractionMode::Tilt {
                state.shift_tilt = ShiftTilt {
                    active: true,
                    pointer_id: event.pointer_id,
                    last_y: event.client_y,
                };
            }
            state.refresh_mode();
            mode
        };

        let mut controller = self.controller.borrow_mut();
        if event.button == PRIMARY_BUTTON {
            let action = resolve_left_mouse_action(event.alt_key);
            controller.set_left_button_action(self.action_codes.code_for(action));
        }
        if mode == InteractionMode::Tilt {
            debug!("Tilt started for pointer {:?}", event.pointer_id);
            controller.set_enabled(false);
            event.prevent_default();
            event.stop_propagation();
        }
    }

    fn on_pointer_move(&self, event: &mut InputEvent) {
        if self.edit_mode.is_active() || !event.client_y.is_finite() {
            return;
        }

        let angle = {
            let mut state = self.state.borrow_mut();
            let tilt = &mut state.shift_tilt;
            if !tilt.active || tilt.pointer_id != event.pointer_id {
                return;
            }
            let delta_y = event.client_y - tilt.last_y;
            tilt.last_y = event.client_y;
            compute_tilt_angle_from_drag(delta_y, &self.tuning.tilt)
        };

        if angle.abs() < self.tuning.tilt_epsilon {
            return;
        }

        {
            let mut controller = self.controller.borrow_mut();
            let strategy = select_tilt_strategy(&mut *controller);
            trace!("Tilting by {angle} rad ({})", strategy.name());
            strategy.apply(&mut *controller, &*self.camera, angle);
            controller.update();
        }
        self.notify_navigation();
        event.prevent_default();
    }

    fn on_pointer_up(&self, event: &mut InputEvent) {
        if !event.pointer_type.is_desktop() {
            let mut state = self.state.borrow_mut();
            if let Some(id) = event.pointer_id {
                state.touch_pointer_ids.remove(&id);
            }
            state.refresh_mode();
            return;
        }

        let (end_tilt, release_button) = {
            let mut state = self.state.borrow_mut();

            let end_tilt = state.shift_tilt.active
                && (event.pointer_id.is_none() || event.pointer_id == state.shift_tilt.pointer_id);
            if end_tilt {
                state.shift_tilt = ShiftTilt::default();
            }

            let release_button = (event.pointer_id.is_some()
                && event.pointer_id == state.active_mouse_pointer_id)
                || event.button == PRIMARY_BUTTON;
            if release_button {
                state.active_mouse_pointer_id = None;
            }

            state.mouse_mode = None;
            state.refresh_mode();
            (end_tilt, release_button)
        };

        if end_tilt {
            debug!("Tilt ended for pointer {:?}", event.pointer_id);
            self.controller.borrow_mut().set_enabled(true);
        }
        if release_button {
            self.reset_left_button();
        }
    }

    fn on_blur(&self, _event: &mut InputEvent) {
        let was_tilting = {
            let mut state = self.state.borrow_mut();
            if state.mode.is_active() {
                debug!("Focus lost during {}", state.mode);
            }
            let was_tilting = state.shift_tilt.active;
            state.touch_pointer_ids.clear();
            state.shift_tilt = ShiftTilt::default();
            state.active_mouse_pointer_id = None;
            state.mouse_mode = None;
            state.refresh_mode();
            was_tilting
        };

        debug!("Focus lost, pointer state reset");
        if was_tilting {
            self.controller.borrow_mut().set_enabled(true);
        }
        self.reset_left_button();
    }

    fn on_double_click(&self, event: &mut InputEvent) {
        if self.edit_mode.is_active() || !event.pointer_type.is_desktop() {
            return;
        }

        let (target, min_distance, max_distance) = {
            let controller = self.controller.borrow();
            (controller.target(), controller.min_distance(), controller.max_distance())
        };

        {
            let mut camera = self.camera.borrow_mut();
            let offset = camera.position() - target;
            let distance = offset.norm();
            if !(distance > 0.0) {
                return;
            }

            let next_distance = compute_zoomed_camera_distance(
                distance,
                min_distance,
                max_distance,
                self.tuning.zoom_factor,
            );
            if !((next_distance - distance).abs() > self.tuning.zoom_epsilon) {
                trace!("Double-click zoom already at distance bound {distance}");
                return;
            }

            debug!("Double-click zoom {distance} -> {next_distance}");
            camera.set_position(target + offset * (next_distance / distance));
        }

        self.controller.borrow_mut().update();
        self.notify_navigation();
        event.prevent_default();
    }
}

struct Subscription {
    source: Rc<dyn EventSource>,
    kind: EventKind,
    options: ListenerOptions,
    id: ListenerId,
}

/// Live interaction layer returned by [`install`]
pub struct InteractionHandle {
    machine: Rc<Machine>,
    subscriptions: Vec<Subscription>,
}

impl InteractionHandle {
    /// The gesture currently in progress
    pub fn interaction_mode(&self) -> InteractionMode {
        self.machine.state.borrow().mode
    }

    /// Whether event listeners are still attached
    pub fn is_installed(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Detach every listener. Calling it again is a no-op.
    pub fn cleanup(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        for subscription in self.subscriptions.drain(..) {
            subscription
                .source
                .remove_listener(subscription.kind, subscription.id, subscription.options);
        }
        debug!("Interaction listeners removed");
    }
}

impl Drop for InteractionHandle {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Wire the interaction state machine to its event sources.
///
/// Fails with [`Error::MissingCollaborator`] when a required collaborator is absent and
/// with [`Error::InvalidConfig`] for out-of-range tuning. On success the controller's
/// left button is bound to pan.
pub fn install(config: InteractionConfig) -> Result<InteractionHandle> {
    let InteractionConfig {
        document,
        element,
        controller,
        camera,
        action_codes,
        edit_mode,
        on_navigate,
        tuning,
    } = config;

    let document = require(document, "document")?;
    let element = require(element, "element")?;
    let controller = require(controller, "controller")?;
    let camera = require(camera, "camera")?;
    let action_codes = require(action_codes, "action_codes")?;
    tuning.validate()?;

    let machine = Rc::new(Machine {
        state: RefCell::new(PointerState::default()),
        controller,
        camera,
        action_codes,
        edit_mode,
        on_navigate,
        tuning,
    });
    machine.reset_left_button();

    let bindings: [(&Rc<dyn EventSource>, EventKind, Handler, ListenerOptions); 6] = [
        (&element, EventKind::PointerDown, Machine::on_pointer_down, ListenerOptions::CAPTURE),
        (&element, EventKind::DoubleClick, Machine::on_double_click, ListenerOptions::CAPTURE),
        (&document, EventKind::PointerMove, Machine::on_pointer_move, ListenerOptions::CAPTURE),
        (&document, EventKind::PointerUp, Machine::on_pointer_up, ListenerOptions::CAPTURE),
        (&document, EventKind::PointerCancel, Machine::on_pointer_up, ListenerOptions::CAPTURE),
        (&document, EventKind::Blur, Machine::on_blur, ListenerOptions::BUBBLE),
    ];

    let subscriptions = bindings
        .into_iter()
        .map(|(source, kind, handler, options)| {
            let target = Rc::clone(&machine);
            let listener: Listener = Rc::new(move |event: &mut InputEvent| handler(&target, event));
            let id = source.add_listener(kind, listener, options);
            Subscription {
                source: Rc::clone(source),
                kind,
                options,
                id,
            }
        })
        .collect();

    debug!("Interaction listeners installed");
    Ok(InteractionHandle {
        machine,
        subscriptions,
    })
}

fn require<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or_else(|| {
        warn!("Cannot install interaction layer: missing {name}");
        Error::MissingCollaborator(name)
    })
}
