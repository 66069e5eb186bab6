//! Gesture replay demo
//!
//! Installs the interaction layer on in-memory event sources and orbit controls, then
//! replays a scripted session: touch pan and pinch, an alt orbit, a shift tilt, a
//! double-click zoom and a lost-focus recovery.
//!
//! ```text
//! RUST_LOG=viewcrate_interaction=debug cargo run --bin gesture_replay -- --native-tilt
//! ```

use anyhow::Result;
use clap::Parser;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewcrate_core::{InteractionTuning, Point3d};
use viewcrate_interaction::{
    install, ActionCodes, Camera, EditModeFlag, EventDispatcher, EventKind, InputEvent,
    InteractionConfig, InteractionHandle, OrbitController, OrbitControls, PRIMARY_BUTTON,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a scripted viewport gesture session")]
struct Args {
    /// Let the controls apply tilts themselves instead of the spherical fallback
    #[arg(long)]
    native_tilt: bool,

    /// Start with edit mode on, which suppresses navigation
    #[arg(long)]
    edit_mode: bool,

    #[arg(long, default_value_t = 0.72)]
    zoom_factor: f64,

    #[arg(long, default_value_t = 0.6)]
    min_distance: f64,

    #[arg(long, default_value_t = 10.0)]
    max_distance: f64,
}

struct Session {
    document: Rc<EventDispatcher>,
    element: Rc<EventDispatcher>,
    camera: Rc<RefCell<Camera>>,
    handle: InteractionHandle,
}

impl Session {
    fn send(&self, label: &str, kind: EventKind, mut event: InputEvent) {
        let source = match kind {
            EventKind::PointerDown | EventKind::DoubleClick => &self.element,
            _ => &self.document,
        };
        source.dispatch(kind, &mut event);

        let camera = self.camera.borrow();
        let position = camera.position;
        info!(
            "{label:<24} mode={:<6} prevented={:<5} camera=({:.3}, {:.3}, {:.3}) distance={:.3}",
            self.handle.interaction_mode(),
            event.default_prevented(),
            position.x,
            position.y,
            position.z,
            camera.distance()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let camera = Rc::new(RefCell::new(Camera::default()));
    let controls = Rc::new(RefCell::new(
        OrbitControls::new(Rc::clone(&camera))
            .with_distance_bounds(args.min_distance, args.max_distance)
            .with_native_tilt(args.native_tilt),
    ));
    controls.borrow_mut().target = Point3d::origin();

    let edit_mode = EditModeFlag::new();
    edit_mode.set_active(args.edit_mode);

    let navigations = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&navigations);

    let document = Rc::new(EventDispatcher::new());
    let element = Rc::new(EventDispatcher::new());
    let handle = install(
        InteractionConfig::new()
            .with_document(document.clone())
            .with_element(element.clone())
            .with_controller(controls.clone())
            .with_camera(camera.clone())
            .with_action_codes(ActionCodes::ORBIT_CONTROLS)
            .with_edit_mode(edit_mode)
            .with_on_navigate(move || counter.set(counter.get() + 1))
            .with_tuning(InteractionTuning {
                zoom_factor: args.zoom_factor,
                ..Default::default()
            }),
    )?;

    let mut session = Session {
        document,
        element,
        camera,
        handle,
    };

    session.send("touch 10 down", EventKind::PointerDown, InputEvent::touch(10));
    session.send("touch 11 down", EventKind::PointerDown, InputEvent::touch(11));
    session.send("touch 11 up", EventKind::PointerUp, InputEvent::touch(11));
    session.send("touch 10 up", EventKind::PointerUp, InputEvent::touch(10));

    session.send(
        "alt+left down",
        EventKind::PointerDown,
        InputEvent::mouse(1, PRIMARY_BUTTON).with_alt(),
    );
    info!("left button bound to {}", controls.borrow().left_button_action());
    session.send("left up", EventKind::PointerUp, InputEvent::mouse(1, PRIMARY_BUTTON));

    session.send(
        "shift+left down",
        EventKind::PointerDown,
        InputEvent::mouse(2, PRIMARY_BUTTON).with_shift().at(300.0, 100.0),
    );
    for y in [112.0, 130.0, 160.0] {
        session.send(
            &format!("tilt move y={y}"),
            EventKind::PointerMove,
            InputEvent::mouse(2, PRIMARY_BUTTON).at(300.0, y),
        );
    }
    session.send("shift+left up", EventKind::PointerUp, InputEvent::mouse(2, PRIMARY_BUTTON));

    for round in 1..=3 {
        session.send(
            &format!("double-click #{round}"),
            EventKind::DoubleClick,
            InputEvent::mouse(3, PRIMARY_BUTTON),
        );
    }

    session.send(
        "shift+left down",
        EventKind::PointerDown,
        InputEvent::mouse(4, PRIMARY_BUTTON).with_shift().at(0.0, 0.0),
    );
    session.send("touch 12 down", EventKind::PointerDown, InputEvent::touch(12));
    session.send("blur", EventKind::Blur, InputEvent::blur());
    info!("controls enabled after blur: {}", controls.borrow().enabled());

    info!("{} navigation notifications", navigations.get());

    session.handle.cleanup();
    info!(
        "after cleanup: {} document and {} element listeners",
        session.document.listener_count(),
        session.element.listener_count()
    );

    Ok(())
}
