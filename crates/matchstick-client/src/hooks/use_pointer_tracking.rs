//! Document-level pointer listeners for drag sessions.

use gloo::events::EventListener;
use matchstick_core::Point;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

/// Converts a mouse event to canvas-relative coordinates.
pub fn canvas_point(canvas_ref: &NodeRef, event: &MouseEvent) -> Point {
    let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
    match canvas_ref.cast::<HtmlElement>() {
        Some(canvas) => {
            let rect = canvas.get_bounding_client_rect();
            client - Point::new(rect.left(), rect.top())
        }
        None => Point::new(f64::from(event.offset_x()), f64::from(event.offset_y())),
    }
}

/// Attaches `mousemove`/`mouseup` listeners to the document while `active`.
///
/// Listening on the document keeps the drag alive when the pointer leaves the
/// canvas. The listeners are dropped, and so detached, as soon as `active`
/// turns false or the component unmounts.
#[hook]
pub fn use_pointer_tracking(
    active: bool,
    canvas_ref: NodeRef,
    on_move: Callback<Point>,
    on_up: Callback<()>,
) {
    let listeners = use_mut_ref(|| None::<(EventListener, EventListener)>);

    use_effect_with(active, move |active| {
        if !*active {
            *listeners.borrow_mut() = None;
            return;
        }

        let document = gloo::utils::document();

        let mousemove = EventListener::new(&document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_move.emit(canvas_point(&canvas_ref, event));
            }
        });
        let mouseup = EventListener::new(&document, "mouseup", move |_| {
            on_up.emit(());
        });

        tracing::debug!("pointer tracking attached");
        *listeners.borrow_mut() = Some((mousemove, mouseup));
    });
}
