//! Keyboard bindings for the board.
//!
//! Listens for `keydown` on the document and emits the bound
//! [`KeyCommand`], so `R` and `Delete` work without focusing the canvas.

use gloo::events::EventListener;
use matchstick_core::KeyCommand;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Check if the event target is an input element (input, textarea, etc.)
fn is_input_element(event: &KeyboardEvent) -> bool {
    if let Some(target) = event.target() {
        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
            let tag_name = element.tag_name().to_lowercase();
            return matches!(tag_name.as_str(), "input" | "textarea" | "select");
        }
    }
    false
}

/// Hook emitting a [`KeyCommand`] for every bound key press.
///
/// Presses with Ctrl/Cmd/Alt held are left to the browser, and keys typed
/// into form fields are ignored.
#[hook]
pub fn use_key_commands(on_command: Callback<KeyCommand>) {
    let listener_ref = use_mut_ref(|| None::<EventListener>);

    use_effect_with(on_command, move |on_command| {
        // Clean up previous listener
        *listener_ref.borrow_mut() = None;

        let on_command = on_command.clone();
        let document = gloo::utils::document();

        let listener = EventListener::new(&document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_input_element(event) || event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if let Some(command) = KeyCommand::from_key(&event.key()) {
                event.prevent_default();
                on_command.emit(command);
            }
        });

        *listener_ref.borrow_mut() = Some(listener);
    });
}
