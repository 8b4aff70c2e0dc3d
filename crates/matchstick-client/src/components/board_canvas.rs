//! Canvas the matches are drawn on.
//!
//! Owns the `<canvas>` element, creates the board once it has mounted and
//! forwards pointer, context-menu and keyboard input to it.

use matchstick_core::{EventOutcome, InteractionController, KeyCommand, Point, SceneConfig};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::hooks::{canvas_point, use_key_commands, use_pointer_tracking};
use crate::state::{Board, BoardHandle, BoardStatus};
use crate::surface::CanvasSurface;

/// DOM id of the board canvas.
pub const BOARD_CANVAS_ID: &str = "board-canvas";

/// One controller call made from an event handler.
type BoardAction = Box<dyn FnOnce(&mut Board) -> EventOutcome>;

#[derive(Properties, PartialEq)]
pub struct BoardCanvasProps {
    pub board: BoardHandle,
    pub config: SceneConfig,
    /// Emitted after every input that changed the board.
    #[prop_or_default]
    pub on_change: Callback<BoardStatus>,
}

#[function_component(BoardCanvas)]
pub fn board_canvas(props: &BoardCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let is_tracking = use_state_eq(|| false);

    // Runs every board call through one place so the drag-tracking flag and
    // the toolbar status stay in sync with the controller.
    let dispatch = {
        let board = props.board.clone();
        let on_change = props.on_change.clone();
        let is_tracking = is_tracking.clone();
        use_callback(
            (board, on_change),
            move |action: BoardAction, (board, on_change)| {
                let Some((outcome, tracking)) = board.with(|b| {
                    let outcome = action(b);
                    (outcome, b.is_tracking())
                }) else {
                    return EventOutcome::IGNORED;
                };
                is_tracking.set(tracking);
                if outcome.handled {
                    on_change.emit(board.status());
                }
                outcome
            },
        )
    };

    // Create the board once the canvas exists.
    {
        let canvas_ref = canvas_ref.clone();
        let board = props.board.clone();
        let on_change = props.on_change.clone();
        let is_tracking = is_tracking.clone();

        use_effect_with(props.config.clone(), move |config| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                tracing::warn!("board canvas is not mounted");
                return;
            };
            let Some(surface) = CanvasSurface::from_canvas(&canvas) else {
                tracing::error!("failed to acquire 2d context for board canvas");
                return;
            };
            let mut controller = InteractionController::new(surface, config.clone());
            controller.redraw();
            board.attach(controller);
            is_tracking.set(false);
            tracing::info!(
                width = canvas.width(),
                height = canvas.height(),
                "board attached to canvas"
            );
            on_change.emit(board.status());
        });
    }

    let on_pointer_move = {
        let dispatch = dispatch.clone();
        Callback::from(move |point: Point| {
            dispatch.emit(Box::new(move |b: &mut Board| b.pointer_move(point)));
        })
    };

    let on_pointer_up = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.emit(Box::new(|b: &mut Board| b.pointer_up()));
        })
    };

    use_pointer_tracking(*is_tracking, canvas_ref.clone(), on_pointer_move, on_pointer_up);

    let on_command = {
        let dispatch = dispatch.clone();
        use_callback(dispatch, |command: KeyCommand, dispatch| {
            dispatch.emit(Box::new(move |b: &mut Board| b.command(command)));
        })
    };

    use_key_commands(on_command);

    let onmousedown = {
        let dispatch = dispatch.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let point = canvas_point(&canvas_ref, &e);
            tracing::debug!(button = e.button(), x = point.x, y = point.y, "mousedown");
            dispatch.emit(Box::new(move |b: &mut Board| b.pointer_down(point)));
        })
    };

    let oncontextmenu = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| {
            let outcome = dispatch.emit(Box::new(|b: &mut Board| b.context_menu()));
            if outcome.prevent_default {
                e.prevent_default();
            }
        })
    };

    html! {
        <canvas
            ref={canvas_ref}
            id={BOARD_CANVAS_ID}
            class="board-canvas"
            width={props.config.surface.width.to_string()}
            height={props.config.surface.height.to_string()}
            {onmousedown}
            {oncontextmenu}
        />
    }
}
