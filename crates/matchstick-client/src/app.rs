//! Main application component.

use yew::prelude::*;

use crate::components::{BoardCanvas, Toolbar};
use crate::hooks::use_scene_config;
use crate::state::{BoardHandle, BoardStatus};

/// Root application component.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_scene_config();
    let board = use_memo((), |_| BoardHandle::default());
    let status = use_state_eq(BoardStatus::default);

    let on_change = {
        let status = status.clone();
        Callback::from(move |next: BoardStatus| status.set(next))
    };

    html! {
        <main class="board-app">
            <Toolbar
                board={(*board).clone()}
                status={*status}
                on_change={on_change.clone()}
            />
            <BoardCanvas
                board={(*board).clone()}
                config={config}
                on_change={on_change}
            />
        </main>
    }
}
