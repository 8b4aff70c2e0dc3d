//! Board toolbar: match count input plus Add / Clear / Save / Load.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::state::{BoardHandle, BoardStatus};
use crate::storage::LocalStore;

/// Largest number of matches one click on Add may create.
pub const MAX_ADD_COUNT: usize = 1000;

/// Number of matches to add for the raw count input.
///
/// Empty, zero, negative or unparsable input adds a single match. Larger
/// counts are capped at [`MAX_ADD_COUNT`] so a typo cannot lock up the page.
pub fn parse_count(value: &str) -> usize {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&count| count > 0)
        .map_or(1, |count| count.min(MAX_ADD_COUNT))
}

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub board: BoardHandle,
    pub status: BoardStatus,
    #[prop_or_default]
    pub on_change: Callback<BoardStatus>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let count_ref = use_node_ref();
    let notice = use_state(|| None::<String>);

    let on_add = {
        let board = props.board.clone();
        let on_change = props.on_change.clone();
        let count_ref = count_ref.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let raw = count_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let count = parse_count(&raw);
            if board.with(|b| b.add_matches(count)).is_some() {
                notice.set(None);
                on_change.emit(board.status());
            }
        })
    };

    let on_clear = {
        let board = props.board.clone();
        let on_change = props.on_change.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            if board.with(|b| b.clear()).is_some() {
                tracing::info!("board cleared");
                notice.set(None);
                on_change.emit(board.status());
            }
        })
    };

    let on_save = {
        let board = props.board.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let result = LocalStore::open()
                .map_err(Into::into)
                .and_then(|mut store| board.with(|b| b.save(&mut store)).unwrap_or(Ok(0)));
            match result {
                Ok(count) => notice.set(Some(format!("Saved {count} matches"))),
                Err(e) => {
                    tracing::warn!("failed to save board: {e}");
                    notice.set(Some(format!("Save failed: {e}")));
                }
            }
        })
    };

    let on_load = {
        let board = props.board.clone();
        let on_change = props.on_change.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let result = LocalStore::open()
                .map_err(Into::into)
                .and_then(|store| board.with(|b| b.load(&store)).unwrap_or(Ok(false)));
            match result {
                Ok(true) => {
                    notice.set(None);
                    on_change.emit(board.status());
                }
                Ok(false) => notice.set(Some("Nothing saved yet".to_string())),
                Err(e) => {
                    tracing::warn!("failed to load board: {e}");
                    notice.set(Some(format!("Load failed: {e}")));
                }
            }
        })
    };

    html! {
        <div class="toolbar">
            <input
                ref={count_ref}
                id="num-matches-count"
                class="toolbar-count"
                type="number"
                min="1"
                max={MAX_ADD_COUNT.to_string()}
                value="1"
            />
            <button class="btn btn-add" onclick={on_add}>{ "Add" }</button>
            <button class="btn btn-clear" onclick={on_clear}>{ "Clear" }</button>
            <button class="btn btn-save" onclick={on_save}>{ "Save" }</button>
            <button class="btn btn-load" onclick={on_load}>{ "Load" }</button>
            <span class="toolbar-status">{ props.status.summary() }</span>
            if let Some(text) = (*notice).clone() {
                <span class="toolbar-notice">{ text }</span>
            }
        </div>
    }
}
