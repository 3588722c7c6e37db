//! Loading and mutating a lesson board from a page.

use booking_shared::{BoardScope, ClientResult, LessonBoard};
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::services::page;
use crate::services::refresh::use_refresh;

const SIGN_UP_FAILED: &str = "エラーが発生しました。もう一度やり直してください。";

/// Which board a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Lessons(BoardScope),
    /// Only the lessons the user signed up for.
    Mine,
}

async fn load(kind: BoardKind) -> ClientResult<LessonBoard> {
    let client = ApiService::client();
    match kind {
        BoardKind::Lessons(scope) => client.lesson_board(scope).await,
        BoardKind::Mine => client.my_board().await,
    }
}

pub struct BoardHandle {
    pub board: Option<LessonBoard>,
    /// The board could not be loaded; pages show a notice instead.
    pub failed: bool,
    pub pending: Option<i64>,
    pub on_sign_up: Callback<i64>,
    pub on_cancel: Callback<i64>,
    /// Re-fetches the board, e.g. after a lesson was added.
    pub refresh: Callback<()>,
}

#[hook]
pub fn use_lesson_board(kind: BoardKind) -> BoardHandle {
    let board = use_state(|| None::<LessonBoard>);
    let failed = use_state(|| false);
    let pending = use_state(|| None::<i64>);
    let (generation, refresh) = use_refresh();

    {
        let board = board.clone();
        let failed = failed.clone();
        use_effect_with((kind, generation), move |(kind, _)| {
            let kind = *kind;
            wasm_bindgen_futures::spawn_local(async move {
                match load(kind).await {
                    Ok(loaded) => {
                        board.set(Some(loaded));
                        failed.set(false);
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch lessons: {}", e);
                        failed.set(true);
                    }
                }
            });
            || ()
        });
    }

    let on_sign_up = {
        let pending = pending.clone();
        let refresh = refresh.clone();
        Callback::from(move |lesson_id: i64| {
            if pending.is_some() {
                return;
            }
            pending.set(Some(lesson_id));
            let pending = pending.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::client().sign_up(lesson_id).await {
                    tracing::error!("Failed to sign up to lesson {}: {}", lesson_id, e);
                    page::alert(SIGN_UP_FAILED);
                }
                pending.set(None);
                refresh.emit(());
            });
        })
    };

    let on_cancel = {
        let pending = pending.clone();
        let refresh = refresh.clone();
        Callback::from(move |lesson_id: i64| {
            if pending.is_some() {
                return;
            }
            pending.set(Some(lesson_id));
            let pending = pending.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::client().cancel(lesson_id).await {
                    tracing::error!("Failed to cancel lesson {}: {}", lesson_id, e);
                }
                pending.set(None);
                refresh.emit(());
            });
        })
    };

    BoardHandle {
        board: (*board).clone(),
        failed: *failed,
        pending: *pending,
        on_sign_up,
        on_cancel,
        refresh,
    }
}
