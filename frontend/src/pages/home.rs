use booking_shared::BoardScope;
use yew::prelude::*;

use crate::components::lesson_list::LessonList;
use crate::services::board::{use_lesson_board, BoardKind};

#[function_component(Home)]
pub fn home() -> Html {
    let board = use_lesson_board(BoardKind::Lessons(BoardScope::Public));

    let content = match &board.board {
        _ if board.failed => html! {
            <div class="empty-state">
                <p>{ "教室の申し込み期間ではありません。" }</p>
            </div>
        },
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(loaded) => html! {
            <>
                if !loaded.logged_in {
                    <p class="notice">{ "申し込みにはログインが必要です。" }</p>
                }
                <LessonList
                    cards={loaded.cards()}
                    pending={board.pending}
                    show_poster=true
                    on_sign_up={board.on_sign_up.clone()}
                    on_cancel={board.on_cancel.clone()}
                />
            </>
        },
    };

    html! {
        <div class="container">
            <h2>{ "教室一覧" }</h2>
            { content }
        </div>
    }
}
