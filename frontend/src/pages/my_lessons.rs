use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::lesson_list::LessonList;
use crate::router::Route;
use crate::services::board::{use_lesson_board, BoardKind};

#[function_component(MyLessons)]
pub fn my_lessons() -> Html {
    let board = use_lesson_board(BoardKind::Mine);

    let content = match &board.board {
        _ if board.failed => html! {
            <div class="empty-state">
                <p>{ "ログインすると申し込んだ教室が表示されます。" }</p>
            </div>
        },
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(loaded) if loaded.my_lessons.is_empty() => html! {
            <div class="empty-state">
                <p>{ "申し込み済みの教室はありません。" }</p>
                <Link<Route> to={Route::Lessons}>
                    <button class="btn btn-primary">{ "教室一覧へ" }</button>
                </Link<Route>>
            </div>
        },
        Some(loaded) => {
            let waitlisted = loaded.waitlisted_count();
            html! {
                <>
                    if waitlisted > 0 {
                        <p class="notice">
                            { format!("{}件の教室がキャンセル待ちです。", waitlisted) }
                        </p>
                    }
                    <LessonList
                        cards={loaded.my_cards()}
                        pending={board.pending}
                        on_sign_up={board.on_sign_up.clone()}
                        on_cancel={board.on_cancel.clone()}
                    />
                </>
            }
        }
    };

    html! {
        <div class="container">
            <h2>{ "申し込み済みの教室" }</h2>
            { content }
        </div>
    }
}
