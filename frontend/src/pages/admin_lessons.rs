use booking_shared::forms::{self, LESSON_FIELDS};
use booking_shared::BoardScope;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::components::lesson_list::LessonList;
use crate::services::api::ApiService;
use crate::services::board::{use_lesson_board, BoardKind};
use crate::services::forms::read_form;
use crate::services::page;

#[derive(Properties, PartialEq)]
struct AddLessonFormProps {
    on_added: Callback<()>,
}

#[function_component(AddLessonForm)]
fn add_lesson_form(props: &AddLessonFormProps) -> Html {
    let form_ref = use_node_ref();
    let busy = use_state(|| false);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let busy = busy.clone();
        let on_added = props.on_added.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let lesson = match forms::lesson_create(&read_form(&form, LESSON_FIELDS)) {
                Ok(lesson) => lesson,
                Err(e) => {
                    page::alert(&e.to_string());
                    return;
                }
            };

            busy.set(true);
            let busy = busy.clone();
            let on_added = on_added.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().create_lesson(&lesson).await {
                    Ok(created) => {
                        tracing::info!("Added lesson {}", created.id);
                        form.reset();
                        on_added.emit(());
                    }
                    Err(e) => {
                        tracing::error!("Error on add lesson form: {}", e);
                        page::alert(&e.user_message());
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <form class="add-lesson-form" ref={form_ref} {onsubmit}>
            <input type="number" name="year" placeholder="年度" required=true />
            <input type="number" name="season" placeholder="期" required=true />
            <input type="number" name="number" placeholder="教室番号" required=true />
            <input type="text" name="title" placeholder="教室名" required=true />
            <input type="text" name="teacher" placeholder="講師" required=true />
            <input type="text" name="day" placeholder="曜日" />
            <input type="text" name="time" placeholder="時間" />
            <input type="text" name="price" placeholder="受講料" inputmode="numeric" />
            <input type="number" name="capacity" placeholder="定員" />
            <input type="number" name="lessons" placeholder="回数" />
            <textarea name="description" placeholder="説明" />
            <button type="submit" class="btn btn-primary" disabled={*busy}>{ "教室を追加" }</button>
        </form>
    }
}

#[function_component(AdminLessons)]
pub fn admin_lessons() -> Html {
    let board = use_lesson_board(BoardKind::Lessons(BoardScope::Admin));

    let content = match &board.board {
        _ if board.failed => html! {
            <div class="empty-state">
                <p>{ "このページを表示する権限がありません。" }</p>
            </div>
        },
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(loaded) => html! {
            <>
                <AddLessonForm on_added={board.refresh.clone()} />
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
            <h2>{ "教室の管理" }</h2>
            { content }
        </div>
    }
}
