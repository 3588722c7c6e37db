use booking_shared::api::TodoUpdate;
use booking_shared::forms::todo_edit;
use booking_shared::models::Todo;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::forms::auto_resize;

#[derive(Properties, PartialEq)]
pub struct TodoItemProps {
    pub todo: Todo,
    pub on_toggle: Callback<Todo>,
    pub on_save: Callback<(i64, TodoUpdate)>,
    pub on_delete: Callback<i64>,
}

#[function_component(TodoItem)]
pub fn todo_item(props: &TodoItemProps) -> Html {
    let todo = &props.todo;
    let editing = use_state(|| false);
    let confirming_delete = use_state(|| false);
    let title_ref = use_node_ref();
    let content_ref = use_node_ref();

    let toggle = {
        let on_toggle = props.on_toggle.clone();
        let todo = todo.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(todo.clone()))
    };

    let toggle_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(!*editing))
    };

    let save = {
        let on_save = props.on_save.clone();
        let editing = editing.clone();
        let title_ref = title_ref.clone();
        let content_ref = content_ref.clone();
        let id = todo.id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let title = title_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let content = content_ref
                .cast::<HtmlTextAreaElement>()
                .map(|textarea| textarea.value())
                .unwrap_or_default();
            on_save.emit((id, todo_edit(&title, &content)));
            editing.set(false);
        })
    };

    let ask_delete = {
        let confirming_delete = confirming_delete.clone();
        Callback::from(move |_: MouseEvent| confirming_delete.set(true))
    };
    let cancel_delete = {
        let confirming_delete = confirming_delete.clone();
        Callback::from(move |_: MouseEvent| confirming_delete.set(false))
    };
    let confirm_delete = {
        let on_delete = props.on_delete.clone();
        let id = todo.id;
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };

    let resize = Callback::from(|e: InputEvent| {
        if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
            auto_resize(&textarea);
        }
    });

    html! {
        <div class={classes!("todo-item", todo.is_done.then_some("todo-done"))}>
            <input
                type="checkbox"
                class="todo-checkbox"
                checked={todo.is_done}
                onclick={toggle}
            />
            <div class="todo-content">
                <div class="todo-title">{ &todo.title }</div>
                if let Some(content) = &todo.content {
                    <div class="todo-description">{ content }</div>
                }
                if *editing {
                    <form class="todo-edit-form" onsubmit={save}>
                        <input type="text" ref={title_ref} value={todo.title.clone()} />
                        <textarea
                            ref={content_ref}
                            value={todo.content.clone().unwrap_or_default()}
                            oninput={resize}
                        />
                        <button type="submit" class="btn btn-primary">{ "保存" }</button>
                        <button type="button" class="btn btn-secondary" onclick={toggle_edit.clone()}>
                            { "キャンセル" }
                        </button>
                    </form>
                }
            </div>
            <div class="todo-actions">
                if !*editing {
                    <button class="btn btn-secondary" onclick={toggle_edit}>{ "編集" }</button>
                }
                if *confirming_delete {
                    <span class="todo-delete-confirm">
                        <button class="btn btn-danger" onclick={confirm_delete}>{ "削除する" }</button>
                        <button class="btn btn-secondary" onclick={cancel_delete}>{ "やめる" }</button>
                    </span>
                } else {
                    <button class="btn btn-danger" onclick={ask_delete}>{ "削除" }</button>
                }
            </div>
        </div>
    }
}
