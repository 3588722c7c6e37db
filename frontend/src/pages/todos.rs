use booking_shared::api::TodoUpdate;
use booking_shared::forms;
use booking_shared::models::Todo;
use web_sys::{HtmlFormElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::todo_list::TodoList;
use crate::services::api::ApiService;
use crate::services::forms::{auto_resize, read_form};
use crate::services::page;
use crate::services::refresh::use_refresh;

#[function_component(Todos)]
pub fn todos() -> Html {
    let todos = use_state(Vec::<Todo>::new);
    let loading = use_state(|| true);
    let busy = use_state(|| false);
    let (generation, refresh) = use_refresh();
    let form_ref = use_node_ref();

    {
        let todos = todos.clone();
        let loading = loading.clone();

        use_effect_with(generation, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().todos().await {
                    Ok(response) => todos.set(response),
                    Err(e) => tracing::error!("Failed to fetch todos: {}", e),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_add = {
        let form_ref = form_ref.clone();
        let busy = busy.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let todo = match forms::todo_create(&read_form(&form, &["title", "content"])) {
                Ok(todo) => todo,
                Err(e) => {
                    page::alert(&e.to_string());
                    return;
                }
            };

            busy.set(true);
            let busy = busy.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().create_todo(&todo).await {
                    Ok(_) => form.reset(),
                    Err(e) => tracing::error!("Failed to create todo: {}", e),
                }
                busy.set(false);
                refresh.emit(());
            });
        })
    };

    let on_toggle = {
        let refresh = refresh.clone();
        Callback::from(move |todo: Todo| {
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::client().toggle_todo(&todo).await {
                    tracing::error!("Failed to toggle todo {}: {}", todo.id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_save = {
        let refresh = refresh.clone();
        Callback::from(move |(id, update): (i64, TodoUpdate)| {
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::client().update_todo(id, &update).await {
                    tracing::error!("Failed to update todo {}: {}", id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_delete = {
        let refresh = refresh.clone();
        Callback::from(move |id: i64| {
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::client().delete_todo(id).await {
                    tracing::error!("Failed to delete todo {}: {}", id, e);
                }
                refresh.emit(());
            });
        })
    };

    let resize = Callback::from(|e: InputEvent| {
        if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
            auto_resize(&textarea);
        }
    });

    html! {
        <div class="container">
            <h2>{ "My Todos" }</h2>
            <form class="todo-form" ref={form_ref} onsubmit={on_add}>
                <input type="text" name="title" placeholder="タイトル" required=true />
                <textarea name="content" placeholder="内容" oninput={resize} />
                <button type="submit" class="btn btn-primary" disabled={*busy}>{ "追加" }</button>
            </form>
            if *loading {
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            } else {
                <TodoList todos={(*todos).clone()} {on_toggle} {on_save} {on_delete} />
            }
        </div>
    }
}
