use booking_shared::api::TodoUpdate;
use booking_shared::models::Todo;
use yew::prelude::*;

use crate::components::todo_item::TodoItem;

#[derive(Properties, PartialEq)]
pub struct TodoListProps {
    pub todos: Vec<Todo>,
    pub on_toggle: Callback<Todo>,
    pub on_save: Callback<(i64, TodoUpdate)>,
    pub on_delete: Callback<i64>,
}

#[function_component(TodoList)]
pub fn todo_list(props: &TodoListProps) -> Html {
    if props.todos.is_empty() {
        return html! {
            <div class="empty-state">
                <h2>{ "No todos yet!" }</h2>
                <p>{ "Add one with the form above." }</p>
            </div>
        };
    }

    html! {
        <div class="todo-list">
            { for props.todos.iter().map(|todo| html! {
                <TodoItem
                    key={todo.id}
                    todo={todo.clone()}
                    on_toggle={props.on_toggle.clone()}
                    on_save={props.on_save.clone()}
                    on_delete={props.on_delete.clone()}
                />
            })}
        </div>
    }
}
