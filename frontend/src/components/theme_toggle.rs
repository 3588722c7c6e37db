use yew::prelude::*;

use crate::services::theme;

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let current = use_state(theme::current_theme);

    let onclick = {
        let current = current.clone();
        Callback::from(move |_: MouseEvent| current.set(theme::toggle(*current)))
    };

    html! {
        <button class="btn theme-toggle" {onclick}>
            { if current.is_dark() { "☀" } else { "☾" } }
        </button>
    }
}
