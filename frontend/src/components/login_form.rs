use booking_shared::forms;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::services::forms::read_form;
use crate::services::page;

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let form_ref = use_node_ref();
    let busy = use_state(|| false);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let (username, password) = match forms::login(&read_form(&form, &["username", "password"])) {
                Ok(credentials) => credentials,
                Err(e) => {
                    page::alert(&e.to_string());
                    return;
                }
            };

            busy.set(true);
            let busy = busy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().login(&username, &password).await {
                    Ok(()) => page::reload(),
                    Err(e) => {
                        tracing::error!("Login failed: {}", e);
                        page::alert("error: login");
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <form class="login-form" ref={form_ref} {onsubmit}>
            <input type="text" name="username" placeholder="ユーザー名" autocomplete="username" />
            <input type="password" name="password" placeholder="パスワード" autocomplete="current-password" />
            <button type="submit" class="btn btn-primary" disabled={*busy}>{ "ログイン" }</button>
        </form>
    }
}
