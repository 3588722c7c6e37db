use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::login_form::LoginForm;
use crate::components::theme_toggle::ThemeToggle;
use crate::router::Route;
use crate::services::api::ApiService;
use crate::services::auth::{use_auth, AuthState};
use crate::services::page;

#[function_component(Header)]
pub fn header() -> Html {
    let auth = use_auth();
    let user_menu_open = use_state(|| false);
    let mobile_menu_open = use_state(|| false);

    {
        let auth = auth.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().current_username().await {
                    Ok(username) => auth.set(AuthState::logged_in(username)),
                    Err(e) => {
                        tracing::debug!("Not logged in: {}", e);
                        auth.set(AuthState::logged_out());
                    }
                }
            });
            || ()
        });
    }

    let toggle_user_menu = {
        let user_menu_open = user_menu_open.clone();
        Callback::from(move |_: MouseEvent| user_menu_open.set(!*user_menu_open))
    };

    let toggle_mobile_menu = {
        let mobile_menu_open = mobile_menu_open.clone();
        Callback::from(move |_: MouseEvent| mobile_menu_open.set(!*mobile_menu_open))
    };

    let logout = Callback::from(move |_: MouseEvent| {
        if let Err(e) = ApiService::client().logout() {
            tracing::error!("Failed to clear session: {}", e);
        }
        page::alert("ログアウトしました。");
        page::reload();
    });

    let nav_class = classes!("nav", (*mobile_menu_open).then_some("open"));

    html! {
        <header class="header">
            <div class="container">
                <h1>
                    <Link<Route> to={Route::Home}>{ "Yoro Sports Club" }</Link<Route>>
                </h1>
                <button class="menu-toggle" onclick={toggle_mobile_menu}>{ "☰" }</button>
                <nav class={nav_class}>
                    <Link<Route> to={Route::Lessons}>{ "教室一覧" }</Link<Route>>
                    if auth.is_logged_in() {
                        { " | " }
                        <Link<Route> to={Route::MyLessons}>{ "申し込み済みの教室" }</Link<Route>>
                        { " | " }
                        <Link<Route> to={Route::UserDetails}>{ "登録情報" }</Link<Route>>
                        { " | " }
                        <Link<Route> to={Route::Todos}>{ "Todos" }</Link<Route>>
                    } else {
                        { " | " }
                        <Link<Route> to={Route::Signup}>{ "新規登録" }</Link<Route>>
                    }
                </nav>
                <ThemeToggle />
                if let Some(short_name) = auth.short_name() {
                    <div class="user-menu on-login">
                        <button class="btn user-button" onclick={toggle_user_menu}>
                            { short_name }
                        </button>
                        if *user_menu_open {
                            <div class="user-menu-dropdown">
                                <button class="btn btn-secondary" onclick={logout}>
                                    { "ログアウト" }
                                </button>
                            </div>
                        }
                    </div>
                } else if auth.checked {
                    <div class="on-logout">
                        <LoginForm />
                    </div>
                }
            </div>
        </header>
    }
}
