mod components;
mod pages;
mod router;
mod services;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::components::header::Header;
use crate::router::{switch, Route};
use crate::services::auth::AuthState;

#[function_component(App)]
fn app() -> Html {
    let auth = use_state(AuthState::default);

    html! {
        <ContextProvider<UseStateHandle<AuthState>> context={auth}>
            <BrowserRouter>
                <div id="app">
                    <Header />
                    <yew_router::Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<UseStateHandle<AuthState>>>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    crate::services::theme::apply_stored_theme();

    yew::Renderer::<App>::new().render();
}
