use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "404 - ページが見つかりません" }</h2>
                <p>{ "お探しのページは存在しません。" }</p>
                <Link<Route> to={Route::Lessons}>
                    <button class="btn btn-primary">{ "教室一覧へ" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}
