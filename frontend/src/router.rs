use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    admin_lessons::AdminLessons, admin_settings::AdminSettings, home::Home,
    my_lessons::MyLessons, not_found::NotFound, signup::Signup, todos::Todos,
    user_details::UserDetailsPage,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/lessons")]
    Lessons,
    #[at("/my/lessons")]
    MyLessons,
    #[at("/my/userdetails")]
    UserDetails,
    #[at("/users/signup")]
    Signup,
    #[at("/admin/lessons")]
    AdminLessons,
    #[at("/admin/settings")]
    AdminSettings,
    #[at("/todos")]
    Todos,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::Lessons => html! { <Home /> },
        Route::MyLessons => html! { <MyLessons /> },
        Route::UserDetails => html! { <UserDetailsPage /> },
        Route::Signup => html! { <Signup /> },
        Route::AdminLessons => html! { <AdminLessons /> },
        Route::AdminSettings => html! { <AdminSettings /> },
        Route::Todos => html! { <Todos /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
