use booking_shared::view::{poster_slot, POSTER_IMAGE};
use booking_shared::LessonCard;
use yew::prelude::*;

use crate::components::lesson_card::LessonCardView;

#[derive(Properties, PartialEq)]
pub struct LessonListProps {
    pub cards: Vec<LessonCard>,
    /// Lesson whose sign-up or cancel request is in flight.
    pub pending: Option<i64>,
    #[prop_or_default]
    pub show_poster: bool,
    pub on_sign_up: Callback<i64>,
    pub on_cancel: Callback<i64>,
}

#[function_component(LessonList)]
pub fn lesson_list(props: &LessonListProps) -> Html {
    if props.cards.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{ "表示できる教室はありません。" }</p>
            </div>
        };
    }

    let poster_at = if props.show_poster {
        poster_slot(props.cards.len())
    } else {
        None
    };

    html! {
        <div class="lesson-list">
            { for props.cards.iter().enumerate().map(|(idx, card)| {
                html! {
                    <>
                        <LessonCardView
                            card={card.clone()}
                            pending={props.pending == Some(card.id)}
                            on_sign_up={props.on_sign_up.clone()}
                            on_cancel={props.on_cancel.clone()}
                        />
                        if poster_at == Some(idx + 1) {
                            <img class="lesson-poster" src={POSTER_IMAGE} alt="教室のご案内" />
                        }
                    </>
                }
            })}
        </div>
    }
}
