use booking_shared::{LessonCard, SignUpAction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LessonCardProps {
    pub card: LessonCard,
    /// A sign-up or cancel request for this card is in flight.
    pub pending: bool,
    pub on_sign_up: Callback<i64>,
    pub on_cancel: Callback<i64>,
}

#[function_component(LessonCardView)]
pub fn lesson_card(props: &LessonCardProps) -> Html {
    let card = &props.card;
    let id = card.id;

    let sign_up = {
        let on_sign_up = props.on_sign_up.clone();
        Callback::from(move |_: MouseEvent| on_sign_up.emit(id))
    };
    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(id))
    };

    let day_style = card
        .day_color
        .map(|color| format!("color: {}", color))
        .unwrap_or_default();

    let control = match card.action {
        SignUpAction::Hidden => html! {},
        action if action.can_sign_up() => html! {
            <button class="btn btn-primary signup-button" onclick={sign_up} disabled={props.pending}>
                { if props.pending { "処理中...".to_string() } else { action.label() } }
            </button>
        },
        action => html! {
            <div class="signup-status">
                <span class={classes!("badge", matches!(action, SignUpAction::Waitlisted { .. }).then_some("badge-waitlist"))}>
                    { action.label() }
                </span>
                if action.can_cancel() {
                    <button class="btn btn-secondary cancel-button" onclick={cancel} disabled={props.pending}>
                        { if props.pending { "処理中..." } else { "キャンセルする" } }
                    </button>
                }
            </div>
        },
    };

    html! {
        <div class="lesson-card">
            <div class="lesson-number" style={format!("background-color: {}", card.number_color)}>
                { card.number }
            </div>
            <img class="lesson-teacher" src={card.teacher_image.clone()} alt={card.teacher.clone()} />
            <div class="lesson-body">
                <h3 class="lesson-title">{ &card.title }</h3>
                <div class="lesson-teacher-name">{ &card.teacher }</div>
                <div class="lesson-schedule">
                    <span class="lesson-day" style={day_style}>{ &card.day }</span>
                    { " " }
                    <span class="lesson-time">{ &card.time }</span>
                    if let Some(place) = &card.place {
                        { " " }
                        <span class="lesson-place">{ place }</span>
                    }
                </div>
                <div class="lesson-fee">{ "受講料: " }{ &card.fee_label }</div>
                <div class="lesson-capacity">{ "定員: " }{ &card.capacity_label }</div>
                <p class="lesson-description">{ &card.description }</p>
                { control }
            </div>
        </div>
    }
}
