use booking_shared::forms::{self, SIGNUP_FIELDS};
use booking_shared::models::UserDetails;
use booking_shared::ClientError;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::components::account_fields::AccountFields;
use crate::services::api::ApiService;
use crate::services::forms::read_form;

fn details_list(details: &UserDetails) -> Html {
    let rows = [
        ("お名前", details.full_name()),
        ("ふりがな", details.full_furigana()),
        ("電話番号", details.tel.clone()),
        ("〒郵便番号", details.postal_code.clone()),
        ("住所", details.address.clone()),
        ("メールアドレス", details.email.clone().unwrap_or_default()),
        ("ユーザー名", details.username.clone()),
    ];

    html! {
        <ul id="user-details">
            { for rows.into_iter().map(|(label, value)| html! {
                <>
                    <li class="user-details-label">{ label }</li>
                    <li>{ value }</li>
                </>
            })}
        </ul>
    }
}

#[function_component(UserDetailsPage)]
pub fn user_details_page() -> Html {
    let details = use_state(|| None::<UserDetails>);
    let failed = use_state(|| false);
    let editing = use_state(|| false);
    let message = use_state(|| None::<String>);
    let form_ref = use_node_ref();

    {
        let details = details.clone();
        let failed = failed.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().my_user_details().await {
                    Ok(loaded) => details.set(Some(loaded)),
                    Err(e) => {
                        tracing::error!("Failed to fetch user details: {}", e);
                        failed.set(true);
                    }
                }
            });
            || ()
        });
    }

    let open_edit = {
        let editing = editing.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| {
            message.set(None);
            editing.set(true);
        })
    };
    let close_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    // There is no endpoint for changing details yet, so only the input is checked.
    let check_edit = {
        let form_ref = form_ref.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let text = match forms::signup(&read_form(&form, SIGNUP_FIELDS)) {
                Ok(_) => "入力内容を確認しました。変更は窓口にお申し付けください。".to_string(),
                Err(e) => ClientError::from(e).user_message(),
            };
            message.set(Some(text));
        })
    };

    let content = match &*details {
        _ if *failed => html! { <p>{ "情報を取得できませんでした" }</p> },
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(loaded) if *editing => html! {
            <section id="user-detail-edit-section">
                <form id="user-details-edit-form" ref={form_ref}>
                    <AccountFields initial={Some(loaded.clone())} />
                    <button type="button" class="btn btn-primary" onclick={check_edit}>{ "変更する" }</button>
                    <button type="button" class="btn btn-secondary" onclick={close_edit}>{ "変更しない" }</button>
                </form>
            </section>
        },
        Some(loaded) => html! {
            <section id="user-detail-section">
                { details_list(loaded) }
                <button class="btn btn-primary" onclick={open_edit}>{ "変更する" }</button>
            </section>
        },
    };

    html! {
        <div class="container">
            <h2>{ "登録情報" }</h2>
            { content }
            if let Some(text) = &*message {
                <p class="notice">{ text }</p>
            }
        </div>
    }
}
