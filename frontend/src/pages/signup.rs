use booking_shared::api::SignupRequest;
use booking_shared::forms::{self, CHILD_FIELDS, SIGNUP_FIELDS};
use booking_shared::ClientError;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::components::account_fields::{AccountFields, ChildFields};
use crate::services::api::ApiService;
use crate::services::forms::read_form;
use crate::services::page;

fn confirm_list(request: &SignupRequest) -> Html {
    let mut rows = vec![
        ("お名前", format!("{}\u{3000}{}", request.last_name, request.first_name)),
        (
            "ふりがな",
            format!("{}\u{3000}{}", request.last_name_furigana, request.first_name_furigana),
        ),
        ("電話番号", request.tel.clone()),
        ("〒郵便番号", request.postal_code.clone()),
        ("住所", request.address.clone()),
        ("メールアドレス", request.email.clone().unwrap_or_default()),
        ("ユーザー名", request.username.clone()),
    ];
    for child in &request.children {
        rows.push(("お子さんのお名前", child.full_name()));
        rows.push(("お子さんのふりがな", child.full_furigana()));
    }

    html! {
        <ul class="signup-confirm">
            { for rows.into_iter().map(|(label, value)| html! {
                <>
                    <li class="user-details-label">{ label }</li>
                    <li>{ value }</li>
                </>
            })}
        </ul>
    }
}

#[function_component(Signup)]
pub fn signup() -> Html {
    let form_ref = use_node_ref();
    let confirming = use_state(|| None::<SignupRequest>);
    let busy = use_state(|| false);
    let with_child = use_state(|| false);

    let check = {
        let form_ref = form_ref.clone();
        let confirming = confirming.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let names: Vec<&str> = SIGNUP_FIELDS.iter().chain(CHILD_FIELDS).copied().collect();
            match forms::signup(&read_form(&form, &names)) {
                Ok(request) => confirming.set(Some(request)),
                Err(e) => page::alert(&ClientError::from(e).user_message()),
            }
        })
    };

    let back = {
        let confirming = confirming.clone();
        Callback::from(move |_: MouseEvent| confirming.set(None))
    };

    let toggle_child = {
        let with_child = with_child.clone();
        Callback::from(move |_: MouseEvent| with_child.set(!*with_child))
    };

    let submit = {
        let confirming = confirming.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            if *busy {
                return;
            }
            let Some(request) = (*confirming).clone() else {
                return;
            };
            busy.set(true);
            let busy = busy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::client().signup_and_login(&request).await {
                    Ok(()) => page::redirect("/lessons"),
                    Err(e) => {
                        tracing::error!("Sign-up failed: {}", e);
                        page::alert(&e.user_message());
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="container">
            <h2>{ "新規登録" }</h2>
            if let Some(request) = &*confirming {
                <section class="signup-confirm-section">
                    <p>{ "以下の内容で登録します。" }</p>
                    { confirm_list(request) }
                    <button class="btn btn-primary" onclick={submit} disabled={*busy}>
                        { if *busy { "処理中..." } else { "登録する" } }
                    </button>
                    <button class="btn btn-secondary" onclick={back} disabled={*busy}>{ "戻る" }</button>
                </section>
            }
            <form class="signup-form" ref={form_ref} onsubmit={check} hidden={confirming.is_some()}>
                <AccountFields />
                if *with_child {
                    <ChildFields />
                }
                <button type="button" id="show-children-form" class="btn btn-secondary" onclick={toggle_child}>
                    { if *with_child { "お子さんの情報を削除する" } else { "お子さんの情報を追加する" } }
                </button>
                <button type="submit" class="btn btn-primary">{ "確認する" }</button>
            </form>
        </div>
    }
}
