use booking_shared::period::period_request;
use booking_shared::ClientError;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::services::forms::read_form;

const PERIOD_FIELDS: &[&str] = &["year", "season", "start_time", "end_time"];

#[function_component(AdminSettings)]
pub fn admin_settings() -> Html {
    let form_ref = use_node_ref();
    let busy = use_state(|| false);
    let message = use_state(|| None::<String>);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let busy = busy.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let period = match period_request(&read_form(&form, PERIOD_FIELDS)) {
                Ok(period) => period,
                Err(e) => {
                    message.set(Some(ClientError::from(e).user_message()));
                    return;
                }
            };

            busy.set(true);
            let busy = busy.clone();
            let message = message.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = match ApiService::client().update_period(&period).await {
                    Ok(_) => "期間情報が更新されました。".to_string(),
                    Err(e) => {
                        tracing::error!("Failed to update period: {}", e);
                        e.user_message()
                    }
                };
                message.set(Some(text));
                busy.set(false);
            });
        })
    };

    html! {
        <div class="container">
            <h2>{ "申し込み期間の設定" }</h2>
            <form class="period-form" ref={form_ref} {onsubmit}>
                <div class="form-text">{ "年度" }</div>
                <input type="number" name="year" required=true />
                <div class="form-text">{ "期" }</div>
                <input type="number" name="season" required=true />
                <div class="form-text">{ "開始日時" }</div>
                <input type="datetime-local" name="start_time" required=true />
                <div class="form-text">{ "終了日時" }</div>
                <input type="datetime-local" name="end_time" required=true />
                <button type="submit" class="btn btn-primary" disabled={*busy}>{ "更新する" }</button>
            </form>
            if let Some(text) = &*message {
                <p id="response-message">{ text }</p>
            }
        </div>
    }
}
