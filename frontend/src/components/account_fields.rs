use booking_shared::models::UserDetails;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AccountFieldsProps {
    /// Values to prefill; a blank form when `None`.
    #[prop_or_default]
    pub initial: Option<UserDetails>,
}

/// Inputs named after `booking_shared::forms::SIGNUP_FIELDS`.
#[function_component(AccountFields)]
pub fn account_fields(props: &AccountFieldsProps) -> Html {
    let details = props.initial.clone().unwrap_or_default();

    html! {
        <>
            <div class="form-text">{ "お名前" }<span class="form-annotation">{ "必須" }</span></div>
            <div class="flex-row-between">
                <input type="text" name="last_name" placeholder="姓" required=true class="half-input" value={details.last_name} />
                <input type="text" name="first_name" placeholder="名" required=true class="half-input" value={details.first_name} />
            </div>
            <div class="form-text">{ "ふりがな" }<span class="form-annotation">{ "必須" }</span></div>
            <div class="flex-row-between">
                <input type="text" inputmode="kana-name" name="last_name_furigana" placeholder="ふりがな (姓)" required=true class="half-input" value={details.last_name_furigana} />
                <input type="text" inputmode="kana-name" name="first_name_furigana" placeholder="ふりがな (名)" required=true class="half-input" value={details.first_name_furigana} />
            </div>
            <div class="form-text">{ "電話番号" }<span class="form-annotation">{ "必須" }</span></div>
            <input type="tel" name="tel" placeholder="電話番号 (できれば携帯電話)" required=true value={details.tel} />
            <div class="form-text">{ "郵便番号" }<span class="form-annotation">{ "必須" }</span></div>
            <input type="tel" name="postal_code" placeholder="郵便番号" required=true value={details.postal_code} />
            <div class="form-text">{ "住所" }<span class="form-annotation">{ "必須" }</span></div>
            <input type="text" name="address" placeholder="住所" required=true value={details.address} />
            <div class="form-text">{ "メールアドレス" }<span class="form-annotation-1">{ "任意" }</span></div>
            <input type="email" name="email" placeholder="メールアドレス" value={details.email.unwrap_or_default()} />
            <div class="form-hint">{ "-> 申し込みの確認メールを受け取れます" }</div>
            <div class="form-text">{ "ユーザー名" }<span class="form-annotation">{ "必須" }</span></div>
            <input type="text" inputmode="latin" name="username" placeholder="ユーザー名" pattern=".{4,}" required=true value={details.username} />
            <div class="form-hint">{ "-> 本人確認に使用します　半角英数字4文字以上" }</div>
            <div class="form-text">{ "パスワード" }<span class="form-annotation">{ "必須" }</span></div>
            <input type="password" inputmode="latin" name="password" placeholder="パスワード" pattern="^([a-zA-Z0-9]{4,})$" required=true />
            <div class="form-hint">{ "-> 本人確認に使用します　半角英数字4文字以上" }</div>
        </>
    }
}

/// Inputs named after `booking_shared::forms::CHILD_FIELDS`.
#[function_component(ChildFields)]
pub fn child_fields() -> Html {
    html! {
        <div id="children-form">
            <div class="form-text">{ "お子さんのお名前" }<span class="form-annotation">{ "必須" }</span></div>
            <div class="flex-row-between">
                <input type="text" name="child_last_name" placeholder="姓" required=true class="half-input" />
                <input type="text" name="child_first_name" placeholder="名" required=true class="half-input" />
            </div>
            <div class="form-text">{ "お子さんのふりがな" }<span class="form-annotation">{ "必須" }</span></div>
            <div class="flex-row-between">
                <input type="text" inputmode="kana-name" name="child_last_name_furigana" placeholder="ふりがな (姓)" required=true class="half-input" />
                <input type="text" inputmode="kana-name" name="child_first_name_furigana" placeholder="ふりがな (名)" required=true class="half-input" />
            </div>
        </div>
    }
}
