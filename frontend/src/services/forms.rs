use booking_shared::forms::FormFields;
use web_sys::{FormData, HtmlFormElement, HtmlTextAreaElement};

/// Reads the named fields of a form; absent fields read as empty.
pub fn read_form(form: &HtmlFormElement, names: &[&str]) -> FormFields {
    let data = match FormData::new_with_form(form) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Failed to read form: {:?}", e);
            return FormFields::new();
        }
    };

    names
        .iter()
        .map(|name| {
            let value = data.get(name).as_string().unwrap_or_default();
            (name.to_string(), value)
        })
        .collect()
}

/// Grows a textarea to fit its content.
pub fn auto_resize(textarea: &HtmlTextAreaElement) {
    let style = textarea.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &format!("{}px", textarea.scroll_height()));
}
