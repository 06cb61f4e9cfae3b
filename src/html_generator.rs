//! Option markup generation with consistent escaping and zero panics
use crate::dom::OptionElement;

/// Consistent HTML attribute escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn option_html(option: &OptionElement) -> String {
    let selected = if option.selected { " selected" } else { "" };
    format!(
        r#"<option value="{value}"{selected}>{label}</option>"#,
        value = html_escape(&option.value),
        selected = selected,
        label = html_escape(&option.label)
    )
}

/// Markup of every option in DOM order, equivalent to `select.innerHTML`.
pub fn options_html(options: &[OptionElement]) -> String {
    options.iter().map(option_html).collect()
}
