//! Page conventions shared by the browser shell.

/// Whether a `document.readyState` value means the DOM is not parsed yet.
pub fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Quote a value for use inside a CSS attribute selector.
fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Selector for the thumbnail inside the label bound to control `id`.
pub fn label_thumbnail_selector(id: &str, thumbnail_class: &str) -> String {
    format!("label[for={}] > .{}", css_string(id), thumbnail_class)
}

/// Selector for a thumbnail directly inside a label, relative to that label.
pub fn scoped_thumbnail_selector(thumbnail_class: &str) -> String {
    format!(":scope > .{}", thumbnail_class)
}
