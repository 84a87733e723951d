//! Window-level values: clock and page origin.

/// Milliseconds since the Unix epoch.
#[cfg(feature = "csr")]
pub fn now_ms() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let now = js_sys::Date::now() as i64;
    now
}

/// `scheme://host[:port]` of the current page, or empty when unavailable.
#[cfg(feature = "csr")]
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(feature = "csr"))]
pub fn origin() -> String {
    String::new()
}

/// Move focus to `element`, ignoring elements that refuse it.
#[cfg(feature = "csr")]
pub fn focus(element: &web_sys::HtmlElement) {
    if let Err(err) = element.focus() {
        log::debug!("focus refused: {err:?}");
    }
}
