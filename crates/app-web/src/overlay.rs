use web_sys as web;

// The easter-egg overlay element is part of the static page; the engine only
// toggles it. Visibility timing lives in app-core, not in DOM state.

#[inline]
pub fn show_egg(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("egg-overlay") {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_egg(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("egg-overlay") {
        let _ = el.set_attribute("style", "display:none");
    }
}
