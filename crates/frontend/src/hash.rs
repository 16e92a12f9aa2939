use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

/// Current address-bar fragment, including the leading '#'. Empty when
/// the URL has no fragment.
pub fn read_fragment() -> String {
    let window = web_sys::window().unwrap();
    window.location().hash().unwrap_or_default()
}

/// Replace the address-bar fragment. Fires a hashchange event, which the
/// view sync state recognizes as our own write.
pub fn write_fragment(fragment: &str) {
    let window = web_sys::window().unwrap();
    window.location().set_hash(fragment).unwrap();
}

/// Install a hashchange handler that reports the fresh fragment value.
pub fn on_fragment_change(mut callback: impl FnMut(String) + 'static) {
    let window = web_sys::window().unwrap();
    let cb = Closure::wrap(Box::new(move || {
        callback(read_fragment());
    }) as Box<dyn FnMut()>);
    window.set_onhashchange(Some(cb.as_ref().unchecked_ref()));
    // Handler stays installed for the page lifetime.
    cb.forget();
}
