use dioxus::prelude::*;

#[component]
pub fn StylePicker(
    style_ids: Vec<String>,
    default_style_id: String,
    style_id: Signal<Option<String>>,
) -> Element {
    // Until the user picks one, the server's default style is shown.
    let selected_id = style_id
        .read()
        .clone()
        .unwrap_or_else(|| default_style_id.clone());

    rsx! {
        div { class: "panel",
            h3 { "Style" }
            select {
                "aria-label": "Select tile style",
                value: "{selected_id}",
                onchange: move |evt: Event<FormData>| {
                    style_id.set(Some(evt.value().to_string()));
                },
                for id in style_ids {
                    option {
                        value: "{id}",
                        selected: id == selected_id,
                        "{id}"
                    }
                }
            }
        }
    }
}
