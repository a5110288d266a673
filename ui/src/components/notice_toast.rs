use dioxus::prelude::*;

use super::session_state::use_view_state;

#[component]
pub fn NoticeToast() -> Element {
    let view = use_view_state();
    let state = view.read();
    let Some(notice) = state.notice.as_ref() else {
        return rsx! {};
    };
    let text = notice.text(state.locale);
    let class = if notice.is_error() {
        "notification error show"
    } else {
        "notification success show"
    };

    rsx! {
        div { class: "{class}", "{text}" }
    }
}
