use dioxus::prelude::*;

use kirana_common::session::SessionCommand;

use super::session_state::{run_command, use_session, use_view_state};

/// Sidebar listing every cart line. Line controls act on the line's own
/// pack size, whatever is selected on the product card.
#[component]
pub fn CartPanel() -> Element {
    let session = use_session();
    let mut view = use_view_state();

    let lines = session.read().cart().lines().to_vec();
    let total = session.read().cart_badge();

    rsx! {
        aside { class: "cart-sidebar",
            div { class: "cart-header",
                h3 { "तुमची कार्ट" }
                button {
                    class: "close-cart",
                    onclick: move |_| view.write().cart_open = false,
                    "✕"
                }
            }
            if lines.is_empty() {
                p { class: "empty-cart", "तुमची कार्ट रिकामी आहे" }
            } else {
                div { class: "cart-items",
                    for line in lines {
                        div { key: "{line.key}", class: "cart-item",
                            div { class: "cart-item-info",
                                div { class: "cart-item-name", "{line.product.name_mr}" }
                                div { class: "cart-item-name-en", "{line.product.name_en}" }
                                if let Some(size) = line.pack_size() {
                                    div { class: "cart-item-size", "पॅक साइझ: {size}" }
                                }
                            }
                            div { class: "cart-item-controls",
                                button {
                                    class: "quantity-btn",
                                    onclick: {
                                        let key = line.key.clone();
                                        move |_| run_command(session, view, SessionCommand::DecreaseLine(key.clone()))
                                    },
                                    "-"
                                }
                                input {
                                    r#type: "number",
                                    class: "quantity-input",
                                    min: "0",
                                    value: "{line.quantity}",
                                    onchange: {
                                        let key = line.key.clone();
                                        move |evt: FormEvent| {
                                            if let Ok(quantity) = evt.value().trim().parse::<i64>() {
                                                run_command(session, view, SessionCommand::SetQuantity {
                                                    key: key.clone(),
                                                    quantity,
                                                });
                                            }
                                        }
                                    },
                                }
                                button {
                                    class: "quantity-btn",
                                    onclick: {
                                        let key = line.key.clone();
                                        move |_| run_command(session, view, SessionCommand::IncreaseLine(key.clone()))
                                    },
                                    "+"
                                }
                                button {
                                    class: "remove-item",
                                    onclick: {
                                        let key = line.key.clone();
                                        move |_| run_command(session, view, SessionCommand::Remove(key.clone()))
                                    },
                                    "🗑"
                                }
                            }
                        }
                    }
                }
            }
            div { class: "cart-footer",
                div { class: "cart-count", "एकूण वस्तू: {total}" }
                div { class: "cart-total", "किंमत: दुकानात ठरेल" }
                button {
                    class: "checkout-btn",
                    disabled: total == 0,
                    onclick: move |_| view.write().checkout_open = true,
                    "ऑर्डर करा"
                }
            }
        }
    }
}
