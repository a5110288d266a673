use dioxus::prelude::*;

use kirana_common::receipt::{FOOTER_NOTES, ITEMS_HEADING, TOTAL_AT_STORE};

use super::session_state::use_view_state;

/// The last receipt, in Marathi, with a print action.
#[component]
pub fn ReceiptView() -> Element {
    let mut view = use_view_state();
    let Some(receipt) = view.read().last_receipt.clone() else {
        return rsx! {};
    };
    let mut header = receipt.header_lines().into_iter();
    let store_name = header.next().unwrap_or_default();
    let header: Vec<String> = header.collect();
    let items: Vec<(String, String, String)> = receipt
        .items
        .iter()
        .map(|item| (item.label_mr(), item.name_en.clone(), item.quantity_note()))
        .collect();

    rsx! {
        div { class: "receipt-modal",
            div { class: "receipt-content",
                div { class: "receipt",
                    div { class: "receipt-header",
                        h2 { "{store_name}" }
                        for line in header {
                            p { "{line}" }
                        }
                    }
                    div { class: "receipt-info",
                        for field in receipt.info_fields() {
                            div {
                                strong { "{field.label}: " }
                                "{field.value}"
                            }
                        }
                    }
                    div { class: "receipt-items",
                        div { class: "receipt-items-heading", strong { "{ITEMS_HEADING}" } }
                        for (name_mr, name_en, quantity) in items {
                            div { class: "receipt-item",
                                div {
                                    "{name_mr}"
                                    br {}
                                    small { "{name_en}" }
                                }
                                div { "{quantity}" }
                            }
                        }
                    }
                    div { class: "receipt-total", "{TOTAL_AT_STORE}" }
                    div { class: "receipt-footer",
                        for note in FOOTER_NOTES {
                            p { "{note}" }
                        }
                    }
                }
                div { class: "receipt-actions",
                    button { class: "print-receipt", onclick: move |_| print_page(), "प्रिंट करा" }
                    button {
                        class: "close-receipt",
                        onclick: move |_| view.write().last_receipt = None,
                        "बंद करा"
                    }
                }
            }
        }
    }
}

#[cfg(target_family = "wasm")]
fn print_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.print() {
        tracing::warn!("Print failed: {:?}", e);
    }
}

#[cfg(not(target_family = "wasm"))]
fn print_page() {
    tracing::debug!("Printing is only available in the browser");
}
