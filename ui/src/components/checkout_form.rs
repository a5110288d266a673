use chrono::Utc;
use dioxus::prelude::*;

use kirana_common::delivery::{deliver_receipt, NoDelivery, TelegramDelivery};
use kirana_common::notice::Notice;
use kirana_common::order::CheckoutForm;
use kirana_common::receipt::Receipt;

use super::session_state::{show_notice, use_session, use_view_state};

#[component]
pub fn CheckoutPanel() -> Element {
    let mut session = use_session();
    let mut view = use_view_state();
    let mut name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let today = use_hook(today_iso);
    let mut pickup_date = use_signal(today_iso);
    let mut pickup_time = use_signal(String::new);

    let submit = move |_: MouseEvent| {
        let form = CheckoutForm {
            name: name.read().clone(),
            phone: phone.read().clone(),
            pickup_date: pickup_date.read().clone(),
            pickup_time: pickup_time.read().clone(),
        };

        let result = session.write().place_order_now(&form);
        let order = match result {
            Ok(order) => order,
            Err(err) => {
                tracing::info!("Checkout rejected: {err}");
                if let Some(notice) = Notice::for_error(&err) {
                    show_notice(view, notice);
                }
                return;
            }
        };

        let config = view.read().config.clone();
        let receipt = Receipt::new(&config, &order);
        let document = receipt.document();
        if let Err(err) = &document {
            tracing::error!("Receipt for order {} not rendered: {err}", order.id);
        }
        {
            let mut state = view.write();
            state.last_receipt = Some(receipt);
            state.checkout_open = false;
            state.cart_open = false;
        }
        name.set(String::new());
        phone.set(String::new());
        pickup_date.set(today_iso());
        pickup_time.set(String::new());

        // The order stands whatever happens to the receipt.
        spawn(async move {
            let notice = match (document, config.telegram()) {
                (Ok(document), Some(telegram)) => {
                    deliver_receipt(&TelegramDelivery::new(telegram.clone()), &document).await
                }
                (Ok(document), None) => deliver_receipt(&NoDelivery, &document).await,
                (Err(_), _) => Notice::OrderConfirmed { delivered: false },
            };
            show_notice(view, notice);
        });
    };

    rsx! {
        div { class: "checkout-modal",
            div { class: "checkout-content",
                div { class: "checkout-header",
                    h3 { "ऑर्डर तपशील" }
                    button {
                        class: "close-checkout",
                        onclick: move |_| view.write().checkout_open = false,
                        "✕"
                    }
                }
                div { class: "form-group",
                    label { "नाव:" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "फोन नंबर:" }
                    input {
                        r#type: "tel",
                        maxlength: "10",
                        value: "{phone}",
                        oninput: move |evt| phone.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "पिकअप दिनांक:" }
                    input {
                        r#type: "date",
                        min: "{today}",
                        value: "{pickup_date}",
                        oninput: move |evt| pickup_date.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "पिकअप वेळ:" }
                    input {
                        r#type: "time",
                        value: "{pickup_time}",
                        oninput: move |evt| pickup_time.set(evt.value()),
                    }
                }
                button { class: "confirm-order", onclick: submit, "ऑर्डर कन्फर्म करा" }
            }
        }
    }
}

/// Today's date as the `YYYY-MM-DD` value of a date input. UTC, the same day
/// checkout validation compares against.
fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pickup_date_passes_validation() {
        let form = CheckoutForm {
            name: "Sunita".into(),
            phone: "9876543210".into(),
            pickup_date: today_iso(),
            pickup_time: "10:00".into(),
        };
        assert!(form.validate(Utc::now().date_naive()).is_ok());
    }
}
