use dioxus::prelude::*;

use kirana_common::catalog::Catalog;
use kirana_common::config::StoreConfig;
use kirana_common::error::CatalogError;
use kirana_common::notice::{Locale, Notice};
use kirana_common::session::StoreSession;
use kirana_common::theme::{Theme, ThemeStore};

use super::cart_view::CartPanel;
use super::catalog_view::CatalogView;
use super::checkout_form::CheckoutPanel;
use super::fetch::fetch_text;
use super::notice_toast::NoticeToast;
use super::receipt_view::ReceiptView;
use super::session_state::{show_notice, use_session, use_view_state, ViewState};
use super::theme::LocalStorageThemeStore;

const CATALOG_URL: &str = "./data.json";
const CONFIG_URL: &str = "./store.json";

#[component]
pub fn App() -> Element {
    let theme_store = use_context_provider(|| Signal::new(LocalStorageThemeStore::default()));
    let initial_theme = use_hook(|| theme_store.read().load_theme());
    let mut session = use_context_provider(|| Signal::new(StoreSession::default()));
    let mut view = use_context_provider(|| Signal::new(ViewState::loading(initial_theme)));

    // Catalog and store config load once; a failed catalog load is final.
    use_effect(move || {
        spawn(async move {
            let config = load_config().await;
            let result = match fetch_text(CATALOG_URL).await {
                Ok(text) => Catalog::from_json(&text),
                Err(e) => Err(CatalogError::Fetch(e)),
            };
            let (catalog, error) = Catalog::load_or_empty(result);
            let locale = Locale::from_tag(catalog.locale());
            session.set(StoreSession::new(catalog));
            {
                let mut state = view.write();
                state.config = config;
                state.locale = locale;
                state.loading = false;
            }
            if error.is_some() {
                show_notice(view, Notice::CatalogLoadFailed);
            }
        });
    });

    let state = view.read();
    let theme = state.theme;
    let loading = state.loading;
    let cart_open = state.cart_open;
    let checkout_open = state.checkout_open;
    let has_receipt = state.last_receipt.is_some();
    let tagline = state.config.tagline.clone();
    drop(state);

    rsx! {
        div { class: "kirana-app", "data-theme": "{theme}",
            AppHeader { tagline }
            main {
                if loading {
                    div { class: "loading", "लोड होत आहे..." }
                } else {
                    CatalogView {}
                }
            }
            if cart_open {
                CartPanel {}
            }
            if checkout_open {
                CheckoutPanel {}
            }
            if has_receipt {
                ReceiptView {}
            }
            NoticeToast {}
        }
    }
}

#[component]
fn AppHeader(tagline: String) -> Element {
    let session = use_session();
    let mut view = use_view_state();
    let mut theme_store = use_context::<Signal<LocalStorageThemeStore>>();

    let store_name = session.read().catalog().store().to_string();
    let badge = session.read().cart_badge();
    let theme = view.read().theme;
    let theme_icon = match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    };

    rsx! {
        header { class: "app-header",
            div { class: "header-top",
                div { class: "store-title",
                    h1 { "{store_name}" }
                    if !tagline.is_empty() {
                        p { class: "tagline", "{tagline}" }
                    }
                }
                div { class: "header-actions",
                    button {
                        class: "theme-toggle",
                        title: "Theme",
                        onclick: move |_| {
                            let next = theme_store.write().toggle_theme();
                            view.write().theme = next;
                        },
                        "{theme_icon}"
                    }
                    button {
                        class: "cart-toggle",
                        onclick: move |_| {
                            let mut state = view.write();
                            state.cart_open = !state.cart_open;
                        },
                        "🛒"
                        if badge > 0 {
                            span { class: "cart-badge", "{badge}" }
                        }
                    }
                }
            }
        }
    }
}

/// Store config is optional; without it the built-in defaults apply.
async fn load_config() -> StoreConfig {
    match fetch_text(CONFIG_URL).await {
        Ok(text) => StoreConfig::from_json(&text).unwrap_or_else(|err| {
            tracing::warn!("Ignoring {CONFIG_URL}: {err}");
            StoreConfig::default()
        }),
        Err(e) => {
            tracing::debug!("No store config ({e}), using defaults");
            StoreConfig::default()
        }
    }
}
