use std::sync::Arc;

use dioxus::prelude::*;

use kirana_common::filter::{Listing, SortKey};
use kirana_common::product::Product;
use kirana_common::selection::PackSelection;
use kirana_common::session::SessionCommand;

use super::session_state::{run_command, use_session, use_view_state};

#[component]
pub fn CatalogView() -> Element {
    let session = use_session();
    let view = use_view_state();

    let listing = session.read().listing();
    let heading = {
        let session = session.read();
        session
            .filter()
            .category
            .and_then(|id| session.catalog().category(id))
            .map(|c| c.title_mr.clone())
            .unwrap_or_else(|| "सर्व उत्पादने".to_string())
    };
    let sort = session.read().filter().sort;

    let body = match listing {
        Listing::Prompt => rsx! {
            div { class: "explanation-bar",
                p { "उत्पादने पाहण्यासाठी श्रेणी निवडा किंवा शोधा." }
            }
        },
        Listing::Products(products) if products.is_empty() => rsx! {
            div { class: "no-products",
                p { "कोणतीही उत्पादने सापडली नाहीत." }
            }
        },
        Listing::Products(products) => rsx! {
            h2 { class: "products-title", "{heading}" }
            div { class: "products-grid",
                for (id, product) in products.into_iter().map(|p| (p.identity(), p)) {
                    ProductCard { key: "{id}", product }
                }
            }
        },
    };

    rsx! {
        div { class: "catalog-view",
            CategoryBar {}
            div { class: "catalog-tools",
                SearchBar {}
                select {
                    class: "sort-select",
                    value: sort_value(sort),
                    onchange: move |evt| {
                        run_command(session, view, SessionCommand::SetSort(parse_sort(&evt.value())));
                    },
                    option { value: "", "क्रम" }
                    option { value: "name", "नावानुसार" }
                    option { value: "category", "श्रेणीनुसार" }
                }
                button {
                    class: "clear-filters",
                    onclick: move |_| run_command(session, view, SessionCommand::ClearFilters),
                    "फिल्टर साफ करा"
                }
            }
            {body}
        }
    }
}

#[component]
fn CategoryBar() -> Element {
    let session = use_session();
    let view = use_view_state();

    let active = session.read().filter().category;
    let categories = session.read().catalog().categories().to_vec();

    rsx! {
        nav { class: "category-bar",
            for category in categories {
                button {
                    key: "{category.id}",
                    class: if active == Some(category.id) { "category-btn active" } else { "category-btn" },
                    onclick: move |_| run_command(session, view, SessionCommand::SelectCategory(category.id)),
                    span { class: "category-name", "{category.title_mr}" }
                    span { class: "category-count", "{category.product_count}" }
                }
            }
        }
    }
}

#[component]
fn SearchBar() -> Element {
    let session = use_session();
    let view = use_view_state();
    let mut text = use_signal(String::new);
    let mut show_suggestions = use_signal(|| false);

    let suggestions = if *show_suggestions.read() {
        session.read().suggestions(&text.read())
    } else {
        Vec::new()
    };

    rsx! {
        div { class: "search-bar",
            input {
                r#type: "search",
                placeholder: "उत्पादन शोधा...",
                value: "{text}",
                oninput: move |evt| {
                    text.set(evt.value());
                    show_suggestions.set(true);
                },
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        show_suggestions.set(false);
                        run_command(session, view, SessionCommand::Search(text.read().clone()));
                    }
                },
            }
            button {
                class: "search-btn",
                onclick: move |_| {
                    show_suggestions.set(false);
                    run_command(session, view, SessionCommand::Search(text.read().clone()));
                },
                "🔍"
            }
            if !suggestions.is_empty() {
                div { class: "search-suggestions",
                    for (id, product) in suggestions.into_iter().map(|p| (p.identity(), p)) {
                        div {
                            key: "{id}",
                            class: "search-suggestion",
                            onclick: {
                                let name = product.name_mr.clone();
                                move |_| {
                                    text.set(name.clone());
                                    show_suggestions.set(false);
                                    run_command(session, view, SessionCommand::Search(name.clone()));
                                }
                            },
                            strong { "{product.name_mr}" }
                            div { class: "suggestion-en", "{product.name_en}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: Arc<Product>) -> Element {
    let session = use_session();
    let view = use_view_state();
    let mut custom_text = use_signal(String::new);
    let identity = product.identity();

    let (card, selection, resolved, custom_label) = {
        let session = session.read();
        (
            session.card_state(&identity),
            session.packs().get(&identity).cloned(),
            session.selected_pack_size(&identity),
            session
                .packs()
                .confirmed_custom(&identity)
                .unwrap_or("Custom")
                .to_string(),
        )
    };
    let custom_open = matches!(selection, Some(PackSelection::CustomPending));
    let custom_chosen = matches!(
        selection,
        Some(PackSelection::Custom(_)) | Some(PackSelection::CustomPending)
    );

    let add_id = identity.clone();
    let inc_id = identity.clone();
    let dec_id = identity.clone();
    let begin_id = identity.clone();
    let confirm_id = identity.clone();
    let cancel_id = identity.clone();

    rsx! {
        div { class: "product-card",
            div { class: "product-header",
                div { class: "product-names",
                    div { class: "product-name", "{product.name_mr}" }
                    div { class: "product-name-en", "{product.name_en}" }
                }
                div { class: "product-category", "{product.category_name}" }
            }
            div { class: "product-info",
                if !product.variants.is_empty() {
                    div { class: "product-variants",
                        strong { "प्रकार:" }
                        for variant in product.variants.iter() {
                            span { class: "variant-tag", "{variant}" }
                        }
                    }
                }
                if !product.pack_sizes.is_empty() {
                    div { class: "product-pack-sizes",
                        strong { "पॅक साइझ:" }
                        div { class: "pack-size-selector",
                            for size in product.pack_sizes.iter().cloned() {
                                button {
                                    class: if !custom_chosen && resolved.as_deref() == Some(size.as_str()) { "size-tag selected" } else { "size-tag" },
                                    onclick: {
                                        let id = identity.clone();
                                        let size = size.clone();
                                        move |_| run_command(session, view, SessionCommand::SelectPackSize {
                                            product: id.clone(),
                                            size: size.clone(),
                                        })
                                    },
                                    "{size}"
                                }
                            }
                            button {
                                class: if custom_chosen { "size-tag custom-size-btn selected" } else { "size-tag custom-size-btn" },
                                onclick: move |_| run_command(session, view, SessionCommand::BeginCustomSize(begin_id.clone())),
                                "{custom_label}"
                            }
                        }
                        if custom_open {
                            div { class: "custom-pack-size",
                                input {
                                    r#type: "text",
                                    class: "custom-size-input",
                                    placeholder: "Enter amount (e.g., 2.5 kg)",
                                    value: "{custom_text}",
                                    oninput: move |evt| custom_text.set(evt.value()),
                                }
                                button {
                                    class: "confirm-custom-size",
                                    onclick: move |_| {
                                        let size = custom_text.read().clone();
                                        run_command(session, view, SessionCommand::ConfirmCustomSize {
                                            product: confirm_id.clone(),
                                            size,
                                        });
                                    },
                                    "✓"
                                }
                                button {
                                    class: "cancel-custom-size",
                                    onclick: move |_| {
                                        custom_text.set(String::new());
                                        run_command(session, view, SessionCommand::CancelCustomSize(cancel_id.clone()));
                                    },
                                    "✕"
                                }
                            }
                        }
                    }
                }
                if !product.brands.is_empty() {
                    div { class: "product-brands",
                        strong { "ब्रँड:" }
                        for brand in product.brands.iter() {
                            span { class: "brand-tag", "{brand}" }
                        }
                    }
                }
                if let Some(notes) = &product.notes {
                    div { class: "product-notes", "{notes}" }
                }
            }
            div { class: "product-actions",
                div { class: "quantity-controls",
                    button {
                        class: "quantity-btn",
                        disabled: !card.can_decrease,
                        onclick: move |_| run_command(session, view, SessionCommand::Decrease(dec_id.clone())),
                        "-"
                    }
                    span { class: "quantity-value", "{card.quantity}" }
                    button {
                        class: "quantity-btn",
                        onclick: move |_| run_command(session, view, SessionCommand::Increase(inc_id.clone())),
                        "+"
                    }
                }
                button {
                    class: "add-to-cart",
                    disabled: card.in_cart,
                    onclick: move |_| run_command(session, view, SessionCommand::AddToCart(add_id.clone())),
                    if card.in_cart { "कार्टमध्ये आहे" } else { "कार्टमध्ये टाका" }
                }
            }
        }
    }
}

fn sort_value(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Unsorted => "",
        SortKey::Name => "name",
        SortKey::Category => "category",
    }
}

fn parse_sort(value: &str) -> SortKey {
    match value {
        "name" => SortKey::Name,
        "category" => SortKey::Category,
        _ => SortKey::Unsorted,
    }
}
