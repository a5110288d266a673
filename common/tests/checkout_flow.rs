//! Browse → cart → checkout through the public session API, the way the
//! storefront UI drives it.

use chrono::{TimeZone, Utc};

use kirana_common::cart::CartKey;
use kirana_common::catalog::Catalog;
use kirana_common::config::StoreConfig;
use kirana_common::delivery::{deliver_receipt, NoDelivery};
use kirana_common::filter::{Listing, SortKey};
use kirana_common::notice::{Locale, Notice};
use kirana_common::order::CheckoutForm;
use kirana_common::product::{CategoryId, ProductIdentity};
use kirana_common::receipt::Receipt;
use kirana_common::session::{SessionCommand, StoreSession};

const CATALOG: &str = r#"{
    "store": "Maharashtra Kirana",
    "locale": "mr-IN",
    "sections": [
        { "id": 1, "title_mr": "पेये", "title_en": "Beverages", "subsections": [
            { "title_mr": "चहा", "title_en": "Tea", "items": [
                { "name_mr": "चहा पत्ती", "name_en": "Tea Leaves", "pack_sizes": ["250g", "500g"], "brands": ["Wagh Bakri"] },
                { "name_mr": "कॉफी", "name_en": "Coffee Powder", "pack_sizes": ["100g"] }
            ] }
        ] },
        { "id": 2, "title_mr": "धान्य", "title_en": "Grains", "subsections": [
            { "title_mr": "तांदूळ", "title_en": "Rice", "items": [
                { "name_mr": "बासमती तांदूळ", "name_en": "Basmati Rice", "variants": ["Dubar", "Tukda"] }
            ] }
        ] }
    ]
}"#;

fn tea() -> ProductIdentity {
    ProductIdentity::resolve(CategoryId(1), "Tea Leaves")
}

#[test]
fn shopper_builds_cart_and_confirms_order() {
    let mut session = StoreSession::new(Catalog::from_json(CATALOG).unwrap());
    assert_eq!(session.listing(), Listing::Prompt);

    // Browse a category, sorted by name.
    session.dispatch(SessionCommand::SelectCategory(CategoryId(1))).unwrap();
    session.dispatch(SessionCommand::SetSort(SortKey::Name)).unwrap();
    let names: Vec<_> = session
        .listing()
        .products()
        .iter()
        .map(|p| p.name_mr.clone())
        .collect();
    assert_eq!(names, vec!["कॉफी", "चहा पत्ती"]);

    // Two packs of 250g, one of 500g.
    session.dispatch(SessionCommand::AddToCart(tea())).unwrap();
    session.dispatch(SessionCommand::Increase(tea())).unwrap();
    session
        .dispatch(SessionCommand::SelectPackSize {
            product: tea(),
            size: "500g".into(),
        })
        .unwrap();
    session.dispatch(SessionCommand::AddToCart(tea())).unwrap();
    assert_eq!(session.cart_badge(), 3);
    assert_eq!(session.card_state(&tea()).quantity, 3);

    // Search by variant, add rice without a pack size.
    session.dispatch(SessionCommand::Search("dubar".into())).unwrap();
    let rice = session.listing().products()[0].identity();
    session.dispatch(SessionCommand::AddToCart(rice.clone())).unwrap();
    assert_eq!(session.cart().quantity(&CartKey::new(rice, None)), 1);

    let now = Utc.with_ymd_and_hms(2025, 3, 14, 4, 30, 0).unwrap();
    let form = CheckoutForm {
        name: "Sunita Patil".into(),
        phone: "9876543210".into(),
        pickup_date: "2025-03-15".into(),
        pickup_time: "10:00".into(),
    };
    let order = session.place_order(&form, now).unwrap();
    assert_eq!(order.total_items(), 4);
    assert!(session.cart().is_empty());
    assert_eq!(session.cart_badge(), 0);

    let receipt = Receipt::new(&StoreConfig::default(), &order);
    let text = receipt.to_text();
    assert!(text.contains("Tea Leaves (250g)"));
    assert!(text.contains("Tea Leaves (500g)"));
    assert!(text.contains("Basmati Rice"));
    assert!(text.contains("Total Items: 4"));
    assert!(text.contains("Date: 14/03/2025, 10:00:00"));
}

#[test]
fn validation_errors_become_inline_notices() {
    let mut session = StoreSession::new(Catalog::from_json(CATALOG).unwrap());
    session.dispatch(SessionCommand::AddToCart(tea())).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 14, 4, 30, 0).unwrap();

    let missing = CheckoutForm {
        name: "Sunita".into(),
        ..CheckoutForm::default()
    };
    let err = session.place_order(&missing, now).unwrap_err();
    assert_eq!(Notice::for_error(&err), Some(Notice::FillAllFields));

    let bad_phone = CheckoutForm {
        name: "Sunita".into(),
        phone: "98765".into(),
        pickup_date: "2025-03-15".into(),
        pickup_time: "10:00".into(),
    };
    let err = session.place_order(&bad_phone, now).unwrap_err();
    let notice = Notice::for_error(&err).unwrap();
    assert_eq!(notice, Notice::InvalidPhone);
    assert!(notice.text(Locale::Marathi).contains("10 अंक"));

    // Nothing was lost.
    assert_eq!(session.cart_badge(), 1);
}

#[tokio::test]
async fn failed_delivery_does_not_restore_cart() {
    let mut session = StoreSession::new(Catalog::from_json(CATALOG).unwrap());
    session.dispatch(SessionCommand::AddToCart(tea())).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 14, 4, 30, 0).unwrap();
    let form = CheckoutForm {
        name: "Sunita".into(),
        phone: "9876543210".into(),
        pickup_date: "2025-03-14".into(),
        pickup_time: "18:00".into(),
    };
    let order = session.place_order(&form, now).unwrap();
    let document = Receipt::new(&StoreConfig::default(), &order)
        .document()
        .unwrap();
    assert!(document.file_name.ends_with(".pdf"));

    let notice = deliver_receipt(&NoDelivery, &document).await;
    assert_eq!(notice, Notice::OrderConfirmed { delivered: false });
    assert!(session.cart().is_empty());
}

#[test]
fn broken_catalog_gives_empty_session() {
    let (catalog, err) = Catalog::load_or_empty(Catalog::from_json("<html>404</html>"));
    assert!(err.is_some());
    let mut session = StoreSession::new(catalog);
    assert_eq!(session.catalog().store(), "Maharashtra Kirana");
    session.dispatch(SessionCommand::Search("tea".into())).unwrap();
    assert_eq!(session.listing(), Listing::Products(Vec::new()));
}
