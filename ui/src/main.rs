mod components;

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting kirana storefront");
    dioxus::launch(components::app::App);
}
