use dioxus::prelude::*;

use kirana_common::config::StoreConfig;
use kirana_common::notice::{Locale, Notice};
use kirana_common::receipt::Receipt;
use kirana_common::session::{SessionCommand, StoreSession};
use kirana_common::theme::Theme;

#[cfg(target_family = "wasm")]
const NOTICE_MILLIS: u32 = 3_000;

/// View-only state shared across components. Everything about the cart and
/// filters lives in [`StoreSession`].
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub config: StoreConfig,
    pub locale: Locale,
    pub theme: Theme,
    pub loading: bool,
    pub cart_open: bool,
    pub checkout_open: bool,
    pub notice: Option<Notice>,
    /// Receipt of the most recent order, shown until dismissed.
    pub last_receipt: Option<Receipt>,
}

impl ViewState {
    pub fn loading(theme: Theme) -> Self {
        Self {
            theme,
            loading: true,
            ..Self::default()
        }
    }
}

pub fn use_session() -> Signal<StoreSession> {
    use_context::<Signal<StoreSession>>()
}

pub fn use_view_state() -> Signal<ViewState> {
    use_context::<Signal<ViewState>>()
}

/// Apply `command` to the session and show whatever notice comes of it.
pub fn run_command(
    mut session: Signal<StoreSession>,
    view: Signal<ViewState>,
    command: SessionCommand,
) {
    let result = session.write().dispatch(command);
    match result {
        Ok(Some(notice)) => show_notice(view, notice),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!("Command rejected: {err}");
            if let Some(notice) = Notice::for_error(&err) {
                show_notice(view, notice);
            }
        }
    }
}

/// Show `notice` as a toast, then clear it unless a newer one replaced it.
pub fn show_notice(mut view: Signal<ViewState>, notice: Notice) {
    view.write().notice = Some(notice.clone());
    spawn(async move {
        #[cfg(target_family = "wasm")]
        gloo_timers::future::TimeoutFuture::new(NOTICE_MILLIS).await;
        let mut state = view.write();
        if state.notice.as_ref() == Some(&notice) {
            state.notice = None;
        }
    });
}
