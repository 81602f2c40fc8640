use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::ledger::Movement;
use crate::domain::entities::listing::ListSpec;
use crate::ui::overlay::OverlayState;
use crate::usecase::ports::source::RecordSource;
use crate::usecase::services::list_service::ListService;
use crate::usecase::services::list_view::{ListViewController, PagingMode};

pub struct AppState {
    pub movements: Signal<ListService<Movement>>,
    pub categories: Signal<Vec<String>>,
    pub search_input: Signal<String>,
    pub selected_category: Signal<Option<String>>,
    pub overlay: Signal<OverlayState>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn RecordSource<Movement>>,
        mode: PagingMode,
        page_size: usize,
    ) -> Self {
        Self {
            movements: use_signal(move || {
                ListService::new(
                    source,
                    ListViewController::new(ListSpec::movements(), mode, page_size),
                )
            }),
            categories: use_signal(Vec::<String>::new),
            search_input: use_signal(String::new),
            selected_category: use_signal(|| None::<String>),
            overlay: use_signal(OverlayState::default),
            busy: use_signal(|| false),
            status: use_signal(|| "Listo".to_string()),
        }
    }
}
