use crate::usecase::services::list_view::{LoadState, RefreshOutcome};

/// Status line after a reload. `None` leaves the current status alone.
pub fn reload_status(outcome: RefreshOutcome, load_state: &LoadState) -> Option<String> {
    match (outcome, load_state) {
        (RefreshOutcome::Failed, LoadState::Failed(message)) => {
            Some(format!("Error al cargar movimientos: {message}"))
        }
        _ => None,
    }
}

/// An import only counts as done once the list shows it.
pub fn import_status(count: usize, outcome: RefreshOutcome, load_state: &LoadState) -> String {
    match reload_status(outcome, load_state) {
        Some(error) => format!("Importados {count} movimientos, pero la lista no se recargó. {error}"),
        None => format!("Importados {count} movimientos"),
    }
}
