use std::path::Path;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::domain::entities::ledger::Movement;
use crate::domain::entities::listing::{DateRange, ListSpec, PageWindowEntry, SortDirection};
use crate::domain::list::presets::{Clock, DatePreset, SystemClock};
use crate::infra::authz::PermissionTable;
use crate::infra::export::csv::CsvExporter;
use crate::infra::import::csv::import_movements_csv;
use crate::infra::import::xlsx::import_movements_xlsx;
use crate::infra::sqlite::queries::list_categories;
use crate::infra::sqlite::source::SqliteLedger;
use crate::ui::overlay::OverlayId;
use crate::ui::state::app_state::AppState;
use crate::ui::status::{import_status, reload_status};
use crate::usecase::ports::authz::Authorizer;
use crate::usecase::services::list_service::ListService;
use crate::usecase::services::list_view::{LoadState, RefreshOutcome};
use crate::usecase::services::render::render_rows;

const NONE_OPTION_VALUE: &str = "__none__";

const MOVEMENT_HEADERS: [(&str, &str); 6] = [
    ("fecha", "Fecha"),
    ("concepto", "Concepto"),
    ("categoria", "Categoría"),
    ("debe", "Debe"),
    ("haber", "Haber"),
    ("saldo", "Saldo"),
];

const MOVEMENT_COLUMNS: [&str; 6] = ["fecha", "concepto", "categoria", "debe", "haber", "saldo"];

/// Refetches when the controller asks for it and reports load failures.
fn sync_list(mut movements: Signal<ListService<Movement>>, mut status: Signal<String>) {
    let Some(outcome) = movements.write().refresh_if_needed() else {
        return;
    };
    if let Some(message) = reload_status(outcome, movements.peek().controller().load_state()) {
        status.set(message);
    }
}

fn import_file(db_path: &Path, file_path: &Path) -> anyhow::Result<usize> {
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    let result = if ext == "xlsx" {
        import_movements_xlsx(db_path, file_path, None)?
    } else {
        import_movements_csv(db_path, file_path)?
    };
    Ok(result.row_count)
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let db_path = match config.db_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "No se pudo resolver la base de datos: {err}" }
                }
            };
        }
    };
    let opened = use_hook(|| {
        SqliteLedger::open(db_path.clone())
            .map(Arc::new)
            .map_err(|err| format!("{err:#}"))
    });
    let ledger = match opened {
        Ok(ledger) => ledger,
        Err(err) => {
            return rsx! {
                div {
                    p { "No se pudo abrir la base de datos: {err}" }
                }
            };
        }
    };

    let permissions = PermissionTable::new(
        config.permissions.role.clone(),
        config.permissions.roles.clone(),
    );
    let can_edit = permissions.can_edit(ListSpec::movements().section);
    let page_size_options = config.list.page_size_options.clone();

    let AppState {
        mut movements,
        mut categories,
        mut search_input,
        mut selected_category,
        mut overlay,
        mut busy,
        mut status,
    } = AppState::new(
        ledger.clone(),
        config.list.paging_mode,
        config.list.default_page_size,
    );

    let db_path = Arc::new(db_path);
    let db_path_for_init = db_path.clone();
    let db_path_for_import = db_path.clone();
    use_effect(move || {
        *busy.write() = true;
        let outcome = movements.write().refresh();
        if outcome == RefreshOutcome::Applied {
            let total = movements.peek().controller().total_items();
            status.set(format!("{total} movimientos"));
        } else if let Some(message) =
            reload_status(outcome, movements.peek().controller().load_state())
        {
            status.set(message);
        }
        match list_categories::<Movement>(&db_path_for_init) {
            Ok(loaded) => categories.set(loaded),
            Err(err) => status.set(format!("Error al cargar categorías: {err:#}")),
        }
        *busy.write() = false;
    });

    let service = movements.read();
    let controller = service.controller();
    let view = controller.view();
    let rows = render_rows(view.rows.iter().copied(), &MOVEMENT_COLUMNS);
    let no_rows = rows.is_empty();
    let window = view.window.clone();
    let current_page = view.current_page;
    let total_pages = view.total_pages;
    let total_items = view.total_items;
    let has_previous = view.has_previous;
    let has_next = view.has_next;
    let page_size = controller.pagination().page_size();
    let sort = controller.sort().cloned();
    let load_error = match controller.load_state() {
        LoadState::Failed(message) => message.clone(),
        _ => String::new(),
    };
    drop(service);

    let date_open = overlay().is_open(OverlayId::DateRange);
    let page_size_open = overlay().is_open(OverlayId::PageSize);
    let dismiss_layer = overlay().any_open();
    let dismiss_on_escape = move |event: KeyboardEvent| {
        if event.key() == Key::Escape {
            overlay.write().dismiss();
        }
    };

    rsx! {
        div {
            style: "padding: 12px; font-family: sans-serif;",

            // Mounted only while an overlay is open; unmounting drops its handlers.
            if dismiss_layer {
                div {
                    style: "position: fixed; inset: 0; z-index: 1100;",
                    tabindex: "-1",
                    onmounted: move |event: MountedEvent| async move {
                        let _ = event.set_focus(true).await;
                    },
                    onclick: move |_| {
                        overlay.write().dismiss();
                    },
                    onkeydown: dismiss_on_escape,
                }
            }

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                input {
                    r#type: "search",
                    placeholder: "Buscar concepto o categoría",
                    value: "{search_input}",
                    oninput: move |event| {
                        let value = event.value();
                        search_input.set(value.clone());
                        movements.write().controller_mut().set_search(value);
                        sync_list(movements, status);
                    },
                }

                select {
                    value: selected_category()
                        .unwrap_or_else(|| NONE_OPTION_VALUE.to_string()),
                    onchange: move |event| {
                        let value = event.value();
                        if value == NONE_OPTION_VALUE {
                            selected_category.set(None);
                            movements.write().controller_mut().clear_equality("categoria");
                        } else {
                            selected_category.set(Some(value.clone()));
                            movements
                                .write()
                                .controller_mut()
                                .set_equality("categoria", value.as_str());
                        }
                        sync_list(movements, status);
                    },
                    option { value: "{NONE_OPTION_VALUE}", "Todas las categorías" }
                    for category in categories() {
                        option { value: "{category}", "{category}" }
                    }
                }

                div {
                    style: "position: relative;",
                    button {
                        onclick: move |_| overlay.write().toggle(OverlayId::DateRange),
                        "Rango de fechas"
                    }
                    if date_open {
                        div {
                            style: "position: absolute; top: 28px; left: 0; background: #fff; border: 1px solid #bbb; border-radius: 8px; padding: 6px; z-index: 1200; display: flex; flex-direction: column; gap: 4px;",
                            onkeydown: dismiss_on_escape,
                            {DatePreset::ALL.iter().map(|preset| {
                                let preset = *preset;
                                let label = preset.label();
                                rsx!(
                                    button {
                                        onclick: move |_| {
                                            let range = preset.range(SystemClock.today());
                                            movements.write().controller_mut().set_date_range(range);
                                            overlay.write().dismiss();
                                            sync_list(movements, status);
                                        },
                                        "{label}"
                                    }
                                )
                            })}
                            button {
                                onclick: move |_| {
                                    movements
                                        .write()
                                        .controller_mut()
                                        .set_date_range(DateRange::default());
                                    overlay.write().dismiss();
                                    sync_list(movements, status);
                                },
                                "Todas las fechas"
                            }
                        }
                    }
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("movimientos.csv")
                            .save_file() else {
                            status.set("Exportación cancelada".to_string());
                            return;
                        };
                        let exporter = CsvExporter::new(path);
                        let result = movements.read().export_with(&exporter, &MOVEMENT_COLUMNS);
                        match result {
                            Ok(summary) => status.set(format!(
                                "Exportadas {} filas a {}",
                                summary.row_count,
                                summary.path.display()
                            )),
                            Err(err) => status.set(format!("Error al exportar: {err}")),
                        }
                    },
                    "Exportar"
                }

                if can_edit {
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            let Some(file_path) = FileDialog::new()
                                .add_filter("Planilla", &["csv", "xlsx"])
                                .pick_file() else {
                                status.set("Importación cancelada".to_string());
                                return;
                            };
                            *busy.write() = true;
                            match import_file(&db_path_for_import, &file_path) {
                                Ok(count) => {
                                    if let Ok(loaded) = list_categories::<Movement>(&db_path_for_import) {
                                        categories.set(loaded);
                                    }
                                    let outcome = movements.write().refresh();
                                    let message = import_status(
                                        count,
                                        outcome,
                                        movements.peek().controller().load_state(),
                                    );
                                    status.set(message);
                                }
                                Err(err) => status.set(format!("Error al importar: {err:#}")),
                            }
                            *busy.write() = false;
                        },
                        "Importar movimientos"
                    }
                }

                span { " {status}" }
            }

            if !load_error.is_empty() {
                p { style: "color: #b00020;", "No se pudieron cargar los movimientos: {load_error}" }
            }

            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        {MOVEMENT_HEADERS.iter().map(|(key, label)| {
                            let key = *key;
                            let marker = match &sort {
                                Some(state) if state.key == key => match state.direction {
                                    SortDirection::Asc => " ▲",
                                    SortDirection::Desc => " ▼",
                                },
                                _ => "",
                            };
                            rsx!(
                                th {
                                    style: "text-align: left; border-bottom: 1px solid #ccc; padding: 6px; cursor: pointer;",
                                    onclick: move |_| {
                                        movements.write().controller_mut().toggle_sort(key);
                                        sync_list(movements, status);
                                    },
                                    "{label}{marker}"
                                }
                            )
                        })}
                    }
                }
                tbody {
                    if no_rows {
                        tr {
                            td { colspan: "6", style: "padding: 12px; color: #666;", "Sin movimientos" }
                        }
                    }
                    for row in rows {
                        tr {
                            for cell in row {
                                td { style: "padding: 6px; border-bottom: 1px solid #eee;", "{cell}" }
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; gap: 4px; align-items: center; margin-top: 12px;",
                button {
                    disabled: !has_previous,
                    onclick: move |_| {
                        movements.write().controller_mut().first_page();
                        sync_list(movements, status);
                    },
                    "«"
                }
                button {
                    disabled: !has_previous,
                    onclick: move |_| {
                        movements.write().controller_mut().previous_page();
                        sync_list(movements, status);
                    },
                    "‹"
                }
                {window.iter().map(|entry| match *entry {
                    PageWindowEntry::Page(page) => {
                        let active = page == current_page;
                        let weight = if active { "bold" } else { "normal" };
                        rsx!(
                            button {
                                style: "font-weight: {weight};",
                                disabled: active,
                                onclick: move |_| {
                                    movements.write().controller_mut().go_to_page(page as i64);
                                    sync_list(movements, status);
                                },
                                "{page}"
                            }
                        )
                    }
                    PageWindowEntry::Ellipsis => rsx!(span { "…" }),
                })}
                button {
                    disabled: !has_next,
                    onclick: move |_| {
                        movements.write().controller_mut().next_page();
                        sync_list(movements, status);
                    },
                    "›"
                }
                button {
                    disabled: !has_next,
                    onclick: move |_| {
                        movements.write().controller_mut().last_page();
                        sync_list(movements, status);
                    },
                    "»"
                }

                span { " Página {current_page} de {total_pages} ({total_items} registros) " }

                div {
                    style: "position: relative;",
                    button {
                        onclick: move |_| overlay.write().toggle(OverlayId::PageSize),
                        "{page_size} por página"
                    }
                    if page_size_open {
                        div {
                            style: "position: absolute; bottom: 28px; left: 0; background: #fff; border: 1px solid #bbb; border-radius: 8px; padding: 6px; z-index: 1200;",
                            onkeydown: dismiss_on_escape,
                            {page_size_options.iter().map(|size| {
                                let size = *size;
                                rsx!(
                                    div {
                                        style: "padding: 4px 8px; cursor: pointer;",
                                        onclick: move |_| {
                                            movements.write().controller_mut().set_page_size(size);
                                            overlay.write().dismiss();
                                            sync_list(movements, status);
                                        },
                                        "{size}"
                                    }
                                )
                            })}
                        }
                    }
                }
            }
        }
    }
}
