use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::domain::entities::record::collate;

/// Collation for text sort keys; orders exactly like the in-memory list engine.
pub const FOLD_COLLATION: &str = "FOLD";

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    conn.create_collation(FOLD_COLLATION, collate)
        .context("failed to register FOLD collation")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS caja (
            id          INTEGER PRIMARY KEY,
            nombre      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS movement (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            caja_id     INTEGER NOT NULL,
            fecha       TEXT NOT NULL,
            concepto    TEXT NOT NULL,
            categoria   TEXT,
            debe        REAL NOT NULL DEFAULT 0,
            haber       REAL NOT NULL DEFAULT 0,
            saldo       REAL NOT NULL DEFAULT 0,
            created_at  TEXT,
            concepto_key    TEXT NOT NULL,
            categoria_key   TEXT,
            FOREIGN KEY (caja_id) REFERENCES caja(id)
        );

        CREATE TABLE IF NOT EXISTS expense (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            caja_id     INTEGER NOT NULL,
            fecha       TEXT NOT NULL,
            descripcion TEXT NOT NULL,
            categoria   TEXT,
            monto       REAL NOT NULL DEFAULT 0,
            created_at  TEXT,
            descripcion_key TEXT NOT NULL,
            categoria_key   TEXT,
            FOREIGN KEY (caja_id) REFERENCES caja(id)
        );

        CREATE INDEX IF NOT EXISTS idx_movement_fecha
            ON movement(fecha, created_at);

        CREATE INDEX IF NOT EXISTS idx_movement_caja
            ON movement(caja_id, fecha);

        CREATE INDEX IF NOT EXISTS idx_expense_fecha
            ON expense(fecha, created_at);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
