//! SQLite schema creation for the project store.

use rusqlite::Connection;

/// Version written to `schema_version` by [`create_schema`].
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the project store.
///
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `project` - Hierarchy roots
/// - `category` - Self-referential category tree (`parent_id`)
/// - `table_template` - Templates attached to a category
/// - `table_column` - Column headers per template, keyed by `column_order`
/// - `table_row` - Rows per template, keyed by `row_order`
/// - `table_cell` - Cell contents keyed by `(row_order, column_order)`
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Projects
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS project (
            project_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Categories
    // ===========================================
    // parent_id has no ON DELETE action: removing a category that still has
    // children fails unless the children go in the same statement.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            category_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            parent_id INTEGER REFERENCES category(category_id),
            position INTEGER NOT NULL DEFAULT 1,
            depth INTEGER NOT NULL DEFAULT 0,
            project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE
        );",
    )?;

    // ===========================================
    // Templates
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS table_template (
            template_id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL REFERENCES category(category_id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 1,
            notes TEXT NOT NULL DEFAULT '',
            programming_notes TEXT NOT NULL DEFAULT ''
        );",
    )?;

    // ===========================================
    // Table grid
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS table_column (
            template_id INTEGER NOT NULL REFERENCES table_template(template_id) ON DELETE CASCADE,
            column_order INTEGER NOT NULL,
            header TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (template_id, column_order)
        );

        CREATE TABLE IF NOT EXISTS table_row (
            template_id INTEGER NOT NULL REFERENCES table_template(template_id) ON DELETE CASCADE,
            row_order INTEGER NOT NULL,
            PRIMARY KEY (template_id, row_order)
        );

        CREATE TABLE IF NOT EXISTS table_cell (
            template_id INTEGER NOT NULL,
            row_order INTEGER NOT NULL,
            column_order INTEGER NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (template_id, row_order, column_order),
            FOREIGN KEY (template_id, row_order)
                REFERENCES table_row(template_id, row_order)
                ON DELETE CASCADE ON UPDATE CASCADE,
            FOREIGN KEY (template_id, column_order)
                REFERENCES table_column(template_id, column_order)
                ON DELETE CASCADE ON UPDATE CASCADE
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_category_project ON category(project_id);
         CREATE INDEX IF NOT EXISTS idx_category_parent ON category(parent_id);
         CREATE INDEX IF NOT EXISTS idx_template_category ON table_template(category_id);",
    )?;

    // ===========================================
    // Schema Version Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
