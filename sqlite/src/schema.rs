//! SQL statement generation for the dump schema.
//!
//! Base tables are rendered from the catalog through replaceable
//! [`SqlTemplates`]; the search structure and the secondary indices are
//! fixed statements.
//!
//! The index statements deliberately carry no `IF NOT EXISTS`: a second
//! full run fails in the index phase, which is the documented signal that
//! the database was already built.

use sedump_core::TableDef;

/// Statement templates for table creation and row insertion.
///
/// Placeholders: `{table}` and `{fields}` in the create template,
/// `{table}`, `{columns}`, and `{values}` in the insert template. The
/// defaults produce portable `CREATE TABLE IF NOT EXISTS` and positional
/// parameterized `INSERT` statements; callers may substitute their own
/// shapes (e.g. `INSERT OR IGNORE`).
///
/// # Examples
///
/// ```
/// use sedump_core::catalog;
/// use sedump_sqlite::SqlTemplates;
///
/// let templates = SqlTemplates::default();
/// let sql = templates.create_table_sql(catalog::table("tags").unwrap());
/// assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS tags (Id INTEGER, "));
/// ```
#[derive(Debug, Clone)]
pub struct SqlTemplates {
    /// Template for the per-table DDL statement.
    pub create_table: String,
    /// Template for the per-record DML statement.
    pub insert: String,
}

impl Default for SqlTemplates {
    fn default() -> Self {
        Self {
            create_table: "CREATE TABLE IF NOT EXISTS {table} ({fields})".to_string(),
            insert: "INSERT INTO {table} ({columns}) VALUES ({values})".to_string(),
        }
    }
}

impl SqlTemplates {
    /// Renders the idempotent create statement for a catalog table, columns
    /// in declared order, each as `name TYPE`.
    pub fn create_table_sql(&self, table: &TableDef) -> String {
        let fields: Vec<String> = table
            .columns
            .iter()
            .map(|col| format!("{} {}", col.name, col.ty.as_sql()))
            .collect();
        self.create_table
            .replace("{table}", table.name)
            .replace("{fields}", &fields.join(", "))
    }

    /// Renders a parameterized insert naming exactly the given columns.
    pub fn insert_sql(&self, table: &str, columns: &[&str]) -> String {
        let values = vec!["?"; columns.len()].join(", ");
        self.insert
            .replace("{table}", table)
            .replace("{columns}", &columns.join(", "))
            .replace("{values}", &values)
    }
}

/// FTS5 virtual table over post bodies and titles plus the four triggers
/// that keep it synchronized with the base table. Only questions
/// (`PostTypeId = 1`) enter the index on insert; delete and the two column
/// updates are mirrored unconditionally.
pub(crate) const SEARCH_SETUP_SQL: [&str; 5] = [
    "CREATE VIRTUAL TABLE posts_search USING fts5(Body, Title, tokenize=porter)",
    "CREATE TRIGGER after_posts_insert AFTER INSERT ON posts WHEN NEW.PostTypeId = 1 \
     BEGIN INSERT INTO posts_search (rowid, Body, Title) VALUES (new.Id, new.Body, new.Title); END",
    "CREATE TRIGGER after_posts_delete AFTER DELETE ON posts \
     BEGIN DELETE FROM posts_search WHERE rowid = old.Id; END",
    "CREATE TRIGGER after_posts_update_body AFTER UPDATE OF Body ON posts \
     BEGIN UPDATE posts_search SET Body = new.Body WHERE rowid = old.Id; END",
    "CREATE TRIGGER after_posts_update_title AFTER UPDATE OF Title ON posts \
     BEGIN UPDATE posts_search SET Title = new.Title WHERE rowid = old.Id; END",
];

/// The three secondary indices built once after every table is loaded.
pub(crate) const INDEX_SQL: [&str; 3] = [
    "CREATE INDEX post_ids ON posts (Id)",
    "CREATE INDEX comments_postid ON comments (PostId)",
    "CREATE INDEX parent_ids ON posts (ParentId) WHERE ParentId IS NOT NULL",
];
