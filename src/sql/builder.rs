//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and DDL for a fixed table.

/// One column: name and PostgreSQL type.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub pg_type: &'static str,
}

impl ColumnDef {
    pub const fn new(name: &'static str, pg_type: &'static str) -> Self {
        ColumnDef { name, pg_type }
    }
}

/// Table with a single-column text primary key. `columns` order is the placeholder order.
#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    fn non_key_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(move |c| c.name != self.key)
    }
}

/// Quote identifier for PostgreSQL (safe: only from static table definitions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// CREATE TABLE IF NOT EXISTS with NOT NULL on every column.
pub fn create_table(table: &TableDef) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {} NOT NULL", quoted(c.name), c.pg_type))
        .collect();
    defs.push(format!("PRIMARY KEY ({})", quoted(table.key)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(table.name),
        defs.join(", ")
    )
}

/// SELECT all rows ORDER BY key.
pub fn select_all(table: &TableDef) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.key)
    )
}

/// SELECT by key. Key is $1.
pub fn select_by_key(table: &TableDef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(table),
        quoted(table.name),
        quoted(table.key)
    )
}

/// INSERT every column, $1..$n in column order, RETURNING the stored row.
pub fn insert(table: &TableDef) -> String {
    let placeholders: Vec<String> = (1..=table.columns.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        select_column_list(table),
        placeholders.join(", "),
        select_column_list(table)
    )
}

/// UPDATE by key: key is $1, non-key columns follow as $2.. in column order.
pub fn update(table: &TableDef) -> String {
    let sets: Vec<String> = table
        .non_key_columns()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quoted(c.name), i + 2))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = $1 RETURNING {}",
        quoted(table.name),
        sets.join(", "),
        quoted(table.key),
        select_column_list(table)
    )
}

/// DELETE by key, RETURNING the key so callers can tell whether a row matched.
pub fn delete(table: &TableDef) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        quoted(table.name),
        quoted(table.key),
        quoted(table.key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: TableDef = TableDef {
        name: "books",
        key: "isbn",
        columns: &[
            ColumnDef::new("isbn", "TEXT"),
            ColumnDef::new("title", "TEXT"),
            ColumnDef::new("pages", "INTEGER"),
        ],
    };

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quoted("books"), "\"books\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn builds_create_table() {
        assert_eq!(
            create_table(&TABLE),
            "CREATE TABLE IF NOT EXISTS \"books\" (\"isbn\" TEXT NOT NULL, \"title\" TEXT NOT NULL, \"pages\" INTEGER NOT NULL, PRIMARY KEY (\"isbn\"))"
        );
    }

    #[test]
    fn builds_selects() {
        assert_eq!(
            select_all(&TABLE),
            "SELECT \"isbn\", \"title\", \"pages\" FROM \"books\" ORDER BY \"isbn\""
        );
        assert_eq!(
            select_by_key(&TABLE),
            "SELECT \"isbn\", \"title\", \"pages\" FROM \"books\" WHERE \"isbn\" = $1"
        );
    }

    #[test]
    fn insert_numbers_placeholders_in_column_order() {
        assert_eq!(
            insert(&TABLE),
            "INSERT INTO \"books\" (\"isbn\", \"title\", \"pages\") VALUES ($1, $2, $3) RETURNING \"isbn\", \"title\", \"pages\""
        );
    }

    #[test]
    fn update_keeps_key_as_first_param() {
        assert_eq!(
            update(&TABLE),
            "UPDATE \"books\" SET \"title\" = $2, \"pages\" = $3 WHERE \"isbn\" = $1 RETURNING \"isbn\", \"title\", \"pages\""
        );
    }

    #[test]
    fn delete_returns_key() {
        assert_eq!(
            delete(&TABLE),
            "DELETE FROM \"books\" WHERE \"isbn\" = $1 RETURNING \"isbn\""
        );
    }
}
