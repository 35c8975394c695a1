// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::fs;

const MIGRATIONS_DIR: &str = "migrations";

fn collapse_ws(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Body of `CREATE TABLE [IF NOT EXISTS] <table> ( ... );` across all migrations.
fn table_definition(table: &str) -> Option<String> {
    let mut files: Vec<_> = fs::read_dir(MIGRATIONS_DIR)
        .expect("read migrations dir")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();
    files.sort();

    for path in files {
        let sql = collapse_ws(&fs::read_to_string(&path).expect("read migration"));
        for head in [
            format!("create table if not exists {table} ("),
            format!("create table {table} ("),
        ] {
            if let Some(start) = sql.find(&head) {
                let body = &sql[start + head.len()..];
                let end = body.find(");").unwrap_or(body.len());
                return Some(body[..end].to_string());
            }
        }
    }
    None
}

fn column<'a>(definition: &'a str, name: &str) -> Option<&'a str> {
    definition
        .split(',')
        .map(str::trim)
        .find(|c| c.split(' ').next() == Some(name))
}

#[test]
fn verified_sources_keyed_by_address() {
    let definition = table_definition("verified_sources").expect("verified_sources table");
    let address = column(&definition, "address").expect("address column");
    assert!(address.contains("text"), "address must be TEXT: {address}");
    assert!(address.contains("primary key"), "address must be the key: {address}");
}

#[test]
fn verified_sources_document_is_required() {
    let definition = table_definition("verified_sources").expect("verified_sources table");
    let source = column(&definition, "source").expect("source column");
    assert!(source.contains("text"), "source must be TEXT: {source}");
    assert!(source.contains("not null"), "source must be NOT NULL: {source}");
}
