//! Whole-pipeline tests.
//!
//! Every test here feeds a real query string through parse + execute against
//! an in-memory table source, the same path the prompt takes minus the CSV
//! file on disk.

use crate::engine::source::{Row, Table, TableNotFoundError, TableSource};
use crate::engine::{run_query, Aggregate, QueryResult};
use crate::error::ErrorKind;
use std::collections::HashMap;

struct StaticSource {
    tables: HashMap<String, Table>,
}

impl StaticSource {
    fn single(name: &str, table: Table) -> StaticSource {
        let mut tables = HashMap::new();
        tables.insert(name.to_string(), table);

        StaticSource { tables }
    }
}

impl TableSource for StaticSource {
    fn resolve(&self, name: &str) -> Result<Table, crate::Error> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| TableNotFoundError(name.to_string()).into())
    }
}

fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}

fn people() -> StaticSource {
    StaticSource::single(
        "people",
        Table {
            columns: ["id", "name", "age", "city"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: vec![
                row(&[("id", "1"), ("name", "Bob"), ("age", "34"), ("city", "berlin")]),
                row(&[("id", "2"), ("name", "Amy"), ("age", "29"), ("city", "Paris")]),
                row(&[("id", "3"), ("name", "alice"), ("age", "41"), ("city", "")]),
                row(&[("id", "4"), ("name", "Dan"), ("age", "10"), ("city", "New York")]),
            ],
        },
    )
}

fn rows_of(result: QueryResult) -> Vec<Row> {
    match result {
        QueryResult::Rows { rows, .. } => rows,
        other => panic!("expected rows, got {other:?}"),
    }
}

fn aggregates_of(result: QueryResult) -> Vec<Aggregate> {
    match result {
        QueryResult::Aggregates(aggregates) => aggregates,
        other => panic!("expected aggregates, got {other:?}"),
    }
}

#[test]
fn select_star_returns_every_row_in_source_order() {
    let rows = rows_of(run_query("SELECT * FROM people", &people()).unwrap());

    assert_eq!(
        vec!["Bob", "Amy", "alice", "Dan"],
        rows.iter().map(|row| row["name"].as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn keywords_are_recognized_in_any_case() {
    let rows = rows_of(run_query("select name from people;", &people()).unwrap());

    assert_eq!(4, rows.len());
}

#[test]
fn equality_filter_keeps_matching_rows_only() {
    let rows = rows_of(run_query("SELECT * FROM people WHERE city = 'berlin'", &people()).unwrap());

    assert_eq!(1, rows.len());
    assert_eq!("Bob", rows[0]["name"]);
}

#[test]
fn filtering_is_idempotent() {
    let query = "SELECT * FROM people WHERE age > 20";
    let once = rows_of(run_query(query, &people()).unwrap());

    let refiltered = StaticSource::single(
        "people",
        Table {
            columns: ["id", "name", "age", "city"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: once.clone(),
        },
    );
    let twice = rows_of(run_query(query, &refiltered).unwrap());

    assert_eq!(once, twice);
}

#[test]
fn numbers_compare_numerically_not_lexicographically() {
    // "10" > "9" holds numerically; as strings it would fail.
    let rows = rows_of(run_query("SELECT name FROM people WHERE age > 9", &people()).unwrap());

    assert_eq!(4, rows.len());
}

#[test]
fn a_non_numeric_literal_falls_back_to_string_comparison() {
    // Every age sorts lexicographically before "9a".
    let below = rows_of(run_query("SELECT name FROM people WHERE age < '9a'", &people()).unwrap());
    let above = rows_of(run_query("SELECT name FROM people WHERE age > '9a'", &people()).unwrap());

    assert_eq!(4, below.len());
    assert!(above.is_empty());
}

#[test]
fn string_comparison_ignores_case() {
    let rows = rows_of(run_query("SELECT id FROM people WHERE name = 'ALICE'", &people()).unwrap());

    assert_eq!(1, rows.len());
    assert_eq!("3", rows[0]["id"]);
}

#[test]
fn combinators_apply_left_to_right_without_precedence() {
    // Under SQL precedence `id = 2 OR id = 1 AND age = 34` would keep row 2
    // as well; the left fold turns it into (id=2 OR id=1) AND age=34.
    let rows = rows_of(
        run_query(
            "SELECT id FROM people WHERE id = 2 OR id = 1 AND age = 34",
            &people(),
        )
        .unwrap(),
    );

    assert_eq!(1, rows.len());
    assert_eq!("1", rows[0]["id"]);
}

#[test]
fn quoted_literals_keep_their_spaces() {
    let rows = rows_of(
        run_query("SELECT id FROM people WHERE city = 'New York'", &people()).unwrap(),
    );

    assert_eq!(1, rows.len());
    assert_eq!("4", rows[0]["id"]);
}

#[test]
fn count_star_counts_the_filtered_rows() {
    let aggregates = aggregates_of(
        run_query("SELECT COUNT(*) FROM people WHERE city = 'paris'", &people()).unwrap(),
    );

    assert_eq!(
        vec![Aggregate {
            expression: "COUNT(*)".to_string(),
            count: 1,
        }],
        aggregates
    );
}

#[test]
fn count_star_over_an_empty_filter_is_zero() {
    let aggregates = aggregates_of(
        run_query("SELECT COUNT(*) FROM people WHERE age > 100", &people()).unwrap(),
    );

    assert_eq!(0, aggregates[0].count);
}

#[test]
fn count_of_a_column_skips_empty_values() {
    let aggregates =
        aggregates_of(run_query("SELECT COUNT(city) FROM people", &people()).unwrap());

    assert_eq!(
        vec![Aggregate {
            expression: "COUNT(city)".to_string(),
            count: 3,
        }],
        aggregates
    );
}

#[test]
fn count_of_an_unknown_column_counts_nothing() {
    let aggregates =
        aggregates_of(run_query("SELECT COUNT(nothing) FROM people", &people()).unwrap());

    assert_eq!(0, aggregates[0].count);
}

#[test]
fn plain_columns_mixed_with_count_are_dropped() {
    let aggregates =
        aggregates_of(run_query("SELECT name, COUNT(*) FROM people", &people()).unwrap());

    assert_eq!(1, aggregates.len());
    assert_eq!("COUNT(*)", aggregates[0].expression);
    assert_eq!(4, aggregates[0].count);
}

#[test]
fn projection_keeps_the_requested_spelling() {
    let result = run_query("SELECT Name, AGE FROM people", &people()).unwrap();

    let QueryResult::Rows { columns, rows } = result else {
        panic!("expected rows");
    };
    assert_eq!(vec!["Name", "AGE"], columns);
    assert_eq!("Bob", rows[0]["Name"]);
    assert_eq!("34", rows[0]["AGE"]);
}

#[test]
fn selecting_an_unknown_column_fails() {
    let error = run_query("SELECT nothing FROM people", &people()).unwrap_err();

    assert!(matches!(
        error.into_inner(),
        ErrorKind::ColumnNotFoundError(_)
    ));
}

#[test]
fn querying_an_unknown_table_fails() {
    let error = run_query("SELECT * FROM missing", &people()).unwrap_err();

    assert!(matches!(
        error.into_inner(),
        ErrorKind::TableNotFoundError(_)
    ));
}

#[test]
fn a_two_token_where_clause_fails() {
    let error = run_query("SELECT * FROM people WHERE id =", &people()).unwrap_err();

    assert!(matches!(error.into_inner(), ErrorKind::SyntaxError(_)));
}

#[test]
fn projection_with_a_numeric_filter() {
    let source = StaticSource::single(
        "t",
        Table {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                row(&[("id", "1"), ("name", "Bob")]),
                row(&[("id", "2"), ("name", "Amy")]),
            ],
        },
    );

    let rows = rows_of(run_query("SELECT name FROM t WHERE id > 1", &source).unwrap());
    assert_eq!(vec![row(&[("name", "Amy")])], rows);

    let aggregates = aggregates_of(run_query("SELECT COUNT(*) FROM t", &source).unwrap());
    assert_eq!(
        vec![Aggregate {
            expression: "COUNT(*)".to_string(),
            count: 2,
        }],
        aggregates
    );
}
