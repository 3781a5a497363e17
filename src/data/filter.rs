use super::condition::parse_condition;
use super::error::QueryResult;
use super::model::{cell_at, column_index, CellValue, Condition, Operator, Row};

// ---------------------------------------------------------------------------
// Row filter: keep rows whose cell satisfies a single condition
// ---------------------------------------------------------------------------

/// Parse `condition` and return the rows that satisfy it, in input order.
pub fn filter_rows(rows: &[Row], headers: &[String], condition: &str) -> QueryResult<Vec<Row>> {
    let condition = parse_condition(condition)?;
    apply_condition(rows, headers, &condition)
}

/// Return the rows matching an already parsed condition, in input order.
pub fn apply_condition(rows: &[Row], headers: &[String], condition: &Condition) -> QueryResult<Vec<Row>> {
    let index = column_index(headers, &condition.column)?;

    let mut kept = Vec::new();
    for (row_no, row) in rows.iter().enumerate() {
        let cell = cell_at(row, row_no, index, &condition.column)?;
        if cell_matches(condition, cell) {
            kept.push(row.clone());
        }
    }

    log::debug!("filter {condition} kept {} of {} rows", kept.len(), rows.len());
    Ok(kept)
}

/// Evaluate one cell against a condition.
///
/// * Both cell and operand numeric → IEEE comparison.
/// * Otherwise `=` compares the raw cell with the operand text exactly.
/// * Otherwise (ordering operator on text) → no match.
pub fn cell_matches(condition: &Condition, cell: &str) -> bool {
    match (CellValue::parse(cell), CellValue::parse(&condition.operand)) {
        (CellValue::Number(lhs), CellValue::Number(rhs)) => condition.operator.compare(lhs, rhs),
        _ => condition.operator == Operator::Eq && cell == condition.operand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::QueryError;

    fn fixture() -> (Vec<String>, Vec<Row>) {
        let headers = ["id", "brand", "price"].iter().map(|s| s.to_string()).collect();
        let rows = [
            ["1", "apple", "1000"],
            ["2", "samsung", "800"],
            ["3", "apple", "600"],
            ["4", "xiaomi", "400"],
        ]
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect::<Row>())
        .collect();
        (headers, rows)
    }

    #[test]
    fn numeric_comparisons() {
        let (headers, rows) = fixture();
        assert_eq!(
            filter_rows(&rows, &headers, "price>700").unwrap(),
            vec![vec!["1", "apple", "1000"], vec!["2", "samsung", "800"]]
        );
        assert_eq!(
            filter_rows(&rows, &headers, "price<700").unwrap(),
            vec![vec!["3", "apple", "600"], vec!["4", "xiaomi", "400"]]
        );
        assert_eq!(
            filter_rows(&rows, &headers, "price=800").unwrap(),
            vec![vec!["2", "samsung", "800"]]
        );
        assert_eq!(filter_rows(&rows, &headers, "price>=800").unwrap().len(), 2);
        assert_eq!(filter_rows(&rows, &headers, "price<=400").unwrap().len(), 1);
    }

    #[test]
    fn numeric_equality_ignores_formatting() {
        let (headers, rows) = fixture();
        assert_eq!(
            filter_rows(&rows, &headers, "price=800.0").unwrap(),
            vec![vec!["2", "samsung", "800"]]
        );
    }

    #[test]
    fn text_equality() {
        let (headers, rows) = fixture();
        assert_eq!(
            filter_rows(&rows, &headers, "brand=apple").unwrap(),
            vec![vec!["1", "apple", "1000"], vec!["3", "apple", "600"]]
        );
        assert_eq!(
            filter_rows(&rows, &headers, "brand=samsung").unwrap(),
            vec![vec!["2", "samsung", "800"]]
        );
        assert!(filter_rows(&rows, &headers, "brand=sony").unwrap().is_empty());
        // no case folding
        assert!(filter_rows(&rows, &headers, "brand=Apple").unwrap().is_empty());
    }

    #[test]
    fn ordering_on_text_never_matches() {
        let (headers, rows) = fixture();
        assert!(filter_rows(&rows, &headers, "brand>a").unwrap().is_empty());
        assert!(filter_rows(&rows, &headers, "price>abc").unwrap().is_empty());
    }

    #[test]
    fn mixed_column_falls_back_per_cell() {
        let headers = vec!["size".to_string()];
        let rows: Vec<Row> = vec![vec!["10".into()], vec!["large".into()], vec!["5".into()]];
        assert_eq!(filter_rows(&rows, &headers, "size>7").unwrap(), vec![vec!["10"]]);
        assert_eq!(filter_rows(&rows, &headers, "size=large").unwrap(), vec![vec!["large"]]);
    }

    #[test]
    fn underscored_operand_is_text() {
        let (headers, rows) = fixture();
        assert!(filter_rows(&rows, &headers, "price=1_000").unwrap().is_empty());
        assert!(filter_rows(&rows, &headers, "price>1_000").unwrap().is_empty());
    }

    #[test]
    fn unknown_column() {
        let (headers, rows) = fixture();
        assert_eq!(
            filter_rows(&rows, &headers, "foo=bar"),
            Err(QueryError::ColumnNotFound("foo".into()))
        );
    }

    #[test]
    fn invalid_condition() {
        let (headers, rows) = fixture();
        assert!(matches!(
            filter_rows(&rows, &headers, "price"),
            Err(QueryError::InvalidConditionFormat(_))
        ));
    }

    #[test]
    fn short_row_is_reported() {
        let headers: Vec<String> = vec!["id".into(), "price".into()];
        let rows: Vec<Row> = vec![vec!["1".into(), "5".into()], vec!["2".into()]];
        assert_eq!(
            filter_rows(&rows, &headers, "price>1"),
            Err(QueryError::MissingCell { row: 2, column: "price".into() })
        );
    }

    #[test]
    fn idempotent_and_order_preserving() {
        let (headers, rows) = fixture();
        for condition in ["price>500", "brand=apple", "id<=3", "price=1"] {
            let once = filter_rows(&rows, &headers, condition).unwrap();
            let twice = filter_rows(&once, &headers, condition).unwrap();
            assert_eq!(once, twice, "{condition}");

            let positions: Vec<usize> = once
                .iter()
                .map(|r| rows.iter().position(|orig| orig == r).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{condition}");
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let (headers, rows) = fixture();
        let before = rows.clone();
        let _ = filter_rows(&rows, &headers, "price>700").unwrap();
        assert_eq!(rows, before);
    }
}
