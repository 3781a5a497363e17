use super::error::{QueryError, QueryResult};
use super::model::{AggregationSpec, Condition, Operator};

/// Parse `column OP operand` into a [`Condition`].
///
/// Operators are looked up in [`Operator::SCAN_ORDER`]; the first symbol that
/// occurs anywhere in the text wins and the text is split at its first
/// occurrence. So `note=5>3` splits on `>` (giving `note=5` / `3`) even though
/// `=` appears earlier. Both sides are trimmed; empty sides are accepted.
pub fn parse_condition(text: &str) -> QueryResult<Condition> {
    for operator in Operator::SCAN_ORDER {
        if let Some((column, operand)) = text.split_once(operator.symbol()) {
            let condition = Condition {
                column: column.trim().to_string(),
                operator,
                operand: operand.trim().to_string(),
            };
            if condition.column.is_empty() || condition.operand.is_empty() {
                log::warn!("condition '{text}' has an empty side around '{operator}'");
            }
            log::debug!("parsed condition {condition:?}");
            return Ok(condition);
        }
    }

    Err(QueryError::InvalidConditionFormat(text.to_string()))
}

/// Parse `column=function` by splitting on the first `=` only.
pub fn parse_aggregation(text: &str) -> QueryResult<AggregationSpec> {
    let (column, function) = text
        .split_once('=')
        .ok_or_else(|| QueryError::InvalidAggregationFormat(text.to_string()))?;

    let spec = AggregationSpec {
        column: column.trim().to_string(),
        function: function.trim().to_string(),
    };
    log::debug!("parsed aggregation {spec:?}");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, column: &str, symbol: &str, operand: &str) {
        let c = parse_condition(text).unwrap();
        assert_eq!(c.column, column, "column of {text}");
        assert_eq!(c.operator.symbol(), symbol, "operator of {text}");
        assert_eq!(c.operand, operand, "operand of {text}");
    }

    #[test]
    fn parses_each_operator() {
        check("price>=500", "price", ">=", "500");
        check("price<=1000", "price", "<=", "1000");
        check("price>500", "price", ">", "500");
        check("price<500", "price", "<", "500");
        check("brand=apple", "brand", "=", "apple");
    }

    #[test]
    fn trims_both_sides() {
        check("  price >= 500 ", "price", ">=", "500");
        check("brand = big apple", "brand", "=", "big apple");
    }

    #[test]
    fn rejects_text_without_operator() {
        assert_eq!(
            parse_condition("invalid"),
            Err(QueryError::InvalidConditionFormat("invalid".into()))
        );
        assert!(parse_condition("").is_err());
    }

    #[test]
    fn empty_sides_still_parse() {
        check("=apple", "", "=", "apple");
        check("price>", "price", ">", "");
    }

    #[test]
    fn scan_order_beats_text_position() {
        // `>` is scanned before `=`, so the split happens at `>`.
        check("note=5>3", "note=5", ">", "3");
        // `>=` is found before the later `<`.
        check("a<b>=c", "a<b", ">=", "c");
    }

    #[test]
    fn splits_at_first_occurrence_of_symbol() {
        check("a=b=c", "a", "=", "b=c");
    }

    #[test]
    fn aggregation_splits_on_first_equals() {
        let spec = parse_aggregation(" price = avg ").unwrap();
        assert_eq!(spec.column, "price");
        assert_eq!(spec.function, "avg");

        let spec = parse_aggregation("a=b=c").unwrap();
        assert_eq!(spec.column, "a");
        assert_eq!(spec.function, "b=c");
    }

    #[test]
    fn aggregation_without_equals_is_rejected() {
        assert_eq!(
            parse_aggregation("price>avg"),
            Err(QueryError::InvalidAggregationFormat("price>avg".into()))
        );
    }
}
