//! Unit tests for query DSL parsing edge cases and error handling.
//!
//! Tests malformed queries, wrong arity, and ambiguous operator objects to
//! ensure robust parsing without panics.

#[cfg(test)]
mod dsl_robustness_tests {
    use aasgraph_query::dsl::{parse, DslError};
    use serde_json::json;

    /// Malformed top-level queries should surface a typed error, never
    /// panic.
    #[test]
    fn malformed_queries_are_errors_not_panics() {
        let malformed = vec![
            json!({}),
            json!({"$condition": {}}),
            json!({"$condition": {"$eq": []}}),
            json!({"$condition": {"$eq": [{"$field": "$sm#idShort"}]}}),
            json!({"$condition": {"$bogus": [{"$field": "$sm#idShort"}, {"$strVal": "x"}]}}),
            json!({"$condition": {"$and": []}}),
            json!({"$condition": "not an object"}),
            json!({"$condition": {"$eq": [{"$bogus": "x"}, {"$strVal": "y"}]}}),
            json!({"$condition": {"$eq": [{"$field": "$sm#idShort"}, {"$numVal": "not a number"}]}}),
            json!(null),
        ];

        for query in malformed {
            let result = parse(&query);
            assert!(result.is_err(), "expected an error for {query}");
        }
    }

    #[test]
    fn unknown_top_level_key_is_missing_condition() {
        let query = json!({"foo": "bar"});
        assert!(matches!(parse(&query), Err(DslError::MissingCondition(_))));
    }

    #[test]
    fn extra_top_level_key_alongside_condition_is_an_error() {
        let query = json!({
            "$condition": {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "x"}]},
            "$extra": true
        });
        assert!(matches!(parse(&query), Err(DslError::MissingCondition(_))));
    }

    #[test]
    fn not_with_multiple_operands_is_an_error() {
        let query = json!({
            "$condition": {
                "$not": [
                    {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "a"}]},
                    {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "b"}]}
                ]
            }
        });
        // `$not` expects a single expression object, not an array.
        assert!(parse(&query).is_err());
    }

    #[test]
    fn comparator_with_three_operands_is_wrong_arity() {
        let query = json!({
            "$condition": {
                "$eq": [
                    {"$field": "$sm#idShort"},
                    {"$strVal": "a"},
                    {"$strVal": "b"}
                ]
            }
        });
        assert!(matches!(parse(&query), Err(DslError::WrongArity { .. })));
    }

    #[test]
    fn nested_cast_chain_parses() {
        let query = json!({
            "$condition": {
                "$eq": [
                    {"$numCast": {"$strCast": {"$field": "$sme.Weight#value"}}},
                    {"$numVal": 10}
                ]
            }
        });
        assert!(parse(&query).is_ok());
    }

    #[test]
    fn all_comparator_operators_parse() {
        let operators = [
            "$eq", "$ne", "$gt", "$ge", "$lt", "$le", "$contains", "$starts-with", "$ends-with",
            "$regex",
        ];
        for op in operators {
            let mut comparator = serde_json::Map::new();
            comparator.insert(
                op.to_string(),
                json!([{"$field": "$sme.X#value"}, {"$strVal": "y"}]),
            );
            let query = json!({"$condition": serde_json::Value::Object(comparator)});
            assert!(parse(&query).is_ok(), "operator {op} failed to parse");
        }
    }

    #[test]
    fn all_value_kinds_parse() {
        let values = vec![
            json!({"$field": "$sme.X#value"}),
            json!({"$strVal": "x"}),
            json!({"$numVal": 1}),
            json!({"$boolean": true}),
            json!({"$strCast": {"$field": "$sme.X#value"}}),
            json!({"$numCast": {"$field": "$sme.X#value"}}),
            json!({"$hexCast": {"$field": "$sme.X#value"}}),
            json!({"$boolCast": {"$field": "$sme.X#value"}}),
            json!({"$dateTimeCast": {"$field": "$sme.X#value"}}),
            json!({"$timeCast": {"$field": "$sme.X#value"}}),
        ];
        for value in values {
            let query = json!({"$condition": {"$eq": [value, {"$strVal": "y"}]}});
            assert!(parse(&query).is_ok());
        }
    }
}
