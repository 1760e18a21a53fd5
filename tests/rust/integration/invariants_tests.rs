//! Universal properties the translator must hold for every valid input,
//! independent of any one scenario's exact output shape.

#[cfg(test)]
mod invariants_tests {
    use aasgraph_query::config::EmitterConfig;
    use aasgraph_query::translate;
    use serde_json::{json, Value as Json};

    fn config() -> EmitterConfig {
        EmitterConfig::default()
    }

    fn sections(output: &str) -> (usize, usize, usize) {
        (
            output.matches("MATCH").count(),
            output.matches("WHERE").count(),
            output.matches("RETURN").count(),
        )
    }

    fn sample_queries() -> Vec<Json> {
        vec![
            json!({"$condition": {"$eq": [{"$field": "$sme.Material#value"}, {"$strVal": "Plastic"}]}}),
            json!({"$condition": {"$ne": [{"$field": "$sm#idShort"}, {"$strVal": "X"}]}}),
            json!({"$condition": {"$gt": [{"$field": "$sme.Weight#value"}, {"$numVal": 1}]}}),
            json!({"$condition": {"$ge": [{"$field": "$sme.Weight#value"}, {"$numVal": 1}]}}),
            json!({"$condition": {"$lt": [{"$field": "$sme.Weight#value"}, {"$numVal": 1}]}}),
            json!({"$condition": {"$le": [{"$field": "$sme.Weight#value"}, {"$numVal": 1}]}}),
            json!({"$condition": {"$contains": [{"$field": "$sme.Name#value"}, {"$strVal": "abc"}]}}),
            json!({"$condition": {"$starts-with": [{"$field": "$sme.Name#value"}, {"$strVal": "abc"}]}}),
            json!({"$condition": {"$ends-with": [{"$field": "$sme.Name#value"}, {"$strVal": "abc"}]}}),
            json!({"$condition": {"$regex": [{"$field": "$sme.Name#value"}, {"$strVal": "a.*"}]}}),
            json!({
                "$condition": {
                    "$and": [
                        {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "A"}]},
                        {"$lt": [{"$field": "$sme.Weight#value"}, {"$numVal": 50}]}
                    ]
                }
            }),
            json!({
                "$condition": {
                    "$or": [
                        {"$eq": [{"$field": "$sme.Weight#value"}, {"$numVal": 1}]},
                        {"$eq": [{"$field": "$sme.Weight#value"}, {"$numVal": 2}]}
                    ]
                }
            }),
            json!({
                "$condition": {
                    "$not": {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "A"}]}
                }
            }),
            json!({
                "$condition": {
                    "$match": [
                        {"$eq": [{"$field": "$sme.FileVersion[].FileVersionId#value"}, {"$strVal": "1.0"}]},
                        {"$eq": [{"$field": "$sme.FileVersion[].FileName#value"}, {"$strVal": "a.pdf"}]}
                    ]
                }
            }),
        ]
    }

    #[test]
    fn every_valid_query_has_exactly_one_of_each_section_and_at_least_one_match_fragment() {
        for query in sample_queries() {
            let output = translate(&query, &config()).unwrap();
            let (match_count, where_count, return_count) = sections(&output);
            assert_eq!(match_count, 1, "query {query} produced {match_count} MATCH sections");
            assert_eq!(where_count, 1, "query {query} produced {where_count} WHERE sections");
            assert_eq!(return_count, 1, "query {query} produced {return_count} RETURN sections");
            assert!(output.lines().count() >= 3, "expected at least a MATCH, WHERE, and RETURN line");
        }
    }

    #[test]
    fn translate_is_deterministic_across_repeated_calls() {
        for query in sample_queries() {
            let first = translate(&query, &config()).unwrap();
            let second = translate(&query, &config()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn identical_field_paths_share_one_alias() {
        let query = json!({
            "$condition": {
                "$and": [
                    {"$eq": [{"$field": "$sme.Weight#value"}, {"$numVal": 10}]},
                    {"$ne": [{"$field": "$sme.Weight#value"}, {"$numVal": 20}]}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        // Both comparisons resolve through the same `sme0.value` — the
        // fragment introducing it appears exactly once.
        assert_eq!(output.matches("idShort: 'Weight'").count(), 1);
        assert!(output.contains("sme0.value = 10"));
        assert!(output.contains("sme0.value <> 20"));
    }

    #[test]
    fn distinct_field_paths_never_share_an_alias() {
        let query = json!({
            "$condition": {
                "$and": [
                    {"$eq": [{"$field": "$sme.Weight#value"}, {"$numVal": 10}]},
                    {"$eq": [{"$field": "$sme.Height#value"}, {"$numVal": 20}]}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        assert!(output.contains("idShort: 'Weight'"));
        assert!(output.contains("idShort: 'Height'"));
        assert_ne!(
            output.matches("sme0.value").count() > 0 && output.matches("sme1.value").count() > 0,
            false
        );
    }

    #[test]
    fn no_match_fragment_string_ever_repeats() {
        let query = json!({
            "$condition": {
                "$and": [
                    {"$eq": [{"$field": "$sme.Weight#value"}, {"$numVal": 10}]},
                    {"$ne": [{"$field": "$sme.Weight#value"}, {"$numVal": 20}]},
                    {"$lt": [{"$field": "$sm#idShort"}, {"$strVal": "Z"}]}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        let match_section = output
            .split("WHERE")
            .next()
            .unwrap()
            .trim_start_matches("MATCH");
        let lines: Vec<&str> = match_section.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let mut seen = std::collections::HashSet::new();
        for line in &lines {
            assert!(seen.insert(*line), "duplicate MATCH fragment: {line}");
        }
    }

    #[test]
    fn every_comparator_in_the_closed_set_has_a_coverage_pair() {
        let pairs = [
            ("$eq", "="),
            ("$ne", "<>"),
            ("$gt", ">"),
            ("$ge", ">="),
            ("$lt", "<"),
            ("$le", "<="),
            ("$contains", "CONTAINS"),
            ("$starts-with", "STARTS WITH"),
            ("$ends-with", "ENDS WITH"),
            ("$regex", "=~"),
        ];
        for (op, rendered) in pairs {
            let mut comparator = serde_json::Map::new();
            comparator.insert(
                op.to_string(),
                json!([{"$field": "$sme.X#value"}, {"$strVal": "y"}]),
            );
            let query = json!({"$condition": Json::Object(comparator)});
            let output = translate(&query, &config()).unwrap();
            assert!(output.contains(rendered), "operator {op} did not render {rendered}: {output}");
        }
    }

    #[test]
    fn match_correlation_differs_from_plain_and() {
        let match_query = json!({
            "$condition": {
                "$match": [
                    {"$eq": [{"$field": "$sme.FileVersion[].FileVersionId#value"}, {"$strVal": "1.0"}]},
                    {"$eq": [{"$field": "$sme.FileVersion[].FileName#value"}, {"$strVal": "a.pdf"}]}
                ]
            }
        });
        let and_query = json!({
            "$condition": {
                "$and": [
                    {"$eq": [{"$field": "$sme.FileVersion[].FileVersionId#value"}, {"$strVal": "1.0"}]},
                    {"$eq": [{"$field": "$sme.FileVersion[].FileName#value"}, {"$strVal": "a.pdf"}]}
                ]
            }
        });
        let match_output = translate(&match_query, &config()).unwrap();
        let and_output = translate(&and_query, &config()).unwrap();

        // $match shares one `FileVersion[]` traversal (one `submodelElements`
        // fragment); plain $and re-traverses it per operand (two).
        assert_eq!(match_output.matches("submodelElements").count(), 1);
        assert_eq!(and_output.matches("submodelElements").count(), 2);
    }
}
