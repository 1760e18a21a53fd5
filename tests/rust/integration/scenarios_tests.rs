//! The six end-to-end scenarios named as testable properties: paired JSON
//! query inputs and the graph query shape they must produce.

#[cfg(test)]
mod scenarios_tests {
    use aasgraph_query::config::EmitterConfig;
    use aasgraph_query::translate;
    use serde_json::json;

    use crate::normalize;

    fn config() -> EmitterConfig {
        EmitterConfig::default()
    }

    /// Scenario 1: simple SubmodelElement equality.
    #[test]
    fn simple_submodel_element_equality() {
        let query = json!({
            "$condition": {
                "$eq": [
                    {"$field": "$sme.Material#value"},
                    {"$strVal": "Plastic"}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        let normalized = normalize(&output);

        assert!(normalized.contains("(sm0:Submodel)"));
        assert!(normalized
            .contains("(sm0)-[:submodelElements]->(sme0:SubmodelElement {idShort: 'Material'})"));
        assert!(normalized.contains("WHERE sme0.value = 'Plastic'"));
        assert!(normalized.ends_with("RETURN sm0"));
    }

    /// Scenario 2: numeric comparison.
    #[test]
    fn numeric_comparison() {
        let query = json!({
            "$condition": {
                "$ge": [
                    {"$field": "$sme.Weight#value"},
                    {"$numVal": 100}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        let normalized = normalize(&output);

        assert!(normalized.contains("idShort: 'Weight'"));
        assert!(normalized.contains("WHERE sme0.value >= 100"));
    }

    /// Scenario 3: regex and starts-with.
    #[test]
    fn regex_and_starts_with() {
        let regex_query = json!({
            "$condition": {
                "$regex": [
                    {"$field": "$sme.SerialNumber#value"},
                    {"$strVal": "SN[0-9]{4}"}
                ]
            }
        });
        let output = translate(&regex_query, &config()).unwrap();
        assert!(output.contains("=~ 'SN[0-9]{4}'"));

        let starts_with_query = json!({
            "$condition": {
                "$starts-with": [
                    {"$field": "$sme.SerialNumber#value"},
                    {"$strVal": "ABC-"}
                ]
            }
        });
        let output = translate(&starts_with_query, &config()).unwrap();
        assert!(output.contains("STARTS WITH 'ABC-'"));
    }

    /// Scenario 4: an Identifiable filter lifted into the MATCH node
    /// pattern instead of repeated in WHERE.
    #[test]
    fn identifiable_filter_lifted_into_match() {
        let query = json!({
            "$condition": {
                "$and": [
                    {"$eq": [{"$field": "$sm#idShort"}, {"$strVal": "TechnicalData"}]},
                    {"$lt": [{"$field": "$sme.Weight#value"}, {"$numVal": 50}]}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        let normalized = normalize(&output);

        assert!(normalized.contains("(sm0:Submodel {idShort: 'TechnicalData'})"));
        assert!(normalized
            .contains("(sm0)-[:submodelElements]->(sme0:SubmodelElement {idShort: 'Weight'})"));
        assert!(normalized.contains("WHERE sme0.value < 50"));
        assert!(!normalized.contains("idShort = 'TechnicalData'"));
        assert!(normalized.ends_with("RETURN sm0"));
    }

    /// Scenario 5: a correlated array match shares one alias for the
    /// repeated array-all segment across both operands.
    #[test]
    fn correlated_array_match() {
        let query = json!({
            "$condition": {
                "$match": [
                    {"$eq": [
                        {"$field": "$sme.FileVersion[].FileVersionId#value"},
                        {"$strVal": "1.0"}
                    ]},
                    {"$eq": [
                        {"$field": "$sme.FileVersion[].FileName#value"},
                        {"$strVal": "a.pdf"}
                    ]}
                ]
            }
        });
        let output = translate(&query, &config()).unwrap();
        let normalized = normalize(&output);

        // One shared array-all traversal into `FileVersion[]` (no idShort
        // predicate), then one `-[:value]->` child fragment per operand
        // hanging off that single shared alias.
        assert!(normalized.contains("(sm0)-[:submodelElements]->(sme0:SubmodelElement)"));
        assert!(normalized.contains("(sme0)-[:value]->(sme1:SubmodelElement {idShort: 'FileVersionId'})"));
        assert!(normalized.contains("(sme0)-[:value]->(sme2:SubmodelElement {idShort: 'FileName'})"));
        assert_eq!(normalized.matches("submodelElements").count(), 1);
        assert_eq!(
            normalized,
            normalize(&format!(
                "MATCH (sm0:Submodel) (sm0)-[:submodelElements]->(sme0:SubmodelElement) (sme0)-[:value]->(sme1:SubmodelElement {{idShort: 'FileVersionId'}}) (sme0)-[:value]->(sme2:SubmodelElement {{idShort: 'FileName'}}) WHERE sme1.value = '1.0' AND sme2.value = 'a.pdf' RETURN sm0"
            ))
        );
    }

    /// Scenario 6: list-equality promotion to `IN`.
    #[test]
    fn list_equality_promotion() {
        // A plain `$sme` leaf's `value` only resolves list-valued once its
        // alias is established as a MultiLanguageProperty or Reference;
        // exercise that unambiguously via `language`, which always
        // promotes regardless of prior context.
        let language_query = json!({
            "$condition": {
                "$eq": [
                    {"$field": "$sme.Colors#language"},
                    {"$strVal": "en"}
                ]
            }
        });
        let output = translate(&language_query, &config()).unwrap();
        assert!(output.contains("'en' IN sme0.value_language"));

        // A `Reference`'s unindexed `keys.value` is list-valued the same
        // way.
        let reference_query = json!({
            "$condition": {
                "$eq": [
                    {"$field": "$sm#semanticId.value"},
                    {"$strVal": "urn:example"}
                ]
            }
        });
        let output = translate(&reference_query, &config()).unwrap();
        assert!(output.contains("'urn:example' IN semanticId0.keys_value"));
    }
}
