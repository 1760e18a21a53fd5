//! Unit tests for field-path decomposition edge cases.

#[cfg(test)]
mod path_robustness_tests {
    use aasgraph_query::path::{parse, PathError};

    #[test]
    fn malformed_paths_are_errors_not_panics() {
        let malformed = vec![
            "",
            "no-hash-here",
            "$sm#idShort#extra",
            "$bogus#idShort",
            "$sm#",
            "#idShort",
            "$sme..Weight#value",
            "$sme.Weight[x]#value",
            "$sm#semanticId.keys[].value",
            "$sm#idShort[0]",
        ];
        for path in malformed {
            assert!(parse(path).is_err(), "expected an error for {path:?}");
        }
    }

    #[test]
    fn missing_separator_reports_the_full_input() {
        match parse("$sm.idShort") {
            Err(PathError::MissingSeparator(s)) => assert_eq!(s, "$sm.idShort"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn every_closed_set_root_parses() {
        for root in ["$aas#id", "$sm#id", "$cd#id", "$sme#idShort"] {
            assert!(parse(root).is_ok(), "{root} should parse");
        }
    }

    #[test]
    fn every_closed_set_attribute_parses_on_sm() {
        let attrs = [
            "id", "idShort", "assetInformation", "assetKind", "assetType", "globalAssetId",
            "name", "value", "externalSubjectId", "type", "submodels", "semanticId", "valueType",
            "language",
        ];
        for attr in attrs {
            let path = format!("$sm#{attr}");
            assert!(parse(&path).is_ok(), "{path} should parse");
        }
    }

    #[test]
    fn array_all_and_array_indexed_segments_round_trip() {
        for path in [
            "$sme.Items[]#value",
            "$sme.Items[3]#value",
            "$sme.A.B[2].C#value",
        ] {
            let parsed = parse(path).unwrap();
            assert_eq!(parsed.to_string(), path);
        }
    }
}
