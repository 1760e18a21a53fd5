//! Flattening rules: how list-of-dict and whole-dict attributes become
//! scalar/parallel-list properties on a single node.

/// Describes a "list of dict" attribute that ingestion flattens into N
/// parallel scalar-list properties, one per dict key, aligned by index.
///
/// Example: `Reference.keys` (a list of `{type, value}` objects) becomes
/// the properties `keys_type` and `keys_value`, each an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedProperties {
    /// The attribute name before flattening (e.g. `"keys"`, `"value"`).
    pub attribute: &'static str,
    /// The per-entry dict keys that become `<attribute>_<key>` properties.
    pub components: &'static [&'static str],
}

impl FlattenedProperties {
    /// The property name for one of this attribute's components, e.g.
    /// `keys_value` for `(attribute: "keys", components: [..])` and
    /// component `"value"`.
    pub fn property(&self, component: &str) -> String {
        format!("{}_{}", self.attribute, component)
    }
}

/// Looks up the parallel-list flattening rule for an attribute name, in the
/// context it is reachable from (the same attribute name means different
/// things on a `Reference` vs. a `Referable`).
///
/// Returns `None` for attributes that are not list-of-dict flattened.
pub fn flattened_properties(attribute: &str) -> Option<FlattenedProperties> {
    match attribute {
        "keys" => Some(FlattenedProperties {
            attribute: "keys",
            components: &["type", "value"],
        }),
        "value" => Some(FlattenedProperties {
            attribute: "value",
            components: &["language", "text"],
        }),
        "description" => Some(FlattenedProperties {
            attribute: "description",
            components: &["language", "text"],
        }),
        _ => None,
    }
}

/// Whole-dict attributes flattened into multiple prefixed scalar
/// properties on the parent node, e.g. `AssetInformation.defaultThumbnail`
/// becoming `defaultThumbnail_*` properties and prefix-renamed
/// relationships.
pub fn is_dict_flattened_attribute(attribute: &str) -> bool {
    matches!(attribute, "defaultThumbnail")
}

/// Object kinds that are content-addressed and deduplicated on ingestion.
/// The query compiler must not assume two such nodes reached via different
/// paths are distinct.
pub fn is_deduplicated(label: &str) -> bool {
    matches!(label, "Reference" | "ConceptDescription")
}
