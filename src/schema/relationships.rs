//! Reserved relationship names and list-index edge policy.

/// The relationship names the schema contract reserves a fixed meaning for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Parent -> child containment edge used for idShort-based navigation.
    Child,
    /// Submodel -> SubmodelElement (root children of a Submodel).
    SubmodelElements,
    /// Nested SubmodelElement -> SubmodelElement (collection/list contents).
    Value,
    Submodels,
    AssetInformation,
    SemanticId,
    SpecificAssetIds,
    ExternalSubjectId,
    /// Used only when reconstructing the hierarchical dict from a subgraph;
    /// hidden from that reconstruction the same way `child` is.
    References,
}

impl Relationship {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::SubmodelElements => "submodelElements",
            Self::Value => "value",
            Self::Submodels => "submodels",
            Self::AssetInformation => "assetInformation",
            Self::SemanticId => "semanticId",
            Self::SpecificAssetIds => "specificAssetIds",
            Self::ExternalSubjectId => "externalSubjectId",
            Self::References => "references",
        }
    }
}

/// Virtual relationships are hidden when reconstructing the hierarchical
/// AAS dict from a subgraph (that reconstruction is out of scope for this
/// crate, but the compiler must not assume a MATCH can rely on one of these
/// surviving as an addressable, non-virtual edge).
pub fn is_virtual_relationship(name: &str) -> bool {
    matches!(name, "child" | "references")
}

/// Whether the edge for `(parent_label, child_relationship)` carries a
/// `list_index` integer property, as a closed pure lookup rather than
/// per-instance mutable config.
pub fn list_index_policy(parent_label: &str, relationship: &str) -> bool {
    matches!(
        (parent_label, relationship),
        ("SubmodelElementList", "value")
            | ("AssetInformation", "specificAssetIds")
            | (_, "supplementalSemanticIds")
    )
}
