//! Closed tables of AAS kinds and their graph label lineage.
//!
//! Each kind is a tagged enum variant with a `const fn` lineage lookup, so
//! membership tests ("is this a Referable?") are slice scans over
//! `'static` data rather than a dictionary lookup.

/// The three top-level Identifiable kinds, keyed by the JSON array name
/// they appear under in an AAS environment document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifiableKind {
    Aas,
    Submodel,
    ConceptDescription,
}

impl IdentifiableKind {
    /// Maps a top-level environment JSON key to its Identifiable kind.
    pub fn from_json_key(key: &str) -> Option<Self> {
        match key {
            "assetAdministrationShells" => Some(Self::Aas),
            "submodels" => Some(Self::Submodel),
            "conceptDescriptions" => Some(Self::ConceptDescription),
            _ => None,
        }
    }

    /// The concrete node label for this kind.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aas => "AssetAdministrationShell",
            Self::Submodel => "Submodel",
            Self::ConceptDescription => "ConceptDescription",
        }
    }

    /// The full ancestor label tuple, concrete label first.
    pub const fn lineage(self) -> &'static [&'static str] {
        match self {
            Self::Aas => &["AssetAdministrationShell", "Identifiable", "Referable"],
            Self::Submodel => &["Submodel", "Identifiable", "Referable", "Qualifiable"],
            Self::ConceptDescription => &["ConceptDescription", "Identifiable"],
        }
    }
}

/// Other graph node kinds the schema contract names, beyond the three
/// Identifiables. Not exhaustive of the AAS metamodel — only the kinds the
/// query compiler needs to reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SubmodelElement,
    Reference,
    MultiLanguageProperty,
    AssetInformation,
    SpecificAssetId,
}

impl NodeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SubmodelElement => "SubmodelElement",
            Self::Reference => "Reference",
            Self::MultiLanguageProperty => "MultiLanguageProperty",
            Self::AssetInformation => "AssetInformation",
            Self::SpecificAssetId => "SpecificAssetId",
        }
    }

    pub const fn lineage(self) -> &'static [&'static str] {
        match self {
            Self::SubmodelElement => &["SubmodelElement", "Referable", "Qualifiable"],
            Self::Reference => &["Reference"],
            Self::MultiLanguageProperty => &["MultiLanguageProperty"],
            Self::AssetInformation => &["AssetInformation"],
            Self::SpecificAssetId => &["SpecificAssetId"],
        }
    }

    /// Whether this node kind's lineage includes `Referable`.
    pub fn is_referable(self) -> bool {
        self.lineage().contains(&"Referable")
    }
}
