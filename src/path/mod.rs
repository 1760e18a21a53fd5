//! Decomposed field paths.
//!
//! A field path has the literal shape `"<root>#<attribute_path>"` where
//! `<root>` is one of `$aas`, `$sm`, `$cd`, `$sme[.seg[.seg…]]`, and
//! `<attribute_path>` is a dotted sequence of attribute steps. [`parse`]
//! splits and decomposes a path string into a [`ParsedPath`] borrowing
//! from the input, the same `&'a str`-carrying-AST idiom this codebase's
//! Cypher-text grammar uses elsewhere.

mod errors;
mod parser;

pub use errors::PathError;

/// The root of a field path, tagged by which Identifiable/element kind it
/// addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root<'a> {
    Aas,
    Sm,
    Cd,
    /// `$sme` optionally followed by a dotted chain of SubmodelElement
    /// segments navigating down into nested elements/collections.
    Sme(Vec<Segment<'a>>),
}

/// One segment of an `$sme` root's idShort path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `name` — a child SubmodelElement matched by its idShort.
    Named(&'a str),
    /// `name[]` — any element of an indexed/list child.
    ArrayAll(&'a str),
    /// `name[i]` — the element at index `i` of an indexed/list child.
    ArrayIndexed(&'a str, u64),
}

impl<'a> Segment<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Named(n) | Self::ArrayAll(n) | Self::ArrayIndexed(n, _) => n,
        }
    }
}

/// A known, closed-set scalar attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Id,
    IdShort,
    AssetInformation,
    AssetKind,
    AssetType,
    GlobalAssetId,
    Name,
    Value,
    ExternalSubjectId,
    Type,
    Submodels,
    SemanticId,
    ValueType,
    Language,
}

impl Attribute {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "id" => Self::Id,
            "idShort" => Self::IdShort,
            "assetInformation" => Self::AssetInformation,
            "assetKind" => Self::AssetKind,
            "assetType" => Self::AssetType,
            "globalAssetId" => Self::GlobalAssetId,
            "name" => Self::Name,
            "value" => Self::Value,
            "externalSubjectId" => Self::ExternalSubjectId,
            "type" => Self::Type,
            "submodels" => Self::Submodels,
            "semanticId" => Self::SemanticId,
            "valueType" => Self::ValueType,
            "language" => Self::Language,
            _ => return None,
        })
    }

    /// The bare attribute name, as it appears in a path string.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::IdShort => "idShort",
            Self::AssetInformation => "assetInformation",
            Self::AssetKind => "assetKind",
            Self::AssetType => "assetType",
            Self::GlobalAssetId => "globalAssetId",
            Self::Name => "name",
            Self::Value => "value",
            Self::ExternalSubjectId => "externalSubjectId",
            Self::Type => "type",
            Self::Submodels => "submodels",
            Self::SemanticId => "semanticId",
            Self::ValueType => "valueType",
            Self::Language => "language",
        }
    }
}

/// One step of an attribute path. Unlike [`Root`]/[`Segment`], steps never
/// borrow from the input — they are either a closed-set attribute name or
/// an indexed pseudo-attribute — so this type carries no lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Attribute(Attribute),
    /// `keys` or `keys[i]` — a `Reference`'s flattened key list, optionally
    /// indexed to a single entry.
    Keys(Option<u64>),
    /// `specificAssetIds` or `specificAssetIds[i]`.
    SpecificAssetIds(Option<u64>),
}

/// A fully decomposed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath<'a> {
    pub root: Root<'a>,
    pub steps: Vec<Step>,
}

/// Parses a field path string into its root and attribute steps.
///
/// Fails with [`PathError`] on a missing/duplicated `#`, an unrecognized
/// root, an unknown attribute name, or a malformed list index.
pub fn parse(input: &str) -> Result<ParsedPath<'_>, PathError> {
    parser::parse_path(input)
}

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::ArrayAll(name) => write!(f, "{name}[]"),
            Self::ArrayIndexed(name, idx) => write!(f, "{name}[{idx}]"),
        }
    }
}

impl std::fmt::Display for Root<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aas => write!(f, "$aas"),
            Self::Sm => write!(f, "$sm"),
            Self::Cd => write!(f, "$cd"),
            Self::Sme(segments) => {
                write!(f, "$sme")?;
                for segment in segments {
                    write!(f, ".{segment}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute(attr) => write!(f, "{}", attr.name()),
            Self::Keys(None) => write!(f, "keys"),
            Self::Keys(Some(i)) => write!(f, "keys[{i}]"),
            Self::SpecificAssetIds(None) => write!(f, "specificAssetIds"),
            Self::SpecificAssetIds(Some(i)) => write!(f, "specificAssetIds[{i}]"),
        }
    }
}

/// Canonical serialization, the inverse of [`parse`]: `parse(s).to_string()
/// == s` for every path string `s` accepted by the grammar (steps are
/// joined in the order they were parsed, so this is not merely
/// structurally equal to the input but byte-identical).
impl std::fmt::Display for ParsedPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#", self.root)?;
        let rendered: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}
