use serde::{Deserialize, Serialize};

// --- Identifiers ---

/// Unique synset identifier, stable for the lifetime of a dataset snapshot.
pub type SynsetId = u64;

// --- Top Level ---

/// The decoded `wordnet.data` snapshot: the flat entity lists every index
/// is derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordnetDatabase {
    #[serde(default)]
    pub synsets: Vec<Synset>,
    #[serde(default)]
    pub links: Vec<LinkEdge>,
}

// --- Synsets ---

/// A single word meaning: one part-of-speech tag, one definition, and the
/// set of surface forms (lemmas) that can express it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    #[serde(rename = "synsetId")]
    pub id: SynsetId,
    pub pos: PartOfSpeech,
    pub lemmas: Vec<String>,
    pub definition: String,
}

/// A directed, typed link between two synsets, stored exactly as authored
/// in the dataset. Inverse directions (e.g. hypernym/hyponym) exist as
/// separately authored edges; none are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEdge {
    pub link: LinkType,
    #[serde(rename = "synsetId")]
    pub source: SynsetId,
    #[serde(rename = "synsetid_dest")]
    pub target: SynsetId,
}

/// A synset reached via a typed link: the value produced by the `links`
/// relation, accepted anywhere a raw synset id is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynsetRef {
    pub link: LinkType,
    pub synset: SynsetId,
}

// --- Part of speech ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    N, // Noun
    V, // Verb
    A, // Adjective
    S, // Adjective Satellite
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PartOfSpeech::N => "noun",
                PartOfSpeech::V => "verb",
                PartOfSpeech::A => "adjective",
                PartOfSpeech::S => "adjective satellite",
            }
        )
    }
}

impl std::str::FromStr for PartOfSpeech {
    type Err = String; // Simple error type
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "noun" => Ok(PartOfSpeech::N),
            "v" | "verb" => Ok(PartOfSpeech::V),
            "a" | "adj" | "adjective" => Ok(PartOfSpeech::A),
            "s" | "adj_sat" | "adjective_satellite" => Ok(PartOfSpeech::S),
            _ => Err(format!("Invalid part of speech: {}", s)),
        }
    }
}

// --- Link types ---

/// The closed set of link labels authored in the dataset. Labels contain
/// spaces, so each variant carries an explicit serde rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    #[serde(rename = "verb group")]
    VerbGroup,
    #[serde(rename = "substance meronym")]
    SubstanceMeronym,
    #[serde(rename = "substance holonym")]
    SubstanceHolonym,
    #[serde(rename = "similar")]
    Similar,
    #[serde(rename = "pertainym")]
    Pertainym,
    #[serde(rename = "participle")]
    Participle,
    #[serde(rename = "part meronym")]
    PartMeronym,
    #[serde(rename = "part holonym")]
    PartHolonym,
    #[serde(rename = "member meronym")]
    MemberMeronym,
    #[serde(rename = "member holonym")]
    MemberHolonym,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "is entailed by")]
    IsEntailedBy,
    #[serde(rename = "is caused by")]
    IsCausedBy,
    #[serde(rename = "instance hyponym")]
    InstanceHyponym,
    #[serde(rename = "instance hypernym")]
    InstanceHypernym,
    #[serde(rename = "hyponym")]
    Hyponym,
    #[serde(rename = "hypernym")]
    Hypernym,
    #[serde(rename = "entail")]
    Entail,
    #[serde(rename = "domain usage")]
    DomainUsage,
    #[serde(rename = "domain region")]
    DomainRegion,
    #[serde(rename = "domain member usage")]
    DomainMemberUsage,
    #[serde(rename = "domain member region")]
    DomainMemberRegion,
    #[serde(rename = "domain member category")]
    DomainMemberCategory,
    #[serde(rename = "domain category")]
    DomainCategory,
    #[serde(rename = "domain")]
    Domain,
    #[serde(rename = "derivation")]
    Derivation,
    #[serde(rename = "cause")]
    Cause,
    #[serde(rename = "attribute")]
    Attribute,
    #[serde(rename = "antonym")]
    Antonym,
    #[serde(rename = "also")]
    Also,
}

impl LinkType {
    /// The label exactly as authored in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::VerbGroup => "verb group",
            LinkType::SubstanceMeronym => "substance meronym",
            LinkType::SubstanceHolonym => "substance holonym",
            LinkType::Similar => "similar",
            LinkType::Pertainym => "pertainym",
            LinkType::Participle => "participle",
            LinkType::PartMeronym => "part meronym",
            LinkType::PartHolonym => "part holonym",
            LinkType::MemberMeronym => "member meronym",
            LinkType::MemberHolonym => "member holonym",
            LinkType::Member => "member",
            LinkType::IsEntailedBy => "is entailed by",
            LinkType::IsCausedBy => "is caused by",
            LinkType::InstanceHyponym => "instance hyponym",
            LinkType::InstanceHypernym => "instance hypernym",
            LinkType::Hyponym => "hyponym",
            LinkType::Hypernym => "hypernym",
            LinkType::Entail => "entail",
            LinkType::DomainUsage => "domain usage",
            LinkType::DomainRegion => "domain region",
            LinkType::DomainMemberUsage => "domain member usage",
            LinkType::DomainMemberRegion => "domain member region",
            LinkType::DomainMemberCategory => "domain member category",
            LinkType::DomainCategory => "domain category",
            LinkType::Domain => "domain",
            LinkType::Derivation => "derivation",
            LinkType::Cause => "cause",
            LinkType::Attribute => "attribute",
            LinkType::Antonym => "antonym",
            LinkType::Also => "also",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LinkType {
    type Err = String; // Simple error type

    /// Accepts the authored label, with underscores or hyphens standing in
    /// for spaces so types can be typed on a command line without quoting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "verb group" => Ok(LinkType::VerbGroup),
            "substance meronym" => Ok(LinkType::SubstanceMeronym),
            "substance holonym" => Ok(LinkType::SubstanceHolonym),
            "similar" => Ok(LinkType::Similar),
            "pertainym" => Ok(LinkType::Pertainym),
            "participle" => Ok(LinkType::Participle),
            "part meronym" => Ok(LinkType::PartMeronym),
            "part holonym" => Ok(LinkType::PartHolonym),
            "member meronym" => Ok(LinkType::MemberMeronym),
            "member holonym" => Ok(LinkType::MemberHolonym),
            "member" => Ok(LinkType::Member),
            "is entailed by" => Ok(LinkType::IsEntailedBy),
            "is caused by" => Ok(LinkType::IsCausedBy),
            "instance hyponym" => Ok(LinkType::InstanceHyponym),
            "instance hypernym" => Ok(LinkType::InstanceHypernym),
            "hyponym" => Ok(LinkType::Hyponym),
            "hypernym" => Ok(LinkType::Hypernym),
            "entail" => Ok(LinkType::Entail),
            "domain usage" => Ok(LinkType::DomainUsage),
            "domain region" => Ok(LinkType::DomainRegion),
            "domain member usage" => Ok(LinkType::DomainMemberUsage),
            "domain member region" => Ok(LinkType::DomainMemberRegion),
            "domain member category" => Ok(LinkType::DomainMemberCategory),
            "domain category" => Ok(LinkType::DomainCategory),
            "domain" => Ok(LinkType::Domain),
            "derivation" => Ok(LinkType::Derivation),
            "cause" => Ok(LinkType::Cause),
            "attribute" => Ok(LinkType::Attribute),
            "antonym" => Ok(LinkType::Antonym),
            "also" => Ok(LinkType::Also),
            _ => Err(format!("Invalid link type: {}", s)),
        }
    }
}
