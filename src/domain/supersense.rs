// ============================================================
// Layer 3 — Supersense Label Set
// ============================================================
// The closed enumeration of semantic classes a noun sense can
// be tagged with. The class id fed to the classifier is the
// position of the label in `Supersense::ALL`, so the order of
// that array is part of the data format and must not change.
//
// Three labels are compound annotations kept as classes of
// their own: "act*cognition", "artifact*cognition" and
// "groupxperson".

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// One of the 24 supersense classes. Serialized under the same
/// names the annotation sheets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supersense {
    Act,
    Animal,
    Artifact,
    Attribute,
    Body,
    Cognition,
    Communication,
    Event,
    Feeling,
    Food,
    Institution,
    #[serde(rename = "act*cognition")]
    ActCognition,
    Object,
    Possession,
    Person,
    Phenomenon,
    Plant,
    #[serde(rename = "artifact*cognition")]
    ArtifactCognition,
    Quantity,
    Relation,
    State,
    Substance,
    Time,
    #[serde(rename = "groupxperson")]
    GroupPerson,
}

impl Supersense {
    /// Every label, indexed by class id.
    pub const ALL: [Supersense; 24] = [
        Supersense::Act,
        Supersense::Animal,
        Supersense::Artifact,
        Supersense::Attribute,
        Supersense::Body,
        Supersense::Cognition,
        Supersense::Communication,
        Supersense::Event,
        Supersense::Feeling,
        Supersense::Food,
        Supersense::Institution,
        Supersense::ActCognition,
        Supersense::Object,
        Supersense::Possession,
        Supersense::Person,
        Supersense::Phenomenon,
        Supersense::Plant,
        Supersense::ArtifactCognition,
        Supersense::Quantity,
        Supersense::Relation,
        Supersense::State,
        Supersense::Substance,
        Supersense::Time,
        Supersense::GroupPerson,
    ];

    /// Number of classes the classifier head predicts.
    pub const COUNT: usize = Self::ALL.len();

    /// Label as written in the annotation sheets.
    pub fn name(self) -> &'static str {
        match self {
            Supersense::Act               => "act",
            Supersense::Animal            => "animal",
            Supersense::Artifact          => "artifact",
            Supersense::Attribute         => "attribute",
            Supersense::Body              => "body",
            Supersense::Cognition         => "cognition",
            Supersense::Communication     => "communication",
            Supersense::Event             => "event",
            Supersense::Feeling           => "feeling",
            Supersense::Food              => "food",
            Supersense::Institution       => "institution",
            Supersense::ActCognition      => "act*cognition",
            Supersense::Object            => "object",
            Supersense::Possession        => "possession",
            Supersense::Person            => "person",
            Supersense::Phenomenon        => "phenomenon",
            Supersense::Plant             => "plant",
            Supersense::ArtifactCognition => "artifact*cognition",
            Supersense::Quantity          => "quantity",
            Supersense::Relation          => "relation",
            Supersense::State             => "state",
            Supersense::Substance         => "substance",
            Supersense::Time              => "time",
            Supersense::GroupPerson       => "groupxperson",
        }
    }

    /// Parse an annotation label. Returns None for anything
    /// outside the controlled enumeration.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Class id (position in `ALL`).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Coarse groups this supersense belongs to. Compound labels
    /// sit in two groups at once.
    pub fn hypersenses(self) -> &'static [Hypersense] {
        use Hypersense::*;
        match self {
            Supersense::Act | Supersense::Event | Supersense::Phenomenon => &[DynamicSituation],
            Supersense::ActCognition => &[DynamicSituation, InformationalObject],
            Supersense::Attribute
            | Supersense::State
            | Supersense::Feeling
            | Supersense::Relation => &[StativeSituation],
            Supersense::Animal | Supersense::Person => &[AnimateEntity],
            Supersense::GroupPerson => &[AnimateEntity, Quantification],
            Supersense::Artifact
            | Supersense::Food
            | Supersense::Body
            | Supersense::Object
            | Supersense::Plant
            | Supersense::Substance => &[InanimateEntity],
            Supersense::ArtifactCognition => &[InanimateEntity, InformationalObject],
            Supersense::Cognition | Supersense::Communication => &[InformationalObject],
            Supersense::Quantity => &[Quantification],
            Supersense::Institution | Supersense::Possession | Supersense::Time => &[Other],
        }
    }
}

impl fmt::Display for Supersense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Supersense {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PipelineError::UnknownSupersense(s.to_string()))
    }
}

// ─── Hypersense ───────────────────────────────────────────────────────────────
/// Coarse grouping of supersenses, used for reporting label balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hypersense {
    DynamicSituation,
    StativeSituation,
    AnimateEntity,
    InanimateEntity,
    InformationalObject,
    Quantification,
    Other,
}

impl Hypersense {
    pub const ALL: [Hypersense; 7] = [
        Hypersense::DynamicSituation,
        Hypersense::StativeSituation,
        Hypersense::AnimateEntity,
        Hypersense::InanimateEntity,
        Hypersense::InformationalObject,
        Hypersense::Quantification,
        Hypersense::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Hypersense::DynamicSituation    => "dynamic_situation",
            Hypersense::StativeSituation    => "stative_situation",
            Hypersense::AnimateEntity       => "animate_entity",
            Hypersense::InanimateEntity     => "inanimate_entity",
            Hypersense::InformationalObject => "informational_object",
            Hypersense::Quantification      => "quantification",
            Hypersense::Other               => "other",
        }
    }
}

impl fmt::Display for Hypersense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ids_follow_declaration_order() {
        for (i, s) in Supersense::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Supersense::from_index(i), Some(*s));
        }
        assert_eq!(Supersense::COUNT, 24);
        assert_eq!(Supersense::from_index(24), None);
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(Supersense::from_name("act*cognition"), Some(Supersense::ActCognition));
        assert_eq!(Supersense::from_name("groupxperson"), Some(Supersense::GroupPerson));
        assert_eq!("time".parse::<Supersense>().ok(), Some(Supersense::Time));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        assert_eq!(Supersense::from_name("group"), None);
        assert!(matches!(
            "Animal".parse::<Supersense>(),
            Err(PipelineError::UnknownSupersense(_))
        ));
    }

    #[test]
    fn test_every_label_has_a_hypersense() {
        for s in Supersense::ALL {
            assert!(!s.hypersenses().is_empty(), "{s} has no hypersense");
        }
        assert_eq!(
            Supersense::ArtifactCognition.hypersenses(),
            &[Hypersense::InanimateEntity, Hypersense::InformationalObject]
        );
    }

    #[test]
    fn test_serialized_names_match_sheet_labels() {
        for s in Supersense::ALL {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{}\"", s.name()));
        }
        assert_eq!(
            serde_json::from_str::<Supersense>("\"artifact*cognition\"").unwrap(),
            Supersense::ArtifactCognition
        );
    }
}
