//! Core types: agent records, field identifiers, weights and ranked output.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An agent record as returned by the subgraph.
///
/// The six text fields are resolved once at ingestion: absent or `null`
/// values become empty strings so the scorers never deal with options.
/// Any other attributes are kept verbatim in [`Agent::extra`] and are
/// never inspected by the ranking core, except that an incoming `score`
/// is dropped so the ranked output carries only the fresh one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AgentRecord")]
pub struct Agent {
    /// Stable identifier of the agent.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Social profile link.
    pub social_link: String,
    /// Profile page URL.
    pub profile_url: String,
    /// On-chain address of the agent.
    pub address: String,
    /// On-chain address of the agent's administrator.
    pub admin_address: String,
    /// Metadata the ranking core passes through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Attribute name the ranked output attaches to every agent.
const SCORE_KEY: &str = "score";

/// Wire shape of an agent before ingestion clean-up.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    social_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    profile_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    admin_address: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl From<AgentRecord> for Agent {
    fn from(record: AgentRecord) -> Self {
        let mut extra = record.extra;
        extra.remove(SCORE_KEY);
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            social_link: record.social_link,
            profile_url: record.profile_url,
            address: record.address,
            admin_address: record.admin_address,
            extra,
        }
    }
}

impl Agent {
    /// Returns the text of one of the six ranked fields.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::SocialLink => &self.social_link,
            Field::ProfileUrl => &self.profile_url,
            Field::Address => &self.address,
            Field::AdminAddress => &self.admin_address,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The text-bearing fields of an [`Agent`] that take part in ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    SocialLink,
    ProfileUrl,
    Address,
    AdminAddress,
}

impl Field {
    /// All fields in the fixed order used to build composite texts.
    pub fn all() -> &'static [Field] {
        &[
            Self::Name,
            Self::Description,
            Self::SocialLink,
            Self::ProfileUrl,
            Self::Address,
            Self::AdminAddress,
        ]
    }

    /// Wire name of the field in subgraph records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::SocialLink => "socialLink",
            Self::ProfileUrl => "profileUrl",
            Self::Address => "address",
            Self::AdminAddress => "adminAddress",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field importance, shared by both scorers.
///
/// For the similarity scorer the weight is a repeat count in the composite
/// text; for the lexical scorer it multiplies the field's match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub name: u32,
    pub description: u32,
    pub social_link: u32,
    pub profile_url: u32,
    pub address: u32,
    pub admin_address: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 3,
            description: 2,
            social_link: 1,
            profile_url: 1,
            address: 1,
            admin_address: 1,
        }
    }
}

impl FieldWeights {
    /// Returns the weight configured for `field`.
    pub fn weight(&self, field: Field) -> u32 {
        match field {
            Field::Name => self.name,
            Field::Description => self.description,
            Field::SocialLink => self.social_link,
            Field::ProfileUrl => self.profile_url,
            Field::Address => self.address,
            Field::AdminAddress => self.admin_address,
        }
    }
}

/// Coefficients applied to the two normalised score vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blend {
    /// Weight of the TF-IDF cosine similarity signal.
    pub similarity: f64,
    /// Weight of the weighted substring frequency signal.
    pub lexical: f64,
}

impl Default for Blend {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            lexical: 0.5,
        }
    }
}

/// A ranked agent borrowed from the caller's candidate set.
///
/// Serialises as the agent's own attributes with `score` merged in.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedAgent<'a> {
    #[serde(flatten)]
    pub agent: &'a Agent,
    pub score: f64,
}

impl RankedAgent<'_> {
    /// Clones the borrowed agent into an owned [`ScoredAgent`].
    pub fn to_owned_scored(&self) -> ScoredAgent {
        ScoredAgent {
            agent: self.agent.clone(),
            score: self.score,
        }
    }
}

/// An owned agent paired with its final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAgent {
    #[serde(flatten)]
    pub agent: Agent,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_fields_become_empty() {
        let json = r#"{"id":"0x1","name":"Atlas","description":null}"#;
        let agent: Agent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(agent.id, "0x1");
        assert_eq!(agent.name, "Atlas");
        assert_eq!(agent.description, "");
        assert_eq!(agent.admin_address, "");
        assert!(agent.extra.is_empty());
    }

    #[test]
    fn unknown_attributes_are_preserved() {
        let json = r#"{"id":"0x1","name":"Atlas","isActive":true,"lastUpdateTime":"1700000000"}"#;
        let agent: Agent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(agent.extra.get("isActive"), Some(&serde_json::Value::Bool(true)));

        let back = serde_json::to_value(&agent).expect("serialize");
        assert_eq!(back["isActive"], serde_json::Value::Bool(true));
        assert_eq!(back["lastUpdateTime"], "1700000000");
        assert_eq!(back["socialLink"], "");
    }

    #[test]
    fn field_accessor_matches_struct_fields() {
        let agent = Agent {
            name: "n".into(),
            description: "d".into(),
            social_link: "s".into(),
            profile_url: "p".into(),
            address: "a".into(),
            admin_address: "aa".into(),
            ..Default::default()
        };
        let texts: Vec<&str> = Field::all().iter().map(|f| agent.field(*f)).collect();
        assert_eq!(texts, vec!["n", "d", "s", "p", "a", "aa"]);
    }

    #[test]
    fn field_display_uses_wire_names() {
        assert_eq!(Field::SocialLink.to_string(), "socialLink");
        assert_eq!(Field::AdminAddress.to_string(), "adminAddress");
    }

    #[test]
    fn default_weights() {
        let weights = FieldWeights::default();
        assert_eq!(weights.weight(Field::Name), 3);
        assert_eq!(weights.weight(Field::Description), 2);
        for field in &Field::all()[2..] {
            assert_eq!(weights.weight(*field), 1);
        }
    }

    #[test]
    fn default_blend_is_even() {
        let blend = Blend::default();
        assert!((blend.similarity - 0.5).abs() < f64::EPSILON);
        assert!((blend.lexical - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn ranked_agent_serialises_with_score_merged() {
        let agent = Agent {
            id: "0x2".into(),
            name: "Orion".into(),
            ..Default::default()
        };
        let ranked = RankedAgent {
            agent: &agent,
            score: 0.75,
        };
        let json = serde_json::to_value(ranked).expect("serialize");
        assert_eq!(json["id"], "0x2");
        assert_eq!(json["name"], "Orion");
        assert_eq!(json["score"], 0.75);

        let owned = ranked.to_owned_scored();
        assert_eq!(owned.agent, agent);
        assert!((owned.score - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn incoming_score_is_replaced_not_duplicated() {
        let agent: Agent =
            serde_json::from_str(r#"{"id":"1","name":"x","score":7}"#).expect("deserialize");
        assert!(!agent.extra.contains_key("score"));

        let scored = ScoredAgent { agent, score: 0.5 };
        let json = serde_json::to_string(&scored).expect("serialize");
        assert_eq!(json.matches("\"score\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).expect("reparse");
        assert_eq!(value["score"], 0.5);
        assert_eq!(value["name"], "x");
    }

    #[test]
    fn scored_agent_reads_its_own_output() {
        let json = r#"{"id":"1","name":"x","isActive":true,"score":0.25}"#;
        let scored: ScoredAgent = serde_json::from_str(json).expect("deserialize");
        assert!((scored.score - 0.25).abs() < f64::EPSILON);
        assert!(!scored.agent.extra.contains_key("score"));
        assert_eq!(scored.agent.extra.get("isActive"), Some(&serde_json::Value::Bool(true)));
    }
}
