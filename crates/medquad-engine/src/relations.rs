//! Upstream relation payloads from the reasoning service.
//!
//! The service answers a biomedical question with a central claim, an
//! overall score and a list of evidence statements tagged `SUPPORTS` or
//! `ATTACKS`. Payloads are parsed loosely first and then validated into
//! [`QuestionEvidence`], which is the only shape that can be turned into an
//! [`ArgumentGraph`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use medquad_common::confidence::{base_score_from_uncertainty, is_unit_interval};

use crate::argument::Argument;
use crate::error::RelationsError;
use crate::graph::ArgumentGraph;

/// Direction of an evidence statement relative to the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    Supports,
    Attacks,
}

impl Polarity {
    fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "SUPPORTS" => Some(Self::Supports),
            "ATTACKS" => Some(Self::Attacks),
            _ => None,
        }
    }
}

/// One validated evidence statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub statement: String,
    /// Uncertainty reported upstream, in [0, 1]
    pub score: f64,
    pub polarity: Polarity,
    #[serde(default)]
    pub links: Vec<Url>,
}

/// Validated answer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEvidence {
    pub claim: String,
    pub overall_confidence: f64,
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Deserialize)]
struct RawRelations {
    claim: Option<String>,
    #[serde(alias = "overallConfidence")]
    overall_confidence: Option<f64>,
    #[serde(default, alias = "evidence")]
    relations: Option<Vec<RawEvidence>>,
}

#[derive(Debug, Deserialize)]
struct RawEvidence {
    #[serde(alias = "text")]
    statement: Option<String>,
    score: Option<f64>,
    #[serde(alias = "polarity")]
    relation: Option<String>,
    #[serde(default, alias = "citations")]
    links: Option<Vec<String>>,
}

impl QuestionEvidence {
    /// Parse and validate a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, RelationsError> {
        let raw: RawRelations = serde_json::from_str(payload)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRelations) -> Result<Self, RelationsError> {
        let claim = raw
            .claim
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(RelationsError::MissingClaim)?;

        let overall_confidence = raw
            .overall_confidence
            .ok_or(RelationsError::MissingOverallConfidence)?;
        check_unit("overallConfidence".to_string(), overall_confidence)?;

        let evidence = raw
            .relations
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| validate_evidence(i + 1, item))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(evidence = evidence.len(), "Relations payload validated");
        Ok(Self { claim, overall_confidence, evidence })
    }

    /// Build the claim-centred argument graph.
    ///
    /// The claim gets base score `1 - overall_confidence`; evidence item k
    /// becomes `evidence-k` with base score `1 - score`, attacking or
    /// supporting the claim.
    pub fn to_graph(&self, claim_id: &str) -> Result<ArgumentGraph, RelationsError> {
        let mut claim = Argument::new(claim_id, base_score_from_uncertainty(self.overall_confidence));
        let mut arguments = Vec::with_capacity(self.evidence.len() + 1);

        for (i, item) in self.evidence.iter().enumerate() {
            let id = evidence_id(i + 1);
            match item.polarity {
                Polarity::Supports => claim.supporters.insert(id.clone()),
                Polarity::Attacks => claim.attackers.insert(id.clone()),
            };
            arguments.push(Argument::new(id, base_score_from_uncertainty(item.score)));
        }
        arguments.push(claim);

        Ok(ArgumentGraph::new(arguments)?)
    }

    pub fn supporting(&self) -> impl Iterator<Item = &Evidence> {
        self.evidence.iter().filter(|e| e.polarity == Polarity::Supports)
    }

    pub fn attacking(&self) -> impl Iterator<Item = &Evidence> {
        self.evidence.iter().filter(|e| e.polarity == Polarity::Attacks)
    }
}

/// Argument id for the k-th (1-based) evidence item.
pub fn evidence_id(k: usize) -> String {
    format!("evidence-{k}")
}

fn check_unit(field: String, value: f64) -> Result<(), RelationsError> {
    if is_unit_interval(value) {
        Ok(())
    } else {
        Err(RelationsError::ScoreOutOfRange { field, value })
    }
}

fn validate_evidence(index: usize, raw: RawEvidence) -> Result<Evidence, RelationsError> {
    let statement = raw
        .statement
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(RelationsError::MissingField { index, field: "statement" })?;

    let score = raw.score.ok_or(RelationsError::MissingField { index, field: "score" })?;
    check_unit(format!("evidence #{index} score"), score)?;

    let tag = raw.relation.ok_or(RelationsError::MissingField { index, field: "relation" })?;
    let polarity = Polarity::parse(&tag).ok_or(RelationsError::UnknownPolarity { index, tag })?;

    let links = raw
        .links
        .unwrap_or_default()
        .into_iter()
        .filter_map(|link| match Url::parse(link.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Dropping invalid citation link {link:?} on evidence #{index}: {e}");
                None
            }
        })
        .collect();

    Ok(Evidence { statement, score, polarity, links })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "claim": "Metformin lowers HbA1c in adults with type 2 diabetes",
        "overallConfidence": 0.2,
        "relations": [
            {"statement": "Meta-analysis of 35 RCTs shows ~1% HbA1c reduction", "score": 0.1, "relation": "SUPPORTS",
             "links": ["https://pubmed.ncbi.nlm.nih.gov/00000001/", "not a url"]},
            {"statement": "GI intolerance limits adherence", "score": 0.4, "relation": " attacks "}
        ]
    }"#;

    #[test]
    fn test_parse_valid_payload() {
        let q = QuestionEvidence::from_json(PAYLOAD).unwrap();
        assert_eq!(q.evidence.len(), 2);
        assert_eq!(q.evidence[0].polarity, Polarity::Supports);
        assert_eq!(q.evidence[1].polarity, Polarity::Attacks);
        assert_eq!(q.evidence[0].links.len(), 1);
        assert_eq!(q.supporting().count(), 1);
        assert_eq!(q.attacking().count(), 1);
    }

    #[test]
    fn test_graph_conversion() {
        let q = QuestionEvidence::from_json(PAYLOAD).unwrap();
        let graph = q.to_graph("claim").unwrap();
        assert_eq!(graph.len(), 3);

        let claim = graph.get("claim").unwrap();
        assert!((claim.base_score - 0.8).abs() < 1e-12);
        assert!(claim.supporters.contains("evidence-1"));
        assert!(claim.attackers.contains("evidence-2"));

        let e1 = graph.get("evidence-1").unwrap();
        assert!((e1.base_score - 0.9).abs() < 1e-12);
        assert!(e1.is_unrelated());
    }

    #[test]
    fn test_missing_claim() {
        let err = QuestionEvidence::from_json(r#"{"claim": "  ", "overallConfidence": 0.5}"#).unwrap_err();
        assert!(matches!(err, RelationsError::MissingClaim));
    }

    #[test]
    fn test_missing_overall_confidence() {
        let err = QuestionEvidence::from_json(r#"{"claim": "c"}"#).unwrap_err();
        assert!(matches!(err, RelationsError::MissingOverallConfidence));
    }

    #[test]
    fn test_no_relations_is_isolated_claim() {
        let q = QuestionEvidence::from_json(r#"{"claim": "c", "overall_confidence": 0.5}"#).unwrap();
        assert!(q.evidence.is_empty());
        assert_eq!(q.to_graph("claim").unwrap().len(), 1);
    }

    #[test]
    fn test_score_out_of_range() {
        let err = QuestionEvidence::from_json(
            r#"{"claim": "c", "overallConfidence": 0.5,
                "relations": [{"statement": "s", "score": 1.4, "relation": "SUPPORTS"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RelationsError::ScoreOutOfRange { value, .. } if value == 1.4));

        let err = QuestionEvidence::from_json(r#"{"claim": "c", "overallConfidence": -0.2}"#).unwrap_err();
        assert!(matches!(err, RelationsError::ScoreOutOfRange { .. }));
    }

    #[test]
    fn test_unknown_polarity() {
        let err = QuestionEvidence::from_json(
            r#"{"claim": "c", "overallConfidence": 0.5,
                "relations": [{"statement": "s", "score": 0.4, "relation": "NEUTRAL"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RelationsError::UnknownPolarity { index: 1, .. }));
    }

    #[test]
    fn test_missing_field_reports_index() {
        let err = QuestionEvidence::from_json(
            r#"{"claim": "c", "overallConfidence": 0.5,
                "relations": [
                    {"statement": "s", "score": 0.4, "relation": "SUPPORTS"},
                    {"statement": "t", "relation": "ATTACKS"}
                ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RelationsError::MissingField { index: 2, field: "score" }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            QuestionEvidence::from_json("{not json"),
            Err(RelationsError::Malformed(_))
        ));
    }

    #[test]
    fn test_claim_id_collision_is_invalid_graph() {
        let q = QuestionEvidence::from_json(PAYLOAD).unwrap();
        let err = q.to_graph("evidence-1").unwrap_err();
        assert!(matches!(err, RelationsError::InvalidGraph(_)));
    }
}
