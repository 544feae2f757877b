//! Evaluation reports for downstream consumers.

use chrono::{DateTime, Utc};
use medquad_common::confidence::uncertainty_from_strength;
use medquad_common::{EvaluationConfig, OutputConfig, OutputFormat};
use medquad_engine::Evaluation;
use serde::Serialize;

use crate::input::LoadedInput;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub evaluation: EvaluationConfig,
    pub inputs: Vec<InputReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputReport {
    pub source: String,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    /// Final strength of the claim node, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_strength: Option<f64>,
    pub rounds: usize,
    pub delta: f64,
    pub converged: bool,
    pub nodes: Vec<NodeReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub id: String,
    pub base_score: f64,
    pub strength: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
}

impl InputReport {
    pub fn new(input: &LoadedInput, evaluation: &Evaluation, output: &OutputConfig) -> Self {
        let strengths = evaluation.strengths();
        let nodes = input
            .graph
            .iter()
            .filter_map(|arg| {
                let strength = strengths.get(&arg.id)?;
                Some(NodeReport {
                    id: arg.id.clone(),
                    base_score: arg.base_score,
                    strength,
                    uncertainty: output
                        .include_uncertainty
                        .then(|| uncertainty_from_strength(strength)),
                })
            })
            .collect();

        Self {
            source: input.source.display().to_string(),
            digest: input.graph.content_digest(),
            claim_id: input.claim.as_ref().map(|c| c.id.clone()),
            claim: input.claim.as_ref().map(|c| c.text.clone()),
            claim_strength: input.claim.as_ref().and_then(|c| strengths.get(&c.id)),
            rounds: evaluation.rounds(),
            delta: evaluation.delta(),
            converged: evaluation.converged(),
            nodes,
        }
    }
}

impl RunReport {
    pub fn new(evaluation: EvaluationConfig, inputs: Vec<InputReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            evaluation,
            inputs,
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}
