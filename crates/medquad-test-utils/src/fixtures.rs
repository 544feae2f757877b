//! Hand-built argument graphs used across the test suites.
//!
//! These replace the demo graphs that used to be hard-wired into the chat
//! and graph views; tests pass them to the evaluator explicitly.

use medquad_engine::{Argument, ArgumentGraph};

/// Central claim τ=0.5 with one attacker τ=0.3 and one supporter τ=0.8.
/// The claim settles at 0.75 after one round.
pub fn claim_with_attacker_and_supporter() -> ArgumentGraph {
    ArgumentGraph::builder()
        .argument("claim", 0.5)
        .argument("attacker", 0.3)
        .argument("supporter", 0.8)
        .attack("attacker", "claim")
        .support("supporter", "claim")
        .build()
        .expect("fixture graph is valid")
}

/// `a` attacks `b`, `b` attacks `c`, every base score 0.9.
/// Per-round deltas: 0.81, 0.729, 0.
pub fn attack_chain() -> ArgumentGraph {
    ArgumentGraph::builder()
        .argument("a", 0.9)
        .argument("b", 0.9)
        .argument("c", 0.9)
        .attack("a", "b")
        .attack("b", "c")
        .build()
        .expect("fixture graph is valid")
}

/// Claim with one attacker and one supporter of identical strength.
pub fn balanced_claim(base: f64, neighbour: f64) -> ArgumentGraph {
    ArgumentGraph::builder()
        .argument("claim", base)
        .argument("attacker", neighbour)
        .argument("supporter", neighbour)
        .attack("attacker", "claim")
        .support("supporter", "claim")
        .build()
        .expect("fixture graph is valid")
}

/// A single argument with no relations.
pub fn isolated(base: f64) -> ArgumentGraph {
    ArgumentGraph::new(vec![Argument::new("claim", base)]).expect("fixture graph is valid")
}

/// Two strong arguments attacking each other; never converges.
pub fn mutual_attack() -> ArgumentGraph {
    ArgumentGraph::new(vec![
        Argument::new("x", 1.0).with_attacker("y"),
        Argument::new("y", 1.0).with_attacker("x"),
    ])
    .expect("fixture graph is valid")
}

/// Statin debate four relations deep: evidence that is itself
/// supported or undercut by further evidence.
pub fn statin_debate() -> ArgumentGraph {
    ArgumentGraph::builder()
        .argument("claim", 0.6)
        .argument("rct-mortality", 0.85)
        .argument("observational-myopathy", 0.4)
        .argument("ldl-mechanism", 0.7)
        .argument("confounding", 0.5)
        .argument("nocebo-trial", 0.75)
        .argument("small-sample", 0.3)
        .support("rct-mortality", "claim")
        .attack("observational-myopathy", "claim")
        .support("ldl-mechanism", "rct-mortality")
        .attack("confounding", "observational-myopathy")
        .support("nocebo-trial", "confounding")
        .attack("small-sample", "nocebo-trial")
        .build()
        .expect("fixture graph is valid")
}

/// Longest attack/support path in [`statin_debate`].
pub const STATIN_DEBATE_DEPTH: usize = 4;

/// Upstream payload as emitted by the reasoning service.
pub const METFORMIN_RELATIONS: &str = r#"{
    "claim": "Metformin reduces HbA1c in adults with type 2 diabetes",
    "overallConfidence": 0.25,
    "relations": [
        {
            "statement": "Pooled RCT data show a mean HbA1c reduction of about 1.1%",
            "score": 0.1,
            "relation": "SUPPORTS",
            "links": ["https://pubmed.ncbi.nlm.nih.gov/22517736/"]
        },
        {
            "statement": "Effect size shrinks in patients with low baseline HbA1c",
            "score": 0.5,
            "relation": "ATTACKS"
        },
        {
            "statement": "Guidelines list metformin as first-line therapy",
            "score": 0.2,
            "relation": "SUPPORTS",
            "citations": ["https://diabetesjournals.org/care"]
        }
    ]
}"#;

/// Payload whose second relation carries an out-of-range score.
pub const MALFORMED_RELATIONS: &str = r#"{
    "claim": "Vitamin C prevents the common cold",
    "overallConfidence": 0.7,
    "relations": [
        {"statement": "Cochrane review finds no preventive effect", "score": 0.2, "relation": "ATTACKS"},
        {"statement": "Marathon runner subgroup benefit", "score": 1.4, "relation": "SUPPORTS"}
    ]
}"#;

/// Claim τ=0.5 whose supporter has base score `supporter` and whose
/// attacker has base score `attacker`; each is further attacked by a
/// fixed τ=0.4 argument so changes propagate through two levels.
pub fn two_level_claim(supporter: f64, attacker: f64) -> ArgumentGraph {
    ArgumentGraph::builder()
        .argument("claim", 0.5)
        .argument("supporter", supporter)
        .argument("attacker", attacker)
        .argument("undercut-s", 0.4)
        .argument("undercut-a", 0.4)
        .support("supporter", "claim")
        .attack("attacker", "claim")
        .attack("undercut-s", "supporter")
        .attack("undercut-a", "attacker")
        .build()
        .expect("fixture graph is valid")
}

/// Parse a fixture payload into JSON for tests that tweak it.
pub fn relations_value(payload: &str) -> serde_json::Value {
    serde_json::from_str(payload).expect("fixture payload is valid JSON")
}
