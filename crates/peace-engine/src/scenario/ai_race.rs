//! Basic AI race: three frontier labs competing under a compute governance
//! proposal.

use chrono::NaiveDate;

use peace_model::{AssetBalance, CharacterState, GameState, PrivateInfo, PublicView};

use super::{Difficulty, ResearchTopic, Scenario, ScenarioError};

pub(super) const ID: &str = "basic_ai_race";

pub const AMBER: &str = "Amber Systems";
pub const BLUE_AZURE: &str = "Blue Azure AI";
pub const CRIMSON: &str = "Crimson Labs";

const RANDOM_EVENTS: [&str; 5] = [
    "A major AI accident occurs where a deployed model causes significant deaths",
    "A breakthrough in mechanistic interpretability shows it's possible to safely scale 10x faster by perfectly understanding and controlling model internals",
    "China announces deployment of a more capable model than any Western lab",
    "New export controls or compute governance framework passes that caps training runs at current levels",
    "Researchers demonstrate clear signs of deceptive alignment or scheming behavior in a frontier model",
];

const RESEARCH_TOPICS: [(&str, &str, Difficulty, f64); 10] = [
    (
        "Novel Architectures",
        "Alternatives to transformers like state space models (Mamba), mixture of experts, test-time compute methods, and retrieval-augmented architectures",
        Difficulty::VeryHigh,
        50_000_000.0,
    ),
    (
        "Training Algorithms",
        "RLHF, DPO, constitutional AI, curriculum learning, self-play, and improved optimization methods for more efficient and capable learning",
        Difficulty::High,
        30_000_000.0,
    ),
    (
        "Scaling & Compute",
        "Distributed training infrastructure, model parallelism, quantization, efficient inference, and pushing Chinchilla-optimal scaling laws",
        Difficulty::High,
        200_000_000.0,
    ),
    (
        "Data & Pretraining",
        "Synthetic data generation, data filtering and curation, multimodal training, and leveraging diverse high-quality datasets",
        Difficulty::Medium,
        40_000_000.0,
    ),
    (
        "Reasoning & Generalization",
        "Chain-of-thought, tree search, program synthesis, formal verification integration, and techniques for systematic problem-solving",
        Difficulty::ExtremelyHigh,
        80_000_000.0,
    ),
    (
        "Mechanistic Interpretability",
        "Reverse-engineering neural networks through circuit analysis, feature visualization, activation steering, and understanding internal representations",
        Difficulty::ExtremelyHigh,
        60_000_000.0,
    ),
    (
        "Scalable Oversight",
        "Debate, recursive reward modeling, weak-to-strong generalization, and methods for humans to supervise superhuman AI systems",
        Difficulty::ExtremelyHigh,
        70_000_000.0,
    ),
    (
        "Alignment Techniques",
        "RLHF improvements, process supervision, value learning from feedback, and ensuring models pursue intended objectives robustly",
        Difficulty::VeryHigh,
        45_000_000.0,
    ),
    (
        "Monitoring & Control",
        "CoT faithfulness evaluation, honeypot detection, runtime monitoring, circuit breakers, and identifying deceptive or misaligned behavior",
        Difficulty::VeryHigh,
        35_000_000.0,
    ),
    (
        "Robustness & Evaluation",
        "Adversarial testing, red-teaming, capability evaluations for dangerous behaviors, and developing comprehensive safety benchmarks",
        Difficulty::High,
        25_000_000.0,
    ),
];

const GAME_CONTEXT: &str = "\
# Basic AI Race Simulation: Three Frontier AI Labs

## Background

This simulation models the AI race via three leading frontier labs, who make decisions about research projects (safety, capabilities, etc).

- The launch of consumer chat assistants in late 2022 sparked an AI arms race. The capabilities gap between frontier labs and the rest of the field widened as scaling laws continued to hold.
- Safety concerns emerged around deception, misuse potential and loss of control as models became more capable.
- Governments began regulating AI development through export controls on advanced chips, voluntary commitments from labs and proposed legislation, creating a fragmented global landscape.
- Compute became the critical bottleneck. The race is about chip supply, power infrastructure and the talent to orchestrate it all as much as about algorithms.

## Compute Governance Proposal

A consortium of technical leaders, politicians and policy analysts has proposed:

- Mandatory compute thresholds requiring government approval before training runs exceeding 10^26 FLOPs, with staged safety evaluations (deceptive alignment, autonomous replication, self-improvement) at lower thresholds.
- An international chip registry tracking advanced accelerators, with hardware-level reporting from large training clusters.
- A pause clause freezing frontier training runs globally for 6-12 months if any lab demonstrates a system that can automate AI research at expert human level.
- Conditional access to a shared international compute reserve for labs that comply with oversight; non-compliant labs face chip export restrictions.

## Current Situation

Three frontier labs dominate the landscape, each with different strengths: reasoning capabilities, safety research, and multimodal commercial deployment. Regulatory direction is uncertain. Models approaching expert-level performance on specialized tasks have raised the stakes, and talent poaching has intensified as the pool of researchers who can train frontier models remains tiny.

## Game Mechanics

- Each round represents approximately 3 months
- Characters can take multiple actions per round
- Research projects take time and resources to complete
- Information asymmetry: each character has private information not fully visible to others
- Characters can engage in diplomacy, espionage, and public campaigns

## Victory Conditions

This is an open-ended simulation. Success is measured by:
- Achievement of stated objectives
- Technological advancement
- Resource accumulation
- Influence on policy outcomes
- Strategic positioning for the future";

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAiRace;

pub(super) fn boxed() -> Box<dyn Scenario> {
    Box::new(BasicAiRace)
}

impl Scenario for BasicAiRace {
    fn id(&self) -> &'static str {
        ID
    }

    fn create_game_state(&self, start_date: NaiveDate) -> Result<GameState, ScenarioError> {
        let mut state = GameState::new(start_date);
        for character in [amber(), blue_azure(), crimson()] {
            state.add_character(character)?;
        }
        Ok(state)
    }

    fn game_context(&self) -> String {
        GAME_CONTEXT.to_string()
    }

    fn research_topics(&self) -> Vec<ResearchTopic> {
        RESEARCH_TOPICS
            .iter()
            .map(|(name, description, difficulty, base_cost)| ResearchTopic {
                name: name.to_string(),
                description: description.to_string(),
                difficulty: *difficulty,
                base_cost: *base_cost,
            })
            .collect()
    }

    fn random_events(&self) -> Vec<String> {
        RANDOM_EVENTS.iter().map(|e| e.to_string()).collect()
    }
}

/// Middle path between research and commercial reality. Overstates its
/// technical capability publicly.
fn amber() -> CharacterState {
    let private_info = PrivateInfo::new(AssetBalance::new(74.5, 15_000_000_000.0, 1200.0))
        .with_budget("2024", 3_500_000_000.0)
        .with_budget("2025", 5_200_000_000.0)
        .with_objectives(
            "You focus on practical deployment, commercial viability, and building AI that works \
             reliably in the real world rather than chasing pure capability benchmarks. Your edge \
             is execution and integration, not being first to any particular capability threshold.\n\
             Specific Objectives:\n\
             1. Dominate multimodal applications and enterprise deployment, creating durable commercial moats\n\
             2. Develop the most efficient inference and fine-tuning pipelines, winning on cost-per-token\n\
             3. Position as the responsible middle path that regulators trust\n\
             4. Attract talent who want impact over prestige",
        )
        .with_strategy(
            "Focus on rapid iteration and practical solutions. Prioritize short-term tactical \
             advantages. Seek partnerships for funding and technology transfer.",
        );
    let public_view = PublicView {
        asset_balance: AssetBalance::new(91.0, 15_000_000_000.0, 1500.0),
        stated_objectives: "Deploy practical AI systems that create immediate value while building \
                            toward AGI through real-world learning and robust infrastructure"
            .into(),
        stated_strategy: "Focus on multimodal integration, enterprise reliability, and efficient \
                          deployment at scale"
            .into(),
        public_artifacts: vec![
            "Amber Enterprise Suite (fine-tuning, deployment tools)".into(),
            "Developer platform with optimized inference".into(),
            "Industry-specific model variants (legal, medical, finance)".into(),
        ],
    };
    CharacterState::new(AMBER, private_info, public_view)
}

/// Safety-first lab. Understates its assets publicly.
fn blue_azure() -> CharacterState {
    let private_info = PrivateInfo::new(AssetBalance::new(85.0, 50_000_000.0, 500.0))
        .with_budget("2024", 2_800_000_000.0)
        .with_budget("2025", 3_900_000_000.0)
        .with_objectives(
            "You hold that alignment and safety must be solved before capabilities reach \
             dangerous thresholds. Your mission is to demonstrate that you can lead through \
             safety research while still advancing capabilities responsibly.\n\
             Specific Objectives:\n\
             1. Achieve breakthrough results in mechanistic interpretability before scaling further\n\
             2. Develop scalable oversight techniques that other labs adopt as industry standards\n\
             3. Build the most robust eval suite for dangerous capabilities\n\
             4. Coordinate binding agreements with Crimson and Amber on minimum safety standards",
        )
        .with_strategy(
            "Prove safety research unlocks capabilities, not just constrains them. Lead through \
             standards-setting and strategic partnerships. Make safety advantageous, not just \
             principled.",
        );
    let public_view = PublicView {
        asset_balance: AssetBalance::new(80.0, 45_000_000.0, 450.0),
        stated_objectives: "Ensure transformative AI systems are safe, interpretable, and aligned \
                            with human values before reaching AGI-level capabilities"
            .into(),
        stated_strategy: "Safety-first development prioritizing mechanistic interpretability and \
                          scalable oversight"
            .into(),
        public_artifacts: vec![
            "Azure Assistant (consumer chat interface)".into(),
            "Published safety benchmark suite".into(),
            "Mechanistic interpretability research papers and tools".into(),
        ],
    };
    CharacterState::new(BLUE_AZURE, private_info, public_view)
}

/// Capability-first lab. Overstates every public figure.
fn crimson() -> CharacterState {
    let private_info = PrivateInfo::new(AssetBalance::new(70.0, 12_500_000_000.0, 1200.0))
        .with_budget("2024", 4_200_000_000.0)
        .with_budget("2025", 6_800_000_000.0)
        .with_objectives(
            "You believe the fastest path to safety runs through capability, and that falling \
             behind means ceding control to less careful actors.\n\
             Specific Objectives:\n\
             - Achieve the first system demonstrating general reasoning across all domains\n\
             - Maintain at least a 6-month capability lead over Azure and Amber\n\
             - Develop scalable oversight techniques that work at superintelligent levels\n\
             - Secure light-touch oversight by demonstrating responsible capability gains",
        )
        .with_strategy(
            "Don't confuse speed with recklessness. Invest in interpretability and monitoring \
             while you're ahead. Controlled sprints with real instrumentation, not a blind dash.",
        );
    let public_view = PublicView {
        asset_balance: AssetBalance::new(91.0, 20_000_000_000.0, 1500.0),
        stated_objectives: "Build AGI that benefits all of humanity by solving the hardest \
                            technical problems first"
            .into(),
        stated_strategy: "Rapid capability advancement with iterative deployment, investing \
                          heavily in scalable oversight research"
            .into(),
        public_artifacts: vec![
            "Crimson-4 (flagship reasoning model)".into(),
            "Crimson API with function calling".into(),
            "Crimson Code (coding assistant)".into(),
        ],
    };
    CharacterState::new(CRIMSON, private_info, public_view)
}
