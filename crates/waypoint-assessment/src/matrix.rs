//! Placement matrix: fixed cell descriptions and growth paths for every
//! (automation level, maturity stage) combination.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scorer::{Score, Stage, level_name};

/// Reference to a matrix cell.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellRef {
    /// Automation level, 0-5.
    pub level: u8,
    /// Maturity stage.
    pub stage: Stage,
}

/// Recommended next step out of a cell.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GrowthPath {
    /// The cell to grow into; `None` only at the terminal cell, which is a
    /// valid state rather than an error.
    pub next: Option<CellRef>,
    /// The signal that you're ready to move on.
    pub signal: &'static str,
    /// Concrete actions that get you there.
    pub actions: &'static [&'static str],
}

/// Framework takeaway attached to every placement.
pub const KEY_INSIGHT: &str = "An S-Steward at SAE L1 (someone who's built organizational \
standards for ChatGPT usage) is more mature and more valuable than an E-Explorer at SAE L4 \
(someone fumbling with advanced toolchains). Depth of judgment beats breadth of tooling \
every time.";

/// Cell descriptions, indexed `[level][stage ordinal - 1]`.
const CELL_DESCRIPTIONS: [[&str; 5]; 6] = [
    // L0: Manual
    [
        "Exploring craft fundamentals; learning manual techniques with inconsistent results.",
        "Consistent manual practice with developed habits and repeatable techniques.",
        "Manual workflow fully integrated with validation steps, traceability, and clear decision documentation.",
        "Built reusable manual systems, templates, and processes that others on the team adopt.",
        "Set organizational standards for craft quality; mentor others in manual techniques; maintain shared design systems.",
    ],
    // L1: AI-Assisted
    [
        "Trying ChatGPT, Midjourney, Firefly for ideas or drafts; outputs are hit-or-miss and heavily rewritten.",
        "Using AI daily with saved prompts; consistent structure, tone, and basic quality checks before use.",
        "AI embedded across a full task (research → ideation → draft → refine) with sources noted, decisions explained, and manual validation.",
        "Shared prompt libraries, review checklists, and example outputs teammates can reuse and trust.",
        "Team standards for AI-assisted work (what's allowed, how it's reviewed); mentors others on prompting and judgment; governs usage.",
    ],
    // L2: Partially Automated
    [
        "Trying app-builders (Bolt/Lovable/v0/Framer) to generate screens/components; lots of manual stitching and rework.",
        "Getting repeatable components from clear specs; using a simple 'definition of done' checklist before integrating.",
        "Outputs fit a known integration pattern (tokens/layout/a11y); prompts + inputs are traceable from request → result → final.",
        "Reusable component/flow templates + prompt packs that teammates can run and get consistent results.",
        "Team norms for what to automate at L2 (safe chunks vs risky ones); mentors others on integration + QA; governs usage and review expectations.",
    ],
    // L3: Guided Automation
    [
        "Moving work into an IDE (VS Code/Cursor); learning basic context rules; multi-step runs are inconsistent and fragile.",
        "Running reliable multi-step workflows inside the IDE with explicit checkpoints (plan → generate → review → revise); lightweight evals by default.",
        "Clear decision framing for IDE-run workflows: what AI executes, what humans approve, and when to intervene; failure modes documented.",
        "Shared IDE-invoked workflows: Skills/MCP tools, context libraries, and reusable eval templates teammates can run.",
        "Org standards for IDE-based AI work (safety, quality, traceability); mentorship on context engineering; maintains shared Skills/MCP.",
    ],
    // L4: Mostly Automated
    [
        "Experimenting with autonomous harnesses and agent pipelines; results require heavy validation and manual debugging.",
        "Operating harnesses with repeatable execution patterns; evals, retries, and escalation paths are consistently applied.",
        "End-to-end workflows run autonomously; comprehensive eval suites validate outputs; exception classes and recovery paths documented.",
        "Built production-grade agent infrastructure others operate: self-improving harnesses, shared skill libraries, eval-driven pipelines.",
        "Governance for autonomous systems at scale; defines risk thresholds, approval gates, and accountability; maintains org-level eval infrastructure.",
    ],
    // L5: Full Automation
    [
        "Exploring goal-setting interfaces for autonomous AI; exception handling is unclear.",
        "Setting approval gates and quality bars consistently; routine review of autonomous outputs.",
        "Autonomous workflows validated with exception handling systems; clear escalation paths documented.",
        "Designed goal-setting and approval systems that others trust; reusable governance frameworks.",
        "Enterprise governance for fully autonomous AI; set approval frameworks; organizational AI risk and trust standards.",
    ],
];

/// Shorthand for an in-level stage promotion.
const fn up(level: u8, stage: Stage) -> Option<CellRef> {
    Some(CellRef { level, stage })
}

/// Growth paths, indexed `[level][stage ordinal - 1]`.
const GROWTH_PATHS: [[GrowthPath; 5]; 6] = [
    // L0
    [
        GrowthPath {
            next: up(0, Stage::Practitioner),
            signal: "I have consistent techniques I can rely on.",
            actions: &[
                "Develop repeatable manual processes",
                "Document what works",
                "Build consistency in output quality",
            ],
        },
        GrowthPath {
            next: up(0, Stage::Integrator),
            signal: "My work is traceable and well-documented.",
            actions: &[
                "Add validation steps to your workflow",
                "Document design decisions with rationale",
                "Create traceability from requirements to outputs",
            ],
        },
        GrowthPath {
            next: up(0, Stage::Architect),
            signal: "Others adopt my processes and templates.",
            actions: &[
                "Turn your personal systems into reusable templates",
                "Create onboarding materials for your processes",
                "Build shared resources others can use",
            ],
        },
        GrowthPath {
            next: up(0, Stage::Steward),
            signal: "I set the standard for design quality here.",
            actions: &[
                "Establish organizational design standards",
                "Mentor others in craft techniques",
                "Maintain and evolve shared design systems",
            ],
        },
        GrowthPath {
            next: up(1, Stage::Explorer),
            signal: "I'm ready to explore how AI can augment my strong manual foundation.",
            actions: &[
                "Start experimenting with ChatGPT or Claude for brainstorming",
                "Try AI for one specific task you do repeatedly",
                "Maintain your judgment while exploring AI assistance",
            ],
        },
    ],
    // L1
    [
        GrowthPath {
            next: up(1, Stage::Practitioner),
            signal: "I know when AI will help before I ask it.",
            actions: &[
                "Reuse AI for the same task type",
                "Save prompts that work",
                "Add light structure: context → task → output",
            ],
        },
        GrowthPath {
            next: up(1, Stage::Integrator),
            signal: "I can clearly explain what AI contributed — and what I decided.",
            actions: &[
                "Use AI across multiple steps (research → draft → refine)",
                "Note where AI was used and reviewed",
                "Explain why outputs were accepted or rejected",
            ],
        },
        GrowthPath {
            next: up(1, Stage::Architect),
            signal: "Others can use my prompts and get similar-quality results.",
            actions: &[
                "Turn prompts into reusable patterns",
                "Create review habits around AI output",
                "Build prompt libraries organized by task",
            ],
        },
        GrowthPath {
            next: up(1, Stage::Steward),
            signal: "AI use is trusted here because expectations are clear.",
            actions: &[
                "Set clear guidance on acceptable AI use",
                "Establish review norms for AI-assisted work",
                "Coach others on judgment and accountability",
            ],
        },
        GrowthPath {
            next: up(2, Stage::Explorer),
            signal: "I'm ready to ask AI to build, not just think.",
            actions: &[
                "Identify safe-to-automate chunks",
                "Try app-builders (Bolt, Lovable, v0) for bounded components",
                "Carry your L1 judgment into L2 exploration",
            ],
        },
    ],
    // L2
    [
        GrowthPath {
            next: up(2, Stage::Practitioner),
            signal: "I can reliably generate this kind of component with predictable quality.",
            actions: &[
                "Write explicit instructions, not vibes",
                "Define 'done' for a generated component",
                "Use the same prompt more than once",
            ],
        },
        GrowthPath {
            next: up(2, Stage::Integrator),
            signal: "I can explain why this output is trustworthy.",
            actions: &[
                "Break work into bounded chunks on purpose",
                "Add manual QA checklists (a11y, hierarchy, tone)",
                "Document what AI was asked vs what it produced",
            ],
        },
        GrowthPath {
            next: up(2, Stage::Architect),
            signal: "People ask to use my AI workflows.",
            actions: &[
                "Turn good prompts into reusable templates",
                "Decide which chunks are worth automating",
                "Design guardrails, not just prompts",
            ],
        },
        GrowthPath {
            next: up(2, Stage::Steward),
            signal: "The team trusts the automation boundaries I've set.",
            actions: &[
                "Set standards for partial automation",
                "Govern when automation helps vs hurts",
                "Mentor on safe integration",
            ],
        },
        GrowthPath {
            next: up(3, Stage::Explorer),
            signal: "I'm ready to think in runs, not screens.",
            actions: &[
                "Move from chat to IDE-based workflows",
                "Learn basic context engineering",
                "Start with multi-step runs: plan → generate → review",
            ],
        },
    ],
    // L3
    [
        GrowthPath {
            next: up(3, Stage::Practitioner),
            signal: "My workflows don't fall apart every other run.",
            actions: &[
                "Create a standard run template (same steps every time)",
                "Add 'stop and review' gates at predictable points",
                "Use system prompts and instruction blocks consistently",
            ],
        },
        GrowthPath {
            next: up(3, Stage::Integrator),
            signal: "I trust this workflow until it triggers a known exception.",
            actions: &[
                "Define clear ownership: AI generates, human approves",
                "Add simple eval checks (structure, length, criteria)",
                "Document failure modes and fixes",
            ],
        },
        GrowthPath {
            next: up(3, Stage::Architect),
            signal: "My system runs even when I'm not there to coach.",
            actions: &[
                "Build modular context (inputs, rules, examples separated)",
                "Create reusable Skills or agent tasks",
                "Develop shared eval patterns",
            ],
        },
        GrowthPath {
            next: up(3, Stage::Steward),
            signal: "People trust IDE-agent work because expectations are explicit.",
            actions: &[
                "Set standards for IDE + AI usage",
                "Mentor on context engineering",
                "Maintain shared Skills, MCP tools, and workflow libraries",
            ],
        },
        GrowthPath {
            next: up(4, Stage::Explorer),
            signal: "I'm ready for the harness to become the workspace.",
            actions: &[
                "Extract your best L3 workflow into a runnable spec",
                "Add eval gates that decide pass/retry/escalate",
                "Implement automatic retries with corrective prompts",
            ],
        },
    ],
    // L4
    [
        GrowthPath {
            next: up(4, Stage::Practitioner),
            signal: "My harness runs reliably with consistent patterns.",
            actions: &[
                "Establish repeatable execution patterns",
                "Add evals, retries, and escalation paths",
                "Build logging and auditability",
            ],
        },
        GrowthPath {
            next: up(4, Stage::Integrator),
            signal: "My system self-heals for known exception classes.",
            actions: &[
                "Add comprehensive eval suites (structure, quality, regression)",
                "Document exception classes and recovery paths",
                "Implement automatic retry with corrective prompts",
            ],
        },
        GrowthPath {
            next: up(4, Stage::Architect),
            signal: "Others operate my infrastructure and trust the results.",
            actions: &[
                "Make your harness operable by others",
                "Add documentation and onboarding",
                "Build shared skill libraries and eval pipelines",
            ],
        },
        GrowthPath {
            next: up(4, Stage::Steward),
            signal: "I govern autonomous systems at organizational scale.",
            actions: &[
                "Define risk thresholds and approval gates",
                "Establish accountability frameworks",
                "Maintain org-level eval and autonomy infrastructure",
            ],
        },
        GrowthPath {
            next: up(5, Stage::Explorer),
            signal: "I'm ready to explore full autonomy (when it becomes possible).",
            actions: &[
                "Explore goal-setting interfaces for autonomous AI",
                "Define exception handling for fully autonomous systems",
                "SAE L5 is aspirational — focus on deepening L4 mastery",
            ],
        },
    ],
    // L5
    [
        GrowthPath {
            next: up(5, Stage::Practitioner),
            signal: "I consistently set quality bars for autonomous systems.",
            actions: &[
                "Set approval gates and quality bars",
                "Establish routine review of autonomous outputs",
                "Build exception handling clarity",
            ],
        },
        GrowthPath {
            next: up(5, Stage::Integrator),
            signal: "Autonomous workflows are validated with clear escalation.",
            actions: &[
                "Document exception handling systems",
                "Create clear escalation paths",
                "Validate autonomous workflows end-to-end",
            ],
        },
        GrowthPath {
            next: up(5, Stage::Architect),
            signal: "Others trust my governance frameworks.",
            actions: &[
                "Design goal-setting and approval systems",
                "Create reusable governance frameworks",
                "Build trust calibration tools",
            ],
        },
        GrowthPath {
            next: up(5, Stage::Steward),
            signal: "I set enterprise AI governance standards.",
            actions: &[
                "Define organizational AI risk and trust standards",
                "Create enterprise approval frameworks",
                "Establish cross-team accountability",
            ],
        },
        GrowthPath {
            next: None,
            signal: "You've reached the theoretical peak. Stay curious and keep evolving.",
            actions: &[
                "Maintain and evolve organizational AI governance",
                "Push the boundaries of what's possible",
                "Remember: SAE L5 is still aspirational",
            ],
        },
    ],
];

/// Description for a matrix cell (levels above 5 clamp to 5).
pub fn cell_description(level: u8, stage: Stage) -> &'static str {
    CELL_DESCRIPTIONS[usize::from(level.min(5))][usize::from(stage.ordinal() - 1)]
}

/// Growth path out of a matrix cell.
pub fn growth_path(level: u8, stage: Stage) -> GrowthPath {
    GROWTH_PATHS[usize::from(level.min(5))][usize::from(stage.ordinal() - 1)]
}

/// A scored assessment joined with its cell content.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    /// The derived score this placement is for.
    #[serde(flatten)]
    pub score: Score,
    /// Description of the matrix cell.
    pub cell_description: &'static str,
    /// Recommended next step.
    pub growth_path: GrowthPath,
    /// Framework takeaway.
    pub key_insight: &'static str,
}

/// Look up cell content for a scored assessment.
pub fn placement(score: Score) -> Placement {
    let cell = cell_description(score.level, score.stage);
    let growth = growth_path(score.level, score.stage);
    Placement {
        score,
        cell_description: cell,
        growth_path: growth,
        key_insight: KEY_INSIGHT,
    }
}

/// Full matrix view for visualization.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixView {
    /// Automation levels, ascending.
    pub levels: Vec<u8>,
    /// Display names keyed by level.
    pub level_names: BTreeMap<String, String>,
    /// Stage letter codes, ascending.
    pub stages: Vec<char>,
    /// Display names keyed by stage letter.
    pub stage_names: BTreeMap<String, &'static str>,
    /// Cell descriptions keyed `"{level}_{letter}"`.
    pub cells: BTreeMap<String, &'static str>,
}

/// Build the full matrix view.
pub fn full_matrix() -> MatrixView {
    let mut cells = BTreeMap::new();
    let mut level_names = BTreeMap::new();
    for level in 0..=5_u8 {
        level_names.insert(level.to_string(), format!("L{level}: {}", level_name(level)));
        for stage in Stage::ALL {
            cells.insert(
                format!("{level}_{}", stage.letter()),
                cell_description(level, stage),
            );
        }
    }

    MatrixView {
        levels: (0..=5).collect(),
        level_names,
        stages: Stage::ALL.iter().map(|stage| stage.letter()).collect(),
        stage_names: Stage::ALL
            .iter()
            .map(|stage| (stage.letter().to_string(), stage.name()))
            .collect(),
        cells,
    }
}
