//! Static questionnaire definitions.
//!
//! Six level-identification questions apply to everyone; each automation
//! level then has its own set of five maturity questions, selected by the
//! level computed in scoring stage 1.

use serde::Serialize;

use crate::scorer::Stage;

/// An answer option for a level-identification question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelOption {
    /// Automation level this option maps to.
    pub level: u8,
    /// Option text shown to the user.
    pub text: &'static str,
}

/// A level-identification question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelQuestion {
    /// Stable question id used in answer maps.
    pub id: &'static str,
    /// Question text.
    pub prompt: &'static str,
    /// One option per automation level.
    pub options: &'static [LevelOption],
}

/// An answer option for a maturity question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageOption {
    /// Maturity stage this option maps to.
    pub stage: Stage,
    /// Option text shown to the user.
    pub text: &'static str,
}

/// A maturity question, specific to one automation level.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageQuestion {
    /// Stable question id used in answer maps.
    pub id: &'static str,
    /// Maturity dimension the question probes.
    pub dimension: &'static str,
    /// Question text.
    pub prompt: &'static str,
    /// One option per maturity stage.
    pub options: &'static [StageOption],
}

/// All level-identification questions.
pub fn level_questions() -> &'static [LevelQuestion] {
    LEVEL_QUESTIONS
}

/// Maturity questions for a specific automation level.
///
/// Unknown levels fall back to the level 1 set.
pub fn stage_questions(level: u8) -> &'static [StageQuestion] {
    match level {
        0 => STAGE_QUESTIONS_L0,
        2 => STAGE_QUESTIONS_L2,
        3 => STAGE_QUESTIONS_L3,
        4 => STAGE_QUESTIONS_L4,
        5 => STAGE_QUESTIONS_L5,
        _ => STAGE_QUESTIONS_L1,
    }
}

const LEVEL_QUESTIONS: &[LevelQuestion] = &[
    LevelQuestion {
        id: "auto_tools",
        prompt: "Which best describes the AI tools in your design workflow?",
        options: &[
            LevelOption { level: 0, text: "I don't use AI tools — all my design work is manual." },
            LevelOption { level: 1, text: "I use ChatGPT or Midjourney for ideas and drafts, but I direct every step." },
            LevelOption { level: 2, text: "I use app-builders (Bolt, v0, Framer) to generate screens or components from specs." },
            LevelOption { level: 3, text: "I work in an IDE with multi-step AI workflows, checkpoints, and context engineering." },
            LevelOption { level: 4, text: "I run automated agent harnesses with eval suites that execute autonomously." },
            LevelOption { level: 5, text: "AI runs most of my workflow — I set goals and review exceptions." },
        ],
    },
    LevelQuestion {
        id: "auto_qa",
        prompt: "How do you quality-check AI outputs?",
        options: &[
            LevelOption { level: 0, text: "N/A — I don't use AI in my work." },
            LevelOption { level: 1, text: "I manually review and heavily rewrite everything AI produces." },
            LevelOption { level: 2, text: "I run a checklist (design-system fit, accessibility, tone) before integrating AI output." },
            LevelOption { level: 3, text: "I have lightweight evals and explicit review gates in my workflows." },
            LevelOption { level: 4, text: "Automated eval suites decide pass, retry, or escalate without my input." },
            LevelOption { level: 5, text: "Self-correcting systems handle QA — I only review flagged exceptions." },
        ],
    },
    LevelQuestion {
        id: "auto_laptop",
        prompt: "What happens when you close your laptop?",
        options: &[
            LevelOption { level: 0, text: "All work stops — everything is manual." },
            LevelOption { level: 1, text: "All work stops — AI only runs when I'm actively prompting." },
            LevelOption { level: 2, text: "All work stops — I manually assemble generated pieces later." },
            LevelOption { level: 3, text: "All work stops — my IDE workflows only run while I'm present." },
            LevelOption { level: 4, text: "Work continues — my harnesses run, eval, and retry autonomously." },
            LevelOption { level: 5, text: "Work continues indefinitely — I'm only needed for exceptions." },
        ],
    },
    LevelQuestion {
        id: "auto_prompting",
        prompt: "How do you instruct AI?",
        options: &[
            LevelOption { level: 0, text: "I don't write prompts for AI." },
            LevelOption { level: 1, text: "I write ad-hoc prompts and iterate until the output looks right." },
            LevelOption { level: 2, text: "I write structured prompts with context, constraints, and output format." },
            LevelOption { level: 3, text: "I engineer context blocks (system prompts, rules, examples) for multi-step workflows." },
            LevelOption { level: 4, text: "I build harness configs with eval gates, retry logic, and corrective prompts." },
            LevelOption { level: 5, text: "I set high-level goals — the system manages its own prompting." },
        ],
    },
    LevelQuestion {
        id: "auto_outputs",
        prompt: "What kind of design artifacts does AI help you produce?",
        options: &[
            LevelOption { level: 0, text: "None — I produce everything manually." },
            LevelOption { level: 1, text: "Ideas, copy drafts, and visual concepts that I heavily refine." },
            LevelOption { level: 2, text: "Usable screens, components, and small flows from clear specs." },
            LevelOption { level: 3, text: "Large features via orchestrated multi-step workflows with human QA checkpoints." },
            LevelOption { level: 4, text: "End-to-end features that are generated, tested, and QA'd automatically." },
            LevelOption { level: 5, text: "Complete products with autonomous iteration and self-correction." },
        ],
    },
    LevelQuestion {
        id: "auto_reuse",
        prompt: "How reusable are your AI workflows?",
        options: &[
            LevelOption { level: 0, text: "N/A — I don't use AI workflows." },
            LevelOption { level: 1, text: "I save some prompts and reuse them occasionally." },
            LevelOption { level: 2, text: "I have reusable prompt templates with context and constraints sections." },
            LevelOption { level: 3, text: "I maintain shared workflow scripts and context libraries." },
            LevelOption { level: 4, text: "I maintain production-grade agent infrastructure others operate." },
            LevelOption { level: 5, text: "Self-improving harnesses that evolve with usage data." },
        ],
    },
];

const STAGE_QUESTIONS_L0: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l0_craft",
        dimension: "craft_maturity",
        prompt: "How would you describe your manual design craft?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I'm exploring fundamentals — my quality varies and I need guidance." },
            StageOption { stage: Stage::Practitioner, text: "I have consistent practice with repeatable techniques and habits." },
            StageOption { stage: Stage::Integrator, text: "My workflow includes validation steps and clear decision documentation." },
            StageOption { stage: Stage::Architect, text: "I've built reusable templates and processes that my team adopts." },
            StageOption { stage: Stage::Steward, text: "I set organizational standards for craft quality and mentor others." },
        ],
    },
    StageQuestion {
        id: "stage_l0_consistency",
        dimension: "consistency",
        prompt: "How consistent is the quality of your design outputs?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Inconsistent — some work is great, some needs heavy revision." },
            StageOption { stage: Stage::Practitioner, text: "Reliably good — I follow a process that keeps quality steady." },
            StageOption { stage: Stage::Integrator, text: "Consistently high with documented rationale for every decision." },
            StageOption { stage: Stage::Architect, text: "Others using my templates achieve similar quality independently." },
            StageOption { stage: Stage::Steward, text: "I define and maintain quality standards for the organization." },
        ],
    },
    StageQuestion {
        id: "stage_l0_documentation",
        dimension: "documentation",
        prompt: "How do you document your design decisions?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Rarely — decisions live in my head." },
            StageOption { stage: Stage::Practitioner, text: "I keep notes on what worked for my own reference." },
            StageOption { stage: Stage::Integrator, text: "I document decisions with rationale so they're traceable and reviewable." },
            StageOption { stage: Stage::Architect, text: "I've created documentation frameworks others use for their decisions." },
            StageOption { stage: Stage::Steward, text: "I maintain organizational standards for design documentation." },
        ],
    },
    StageQuestion {
        id: "stage_l0_sharing",
        dimension: "knowledge_sharing",
        prompt: "How do you share your design knowledge?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I mostly learn from others and haven't started sharing." },
            StageOption { stage: Stage::Practitioner, text: "I share tips and techniques informally with teammates." },
            StageOption { stage: Stage::Integrator, text: "I contribute to team knowledge bases and design reviews." },
            StageOption { stage: Stage::Architect, text: "I've built reusable assets (templates, systems) others rely on." },
            StageOption { stage: Stage::Steward, text: "I run training, set standards, and mentor across the organization." },
        ],
    },
    StageQuestion {
        id: "stage_l0_process",
        dimension: "process_maturity",
        prompt: "How structured is your design process?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Mostly ad-hoc — I figure it out as I go." },
            StageOption { stage: Stage::Practitioner, text: "I follow a repeatable process with defined steps." },
            StageOption { stage: Stage::Integrator, text: "My process is integrated end-to-end with product development." },
            StageOption { stage: Stage::Architect, text: "I've designed processes that entire teams follow." },
            StageOption { stage: Stage::Steward, text: "I maintain and evolve organizational design processes." },
        ],
    },
];

const STAGE_QUESTIONS_L1: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l1_consistency",
        dimension: "output_consistency",
        prompt: "How consistent are your AI-assisted design outputs?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Hit-or-miss — I try things and see what happens." },
            StageOption { stage: Stage::Practitioner, text: "Predictable — I know what to expect from my saved prompts." },
            StageOption { stage: Stage::Integrator, text: "Reliable across full tasks: research → ideation → draft → refine." },
            StageOption { stage: Stage::Architect, text: "Others reuse my prompt libraries and get similar-quality results." },
            StageOption { stage: Stage::Steward, text: "I set the quality standard for AI-assisted work that the team follows." },
        ],
    },
    StageQuestion {
        id: "stage_l1_judgment",
        dimension: "ai_judgment",
        prompt: "How well do you know when AI helps versus hurts?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Still figuring out what AI is good at versus poor at." },
            StageOption { stage: Stage::Practitioner, text: "I know when AI will help before I ask it." },
            StageOption { stage: Stage::Integrator, text: "I can clearly explain what AI contributed versus what I decided." },
            StageOption { stage: Stage::Architect, text: "I've documented AI usage guidelines for the team." },
            StageOption { stage: Stage::Steward, text: "I set organizational policy on acceptable AI use." },
        ],
    },
    StageQuestion {
        id: "stage_l1_prompts",
        dimension: "prompt_maturity",
        prompt: "How do you manage your prompts?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I write new prompts each time — nothing is saved." },
            StageOption { stage: Stage::Practitioner, text: "I save and reuse structured prompts (context → task → output)." },
            StageOption { stage: Stage::Integrator, text: "I use prompts intentionally across multi-step tasks with sources noted." },
            StageOption { stage: Stage::Architect, text: "I maintain prompt libraries organized by task type with review checklists." },
            StageOption { stage: Stage::Steward, text: "I govern prompt standards and train others on prompting judgment." },
        ],
    },
    StageQuestion {
        id: "stage_l1_accountability",
        dimension: "accountability",
        prompt: "How do you handle accountability for AI-generated work?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I don't think much about it — I use what looks good." },
            StageOption { stage: Stage::Practitioner, text: "I always manually verify before using AI output." },
            StageOption { stage: Stage::Integrator, text: "I note where AI was used and why outputs were accepted or rejected." },
            StageOption { stage: Stage::Architect, text: "I've created example libraries showing good versus risky AI outputs." },
            StageOption { stage: Stage::Steward, text: "I set review norms and governance for AI-assisted work." },
        ],
    },
    StageQuestion {
        id: "stage_l1_teaching",
        dimension: "knowledge_transfer",
        prompt: "How do you help others learn to use AI in design?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I'm still learning myself." },
            StageOption { stage: Stage::Practitioner, text: "I share tips and tricks that work for me." },
            StageOption { stage: Stage::Integrator, text: "I demonstrate full AI-assisted workflows with clear rationale." },
            StageOption { stage: Stage::Architect, text: "Others routinely ask to use my AI workflows and libraries." },
            StageOption { stage: Stage::Steward, text: "I mentor designers on AI judgment and maintain shared systems." },
        ],
    },
];

const STAGE_QUESTIONS_L2: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l2_specs",
        dimension: "specification_quality",
        prompt: "How clear are the specs you give AI app-builders?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Vague — lots of manual stitching and rework needed." },
            StageOption { stage: Stage::Practitioner, text: "Clear enough for repeatable components with a definition-of-done checklist." },
            StageOption { stage: Stage::Integrator, text: "Outputs fit known patterns (tokens, layout, a11y) and prompts are traceable." },
            StageOption { stage: Stage::Architect, text: "I've created reusable component generators teammates run consistently." },
            StageOption { stage: Stage::Steward, text: "I set team norms for what to automate and how to review generated output." },
        ],
    },
    StageQuestion {
        id: "stage_l2_integration",
        dimension: "integration",
        prompt: "How do you integrate AI-generated components?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Copy-paste and heavily modify by hand." },
            StageOption { stage: Stage::Practitioner, text: "I check design-system fit, accessibility, and tone before integrating." },
            StageOption { stage: Stage::Integrator, text: "I have repeatable integration patterns with explicit handoff notes." },
            StageOption { stage: Stage::Architect, text: "I've built generate-check-refine bundles others use." },
            StageOption { stage: Stage::Steward, text: "I govern which chunks are safe to automate and set review expectations." },
        ],
    },
    StageQuestion {
        id: "stage_l2_chunking",
        dimension: "work_decomposition",
        prompt: "How do you decide what to ask AI to build?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I try generating whole pages and see what comes out." },
            StageOption { stage: Stage::Practitioner, text: "I know which bounded units (buttons, forms, cards) AI handles well." },
            StageOption { stage: Stage::Integrator, text: "I break work into safe-to-automate chunks with clear inputs and done criteria." },
            StageOption { stage: Stage::Architect, text: "I've created component-specific generators for common patterns." },
            StageOption { stage: Stage::Steward, text: "I decide which work types the team automates versus does manually." },
        ],
    },
    StageQuestion {
        id: "stage_l2_quality",
        dimension: "quality_assurance",
        prompt: "How do you ensure quality of AI-generated output?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Visual inspection and gut feel." },
            StageOption { stage: Stage::Practitioner, text: "A checklist: design-system fit, accessibility, tone." },
            StageOption { stage: Stage::Integrator, text: "Documented QA process with traceability from request to final." },
            StageOption { stage: Stage::Architect, text: "Shared QA bundles with prompt templates for consistent review." },
            StageOption { stage: Stage::Steward, text: "I set and maintain review standards for all AI-generated UI." },
        ],
    },
    StageQuestion {
        id: "stage_l2_reuse",
        dimension: "reusability",
        prompt: "How reusable are your AI generation workflows?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I start fresh each time with new prompts." },
            StageOption { stage: Stage::Practitioner, text: "I reuse prompt templates and expect similar quality each run." },
            StageOption { stage: Stage::Integrator, text: "I maintain prompt libraries organized by component type." },
            StageOption { stage: Stage::Architect, text: "Others rely on my shared libraries for generation." },
            StageOption { stage: Stage::Steward, text: "I maintain and govern team-wide generation standards." },
        ],
    },
];

const STAGE_QUESTIONS_L3: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l3_reliability",
        dimension: "workflow_reliability",
        prompt: "How reliable are your multi-step AI workflows?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Inconsistent and fragile — multi-step runs break often." },
            StageOption { stage: Stage::Practitioner, text: "Reliable with checkpoints: plan → generate → review → revise." },
            StageOption { stage: Stage::Integrator, text: "Clear framing: what AI executes, what humans approve, when to intervene." },
            StageOption { stage: Stage::Architect, text: "Others run my workflows and get comparable quality without coaching." },
            StageOption { stage: Stage::Steward, text: "I set org standards for IDE-based AI work (safety, quality, traceability)." },
        ],
    },
    StageQuestion {
        id: "stage_l3_context",
        dimension: "context_engineering",
        prompt: "How sophisticated is your context engineering?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Learning basic context rules — mostly trial and error." },
            StageOption { stage: Stage::Practitioner, text: "I use system prompts, instruction blocks, and explicit review moments." },
            StageOption { stage: Stage::Integrator, text: "I have lightweight evals and documented failure modes." },
            StageOption { stage: Stage::Architect, text: "I maintain modular context libraries (brand voice, design system, constraints)." },
            StageOption { stage: Stage::Steward, text: "I mentor others on context engineering and maintain shared tools." },
        ],
    },
    StageQuestion {
        id: "stage_l3_failures",
        dimension: "failure_handling",
        prompt: "How do you handle workflow failures?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I start over or try different prompts until something works." },
            StageOption { stage: Stage::Practitioner, text: "I have retry patterns and know the common failure modes." },
            StageOption { stage: Stage::Integrator, text: "I've documented failure taxonomy and escalation triggers." },
            StageOption { stage: Stage::Architect, text: "My workflows have built-in exception handling teammates understand." },
            StageOption { stage: Stage::Steward, text: "I define organizational standards for failure handling and risk." },
        ],
    },
    StageQuestion {
        id: "stage_l3_tooling",
        dimension: "tooling",
        prompt: "What kind of IDE/AI tooling do you use?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Basic IDE with a copilot — still learning to use it effectively." },
            StageOption { stage: Stage::Practitioner, text: "IDE with MCP tools and a stable run-loop template." },
            StageOption { stage: Stage::Integrator, text: "IDE with structured evals, approval gates, and ownership boundaries." },
            StageOption { stage: Stage::Architect, text: "Reusable workflow scripts and context libraries teams can invoke." },
            StageOption { stage: Stage::Steward, text: "I maintain shared IDE/AI infrastructure and govern tool access." },
        ],
    },
    StageQuestion {
        id: "stage_l3_ownership",
        dimension: "decision_ownership",
        prompt: "How clear is the division of work between you and AI?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Blurry — I'm not always sure what AI decided versus what I decided." },
            StageOption { stage: Stage::Practitioner, text: "Clear — I know my checkpoints and what I'm responsible for." },
            StageOption { stage: Stage::Integrator, text: "Explicitly defined: AI generates, human approves, with documented handoffs." },
            StageOption { stage: Stage::Architect, text: "My team follows the same decision framework with clear roles." },
            StageOption { stage: Stage::Steward, text: "I set organizational norms for human-AI decision boundaries." },
        ],
    },
];

const STAGE_QUESTIONS_L4: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l4_harness",
        dimension: "harness_maturity",
        prompt: "How mature are your autonomous AI harnesses?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Experimenting with agent pipelines — results need heavy validation." },
            StageOption { stage: Stage::Practitioner, text: "Operating harnesses with repeatable execution, evals, and retries." },
            StageOption { stage: Stage::Integrator, text: "End-to-end workflows run autonomously with comprehensive eval suites." },
            StageOption { stage: Stage::Architect, text: "I've built production-grade agent infrastructure others operate." },
            StageOption { stage: Stage::Steward, text: "I define governance for autonomous systems at scale." },
        ],
    },
    StageQuestion {
        id: "stage_l4_evals",
        dimension: "evaluation",
        prompt: "How do your evaluation systems work?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Manual review of agent outputs after each run." },
            StageOption { stage: Stage::Practitioner, text: "Automated pass/fail gates with manual escalation for edge cases." },
            StageOption { stage: Stage::Integrator, text: "Comprehensive eval suites with structure, quality, and regression gates." },
            StageOption { stage: Stage::Architect, text: "Self-improving eval pipelines with eval-driven development." },
            StageOption { stage: Stage::Steward, text: "I maintain org-level eval infrastructure and define risk thresholds." },
        ],
    },
    StageQuestion {
        id: "stage_l4_autonomy",
        dimension: "system_autonomy",
        prompt: "How autonomous are your AI systems?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Semi-autonomous — I still check in frequently and debug manually." },
            StageOption { stage: Stage::Practitioner, text: "Run reliably with escalation paths — I handle exceptions." },
            StageOption { stage: Stage::Integrator, text: "Exception classes and recovery paths are documented; the system self-heals." },
            StageOption { stage: Stage::Architect, text: "Others operate my systems and interpret failures independently." },
            StageOption { stage: Stage::Steward, text: "I define accountability and approval frameworks for autonomous AI." },
        ],
    },
    StageQuestion {
        id: "stage_l4_infrastructure",
        dimension: "shared_infra",
        prompt: "How do others interact with your AI infrastructure?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "It's personal tooling — only I use it." },
            StageOption { stage: Stage::Practitioner, text: "Teammates can trigger runs with my guidance." },
            StageOption { stage: Stage::Integrator, text: "Others trigger runs and interpret results independently." },
            StageOption { stage: Stage::Architect, text: "My harness is maintained like a product with docs and onboarding." },
            StageOption { stage: Stage::Steward, text: "I run organizational AI infrastructure serving multiple teams." },
        ],
    },
    StageQuestion {
        id: "stage_l4_governance",
        dimension: "governance",
        prompt: "What governance do you have for automated AI work?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Minimal — I trust my own judgment to catch problems." },
            StageOption { stage: Stage::Practitioner, text: "Logging and diffs for auditability; rollback plans exist." },
            StageOption { stage: Stage::Integrator, text: "Formal decision traces, approval gates, and rollback procedures." },
            StageOption { stage: Stage::Architect, text: "Governance frameworks that other teams adopt." },
            StageOption { stage: Stage::Steward, text: "Enterprise-level AI risk management and trust standards." },
        ],
    },
];

const STAGE_QUESTIONS_L5: &[StageQuestion] = &[
    StageQuestion {
        id: "stage_l5_goals",
        dimension: "goal_setting",
        prompt: "How do you set goals for fully autonomous AI systems?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Exploring goal-setting interfaces — exception handling is unclear." },
            StageOption { stage: Stage::Practitioner, text: "I set approval gates and quality bars consistently." },
            StageOption { stage: Stage::Integrator, text: "Autonomous workflows with clear, documented escalation paths." },
            StageOption { stage: Stage::Architect, text: "I've designed goal-setting and approval systems others trust." },
            StageOption { stage: Stage::Steward, text: "I define enterprise governance for fully autonomous AI." },
        ],
    },
    StageQuestion {
        id: "stage_l5_oversight",
        dimension: "oversight",
        prompt: "How do you maintain oversight of autonomous systems?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Manual spot-checking of outputs." },
            StageOption { stage: Stage::Practitioner, text: "Routine review of autonomous outputs on a schedule." },
            StageOption { stage: Stage::Integrator, text: "Exception-handling systems with clear escalation paths." },
            StageOption { stage: Stage::Architect, text: "Reusable governance frameworks for autonomous oversight." },
            StageOption { stage: Stage::Steward, text: "Organizational AI risk and trust standards." },
        ],
    },
    StageQuestion {
        id: "stage_l5_trust",
        dimension: "trust_calibration",
        prompt: "How well-calibrated is your trust in autonomous AI?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "I'm not sure when to trust and when to verify." },
            StageOption { stage: Stage::Practitioner, text: "I know the boundaries of what I can trust." },
            StageOption { stage: Stage::Integrator, text: "Trust boundaries are documented with validation evidence." },
            StageOption { stage: Stage::Architect, text: "I've designed trust frameworks others use to calibrate." },
            StageOption { stage: Stage::Steward, text: "I set organizational trust policies and approval frameworks." },
        ],
    },
    StageQuestion {
        id: "stage_l5_adaptation",
        dimension: "system_adaptation",
        prompt: "How do your autonomous systems adapt and improve?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "They don't — I manually update them when things break." },
            StageOption { stage: Stage::Practitioner, text: "I review and update configurations periodically." },
            StageOption { stage: Stage::Integrator, text: "Systems have feedback loops that surface improvement opportunities." },
            StageOption { stage: Stage::Architect, text: "Self-improving systems with documented evolution patterns." },
            StageOption { stage: Stage::Steward, text: "I govern system evolution across the organization." },
        ],
    },
    StageQuestion {
        id: "stage_l5_accountability",
        dimension: "organizational_accountability",
        prompt: "Who is accountable for autonomous AI decisions?",
        options: &[
            StageOption { stage: Stage::Explorer, text: "Unclear — accountability isn't well defined." },
            StageOption { stage: Stage::Practitioner, text: "I'm personally accountable for everything the system does." },
            StageOption { stage: Stage::Integrator, text: "Clear RACI with documented decision authority." },
            StageOption { stage: Stage::Architect, text: "Accountability frameworks adopted by multiple teams." },
            StageOption { stage: Stage::Steward, text: "Enterprise accountability and compliance standards." },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_level_questions_with_one_option_per_level() {
        let questions = level_questions();
        assert_eq!(questions.len(), 6);
        for question in questions {
            let levels: Vec<u8> = question.options.iter().map(|option| option.level).collect();
            assert_eq!(levels, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn every_level_has_five_stage_questions() {
        for level in 0..=5 {
            let questions = stage_questions(level);
            assert_eq!(questions.len(), 5, "level {level}");
            for question in questions {
                let stages: Vec<Stage> =
                    question.options.iter().map(|option| option.stage).collect();
                assert_eq!(stages, Stage::ALL.to_vec());
            }
        }
    }

    #[test]
    fn question_ids_are_unique_across_all_sets() {
        let mut ids = HashSet::new();
        for question in level_questions() {
            assert!(ids.insert(question.id));
        }
        for level in 0..=5 {
            for question in stage_questions(level) {
                assert!(ids.insert(question.id), "duplicate id {}", question.id);
            }
        }
    }

    #[test]
    fn question_sets_differ_between_levels() {
        let level_two: Vec<&str> = stage_questions(2).iter().map(|question| question.id).collect();
        let level_four: Vec<&str> = stage_questions(4).iter().map(|question| question.id).collect();
        assert!(level_two.iter().all(|id| !level_four.contains(id)));
    }

    #[test]
    fn unknown_levels_fall_back_to_level_one() {
        assert_eq!(stage_questions(7)[0].id, stage_questions(1)[0].id);
    }
}
