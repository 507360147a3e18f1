//! Ordered keyword rules that turn the latest user turn into a [`DerivedState`].
//!
//! Two tables, evaluated in order over the lower-cased text:
//!
//! 1. [`GATES`] — every gate whose trigger matches fires, in table order.
//!    Later gates may overwrite fields set by earlier ones.
//! 2. [`INTENT_CASCADE`] — the first matching rule wins; non-empty text with
//!    no match falls through to [`CONVERSATION`].
//!
//! Cognition mode is the only field both tables write. Gates and cascade
//! rules that use [`DerivedState::claim_cognition`] only fill it while it is
//! still `standard`; the operator gate assigns it unconditionally.

use super::state::{
    CognitionMode, Communion, Counsel, DerivedState, Emotion, Intent, OperatorMode, WillState,
};

/// A `(predicate, effect)` pair. The predicate is "text contains any trigger".
pub struct Rule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub effect: fn(&mut DerivedState),
}

impl Rule {
    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| text.contains(t))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

pub const HIGH_IMPACT_TRIGGERS: &[&str] = &[
    "legal", "contract", "lawsuit", "court", "invest", "money", "bank", "security", "hack",
    "password", "tax", "irs",
];

pub const OPERATOR_TRIGGERS: &[&str] = &[
    "business operator",
    "operator mode",
    "ceo",
    "run a company",
    "run my company",
    "ops",
    "operations",
    "strategy",
    "go to market",
    "g tm",
    "marketing plan",
    "sales plan",
    "budget",
    "hiring",
    "team",
    "workflow",
    "sop",
    "kpi",
    "okrs",
    "record label",
    "record company",
    "producer",
    "rollout",
    "launch plan",
];

pub const TROUBLESHOOT_TRIGGERS: &[&str] = &[
    "error",
    "bug",
    "crash",
    "not working",
    "timed out",
    "failed",
    "fix",
    "debug",
];

/// Independent gates, all evaluated, in this order.
pub const GATES: &[Rule] = &[
    Rule {
        name: "high_impact_counsel",
        triggers: HIGH_IMPACT_TRIGGERS,
        effect: |s| {
            s.counsel = Counsel::Required;
            s.communion = Communion::AcknowledgeFirst;
            s.cognition_mode = CognitionMode::Analytical;
        },
    },
    Rule {
        name: "operator_mode",
        triggers: OPERATOR_TRIGGERS,
        effect: |s| {
            s.operator_mode = OperatorMode::On;
            s.cognition_mode = CognitionMode::Operator;
        },
    },
    Rule {
        name: "troubleshooting",
        triggers: TROUBLESHOOT_TRIGGERS,
        effect: |s| s.claim_cognition(CognitionMode::Troubleshooting),
    },
];

// ---------------------------------------------------------------------------
// Intent cascade
// ---------------------------------------------------------------------------

/// First match wins.
pub const INTENT_CASCADE: &[Rule] = &[
    Rule {
        name: "media",
        triggers: &["play", "show", "watch"],
        effect: |s| {
            s.intent = Intent::Media;
            s.will_state = WillState::Proposing;
            s.emotion = Emotion::Focused;
            s.communion = Communion::Present;
        },
    },
    Rule {
        name: "creative",
        triggers: &["create", "design", "build", "make"],
        effect: |s| {
            s.intent = Intent::Creative;
            s.will_state = WillState::Proposing;
            s.emotion = Emotion::Energized;
            s.communion = Communion::Present;
            if s.counsel == Counsel::None {
                s.counsel = Counsel::Light;
            }
            s.claim_cognition(CognitionMode::Creative);
        },
    },
    Rule {
        name: "explain",
        triggers: &["why", "how"],
        effect: |s| {
            s.intent = Intent::Explain;
            s.will_state = WillState::Thinking;
            s.emotion = Emotion::Focused;
            s.communion = Communion::PauseThenAct;
            s.claim_cognition(CognitionMode::Analytical);
        },
    },
    Rule {
        name: "support",
        triggers: &["help", "stuck", "overwhelmed"],
        effect: |s| {
            s.intent = Intent::Support;
            s.will_state = WillState::Thinking;
            s.emotion = Emotion::Warm;
            s.communion = Communion::AcknowledgeFirst;
            s.claim_cognition(CognitionMode::Analytical);
        },
    },
    Rule {
        name: "humor",
        triggers: &["joke", "roast", "be funny", "make me laugh"],
        effect: |s| {
            s.intent = Intent::Humor;
            s.will_state = WillState::Thinking;
            s.emotion = Emotion::Comedic;
            s.communion = Communion::Present;
            s.claim_cognition(CognitionMode::Creative);
        },
    },
    Rule {
        name: "question",
        triggers: &["?"],
        effect: |s| {
            s.intent = Intent::Question;
            s.will_state = WillState::Thinking;
            s.emotion = Emotion::Neutral;
            s.communion = Communion::Present;
        },
    },
];

/// Fallback for non-empty text that no cascade rule matched.
pub static CONVERSATION: Rule = Rule {
    name: "conversation",
    triggers: &[],
    effect: |s| {
        s.intent = Intent::Conversation;
        s.will_state = WillState::Thinking;
        s.emotion = Emotion::Calm;
        s.communion = Communion::Present;
    },
};

/// Classify raw user text. Empty text yields the default state.
pub fn classify(text: &str) -> DerivedState {
    let mut state = DerivedState::default();
    let t = text.to_lowercase();
    if t.is_empty() {
        return state;
    }

    for gate in GATES.iter().filter(|g| g.matches(&t)) {
        (gate.effect)(&mut state);
    }

    let intent_rule = INTENT_CASCADE
        .iter()
        .find(|r| r.matches(&t))
        .unwrap_or(&CONVERSATION);
    (intent_rule.effect)(&mut state);

    state
}
