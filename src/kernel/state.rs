//! Derived conversation state — one value per dimension, computed per request.

use serde::Serialize;
use std::fmt;

macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Wire label, as serialized.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

state_enum! {
    /// What the user is trying to do.
    Intent {
        #[default]
        Idle => "idle",
        Media => "media",
        Creative => "creative",
        Explain => "explain",
        Support => "support",
        Humor => "humor",
        Question => "question",
        Conversation => "conversation",
    }
}

state_enum! {
    /// How far toward action the reply should go.
    WillState {
        #[default]
        Idle => "idle",
        Thinking => "thinking",
        Proposing => "proposing",
        AwaitingConfirmation => "awaiting_confirmation",
        Executing => "executing",
    }
}

state_enum! {
    /// Delivery tone. Modulates style, never content.
    Emotion {
        #[default]
        Neutral => "neutral",
        Warm => "warm",
        Calm => "calm",
        Focused => "focused",
        Energized => "energized",
        Solemn => "solemn",
        Restrained => "restrained",
        Comedic => "comedic",
    }
}

state_enum! {
    /// Advisory caution attached to high-stakes topics.
    Counsel {
        #[default]
        None => "none",
        Light => "light",
        Required => "required",
    }
}

state_enum! {
    /// Business/operations framing detected.
    OperatorMode {
        #[default]
        Off => "off",
        On => "on",
    }
}

state_enum! {
    /// Presence behaviour before acting.
    Communion {
        #[default]
        Present => "present",
        AcknowledgeFirst => "acknowledge_first",
        PauseThenAct => "pause_then_act",
    }
}

state_enum! {
    /// Reasoning style; selects the cognition directive block.
    CognitionMode {
        #[default]
        Standard => "standard",
        Analytical => "analytical",
        Creative => "creative",
        Operator => "operator",
        Troubleshooting => "troubleshooting",
    }
}

/// The full classification of the latest user turn.
///
/// Serialized with camelCase keys (`willState`, `operatorMode`, ...) since
/// that is what the front-end reads from the `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedState {
    pub intent: Intent,
    pub will_state: WillState,
    pub emotion: Emotion,
    pub counsel: Counsel,
    pub operator_mode: OperatorMode,
    pub communion: Communion,
    pub cognition_mode: CognitionMode,
}

impl DerivedState {
    /// Set `cognition_mode` only if nothing has claimed it yet.
    pub(crate) fn claim_cognition(&mut self, mode: CognitionMode) {
        if self.cognition_mode == CognitionMode::Standard {
            self.cognition_mode = mode;
        }
    }
}
