use crate::config::ScriptConfig;

/// One entry of the phase plan.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PhaseDescriptor {
    /// Static message with a blinking cursor for a fixed wall-clock duration.
    Blink {
        /// Message shown left of the cursor (may be empty).
        message: String,
        /// Phase length in milliseconds.
        duration_ms: f64,
    },
    /// Typewriter reveal of a message, one char per gated frame.
    Type {
        /// Message to type.
        message: String,
    },
    /// Digit matrix followed by the failure banner.
    Matrix,
}

/// Ordered phases replayed from the start on every restart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhasePlan {
    phases: Vec<PhaseDescriptor>,
}

impl PhasePlan {
    /// The classic script: cursor, first message, hold, second message, hold, matrix.
    pub fn classic(script: &ScriptConfig, timestamp: &str) -> Self {
        let first = script.first_message(timestamp);
        let second = script.second_message.clone();
        Self {
            phases: vec![
                PhaseDescriptor::Blink {
                    message: String::new(),
                    duration_ms: script.opening_blink_ms,
                },
                PhaseDescriptor::Type {
                    message: first.clone(),
                },
                PhaseDescriptor::Blink {
                    message: first,
                    duration_ms: script.first_hold_ms,
                },
                PhaseDescriptor::Type {
                    message: second.clone(),
                },
                PhaseDescriptor::Blink {
                    message: second,
                    duration_ms: script.second_hold_ms,
                },
                PhaseDescriptor::Matrix,
            ],
        }
    }

    /// Phase at `index`.
    pub fn get(&self, index: usize) -> Option<&PhaseDescriptor> {
        self.phases.get(index)
    }

    /// Number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// `true` when the plan has no phases.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases in order.
    pub fn phases(&self) -> &[PhaseDescriptor] {
        &self.phases
    }
}
