use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent plan flows a user can fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Diet,
    Workout,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Diet => "diet",
            Flow::Workout => "workout",
        }
    }

    /// Heading shown above the form.
    pub fn title(self) -> &'static str {
        match self {
            Flow::Diet => "Diet Plan Generator",
            Flow::Workout => "Workout Plan Generator",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Flow::Diet => "Your diet plan will appear here",
            Flow::Workout => "Your workout plan will appear here",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            Flow::Diet => "Generating your custom diet plan...",
            Flow::Workout => "Generating your custom workout plan...",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
