use crate::request::GenerationRequest;
use crate::types::Flow;
use std::fmt;

/// Attribute names understood by the built-in templates.
pub mod fields {
    pub const GOAL: &str = "goal";
    pub const WEIGHT: &str = "weight";
    pub const HEIGHT: &str = "height";
    pub const TARGET_WEIGHT: &str = "target_weight";
    pub const WORKOUT_TYPE: &str = "workout_type";
    pub const NOTE: &str = "note";
    pub const LIFESTYLE: &str = "lifestyle";
    pub const FASTING: &str = "fasting";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const ALLERGIES: &str = "allergies";
    pub const PREFERENCES: &str = "preferences";
}

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE: &str = "None";
pub const DEFAULT_WORKOUT_GOAL: &str = "General fitness improvement";

/// One placeholder line of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSlot {
    pub field: &'static str,
    pub label: &'static str,
    /// Appended after a present value only; never after the default.
    pub unit: Option<&'static str>,
    pub default: &'static str,
}

impl PromptSlot {
    const fn new(field: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            field,
            label,
            unit: None,
            default,
        }
    }

    const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    fn render(&self, req: &GenerationRequest) -> String {
        match (req.get(self.field), self.unit) {
            (Some(v), Some(unit)) => format!("{v} {unit}"),
            (Some(v), None) => v.to_string(),
            (None, _) => self.default.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub flow: Flow,
    pub intro: &'static str,
    pub slots: &'static [PromptSlot],
    /// Output-shape instructions sent with every request. Changing this text
    /// changes the shape of generated plans.
    pub instructions: &'static str,
}

const WORKOUT_SLOTS: &[PromptSlot] = &[
    PromptSlot::new(fields::GOAL, "Goal", DEFAULT_WORKOUT_GOAL),
    PromptSlot::new(fields::WEIGHT, "Current weight", NOT_SPECIFIED).with_unit("kg"),
    PromptSlot::new(fields::HEIGHT, "Height", NOT_SPECIFIED).with_unit("cm"),
    PromptSlot::new(fields::TARGET_WEIGHT, "Target weight", NOT_SPECIFIED).with_unit("kg"),
    PromptSlot::new(fields::WORKOUT_TYPE, "Type of workout", NOT_SPECIFIED),
    PromptSlot::new(fields::NOTE, "Additional notes", NONE),
];

const DIET_SLOTS: &[PromptSlot] = &[
    PromptSlot::new(fields::WEIGHT, "Current weight", NOT_SPECIFIED).with_unit("kg"),
    PromptSlot::new(fields::HEIGHT, "Height", NOT_SPECIFIED).with_unit("cm"),
    PromptSlot::new(fields::TARGET_WEIGHT, "Target weight", NOT_SPECIFIED).with_unit("kg"),
    PromptSlot::new(fields::LIFESTYLE, "Lifestyle", NOT_SPECIFIED),
    PromptSlot::new(fields::FASTING, "Fasting preference", NOT_SPECIFIED),
    PromptSlot::new(fields::AGE, "Age", NOT_SPECIFIED),
    PromptSlot::new(fields::GENDER, "Gender", NOT_SPECIFIED),
    PromptSlot::new(fields::ALLERGIES, "Allergies", NONE),
    PromptSlot::new(fields::PREFERENCES, "Dietary preferences", NONE),
];

const WORKOUT_INSTRUCTIONS: &str = "\
Format the response as plain text with day-by-day headings (Day 1 through Day 7).
Under each day, list the target muscle groups, then every exercise with sets, reps and rest time.
Include a short warm-up and cool-down for each training day and mark rest days clearly.
Finish with 3-5 brief tips for progressing safely toward the goal.";

const DIET_INSTRUCTIONS: &str = "\
Format the response as plain text with day-by-day headings (Day 1 through Day 7).
Under each day, list Breakfast, Lunch, Snack and Dinner with an approximate calorie count for each meal, then the daily calorie total.
Respect the allergies and dietary preferences strictly. If fasting is requested, schedule all meals inside the eating window.
Finish with 3-5 brief tips for reaching the target weight.";

pub const WORKOUT_TEMPLATE: PromptTemplate = PromptTemplate {
    flow: Flow::Workout,
    intro: "Create a personalized 7-day workout plan for a person with the following details:",
    slots: WORKOUT_SLOTS,
    instructions: WORKOUT_INSTRUCTIONS,
};

pub const DIET_TEMPLATE: PromptTemplate = PromptTemplate {
    flow: Flow::Diet,
    intro: "Create a personalized 7-day diet plan for a person with the following details:",
    slots: DIET_SLOTS,
    instructions: DIET_INSTRUCTIONS,
};

pub fn template_for(flow: Flow) -> &'static PromptTemplate {
    match flow {
        Flow::Diet => &DIET_TEMPLATE,
        Flow::Workout => &WORKOUT_TEMPLATE,
    }
}

/// The fully assembled instruction sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PromptText(String);

impl PromptText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PromptTemplate {
    pub fn render(&self, req: &GenerationRequest) -> PromptText {
        let mut out = String::with_capacity(512);
        out.push_str(self.intro);
        out.push_str("\n\n");
        for slot in self.slots {
            out.push_str(&format!("- {}: {}\n", slot.label, slot.render(req)));
        }
        out.push('\n');
        out.push_str(self.instructions);
        PromptText(out)
    }
}

/// Builds the prompt for `flow` from the current form values.
///
/// Pure: the same request always yields byte-identical text.
pub fn build_prompt(flow: Flow, req: &GenerationRequest) -> PromptText {
    template_for(flow).render(req)
}
