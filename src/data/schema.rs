//! Fixed column domains of the pre-processed survey file.
//!
//! Every categorical answer is stored as a small integer code; the tables
//! below are the only valid label/code pairs. Likert answers are stored as
//! numbers on a 1–5 scale.

use crate::error::FilterError;

/// Selector label meaning "no constraint on this field".
pub const ANY: &str = "Any";

/// Valid Likert answers.
pub const LIKERT_SCALE: [u8; 5] = [1, 2, 3, 4, 5];

/// Open-ended questions whose answers can be listed per matching response.
pub const TEXT_COLUMNS: [&str; 4] = [
    "challenges you found in this process",
    "what you learned about your students",
    "impact of perception of yourself as a teacher",
    "outcomes you found as a result of your study",
];

pub fn is_text_column(column: &str) -> bool {
    TEXT_COLUMNS.contains(&column)
}

fn is_any(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(ANY)
}

// ---------------------------------------------------------------------------
// Categorical fields
// ---------------------------------------------------------------------------

/// A label and the integer it is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub code: i64,
    /// Alternative spellings accepted when parsing.
    aliases: &'static [&'static str],
}

impl Category {
    const fn new(label: &'static str, code: i64) -> Self {
        Category {
            label,
            code,
            aliases: &[],
        }
    }

    const fn with_aliases(label: &'static str, code: i64, aliases: &'static [&'static str]) -> Self {
        Category {
            label,
            code,
            aliases,
        }
    }

    fn matches(&self, raw: &str) -> bool {
        self.label.eq_ignore_ascii_case(raw) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(raw))
    }
}

const GENDER: &[Category] = &[Category::new("Male", 1), Category::new("Female", 0)];

const AGE: &[Category] = &[
    Category::with_aliases("20-25", 0, &["20-25 years old"]),
    Category::with_aliases("26-40", 1, &["26-40 years old"]),
    Category::with_aliases("41+", 9, &["41+ years old"]),
];

const CERTIFICATION_AREA: &[Category] = &[
    Category::new("early childhood", 0),
    Category::new("elementary", 1),
    Category::new("high school", 2),
    Category::new("middle school", 3),
];

const GRAD_DATE: &[Category] = &[
    Category::new("Dec-22", 0),
    Category::new("Dec-23", 1),
    Category::new("May-23", 2),
    Category::new("May-24", 3),
];

const RESEARCH_CONSENT: &[Category] = &[Category::new("yes", 0), Category::new("no", 1)];

/// The five single-valued demographic / consent selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoricalField {
    Gender,
    Age,
    CertificationArea,
    GradDate,
    ResearchConsent,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Gender,
        CategoricalField::Age,
        CategoricalField::CertificationArea,
        CategoricalField::GradDate,
        CategoricalField::ResearchConsent,
    ];

    /// Column holding the field's code in the data file.
    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::Age => "age",
            CategoricalField::CertificationArea => "certification_area",
            CategoricalField::GradDate => "grad_date",
            CategoricalField::ResearchConsent => "Q14",
        }
    }

    /// Human-readable selector title.
    pub fn title(self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::Age => "Age",
            CategoricalField::CertificationArea => "Certification Area",
            CategoricalField::GradDate => "Graduation Date",
            CategoricalField::ResearchConsent => "Consent for Research",
        }
    }

    pub fn categories(self) -> &'static [Category] {
        match self {
            CategoricalField::Gender => GENDER,
            CategoricalField::Age => AGE,
            CategoricalField::CertificationArea => CERTIFICATION_AREA,
            CategoricalField::GradDate => GRAD_DATE,
            CategoricalField::ResearchConsent => RESEARCH_CONSENT,
        }
    }

    /// Resolve a selector label. `Ok(None)` means unconstrained.
    pub fn parse(self, raw: &str) -> Result<Option<Category>, FilterError> {
        if is_any(raw) {
            return Ok(None);
        }
        let raw = raw.trim();
        self.categories()
            .iter()
            .find(|c| c.matches(raw))
            .copied()
            .map(Some)
            .ok_or_else(|| FilterError::invalid(self.column(), raw))
    }
}

// ---------------------------------------------------------------------------
// Likert questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertQuestion {
    pub column: &'static str,
    pub label: &'static str,
}

const RESEARCH_PROCESS: &[LikertQuestion] = &[
    LikertQuestion { column: "Q7_1", label: "Choosing a concern or challenges for your project" },
    LikertQuestion { column: "Q7_2", label: "Identifying participants for your project" },
    LikertQuestion { column: "Q7_3", label: "Finding resources to use for your study" },
    LikertQuestion { column: "Q7_4", label: "Choosing a strategy or action to try" },
    LikertQuestion { column: "Q7_5", label: "Selecting data gathering tools" },
    LikertQuestion { column: "Q7_6", label: "Defining how data analysis will work" },
    LikertQuestion { column: "Q7_7", label: "Conducting the study" },
    LikertQuestion { column: "Q7_8", label: "Analyzing data to find results" },
    LikertQuestion { column: "Q7_9", label: "Presenting findings" },
];

const FUTURE_INTENT: &[LikertQuestion] = &[
    LikertQuestion { column: "Q9_1", label: "Using the process tried in your study in your future classroom" },
    LikertQuestion {
        column: "Q9_2",
        label: "Revisiting the AR/Inquiry process to solve future challenges in the classroom",
    },
];

/// The two named groups of Likert questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LikertGroup {
    /// Q7: confidence with each step of the research process.
    ResearchProcess,
    /// Q9: intentions after the study.
    FutureIntent,
}

impl LikertGroup {
    pub const ALL: [LikertGroup; 2] = [LikertGroup::ResearchProcess, LikertGroup::FutureIntent];

    pub fn title(self) -> &'static str {
        match self {
            LikertGroup::ResearchProcess => "Q7 Questions",
            LikertGroup::FutureIntent => "Q9 Questions",
        }
    }

    pub fn questions(self) -> &'static [LikertQuestion] {
        match self {
            LikertGroup::ResearchProcess => RESEARCH_PROCESS,
            LikertGroup::FutureIntent => FUTURE_INTENT,
        }
    }
}

/// Look up a Likert question by its column name.
pub fn find_likert(column: &str) -> Option<(LikertGroup, &'static LikertQuestion)> {
    LikertGroup::ALL.into_iter().find_map(|group| {
        group
            .questions()
            .iter()
            .find(|q| q.column == column)
            .map(|q| (group, q))
    })
}

/// Parse a Likert selector value. Accepts anything that reads as a whole
/// number 1–5 (`"3"`, `"3.0"`). `Ok(None)` means unconstrained.
pub fn parse_likert(column: &str, raw: &str) -> Result<Option<u8>, FilterError> {
    if is_any(raw) {
        return Ok(None);
    }
    let invalid = || FilterError::invalid(column, raw.trim());
    let v: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if v.fract() != 0.0 || !(1.0..=5.0).contains(&v) {
        return Err(invalid());
    }
    Ok(Some(v as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_labels_map_to_storage_codes() {
        let female = CategoricalField::Gender.parse("Female").unwrap().unwrap();
        assert_eq!(female.code, 0);
        let age = CategoricalField::Age.parse("41+").unwrap().unwrap();
        assert_eq!(age.code, 9);
        let grad = CategoricalField::GradDate.parse("May-23").unwrap().unwrap();
        assert_eq!(grad.code, 2);
        let consent = CategoricalField::ResearchConsent.parse("no").unwrap().unwrap();
        assert_eq!(consent.code, 1);
    }

    #[test]
    fn age_accepts_long_labels() {
        let age = CategoricalField::Age.parse("26-40 years old").unwrap().unwrap();
        assert_eq!(age.code, 1);
        assert_eq!(age.label, "26-40");
    }

    #[test]
    fn any_is_unconstrained() {
        for field in CategoricalField::ALL {
            assert_eq!(field.parse("Any").unwrap(), None);
            assert_eq!(field.parse("any").unwrap(), None);
        }
        assert_eq!(parse_likert("Q7_1", "Any").unwrap(), None);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = CategoricalField::CertificationArea
            .parse("graduate school")
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidCriteria { ref field, ref value }
                if field == "certification_area" && value == "graduate school"
        ));
    }

    #[test]
    fn likert_values_parse_numerically() {
        assert_eq!(parse_likert("Q7_1", "3").unwrap(), Some(3));
        assert_eq!(parse_likert("Q7_1", "3.0").unwrap(), Some(3));
        assert_eq!(parse_likert("Q9_2", " 5 ").unwrap(), Some(5));
    }

    #[test]
    fn likert_values_outside_scale_are_rejected() {
        for raw in ["0", "6", "2.5", "three", ""] {
            assert!(parse_likert("Q7_1", raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn groups_have_nine_and_two_questions() {
        assert_eq!(LikertGroup::ResearchProcess.questions().len(), 9);
        assert_eq!(LikertGroup::FutureIntent.questions().len(), 2);
        let (group, q) = find_likert("Q9_1").unwrap();
        assert_eq!(group, LikertGroup::FutureIntent);
        assert!(q.label.starts_with("Using the process"));
        assert!(find_likert("Q8_1").is_none());
    }
}
