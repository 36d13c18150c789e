use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::schema::{find_likert, parse_likert, CategoricalField, Category, LikertGroup};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// FilterCriteria – one validated query
// ---------------------------------------------------------------------------

/// A validated set of equality constraints. Anything not set is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    categorical: BTreeMap<CategoricalField, Category>,
    research_process: BTreeMap<&'static str, u8>,
    future_intent: BTreeMap<&'static str, u8>,
}

impl FilterCriteria {
    /// Criteria with every field unconstrained.
    pub fn any() -> Self {
        Self::default()
    }

    /// Constrain a categorical field by label; `"Any"` clears it.
    pub fn set_category(&mut self, field: CategoricalField, label: &str) -> Result<(), FilterError> {
        match field.parse(label)? {
            Some(category) => {
                self.categorical.insert(field, category);
            }
            None => {
                self.categorical.remove(&field);
            }
        }
        Ok(())
    }

    /// Constrain a Likert question by value; `"Any"` clears it.
    pub fn set_likert(&mut self, column: &str, value: &str) -> Result<(), FilterError> {
        let (group, question) = find_likert(column).ok_or_else(|| FilterError::invalid(column, value))?;
        let map = self.group_mut(group);
        match parse_likert(column, value)? {
            Some(v) => {
                map.insert(question.column, v);
            }
            None => {
                map.remove(question.column);
            }
        }
        Ok(())
    }

    pub fn with_category(mut self, field: CategoricalField, label: &str) -> Result<Self, FilterError> {
        self.set_category(field, label)?;
        Ok(self)
    }

    pub fn with_likert(mut self, column: &str, value: &str) -> Result<Self, FilterError> {
        self.set_likert(column, value)?;
        Ok(self)
    }

    pub fn category(&self, field: CategoricalField) -> Option<Category> {
        self.categorical.get(&field).copied()
    }

    pub fn likert(&self, group: LikertGroup) -> &BTreeMap<&'static str, u8> {
        match group {
            LikertGroup::ResearchProcess => &self.research_process,
            LikertGroup::FutureIntent => &self.future_intent,
        }
    }

    fn group_mut(&mut self, group: LikertGroup) -> &mut BTreeMap<&'static str, u8> {
        match group {
            LikertGroup::ResearchProcess => &mut self.research_process,
            LikertGroup::FutureIntent => &mut self.future_intent,
        }
    }

    /// Every active constraint as `(column, required numeric value)`.
    pub fn predicates(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        let categorical = self
            .categorical
            .iter()
            .map(|(field, cat)| (field.column(), cat.code as f64));
        let likert = LikertGroup::ALL
            .into_iter()
            .flat_map(move |g| self.likert(g).iter().map(|(col, v)| (*col, f64::from(*v))));
        categorical.chain(likert)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.predicates().next().is_none()
    }

    /// Build criteria from raw labels, e.g. as collected from a UI or a JSON file.
    pub fn from_input(input: &CriteriaInput) -> Result<Self, FilterError> {
        let mut criteria = FilterCriteria::any();
        let selectors = [
            (CategoricalField::Gender, &input.gender),
            (CategoricalField::Age, &input.age),
            (CategoricalField::CertificationArea, &input.certification_area),
            (CategoricalField::GradDate, &input.grad_date),
            (CategoricalField::ResearchConsent, &input.research),
        ];
        for (field, label) in selectors {
            if let Some(label) = label {
                criteria.set_category(field, label)?;
            }
        }
        for (column, value) in input.q7.iter().chain(input.q9.iter()) {
            criteria.set_likert(column, value)?;
        }
        Ok(criteria)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            return write!(f, "<any>");
        }
        let mut parts: Vec<String> = self
            .categorical
            .iter()
            .map(|(field, cat)| format!("{}={}", field.column(), cat.label))
            .collect();
        for group in LikertGroup::ALL {
            parts.extend(self.likert(group).iter().map(|(col, v)| format!("{col}={v}")));
        }
        write!(f, "{}", parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// CriteriaInput – unvalidated selector labels
// ---------------------------------------------------------------------------

/// Raw selector values before validation. Missing entries mean "Any".
///
/// ```json
/// { "gender": "Female", "age": "26-40", "q7": { "Q7_1": "4" } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CriteriaInput {
    pub gender: Option<String>,
    pub age: Option<String>,
    pub certification_area: Option<String>,
    pub grad_date: Option<String>,
    pub research: Option<String>,
    pub q7: BTreeMap<String, String>,
    pub q9: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unconstrained() {
        let c = FilterCriteria::any();
        assert!(c.is_unconstrained());
        assert_eq!(c.to_string(), "<any>");
    }

    #[test]
    fn any_clears_a_previous_selection() {
        let mut c = FilterCriteria::any()
            .with_category(CategoricalField::Gender, "Male")
            .unwrap()
            .with_likert("Q7_3", "2")
            .unwrap();
        assert!(!c.is_unconstrained());
        c.set_category(CategoricalField::Gender, "Any").unwrap();
        c.set_likert("Q7_3", "Any").unwrap();
        assert!(c.is_unconstrained());
    }

    #[test]
    fn likert_values_land_in_their_group() {
        let c = FilterCriteria::any()
            .with_likert("Q7_9", "4.0")
            .unwrap()
            .with_likert("Q9_2", "1")
            .unwrap();
        assert_eq!(c.likert(LikertGroup::ResearchProcess).get("Q7_9"), Some(&4));
        assert_eq!(c.likert(LikertGroup::FutureIntent).get("Q9_2"), Some(&1));
    }

    #[test]
    fn predicates_use_storage_codes() {
        let c = FilterCriteria::any()
            .with_category(CategoricalField::Age, "41+")
            .unwrap()
            .with_likert("Q9_1", "5")
            .unwrap();
        let preds: Vec<_> = c.predicates().collect();
        assert_eq!(preds, vec![("age", 9.0), ("Q9_1", 5.0)]);
    }

    #[test]
    fn unknown_likert_question_is_invalid() {
        let err = FilterCriteria::any().with_likert("Q8_1", "3").unwrap_err();
        assert!(matches!(err, FilterError::InvalidCriteria { .. }));
    }

    #[test]
    fn input_from_json() {
        let input: CriteriaInput = serde_json::from_str(
            r#"{ "gender": "Female", "research": "Any", "q7": { "Q7_1": "4" }, "q9": { "Q9_2": "Any" } }"#,
        )
        .unwrap();
        let c = FilterCriteria::from_input(&input).unwrap();
        assert_eq!(c.category(CategoricalField::Gender).map(|c| c.code), Some(0));
        assert_eq!(c.category(CategoricalField::ResearchConsent), None);
        assert_eq!(c.to_string(), "gender=Female, Q7_1=4");
    }

    #[test]
    fn input_with_bad_label_is_rejected() {
        let input = CriteriaInput {
            certification_area: Some("graduate school".into()),
            ..Default::default()
        };
        assert!(FilterCriteria::from_input(&input).is_err());
    }
}
