use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use survey_filter::data::schema::{CategoricalField, LikertGroup, ANY, TEXT_COLUMNS};
use survey_filter::{filter, DataSource, FilterCriteria, FilterError, ResponseTable};

// ---------------------------------------------------------------------------
// Selector state
// ---------------------------------------------------------------------------

/// The label currently picked in every selector widget. Starts at "Any".
#[derive(Debug, Clone, PartialEq)]
pub struct Selections {
    pub categorical: BTreeMap<CategoricalField, String>,
    pub likert: BTreeMap<&'static str, String>,
}

impl Default for Selections {
    fn default() -> Self {
        let categorical = CategoricalField::ALL
            .into_iter()
            .map(|f| (f, ANY.to_string()))
            .collect();
        let likert = LikertGroup::ALL
            .into_iter()
            .flat_map(|g| g.questions().iter())
            .map(|q| (q.column, ANY.to_string()))
            .collect();
        Self { categorical, likert }
    }
}

impl Selections {
    pub fn to_criteria(&self) -> Result<FilterCriteria, FilterError> {
        let mut criteria = FilterCriteria::any();
        for (field, label) in &self.categorical {
            criteria.set_category(*field, label)?;
        }
        for (column, value) in &self.likert {
            criteria.set_likert(column, value)?;
        }
        Ok(criteria)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the survey comes from; replaced by File → Open….
    pub source: DataSource,

    /// Loaded table (None until a load succeeds).
    pub table: Option<Arc<ResponseTable>>,

    pub selections: Selections,

    /// Indices of responses passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Likert question shown in the distribution chart.
    pub chart_question: &'static str,

    /// 1–5 answer counts for `chart_question` over the visible responses.
    pub chart_counts: [usize; 5],

    /// Free-text column whose responses are expanded, with the rendered text.
    pub shown_responses: Option<(&'static str, String)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            source: DataSource::new(data_path),
            table: None,
            selections: Selections::default(),
            visible_indices: Vec::new(),
            chart_question: LikertGroup::ResearchProcess.questions()[0].column,
            chart_counts: [0; 5],
            shown_responses: None,
            status_message: None,
        }
    }

    /// Load the current source (cached after the first success).
    pub fn load(&mut self) {
        let result = self.source.load();
        self.apply_load(result);
    }

    /// Re-read the current source from disk.
    pub fn reload(&mut self) {
        let result = self.source.reload();
        self.apply_load(result);
    }

    /// Switch to another file. The current source and table stay in place
    /// unless the new file loads.
    pub fn open(&mut self, path: PathBuf) {
        let source = DataSource::new(path);
        let result = source.load();
        if result.is_ok() {
            self.source = source;
        }
        self.apply_load(result);
    }

    fn apply_load(&mut self, result: Result<Arc<ResponseTable>, FilterError>) {
        match result {
            Ok(table) => {
                self.table = Some(table);
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to load survey data: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute `visible_indices` (and any open response listing) after a
    /// selection change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let criteria = match self.selections.to_criteria() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Rejected filter selection: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };
        let result = filter(table, &criteria);
        self.visible_indices = result.indices().to_vec();
        self.chart_counts = match result.distribution(self.chart_question) {
            Ok(counts) => counts,
            Err(e) => {
                log::warn!("No distribution for {}: {e}", self.chart_question);
                [0; 5]
            }
        };

        if let Some((column, text)) = &mut self.shown_responses {
            *text = result
                .text_projection(*column)
                .map(|lines| lines.collect::<Vec<_>>().join("\n\n"))
                .unwrap_or_default();
        }
    }

    pub fn set_chart_question(&mut self, question: &'static str) {
        self.chart_question = question;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.selections = Selections::default();
        self.refilter();
    }

    /// Show the responses for `column`, or hide them if already shown.
    pub fn toggle_responses(&mut self, column: &'static str) {
        if matches!(self.shown_responses, Some((shown, _)) if shown == column) {
            self.shown_responses = None;
            return;
        }
        self.shown_responses = Some((column, String::new()));
        self.refilter();
    }

    pub fn total_rows(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.len())
    }
}

/// Free-text columns the viewer offers buttons for.
pub fn response_columns() -> &'static [&'static str] {
    &TEXT_COLUMNS
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn survey_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "gender,age,Q7_1,Q9_1,challenges you found in this process\n\
             1,0,3,5,time\n\
             0,1,4,5,forms\n\
             1,1,3,2,scheduling\n"
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn default_selections_are_unconstrained() {
        let criteria = Selections::default().to_criteria().unwrap();
        assert!(criteria.is_unconstrained());
        assert_eq!(Selections::default().likert.len(), 11);
    }

    #[test]
    fn load_shows_every_row() {
        let file = survey_file();
        let mut state = AppState::new(file.path());
        state.load();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.total_rows(), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selection_change_refilters_and_updates_responses() {
        let file = survey_file();
        let mut state = AppState::new(file.path());
        state.load();
        state.toggle_responses("challenges you found in this process");

        state
            .selections
            .categorical
            .insert(CategoricalField::Gender, "Male".into());
        state.selections.likert.insert("Q7_1", "3".into());
        state.refilter();

        assert_eq!(state.visible_indices, vec![0, 2]);
        let (_, text) = state.shown_responses.as_ref().unwrap();
        assert_eq!(text, "Response 1: time\n\nResponse 2: scheduling");

        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn chart_counts_follow_filters_and_question() {
        let file = survey_file();
        let mut state = AppState::new(file.path());
        state.load();
        assert_eq!(state.chart_counts, [0, 0, 2, 1, 0]);

        state.set_chart_question("Q9_1");
        assert_eq!(state.chart_counts, [0, 1, 0, 0, 2]);

        state
            .selections
            .categorical
            .insert(CategoricalField::Gender, "Female".into());
        state.refilter();
        assert_eq!(state.chart_counts, [0, 0, 0, 0, 1]);
    }

    #[test]
    fn failed_open_keeps_previous_file() {
        let file = survey_file();
        let mut state = AppState::new(file.path());
        state.load();

        let dir = tempfile::tempdir().unwrap();
        state.open(dir.path().join("absent.csv"));

        assert_eq!(state.source.path(), file.path());
        assert_eq!(state.total_rows(), 3);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(state.status_message.as_deref().unwrap().contains("unavailable"));

        state.reload();
        assert!(state.status_message.is_none());
        assert_eq!(state.total_rows(), 3);
    }

    #[test]
    fn toggling_twice_hides_responses() {
        let file = survey_file();
        let mut state = AppState::new(file.path());
        state.load();
        let column = response_columns()[0];
        state.toggle_responses(column);
        assert!(state.shown_responses.is_some());
        state.toggle_responses(column);
        assert!(state.shown_responses.is_none());
    }

    #[test]
    fn missing_file_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().join("absent.csv"));
        state.load();
        assert!(state.table.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("unavailable"));
    }
}
