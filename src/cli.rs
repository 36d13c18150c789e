//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use survey_filter::data::schema::{find_likert, LikertGroup};
use survey_filter::CriteriaInput;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "survey-filter", version, about = "Survey Response Filter")]
pub struct Cli {
    /// Survey CSV to load.
    #[arg(long, env = "SURVEY_FILTER_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// JSON config file (data_path, window_size).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the desktop viewer (default).
    View,
    /// Filter once and print the results to stdout.
    Query(QueryArgs),
}

#[derive(Debug, Args, Clone, Default)]
pub struct QueryArgs {
    /// JSON file with selector labels; flags below override it.
    #[arg(long)]
    pub criteria: Option<PathBuf>,

    /// Male | Female
    #[arg(long)]
    pub gender: Option<String>,

    /// 20-25 | 26-40 | 41+
    #[arg(long)]
    pub age: Option<String>,

    /// early childhood | elementary | high school | middle school
    #[arg(long)]
    pub cert_area: Option<String>,

    /// Dec-22 | Dec-23 | May-23 | May-24
    #[arg(long)]
    pub grad_date: Option<String>,

    /// Consent for research: yes | no
    #[arg(long)]
    pub research: Option<String>,

    /// Likert constraint such as `Q7_1=4`. Repeatable.
    #[arg(long = "likert", value_name = "QUESTION=VALUE", value_parser = parse_key_val)]
    pub likert: Vec<(String, String)>,

    /// Print every answer to this free-text question. Repeatable.
    #[arg(long = "responses", value_name = "COLUMN")]
    pub responses: Vec<String>,

    /// Print the 1–5 answer counts for this Likert question. Repeatable.
    #[arg(long = "distribution", value_name = "QUESTION")]
    pub distribution: Vec<String>,

    /// Also print the matching rows as CSV-like lines.
    #[arg(long)]
    pub rows: bool,
}

impl QueryArgs {
    /// Layer the flags over a base input (usually read from `--criteria`).
    pub fn apply_to(&self, mut input: CriteriaInput) -> CriteriaInput {
        let selectors = [
            (&mut input.gender, &self.gender),
            (&mut input.age, &self.age),
            (&mut input.certification_area, &self.cert_area),
            (&mut input.grad_date, &self.grad_date),
            (&mut input.research, &self.research),
        ];
        for (slot, flag) in selectors {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }
        for (question, value) in &self.likert {
            // Unknown questions go to q7 and are rejected during validation.
            let target = match find_likert(question) {
                Some((LikertGroup::FutureIntent, _)) => &mut input.q9,
                _ => &mut input.q7,
            };
            target.insert(question.clone(), value.clone());
        }
        input
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=VALUE, got '{s}'"))?;
    Ok((k.trim().to_string(), v.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_flags_parse() {
        let cli = Cli::try_parse_from([
            "survey-filter",
            "query",
            "--gender",
            "Female",
            "--likert",
            "Q7_2=3",
            "--likert",
            "Q9_1=5",
            "--responses",
            "what you learned about your students",
        ])
        .unwrap();
        let Some(Command::Query(args)) = cli.command else {
            panic!("expected query subcommand");
        };
        let input = args.apply_to(CriteriaInput::default());
        assert_eq!(input.gender.as_deref(), Some("Female"));
        assert_eq!(input.q7.get("Q7_2").map(String::as_str), Some("3"));
        assert_eq!(input.q9.get("Q9_1").map(String::as_str), Some("5"));
        assert_eq!(args.responses.len(), 1);
    }

    #[test]
    fn flags_override_file_values() {
        let base = CriteriaInput {
            gender: Some("Male".into()),
            age: Some("41+".into()),
            ..Default::default()
        };
        let args = QueryArgs {
            gender: Some("Female".into()),
            ..Default::default()
        };
        let input = args.apply_to(base);
        assert_eq!(input.gender.as_deref(), Some("Female"));
        assert_eq!(input.age.as_deref(), Some("41+"));
    }

    #[test]
    fn likert_flag_needs_equals_sign() {
        assert!(parse_key_val("Q7_1").is_err());
        assert_eq!(
            parse_key_val("Q7_1 = 4").unwrap(),
            ("Q7_1".to_string(), "4".to_string())
        );
    }

    #[test]
    fn no_subcommand_means_viewer() {
        let cli = Cli::try_parse_from(["survey-filter", "--data", "x.csv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
    }
}
