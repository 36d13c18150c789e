//! Headless `query` subcommand: one filter pass printed to stdout.

use std::io::Write;

use anyhow::{Context, Result};
use survey_filter::config::AppConfig;
use survey_filter::data::schema::find_likert;
use survey_filter::{count_of, filter, CriteriaInput, DataSource, FilterCriteria, FilteredResult};

use crate::cli::QueryArgs;

pub fn run(config: &AppConfig, args: &QueryArgs) -> Result<()> {
    let base = match &args.criteria {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading criteria file {}", path.display()))?;
            serde_json::from_str::<CriteriaInput>(&text)
                .with_context(|| format!("parsing criteria file {}", path.display()))?
        }
        None => CriteriaInput::default(),
    };
    let criteria = FilterCriteria::from_input(&args.apply_to(base))?;

    let source = DataSource::new(&config.data_path);
    let table = source.load()?;
    let result = filter(&table, &criteria);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_report(&mut out, &result, &criteria, args)?;
    out.flush()?;
    Ok(())
}

fn print_report(
    out: &mut impl Write,
    result: &FilteredResult<'_>,
    criteria: &FilterCriteria,
    args: &QueryArgs,
) -> Result<()> {
    writeln!(out, "Filters: {criteria}")?;
    writeln!(out, "Number of responses: {}", count_of(result))?;

    if args.rows && !result.is_empty() {
        writeln!(out)?;
        let mut writer = csv::Writer::from_writer(&mut *out);
        writer.write_record(&result.table().column_names)?;
        for row in result.rows() {
            writer.write_record(row.values.iter().map(|v| v.as_text()))?;
        }
        writer.flush()?;
    }

    for question in &args.distribution {
        let counts = result.distribution(question)?;
        let label = find_likert(question).map(|(_, q)| q.label).unwrap_or_default();
        writeln!(out)?;
        writeln!(out, "### {question}: {label}")?;
        for (value, n) in counts.iter().enumerate() {
            writeln!(out, "  {}: {n}", value + 1)?;
        }
    }

    for column in &args.responses {
        let lines: Vec<String> = result.text_projection(column)?.collect();
        writeln!(out)?;
        writeln!(out, "### Responses for {column}")?;
        writeln!(out, "{}", lines.join("\n\n"))?;
    }
    Ok(())
}
