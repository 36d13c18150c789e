//! Writes a synthetic `preprocessed_data.csv` with the survey's column layout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use survey_filter::data::schema::{CategoricalField, LikertGroup, TEXT_COLUMNS};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const SNIPPETS: &[&str] = &[
    "Finding enough time during student teaching",
    "Getting consent forms back from families",
    "My students were more capable than I expected",
    "Small-group work helped the quieter students",
    "I see myself as someone who can study my own practice",
    "I feel more confident making decisions from data",
    "Engagement went up during the intervention weeks",
    "Results were mixed, but I know what to try next",
];

/// Share of cells left empty to mimic skipped questions.
const SKIP_RATE: f64 = 0.05;

#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write a synthetic survey CSV")]
struct Args {
    /// Output file.
    #[arg(default_value = "preprocessed_data.csv")]
    output: PathBuf,

    /// Number of responses to generate.
    #[arg(default_value_t = 60)]
    rows: usize,
}

fn main() -> Result<()> {
    let Args { output, rows: n_rows } = Args::parse();

    let mut rng = SimpleRng::new(42);

    let questions: Vec<&str> = LikertGroup::ALL
        .into_iter()
        .flat_map(|g| g.questions().iter().map(|q| q.column))
        .collect();

    let mut header: Vec<&str> = CategoricalField::ALL.iter().map(|f| f.column()).collect();
    header.extend(&questions);
    header.extend(TEXT_COLUMNS);

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(&header)?;

    for _ in 0..n_rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());

        for field in CategoricalField::ALL {
            let code = rng.pick(field.categories()).code;
            record.push(if rng.chance(SKIP_RATE) { String::new() } else { code.to_string() });
        }

        // Likert columns come out of pandas as floats once any cell is missing.
        for _ in &questions {
            let value = 1 + rng.next_u64() % 5;
            record.push(if rng.chance(SKIP_RATE) { String::new() } else { format!("{value}.0") });
        }

        for _ in TEXT_COLUMNS {
            record.push(if rng.chance(SKIP_RATE) {
                String::new()
            } else {
                rng.pick(SNIPPETS).to_string()
            });
        }

        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {n_rows} responses ({} columns each) to {}",
        header.len(),
        output.display()
    );
    Ok(())
}
