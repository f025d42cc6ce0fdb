use anyhow::{Context, Result};

/// Seeded splitmix64 stream, so repeated runs write the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const FIRST_NAMES: [&str; 8] = ["Alice", "Bob", "Carl", "Dana", "Eve", "Farid", "Gina", "Hugo"];
const LAST_NAMES: [&str; 6] = ["Martin", "Bernard", "Dubois", "Smith, Jr", "Moreau", "Laurent"];
const CITIES: [&str; 6] = ["Paris", "Lyon", "Marseille", "Lille", "Paris La Défense", "Nantes"];
const DEPARTMENTS: [&str; 4] = ["Sales", "Engineering", "Support", "Finance"];
const NOTES: [&str; 5] = ["", "call back", "VIP; prefers email", "moved from Lyon", "duplicate?"];

fn main() -> Result<()> {
    let rows: usize = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("row count '{arg}' is not a number"))?,
        None => 200,
    };
    let mut rng = SampleRng(42);

    let output_path = "sample_people.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Id", "Name", "City", "Department", "Age", "Salary", "Active", "Notes"])?;

    for id in 1..=rows {
        let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
        let city = rng.pick(&CITIES);
        let department = rng.pick(&DEPARTMENTS);
        // Roughly one age in ten is left blank.
        let age = if rng.below(10) == 0 {
            String::new()
        } else {
            (20 + rng.below(45)).to_string()
        };
        let salary = format!("{:.2}", 28_000.0 + rng.unit() * 60_000.0);
        let active = if rng.below(4) == 0 { "False" } else { "True" };
        let notes = rng.pick(&NOTES);

        writer.write_record([
            id.to_string().as_str(),
            name.as_str(),
            city,
            department,
            age.as_str(),
            salary.as_str(),
            active,
            notes,
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
