use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use penguins_dashboard::data::model::{Column, Penguin};

/// Per-species generation parameters: (mean, std-dev) of each measurement.
struct SpeciesProfile {
    name: &'static str,
    islands: &'static [&'static str],
    count: usize,
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper_length: (f64, f64),
    body_mass: (f64, f64),
}

const PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        islands: &["Biscoe", "Dream", "Torgersen"],
        count: 152,
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
    },
    SpeciesProfile {
        name: "Chinstrap",
        islands: &["Dream"],
        count: 68,
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (196.0, 7.1),
        body_mass: (3733.0, 384.0),
    },
    SpeciesProfile {
        name: "Gentoo",
        islands: &["Biscoe"],
        count: 124,
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.0, 6.5),
        body_mass: (5076.0, 504.0),
    },
];

/// Every n-th generated row has its measurements left missing.
const MISSING_EVERY: usize = 97;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, (mean, std_dev): (f64, f64)) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_to(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

fn generate(rng: &mut SimpleRng) -> Vec<Penguin> {
    let mut rows = Vec::new();
    for profile in &PROFILES {
        for _ in 0..profile.count {
            let missing = (rows.len() + 1) % MISSING_EVERY == 0;
            let measure = |rng: &mut SimpleRng, params, step| {
                let v = round_to(rng.gauss(params), step);
                (!missing).then_some(v)
            };
            let penguin = Penguin {
                species: profile.name.to_string(),
                island: rng.pick(profile.islands).to_string(),
                bill_length_mm: measure(rng, profile.bill_length, 0.1),
                bill_depth_mm: measure(rng, profile.bill_depth, 0.1),
                flipper_length_mm: measure(rng, profile.flipper_length, 1.0),
                body_mass_g: measure(rng, profile.body_mass, 25.0),
                sex: (!missing).then(|| rng.pick(&["male", "female"]).to_string()),
                year: Some(2007 + (rng.next_u64() % 3) as i64),
            };
            rows.push(penguin);
        }
    }
    rows
}

fn write_parquet(rows: &[Penguin], path: &str) -> Result<()> {
    let text = |f: fn(&Penguin) -> Option<&str>| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |c: Column| -> ArrayRef {
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.measurement(c)).collect::<Vec<_>>(),
        ))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(Column::Species.name(), DataType::Utf8, false),
        Field::new(Column::Island.name(), DataType::Utf8, false),
        Field::new(Column::BillLengthMm.name(), DataType::Float64, true),
        Field::new(Column::BillDepthMm.name(), DataType::Float64, true),
        Field::new(Column::FlipperLengthMm.name(), DataType::Float64, true),
        Field::new(Column::BodyMassG.name(), DataType::Float64, true),
        Field::new(Column::Sex.name(), DataType::Utf8, true),
        Field::new(Column::Year.name(), DataType::Int64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| Some(r.species.as_str())),
            text(|r| Some(r.island.as_str())),
            number(Column::BillLengthMm),
            number(Column::BillDepthMm),
            number(Column::FlipperLengthMm),
            number(Column::BodyMassG),
            text(|r| r.sex.as_deref()),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_csv(rows: &[Penguin], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record(Column::ALL.iter().map(|c| c.name()))?;
    for row in rows {
        writer.write_record(Column::ALL.iter().map(|&c| row.cell(c).to_string()))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_parquet(&rows, "penguins_sample.parquet")?;
    write_csv(&rows, "penguins_sample.csv")?;

    println!(
        "Wrote {} penguins to penguins_sample.parquet and penguins_sample.csv",
        rows.len()
    );
    Ok(())
}
