use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{error, info};

use crate::codec::{read_source, write_sink};
use crate::error::{Result, ShuffleError};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct ShuffleConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Fixed seed for reproducible output; `None` draws one from the OS.
    pub seed: Option<i64>,
    /// Treat the first input line as a header and re-emit it first.
    pub has_header: bool,
    pub delimiter: u8,
}

impl ShuffleConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        seed: Option<i64>,
        has_header: bool,
        delimiter: &str,
    ) -> Result<Self> {
        Ok(Self {
            input: input.into(),
            output: output.into(),
            seed,
            has_header,
            delimiter: parse_delimiter(delimiter)?,
        })
    }
}

fn parse_delimiter(delimiter: &str) -> Result<u8> {
    if delimiter == "\\t" {
        return Ok(b'\t');
    }
    match delimiter.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
        _ => Err(ShuffleError::InvalidConfig(format!(
            "delimiter must be a single ASCII character other than a quote or newline, got {:?}",
            delimiter
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleSummary {
    /// Data rows written, header excluded.
    pub rows: usize,
    pub header_written: bool,
    pub output: PathBuf,
}

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<i64>) -> StdRng {
    match seed {
        // two's complement bits, so negative seeds are distinct and stable
        Some(seed) => StdRng::seed_from_u64(seed as u64),
        None => StdRng::from_os_rng(),
    }
}

/// Uniformly random ordering of `0..n` (Fisher–Yates, n-1 draws).
pub fn permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

impl Table {
    /// Rearrange rows so that row `i` of the result is the old row `order[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is not a permutation of `0..self.len()`; no row is
    /// ever dropped or duplicated.
    pub fn reorder(&mut self, order: &[usize]) {
        assert_eq!(
            order.len(),
            self.rows.len(),
            "order has {} entries for {} rows",
            order.len(),
            self.rows.len()
        );
        let mut slots: Vec<Option<Vec<String>>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = order
            .iter()
            .map(|&i| {
                slots[i]
                    .take()
                    .unwrap_or_else(|| panic!("row {} appears more than once in order", i))
            })
            .collect();
    }
}

/// Read `config.input`, permute its data rows and write them to
/// `config.output`. Any failure is logged once and returned.
#[tracing::instrument(
    level = "info",
    skip(config),
    fields(input = %config.input.display(), output = %config.output.display())
)]
pub async fn shuffle_file(config: &ShuffleConfig) -> Result<ShuffleSummary> {
    run(config).await.inspect_err(|e| match e {
        ShuffleError::NotFound { .. } => error!("File error: {}", e),
        _ => error!("An error occurred: {}", e),
    })
}

async fn run(config: &ShuffleConfig) -> Result<ShuffleSummary> {
    if !config.input.exists() {
        return Err(ShuffleError::NotFound {
            path: config.input.clone(),
        });
    }

    info!("Reading data from {}...", config.input.display());
    let bytes = read_source(&config.input)
        .await
        .map_err(|source| ShuffleError::Read {
            path: config.input.clone(),
            source,
        })?;
    let mut table = Table::parse(&bytes, config.has_header, config.delimiter).map_err(
        |source| ShuffleError::Parse {
            path: config.input.clone(),
            source,
        },
    )?;
    drop(bytes);

    if let Some(seed) = config.seed {
        info!("Using seed {} for shuffling.", seed);
    }
    let mut rng = make_rng(config.seed);

    info!(rows = table.len(), "Shuffling data...");
    let order = permutation(table.len(), &mut rng);
    table.reorder(&order);

    info!("Writing shuffled data to {}...", config.output.display());
    let out = table
        .to_bytes(config.delimiter)
        .map_err(|source| ShuffleError::Serialize { source })?;
    write_sink(&config.output, &out)
        .await
        .map_err(|source| ShuffleError::Write {
            path: config.output.clone(),
            source,
        })?;

    info!("Data shuffling complete.");
    Ok(ShuffleSummary {
        rows: table.len(),
        header_written: table.header.is_some(),
        output: config.output.clone(),
    })
}
