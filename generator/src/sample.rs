//! Synthetic CSV data for trying the site out.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use rand::Rng;
use rand_distr::StandardNormal;

pub const DEMO_CSV: &str = "demo.csv";
const DEMO_CONTENT: &str = "col1,col2,col3,col4,col5,col6,col7\ndata,data,data,data,data,data,last_data";

/// Size of the grid of values, header row not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleShape {
    pub rows: usize,
    pub columns: usize,
}

impl Default for SampleShape {
    fn default() -> Self {
        Self {
            rows: 15,
            columns: 8,
        }
    }
}

/// Write one `data_<YYYYmmdd_HHMMSS>.csv` of standard-normal values into `dir`.
///
/// A second call within the same second never overwrites the first file:
/// the name gets a `_1`, `_2`, ... suffix instead.
pub fn generate_random_csv<R: Rng + ?Sized>(
    dir: impl AsRef<Path>,
    shape: SampleShape,
    timestamp: chrono::NaiveDateTime,
    rng: &mut R,
) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("failed to create dir: {}", dir.display()))?;

    let stem = format!("data_{}", timestamp.format("%Y%m%d_%H%M%S"));
    let (path, file) = create_unique(dir, &stem)?;

    let mut writer = io::BufWriter::new(file);
    write_grid(&mut writer, shape, rng)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write: {}", path.display()))?;

    Ok(path)
}

/// Create `dir` with a small demo CSV when it does not exist at all.
///
/// Returns the demo file path if one was written.
pub fn ensure_sample_source(dir: impl AsRef<Path>) -> anyhow::Result<Option<PathBuf>> {
    let dir = dir.as_ref();

    if dir.try_exists()? {
        return Ok(None);
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create dir: {}", dir.display()))?;
    let path = dir.join(DEMO_CSV);
    fs::write(&path, DEMO_CONTENT)
        .with_context(|| format!("failed to write: {}", path.display()))?;

    Ok(Some(path))
}

const MAX_SUFFIX: u32 = 1_000;

fn create_unique(dir: &Path, stem: &str) -> anyhow::Result<(PathBuf, fs::File)> {
    for n in 0..=MAX_SUFFIX {
        let name = if n == 0 {
            format!("{stem}.csv")
        } else {
            format!("{stem}_{n}.csv")
        };
        let path = dir.join(name);

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(e).with_context(|| format!("failed to create: {}", path.display()));
            }
        }
    }

    anyhow::bail!(
        "no free file name for `{}` in {} after {} attempts",
        stem,
        dir.display(),
        MAX_SUFFIX
    )
}

fn write_grid<R: Rng + ?Sized>(
    w: &mut impl io::Write,
    shape: SampleShape,
    rng: &mut R,
) -> io::Result<()> {
    let header: Vec<_> = (1..=shape.columns).map(|i| format!("metric_{i}")).collect();
    writeln!(w, "{}", header.join(","))?;

    for _ in 0..shape.rows {
        let row: Vec<_> = (0..shape.columns)
            .map(|_| rng.sample::<f64, _>(StandardNormal).to_string())
            .collect();
        writeln!(w, "{}", row.join(","))?;
    }

    Ok(())
}
