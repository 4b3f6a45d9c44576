// Per-batter CSV export.

use scorecast_baseball::format::{format_rate, RateStyle};
use scorecast_baseball::grade::{grade, StatKind};
use scorecast_baseball::stats::BatterLine;
use scorecast_core::document::GameMetadata;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row. Rates are written as plain decimals so spreadsheets parse
/// them as numbers.
#[derive(Debug, Serialize)]
struct BatterRow<'a> {
    game_id: &'a str,
    batter: &'a str,
    side: &'a str,
    pa: u32,
    ab: u32,
    h: u32,
    hr: u32,
    rbi: u32,
    bb: u32,
    k: u32,
    avg: String,
    obp: String,
    slg: String,
    ops: String,
    ops_grade: &'static str,
}

impl<'a> BatterRow<'a> {
    fn new(game: &'a GameMetadata, line: &'a BatterLine) -> Self {
        let s = &line.stats;
        BatterRow {
            game_id: &game.game_id,
            batter: &line.batter,
            side: game.owner_label(line.owner),
            pa: s.plate_appearances(),
            ab: s.at_bats,
            h: s.hits,
            hr: s.home_runs,
            rbi: s.rbis,
            bb: s.walks,
            k: s.strikeouts,
            avg: format_rate(s.average, RateStyle::Decimal),
            obp: format_rate(s.obp, RateStyle::Decimal),
            slg: format_rate(s.slg, RateStyle::Decimal),
            ops: format_rate(s.ops, RateStyle::Decimal),
            ops_grade: grade(s.ops, StatKind::Ops).label(),
        }
    }
}

/// Write batter lines to any writer, header first.
pub fn write_batters_to<W: Write>(
    writer: W,
    game: &GameMetadata,
    lines: &[BatterLine],
) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for line in lines {
        out.serialize(BatterRow::new(game, line))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write batter lines to `path`, creating parent directories as needed.
pub fn write_batters(path: &Path, game: &GameMetadata, lines: &[BatterLine]) -> Result<(), ExportError> {
    let io_err = |e: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_batters_to(file, game, lines)?;

    info!(path = %path.display(), rows = lines.len(), "wrote batter CSV");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
