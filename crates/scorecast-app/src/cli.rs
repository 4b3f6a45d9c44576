use clap::Parser;
use scorecast_baseball::format::RateStyle;

use crate::config::Config;

#[derive(Debug, Parser)]
#[clap(author, version)]
#[clap(name = "scorecast")]
#[clap(about = "Batting, scoring-situation and grade report for one analyzed game", long_about = None)]
pub struct Cli {
    /// Analysis document: a JSON file path or an http(s) URL. Overrides
    /// `source.location`.
    pub location: Option<String>,

    /// Write per-batter lines to this CSV file.
    #[clap(long)]
    pub csv: Option<String>,

    /// Print rates as 0.300 instead of .300.
    #[clap(long)]
    pub decimal: bool,

    /// How many run producers to list.
    #[clap(long)]
    pub top: Option<usize>,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(location) = &self.location {
            config.source.location = location.clone();
        }
        if let Some(csv) = &self.csv {
            config.export.csv_path = csv.clone();
        }
        if self.decimal {
            config.display.rate_style = RateStyle::Decimal;
        }
        if let Some(top) = self.top.filter(|&n| n > 0) {
            config.display.top_batters = top;
        }
    }
}
