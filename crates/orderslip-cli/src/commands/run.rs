//! Vendor batch execution.
//!
//! Configs are loaded once here and handed to the converters by value at
//! construction; nothing is re-read or looked up globally during a run.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::{Datelike, Local};
use clap::{Args, ValueEnum};
use console::style;

use orderslip_core::models::config::{
    CbConfig, LotteConfig, MiniConfig, SatraConfig, SmileCheersConfig,
};
use orderslip_core::vendors::{
    CbConverter, CoopConverter, GenshaiConverter, LotteConverter, MiniConverter, SatraConverter,
    SmileCheersConverter,
};
use orderslip_core::{
    run_batch, Converter, PathConfig, PureOcrEngine, RunLog, RunSummary,
};

/// Supported vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VendorName {
    Cb,
    SmileCheers,
    Satra,
    Lotte,
    Genshai,
    Mini,
    Coop,
}

impl VendorName {
    pub const ALL: [VendorName; 7] = [
        VendorName::Cb,
        VendorName::SmileCheers,
        VendorName::Satra,
        VendorName::Lotte,
        VendorName::Genshai,
        VendorName::Mini,
        VendorName::Coop,
    ];

    fn key(self) -> &'static str {
        match self {
            VendorName::Cb => "cb",
            VendorName::SmileCheers => "smile_cheers",
            VendorName::Satra => "satra",
            VendorName::Lotte => "lotte",
            VendorName::Genshai => "genshai",
            VendorName::Mini => "mini",
            VendorName::Coop => "coop",
        }
    }

    /// Vendors whose scripts appended to an existing log keep doing so;
    /// the others start a fresh log each run.
    fn appends_log(self) -> bool {
        matches!(
            self,
            VendorName::Cb | VendorName::SmileCheers | VendorName::Satra
        )
    }
}

impl fmt::Display for VendorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Vendor to convert
    #[arg(value_enum)]
    vendor: VendorName,
}

/// Arguments for the all command.
#[derive(Args)]
pub struct AllArgs {
    /// Keep going when a vendor run fails
    #[arg(long)]
    continue_on_error: bool,
}

pub async fn run(args: RunArgs, config_dir: &Path) -> anyhow::Result<()> {
    let paths = load_paths(config_dir)?;
    run_vendor(args.vendor, &paths, config_dir)
}

pub async fn run_all(args: AllArgs, config_dir: &Path) -> anyhow::Result<()> {
    let paths = load_paths(config_dir)?;

    for vendor in VendorName::ALL {
        if let Err(e) = run_vendor(vendor, &paths, config_dir) {
            if args.continue_on_error {
                eprintln!("{} {vendor}: {e:#}", style("✗").red());
            } else {
                return Err(e);
            }
        }
    }

    Ok(())
}

fn load_paths(config_dir: &Path) -> anyhow::Result<PathConfig> {
    PathConfig::from_file(&config_dir.join("paths.json")).context("loading paths.json")
}

fn build_converter(
    vendor: VendorName,
    paths: &PathConfig,
    config_dir: &Path,
) -> anyhow::Result<Box<dyn Converter>> {
    let default_year = Local::now().year();
    let map = |name: &str| config_dir.join(name);

    Ok(match vendor {
        VendorName::Cb => Box::new(CbConverter::new(
            CbConfig::from_file(&map("column_map_cb.json"))?,
            default_year,
        )),
        VendorName::SmileCheers => Box::new(SmileCheersConverter::new(
            SmileCheersConfig::from_file(&map("column_map_smile_cheers.json"))?,
        )),
        VendorName::Satra => Box::new(SatraConverter::new(
            SatraConfig::from_file(&map("column_map_satra.json"))?,
            default_year,
        )),
        VendorName::Lotte => Box::new(LotteConverter::new(LotteConfig::from_file(
            &map("column_map_lotte.json"),
        )?)),
        VendorName::Genshai => Box::new(GenshaiConverter::new()),
        VendorName::Mini => Box::new(MiniConverter::new(MiniConfig::from_file(
            &map("column_map_mini.json"),
        )?)),
        VendorName::Coop => {
            let model_dir = paths.dir("models_coop")?;
            let engine = PureOcrEngine::from_dir(model_dir)
                .map_err(|e| anyhow::anyhow!("loading OCR models: {e}"))?;
            Box::new(CoopConverter::new(Box::new(engine), default_year))
        }
    })
}

fn run_vendor(vendor: VendorName, paths: &PathConfig, config_dir: &Path) -> anyhow::Result<()> {
    let converter = build_converter(vendor, paths, config_dir)?;

    let input_dir = paths.dir(&format!("input_{}", vendor.key()))?;
    let output_dir = paths.dir(&format!("output_{}", vendor.key()))?;
    let log_path = output_dir.join(format!("parse_{}.log", vendor.key()));

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let mut log = if vendor.appends_log() {
        RunLog::append(&log_path)?
    } else {
        RunLog::fresh(&log_path)?
    };

    let summary = run_batch(converter.as_ref(), input_dir, output_dir, &mut log)
        .with_context(|| format!("running {vendor}"))?;

    print_summary(vendor, &summary);

    // Tail of the log echoed to the console, as the old scripts did
    if log_path.exists() {
        for line in RunLog::tail(&log_path, 10)? {
            println!("{line}");
        }
    } else {
        println!("No log file found.");
    }

    Ok(())
}

fn print_summary(vendor: VendorName, summary: &RunSummary) {
    println!(
        "{} {}: {} files seen, {} converted, {} documents written",
        style("✓").green(),
        vendor,
        summary.files_seen,
        summary.files_converted,
        summary.documents_written
    );

    if !summary.failures.is_empty() {
        println!("{}", style("Failed files:").red());
        for failure in &summary.failures {
            println!("  - {}: {}", failure.file, failure.error);
        }
    }
}
