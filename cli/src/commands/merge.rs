use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, ensure};
use scansheet_common::config::Config;
use scansheet_common::success;
use scansheet_core::pipeline;
use scansheet_formats::FileTables;

use crate::terminal::{format, print, spinner};

pub fn merge(count: usize, output: &Path, inputs: &[PathBuf], cfg: &Config) -> anyhow::Result<()> {
    ensure!(
        count == inputs.len(),
        "expected {count} input files but {} were given",
        inputs.len()
    );

    let tables = if cfg.stripe {
        FileTables::striped()
    } else {
        FileTables::new()
    };

    let started = Instant::now();
    let report = {
        let _spinner = spinner::start(format!("Merging {count} tables"), cfg.quiet);
        pipeline::merge(inputs, output, &tables, &tables)
            .with_context(|| format!("could not write {}", output.display()))?
    };
    let elapsed = started.elapsed();

    if cfg.quiet < 2 {
        print::set_key_width([
            "Sources",
            "Skipped",
            "Rows",
            "Duplicates",
            "Unscored",
            "Dedup",
            "Sort",
        ]);
        print::aligned_line("Sources", format::count(report.sources));
        print::aligned_line("Skipped", format::problem_count(report.skipped.len()));
        print::aligned_line("Rows", format::count(report.rows));
        print::aligned_line("Duplicates", format::count(report.duplicates));
        print::aligned_line("Unscored", format::problem_count(report.coerced));
        print::aligned_line("Dedup", format::capability(report.dedup));
        print::aligned_line("Sort", format::capability(report.severity));
        print::fat_separator();
    }

    success!(
        "Merged {} rows into {} in {}",
        format::count(report.rows),
        format::path(output),
        format::elapsed(elapsed)
    );
    Ok(())
}
