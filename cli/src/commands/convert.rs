use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use scansheet_common::config::Config;
use scansheet_common::success;
use scansheet_core::pipeline;
use scansheet_formats::FileTables;

use crate::terminal::{format, print, spinner};

pub fn convert(input: &Path, output: &Path, cfg: &Config) -> anyhow::Result<()> {
    let tables = if cfg.stripe {
        FileTables::striped()
    } else {
        FileTables::new()
    };

    let started = Instant::now();
    let report = {
        let _spinner = spinner::start(format!("Converting {}", input.display()), cfg.quiet);
        pipeline::convert(input, output, &tables, cfg)
            .with_context(|| format!("could not convert {}", input.display()))?
    };
    let elapsed = started.elapsed();

    if cfg.quiet < 2 {
        print::set_key_width(["Hosts", "Without findings", "Findings", "Columns", "Unscored"]);
        print::aligned_line("Hosts", format::count(report.extract.hosts));
        print::aligned_line(
            "Without findings",
            format::count(report.extract.hosts_without_findings),
        );
        print::aligned_line("Findings", format::count(report.rows));
        print::aligned_line("Columns", format::count(report.extract.columns));
        print::aligned_line("Unscored", format::problem_count(report.coerced));
        print::fat_separator();
    }

    success!(
        "Wrote {} findings to {} in {}",
        format::count(report.rows),
        format::path(output),
        format::elapsed(elapsed)
    );
    Ok(())
}
