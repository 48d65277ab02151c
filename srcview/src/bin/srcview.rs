// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{stdout, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{crate_version, Args, Parser, Subcommand};
use srcview::term::{write_document, write_tree};
use srcview::viewer::Event;
use srcview::{
    coverage_title, format_percent, percent, CoverageModel, CoverageReport, FsSourceReader,
    Viewer, ViewerConfig,
};

/// Display source coverage reports
#[derive(Parser, Debug)]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tree of source files in a report
    Tree(TreeOpt),
    /// Print a source file annotated with its coverage
    Show(ShowOpt),
    /// Print block coverage per file
    Summary(ReportOpt),
    Version,
}

#[derive(Args, Debug)]
struct ReportOpt {
    /// JSON coverage report
    report_path: PathBuf,

    /// JSON viewer config
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Only show source paths matching this regex
    #[arg(long)]
    include: Option<String>,
}

#[derive(Args, Debug)]
struct TreeOpt {
    #[command(flatten)]
    report: ReportOpt,

    /// Only show top-level nodes
    #[arg(long)]
    collapsed: bool,
}

#[derive(Args, Debug)]
struct ShowOpt {
    #[command(flatten)]
    report: ReportOpt,

    /// Source path, as it appears in the report
    file: String,

    /// Directory that relative source paths are resolved against
    #[arg(long)]
    root: Option<PathBuf>,

    #[arg(long)]
    no_color: bool,
}

impl ReportOpt {
    fn config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config_path {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        if self.include.is_some() {
            config.include = self.include.clone();
        }

        Ok(config)
    }

    fn load(&self, config: &ViewerConfig) -> Result<(CoverageReport, String)> {
        let report = CoverageReport::load(&self.report_path)?;

        let title = config
            .title
            .clone()
            .or_else(|| report.title.clone())
            .or_else(|| {
                self.report_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| self.report_path.display().to_string());

        Ok((report, title))
    }

    fn open(&self, config: &ViewerConfig) -> Result<Viewer<CoverageReport, FsSourceReader>> {
        let (model, title) = self.load(config)?;

        let reader = FsSourceReader::new(config.source_root.clone());
        let mut viewer = Viewer::new(reader, config)?;
        viewer.handle(Event::OpenReport { model, title })?;

        Ok(viewer)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Opt::parse();

    match opt.command {
        Command::Tree(opts) => tree(opts)?,
        Command::Show(opts) => show(opts)?,
        Command::Summary(opts) => summary(opts)?,
        Command::Version => version(),
    };

    Ok(())
}

fn version() {
    println!("{}", crate_version!());
}

fn tree(opts: TreeOpt) -> Result<()> {
    let config = opts.report.config()?;
    let mut viewer = opts.report.open(&config)?;

    if !opts.collapsed {
        viewer.handle(Event::ExpandAll(None))?;
    }

    let model = match viewer.model() {
        Some(model) => model,
        None => bail!("no report loaded"),
    };

    let mut out = stdout().lock();
    writeln!(out, "{}", viewer.title())?;
    write_tree(&mut out, viewer.tree(), viewer.state(), model)?;

    Ok(())
}

fn show(opts: ShowOpt) -> Result<()> {
    let mut config = opts.report.config()?;
    if opts.root.is_some() {
        config.source_root = opts.root.clone();
    }
    let color = config.color && !opts.no_color;

    let mut viewer = opts.report.open(&config)?;
    viewer.handle(Event::Select(opts.file.clone()))?;

    let document = match viewer.document() {
        Some(document) if document.path == opts.file => document,
        _ => bail!("unable to open source file from report: {}", opts.file),
    };

    let mut out = stdout().lock();
    writeln!(out, "{}", viewer.title())?;
    write_document(&mut out, &document.rendered, color)?;

    Ok(())
}

fn summary(opts: ReportOpt) -> Result<()> {
    let config = opts.config()?;
    let (mut report, title) = opts.load(&config)?;

    if let Some(include) = config.include_regex()? {
        report.retain_matching(&include);
    }

    let (covered, total) = report.total_block_counts();

    let mut out = stdout().lock();
    writeln!(out, "{}", coverage_title(&title, covered, total))?;

    for path in report.src_files() {
        let (covered, not_covered) = report.file_block_counts(path);
        let total = covered + not_covered;

        writeln!(
            out,
            "{path}: {covered}/{total} ({} %)",
            format_percent(percent(covered, total))
        )?;
    }

    Ok(())
}
