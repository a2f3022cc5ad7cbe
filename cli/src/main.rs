use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use snapimg::cli::{Cli, Command};
use snapimg::io::{collect_files, load_selection, write_file};
use snapimg::observer::TerminalObserver;
use snapimg::report::{format_size, Report};
use snapimg_core::catalog::TOOLS;
use snapimg_core::config::{ProcessingConfig, TargetFormat};
use snapimg_core::processor::converter_for;
use snapimg_core::{Session, SessionState};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match &cli.command {
        Command::Convert {
            inputs,
            output,
            to,
            quality,
            jobs,
            exclude,
            archive_name,
            recursive,
        } => {
            let config = cli.to_config(*quality, *jobs, archive_name);
            handle_convert(inputs, output, *to, exclude, *recursive, config)
        }
        Command::Preview {
            inputs,
            output,
            size,
            recursive,
        } => handle_preview(inputs, output, *size, *recursive),
        Command::Tools => {
            handle_tools();
            Ok(())
        }
    }
}

fn handle_convert(
    inputs: &[PathBuf],
    output: &Path,
    target: TargetFormat,
    exclude: &[usize],
    recursive: bool,
    config: ProcessingConfig,
) -> Result<()> {
    let paths = collect_files(inputs, recursive).context("Failed to collect input files")?;
    let files = load_selection(&paths).context("Failed to read input files")?;

    let mut session = Session::new(converter_for(target), config);
    if !session.accept(files) {
        println!("No supported files found.");
        return Ok(());
    }

    // Highest index first so earlier removals don't shift later ones.
    let mut exclude = exclude.to_vec();
    exclude.sort_unstable();
    exclude.dedup();
    for &index in exclude.iter().rev() {
        let removed = session
            .remove(index)
            .with_context(|| format!("Cannot exclude file #{index}"))?;
        println!("Excluded #{index}: {}", removed.name);
    }

    let original_size = session.selection().total_size();
    println!(
        "Converting {} file(s) to {}...",
        session.selection().len(),
        target.as_str()
    );

    let observer = TerminalObserver::new(session.selection().len());
    let outcome = session.process(&observer)?;
    observer.finish("Done!");

    let report = Report::new(&outcome, original_size);
    if session.state() == SessionState::NoResults {
        report.print_summary(None);
        return Ok(());
    }

    let download = session.download(&observer)?;
    let path = output.join(download.name());
    write_file(&path, download.data())
        .with_context(|| format!("Failed to save {}", path.display()))?;

    report.print_summary(Some(&download));
    Ok(())
}

fn handle_preview(inputs: &[PathBuf], output: &Path, size: u32, recursive: bool) -> Result<()> {
    let paths = collect_files(inputs, recursive).context("Failed to collect input files")?;
    let files = load_selection(&paths).context("Failed to read input files")?;

    let config = ProcessingConfig {
        thumbnail_size: size,
        ..ProcessingConfig::default()
    };
    let mut session = Session::new(converter_for(TargetFormat::Jpg), config);
    if !session.accept(files) {
        println!("No supported files found.");
        return Ok(());
    }

    for preview in session.preview() {
        let dims = preview
            .dimensions
            .map(|(w, h)| format!("{w}x{h}"))
            .unwrap_or_else(|| "?".into());
        match &preview.thumbnail {
            Some(png) => {
                let path = output.join(format!("{:03}-{}.png", preview.index, preview.name));
                write_file(&path, png)
                    .with_context(|| format!("Failed to save {}", path.display()))?;
                println!("#{:<3} {} ({}) → {}", preview.index, preview.name, dims, path.display());
            }
            None => println!("#{:<3} {} (no preview)", preview.index, preview.name),
        }
    }

    println!(
        "{} files selected ({})",
        session.selection().len(),
        format_size(session.selection().total_size())
    );
    Ok(())
}

fn handle_tools() {
    for tool in TOOLS {
        println!("{:<16} {:<16} {}", tool.slug, tool.title, tool.description);
    }
}
