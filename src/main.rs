use anyhow::{bail, Context};
use colored::Colorize;
use env_logger::{Builder, Target};
use log::LevelFilter;
use rayon::prelude::*;
use regex::Regex;
use seqsieve::cli::Commands;
use seqsieve::rename::RenameMode;
use seqsieve::*;
use std::time::Instant;

fn main() {
    if let Err(why) = parse_cli() {
        eprintln!("{} {:#}", "ERROR:".bright_red().bold(), why);
        std::process::exit(1);
    }
}

pub fn parse_cli() -> anyhow::Result<()> {
    let pg_start = Instant::now();
    let args = cli::make_cli_parse();
    let matches = cli::make_cli_app().get_matches();
    let subcommand = matches.subcommand_name().unwrap_or_default().to_string();

    // set the logging level
    let min_log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .target(Target::Stderr)
        .filter(None, min_log_level)
        .init();

    log::debug!("DEBUG logging enabled");
    log::trace!("TRACE logging enabled");

    // set up number of threads to use globally
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    match &args.command {
        //
        // Run Filter
        //
        Some(Commands::Filter {
            fasta,
            min_length,
            max_length,
            output,
            named_output,
        }) => {
            let window = filter::LengthWindow::new(*min_length, *max_length)?;
            if *named_output {
                if output.is_some() {
                    bail!("--output conflicts with --named-output");
                }
                // one independent pass per file, no shared state
                fasta.par_iter().try_for_each(|infile| -> anyhow::Result<()> {
                    let (path, stats) = filter::run_filter_named(infile, window)
                        .with_context(|| format!("failed filtering {}", infile))?;
                    log::info!(
                        "{}: kept {} of {} records -> {}",
                        infile,
                        stats.kept,
                        stats.records,
                        path.display()
                    );
                    Ok(())
                })?;
            } else {
                if fasta.len() > 1 {
                    bail!("multiple inputs require --named-output");
                }
                let outfile = output.as_deref().unwrap_or("-");
                let stats = filter::run_filter(&fasta[0], outfile, window)
                    .with_context(|| format!("failed filtering {}", fasta[0]))?;
                log::info!(
                    "{}: kept {} of {} records",
                    fasta[0],
                    stats.kept,
                    stats.records
                );
            }
        }
        //
        // Run Rename
        //
        Some(Commands::Rename {
            fasta,
            prefix,
            pattern,
            replacement,
            strip_description,
            output,
            map,
        }) => {
            let mode = match (prefix, pattern, *strip_description) {
                (Some(p), None, false) => RenameMode::Prefix(p.clone()),
                (None, Some(re), false) => RenameMode::Pattern {
                    pattern: Regex::new(re)
                        .with_context(|| format!("invalid header pattern: {}", re))?,
                    replacement: replacement.clone().unwrap_or_default(),
                },
                (None, None, true) => RenameMode::StripDescription,
                _ => bail!("choose exactly one of --prefix, --pattern, or --strip-description"),
            };
            let renamed = rename::run_rename(fasta, output, map.as_deref(), &mode)
                .with_context(|| format!("failed renaming {}", fasta))?;
            log::info!("renamed {} headers", renamed);
        }
        //
        // Run Split
        //
        Some(Commands::Split {
            fastx,
            infile,
            records,
        }) => match records {
            Some(n) => {
                if !fastx.is_empty() {
                    bail!("--records conflicts with an explicit output file list");
                }
                if *n == 0 {
                    bail!("--records must be positive");
                }
                if infile == "-" {
                    bail!("--records needs a named input to derive part names from");
                }
                let parts = split::run_chunk_split(infile, *n)
                    .with_context(|| format!("failed splitting {}", infile))?;
                log::info!("wrote {} part files", parts.len());
            }
            None => {
                if fastx.is_empty() {
                    bail!("provide output files or --records");
                }
                let rec_num = split::run_split(fastx, infile)
                    .with_context(|| format!("failed splitting {}", infile))?;
                log::info!("split {} records across {} files", rec_num, fastx.len());
            }
        },
        //
        // Run Stats
        //
        Some(Commands::Stats {
            fastx,
            quantiles,
            genome_size,
            human,
        }) => {
            stats::run_stats(fastx, quantiles, *genome_size, *human)?;
        }
        //
        // Run Lengths
        //
        Some(Commands::Lengths { fastx }) => {
            stats::run_lengths(fastx)
                .with_context(|| format!("failed reading {}", fastx))?;
        }
        //
        // no command opt
        //
        None => {}
    };

    let duration = pg_start.elapsed();
    log::info!(
        "{} done! Time elapsed: {}",
        subcommand.bright_green().bold(),
        format!("{:.2?}", duration).bright_yellow().bold()
    );
    Ok(())
}
