//! Sequence length statistics in the style of assembly QC summaries.

use crate::error::Result;
use crate::myio;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use rayon::prelude::*;
use std::io::{self, BufWriter, Write};

/// Length summary for one file worth of records.
#[derive(Debug, Default)]
pub struct LengthSummary {
    pub total: usize,
    pub count: usize,
    pub mean: f64,
    pub quantiles: Vec<f64>,
    pub min: usize,
    pub max: usize,
    pub n50: usize,
    pub au_n: f64,
}

/// Summarize record lengths. Passing `genome_size` switches N50 to NG50
/// by using it as the total instead of the summed lengths.
pub fn summarize_lengths(
    lengths: &[usize],
    quantiles: &[f64],
    genome_size: Option<usize>,
) -> LengthSummary {
    let count = lengths.len();
    if count == 0 {
        return LengthSummary {
            quantiles: vec![0.0; quantiles.len()],
            ..Default::default()
        };
    }
    let total: usize = genome_size.unwrap_or_else(|| lengths.iter().sum());
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let max = sorted[0];
    let min = sorted[count - 1];
    let mean = total as f64 / count as f64;

    let au_n: f64 = sorted.iter().map(|&x| (x * x) as f64).sum::<f64>() / total as f64;

    let quantile_values = quantiles
        .iter()
        .map(|&q| {
            let idx = ((q * count as f64).ceil() as usize).saturating_sub(1);
            sorted.get(idx).copied().unwrap_or(0) as f64
        })
        .collect();

    let mut cumulative = 0;
    let mut n50 = 0;
    for &len in &sorted {
        cumulative += len;
        if cumulative >= total / 2 {
            n50 = len;
            break;
        }
    }

    LengthSummary {
        total,
        count,
        mean,
        quantiles: quantile_values,
        min,
        max,
        n50,
        au_n,
    }
}

/// Format a base-pair count with Kbp/Mbp/Gbp units.
pub fn h_fmt<T>(num: T) -> String
where
    T: Into<f64> + Copy,
{
    let mut num: f64 = num.into();
    for unit in ["", "Kbp", "Mbp"] {
        if num < 1000.0 {
            return format!("{:.2}{}", num, unit);
        }
        num /= 1000.0;
    }
    format!("{:.2}{}", num, "Gbp")
}

fn read_lengths(infile: &str) -> Result<Vec<usize>> {
    let mut reader = myio::fastx_reader(infile)?;
    let mut lengths = Vec::new();
    while let Some(record) = reader.next() {
        lengths.push(record?.seq().len());
    }
    Ok(lengths)
}

fn stats_row(
    infile: &str,
    quantiles: &[f64],
    genome_size: Option<usize>,
    human: bool,
) -> Result<String> {
    let lengths = read_lengths(infile)?;
    let summary = summarize_lengths(&lengths, quantiles, genome_size);

    let quantile_str = summary
        .quantiles
        .iter()
        .map(|q| {
            if human {
                h_fmt(*q)
            } else {
                q.to_string()
            }
        })
        .join("\t");

    let row = if human {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            infile,
            h_fmt(summary.total as f64),
            summary.count.to_formatted_string(&Locale::en),
            h_fmt(summary.mean),
            quantile_str,
            h_fmt(summary.min as f64),
            h_fmt(summary.max as f64),
            h_fmt(summary.n50 as f64),
            h_fmt(summary.au_n)
        )
    } else {
        format!(
            "{}\t{}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t{:.2}",
            infile,
            summary.total,
            summary.count,
            summary.mean,
            quantile_str,
            summary.min,
            summary.max,
            summary.n50,
            summary.au_n
        )
    };
    Ok(row)
}

/// Print one summary row per input file. Files are read in parallel,
/// rows come out in input order.
pub fn run_stats(
    infiles: &[String],
    quantiles: &[f64],
    genome_size: Option<usize>,
    human: bool,
) -> Result<()> {
    let rows = infiles
        .par_iter()
        .map(|f| stats_row(f, quantiles, genome_size, human))
        .collect::<Result<Vec<String>>>()?;

    println!("file\ttotalBp\tnSeqs\tmean\tquantiles\tmin\tmax\tN50\tauN");
    for row in rows {
        println!("{}", row);
    }
    Ok(())
}

/// Print `id<TAB>length` per record, in input order.
pub fn run_lengths(infile: &str) -> Result<()> {
    let mut reader = myio::fastx_reader(infile)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    while let Some(record) = reader.next() {
        let rec = record?;
        writeln!(
            out,
            "{}\t{}",
            String::from_utf8_lossy(rec.id()),
            rec.seq().len()
        )?;
    }
    out.flush()?;
    Ok(())
}
