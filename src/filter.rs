//! Streaming length filter for fasta records.
//!
//! Records are read line by line and buffered one at a time; a record is
//! emitted or discarded the moment its end is known (next header or end of
//! input), so memory stays bounded by the largest single record no matter
//! how big the file is. Emitted records keep their original header and
//! line wrapping untouched.

use crate::error::{Result, SieveError};
use crate::myio;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Inclusive length window a record must fall in to be kept.
#[derive(Debug, Clone, Copy)]
pub struct LengthWindow {
    min: u64,
    max: Option<u64>,
}

impl LengthWindow {
    /// Validate and build a window. The minimum must be positive and the
    /// maximum, when given, must not be below it.
    ///
    /// # Example
    /// ```
    /// use seqsieve::filter::LengthWindow;
    /// assert!(LengthWindow::new(200, None).is_ok());
    /// assert!(LengthWindow::new(200, Some(200)).is_ok());
    /// assert!(LengthWindow::new(0, None).is_err());
    /// assert!(LengthWindow::new(200, Some(199)).is_err());
    /// ```
    pub fn new(min: u64, max: Option<u64>) -> Result<LengthWindow> {
        if min == 0 || matches!(max, Some(m) if m < min) {
            return Err(SieveError::InvalidThreshold { min, max });
        }
        Ok(LengthWindow { min, max })
    }

    pub fn contains(&self, length: u64) -> bool {
        length >= self.min && self.max.map_or(true, |m| length <= m)
    }
}

/// Counts from one filter pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterStats {
    /// Records seen in the input.
    pub records: u64,
    /// Records that passed the length window.
    pub kept: u64,
}

/// Stream fasta text from `input` to `output`, keeping only records whose
/// sequence length falls inside `window`.
///
/// Length is the character count of the sequence with wrap boundaries
/// removed; trailing whitespace on a body line is not counted. Kept
/// records are written with their original wrapping. Input that carries
/// sequence data before the first `>` header is rejected.
///
/// # Example
/// ```
/// use seqsieve::filter::{filter_fasta, LengthWindow};
/// let fa = b">seq1\nACGT\nACGT\n>seq2\nAC\n";
/// let mut out = Vec::new();
/// let window = LengthWindow::new(5, None).unwrap();
/// let stats = filter_fasta(&fa[..], &mut out, window).unwrap();
/// assert_eq!(out, b">seq1\nACGT\nACGT\n");
/// assert_eq!((stats.records, stats.kept), (2, 1));
/// ```
pub fn filter_fasta<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    window: LengthWindow,
) -> Result<FilterStats> {
    let mut stats = FilterStats::default();
    let mut header: Option<String> = None;
    let mut body: Vec<String> = Vec::new();
    let mut length: u64 = 0;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.starts_with('>') {
            if let Some(prev) = header.take() {
                evaluate(output, window, &prev, &body, length, &mut stats)?;
            }
            header = Some(line);
            body.clear();
            length = 0;
        } else if header.is_none() {
            // blank lines before the first record are tolerated
            if line.trim().is_empty() {
                continue;
            }
            return Err(SieveError::MalformedInput { line: idx + 1 });
        } else {
            length += line.trim_end().len() as u64;
            body.push(line);
        }
    }
    // the record still open at end of input gets the same evaluation
    if let Some(prev) = header.take() {
        evaluate(output, window, &prev, &body, length, &mut stats)?;
    }
    Ok(stats)
}

fn evaluate<W: Write>(
    output: &mut W,
    window: LengthWindow,
    header: &str,
    body: &[String],
    length: u64,
    stats: &mut FilterStats,
) -> io::Result<()> {
    stats.records += 1;
    if window.contains(length) {
        writeln!(output, "{}", header)?;
        for line in body {
            writeln!(output, "{}", line)?;
        }
        stats.kept += 1;
    }
    Ok(())
}

/// Output name used for `--named-output`: `<input-base>_filtered.fa`.
pub fn derived_output_path(infile: &str) -> PathBuf {
    PathBuf::from(format!("{}_filtered.fa", myio::fasta_stem(infile)))
}

/// Filter `infile` into `outfile`, `-` meaning stdout.
pub fn run_filter(infile: &str, outfile: &str, window: LengthWindow) -> Result<FilterStats> {
    let reader = myio::reader(infile)?;
    if outfile == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let stats = filter_fasta(reader, &mut out, window)?;
        out.flush()?;
        Ok(stats)
    } else {
        filter_to_file(reader, Path::new(outfile), window)
    }
}

/// Filter `infile` into its derived `<input-base>_filtered.fa` sibling.
pub fn run_filter_named(infile: &str, window: LengthWindow) -> Result<(PathBuf, FilterStats)> {
    let path = derived_output_path(infile);
    let reader = myio::reader(infile)?;
    let stats = filter_to_file(reader, &path, window)?;
    Ok((path, stats))
}

/// Write through a temporary sibling and rename into place on success, so
/// a failed run never leaves a truncated output file behind.
fn filter_to_file<R: BufRead>(
    reader: R,
    path: &Path,
    window: LengthWindow,
) -> Result<FilterStats> {
    let tmp = tmp_path(path);
    let result = (|| -> Result<FilterStats> {
        let mut out = myio::file_writer(&tmp, myio::is_gz(path))?;
        let stats = filter_fasta(reader, &mut out, window)?;
        out.flush()?;
        Ok(stats)
    })();
    match result {
        Ok(stats) => {
            fs::rename(&tmp, path)?;
            Ok(stats)
        }
        Err(why) => {
            let _ = fs::remove_file(&tmp);
            Err(why)
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_str(input: &str, min: u64, max: Option<u64>) -> (String, FilterStats) {
        let window = LengthWindow::new(min, max).unwrap();
        let mut out = Vec::new();
        let stats = filter_fasta(input.as_bytes(), &mut out, window).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_min_threshold() {
        let (out, stats) = filter_str(">seq1\nACGT\nACGT\n>seq2\nAC\n", 5, None);
        assert_eq!(out, ">seq1\nACGT\nACGT\n");
        assert_eq!(stats.records, 2);
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn test_last_record_flushed_without_trailing_newline() {
        let (out, stats) = filter_str(">a\nAC\n>b\nACGTAC", 5, None);
        assert_eq!(out, ">b\nACGTAC\n");
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn test_length_is_wrap_independent() {
        let one_line = filter_str(">a\nACGTACGT\n", 8, Some(8)).0;
        let wrapped = filter_str(">a\nACG\nTA\nCGT\n", 8, Some(8)).0;
        assert_eq!(one_line, ">a\nACGTACGT\n");
        assert_eq!(wrapped, ">a\nACG\nTA\nCGT\n");
        // both pass the same window, each with its own wrapping intact
        assert!(filter_str(">a\nACG\nTA\nCGT\n", 9, None).0.is_empty());
    }

    #[test]
    fn test_empty_body_record_is_length_zero() {
        let (out, stats) = filter_str(">empty\n>full\nACGT\n", 1, None);
        assert_eq!(out, ">full\nACGT\n");
        assert_eq!(stats.records, 2);
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn test_order_preserved_and_idempotent() {
        let input = ">a\nACGTAC\n>b\nAC\n>c\nACGTACGT\n>d\nACGTA\n";
        let (once, stats) = filter_str(input, 5, None);
        assert_eq!(once, ">a\nACGTAC\n>c\nACGTACGT\n>d\nACGTA\n");
        assert_eq!(stats.kept, 3);
        let (twice, restats) = filter_str(&once, 5, None);
        assert_eq!(twice, once);
        assert_eq!(restats.records, restats.kept);
    }

    #[test]
    fn test_max_window() {
        let input = ">a\nAC\n>b\nACGT\n>c\nACGTACGT\n";
        let (out, _) = filter_str(input, 2, Some(4));
        assert_eq!(out, ">a\nAC\n>b\nACGT\n");
    }

    #[test]
    fn test_leading_body_is_malformed() {
        let window = LengthWindow::new(1, None).unwrap();
        let mut out = Vec::new();
        let err = filter_fasta(&b"ACGT\n>a\nACGT\n"[..], &mut out, window).unwrap_err();
        match err {
            SieveError::MalformedInput { line } => assert_eq!(line, 1),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_leading_lines_are_tolerated() {
        let (out, stats) = filter_str("\n\n>a\nACGT\n", 1, None);
        assert_eq!(out, ">a\nACGT\n");
        assert_eq!(stats.records, 1);
    }

    #[test]
    fn test_trailing_whitespace_not_counted_but_reemitted() {
        // 4 visible bases plus trailing spaces
        assert!(filter_str(">a\nACGT   \n", 5, None).0.is_empty());
        let (out, _) = filter_str(">a\nACGT   \n", 4, None);
        assert_eq!(out, ">a\nACGT   \n");
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(LengthWindow::new(0, None).is_err());
        assert!(LengthWindow::new(5, Some(4)).is_err());
        assert!(LengthWindow::new(5, Some(5)).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        let (out, stats) = filter_str("", 1, None);
        assert!(out.is_empty());
        assert_eq!(stats.records, 0);
    }

    #[test]
    fn test_derived_output_path() {
        assert_eq!(
            derived_output_path("asm.fa"),
            PathBuf::from("asm_filtered.fa")
        );
        assert_eq!(
            derived_output_path("reads.fasta.gz"),
            PathBuf::from("reads_filtered.fa")
        );
        assert_eq!(
            derived_output_path("plain"),
            PathBuf::from("plain_filtered.fa")
        );
    }
}
