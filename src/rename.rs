//! Rewrite fasta headers without touching the sequence body.

use crate::error::{Result, SieveError};
use crate::myio;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, Write};

lazy_static! {
    static ref ID_RE: Regex = Regex::new(r"^\S+").unwrap();
}

/// How each header is rewritten. Exactly one mode applies per run.
pub enum RenameMode {
    /// Replace header i (1-based) with `<prefix>_<i>`.
    Prefix(String),
    /// Apply a regex substitution to the header text after `>`.
    Pattern { pattern: Regex, replacement: String },
    /// Keep only the identifier, dropping everything after the first
    /// whitespace.
    StripDescription,
}

impl RenameMode {
    fn apply(&self, header: &str, index: u64) -> String {
        match self {
            RenameMode::Prefix(prefix) => format!("{}_{}", prefix, index),
            RenameMode::Pattern {
                pattern,
                replacement,
            } => pattern.replace_all(header, replacement.as_str()).into_owned(),
            RenameMode::StripDescription => ID_RE
                .find(header)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Stream fasta from `input` to `output` with headers rewritten by `mode`.
/// Body lines pass through verbatim. When `map_out` is given, one
/// `old<TAB>new` row is written per header.
///
/// # Example
/// ```
/// use seqsieve::rename::{rename_fasta, RenameMode};
/// let fa = b">k141_33 flag=1\nACGT\n>k141_50 flag=0\nGG\n";
/// let mut out = Vec::new();
/// let mode = RenameMode::Prefix("contig".to_string());
/// let n = rename_fasta(&fa[..], &mut out, None, &mode).unwrap();
/// assert_eq!(n, 2);
/// assert_eq!(out, b">contig_1\nACGT\n>contig_2\nGG\n");
/// ```
pub fn rename_fasta<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    mut map_out: Option<&mut dyn Write>,
    mode: &RenameMode,
) -> Result<u64> {
    let mut renamed: u64 = 0;
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if let Some(old) = line.strip_prefix('>') {
            renamed += 1;
            let new = mode.apply(old, renamed);
            writeln!(output, ">{}", new)?;
            if let Some(map) = map_out.as_deref_mut() {
                writeln!(map, "{}\t{}", old, new)?;
            }
        } else if renamed == 0 && !line.trim().is_empty() {
            return Err(SieveError::MalformedInput { line: idx + 1 });
        } else {
            writeln!(output, "{}", line)?;
        }
    }
    Ok(renamed)
}

/// CLI driver: open the input, output, and optional mapping table.
pub fn run_rename(
    infile: &str,
    outfile: &str,
    map: Option<&str>,
    mode: &RenameMode,
) -> Result<u64> {
    let reader = myio::reader(infile)?;
    let mut out = myio::writer(outfile)?;
    let renamed = match map {
        Some(map_file) => {
            let mut map_out = myio::writer(map_file)?;
            let n = rename_fasta(reader, &mut out, Some(&mut *map_out), mode)?;
            map_out.flush()?;
            n
        }
        None => rename_fasta(reader, &mut out, None, mode)?,
    };
    out.flush()?;
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename_str(input: &str, mode: &RenameMode) -> (String, String) {
        let mut out = Vec::new();
        let mut map = Vec::new();
        rename_fasta(input.as_bytes(), &mut out, Some(&mut map), mode).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(map).unwrap(),
        )
    }

    #[test]
    fn test_prefix_numbering() {
        let mode = RenameMode::Prefix("scaf".to_string());
        let (out, map) = rename_str(">x one\nACGT\nAC\n>y two\nGG\n", &mode);
        assert_eq!(out, ">scaf_1\nACGT\nAC\n>scaf_2\nGG\n");
        assert_eq!(map, "x one\tscaf_1\ny two\tscaf_2\n");
    }

    #[test]
    fn test_pattern_substitution() {
        let mode = RenameMode::Pattern {
            pattern: Regex::new(r"^contig").unwrap(),
            replacement: "chr".to_string(),
        };
        let (out, _) = rename_str(">contig1 len=4\nACGT\n", &mode);
        assert_eq!(out, ">chr1 len=4\nACGT\n");
    }

    #[test]
    fn test_pattern_capture_groups() {
        let mode = RenameMode::Pattern {
            pattern: Regex::new(r"^(\S+)\s.*$").unwrap(),
            replacement: "$1".to_string(),
        };
        let (out, _) = rename_str(">id descriptive text\nAC\n", &mode);
        assert_eq!(out, ">id\nAC\n");
    }

    #[test]
    fn test_strip_description() {
        let (out, map) = rename_str(
            ">NODE_1 length=88 cov=3.1\nACGT\n>NODE_2\nGG\n",
            &RenameMode::StripDescription,
        );
        assert_eq!(out, ">NODE_1\nACGT\n>NODE_2\nGG\n");
        assert_eq!(
            map,
            "NODE_1 length=88 cov=3.1\tNODE_1\nNODE_2\tNODE_2\n"
        );
    }

    #[test]
    fn test_body_passes_through_unchanged() {
        let mode = RenameMode::Prefix("s".to_string());
        let (out, _) = rename_str(">a\nAC GT\nacgt\n", &mode);
        assert_eq!(out, ">s_1\nAC GT\nacgt\n");
    }

    #[test]
    fn test_leading_body_is_malformed() {
        let mut out = Vec::new();
        let err = rename_fasta(
            &b"ACGT\n>a\n"[..],
            &mut out,
            None,
            &RenameMode::StripDescription,
        )
        .unwrap_err();
        assert!(matches!(err, SieveError::MalformedInput { line: 1 }));
    }
}
