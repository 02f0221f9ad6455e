use crate::error::Result;
use flate2::write;
use flate2::Compression;
use needletail::{parse_fastx_file, parse_fastx_stdin, FastxReader};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 128 * 1024;

/// Whether a path should be written gzip-compressed, by `.gz` extension.
pub fn is_gz(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

/// Read plain or compressed files seamlessly, `-` for stdin.
///
/// Compression is detected from the magic bytes of the stream, so a
/// compressed file without a `.gz` extension still reads correctly.
pub fn reader(filename: &str) -> io::Result<Box<dyn BufRead>> {
    let raw: Box<dyn Read + Send> = if filename == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(filename)?)
    };
    let (decoded, _format) = niffler::get_reader(raw)
        .map_err(|why| io::Error::new(io::ErrorKind::InvalidData, why))?;
    Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoded)))
}

/// Write plain or compressed files seamlessly, `-` for stdout.
/// Uses the presence of a `.gz` extension to decide.
pub fn writer(filename: &str) -> io::Result<Box<dyn Write>> {
    if filename == "-" {
        return Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, io::stdout())));
    }
    let path = Path::new(filename);
    file_writer(path, is_gz(path))
}

/// Open `path` for writing, compressing when `gzip` is set.
///
/// Separate from [`writer`] so callers that stage output through a
/// temporary file can key compression on the final destination name.
pub fn file_writer(path: &Path, gzip: bool) -> io::Result<Box<dyn Write>> {
    let file = File::create(path)?;
    if gzip {
        Ok(Box::new(BufWriter::with_capacity(
            BUFFER_SIZE,
            write::GzEncoder::new(file, Compression::default()),
        )))
    } else {
        Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Open a fasta/fastq record reader, `-` for stdin.
pub fn fastx_reader(filename: &str) -> Result<Box<dyn FastxReader>> {
    let reader = if filename == "-" {
        parse_fastx_stdin()?
    } else {
        parse_fastx_file(filename)?
    };
    Ok(reader)
}

/// Input path with compression and fasta/fastq extensions stripped,
/// for deriving output names next to the input.
///
/// # Example
/// ```
/// use seqsieve::myio::fasta_stem;
/// assert_eq!(fasta_stem("sample.fa"), "sample");
/// assert_eq!(fasta_stem("sample.fasta.gz"), "sample");
/// assert_eq!(fasta_stem("reads"), "reads");
/// ```
pub fn fasta_stem(path: &str) -> &str {
    let mut stem = path.strip_suffix(".gz").unwrap_or(path);
    for ext in [".fasta", ".fa", ".fna", ".fas", ".fastq", ".fq"] {
        if let Some(stripped) = stem.strip_suffix(ext) {
            stem = stripped;
            break;
        }
    }
    stem
}
