use clap::IntoApp;
use clap::{AppSettings, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    propagate_version = true,
    subcommand_required = true,
    infer_subcommands = true,
    arg_required_else_help = true,
    help_expected = true
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
pub struct Cli {
    /// Threads used when processing multiple input files.
    #[clap(short, long, default_value_t = 4)]
    pub threads: usize,

    /// Logging level [-v: Info, -vv: Debug, -vvv: Trace].
    #[clap(short, long, parse(from_occurrences), help_heading = "DEBUG")]
    pub verbose: usize,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

///
/// This structure contains all the subcommands for seqsieve and their help descriptions.
///
/// Because of naming conventions for rust enums the command names have
/// different capitalization than on the command line.
/// For example, the `Filter` enum is invoked using `seqsieve filter`.
///
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep only fasta records whose sequence length is inside [min, max].
    ///
    /// Length is counted over the concatenated body lines of a record,
    /// ignoring line wrapping and trailing whitespace. Records that pass
    /// are written with their original header and wrapping untouched, in
    /// input order. An empty result is still a success.
    ///
    /// With `--named-output` each input is written to a derived
    /// `<input-base>_filtered.fa` sibling; several inputs are then
    /// processed in parallel, one independent pass per file.
    #[clap(visible_aliases = &["len-filter", "lf"])]
    Filter {
        /// Input fasta file(s), "-" for stdin.
        #[clap(default_value = "-")]
        fasta: Vec<String>,
        /// Minimum sequence length to keep (inclusive, must be positive).
        #[clap(short, long)]
        min_length: u64,
        /// Maximum sequence length to keep (inclusive, must be >= the minimum).
        #[clap(short = 'M', long)]
        max_length: Option<u64>,
        /// Output file, "-" for stdout.
        #[clap(short, long)]
        output: Option<String>,
        /// Write each input to <input-base>_filtered.fa instead of stdout.
        #[clap(short, long)]
        named_output: bool,
    },
    /// Rewrite fasta headers, leaving the sequence body untouched.
    ///
    /// Exactly one renaming mode must be chosen: `--prefix` renumbers
    /// headers as `<prefix>_1`, `<prefix>_2`, ...; `--pattern` (with
    /// `--replacement`) applies a regex substitution to the header text;
    /// `--strip-description` drops everything after the identifier.
    #[clap(visible_aliases = &["rn"])]
    Rename {
        /// Input fasta file, "-" for stdin.
        #[clap(default_value = "-")]
        fasta: String,
        /// Renumber headers as <PREFIX>_1, <PREFIX>_2, ...
        #[clap(short, long)]
        prefix: Option<String>,
        /// Regex applied to the header text after '>'.
        #[clap(long)]
        pattern: Option<String>,
        /// Replacement for --pattern matches, may use capture groups ($1).
        #[clap(long)]
        replacement: Option<String>,
        /// Keep only the identifier, up to the first whitespace.
        #[clap(short, long)]
        strip_description: bool,
        /// Output file, "-" for stdout.
        #[clap(short, long, default_value = "-")]
        output: String,
        /// Also write an old<TAB>new mapping table to this file.
        #[clap(long)]
        map: Option<String>,
    },
    /// Split fastx records across multiple files.
    ///
    /// With a list of output files, records (fastq, fasta, or mixed) are
    /// dealt round-robin across them. With `--records N`, consecutive
    /// chunks of N records go to `<input-base>_part1.fa`, `_part2.fa`, ...
    /// Output files can be compressed by adding `.gz`, and the input can
    /// also be compressed or uncompressed.
    #[clap(visible_aliases = &["fxs", "fasta-split", "fastq-split"])]
    Split {
        /// List of fastx files to write to.
        fastx: Vec<String>,
        /// Input fastx file, "-" for stdin.
        #[clap(short, long, default_value = "-")]
        infile: String,
        /// Split into chunks of this many records instead, deriving part
        /// names from the input name.
        #[clap(short = 'n', long)]
        records: Option<u64>,
    },
    /// Sequence length statistics per input file.
    ///
    /// ## output column descriptions:
    /// ### N50 is the length of the shortest record in the smallest set
    /// of longest records that together cover half the total length.
    /// ### auN is the area under the Nx curve:
    ///  `sum(len^2) / total`
    Stats {
        /// Input fastx file(s), "-" for stdin.
        #[clap(default_value = "-")]
        fastx: Vec<String>,
        /// Quantiles to calculate.
        #[clap(short, long, multiple_values = true, default_value = "0.5")]
        quantiles: Vec<f64>,
        /// Genome size, switches N50 to NG50.
        #[clap(short, long)]
        genome_size: Option<usize>,
        /// Print human-readable output (Kbp/Mbp/Gbp).
        #[clap(short = 'r', long)]
        human: bool,
    },
    /// Print id<TAB>length for every record.
    #[clap(visible_aliases = &["lens"])]
    Lengths {
        /// Input fastx file, "-" for stdin.
        #[clap(default_value = "-")]
        fastx: String,
    },
}

pub fn make_cli_parse() -> Cli {
    Cli::parse()
}

pub fn make_cli_app() -> clap::Command<'static> {
    Cli::command()
}
