//! # Command line interface for seqsieve
//! [seqsieve command line interface, subcommands, and options.](cli::Commands)
//! # README for seqsieve
#![doc = include_str!("../README.md")]
/// Command line interface for seqsieve.
pub mod cli;
/// Error types shared by all subcommands.
pub mod error;
/// Streaming length filter for fasta records.
pub mod filter;
/// Module for automatically reading and writing compressed or uncompressed files.
pub mod myio;
/// Fasta header renaming.
pub mod rename;
/// Record splitting across files.
pub mod split;
/// Sequence length statistics.
pub mod stats;
