// vnf-search: genetic-algorithm based VNF chain placement search
// Copyright (C) 2026  vnf-search contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Crate-wide error taxonomy.
//!
//! Four kinds of failure are distinguished, matching the driver's error
//! handling design:
//!
//! - [`Error::Config`] — malformed or missing configuration.
//! - [`Error::Input`] — malformed input file.
//! - [`Error::Usage`] — a programmer/caller misuse, such as an operator
//!   referencing an unknown name. Not recoverable control flow.
//! - [`Error::Invariant`] — an internal invariant was violated. Always a
//!   bug in this crate, never a consequence of bad input.
//!
//! A search that finds no feasible placement is not an error: it is
//! represented as `Ok(None)` at the driver level.

use thiserror::Error as ThisError;

/// Top-level error type returned by this crate's public API.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The configuration file could not be parsed or was missing a
    /// required key.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input file could not be parsed.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// The caller misused an API in a way that is always a programming
    /// error, never a consequence of the problem instance.
    #[error("usage error: {0}")]
    Usage(String),

    /// An internal invariant was violated. This indicates a bug.
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or interpreting the INI configuration file.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    NotFound(String),

    /// The file is not valid INI syntax.
    #[error("malformed configuration file: {0}")]
    Malformed(String),

    /// A required section or key is missing.
    #[error("missing required key '{key}' in section [{section}]")]
    MissingKey {
        /// The section the key was expected in.
        section: &'static str,
        /// The missing key.
        key: &'static str,
    },

    /// A key's value could not be parsed as the expected type.
    #[error("invalid value for '{key}' in section [{section}]: {value}")]
    InvalidValue {
        /// The section the key lives in.
        section: &'static str,
        /// The offending key.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// An operator string (`Name` or `Name(arg)`) did not name a supported
    /// operator, or had the wrong shape.
    #[error("invalid operator specification '{0}'")]
    InvalidOperator(String),
}

/// Errors raised while parsing the custom input file format.
#[derive(Debug, ThisError)]
pub enum InputError {
    /// The file ended before all expected row-groups were read.
    #[error("unexpected end of file at line {line}: expected more input")]
    UnexpectedEof {
        /// The last line number read before the file ran out.
        line: usize,
    },

    /// A token could not be parsed as a number.
    #[error("line {line}: could not parse '{token}' as a number")]
    MalformedNumber {
        /// The 1-indexed line in the (comment/whitespace-stripped) input.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A row did not have the number of tokens this row-group requires.
    #[error("line {line}: expected {expected} tokens, found {found}")]
    WrongTokenCount {
        /// The offending line.
        line: usize,
        /// Number of tokens required.
        expected: usize,
        /// Number of tokens actually present.
        found: usize,
    },

    /// A node or resource index referenced by a later row-group is out of
    /// range.
    #[error("line {line}: index {index} out of range (0..{bound})")]
    IndexOutOfRange {
        /// The offending line.
        line: usize,
        /// The out-of-range index.
        index: i64,
        /// The exclusive upper bound the index should have respected.
        bound: usize,
    },
}
