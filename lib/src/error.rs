//! All kinds of errors in this crate.

use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Invalid pattern: no header line of the form `x = <width>` was found.
    FormatError,
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Speed and soup dimensions should be positive.
    NonPositiveError,
    /// Soup density should be between 0 and 1.
    DensityError,
    /// Soup width and height should be at most 65536.
    SizeError,
}
