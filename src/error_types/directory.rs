// Errors from parsing one directory's own data.
//
// These are soft: the directory that tripped them lists no children, a
// warning goes to the log, and the rest of the tree stays usable.

use thiserror::Error;

use crate::error_types::image::ImageError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryFormatError {
    #[error("directory header type/size word is {0:#012o}, not the directory tag")]
    BadTypeSize(u64),
    #[error("directory header version is {0}, only version 2 is understood")]
    BadVersion(u64),
    /// The entry chain ran past the step bound. Either the chain loops or
    /// the forward pointers are garbage; both smell like the same
    /// corruption, so both get the same treatment.
    #[error("directory entry chain did not terminate after {steps} steps")]
    ChainOverrun { steps: usize },
}

/// Everything that can stop a directory parse. Format trouble is contained
/// to the directory; image trouble aborts whatever wanted the parse.
#[derive(Debug, Error)]
pub enum DirectoryParseError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Format(#[from] DirectoryFormatError),
}
