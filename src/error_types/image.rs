// Errors from the raw image file itself.
//
// The image is assumed to be a complete, local, static file. Anything going
// wrong down here means the request (or the whole mount) is dead; there is
// no retry story.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not open the pack image: {0}")]
    Open(#[source] io::Error),
    #[error("read of record {record} (subvolume {subvolume}) at byte offset {offset} failed: {source}")]
    RecordRead {
        record: usize,
        subvolume: usize,
        offset: u64,
        #[source]
        source: io::Error,
    },
}
