/*!
Crate error type.

Only the fallible edges of the crate return `Result`: writing raster images
and loading memory snapshots. The trace hooks never fail; anything odd they
see is absorbed locally and reported through `log`.
*/

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("{what} snapshot should be {expected} bytes, was {actual} bytes")]
    SnapshotSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[cfg(feature = "screenshot")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
