use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed save file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("save slot {slot} is out of range (at most {max} slots)")]
    SlotOutOfRange { slot: usize, max: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("play field {width}x{height} is smaller than the minimum {min_w}x{min_h}")]
    FieldTooSmall {
        width: i32,
        height: i32,
        min_w: i32,
        min_h: i32,
    },

    #[error("fps must be at least 1")]
    ZeroFps,

    #[error("spawn intervals must be at least 1")]
    ZeroInterval,

    #[error("save slot count {0} is outside 1..=9")]
    SlotCount(usize),
}
