//! Resolves creation time and duration for video files.
//!
//! The caller picks the strategy. A failing strategy is reported
//! as is, there is no fallback to another strategy.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    atom_types::Mvhd,
    config::{ResolverConfig, Strategy},
    datetime::{parse_datetime, Timestamp},
    errors::ResolveError,
    probe::probe_with,
    reader::AtomWalker,
    tokenizer::extract_token,
    VideoTimeInfo,
};

/// Resolves time info using the default configuration,
/// i.e. by running `ffprobe` on `path`.
pub fn resolve(path: &Path) -> Result<VideoTimeInfo, ResolveError> {
    Resolver::default().resolve(path)
}

/// Time info resolver. Holds configuration only,
/// every call opens and releases its own file handle or process.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Creation time and duration for `path`,
    /// using the configured strategy.
    pub fn resolve(&self, path: &Path) -> Result<VideoTimeInfo, ResolveError> {
        debug!("resolving {} via {:?}", path.display(), self.config.strategy);
        match self.config.strategy {
            Strategy::Probe => Ok(probe_with(&self.config.probe, path)?),
            Strategy::MovieHeader => self.movie_header(path),
        }
    }

    /// Creation time only, read from the date string embedded
    /// after the header of the configured atom (`moov` by default).
    ///
    /// The date is located by token position, see `TokenConfig`.
    /// The token layout holds no duration.
    pub fn creation_time(&self, path: &Path) -> Result<Timestamp, ResolveError> {
        let mut reader = BufReader::new(File::open(path)?);

        AtomWalker::new(&mut reader)?
            .with_max_scan_len(self.config.walker.max_scan_len)
            .find(&self.config.walker.target)?;

        let token = extract_token(
            &mut reader,
            self.config.token.window_size,
            self.config.token.token_index
        )?;

        Ok(parse_datetime(&token)?)
    }

    /// Creation time and duration from the movie header atom (`moov/mvhd`).
    pub fn movie_header(&self, path: &Path) -> Result<VideoTimeInfo, ResolveError> {
        let mut reader = BufReader::new(File::open(path)?);
        let mvhd = Mvhd::find(&mut reader, self.config.walker.max_scan_len)?;
        Ok(mvhd.time_info()?)
    }

    /// Resolves all `paths` in parallel.
    ///
    /// Returns one result per path, in the same order as `paths`.
    /// A failing file does not affect the others.
    pub fn resolve_all<P>(&self, paths: &[P]) -> Vec<(PathBuf, Result<VideoTimeInfo, ResolveError>)>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter()
            .map(|p| {
                let path = p.as_ref();
                (path.to_owned(), self.resolve(path))
            })
            .collect()
    }
}
