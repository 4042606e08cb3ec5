// PoseMatch 🕺 MIT License

//! Target pose loading.
//!
//! A game is configured with one target skeleton per level. The engine asks
//! a [`TargetLoader`] for the target on start, on every level advance, and
//! on reset; a loader answering `None` means "no target available for this
//! level", which the engine logs and plays through without scoring.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};
use crate::keypoint::Skeleton;

/// Supplies the reference skeleton for each level.
pub trait TargetLoader {
    /// Number of levels in the target set. Fixed at game configuration time.
    fn level_count(&self) -> usize;

    /// Load the target skeleton for a level index.
    ///
    /// # Errors
    ///
    /// Returns an error only for environment failures (unreadable file,
    /// corrupt data). A level with no detectable pose is `Ok(None)`.
    fn load_target(&mut self, level: usize) -> Result<Option<Skeleton>>;
}

/// Where the ordered per-level target files come from.
///
/// Resolution yields one path per level, in level order.
#[derive(Debug, Clone)]
pub enum TargetSource {
    /// Explicit ordered list of files.
    List(Vec<PathBuf>),
    /// Every recognized file in a directory, sorted by file name.
    Directory(PathBuf),
}

impl TargetSource {
    /// Build a source from CLI-style path arguments: a single directory
    /// argument scans that directory, anything else is an explicit list.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        match paths.as_slice() {
            [single] if single.is_dir() => Self::Directory(single.clone()),
            _ => Self::List(paths),
        }
    }

    /// Resolve to the ordered list of per-level files.
    ///
    /// # Errors
    ///
    /// Returns an error if a listed file is missing, a directory cannot be
    /// read, or resolution yields no levels.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        let paths = match self {
            Self::List(paths) => {
                for path in paths {
                    if !path.is_file() {
                        return Err(GameError::TargetError(format!(
                            "target file not found: {}",
                            path.display()
                        )));
                    }
                }
                paths.clone()
            }
            Self::Directory(dir) => {
                let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| {
                        p.is_file()
                            && p.extension()
                                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
                    })
                    .collect();
                paths.sort();
                paths
            }
        };

        if paths.is_empty() {
            return Err(GameError::TargetError(
                "no target files resolved; a game needs at least one level".to_string(),
            ));
        }
        Ok(paths)
    }
}

/// [`TargetLoader`] over recorded skeleton files, one JSON file per level.
///
/// Each file holds one serialized [`Skeleton`], or JSON `null` for a target
/// image that yielded no detectable pose.
#[derive(Debug)]
pub struct ReplayTargets {
    paths: Vec<PathBuf>,
}

impl ReplayTargets {
    /// Create a loader from a resolved target source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source resolves to no files.
    pub fn new(source: &TargetSource) -> Result<Self> {
        Ok(Self {
            paths: source.resolve()?,
        })
    }

    /// Create a loader from an explicit ordered path list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or a file is missing.
    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        Self::new(&TargetSource::List(paths))
    }

    fn read_skeleton(path: &Path) -> Result<Option<Skeleton>> {
        let file = File::open(path).map_err(|e| {
            GameError::TargetError(format!("cannot open {}: {e}", path.display()))
        })?;
        let skeleton: Option<Skeleton> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GameError::FormatError(format!("{}: {e}", path.display())))?;
        Ok(skeleton.filter(|s| !s.is_empty()))
    }
}

impl TargetLoader for ReplayTargets {
    fn level_count(&self) -> usize {
        self.paths.len()
    }

    fn load_target(&mut self, level: usize) -> Result<Option<Skeleton>> {
        match self.paths.get(level) {
            Some(path) => Self::read_skeleton(path),
            None => Ok(None),
        }
    }
}
