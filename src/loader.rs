//! Build state animators from asset directory trees.
//!
//! A tree such as
//!
//! ```text
//! player/
//! ├── idle.png
//! ├── walking/
//! │   ├── right/  0.png 1.png 2.png
//! │   └── left/   0.png 1.png 2.png
//! └── running/
//!     ├── right/  0.png 1.png
//!     └── left/   0.png 1.png
//! ```
//!
//! becomes a map from `idle`, `walking/right`, `walking/left`, ... to frame
//! sources. A directory whose entries are all numerically named files is one
//! [`Animation`] with frames in ascending numeric order. Any other directory
//! is another nesting level. A loose file is a static texture keyed by the
//! part of its name before the first `.`.
//!
//! Loading runs in three steps so each can be tested alone:
//! [`scan`] walks an [`AssetDir`] into an [`AssetNode`] tree, [`flatten`]
//! turns the tree into `(StatePath, AssetLeaf)` pairs, and [`build_map`]
//! registers the images with a [`TextureSink`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::components::animation::Animation;
use crate::components::animstate::StatePath;
use crate::components::stateanimator::{AnimationMap, FrameSource, StateAnimator};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirItem {
    pub name: String,
    pub is_dir: bool,
}

impl DirItem {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Name up to the first `.`; `idle.png` -> `idle`, `3.png` -> `3`.
    pub fn base_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    /// Numeric frame index when the base name is all digits.
    pub fn frame_number(&self) -> Option<u64> {
        let base = self.base_name();
        if !base.is_empty() && base.bytes().all(|b| b.is_ascii_digit()) {
            base.parse().ok()
        } else {
            None
        }
    }
}

/// Read access to a directory hierarchy.
pub trait AssetDir {
    fn list(&self, path: &Path) -> io::Result<Vec<DirItem>>;
}

/// [`AssetDir`] over the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDir;

impl AssetDir for FsDir {
    fn list(&self, path: &Path) -> io::Result<Vec<DirItem>> {
        let mut items = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            items.push(DirItem {
                name: entry.file_name().to_string_lossy().into_owned(),
                // Follows symlinks, so shared frame directories can be linked
                is_dir: entry.path().is_dir(),
            });
        }
        Ok(items)
    }
}

/// How a directory's children are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Another level of state names.
    Nested,
    /// Frames of a single animation.
    Frames,
}

/// Classify a directory from its listing.
///
/// Any subdirectory makes it `Nested`. Otherwise it is `Frames` when every
/// file has a numeric base name. Mixed or non-numeric files are static
/// textures one level down, so `Nested` again.
pub fn classify_dir(children: &[DirItem]) -> DirKind {
    if children.iter().any(|child| child.is_dir) {
        DirKind::Nested
    } else if children.iter().all(|child| child.frame_number().is_some()) {
        DirKind::Frames
    } else {
        DirKind::Nested
    }
}

/// Intermediate tree produced by [`scan`].
#[derive(Debug, Clone, PartialEq)]
pub enum AssetNode {
    Branch(BTreeMap<String, AssetNode>),
    /// Frame files in playback order.
    Frames(Vec<PathBuf>),
    Image(PathBuf),
}

/// Leaf of a flattened tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetLeaf {
    Frames(Vec<PathBuf>),
    Image(PathBuf),
}

/// Loader failure.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Texture { path: PathBuf, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            LoadError::Texture { path, reason } => {
                write!(f, "cannot load texture {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Texture { .. } => None,
        }
    }
}

/// Receives every image the loader needs and returns the handle stored in
/// the animation map.
pub trait TextureSink {
    type Handle: Send + Sync + 'static;

    /// `key` is unique per image: the state path for static textures,
    /// `state/index` for animation frames. A frame directory holds no named
    /// files, so no static texture can share a frame's key.
    fn register(&mut self, key: &str, path: &Path) -> Result<Self::Handle, String>;
}

/// Sink that loads nothing and uses the file path as the handle.
///
/// Useful for headless tools and for inspecting what a tree would produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathKeySink;

impl TextureSink for PathKeySink {
    type Handle = PathBuf;

    fn register(&mut self, _key: &str, path: &Path) -> Result<PathBuf, String> {
        Ok(path.to_path_buf())
    }
}

/// Recursively scan `path` into a tree.
pub fn scan(dir: &impl AssetDir, path: &Path) -> Result<AssetNode, LoadError> {
    let children = list(dir, path)?;
    let mut branch = BTreeMap::new();

    for child in children {
        let child_path = path.join(&child.name);
        if child.is_dir {
            let grandchildren = list(dir, &child_path)?;
            let node = match classify_dir(&grandchildren) {
                DirKind::Frames => AssetNode::Frames(frame_paths(&child_path, grandchildren)),
                DirKind::Nested => scan(dir, &child_path)?,
            };
            branch.insert(child.name, node);
        } else {
            branch.insert(child.base_name().to_string(), AssetNode::Image(child_path));
        }
    }

    Ok(AssetNode::Branch(branch))
}

fn list(dir: &impl AssetDir, path: &Path) -> Result<Vec<DirItem>, LoadError> {
    dir.list(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn frame_paths(path: &Path, mut frames: Vec<DirItem>) -> Vec<PathBuf> {
    frames.sort_by_key(|item| item.frame_number());
    frames.iter().map(|item| path.join(&item.name)).collect()
}

/// Flatten a tree into state paths. Branches disappear; their names become
/// path segments.
pub fn flatten(node: AssetNode) -> Vec<(StatePath, AssetLeaf)> {
    let mut out = Vec::new();
    flatten_into(node, StatePath::default(), &mut out);
    out
}

fn flatten_into(node: AssetNode, prefix: StatePath, out: &mut Vec<(StatePath, AssetLeaf)>) {
    match node {
        AssetNode::Branch(children) => {
            for (name, child) in children {
                flatten_into(child, prefix.child(name), out);
            }
        }
        AssetNode::Frames(frames) => out.push((prefix, AssetLeaf::Frames(frames))),
        AssetNode::Image(path) => out.push((prefix, AssetLeaf::Image(path))),
    }
}

/// Register every image with `textures` and build the map.
///
/// Directories classified as frames but holding no files are skipped.
pub fn build_map<K: TextureSink>(
    leaves: Vec<(StatePath, AssetLeaf)>,
    textures: &mut K,
    interval: f32,
    looped: bool,
) -> Result<AnimationMap<StatePath, K::Handle>, LoadError> {
    let mut map = AnimationMap::default();

    for (state, leaf) in leaves {
        let source = match leaf {
            AssetLeaf::Image(path) => FrameSource::Static(register(textures, &state.to_string(), &path)?),
            AssetLeaf::Frames(paths) => {
                let mut frames = Vec::with_capacity(paths.len());
                for (index, path) in paths.iter().enumerate() {
                    frames.push(register(textures, &format!("{}/{}", state, index), path)?);
                }
                match Animation::new(frames, interval) {
                    Some(animation) => FrameSource::Animated(animation.with_looped(looped)),
                    None => {
                        warn!("skipping state '{}': frame directory is empty", state);
                        continue;
                    }
                }
            }
        };
        debug!("state '{}' registered", state);
        map.insert(state, source);
    }

    Ok(map)
}

fn register<K: TextureSink>(textures: &mut K, key: &str, path: &Path) -> Result<K::Handle, LoadError> {
    textures
        .register(key, path)
        .map_err(|reason| LoadError::Texture {
            path: path.to_path_buf(),
            reason,
        })
}

/// Scan `path` through `dir` and build a ready animator.
pub fn load_with<D: AssetDir, K: TextureSink>(
    dir: &D,
    path: &Path,
    textures: &mut K,
    default_state: Option<StatePath>,
    interval: f32,
    looped: bool,
) -> Result<StateAnimator<StatePath, K::Handle>, LoadError> {
    let tree = scan(dir, path)?;
    let map = build_map(flatten(tree), textures, interval, looped)?;
    info!(
        "loaded {} animation states from {}",
        map.len(),
        path.display()
    );
    Ok(StateAnimator::new(map, default_state))
}

/// Load a looping animation set from the file system.
pub fn load_from_directory<K: TextureSink>(
    path: impl AsRef<Path>,
    textures: &mut K,
    default_state: Option<StatePath>,
    interval: f32,
) -> Result<StateAnimator<StatePath, K::Handle>, LoadError> {
    load_with(&FsDir, path.as_ref(), textures, default_state, interval, true)
}
