use super::{DirEntry, FileMetadata, FileSystem, FileType};
use anyhow::{anyhow, bail, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

impl Node {
    fn file_type(&self) -> FileType {
        match self {
            Node::File(_) => FileType::File,
            Node::Dir => FileType::Directory,
        }
    }
}

/// In-memory corpus and output tree.
///
/// Relative paths are resolved against the root (`/mock` by default).
/// Directory listings come back in path order.
pub struct MockFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    denied: RwLock<Vec<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            nodes: RwLock::new(BTreeMap::new()),
            denied: RwLock::new(Vec::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.add_bytes(path, content.as_bytes());
    }

    /// Adds a file with raw content, creating missing parent directories
    pub fn add_bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        let path = self.resolve(path.as_ref());
        self.insert(path, Node::File(content.to_vec()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.resolve(path.as_ref());
        self.insert(path, Node::Dir);
    }

    /// Make every write at or below `path` fail.
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        let path = self.resolve(path.as_ref());
        self.denied.write().unwrap().push(path);
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn insert(&self, path: PathBuf, node: Node) {
        let mut nodes = self.nodes.write().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        nodes.insert(path, node);
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.read().unwrap().get(&self.resolve(path)).cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::File(_)))
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let node = self
            .node(path)
            .ok_or_else(|| anyhow!("Path not found: {}", path.display()))?;
        let size = match &node {
            Node::File(bytes) => bytes.len() as u64,
            Node::Dir => 0,
        };
        Ok(FileMetadata {
            size,
            file_type: node.file_type(),
        })
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        match self.node(path) {
            Some(Node::File(bytes)) => Ok(bytes),
            Some(Node::Dir) => bail!("Not a file: {}", path.display()),
            None => bail!("File not found: {}", path.display()),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let dir = self.resolve(path);
        match self.node(&dir) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => bail!("Not a directory: {}", dir.display()),
            None => bail!("Directory not found: {}", dir.display()),
        }

        let nodes = self.nodes.read().unwrap();
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(dir.as_path()))
            .map(|(p, node)| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                file_type: node.file_type(),
            })
            .collect())
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let target = self.resolve(path);
        if self
            .denied
            .read()
            .unwrap()
            .iter()
            .any(|denied| target.starts_with(denied))
        {
            bail!("Permission denied: {}", target.display());
        }
        self.insert(target, Node::File(contents.to_vec()));
        Ok(())
    }

    fn walk_files(&self, root: &Path) -> Vec<PathBuf> {
        let root = self.resolve(root);
        if !matches!(self.node(&root), Some(Node::Dir)) {
            return Vec::new();
        }
        // BTreeMap path order is component-wise, matching a name-sorted depth-first walk
        self.nodes
            .read()
            .unwrap()
            .iter()
            .filter(|(p, node)| matches!(node, Node::File(_)) && p.starts_with(&root))
            .map(|(p, _)| p.clone())
            .collect()
    }
}
