//! Template lookup.
//!
//! The renderer does not know where templates live. It asks a
//! [`TemplateStore`] to resolve a name into a [`TemplateHandle`] and then to
//! load that handle's bytes. Both steps happen before anything is appended.
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;

use crate::error::RenderError;

/// A resolved, loadable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHandle {
    name: String,
    path: Option<PathBuf>,
}

impl TemplateHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filesystem location, for stores backed by a directory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Name → template resolution.
pub trait TemplateStore: Send + Sync {
    /// Resolve a name, or fail with [`RenderError::TemplateNotFound`].
    fn resolve(&self, name: &str) -> Result<TemplateHandle, RenderError>;

    /// Read the full template package.
    fn load(&self, handle: &TemplateHandle) -> Result<Vec<u8>, RenderError>;
}

impl<T: TemplateStore + ?Sized> TemplateStore for Box<T> {
    fn resolve(&self, name: &str) -> Result<TemplateHandle, RenderError> {
        (**self).resolve(name)
    }

    fn load(&self, handle: &TemplateHandle) -> Result<Vec<u8>, RenderError> {
        (**self).load(handle)
    }
}

/// Templates stored as files directly inside one directory.
///
/// Only a single plain file name resolves. Anything with a separator, a
/// `..` or an absolute prefix is reported as not found, so a request can
/// never reach outside the directory.
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    root: PathBuf,
}

impl DirTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl TemplateStore for DirTemplateStore {
    fn resolve(&self, name: &str) -> Result<TemplateHandle, RenderError> {
        let not_found = || RenderError::TemplateNotFound {
            name: name.to_string(),
        };
        if !is_plain_name(name) {
            return Err(not_found());
        }
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(not_found());
        }
        Ok(TemplateHandle {
            name: name.to_string(),
            path: Some(path),
        })
    }

    fn load(&self, handle: &TemplateHandle) -> Result<Vec<u8>, RenderError> {
        let path = handle
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.join(handle.name()));
        fs::read(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RenderError::TemplateNotFound {
                name: handle.name().to_string(),
            },
            _ => RenderError::TemplateUnreadable {
                name: handle.name().to_string(),
                reason: err.to_string(),
            },
        })
    }
}

/// Templates held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<String, Bytes>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Bytes>) {
        self.templates.insert(name.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn resolve(&self, name: &str) -> Result<TemplateHandle, RenderError> {
        if self.templates.contains_key(name) {
            Ok(TemplateHandle {
                name: name.to_string(),
                path: None,
            })
        } else {
            Err(RenderError::TemplateNotFound {
                name: name.to_string(),
            })
        }
    }

    fn load(&self, handle: &TemplateHandle) -> Result<Vec<u8>, RenderError> {
        self.templates
            .get(handle.name())
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: handle.name().to_string(),
            })
    }
}
