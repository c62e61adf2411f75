use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Where compiled shader binaries come from.
pub trait ShaderSource: Send + Sync {
    fn load(&self, path: &Path) -> io::Result<Cow<'static, [u8]>>;
}

/// Shader binaries on disk, optionally below a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsShaders {
    pub root: Option<PathBuf>,
}

impl FsShaders {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ShaderSource for FsShaders {
    fn load(&self, path: &Path) -> io::Result<Cow<'static, [u8]>> {
        let path = self.resolve(path);
        log::trace!("reading {}", path.display());
        Ok(Cow::Owned(std::fs::read(path)?))
    }
}

/// Shader binaries compiled into the executable by `#[derive(RustEmbed)]`.
///
/// ```ignore
/// #[derive(RustEmbed)]
/// #[folder = "$OUT_DIR/shaders"]
/// struct ShaderBundle;
///
/// let source = EmbeddedShaders::<ShaderBundle>::new();
/// ```
pub struct EmbeddedShaders<E: RustEmbed> {
    _bundle: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedShaders<E> {
    pub fn new() -> Self {
        Self {
            _bundle: PhantomData,
        }
    }
}

impl<E: RustEmbed> Default for EmbeddedShaders<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RustEmbed> ShaderSource for EmbeddedShaders<E> {
    fn load(&self, path: &Path) -> io::Result<Cow<'static, [u8]>> {
        // embedded paths always use forward slashes
        let key = path.to_string_lossy().replace('\\', "/");
        match E::get(&key) {
            Some(file) => Ok(file.data),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{key} is not embedded"),
            )),
        }
    }
}
