use super::error::{ReflectError, Result};
use super::introspection::Introspect;
use super::options::ReflectOptions;
use super::pipeline::{aggregate, PipelineResourceDescription};
use super::spirv::SpirvIntrospector;
use super::stage::{shader_name, ShaderIdentity, StageExtractor, StageResourceDescription};
use crate::assets::{FsShaders, ShaderSource};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};

/// Loads, introspects and extracts shaders, then merges them into a pipeline.
pub struct PipelineReflector<S: ShaderSource, I: Introspect> {
    pub source: S,
    pub introspector: I,
    pub options: ReflectOptions,
}

impl PipelineReflector<FsShaders, SpirvIntrospector> {
    /// SPIR-V files on disk, relative paths resolved against `root`.
    pub fn spirv(root: Option<PathBuf>) -> Self {
        Self::new(FsShaders { root }, SpirvIntrospector)
    }
}

impl<S: ShaderSource, I: Introspect> PipelineReflector<S, I> {
    pub fn new(source: S, introspector: I) -> Self {
        Self {
            source,
            introspector,
            options: ReflectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReflectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn reflect_shader(&self, path: &Path) -> Result<StageResourceDescription> {
        let bytes = self
            .source
            .load(path)
            .map_err(|source| ReflectError::Storage {
                path: path.to_path_buf(),
                source,
            })?;

        let malformed = |reason: String| ReflectError::MalformedBytecode {
            shader: shader_name(path),
            reason,
        };

        let introspection = self.introspector.introspect(&bytes).map_err(malformed)?;
        let code = ash::util::read_spv(&mut io::Cursor::new(bytes.as_ref()))
            .map_err(|e| malformed(e.to_string()))?;

        let identity = ShaderIdentity::from_path(path, &introspection.entry_point)?;
        StageExtractor::new(self.options).extract(identity, &introspection, code)
    }

    /// Every shader is extracted before the merge; the first failure aborts the pipeline.
    pub fn reflect_pipeline<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> Result<PipelineResourceDescription> {
        let stages = if self.options.parallel_extraction {
            paths
                .par_iter()
                .map(|path| self.reflect_shader(path.as_ref()))
                .collect::<Result<Vec<_>>>()?
        } else {
            paths
                .iter()
                .map(|path| self.reflect_shader(path.as_ref()))
                .collect::<Result<Vec<_>>>()?
        };

        aggregate(stages)
    }
}
