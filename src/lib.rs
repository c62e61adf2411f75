//! Shader resource reflection for Vulkan pipelines.
//!
//! Each compiled shader is introspected and reduced to a
//! [`StageResourceDescription`]; the stages of a pipeline are then folded
//! into one [`PipelineResourceDescription`] holding the merged descriptor
//! sets and push-constant ranges a pipeline layout needs.
//!
//! ```no_run
//! use pipeline_reflect::PipelineReflector;
//!
//! let reflector = PipelineReflector::spirv(Some("shaders".into()));
//! let pipeline = reflector.reflect_pipeline(&["mesh.vert.spv", "lit.frag.spv"])?;
//! for set in &pipeline.descriptor_sets {
//!     let bindings = set.layout_bindings();
//!     // device.create_descriptor_set_layout(..)
//! #   let _ = bindings;
//! }
//! # Ok::<(), pipeline_reflect::ReflectError>(())
//! ```

pub mod assets;
pub mod reflect;

pub use assets::{EmbeddedShaders, FsShaders, ShaderSource};
pub use reflect::{
    aggregate, Binding, DescriptorSet, PipelineReflector, PipelineResourceDescription,
    PushConstantRange, ReflectError, ReflectOptions, ResourceLocation, StageExtractor,
    StageResourceDescription, VertexAttribute, VertexInputLayout,
};
