mod convert;
mod error;
mod introspection;
mod layout_desc;
mod options;
mod pipeline;
mod reflector;
mod report;
mod spirv;
mod stage;
mod vertex;

pub use convert::{descriptor_type, format, format_size, shader_stage, EnumTable, UnsupportedEnum};
pub use error::{ReflectError, ResourceLocation, Result};
pub use introspection::*;
pub use layout_desc::{Binding, BindingConflict, DescriptorSet, PushConstantRange, VertexAttribute};
pub use options::ReflectOptions;
pub use pipeline::{aggregate, PipelineResourceDescription};
pub use reflector::PipelineReflector;
pub use spirv::SpirvIntrospector;
pub use stage::{shader_name, ShaderIdentity, StageExtractor, StageResourceDescription};
pub use vertex::VertexInputLayout;
