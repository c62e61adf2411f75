use super::convert::{self, UnsupportedEnum};
use super::error::{ReflectError, ResourceLocation, Result};
use super::introspection::ShaderIntrospection;
use super::layout_desc::{Binding, DescriptorSet, PushConstantRange, VertexAttribute};
use super::options::ReflectOptions;
use ash::vk;
use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderIdentity {
    pub name: String,
    pub source_path: PathBuf,
    pub entry_point: CString,
}

impl ShaderIdentity {
    /// `shaders/lit.frag.spv` is named `lit.frag`.
    pub fn from_path(path: &Path, entry_point: &str) -> Result<Self> {
        let name = shader_name(path);
        let entry_point =
            CString::new(entry_point).map_err(|_| ReflectError::MalformedBytecode {
                shader: name.clone(),
                reason: format!("entry point name {entry_point:?} contains a nul byte"),
            })?;

        Ok(Self {
            name,
            source_path: path.to_path_buf(),
            entry_point,
        })
    }
}

pub fn shader_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One shader's contribution to a pipeline, before any cross-stage merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResourceDescription {
    pub shader: ShaderIdentity,
    pub stage: vk::ShaderStageFlags,
    pub descriptor_sets: Vec<DescriptorSet>,
    pub push_constants: Vec<PushConstantRange>,
    /// Only present for vertex shaders.
    pub vertex_attributes: Option<Vec<VertexAttribute>>,
    pub code: Vec<u32>,
}

impl StageResourceDescription {
    pub fn name(&self) -> &str {
        &self.shader.name
    }

    pub fn entry_point(&self) -> &CStr {
        &self.shader.entry_point
    }

    pub fn shader_module_create_info(&self) -> vk::ShaderModuleCreateInfo<'_> {
        vk::ShaderModuleCreateInfo::default().code(&self.code)
    }

    /// The caller still has to set `.module(..)` once the shader module exists.
    pub fn pipeline_stage_create_info(&self) -> vk::PipelineShaderStageCreateInfo<'_> {
        vk::PipelineShaderStageCreateInfo::default()
            .stage(self.stage)
            .name(&self.shader.entry_point)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct StageExtractor {
    pub options: ReflectOptions,
}

impl StageExtractor {
    pub fn new(options: ReflectOptions) -> Self {
        Self { options }
    }

    /// Builds the stage-scoped description of one shader. Pure; the same
    /// input always yields an identical description.
    pub fn extract(
        &self,
        shader: ShaderIdentity,
        introspection: &ShaderIntrospection,
        code: Vec<u32>,
    ) -> Result<StageResourceDescription> {
        let name = &shader.name;
        let unsupported = |resource: Option<ResourceLocation>| {
            move |e: UnsupportedEnum| ReflectError::UnsupportedEnumValue {
                shader: name.clone(),
                table: e.table,
                code: e.code,
                resource,
            }
        };

        let stage = convert::shader_stage(introspection.stage).map_err(unsupported(None))?;

        if let Some(empty) = introspection
            .descriptor_sets
            .iter()
            .find(|set| set.bindings.is_empty())
        {
            return Err(ReflectError::EmptyDescriptorSet {
                shader: shader.name.clone(),
                set: empty.set,
            });
        }

        let mut descriptor_sets: Vec<DescriptorSet> = vec![];
        for introspected in &introspection.descriptor_sets {
            let index = match descriptor_sets
                .iter()
                .position(|set| set.set == introspected.set)
            {
                Some(index) => index,
                None => {
                    descriptor_sets.push(DescriptorSet::new(introspected.set));
                    descriptor_sets.len() - 1
                }
            };

            for binding in &introspected.bindings {
                let desc_type = convert::descriptor_type(binding.descriptor_type).map_err(
                    unsupported(Some(ResourceLocation::Binding {
                        set: introspected.set,
                        binding: binding.binding,
                    })),
                )?;
                let incoming = Binding {
                    binding: binding.binding,
                    desc_type,
                    count: binding.count,
                    stage,
                };

                descriptor_sets[index]
                    .merge_binding(incoming)
                    .map_err(|conflict| ReflectError::ConflictingBindingDeclaration {
                        shader: shader.name.clone(),
                        set: introspected.set,
                        binding: conflict.binding,
                        existing: conflict.existing.0,
                        existing_count: conflict.existing.1,
                        found: conflict.found.0,
                        found_count: conflict.found.1,
                    })?;
            }
        }

        let push_constants = introspection
            .push_constant_blocks
            .iter()
            .map(|block| PushConstantRange {
                offset: block.offset,
                size: block.size,
                stage,
            })
            .collect();

        let vertex_attributes = if stage == vk::ShaderStageFlags::VERTEX {
            let mut attributes = vec![];
            for input in &introspection.input_variables {
                if input.built_in && !self.options.include_builtin_inputs {
                    log::warn!("{}: skipping built-in input {}", shader.name, input.name);
                    continue;
                }
                let format = convert::format(input.format).map_err(unsupported(Some(
                    ResourceLocation::Input {
                        location: input.location,
                    },
                )))?;
                attributes.push(VertexAttribute {
                    location: input.location,
                    format,
                });
            }
            Some(attributes)
        } else {
            None
        };

        log::debug!(
            "extracted {} ({:?}): {} descriptor sets, {} push constants",
            shader.name,
            stage,
            descriptor_sets.len(),
            introspection.push_constant_blocks.len()
        );

        Ok(StageResourceDescription {
            shader,
            stage,
            descriptor_sets,
            push_constants,
            vertex_attributes,
            code,
        })
    }
}
