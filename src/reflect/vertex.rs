use super::convert::{self, EnumTable};
use super::error::{ReflectError, ResourceLocation, Result};
use super::layout_desc::VertexAttribute;
use super::stage::StageResourceDescription;
use ash::vk;

/// Binding and attribute descriptions for a vertex buffer.
///
/// Reflection only knows locations and formats, so the layout is one of the
/// caller's choosing; [`VertexInputLayout::interleaved`] covers the common
/// single-buffer case.
#[derive(Debug, Clone)]
pub struct VertexInputLayout {
    pub binding: vk::VertexInputBindingDescription,
    pub attributes: Vec<vk::VertexInputAttributeDescription>,
}

impl VertexInputLayout {
    /// Packs every attribute, ordered by location, tightly into one buffer.
    pub fn interleaved(stage: &StageResourceDescription, binding: u32) -> Result<Self> {
        let mut inputs: Vec<VertexAttribute> = stage.vertex_attributes.clone().unwrap_or_default();
        // reflection order is not location order
        inputs.sort_by_key(|attribute| attribute.location);

        let mut offset = 0;
        let mut attributes = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let size = convert::format_size(input.format).ok_or_else(|| {
                ReflectError::UnsupportedEnumValue {
                    shader: stage.name().to_owned(),
                    table: EnumTable::Format,
                    code: input.format.as_raw() as u32,
                    resource: Some(ResourceLocation::Input {
                        location: input.location,
                    }),
                }
            })?;
            attributes.push(input.to_vk(binding, offset));
            offset += size;
        }

        Ok(Self {
            binding: vk::VertexInputBindingDescription {
                binding,
                stride: offset,
                input_rate: vk::VertexInputRate::VERTEX,
            },
            attributes,
        })
    }

    pub fn input_state_create_info(&self) -> vk::PipelineVertexInputStateCreateInfo<'_> {
        vk::PipelineVertexInputStateCreateInfo::default()
            .vertex_binding_descriptions(std::slice::from_ref(&self.binding))
            .vertex_attribute_descriptions(&self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::stage::ShaderIdentity;
    use std::path::Path;

    fn vertex_stage(attributes: Vec<VertexAttribute>) -> StageResourceDescription {
        StageResourceDescription {
            shader: ShaderIdentity::from_path(Path::new("mesh.vert.spv"), "main").unwrap(),
            stage: vk::ShaderStageFlags::VERTEX,
            descriptor_sets: vec![],
            push_constants: vec![],
            vertex_attributes: Some(attributes),
            code: vec![],
        }
    }

    #[test]
    fn packs_by_location() {
        let stage = vertex_stage(vec![
            VertexAttribute {
                location: 2,
                format: vk::Format::R32G32_SFLOAT,
            },
            VertexAttribute {
                location: 0,
                format: vk::Format::R32G32B32_SFLOAT,
            },
            VertexAttribute {
                location: 1,
                format: vk::Format::R32G32B32_SFLOAT,
            },
        ]);

        let layout = VertexInputLayout::interleaved(&stage, 0).unwrap();
        assert_eq!(layout.binding.stride, 32);
        assert_eq!(layout.binding.input_rate, vk::VertexInputRate::VERTEX);

        let placed: Vec<(u32, u32)> = layout
            .attributes
            .iter()
            .map(|attribute| (attribute.location, attribute.offset))
            .collect();
        assert_eq!(placed, vec![(0, 0), (1, 12), (2, 24)]);

        let info = layout.input_state_create_info();
        assert_eq!(info.vertex_binding_description_count, 1);
        assert_eq!(info.vertex_attribute_description_count, 3);
    }

    #[test]
    fn undefined_format_has_no_size() {
        let stage = vertex_stage(vec![VertexAttribute {
            location: 4,
            format: vk::Format::UNDEFINED,
        }]);
        assert!(matches!(
            VertexInputLayout::interleaved(&stage, 0),
            Err(ReflectError::UnsupportedEnumValue {
                code: 0,
                resource: Some(ResourceLocation::Input { location: 4 }),
                ..
            })
        ));
    }
}
