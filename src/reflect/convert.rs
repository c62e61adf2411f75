//! Closed lookup tables from introspected codes to Vulkan enums.

use super::introspection::{DescriptorTypeCode, FormatCode, StageCode};
use ash::vk;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EnumTable {
    Format,
    DescriptorType,
    ShaderStage,
}

impl fmt::Display for EnumTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnumTable::Format => "format",
            EnumTable::DescriptorType => "descriptor type",
            EnumTable::ShaderStage => "shader stage",
        };
        f.write_str(name)
    }
}

/// A reflected code with no entry in its table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnsupportedEnum {
    pub table: EnumTable,
    pub code: u32,
}

impl UnsupportedEnum {
    fn new(table: EnumTable, code: u32) -> Self {
        Self { table, code }
    }
}

pub fn format(code: FormatCode) -> Result<vk::Format, UnsupportedEnum> {
    let format = match code.0 {
        0 => vk::Format::UNDEFINED,
        74 => vk::Format::R16_UINT,
        75 => vk::Format::R16_SINT,
        76 => vk::Format::R16_SFLOAT,
        81 => vk::Format::R16G16_UINT,
        82 => vk::Format::R16G16_SINT,
        83 => vk::Format::R16G16_SFLOAT,
        88 => vk::Format::R16G16B16_UINT,
        89 => vk::Format::R16G16B16_SINT,
        90 => vk::Format::R16G16B16_SFLOAT,
        95 => vk::Format::R16G16B16A16_UINT,
        96 => vk::Format::R16G16B16A16_SINT,
        97 => vk::Format::R16G16B16A16_SFLOAT,
        98 => vk::Format::R32_UINT,
        99 => vk::Format::R32_SINT,
        100 => vk::Format::R32_SFLOAT,
        101 => vk::Format::R32G32_UINT,
        102 => vk::Format::R32G32_SINT,
        103 => vk::Format::R32G32_SFLOAT,
        104 => vk::Format::R32G32B32_UINT,
        105 => vk::Format::R32G32B32_SINT,
        106 => vk::Format::R32G32B32_SFLOAT,
        107 => vk::Format::R32G32B32A32_UINT,
        108 => vk::Format::R32G32B32A32_SINT,
        109 => vk::Format::R32G32B32A32_SFLOAT,
        110 => vk::Format::R64_UINT,
        111 => vk::Format::R64_SINT,
        112 => vk::Format::R64_SFLOAT,
        113 => vk::Format::R64G64_UINT,
        114 => vk::Format::R64G64_SINT,
        115 => vk::Format::R64G64_SFLOAT,
        116 => vk::Format::R64G64B64_UINT,
        117 => vk::Format::R64G64B64_SINT,
        118 => vk::Format::R64G64B64_SFLOAT,
        119 => vk::Format::R64G64B64A64_UINT,
        120 => vk::Format::R64G64B64A64_SINT,
        121 => vk::Format::R64G64B64A64_SFLOAT,
        other => return Err(UnsupportedEnum::new(EnumTable::Format, other)),
    };

    Ok(format)
}

pub fn descriptor_type(code: DescriptorTypeCode) -> Result<vk::DescriptorType, UnsupportedEnum> {
    let descriptor_type = match code.0 {
        0 => vk::DescriptorType::SAMPLER,
        1 => vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
        2 => vk::DescriptorType::SAMPLED_IMAGE,
        3 => vk::DescriptorType::STORAGE_IMAGE,
        4 => vk::DescriptorType::UNIFORM_TEXEL_BUFFER,
        5 => vk::DescriptorType::STORAGE_TEXEL_BUFFER,
        6 => vk::DescriptorType::UNIFORM_BUFFER,
        7 => vk::DescriptorType::STORAGE_BUFFER,
        8 => vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC,
        9 => vk::DescriptorType::STORAGE_BUFFER_DYNAMIC,
        10 => vk::DescriptorType::INPUT_ATTACHMENT,
        1000150000 => vk::DescriptorType::ACCELERATION_STRUCTURE_KHR,
        other => return Err(UnsupportedEnum::new(EnumTable::DescriptorType, other)),
    };

    Ok(descriptor_type)
}

pub fn shader_stage(code: StageCode) -> Result<vk::ShaderStageFlags, UnsupportedEnum> {
    let stage = match code.0 {
        0x0000_0001 => vk::ShaderStageFlags::VERTEX,
        0x0000_0002 => vk::ShaderStageFlags::TESSELLATION_CONTROL,
        0x0000_0004 => vk::ShaderStageFlags::TESSELLATION_EVALUATION,
        0x0000_0008 => vk::ShaderStageFlags::GEOMETRY,
        0x0000_0010 => vk::ShaderStageFlags::FRAGMENT,
        0x0000_0020 => vk::ShaderStageFlags::COMPUTE,
        0x0000_0040 => vk::ShaderStageFlags::TASK_EXT,
        0x0000_0080 => vk::ShaderStageFlags::MESH_EXT,
        0x0000_0100 => vk::ShaderStageFlags::RAYGEN_KHR,
        0x0000_0200 => vk::ShaderStageFlags::ANY_HIT_KHR,
        0x0000_0400 => vk::ShaderStageFlags::CLOSEST_HIT_KHR,
        0x0000_0800 => vk::ShaderStageFlags::MISS_KHR,
        0x0000_1000 => vk::ShaderStageFlags::INTERSECTION_KHR,
        0x0000_2000 => vk::ShaderStageFlags::CALLABLE_KHR,
        other => return Err(UnsupportedEnum::new(EnumTable::ShaderStage, other)),
    };

    Ok(stage)
}

/// Byte size of one vertex attribute in `format`, for the formats [`format`] can produce.
pub fn format_size(format: vk::Format) -> Option<u32> {
    let size = match format {
        vk::Format::R16_UINT | vk::Format::R16_SINT | vk::Format::R16_SFLOAT => 2,
        vk::Format::R16G16_UINT | vk::Format::R16G16_SINT | vk::Format::R16G16_SFLOAT => 4,
        vk::Format::R16G16B16_UINT | vk::Format::R16G16B16_SINT | vk::Format::R16G16B16_SFLOAT => {
            6
        }
        vk::Format::R16G16B16A16_UINT
        | vk::Format::R16G16B16A16_SINT
        | vk::Format::R16G16B16A16_SFLOAT => 8,
        vk::Format::R32_UINT | vk::Format::R32_SINT | vk::Format::R32_SFLOAT => 4,
        vk::Format::R32G32_UINT | vk::Format::R32G32_SINT | vk::Format::R32G32_SFLOAT => 8,
        vk::Format::R32G32B32_UINT | vk::Format::R32G32B32_SINT | vk::Format::R32G32B32_SFLOAT => {
            12
        }
        vk::Format::R32G32B32A32_UINT
        | vk::Format::R32G32B32A32_SINT
        | vk::Format::R32G32B32A32_SFLOAT => 16,
        vk::Format::R64_UINT | vk::Format::R64_SINT | vk::Format::R64_SFLOAT => 8,
        vk::Format::R64G64_UINT | vk::Format::R64G64_SINT | vk::Format::R64G64_SFLOAT => 16,
        vk::Format::R64G64B64_UINT | vk::Format::R64G64B64_SINT | vk::Format::R64G64B64_SFLOAT => {
            24
        }
        vk::Format::R64G64B64A64_UINT
        | vk::Format::R64G64B64A64_SINT
        | vk::Format::R64G64B64A64_SFLOAT => 32,
        _ => return None,
    };

    Some(size)
}
