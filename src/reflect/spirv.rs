use super::introspection::*;
use spirq::ty::{ScalarType, Type};
use spirq::{DescriptorType, ReflectConfig, Variable};

/// [`Introspect`] backed by spirq.
///
/// Only the first entry point of a module is reported. spirq hands back
/// interface variables that carry a `Location`, so built-in inputs never
/// show up here.
#[derive(Debug, Copy, Clone, Default)]
pub struct SpirvIntrospector;

impl Introspect for SpirvIntrospector {
    fn introspect(&self, bytes: &[u8]) -> Result<ShaderIntrospection, String> {
        let mut config = ReflectConfig::new();
        config.ref_all_rscs(true).spv(bytes);

        let entry_points = config.reflect().map_err(|e| e.to_string())?;
        if entry_points.len() > 1 {
            log::debug!(
                "{} entry points, reflecting {:?}",
                entry_points.len(),
                entry_points[0].name
            );
        }
        let entry_point = entry_points
            .into_iter()
            .next()
            .ok_or_else(|| "module declares no entry point".to_owned())?;

        let mut descriptor_sets: Vec<IntrospectedSet> = vec![];
        let mut push_constant_blocks = vec![];
        let mut input_variables = vec![];

        for var in &entry_point.vars {
            match var {
                Variable::Descriptor {
                    name,
                    desc_bind,
                    desc_ty,
                    nbind,
                    ..
                } => {
                    let binding = IntrospectedBinding {
                        name: name.clone().unwrap_or_default(),
                        binding: desc_bind.bind(),
                        descriptor_type: descriptor_type_code(desc_ty),
                        count: *nbind,
                    };
                    match descriptor_sets
                        .iter_mut()
                        .find(|set| set.set == desc_bind.set())
                    {
                        Some(set) => set.bindings.push(binding),
                        None => descriptor_sets.push(IntrospectedSet {
                            set: desc_bind.set(),
                            bindings: vec![binding],
                        }),
                    }
                }
                Variable::PushConstant {
                    name,
                    ty: Type::Struct(block),
                    ..
                } => {
                    let range = block
                        .members
                        .iter()
                        .map(|member| {
                            member.offset..member.offset + member.ty.nbyte().unwrap_or_default()
                        })
                        .reduce(|a, b| a.start.min(b.start)..a.end.max(b.end))
                        .unwrap_or_default();
                    push_constant_blocks.push(IntrospectedBlock {
                        name: name.clone().unwrap_or_default(),
                        offset: range.start as u32,
                        size: (range.end - range.start) as u32,
                    });
                }
                Variable::Input { name, location, ty, .. } => {
                    input_variables.push(IntrospectedInput {
                        name: name.clone().unwrap_or_default(),
                        location: location.loc(),
                        format: format_code(ty),
                        built_in: false,
                    });
                }
                _ => {}
            }
        }

        // spirq does not promise any order, so hand out the sorted one
        descriptor_sets.sort_by_key(|set| set.set);
        for set in &mut descriptor_sets {
            set.bindings.sort_by_key(|binding| binding.binding);
        }
        input_variables.sort_by_key(|input| input.location);

        Ok(ShaderIntrospection {
            stage: stage_code(entry_point.exec_model as u32),
            entry_point: entry_point.name,
            descriptor_sets,
            push_constant_blocks,
            input_variables,
        })
    }
}

/// Outside every conversion table.
const UNDEFINED_DESCRIPTOR_TYPE: u32 = u32::MAX;
const UNDEFINED_STAGE: u32 = 0;
const UNDEFINED_FORMAT: u32 = 0;

fn descriptor_type_code(descriptor_type: &DescriptorType) -> DescriptorTypeCode {
    let code = match descriptor_type {
        DescriptorType::Sampler(..) => 0,
        DescriptorType::CombinedImageSampler(..) => 1,
        DescriptorType::SampledImage(..) => 2,
        DescriptorType::StorageImage(..) => 3,
        DescriptorType::UniformTexelBuffer(..) => 4,
        DescriptorType::StorageTexelBuffer(..) => 5,
        DescriptorType::UniformBuffer(..) => 6,
        DescriptorType::StorageBuffer(..) => 7,
        DescriptorType::InputAttachment(..) => 10,
        DescriptorType::AccelStruct(..) => 1000150000,
        #[allow(unreachable_patterns)]
        _ => UNDEFINED_DESCRIPTOR_TYPE,
    };
    DescriptorTypeCode(code)
}

/// `exec_model` is the raw SPIR-V `ExecutionModel` operand.
fn stage_code(exec_model: u32) -> StageCode {
    let bit = match exec_model {
        0 => 0x0000_0001,
        1 => 0x0000_0002,
        2 => 0x0000_0004,
        3 => 0x0000_0008,
        4 => 0x0000_0010,
        5 => 0x0000_0020,
        // NV and EXT flavours of task and mesh share their stage bits
        5267 | 5364 => 0x0000_0040,
        5268 | 5365 => 0x0000_0080,
        5313 => 0x0000_0100,
        5314 => 0x0000_1000,
        5315 => 0x0000_0200,
        5316 => 0x0000_0400,
        5317 => 0x0000_0800,
        5318 => 0x0000_2000,
        _ => UNDEFINED_STAGE,
    };
    StageCode(bit)
}

/// Scalar and vector inputs of 16, 32 or 64-bit integers and floats.
fn format_code(ty: &Type) -> FormatCode {
    let scalar = match ty {
        Type::Scalar(scalar) => scalar,
        Type::Vector(vector) => &vector.scalar_ty,
        _ => return FormatCode(UNDEFINED_FORMAT),
    };
    let kind = match scalar {
        ScalarType::Unsigned(..) => 0,
        ScalarType::Signed(..) => 1,
        ScalarType::Float(..) => 2,
        _ => return FormatCode(UNDEFINED_FORMAT),
    };
    let width = scalar.nbyte();
    // UINT, SINT and SFLOAT sit next to each other within each component count
    let (first, per_component_count) = match width {
        2 => (74, 7),
        4 => (98, 3),
        8 => (110, 3),
        _ => return FormatCode(UNDEFINED_FORMAT),
    };
    let components = ty.nbyte().unwrap_or_default() / width;
    if !(1..=4).contains(&components) {
        return FormatCode(UNDEFINED_FORMAT);
    }

    FormatCode(first + per_component_count * (components as u32 - 1) + kind)
}
