use ash::vk;
use pipeline_reflect::reflect::{
    DescriptorTypeCode, FormatCode, IntrospectedBinding, IntrospectedBlock, IntrospectedInput,
    IntrospectedSet, Introspect, ShaderIntrospection, StageCode,
};
use pipeline_reflect::{
    Binding, EmbeddedShaders, FsShaders, PipelineReflector, PushConstantRange, ReflectError,
    ReflectOptions, VertexAttribute, VertexInputLayout,
};
use rust_embed::RustEmbed;
use static_assertions::assert_impl_all;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "tests/fixtures"]
struct Fixtures;

const UNIFORM_BUFFER: DescriptorTypeCode = DescriptorTypeCode(6);
const STORAGE_BUFFER: DescriptorTypeCode = DescriptorTypeCode(7);
const COMBINED_IMAGE_SAMPLER: DescriptorTypeCode = DescriptorTypeCode(1);
const R32G32B32_SFLOAT: FormatCode = FormatCode(106);
const R32G32_SFLOAT: FormatCode = FormatCode(103);

/// Answers with a canned record for each fixture. A fixture is the SPIR-V
/// magic word followed by a four-byte tag.
struct ScriptedIntrospector;

fn binding(binding: u32, descriptor_type: DescriptorTypeCode) -> IntrospectedBinding {
    IntrospectedBinding {
        name: format!("binding{binding}"),
        binding,
        descriptor_type,
        count: 1,
    }
}

fn input(location: u32, format: FormatCode) -> IntrospectedInput {
    IntrospectedInput {
        name: format!("in{location}"),
        location,
        format,
        built_in: false,
    }
}

impl Introspect for ScriptedIntrospector {
    fn introspect(&self, bytes: &[u8]) -> Result<ShaderIntrospection, String> {
        let tag = match bytes {
            [0x03, 0x02, 0x23, 0x07, tag @ ..] => tag,
            _ => return Err("invalid SPIR-V magic number".into()),
        };
        let record = match tag {
            b"vert" => ShaderIntrospection {
                entry_point: "main".into(),
                stage: StageCode(0x1),
                descriptor_sets: vec![IntrospectedSet {
                    set: 0,
                    bindings: vec![binding(0, UNIFORM_BUFFER)],
                }],
                push_constant_blocks: vec![IntrospectedBlock {
                    name: "object".into(),
                    offset: 0,
                    size: 64,
                }],
                input_variables: vec![input(0, R32G32B32_SFLOAT), input(1, R32G32_SFLOAT)],
            },
            b"frag" => ShaderIntrospection {
                entry_point: "main".into(),
                stage: StageCode(0x10),
                descriptor_sets: vec![IntrospectedSet {
                    set: 0,
                    bindings: vec![binding(0, UNIFORM_BUFFER), binding(1, COMBINED_IMAGE_SAMPLER)],
                }],
                push_constant_blocks: vec![IntrospectedBlock {
                    name: "object".into(),
                    offset: 0,
                    size: 64,
                }],
                input_variables: vec![input(0, R32G32_SFLOAT)],
            },
            // declares binding 0 as a storage buffer
            b"frg2" => ShaderIntrospection {
                entry_point: "main".into(),
                stage: StageCode(0x10),
                descriptor_sets: vec![IntrospectedSet {
                    set: 0,
                    bindings: vec![binding(0, STORAGE_BUFFER)],
                }],
                push_constant_blocks: vec![],
                input_variables: vec![],
            },
            b"comp" => ShaderIntrospection {
                entry_point: "cull".into(),
                stage: StageCode(0x20),
                descriptor_sets: vec![
                    IntrospectedSet {
                        set: 0,
                        bindings: vec![binding(0, STORAGE_BUFFER)],
                    },
                    IntrospectedSet {
                        set: 1,
                        bindings: vec![],
                    },
                ],
                push_constant_blocks: vec![],
                input_variables: vec![],
            },
            _ => return Err(format!("no canned record for tag {tag:?}")),
        };
        Ok(record)
    }
}

fn fixtures() -> FsShaders {
    FsShaders::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

assert_impl_all!(pipeline_reflect::PipelineResourceDescription: Send, Sync);
assert_impl_all!(pipeline_reflect::StageResourceDescription: Send, Sync);
assert_impl_all!(ReflectError: Send, Sync);

#[test]
fn vertex_and_fragment_pipeline() {
    let reflector = PipelineReflector::new(fixtures(), ScriptedIntrospector);
    let pipeline = reflector
        .reflect_pipeline(&["mesh.vert.spv", "lit.frag.spv"])
        .unwrap();

    assert_eq!(pipeline.descriptor_sets.len(), 1);
    let set = &pipeline.descriptor_sets[0];
    assert_eq!(set.set, 0);
    assert_eq!(
        set.bindings,
        vec![
            Binding {
                binding: 0,
                desc_type: vk::DescriptorType::UNIFORM_BUFFER,
                count: 1,
                stage: vk::ShaderStageFlags::VERTEX | vk::ShaderStageFlags::FRAGMENT,
            },
            Binding {
                binding: 1,
                desc_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
                count: 1,
                stage: vk::ShaderStageFlags::FRAGMENT,
            },
        ]
    );

    assert_eq!(pipeline.push_constants.len(), 1);
    assert_eq!(
        pipeline.push_constants[0].stage,
        vk::ShaderStageFlags::VERTEX | vk::ShaderStageFlags::FRAGMENT
    );

    let names: Vec<&str> = pipeline.per_stage.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["mesh.vert", "lit.frag"]);

    let vertex = &pipeline.per_stage[0];
    assert_eq!(
        vertex.vertex_attributes,
        Some(vec![
            VertexAttribute {
                location: 0,
                format: vk::Format::R32G32B32_SFLOAT,
            },
            VertexAttribute {
                location: 1,
                format: vk::Format::R32G32_SFLOAT,
            },
        ])
    );
    assert_eq!(pipeline.per_stage[1].vertex_attributes, None);
    assert_eq!(vertex.code, vec![0x0723_0203, u32::from_le_bytes(*b"vert")]);

    let layout = VertexInputLayout::interleaved(vertex, 0).unwrap();
    assert_eq!(layout.binding.stride, 20);

    let report = pipeline.to_string();
    assert!(report.contains("-[Shader Stages: 2]"));
    assert!(report.contains("-[mesh.vert | VERTEX | Entry: main"));
}

#[test]
fn parallel_extraction_keeps_input_order() {
    let paths = ["lit.frag.spv", "mesh.vert.spv"];
    let sequential = PipelineReflector::new(fixtures(), ScriptedIntrospector)
        .reflect_pipeline(&paths)
        .unwrap();
    let parallel = PipelineReflector::new(fixtures(), ScriptedIntrospector)
        .with_options(ReflectOptions::default().parallel_extraction(true))
        .reflect_pipeline(&paths)
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.per_stage[0].stage, vk::ShaderStageFlags::FRAGMENT);
    // the fragment shader came first, so its binding 1 keeps its slot
    let order: Vec<u32> = parallel.descriptor_sets[0]
        .bindings
        .iter()
        .map(|b| b.binding)
        .collect();
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn embedded_source() {
    let reflector = PipelineReflector::new(EmbeddedShaders::<Fixtures>::new(), ScriptedIntrospector);
    let pipeline = reflector
        .reflect_pipeline(&["mesh.vert.spv", "lit.frag.spv"])
        .unwrap();
    assert_eq!(pipeline.per_stage.len(), 2);
}

#[test]
fn conflicting_fragment_aborts_pipeline() {
    let reflector = PipelineReflector::new(fixtures(), ScriptedIntrospector);
    let err = reflector
        .reflect_pipeline(&["mesh.vert.spv", "unlit.frag.spv"])
        .unwrap_err();

    match err {
        ReflectError::ConflictingBindingDeclaration {
            ref shader,
            set,
            binding,
            existing,
            found,
            ..
        } => {
            assert_eq!(shader, "unlit.frag");
            assert_eq!((set, binding), (0, 0));
            assert_eq!(existing, vk::DescriptorType::UNIFORM_BUFFER);
            assert_eq!(found, vk::DescriptorType::STORAGE_BUFFER);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_set_aborts_pipeline() {
    let reflector = PipelineReflector::new(fixtures(), ScriptedIntrospector);
    let err = reflector
        .reflect_pipeline(&["cull.comp.spv"])
        .unwrap_err();
    assert!(matches!(err, ReflectError::EmptyDescriptorSet { set: 1, .. }));
    assert_eq!(err.shader(), Some("cull.comp"));
}

#[test]
fn missing_file_is_a_storage_error() {
    let reflector = PipelineReflector::new(fixtures(), ScriptedIntrospector);
    let err = reflector
        .reflect_pipeline(&["mesh.vert.spv", "nope.frag.spv"])
        .unwrap_err();
    match err {
        ReflectError::Storage { path, .. } => assert_eq!(path, Path::new("nope.frag.spv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn introspection_failure_is_malformed_bytecode() {
    let reflector = PipelineReflector::new(fixtures(), ScriptedIntrospector);
    let err = reflector.reflect_shader(Path::new("broken.spv")).unwrap_err();
    match err {
        ReflectError::MalformedBytecode { shader, reason } => {
            assert_eq!(shader, "broken");
            assert!(reason.contains("magic"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn spirv_module_from_disk() {
    let reflector = PipelineReflector::spirv(Some(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures").into(),
    ));
    let pipeline = reflector.reflect_pipeline(&["camera.vert.spv"]).unwrap();

    let set = pipeline.descriptor_set(1).unwrap();
    assert_eq!(
        set.bindings,
        vec![Binding {
            binding: 3,
            desc_type: vk::DescriptorType::UNIFORM_BUFFER,
            count: 1,
            stage: vk::ShaderStageFlags::VERTEX,
        }]
    );
    assert_eq!(
        pipeline.push_constants,
        vec![PushConstantRange {
            offset: 0,
            size: 20,
            stage: vk::ShaderStageFlags::VERTEX,
        }]
    );

    let vertex = pipeline.vertex_stage().unwrap();
    assert_eq!(vertex.name(), "camera.vert");
    assert_eq!(vertex.entry_point().to_str(), Ok("main"));
    assert_eq!(vertex.code[0], 0x0723_0203);
    let layout = VertexInputLayout::interleaved(vertex, 0).unwrap();
    assert_eq!(layout.binding.stride, 12);
    assert_eq!(layout.attributes[0].format, vk::Format::R32G32B32_SFLOAT);
}
