/// Raw format code, numbered like `VkFormat`; 0 is undefined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FormatCode(pub u32);

/// Raw descriptor type code, numbered like `VkDescriptorType`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorTypeCode(pub u32);

/// Raw shader stage bit, numbered like `VkShaderStageFlagBits`; expected to hold a single bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StageCode(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedBinding {
    pub name: String,
    pub binding: u32,
    pub descriptor_type: DescriptorTypeCode,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedSet {
    pub set: u32,
    pub bindings: Vec<IntrospectedBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedBlock {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedInput {
    pub name: String,
    pub location: u32,
    pub format: FormatCode,
    pub built_in: bool,
}

/// What a bytecode introspector reports about one shader module.
///
/// This is treated as already-normalized input: sets, bindings, blocks and
/// inputs keep the order the introspector produced them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderIntrospection {
    pub entry_point: String,
    pub stage: StageCode,
    pub descriptor_sets: Vec<IntrospectedSet>,
    pub push_constant_blocks: Vec<IntrospectedBlock>,
    pub input_variables: Vec<IntrospectedInput>,
}

/// Turns shader bytecode into a [`ShaderIntrospection`].
///
/// The error string is wrapped into `ReflectError::MalformedBytecode`.
pub trait Introspect: Send + Sync {
    fn introspect(&self, bytes: &[u8]) -> Result<ShaderIntrospection, String>;
}
