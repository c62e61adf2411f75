use ash::vk;

/// One slot of a descriptor set. Identity within a set is `binding`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub binding: u32,
    pub desc_type: vk::DescriptorType,
    pub count: u32,
    pub stage: vk::ShaderStageFlags,
}

impl Binding {
    pub fn to_vk(&self) -> vk::DescriptorSetLayoutBinding<'static> {
        vk::DescriptorSetLayoutBinding::default()
            .binding(self.binding)
            .descriptor_type(self.desc_type)
            .descriptor_count(self.count)
            .stage_flags(self.stage)
    }
}

/// Two declarations of the same binding index that disagree on kind or count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BindingConflict {
    pub binding: u32,
    pub existing: (vk::DescriptorType, u32),
    pub found: (vk::DescriptorType, u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorSet {
    pub set: u32,
    pub bindings: Vec<Binding>,
}

impl DescriptorSet {
    pub fn new(set: u32) -> Self {
        Self {
            set,
            bindings: vec![],
        }
    }

    pub fn binding(&self, binding: u32) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.binding == binding)
    }

    /// Appends `incoming`, or unions its stages into the binding with the same index.
    ///
    /// Bindings keep the order they were first seen in.
    pub fn merge_binding(&mut self, incoming: Binding) -> Result<(), BindingConflict> {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.binding == incoming.binding)
        {
            None => {
                self.bindings.push(incoming);
                Ok(())
            }
            Some(existing)
                if existing.desc_type != incoming.desc_type || existing.count != incoming.count =>
            {
                Err(BindingConflict {
                    binding: incoming.binding,
                    existing: (existing.desc_type, existing.count),
                    found: (incoming.desc_type, incoming.count),
                })
            }
            Some(existing) => {
                existing.stage |= incoming.stage;
                Ok(())
            }
        }
    }

    pub fn layout_bindings(&self) -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
        self.bindings.iter().map(Binding::to_vk).collect()
    }
}

/// Identity for merging is the exact `(offset, size)` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PushConstantRange {
    pub offset: u32,
    pub size: u32,
    pub stage: vk::ShaderStageFlags,
}

impl PushConstantRange {
    pub fn same_range(&self, other: &PushConstantRange) -> bool {
        self.offset == other.offset && self.size == other.size
    }

    pub fn to_vk(&self) -> vk::PushConstantRange {
        vk::PushConstantRange::default()
            .stage_flags(self.stage)
            .offset(self.offset)
            .size(self.size)
    }
}

/// A vertex input as declared by the shader. Binding and offset are the caller's business.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: vk::Format,
}

impl VertexAttribute {
    pub fn to_vk(&self, binding: u32, offset: u32) -> vk::VertexInputAttributeDescription {
        vk::VertexInputAttributeDescription {
            location: self.location,
            binding,
            format: self.format,
            offset,
        }
    }
}
