use super::error::{ReflectError, Result};
use super::layout_desc::{DescriptorSet, PushConstantRange};
use super::stage::StageResourceDescription;
use ash::vk;

/// Resources of a whole pipeline, merged across its stages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineResourceDescription {
    pub descriptor_sets: Vec<DescriptorSet>,
    pub push_constants: Vec<PushConstantRange>,
    /// The unmerged stages, in the order they were supplied.
    pub per_stage: Vec<StageResourceDescription>,
}

impl PipelineResourceDescription {
    /// Merges one stage into the running aggregate.
    fn merge_stage(mut self, stage: StageResourceDescription) -> Result<Self> {
        for stage_set in &stage.descriptor_sets {
            let Some(set) = self
                .descriptor_sets
                .iter_mut()
                .find(|set| set.set == stage_set.set)
            else {
                log::trace!("{}: new descriptor set #{}", stage.name(), stage_set.set);
                self.descriptor_sets.push(stage_set.clone());
                continue;
            };

            for binding in &stage_set.bindings {
                set.merge_binding(*binding).map_err(|conflict| {
                    ReflectError::ConflictingBindingDeclaration {
                        shader: stage.name().to_owned(),
                        set: stage_set.set,
                        binding: conflict.binding,
                        existing: conflict.existing.0,
                        existing_count: conflict.existing.1,
                        found: conflict.found.0,
                        found_count: conflict.found.1,
                    }
                })?;
            }
        }

        for range in &stage.push_constants {
            match self
                .push_constants
                .iter_mut()
                .find(|existing| existing.same_range(range))
            {
                Some(existing) => existing.stage |= range.stage,
                None => self.push_constants.push(*range),
            }
        }

        self.per_stage.push(stage);
        Ok(self)
    }

    pub fn descriptor_set(&self, set: u32) -> Option<&DescriptorSet> {
        self.descriptor_sets.iter().find(|s| s.set == set)
    }

    /// Union of every stage in the pipeline.
    pub fn stage_flags(&self) -> vk::ShaderStageFlags {
        self.per_stage
            .iter()
            .fold(vk::ShaderStageFlags::empty(), |flags, stage| flags | stage.stage)
    }

    pub fn vertex_stage(&self) -> Option<&StageResourceDescription> {
        self.per_stage
            .iter()
            .find(|stage| stage.stage == vk::ShaderStageFlags::VERTEX)
    }

    pub fn push_constant_ranges(&self) -> Vec<vk::PushConstantRange> {
        self.push_constants.iter().map(PushConstantRange::to_vk).collect()
    }

    /// Pool sizes able to hold `max_sets` copies of every descriptor set.
    ///
    /// Counts saturate at `u32::MAX`; no device accepts a pool that large.
    pub fn descriptor_pool_sizes(&self, max_sets: u32) -> Vec<vk::DescriptorPoolSize> {
        let mut sizes: Vec<vk::DescriptorPoolSize> = vec![];
        for binding in self.descriptor_sets.iter().flat_map(|set| &set.bindings) {
            let count = binding.count.saturating_mul(max_sets);
            match sizes.iter_mut().find(|size| size.ty == binding.desc_type) {
                Some(size) => {
                    size.descriptor_count = size.descriptor_count.saturating_add(count)
                }
                None => sizes.push(
                    vk::DescriptorPoolSize::default()
                        .ty(binding.desc_type)
                        .descriptor_count(count),
                ),
            }
        }
        sizes
    }
}

/// Folds the stages, left to right, into one pipeline description.
///
/// Sets and bindings keep first-seen order. A binding declared by several
/// stages collects all of their flags, and must agree on kind and count.
/// Push-constant ranges merge only when offset and size match exactly.
pub fn aggregate(stages: Vec<StageResourceDescription>) -> Result<PipelineResourceDescription> {
    let pipeline = stages
        .into_iter()
        .try_fold(PipelineResourceDescription::default(), |pipeline, stage| {
            pipeline.merge_stage(stage)
        })?;

    log::info!(
        "aggregated {} stages ({:?}): {} descriptor sets, {} push constant ranges",
        pipeline.per_stage.len(),
        pipeline.stage_flags(),
        pipeline.descriptor_sets.len(),
        pipeline.push_constants.len()
    );

    Ok(pipeline)
}
