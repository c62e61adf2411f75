use super::pipeline::PipelineResourceDescription;
use std::fmt;

impl fmt::Display for PipelineResourceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Pipeline | {:?}]", self.stage_flags())?;

        writeln!(f, "\t-[Shader Stages: {}]", self.per_stage.len())?;
        for stage in &self.per_stage {
            writeln!(
                f,
                "\t\t-[{} | {:?} | Entry: {} | Source: {}]",
                stage.name(),
                stage.stage,
                stage.entry_point().to_string_lossy(),
                stage.shader.source_path.display()
            )?;
        }

        for set in &self.descriptor_sets {
            writeln!(
                f,
                "\t-[Descriptor Set #{} | Bindings: {}]",
                set.set,
                set.bindings.len()
            )?;
            for binding in &set.bindings {
                writeln!(
                    f,
                    "\t\t-[Binding #{} | {:?} | Count: {} | Stages: {:?}]",
                    binding.binding, binding.desc_type, binding.count, binding.stage
                )?;
            }
        }

        for (i, range) in self.push_constants.iter().enumerate() {
            writeln!(
                f,
                "\t-[Push Constant #{} | Size: {} | Offset: {} | Stages: {:?}]",
                i, range.size, range.offset, range.stage
            )?;
        }

        Ok(())
    }
}
