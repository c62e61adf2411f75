use super::convert::EnumTable;
use ash::vk;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T, E = ReflectError> = std::result::Result<T, E>;

/// Every failure aborts the whole pipeline; nothing is retried or recovered.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    #[error("failed to read shader binary {path}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed shader bytecode in {shader}: {reason}")]
    MalformedBytecode { shader: String, reason: String },

    #[error("descriptor set #{set} of {shader} has no bindings")]
    EmptyDescriptorSet { shader: String, set: u32 },

    #[error("{shader}: unsupported {table} value {code}{}", located_at(.resource))]
    UnsupportedEnumValue {
        shader: String,
        table: EnumTable,
        code: u32,
        /// `None` for the shader stage, which belongs to the whole module.
        resource: Option<ResourceLocation>,
    },

    #[error(
        "{shader}: set #{set} binding #{binding} declared as {found:?} x{found_count}, \
         but an earlier declaration is {existing:?} x{existing_count}"
    )]
    ConflictingBindingDeclaration {
        shader: String,
        set: u32,
        binding: u32,
        existing: vk::DescriptorType,
        existing_count: u32,
        found: vk::DescriptorType,
        found_count: u32,
    },
}

/// The resource whose reflected code could not be converted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceLocation {
    Binding { set: u32, binding: u32 },
    Input { location: u32 },
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Binding { set, binding } => {
                write!(f, "set #{set} binding #{binding}")
            }
            ResourceLocation::Input { location } => write!(f, "input location #{location}"),
        }
    }
}

fn located_at(resource: &Option<ResourceLocation>) -> String {
    resource
        .map(|resource| format!(" at {resource}"))
        .unwrap_or_default()
}

impl ReflectError {
    /// Name of the shader the error was raised for, if it got that far.
    pub fn shader(&self) -> Option<&str> {
        match self {
            ReflectError::Storage { .. } => None,
            ReflectError::MalformedBytecode { shader, .. }
            | ReflectError::EmptyDescriptorSet { shader, .. }
            | ReflectError::UnsupportedEnumValue { shader, .. }
            | ReflectError::ConflictingBindingDeclaration { shader, .. } => Some(shader),
        }
    }
}
