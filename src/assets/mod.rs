mod shaders;

pub use shaders::{EmbeddedShaders, FsShaders, ShaderSource};
