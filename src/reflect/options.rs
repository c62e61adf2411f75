#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ReflectOptions {
    /// Keep built-in vertex inputs (`gl_VertexIndex`, ...) as attributes.
    pub include_builtin_inputs: bool,
    /// Extract stages concurrently before the ordered merge.
    pub parallel_extraction: bool,
}

impl ReflectOptions {
    pub fn include_builtin_inputs(mut self, include: bool) -> Self {
        self.include_builtin_inputs = include;
        self
    }

    pub fn parallel_extraction(mut self, parallel: bool) -> Self {
        self.parallel_extraction = parallel;
        self
    }
}
