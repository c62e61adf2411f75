use anyhow::{Context, Result};
use clap::Parser;
use pipeline_reflect::{PipelineReflector, ReflectOptions, VertexInputLayout};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pipeline-reflect",
    version,
    about = "Print the merged descriptor sets and push constants of a shader pipeline"
)]
struct Cli {
    /// Directory relative shader paths are resolved against
    #[arg(long)]
    root: Option<PathBuf>,
    /// Keep built-in vertex inputs as attributes
    #[arg(long)]
    builtins: bool,
    /// Reflect the shaders concurrently
    #[arg(long)]
    parallel: bool,
    /// Compiled SPIR-V shaders, one per pipeline stage
    #[arg(required = true)]
    shaders: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = ReflectOptions::default()
        .include_builtin_inputs(cli.builtins)
        .parallel_extraction(cli.parallel);
    let reflector = PipelineReflector::spirv(cli.root).with_options(options);

    let pipeline = reflector
        .reflect_pipeline(cli.shaders.as_slice())
        .context("failed to reflect pipeline")?;
    print!("{pipeline}");

    if let Some(vertex) = pipeline.vertex_stage() {
        let layout = VertexInputLayout::interleaved(vertex, 0)?;
        println!("\t-[Vertex Input | Stride: {}]", layout.binding.stride);
        for attribute in &layout.attributes {
            println!(
                "\t\t-[Location #{} | {:?} | Offset: {}]",
                attribute.location, attribute.format, attribute.offset
            );
        }
    }

    Ok(())
}
