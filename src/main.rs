use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::info;

use studio_rig::{
    MaterialBuilder, NodeKind, StudioConfig, TextureHandle, TextureSet, DEFAULT_FRAGMENT_SHADER,
    DEFAULT_VERTEX_SHADER,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let xml = fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read {}", options.path.display()))?;
    let config = StudioConfig::from_xml(&xml).context("failed to parse studio XML")?;

    let mut rig = config.rig.build();
    println!(
        "Loaded studio rig with {} lights ({} vertices)",
        rig.light_count(),
        rig.reference_geometry().vertex_count()
    );
    for light in rig.lights() {
        println!(
            " - {} pos=({:.2}, {:.2}, {:.2})",
            light.name, light.position.x, light.position.y, light.position.z
        );
    }

    let (vertex, fragment) = load_shaders(&config, &options.path)?;
    // The binary has no GPU surface; the handles stand in for textures the
    // embedding application would have uploaded.
    let textures = TextureSet {
        diffuse: TextureHandle::new(1),
        roughness: TextureHandle::new(2),
        normalmap: TextureHandle::new(3),
    };
    let material = MaterialBuilder::build(&vertex, &fragment, &textures);
    let names: Vec<&str> = material.shader().uniforms.names().collect();
    println!("Material uniforms: {}", names.join(", "));

    if options.show_debug {
        println!("Children before show: {}", rig.child_count());
        rig.show_reference_geometry();
        println!("Children after show: {}", rig.child_count());
        if let Some(pivot) = rig
            .node()
            .children()
            .find(|child| matches!(child.kind(), NodeKind::Group))
        {
            println!("Debug pivot holds {} meshes", pivot.child_count());
        }
        rig.hide_reference_geometry();
        println!("Children after hide: {}", rig.child_count());
    }

    Ok(())
}

fn load_shaders(config: &StudioConfig, config_path: &Path) -> Result<(String, String)> {
    let Some(material) = &config.material else {
        info!("no material section; using the embedded default shaders");
        return Ok((
            DEFAULT_VERTEX_SHADER.to_string(),
            DEFAULT_FRAGMENT_SHADER.to_string(),
        ));
    };
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let vertex = fs::read_to_string(base.join(&material.vertex))
        .with_context(|| format!("failed to read vertex shader {}", material.vertex))?;
    let fragment = fs::read_to_string(base.join(&material.fragment))
        .with_context(|| format!("failed to read fragment shader {}", material.fragment))?;
    Ok((vertex, fragment))
}

struct CliOptions {
    path: PathBuf,
    show_debug: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!("Usage: studio-rig <studio.xml> [--show-debug]"));
        };
        let mut show_debug = false;
        for arg in args {
            match arg.as_str() {
                "--show-debug" => show_debug = true,
                other => {
                    return Err(anyhow!("Unknown argument: {other}. Expected --show-debug"));
                }
            }
        }
        Ok(Self {
            path: PathBuf::from(path),
            show_debug,
        })
    }
}
