use std::collections::BTreeMap;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

/// Fallback vertex stage used when a configuration names no shader files.
pub const DEFAULT_VERTEX_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) world_pos: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let world_pos = object.model * vec4<f32>(input.position, 1.0);
    output.position = globals.view_proj * world_pos;
    output.normal = normalize((object.normal * vec4<f32>(input.normal, 0.0)).xyz);
    output.uv = input.uv;
    output.world_pos = world_pos.xyz;
    return output;
}
"#;

/// Fallback fragment stage paired with [`DEFAULT_VERTEX_SHADER`].
pub const DEFAULT_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(diffuse, diffuse_sampler, input.uv);
    let rough = textureSample(roughness, roughness_sampler, input.uv).r;
    let normal = perturb_normal(input.normal, normalmap, input.uv);
    return shade_point_lights(base.rgb, rough, normal, input.world_pos);
}
"#;

/// Opaque handle to a texture image owned by the caller.
///
/// The crate never inspects texture contents; handles only travel into
/// uniform mappings and come back out unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// The three texture maps a lit PBR material samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSet {
    pub diffuse: TextureHandle,
    pub roughness: TextureHandle,
    pub normalmap: TextureHandle,
}

/// Typed value of a single shader uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    /// Declared but not yet assigned.
    Empty,
    Float(f32),
    Color(Vec3),
    Vec3Array(Vec<Vec3>),
    FloatArray(Vec<f32>),
    /// Texture-typed uniform; `None` until a handle is bound.
    Texture(Option<TextureHandle>),
}

/// Named, ordered uniform mapping handed to a shader material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Uniforms {
    entries: BTreeMap<String, UniformValue>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: UniformValue) {
        self.entries.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Combines uniform groups into one mapping. Later groups win on key
    /// collisions.
    ///
    /// Merging clones uniform *declarations*, not texture *bindings*: every
    /// texture-typed entry comes out of the merge unbound. Callers that need
    /// a bound texture must assign it per key after merging.
    pub fn merge(groups: &[Uniforms]) -> Uniforms {
        let mut merged = Uniforms::new();
        for group in groups {
            for (name, value) in &group.entries {
                let cloned = match value {
                    UniformValue::Texture(_) => UniformValue::Texture(None),
                    other => other.clone(),
                };
                merged.entries.insert(name.clone(), cloned);
            }
        }
        merged
    }
}

/// Standard uniform groups every lit shader is expected to declare.
pub mod uniform_groups {
    use super::{UniformValue, Uniforms};
    use glam::Vec3;

    /// Per-light arrays filled by the renderer from the active scene lights.
    pub fn lights() -> Uniforms {
        let mut uniforms = Uniforms::new();
        uniforms.set("pointLightPositions", UniformValue::Vec3Array(Vec::new()));
        uniforms.set("pointLightColors", UniformValue::Vec3Array(Vec::new()));
        uniforms.set("pointLightIntensities", UniformValue::FloatArray(Vec::new()));
        uniforms.set("pointLightDistances", UniformValue::FloatArray(Vec::new()));
        uniforms.set("pointLightDecays", UniformValue::FloatArray(Vec::new()));
        uniforms
    }

    /// Flat ambient term applied on top of the per-light contribution.
    pub fn ambient() -> Uniforms {
        let mut uniforms = Uniforms::new();
        uniforms.set("ambientLightColor", UniformValue::Color(Vec3::ONE));
        uniforms.set("ambientLightIntensity", UniformValue::Float(0.15));
        uniforms
    }
}

/// Shader program paired with its uniform inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderMaterial {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub uniforms: Uniforms,
    /// When set, the renderer feeds the standard light groups each frame.
    pub lights: bool,
}

/// Unlit single-color material, optionally translucent. Used for debug
/// overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Vec3,
    pub transparent: bool,
    pub opacity: f32,
}

impl BasicMaterial {
    pub fn solid(color: Vec3) -> Self {
        Self {
            color,
            transparent: false,
            opacity: 1.0,
        }
    }

    pub fn translucent(color: Vec3, opacity: f32) -> Self {
        Self {
            color,
            transparent: true,
            opacity,
        }
    }
}

/// Assembles one lit shader material from raw shader sources and a texture
/// bundle.
///
/// The uniform mapping starts from the standard lights and ambient groups so
/// the scene's lights can illuminate the custom shader, with the three
/// texture maps declared alongside. Because [`Uniforms::merge`] does not
/// carry texture bindings through, the handles are assigned per key after
/// the merge; that two-step order is load-bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBuilder {
    shader: ShaderMaterial,
}

impl MaterialBuilder {
    /// Builds the material. Shader sources are taken as-is: syntax problems
    /// surface at shader compilation in the renderer, not here.
    pub fn build(vertex_shader: &str, fragment_shader: &str, textures: &TextureSet) -> Self {
        let mut placeholders = Uniforms::new();
        placeholders.set("diffuse", UniformValue::Empty);
        placeholders.set("roughness", UniformValue::Empty);
        placeholders.set("normalmap", UniformValue::Empty);

        let mut uniforms = Uniforms::merge(&[
            uniform_groups::lights(),
            uniform_groups::ambient(),
            placeholders,
        ]);
        uniforms.set("diffuse", UniformValue::Texture(Some(textures.diffuse)));
        uniforms.set("roughness", UniformValue::Texture(Some(textures.roughness)));
        uniforms.set("normalmap", UniformValue::Texture(Some(textures.normalmap)));

        debug!("built lit shader material with {} uniforms", uniforms.len());
        Self {
            shader: ShaderMaterial {
                vertex_shader: vertex_shader.to_string(),
                fragment_shader: fragment_shader.to_string(),
                uniforms,
                lights: true,
            },
        }
    }

    /// Returns the constructed material; the same instance on every call.
    pub fn shader(&self) -> &ShaderMaterial {
        &self.shader
    }

    pub fn into_shader(self) -> ShaderMaterial {
        self.shader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_textures() -> TextureSet {
        TextureSet {
            diffuse: TextureHandle::new(10),
            roughness: TextureHandle::new(20),
            normalmap: TextureHandle::new(30),
        }
    }

    #[test]
    fn merge_later_groups_win() {
        let mut first = Uniforms::new();
        first.set("ambientLightIntensity", UniformValue::Float(0.1));
        let mut second = Uniforms::new();
        second.set("ambientLightIntensity", UniformValue::Float(0.9));
        let merged = Uniforms::merge(&[first, second]);
        assert_eq!(
            merged.get("ambientLightIntensity"),
            Some(&UniformValue::Float(0.9))
        );
    }

    #[test]
    fn merge_drops_texture_bindings() {
        let mut bound = Uniforms::new();
        bound.set(
            "diffuse",
            UniformValue::Texture(Some(TextureHandle::new(7))),
        );
        let merged = Uniforms::merge(&[bound]);
        assert_eq!(merged.get("diffuse"), Some(&UniformValue::Texture(None)));
    }

    #[test]
    fn builder_declares_exactly_the_expected_uniforms() {
        let material = MaterialBuilder::build("vs", "fs", &sample_textures());
        let lights = uniform_groups::lights();
        let ambient = uniform_groups::ambient();
        let mut expected: Vec<String> = lights
            .names()
            .chain(ambient.names())
            .chain(["diffuse", "roughness", "normalmap"])
            .map(str::to_string)
            .collect();
        expected.sort_unstable();
        let mut actual: Vec<String> = material
            .shader()
            .uniforms
            .names()
            .map(str::to_string)
            .collect();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn builder_binds_the_input_handles() {
        let textures = sample_textures();
        let material = MaterialBuilder::build("vs", "fs", &textures);
        let uniforms = &material.shader().uniforms;
        assert_eq!(
            uniforms.get("diffuse"),
            Some(&UniformValue::Texture(Some(textures.diffuse)))
        );
        assert_eq!(
            uniforms.get("roughness"),
            Some(&UniformValue::Texture(Some(textures.roughness)))
        );
        assert_eq!(
            uniforms.get("normalmap"),
            Some(&UniformValue::Texture(Some(textures.normalmap)))
        );
    }

    #[test]
    fn builder_enables_scene_lighting() {
        let material = MaterialBuilder::build("vs", "fs", &sample_textures());
        assert!(material.shader().lights);
        assert_eq!(material.shader().vertex_shader, "vs");
        assert_eq!(material.shader().fragment_shader, "fs");
    }

    #[test]
    fn shader_accessor_returns_the_same_instance() {
        let material = MaterialBuilder::build("vs", "fs", &sample_textures());
        let a = material.shader() as *const ShaderMaterial;
        let b = material.shader() as *const ShaderMaterial;
        assert_eq!(a, b);
    }

    #[test]
    fn standard_groups_do_not_collide_with_texture_keys() {
        let standard = Uniforms::merge(&[uniform_groups::lights(), uniform_groups::ambient()]);
        for key in ["diffuse", "roughness", "normalmap"] {
            assert!(!standard.contains(key));
        }
    }
}
