//! Studio lighting rigs and lit shader materials for scene-graph tooling.
//!
//! The crate exposes two building blocks meant to be dropped into a larger
//! scene owned by the caller: [`MaterialBuilder`], which assembles one lit
//! shader material from raw shader sources and a texture bundle, and
//! [`StudioLightRig`], which scatters point lights over a reference sphere
//! around an object's center for even illumination. Rendering and platform
//! integration are intentionally kept outside of the crate so that the code
//! remains testable and easy to embed in headless tools.

pub mod config;
pub mod geometry;
pub mod light;
pub mod material;
pub mod node;
pub mod rig;

pub use config::{MaterialConfig, RigConfig, StudioConfig};
pub use geometry::SphereGeometry;
pub use light::{color_from_hex, PointLight};
pub use material::{
    uniform_groups, BasicMaterial, MaterialBuilder, ShaderMaterial, TextureHandle, TextureSet,
    UniformValue, Uniforms, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER,
};
pub use node::{Mesh, NodeId, NodeKind, SceneNode};
pub use rig::{DebugMeshPolicy, StudioLightRig, DEFAULT_TESSELLATION};
