use glam::Vec3;
use log::{info, warn};

use crate::geometry::SphereGeometry;
use crate::light::{color_from_hex, PointLight};
use crate::material::BasicMaterial;
use crate::node::{Mesh, NodeId, NodeKind, SceneNode};

/// Tessellation used when the caller does not pick one.
pub const DEFAULT_TESSELLATION: u32 = 4;

const REFERENCE_MESH_COLOR: u32 = 0x298ec1;
const REFERENCE_MESH_OPACITY: f32 = 0.3;
const MARKER_COLOR: u32 = 0xc61976;
const MARKER_RADIUS: f32 = 0.05;
const MARKER_SEGMENTS: u32 = 16;

/// What `show_reference_geometry` does when a debug mesh is already attached.
///
/// With `Stack`, a second pivot is attached while the first stays in the
/// tree with nothing referencing it anymore; only callers that strictly pair
/// every show with a hide should opt into it. `Replace` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMeshPolicy {
    /// Detach the current debug mesh before attaching the new one.
    #[default]
    Replace,
    /// Attach another debug mesh on top of the existing one.
    Stack,
}

/// Group of point lights scattered evenly around an object's center.
///
/// The lights sit on the vertices of a reference sphere of the given radius,
/// one light per vertex, all sharing the same color, intensity, distance and
/// decay. The rig is one scene-graph unit: attach its node to a scene and
/// every light comes along; move the node and the whole arrangement moves.
///
/// The reference sphere itself is never rendered. For inspection,
/// [`show_reference_geometry`](Self::show_reference_geometry) attaches a
/// translucent copy of it plus a small marker sphere at each light position,
/// and [`hide_reference_geometry`](Self::hide_reference_geometry) removes
/// them again.
#[derive(Debug, Clone)]
pub struct StudioLightRig {
    node: SceneNode,
    reference_geometry: SphereGeometry,
    light_params: PointLight,
    debug_mesh: Option<NodeId>,
    debug_policy: DebugMeshPolicy,
}

impl StudioLightRig {
    /// Builds a rig with the default 4x4 reference sphere tessellation.
    pub fn new(radius: f32, color: Vec3, intensity: f32, distance: f32, decay: f32) -> Self {
        Self::with_tessellation(radius, color, intensity, distance, decay, DEFAULT_TESSELLATION)
    }

    /// Builds a rig whose reference sphere uses `n_of_points` segments in
    /// both angular directions. Inputs are not validated; a degenerate
    /// tessellation simply yields fewer lights.
    pub fn with_tessellation(
        radius: f32,
        color: Vec3,
        intensity: f32,
        distance: f32,
        decay: f32,
        n_of_points: u32,
    ) -> Self {
        let reference_geometry = SphereGeometry::new(radius, n_of_points, n_of_points);
        let light_params = PointLight::new(color, intensity, distance, decay);

        let mut node = SceneNode::group("studio-light-rig");
        for (index, vertex) in reference_geometry.vertices.iter().enumerate() {
            let mut light = SceneNode::light(&format!("studio-light-{index}"), light_params);
            light.position = *vertex;
            node.add_child(light);
        }
        info!(
            "studio rig: {} lights on a radius {} sphere",
            reference_geometry.vertex_count(),
            radius
        );

        Self {
            node,
            reference_geometry,
            light_params,
            debug_mesh: None,
            debug_policy: DebugMeshPolicy::default(),
        }
    }

    pub fn with_debug_mesh_policy(mut self, policy: DebugMeshPolicy) -> Self {
        self.debug_policy = policy;
        self
    }

    pub fn set_debug_mesh_policy(&mut self, policy: DebugMeshPolicy) {
        self.debug_policy = policy;
    }

    /// The rig as an attachable scene-graph node.
    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut SceneNode {
        &mut self.node
    }

    pub fn position(&self) -> Vec3 {
        self.node.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.node.position = position;
    }

    /// Sphere the light placement was sampled from.
    pub fn reference_geometry(&self) -> &SphereGeometry {
        &self.reference_geometry
    }

    /// Shared parameters every light in the rig was built with.
    pub fn light_params(&self) -> &PointLight {
        &self.light_params
    }

    /// Light child nodes, in placement order.
    pub fn lights(&self) -> impl Iterator<Item = &SceneNode> {
        self.node
            .children()
            .filter(|child| matches!(child.kind(), NodeKind::Light(_)))
    }

    pub fn light_count(&self) -> usize {
        self.lights().count()
    }

    pub fn child_count(&self) -> usize {
        self.node.child_count()
    }

    /// Whether a debug mesh is currently attached.
    pub fn reference_geometry_visible(&self) -> bool {
        self.debug_mesh.is_some()
    }

    /// Attaches a pivot holding a translucent copy of the reference sphere
    /// and one marker sphere per light position.
    ///
    /// When a debug mesh is already attached, the configured
    /// [`DebugMeshPolicy`] decides whether the old pivot is detached first.
    pub fn show_reference_geometry(&mut self) {
        if self.debug_mesh.is_some() {
            match self.debug_policy {
                DebugMeshPolicy::Replace => self.hide_reference_geometry(),
                DebugMeshPolicy::Stack => {
                    warn!("debug mesh already attached; stacking another one");
                }
            }
        }

        let mut pivot = SceneNode::group("reference-geometry");
        pivot.add_child(SceneNode::mesh(
            "reference-sphere",
            Mesh {
                geometry: self.reference_geometry.clone(),
                material: BasicMaterial::translucent(
                    color_from_hex(REFERENCE_MESH_COLOR),
                    REFERENCE_MESH_OPACITY,
                ),
            },
        ));
        for (index, vertex) in self.reference_geometry.vertices.iter().enumerate() {
            let mut marker = SceneNode::mesh(
                &format!("light-marker-{index}"),
                Mesh {
                    geometry: SphereGeometry::new(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS),
                    material: BasicMaterial::solid(color_from_hex(MARKER_COLOR)),
                },
            );
            marker.position = *vertex;
            pivot.add_child(marker);
        }

        self.debug_mesh = Some(self.node.add_child(pivot));
    }

    /// Detaches the debug mesh if one is attached; a no-op otherwise.
    pub fn hide_reference_geometry(&mut self) {
        if let Some(id) = self.debug_mesh.take() {
            self.node.remove_child(id);
        }
    }
}
