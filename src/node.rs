use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::SphereGeometry;
use crate::light::PointLight;
use crate::material::BasicMaterial;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

fn fresh_id() -> NodeId {
    NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Renderable payload of a node: geometry paired with an unlit material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: SphereGeometry,
    pub material: BasicMaterial,
}

/// What a node contributes to the scene beyond its transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Pure transform grouping children.
    Group,
    Light(PointLight),
    Mesh(Mesh),
}

/// Node in a hierarchical transform tree.
///
/// Children are owned by value and kept in insertion order; a child's
/// transform composes with its parent's. There is no rendering here — the
/// tree exists so that composite objects (a light rig, a debug overlay) can
/// be attached, moved and detached as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    id: NodeId,
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    kind: NodeKind,
    children: Vec<SceneNode>,
}

impl SceneNode {
    fn with_kind(name: &str, kind: NodeKind) -> Self {
        Self {
            id: fresh_id(),
            name: name.to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            kind,
            children: Vec::new(),
        }
    }

    /// Creates an empty transform node.
    pub fn group(name: &str) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// Creates a node carrying a point light.
    pub fn light(name: &str, light: PointLight) -> Self {
        Self::with_kind(name, NodeKind::Light(light))
    }

    /// Creates a node carrying a mesh.
    pub fn mesh(name: &str, mesh: Mesh) -> Self {
        Self::with_kind(name, NodeKind::Mesh(mesh))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Attaches a child and returns its id for later lookup or removal.
    pub fn add_child(&mut self, child: SceneNode) -> NodeId {
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Detaches the direct child with the given id, dropping its whole
    /// subtree. Returns `false` when no such child exists.
    pub fn remove_child(&mut self, id: NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| child.id != id);
        self.children.len() != before
    }

    pub fn child(&self, id: NodeId) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.id == id)
    }

    pub fn children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.iter()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
