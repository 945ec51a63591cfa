use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::rig::{StudioLightRig, DEFAULT_TESSELLATION};

/// Studio description produced by the authoring side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    pub rig: RigConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialConfig>,
}

/// Light rig parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    #[serde(default)]
    pub distance: f32,
    #[serde(default = "default_decay")]
    pub decay: f32,
    #[serde(default = "default_points")]
    pub points: u32,
}

/// Shader files backing the lit material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub vertex: String,
    pub fragment: String,
}

fn default_color() -> Vec3 {
    Vec3::ONE
}

fn default_intensity() -> f32 {
    1.0
}

fn default_decay() -> f32 {
    2.0
}

fn default_points() -> u32 {
    DEFAULT_TESSELLATION
}

impl StudioConfig {
    /// Parses the `<studio>` XML produced by the authoring tools.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid studio XML")?;

        let rig_node = document
            .descendants()
            .find(|n| n.has_tag_name("rig"))
            .ok_or_else(|| anyhow!("<rig> element is missing"))?;
        let rig = RigConfig {
            radius: required_text(&rig_node, "radius")?
                .parse::<f32>()
                .context("invalid <radius>")?,
            color: parse_color(optional_text(&rig_node, "color"), default_color())
                .context("invalid <color>")?,
            intensity: parse_f32(optional_text(&rig_node, "intensity"), default_intensity())
                .context("invalid <intensity>")?,
            distance: parse_f32(optional_text(&rig_node, "distance"), 0.0)
                .context("invalid <distance>")?,
            decay: parse_f32(optional_text(&rig_node, "decay"), default_decay())
                .context("invalid <decay>")?,
            points: parse_u32(optional_text(&rig_node, "points"), default_points())
                .context("invalid <points>")?,
        };

        let material = document
            .descendants()
            .find(|n| n.has_tag_name("material"))
            .map(|node| {
                Ok::<_, anyhow::Error>(MaterialConfig {
                    vertex: required_text(&node, "vertex")?,
                    fragment: required_text(&node, "fragment")?,
                })
            })
            .transpose()?;

        Ok(Self { rig, material })
    }
}

impl RigConfig {
    /// Constructs the light rig described by this configuration.
    pub fn build(&self) -> StudioLightRig {
        StudioLightRig::with_tessellation(
            self.radius,
            self.color,
            self.intensity,
            self.distance,
            self.decay,
            self.points,
        )
    }
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_color(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut numbers = value
        .split_whitespace()
        .filter_map(|component| component.parse::<f32>().ok());
    let r = numbers
        .next()
        .ok_or_else(|| anyhow!("color is missing components"))?;
    let g = numbers
        .next()
        .ok_or_else(|| anyhow!("color is missing components"))?;
    let b = numbers
        .next()
        .ok_or_else(|| anyhow!("color is missing components"))?;
    Ok(Vec3::new(r / 255.0, g / 255.0, b / 255.0))
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    match value {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}

fn parse_u32(value: Option<String>, default: u32) -> Result<u32> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .map_err(|err| anyhow!("failed to parse integer: {err}")),
        None => Ok(default),
    }
}
