//! Debug overlays для hunters: vision cone + hearing radius
//!
//! Линии без emissive канала; живут в сцене отдельными объектами рядом с
//! визуалом hunter'а и освобождаются вместе с ним.

use bevy::prelude::Vec3;
use burken_simulation::ParticipantId;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::render::{GeometryDesc, GpuResources, MaterialDesc};
use crate::visual::{CharacterType, Geometry, Material, MeshData, VisualObject};

const VISION_CONE_SEGMENTS: u32 = 8;
const HEARING_CIRCLE_SEGMENTS: u32 = 32;
/// Круг слуха чуть над землёй
const HEARING_CIRCLE_HEIGHT: f32 = 0.1;

const VISION_CONE_COLOR: Rgb = Rgb(0xffaa00);
const HEARING_CIRCLE_COLOR: Rgb = Rgb(0x00ff00);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOverlayConfig {
    /// Угол конуса в градусах
    pub vision_angle: f32,
    pub vision_range: f32,
    pub hearing_radius: f32,
}

impl Default for DebugOverlayConfig {
    fn default() -> Self {
        Self {
            vision_angle: 60.0,
            vision_range: 12.0,
            hearing_radius: 100.0,
        }
    }
}

/// Вершины веера: apex + (segments + 1) точек дуги в плоскости XZ
pub fn vision_cone_geometry(angle_degrees: f32, range: f32) -> GeometryDesc {
    let angle = angle_degrees.to_radians();

    let mut vertices = Vec::with_capacity(VISION_CONE_SEGMENTS as usize + 2);
    vertices.push(Vec3::ZERO);
    for i in 0..=VISION_CONE_SEGMENTS {
        let theta = -angle / 2.0 + angle * i as f32 / VISION_CONE_SEGMENTS as f32;
        vertices.push(Vec3::new(theta.sin() * range, 0.0, theta.cos() * range));
    }

    let mut indices = Vec::new();
    // Лучи от apex
    for i in 1..=VISION_CONE_SEGMENTS + 1 {
        indices.extend([0, i]);
    }
    // Дуга
    for i in 1..=VISION_CONE_SEGMENTS {
        indices.extend([i, i + 1]);
    }

    GeometryDesc::LineSegments { vertices, indices }
}

/// Замкнутая окружность (последняя точка совпадает с первой)
pub fn hearing_circle_geometry(radius: f32) -> GeometryDesc {
    let vertices = (0..=HEARING_CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / HEARING_CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            Vec3::new(theta.cos() * radius, HEARING_CIRCLE_HEIGHT, theta.sin() * radius)
        })
        .collect();

    GeometryDesc::LineStrip { vertices }
}

fn overlay_visual(
    gpu: &mut dyn GpuResources,
    hunter_id: &ParticipantId,
    kind: &str,
    geometry: GeometryDesc,
    color: Rgb,
    opacity: f32,
    position: Vec3,
) -> VisualObject {
    let geometry = Geometry::allocate(gpu, geometry);
    let material = Material::allocate(gpu, MaterialDesc::line(color, opacity));

    let mut visual = VisualObject::mesh(format!("{}_{}", kind, hunter_id), MeshData::new(geometry, material))
        .with_position(position);
    visual.metadata.character_type = CharacterType::Hunter;
    visual.metadata.hunter_id = Some(hunter_id.clone());
    visual.metadata.base_color = color;
    visual.metadata.visual_type = Some(kind.to_string());
    visual
}

pub fn build_vision_cone(
    gpu: &mut dyn GpuResources,
    hunter_id: &ParticipantId,
    config: &DebugOverlayConfig,
    position: Vec3,
) -> VisualObject {
    overlay_visual(
        gpu,
        hunter_id,
        "vision_cone",
        vision_cone_geometry(config.vision_angle, config.vision_range),
        VISION_CONE_COLOR,
        0.6,
        position,
    )
}

pub fn build_hearing_circle(
    gpu: &mut dyn GpuResources,
    hunter_id: &ParticipantId,
    config: &DebugOverlayConfig,
    position: Vec3,
) -> VisualObject {
    overlay_visual(
        gpu,
        hunter_id,
        "hearing_circle",
        hearing_circle_geometry(config.hearing_radius),
        HEARING_CIRCLE_COLOR,
        0.3,
        position,
    )
}
