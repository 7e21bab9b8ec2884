//! Rich builder — композитный "gubbe" персонаж (торс, голова, руки, ноги, пояс)
//!
//! Оттенки конечностей/головы/акцента выводятся из base color через HSL,
//! если не заданы явно. Каждая часть получает свой geometry buffer и свой
//! материал — disposal освобождает их независимо.

use bevy::prelude::Vec3;

use crate::color::Rgb;
use crate::render::{GeometryDesc, GpuResources, MaterialDesc};
use crate::visual::{Geometry, Material, MeshData, PartPose, VisualObject, TORSO_PART};

use super::{CharacterVisualConfig, VisualStrategy};

/// Что внешний builder получает от фабрики
#[derive(Debug, Clone, PartialEq)]
pub struct RichBuildRequest {
    pub base_color: Rgb,
    pub accent_color: Option<Rgb>,
    pub opacity: f32,
    pub name: String,
}

/// Внешний builder композитных персонажей
///
/// Контракт: вернуть визуал с `metadata.parts` (ключ "torso" по соглашению)
/// и `metadata.default_pose`; фабрика доверяет им как есть.
pub trait RichMeshBuilder: Send + Sync {
    fn create_character_mesh(&self, request: &RichBuildRequest, gpu: &mut dyn GpuResources) -> VisualObject;
}

/// Strategy-адаптер: CharacterVisualConfig → RichBuildRequest
pub struct RichBuilderStrategy {
    builder: Box<dyn RichMeshBuilder>,
}

impl RichBuilderStrategy {
    pub fn new(builder: Box<dyn RichMeshBuilder>) -> Self {
        Self { builder }
    }
}

impl VisualStrategy for RichBuilderStrategy {
    fn build(&self, config: &CharacterVisualConfig, name: &str, gpu: &mut dyn GpuResources) -> VisualObject {
        let request = RichBuildRequest {
            base_color: config.color,
            accent_color: config.accent_color,
            opacity: config.opacity,
            name: name.to_string(),
        };
        self.builder.create_character_mesh(&request, gpu)
    }

    fn label(&self) -> &'static str {
        "rich"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Base,
    Limb,
    Head,
    Accent,
}

/// (имя части, размер w×h×d, позиция, оттенок, запоминать ли позу)
struct PartSpec {
    name: &'static str,
    size: [f32; 3],
    position: [f32; 3],
    tone: Tone,
    posed: bool,
}

const TORSO_WIDTH: f32 = 0.55;
const ARM_OFFSET_X: f32 = TORSO_WIDTH / 2.0 + 0.09;
const LEG_OFFSET_X: f32 = 0.12;

const GUBBE_PARTS: [PartSpec; 7] = [
    PartSpec { name: TORSO_PART, size: [TORSO_WIDTH, 0.35, 0.3], position: [0.0, 0.125, 0.0], tone: Tone::Base, posed: false },
    PartSpec { name: "head", size: [0.28, 0.2, 0.28], position: [0.0, 0.45, 0.0], tone: Tone::Head, posed: false },
    PartSpec { name: "leftArm", size: [0.16, 0.3, 0.16], position: [-ARM_OFFSET_X, 0.1, 0.0], tone: Tone::Limb, posed: true },
    PartSpec { name: "rightArm", size: [0.16, 0.3, 0.16], position: [ARM_OFFSET_X, 0.1, 0.0], tone: Tone::Limb, posed: true },
    PartSpec { name: "leftLeg", size: [0.18, 0.45, 0.22], position: [-LEG_OFFSET_X, -0.275, 0.0], tone: Tone::Limb, posed: true },
    PartSpec { name: "rightLeg", size: [0.18, 0.45, 0.22], position: [LEG_OFFSET_X, -0.275, 0.0], tone: Tone::Limb, posed: true },
    PartSpec { name: "belt", size: [0.57, 0.08, 0.32], position: [0.0, -0.02, 0.0], tone: Tone::Accent, posed: false },
];

/// Builder "gubbe" персонажей
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GubbeBuilder {
    pub limb_color: Option<Rgb>,
    pub head_color: Option<Rgb>,
}

impl GubbeBuilder {
    pub const EMISSIVE_INTENSITY: f32 = 0.2;

    fn tone_color(&self, tone: Tone, request: &RichBuildRequest) -> Rgb {
        let base = request.base_color;
        match tone {
            Tone::Base => base,
            Tone::Limb => self.limb_color.unwrap_or_else(|| base.offset_hsl(0.0, -0.1, -0.05)),
            Tone::Head => self.head_color.unwrap_or_else(|| base.offset_hsl(0.0, -0.1, 0.08)),
            Tone::Accent => request.accent_color.unwrap_or_else(|| base.offset_hsl(0.0, 0.0, 0.12)),
        }
    }
}

impl RichMeshBuilder for GubbeBuilder {
    fn create_character_mesh(&self, request: &RichBuildRequest, gpu: &mut dyn GpuResources) -> VisualObject {
        let mut group = VisualObject::group(request.name.clone());

        for spec in &GUBBE_PARTS {
            let [width, height, depth] = spec.size;
            let position = Vec3::from_array(spec.position);

            let geometry = Geometry::allocate(gpu, GeometryDesc::Box { width, height, depth });
            let material = Material::allocate(
                gpu,
                MaterialDesc::lambert(self.tone_color(spec.tone, request), request.opacity)
                    .with_emissive_intensity(Self::EMISSIVE_INTENSITY),
            );

            let part = VisualObject::mesh(spec.name, MeshData::new(geometry, material)).with_position(position);
            let index = group.add_child(part);

            group.metadata.parts.insert(spec.name.to_string(), index);
            if spec.posed {
                group.metadata.default_pose.insert(
                    spec.name.to_string(),
                    PartPose {
                        position,
                        rotation: Vec3::ZERO,
                    },
                );
            }
        }

        group.metadata.visual_type = Some("gubbe".to_string());
        group
    }
}
