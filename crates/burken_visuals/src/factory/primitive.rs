//! Primitive fallback — один box-меш на персонажа

use crate::render::{GeometryDesc, GpuResources, MaterialDesc};
use crate::visual::{CharacterType, Geometry, Material, MeshData, VisualObject};

use super::{CharacterVisualConfig, VisualStrategy};

/// Размеры box'а (ширина, высота, глубина)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }
}

/// Box fallback: hunter чуть крупнее игрока
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveFallback {
    pub player_size: BoxSize,
    pub hunter_size: BoxSize,
}

impl Default for PrimitiveFallback {
    fn default() -> Self {
        Self {
            player_size: BoxSize::new(0.8, 1.0, 0.8),
            hunter_size: BoxSize::new(0.9, 1.1, 0.9),
        }
    }
}

impl VisualStrategy for PrimitiveFallback {
    fn build(&self, config: &CharacterVisualConfig, name: &str, gpu: &mut dyn GpuResources) -> VisualObject {
        let size = match config.character_type {
            CharacterType::Player => self.player_size,
            CharacterType::Hunter => self.hunter_size,
        };

        let geometry = Geometry::allocate(
            gpu,
            GeometryDesc::Box {
                width: size.width,
                height: size.height,
                depth: size.depth,
            },
        );
        let material = Material::allocate(gpu, MaterialDesc::lambert(config.color, config.opacity));

        let mut mesh = MeshData::new(geometry, material);
        mesh.cast_shadow = true;
        mesh.receive_shadow = false;

        // parts / default_pose остаются пустыми (Default)
        VisualObject::mesh(name, mesh)
    }

    fn label(&self) -> &'static str {
        "primitive"
    }
}
