//! Placement — world position для визуала

use bevy::prelude::Vec3;
use serde::{Deserialize, Serialize};

use crate::visual::VisualObject;

/// Позиция с необязательными компонентами (отсутствующие = 0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnPoint {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
}

impl SpawnPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0), self.z.unwrap_or(0.0))
    }
}

impl From<Vec3> for SpawnPoint {
    fn from(position: Vec3) -> Self {
        Self::new(position.x, position.y, position.z)
    }
}

/// Поставить визуал в позицию. Нет визуала или позиции — no-op.
pub fn place_visual(visual: Option<&mut VisualObject>, position: Option<SpawnPoint>) {
    let (Some(visual), Some(position)) = (visual, position) else {
        return;
    };
    visual.position = position.to_vec3();
}
