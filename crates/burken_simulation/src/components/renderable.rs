//! Связь logical entity → визуальный объект в сцене

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Идентичность визуального объекта, прикреплённого к сцене
///
/// Сцена владеет самим объектом; ECS и менеджеры держат только handle
/// (как InstanceId у движковых нод).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub struct VisualHandle(pub u64);

/// Renderable wrapper — визуал, прикреплённый к logical entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Renderable {
    pub visual: VisualHandle,
}

impl Renderable {
    pub fn new(visual: VisualHandle) -> Self {
        Self { visual }
    }
}
