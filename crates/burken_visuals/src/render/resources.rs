//! GPU ресурсы: дескрипторы, id и учёт живых аллокаций

use bevy::prelude::Vec3;
use std::collections::HashSet;

use crate::color::Rgb;

/// GPU geometry buffer id (аналог RID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u64);

/// GPU material id (аналог RID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u64);

/// Что загружается в geometry buffer
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDesc {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Пары индексов = отрезки
    LineSegments {
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
    },
    /// Последовательная ломаная
    LineStrip {
        vertices: Vec<Vec3>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Освещаемый материал (есть emissive канал)
    Lambert,
    /// Unlit линии (debug overlays), emissive нет
    LineBasic,
}

impl MaterialKind {
    pub fn supports_emissive(self) -> bool {
        matches!(self, MaterialKind::Lambert)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub kind: MaterialKind,
    pub color: Rgb,
    pub opacity: f32,
    pub emissive_intensity: f32,
}

impl MaterialDesc {
    pub fn lambert(color: Rgb, opacity: f32) -> Self {
        Self {
            kind: MaterialKind::Lambert,
            color,
            opacity,
            emissive_intensity: 1.0,
        }
    }

    pub fn line(color: Rgb, opacity: f32) -> Self {
        Self {
            kind: MaterialKind::LineBasic,
            color,
            opacity,
            emissive_intensity: 0.0,
        }
    }

    pub fn with_emissive_intensity(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    /// Прозрачность включается только когда opacity < 1
    pub fn transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// GPU resource allocator (renderer side)
///
/// `release_*` возвращает `false` для уже освобождённого/неизвестного id —
/// повторное освобождение не ошибка.
pub trait GpuResources {
    fn allocate_geometry(&mut self, desc: &GeometryDesc) -> GeometryId;
    fn allocate_material(&mut self, desc: &MaterialDesc) -> MaterialId;
    fn release_geometry(&mut self, id: GeometryId) -> bool;
    fn release_material(&mut self, id: MaterialId) -> bool;
}

/// Учёт живых GPU аллокаций
///
/// Утечка = live_* растёт при join/leave churn.
#[derive(Debug, Default)]
pub struct ResourceLedger {
    next_id: u64,
    live_geometries: HashSet<GeometryId>,
    live_materials: HashSet<MaterialId>,
    released_geometries: usize,
    released_materials: usize,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn live_geometries(&self) -> usize {
        self.live_geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.live_materials.len()
    }

    pub fn released_geometries(&self) -> usize {
        self.released_geometries
    }

    pub fn released_materials(&self) -> usize {
        self.released_materials
    }

    pub fn is_geometry_live(&self, id: GeometryId) -> bool {
        self.live_geometries.contains(&id)
    }

    pub fn is_material_live(&self, id: MaterialId) -> bool {
        self.live_materials.contains(&id)
    }
}

impl GpuResources for ResourceLedger {
    fn allocate_geometry(&mut self, _desc: &GeometryDesc) -> GeometryId {
        let id = GeometryId(self.next());
        self.live_geometries.insert(id);
        id
    }

    fn allocate_material(&mut self, _desc: &MaterialDesc) -> MaterialId {
        let id = MaterialId(self.next());
        self.live_materials.insert(id);
        id
    }

    fn release_geometry(&mut self, id: GeometryId) -> bool {
        let released = self.live_geometries.remove(&id);
        if released {
            self.released_geometries += 1;
        }
        released
    }

    fn release_material(&mut self, id: MaterialId) -> bool {
        let released = self.live_materials.remove(&id);
        if released {
            self.released_materials += 1;
        }
        released
    }
}
