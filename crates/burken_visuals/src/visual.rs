//! VisualObject — узел scene graph, представляющий персонажа
//!
//! Узел может нести меш (geometry + material slot) и детей. Композитный
//! персонаж = group без меша + дети-части; primitive fallback = один меш.

use bevy::prelude::Vec3;
use burken_simulation::ParticipantId;
use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::render::{GeometryDesc, GeometryId, GpuResources, MaterialDesc, MaterialId, MaterialKind};

/// Ключ части, которую подкрашивает local tint
pub const TORSO_PART: &str = "torso";

/// Geometry buffer, принадлежащий узлу
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub id: GeometryId,
    pub desc: GeometryDesc,
}

impl Geometry {
    pub fn allocate<G: GpuResources + ?Sized>(gpu: &mut G, desc: GeometryDesc) -> Self {
        let id = gpu.allocate_geometry(&desc);
        Self { id, desc }
    }
}

/// Материал узла (GPU id + редактируемые параметры)
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub kind: MaterialKind,
    pub color: Rgb,
    pub opacity: f32,
    pub transparent: bool,
    /// `None` — материал без emissive канала
    pub emissive: Option<Rgb>,
    pub emissive_intensity: f32,
}

impl Material {
    pub fn allocate<G: GpuResources + ?Sized>(gpu: &mut G, desc: MaterialDesc) -> Self {
        let id = gpu.allocate_material(&desc);
        Self {
            id,
            kind: desc.kind,
            color: desc.color,
            opacity: desc.opacity,
            transparent: desc.transparent(),
            emissive: desc.kind.supports_emissive().then_some(Rgb::BLACK),
            emissive_intensity: desc.emissive_intensity,
        }
    }

    pub fn is_emissive_capable(&self) -> bool {
        self.emissive.is_some()
    }

    /// `false` если emissive канала нет
    pub fn set_emissive(&mut self, color: Rgb) -> bool {
        match self.emissive.as_mut() {
            Some(emissive) => {
                *emissive = color;
                true
            }
            None => false,
        }
    }
}

/// Material slot: один материал или по материалу на geometry group
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSlot {
    Single(Material),
    Multi(Vec<Material>),
}

impl MaterialSlot {
    pub fn materials(&self) -> &[Material] {
        match self {
            MaterialSlot::Single(material) => std::slice::from_ref(material),
            MaterialSlot::Multi(materials) => materials,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub geometry: Option<Geometry>,
    pub material: Option<MaterialSlot>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshData {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry: Some(geometry),
            material: Some(MaterialSlot::Single(material)),
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterType {
    #[default]
    Player,
    Hunter,
}

/// Исходная поза части (для возврата конечностей после анимации)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Типизированные metadata визуала
///
/// `parts` и `default_pose` всегда есть (возможно пустые).
/// `parts`: имя части → индекс в `VisualObject::children`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualMetadata {
    pub participant_id: Option<ParticipantId>,
    pub character_type: CharacterType,
    pub base_color: Rgb,
    pub accent_color: Option<Rgb>,
    pub is_local_player: bool,
    pub hunter_id: Option<ParticipantId>,
    pub parts: BTreeMap<String, usize>,
    pub default_pose: BTreeMap<String, PartPose>,
    /// "gubbe", "vision_cone", ... (None для primitive box)
    pub visual_type: Option<String>,
}

/// Узел scene graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualObject {
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub mesh: Option<MeshData>,
    pub children: Vec<VisualObject>,
    pub metadata: VisualMetadata,
}

impl VisualObject {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Добавить ребёнка, вернуть его индекс
    pub fn add_child(&mut self, child: VisualObject) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn part(&self, name: &str) -> Option<&VisualObject> {
        let index = *self.metadata.parts.get(name)?;
        self.children.get(index)
    }

    pub fn part_mut(&mut self, name: &str) -> Option<&mut VisualObject> {
        let index = *self.metadata.parts.get(name)?;
        self.children.get_mut(index)
    }

    /// Единственный материал узла (multi-material slot не считается)
    pub fn material(&self) -> Option<&Material> {
        match self.mesh.as_ref()?.material.as_ref()? {
            MaterialSlot::Single(material) => Some(material),
            MaterialSlot::Multi(_) => None,
        }
    }

    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match self.mesh.as_mut()?.material.as_mut()? {
            MaterialSlot::Single(material) => Some(material),
            MaterialSlot::Multi(_) => None,
        }
    }

    /// Pre-order обход: сам узел, потом дети
    pub fn traverse(&self, visit: &mut impl FnMut(&VisualObject)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    pub fn traverse_mut(&mut self, visit: &mut impl FnMut(&mut VisualObject)) {
        visit(self);
        for child in &mut self.children {
            child.traverse_mut(visit);
        }
    }

    /// Обход только узлов с мешем
    pub fn for_each_mesh_mut(&mut self, visit: &mut impl FnMut(&mut MeshData)) {
        self.traverse_mut(&mut |node| {
            if let Some(mesh) = node.mesh.as_mut() {
                visit(mesh);
            }
        });
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }
}
