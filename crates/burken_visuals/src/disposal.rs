//! Disposal — освобождение GPU ресурсов визуала
//!
//! Обходит весь sub-graph: каждый узел с мешем отдаёт geometry buffer и все
//! материалы (single или multi slot). Ресурсы забираются через `take()`, так
//! что повторный вызов ничего не освобождает.

use crate::render::GpuResources;
use crate::visual::{MaterialSlot, MeshData, VisualObject};

/// Сколько ресурсов реально освобождено этим вызовом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisposalReport {
    pub geometries: usize,
    pub materials: usize,
}

impl DisposalReport {
    pub fn is_empty(&self) -> bool {
        self.geometries == 0 && self.materials == 0
    }
}

pub fn dispose_visual<G: GpuResources + ?Sized>(
    visual: Option<&mut VisualObject>,
    gpu: &mut G,
) -> DisposalReport {
    let mut report = DisposalReport::default();
    let Some(visual) = visual else {
        return report;
    };

    visual.for_each_mesh_mut(&mut |mesh| release_mesh(mesh, gpu, &mut report));
    report
}

fn release_mesh<G: GpuResources + ?Sized>(mesh: &mut MeshData, gpu: &mut G, report: &mut DisposalReport) {
    if let Some(geometry) = mesh.geometry.take() {
        if gpu.release_geometry(geometry.id) {
            report.geometries += 1;
        }
    }

    let materials = match mesh.material.take() {
        Some(MaterialSlot::Single(material)) => vec![material],
        Some(MaterialSlot::Multi(materials)) => materials,
        None => Vec::new(),
    };
    for material in materials {
        if gpu.release_material(material.id) {
            report.materials += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::render::{GeometryDesc, MaterialDesc, ResourceLedger};
    use crate::visual::{Geometry, Material};

    fn unit_box() -> GeometryDesc {
        GeometryDesc::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    fn lambert(gpu: &mut ResourceLedger) -> Material {
        Material::allocate(gpu, MaterialDesc::lambert(Rgb(0x4a90e2), 0.95))
    }

    #[test]
    fn test_releases_nested_meshes() {
        let mut gpu = ResourceLedger::new();
        let mut root = VisualObject::group("gubbe");
        for name in ["torso", "head", "leftArm"] {
            let geometry = Geometry::allocate(&mut gpu, unit_box());
            let material = lambert(&mut gpu);
            root.add_child(VisualObject::mesh(name, MeshData::new(geometry, material)));
        }

        let report = dispose_visual(Some(&mut root), &mut gpu);

        assert_eq!(report, DisposalReport { geometries: 3, materials: 3 });
        assert_eq!(gpu.live_geometries(), 0);
        assert_eq!(gpu.live_materials(), 0);
    }

    #[test]
    fn test_releases_every_material_in_multi_slot() {
        let mut gpu = ResourceLedger::new();
        let geometry = Geometry::allocate(&mut gpu, unit_box());
        let materials = vec![lambert(&mut gpu), lambert(&mut gpu), lambert(&mut gpu)];
        let mut visual = VisualObject::mesh(
            "multi",
            MeshData {
                geometry: Some(geometry),
                material: Some(MaterialSlot::Multi(materials)),
                cast_shadow: true,
                receive_shadow: false,
            },
        );

        let report = dispose_visual(Some(&mut visual), &mut gpu);

        assert_eq!(report.materials, 3);
        assert_eq!(gpu.live_materials(), 0);
    }

    #[test]
    fn test_second_dispose_is_noop() {
        let mut gpu = ResourceLedger::new();
        let geometry = Geometry::allocate(&mut gpu, unit_box());
        let material = lambert(&mut gpu);
        let mut visual = VisualObject::mesh("box", MeshData::new(geometry, material));

        let first = dispose_visual(Some(&mut visual), &mut gpu);
        let second = dispose_visual(Some(&mut visual), &mut gpu);

        assert_eq!(first, DisposalReport { geometries: 1, materials: 1 });
        assert!(second.is_empty());
        assert_eq!(gpu.released_geometries(), 1);
        assert_eq!(gpu.released_materials(), 1);
    }

    #[test]
    fn test_tolerates_missing_resources() {
        let mut gpu = ResourceLedger::new();

        assert!(dispose_visual(None, &mut gpu).is_empty());

        let mut group = VisualObject::group("empty");
        assert!(dispose_visual(Some(&mut group), &mut gpu).is_empty());

        let mut bare = VisualObject::mesh(
            "bare",
            MeshData {
                geometry: None,
                material: None,
                cast_shadow: false,
                receive_shadow: false,
            },
        );
        assert!(dispose_visual(Some(&mut bare), &mut gpu).is_empty());
    }
}
