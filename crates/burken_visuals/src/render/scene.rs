//! Scene graph collaborator: сцена владеет объектами, остальные держат handle

use burken_simulation::VisualHandle;
use std::collections::BTreeMap;

use super::resources::{GeometryDesc, GeometryId, GpuResources, MaterialDesc, MaterialId, ResourceLedger};
use crate::visual::VisualObject;

/// Render scene: add/remove объектов по identity
pub trait SceneGraph {
    fn add(&mut self, object: VisualObject) -> VisualHandle;

    /// Detach: объект возвращается вызывающему (для disposal)
    fn remove(&mut self, handle: VisualHandle) -> Option<VisualObject>;

    fn get(&self, handle: VisualHandle) -> Option<&VisualObject>;

    fn get_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualObject>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Корень сцены — плоский набор top-level объектов
#[derive(Debug, Default)]
pub struct SceneRoot {
    next_handle: u64,
    objects: BTreeMap<VisualHandle, VisualObject>,
}

impl SceneRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(&self) -> impl Iterator<Item = VisualHandle> + '_ {
        self.objects.keys().copied()
    }
}

impl SceneGraph for SceneRoot {
    fn add(&mut self, object: VisualObject) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.objects.insert(handle, object);
        handle
    }

    fn remove(&mut self, handle: VisualHandle) -> Option<VisualObject> {
        self.objects.remove(&handle)
    }

    fn get(&self, handle: VisualHandle) -> Option<&VisualObject> {
        self.objects.get(&handle)
    }

    fn get_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualObject> {
        self.objects.get_mut(&handle)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}

/// Headless renderer: сцена + учёт GPU ресурсов, без реального GPU
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub scene: SceneRoot,
    pub resources: ResourceLedger,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneGraph for HeadlessRenderer {
    fn add(&mut self, object: VisualObject) -> VisualHandle {
        self.scene.add(object)
    }

    fn remove(&mut self, handle: VisualHandle) -> Option<VisualObject> {
        self.scene.remove(handle)
    }

    fn get(&self, handle: VisualHandle) -> Option<&VisualObject> {
        self.scene.get(handle)
    }

    fn get_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualObject> {
        self.scene.get_mut(handle)
    }

    fn len(&self) -> usize {
        self.scene.len()
    }
}

impl GpuResources for HeadlessRenderer {
    fn allocate_geometry(&mut self, desc: &GeometryDesc) -> GeometryId {
        self.resources.allocate_geometry(desc)
    }

    fn allocate_material(&mut self, desc: &MaterialDesc) -> MaterialId {
        self.resources.allocate_material(desc)
    }

    fn release_geometry(&mut self, id: GeometryId) -> bool {
        self.resources.release_geometry(id)
    }

    fn release_material(&mut self, id: MaterialId) -> bool {
        self.resources.release_material(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_add_remove() {
        let mut scene = SceneRoot::new();
        assert!(scene.is_empty());

        let a = scene.add(VisualObject::group("a"));
        let b = scene.add(VisualObject::group("b"));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        let removed = scene.remove(a).map(|object| object.name);
        assert_eq!(removed.as_deref(), Some("a"));
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.handles().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_handles_not_reused() {
        let mut scene = SceneRoot::new();
        let first = scene.add(VisualObject::group("p1"));
        scene.remove(first);
        let second = scene.add(VisualObject::group("p1"));
        assert_ne!(first, second);
    }
}
