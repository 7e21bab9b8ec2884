//! Tests for CharacterVisualFactory (обе стратегии + общий postcondition).

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::render::{GeometryDesc, GpuResources, MaterialDesc, ResourceLedger};
    use crate::visual::{Geometry, Material, MeshData, TORSO_PART};

    /// Builder который намеренно выставляет "неправильные" shadow флаги
    struct SloppyBuilder;

    impl RichMeshBuilder for SloppyBuilder {
        fn create_character_mesh(&self, request: &RichBuildRequest, gpu: &mut dyn GpuResources) -> VisualObject {
            let mut group = VisualObject::group(request.name.clone());
            let mut nested = VisualObject::group("nested");
            for name in ["a", "b"] {
                let geometry = Geometry::allocate(
                    gpu,
                    GeometryDesc::Box {
                        width: 0.1,
                        height: 0.1,
                        depth: 0.1,
                    },
                );
                let material = Material::allocate(gpu, MaterialDesc::lambert(request.base_color, request.opacity));
                let mut mesh = MeshData::new(geometry, material);
                mesh.cast_shadow = false;
                mesh.receive_shadow = true;
                nested.add_child(VisualObject::mesh(name, mesh));
            }
            group.add_child(nested);
            group
        }
    }

    fn rich_factory(seed: u64) -> CharacterVisualFactory {
        CharacterVisualFactory::detect(Some(Box::new(GubbeBuilder::default())), seed)
    }

    fn primitive_factory(seed: u64) -> CharacterVisualFactory {
        CharacterVisualFactory::detect(None, seed)
    }

    #[test]
    fn test_detect_selects_strategy() {
        assert_eq!(rich_factory(1).strategy_label(), "rich");
        assert_eq!(primitive_factory(1).strategy_label(), "primitive");
    }

    #[test]
    fn test_primitive_fallback_shape() {
        let mut gpu = ResourceLedger::new();
        let mut factory = primitive_factory(1);
        let config = CharacterVisualConfig::new(Rgb(0x7ed321)).participant("p2".into());

        let visual = factory.build(&config, &mut gpu);

        let mesh = visual.mesh.as_ref().expect("primitive is a single mesh");
        assert!(mesh.cast_shadow);
        assert!(!mesh.receive_shadow);
        assert_eq!(
            mesh.geometry.as_ref().map(|g| g.desc.clone()),
            Some(GeometryDesc::Box {
                width: 0.8,
                height: 1.0,
                depth: 0.8
            })
        );

        let material = visual.material().expect("single material");
        assert_eq!(material.color, Rgb(0x7ed321));
        assert_eq!(material.opacity, 0.95);
        assert!(material.transparent);

        assert!(visual.metadata.parts.is_empty());
        assert!(visual.metadata.default_pose.is_empty());
        assert_eq!(visual.name, "character_p2");
    }

    #[test]
    fn test_hunter_box_is_larger() {
        let mut gpu = ResourceLedger::new();
        let mut factory = primitive_factory(1);
        let config = CharacterVisualConfig::new(Rgb(0xff4444))
            .character_type(CharacterType::Hunter)
            .opacity(1.0);

        let visual = factory.build(&config, &mut gpu);

        let geometry = visual.mesh.as_ref().and_then(|m| m.geometry.as_ref()).map(|g| g.desc.clone());
        assert_eq!(
            geometry,
            Some(GeometryDesc::Box {
                width: 0.9,
                height: 1.1,
                depth: 0.9
            })
        );
        assert!(visual.material().is_some_and(|m| !m.transparent));
    }

    #[test]
    fn test_metadata_postcondition_on_both_paths() {
        for mut factory in [rich_factory(3), primitive_factory(3)] {
            let mut gpu = ResourceLedger::new();
            let config = CharacterVisualConfig::new(Rgb(0xf5a623))
                .participant("h1".into())
                .accent(Rgb(0x111111))
                .character_type(CharacterType::Hunter);

            let visual = factory.build(&config, &mut gpu);

            assert_eq!(visual.metadata.participant_id, Some("h1".into()));
            assert_eq!(visual.metadata.character_type, CharacterType::Hunter);
            assert_eq!(visual.metadata.base_color, Rgb(0xf5a623));
            assert_eq!(visual.metadata.accent_color, Some(Rgb(0x111111)));
        }
    }

    #[test]
    fn test_rich_builder_parts_trusted() {
        let mut gpu = ResourceLedger::new();
        let mut factory = rich_factory(1);
        let config = CharacterVisualConfig::new(Rgb(0x4a90e2))
            .participant("p1".into())
            .name_prefix("player");

        let visual = factory.build(&config, &mut gpu);

        assert_eq!(visual.name, "player_p1");
        assert!(visual.part(TORSO_PART).is_some());
        assert_eq!(visual.metadata.default_pose.len(), 4);
    }

    #[test]
    fn test_shadow_flags_forced_on_nested_meshes() {
        let mut gpu = ResourceLedger::new();
        let mut factory = CharacterVisualFactory::detect(Some(Box::new(SloppyBuilder)), 1);

        let visual = factory.build(&CharacterVisualConfig::default(), &mut gpu);

        let mut meshes = 0;
        visual.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                meshes += 1;
                assert!(mesh.cast_shadow);
                assert!(!mesh.receive_shadow);
            }
        });
        assert_eq!(meshes, 2);
    }

    #[test]
    fn test_anonymous_names_are_seeded() {
        let mut gpu = ResourceLedger::new();
        let config = CharacterVisualConfig::default();

        let name_a = primitive_factory(42).build(&config, &mut gpu).name;
        let name_b = primitive_factory(42).build(&config, &mut gpu).name;

        assert_eq!(name_a, name_b);
        assert!(name_a.starts_with("character_visual_"));
        let suffix: u32 = name_a["character_visual_".len()..].parse().expect("numeric suffix");
        assert!(suffix < 100_000);
    }

    #[test]
    fn test_factory_does_not_touch_ids_without_participant() {
        let mut gpu = ResourceLedger::new();
        let visual = primitive_factory(7).build(&CharacterVisualConfig::default(), &mut gpu);

        assert_eq!(visual.metadata.participant_id, None);
        assert_eq!(visual.metadata.character_type, CharacterType::Player);
        assert_eq!(visual.metadata.accent_color, None);
    }
}
