//! Local tint — тёмно-зелёный emissive для локального игрока

use crate::color::Rgb;
use crate::visual::{VisualObject, TORSO_PART};

pub const LOCAL_PLAYER_EMISSIVE: Rgb = Rgb(0x002200);

/// Подкрасить визуал локального игрока
///
/// Порядок: материал части "torso" → собственный материал узла → no-op.
/// Возвращает `true` если emissive был выставлен.
pub fn apply_local_tint(visual: Option<&mut VisualObject>, emissive: Rgb) -> bool {
    let Some(visual) = visual else {
        return false;
    };

    let torso_tinted = visual
        .part_mut(TORSO_PART)
        .and_then(VisualObject::material_mut)
        .is_some_and(|material| material.set_emissive(emissive));
    if torso_tinted {
        return true;
    }

    visual
        .material_mut()
        .is_some_and(|material| material.set_emissive(emissive))
}
