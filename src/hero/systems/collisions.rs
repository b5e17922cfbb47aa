//! Hero domain: ground detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hero::components::{GameLayer, Grounded, Hero, HITBOX_CENTER_Y, HITBOX_SIZE};

/// Cast a short ray downward from the hero's feet against the Ground layer.
/// The result is the on-floor half of this tick's physics sample.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &mut Grounded), With<Hero>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, mut grounded) in &mut query {
        let was_grounded = grounded.0;

        let feet_y = transform.translation.y + HITBOX_CENTER_Y - HITBOX_SIZE.y / 2.0;
        let ray_origin = Vec2::new(transform.translation.x, feet_y);
        let ray_distance = 4.0;

        let hit = spatial_query.cast_ray(ray_origin, Dir2::NEG_Y, ray_distance, true, &ground_filter);

        grounded.0 = hit.is_some();

        if grounded.0 && !was_grounded {
            debug!("Landed at y={:.1}", transform.translation.y);
        } else if !grounded.0 && was_grounded {
            debug!("Left ground at y={:.1}", transform.translation.y);
        }
    }
}
