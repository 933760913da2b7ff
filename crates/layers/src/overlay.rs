use std::collections::BTreeSet;

use catalog::{Catalog, Conflict};
use foundation::math::{Vec3, project};
use scene::components::{Drawable, OverlayGroup, Transform, Visibility};
use scene::entity::EntityId;
use scene::{Polyline, World};

use crate::arcs::{DEFAULT_ARC_SEGMENTS, build_arc};
use crate::sprites::phase_for_index;
use crate::symbology::{
    ALLIANCE_ARC, CONFRONTATION_ARC, CONFRONTATION_COLOR, MARKER_SCALE, RING_RADIUS,
    parse_hex_or_fallback, with_opacity,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayToggles {
    pub show_conflicts: bool,
    pub show_liberation_struggles: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            show_conflicts: true,
            show_liberation_struggles: true,
        }
    }
}

/// What a pickable overlay entity stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayRef {
    Conflict { id: String },
    Struggle { id: String },
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RebuildStats {
    pub markers: usize,
    pub alliance_arcs: usize,
    pub confrontation_arcs: usize,
    pub struggle_points: usize,
    pub skipped_refs: usize,
}

#[derive(Debug, Default)]
pub struct RebuildResult {
    pub stats: RebuildStats,
    /// Marker entity -> domain object, for selection routing.
    pub bindings: Vec<(EntityId, OverlayRef)>,
}

/// Full clear-and-rebuild of the three overlay groups.
///
/// No incremental diffing: every relevant state change (active set or either
/// visibility toggle) clears the groups and re-materializes them. Marker
/// pulse phase is assigned from the placement index within this pass, so it
/// is not stable across rebuilds.
///
/// Unknown country references are skipped silently; the catalog may be
/// regionally partial.
pub fn rebuild(
    world: &mut World,
    catalog: &Catalog,
    active: &[&Conflict],
    toggles: OverlayToggles,
) -> RebuildResult {
    world.clear_group(OverlayGroup::ConflictMarkers);
    world.clear_group(OverlayGroup::ConflictArcs);
    world.clear_group(OverlayGroup::LiberationStruggles);

    let mut result = RebuildResult::default();
    let mut marker_index = 0usize;

    if toggles.show_conflicts {
        // One marker per unique country across the whole pass; the first
        // side to place a country decides its color.
        let mut placed: BTreeSet<String> = BTreeSet::new();

        for conflict in active {
            for side in &conflict.sides {
                let side_color = parse_hex_or_fallback(&side.color);
                let mut resolved: Vec<Vec3> = Vec::new();

                for country_id in &side.country_ids {
                    let Some(country) = catalog.country(country_id) else {
                        result.stats.skipped_refs += 1;
                        tracing::debug!(
                            country = %country_id,
                            conflict = %conflict.id,
                            "skipping unknown country reference"
                        );
                        continue;
                    };

                    let position = project(country.lat, country.lng, 1.0);
                    resolved.push(position);

                    if placed.insert(country_id.clone()) {
                        let entity = spawn_marker(
                            world,
                            position,
                            side_color,
                            marker_index,
                            OverlayGroup::ConflictMarkers,
                        );
                        marker_index += 1;
                        result.stats.markers += 1;
                        result.bindings.push((
                            entity,
                            OverlayRef::Conflict {
                                id: conflict.id.clone(),
                            },
                        ));
                    }
                }

                // Intra-side links between consecutive resolvable countries.
                for pair in resolved.windows(2) {
                    spawn_arc(
                        world,
                        pair[0],
                        pair[1],
                        ALLIANCE_ARC.height_factor,
                        with_opacity(side_color, ALLIANCE_ARC.opacity),
                    );
                    result.stats.alliance_arcs += 1;
                }
            }

            // One confrontation link between the first country of each of the
            // two leading sides; skipped when either reference is unknown.
            if conflict.sides.len() >= 2 {
                let first = |side_index: usize| {
                    conflict.sides[side_index]
                        .country_ids
                        .first()
                        .and_then(|id| catalog.country(id))
                };
                if let (Some(a), Some(b)) = (first(0), first(1)) {
                    spawn_arc(
                        world,
                        project(a.lat, a.lng, 1.0),
                        project(b.lat, b.lng, 1.0),
                        CONFRONTATION_ARC.height_factor,
                        with_opacity(CONFRONTATION_COLOR, CONFRONTATION_ARC.opacity),
                    );
                    result.stats.confrontation_arcs += 1;
                }
            }
        }
    }

    if toggles.show_liberation_struggles {
        // Struggles sit outside the year timeline entirely.
        for struggle in catalog.liberation_struggles() {
            let color = parse_hex_or_fallback(&struggle.color);
            let position = project(struggle.lat, struggle.lng, 1.0);

            let marker = spawn_marker(
                world,
                position,
                color,
                marker_index,
                OverlayGroup::LiberationStruggles,
            );
            marker_index += 1;
            result.bindings.push((
                marker,
                OverlayRef::Struggle {
                    id: struggle.id.clone(),
                },
            ));

            let ring = world.spawn();
            world.set_transform(ring, Transform::translate(position));
            world.set_visibility(ring, Visibility::visible());
            world.set_drawable(ring, Drawable::ring(with_opacity(color, 0.5), RING_RADIUS));
            world.set_group(ring, OverlayGroup::LiberationStruggles);
            world.set_anchor(ring);

            result.stats.struggle_points += 1;
        }
    }

    result
}

fn spawn_marker(
    world: &mut World,
    position: Vec3,
    color: [f32; 4],
    index: usize,
    group: OverlayGroup,
) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::translate(position));
    world.set_visibility(entity, Visibility::visible());
    world.set_drawable(
        entity,
        Drawable::marker(color, MARKER_SCALE, phase_for_index(index)),
    );
    world.set_group(entity, group);
    world.set_anchor(entity);
    entity
}

fn spawn_arc(world: &mut World, a: Vec3, b: Vec3, height_factor: f64, color: [f32; 4]) {
    let points = build_arc(a, b, height_factor, DEFAULT_ARC_SEGMENTS);
    let id = world.add_polyline(Polyline { points });

    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_visibility(entity, Visibility::visible());
    world.set_drawable(entity, Drawable::polyline(id, color));
    world.set_group(entity, OverlayGroup::ConflictArcs);
    world.set_anchor(entity);
}
