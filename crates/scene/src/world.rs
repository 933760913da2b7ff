use foundation::handles::Handle;
use foundation::math::Vec3;

use crate::components::{Drawable, GlobeAnchor, OverlayGroup, PolylineId, Transform, Visibility};
use crate::entity::EntityId;

/// Sampled polyline geometry owned by the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
}

/// Column-storage world for overlay entities.
///
/// Entity slots and polyline slots are recycled through free lists when a
/// whole overlay group is cleared, so repeated full rebuilds do not grow
/// storage without bound.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    free_entities: Vec<u32>,
    transforms: Vec<Option<Transform>>,
    visibility: Vec<Option<Visibility>>,
    drawables: Vec<Option<Drawable>>,
    groups: Vec<Option<OverlayGroup>>,
    anchors: Vec<Option<GlobeAnchor>>,
    polylines: Vec<Option<Polyline>>,
    free_polylines: Vec<u32>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let index = match self.free_entities.pop() {
            Some(index) => index,
            None => {
                let index = self.next_index;
                self.next_index += 1;
                index
            }
        };
        self.ensure_capacity(index as usize);
        EntityId(Handle::new(index, 0))
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn set_drawable(&mut self, entity: EntityId, drawable: Drawable) {
        self.drawables[entity.index() as usize] = Some(drawable);
    }

    pub fn set_group(&mut self, entity: EntityId, group: OverlayGroup) {
        self.groups[entity.index() as usize] = Some(group);
    }

    pub fn set_anchor(&mut self, entity: EntityId) {
        self.anchors[entity.index() as usize] = Some(GlobeAnchor);
    }

    pub fn is_anchored(&self, entity: EntityId) -> bool {
        self.anchors
            .get(entity.index() as usize)
            .is_some_and(|a| a.is_some())
    }

    pub fn add_polyline(&mut self, polyline: Polyline) -> PolylineId {
        if let Some(index) = self.free_polylines.pop() {
            self.polylines[index as usize] = Some(polyline);
            return PolylineId(index);
        }
        let id = PolylineId(self.polylines.len() as u32);
        self.polylines.push(Some(polyline));
        id
    }

    pub fn polyline(&self, id: PolylineId) -> Option<&Polyline> {
        self.polylines.get(id.0 as usize).and_then(|p| p.as_ref())
    }

    /// Despawns every entity tagged with `group`, releasing any polyline
    /// geometry those entities owned.
    pub fn clear_group(&mut self, group: OverlayGroup) {
        for idx in 0..self.groups.len() {
            if self.groups[idx] != Some(group) {
                continue;
            }
            if let Some(Drawable::Polyline { points, .. }) = self.drawables[idx] {
                self.polylines[points.0 as usize] = None;
                self.free_polylines.push(points.0);
            }
            self.transforms[idx] = None;
            self.visibility[idx] = None;
            self.drawables[idx] = None;
            self.groups[idx] = None;
            self.anchors[idx] = None;
            self.free_entities.push(idx as u32);
        }
    }

    /// Visible drawables in ascending entity-index order.
    pub fn drawables(&self) -> Vec<(EntityId, Transform, Drawable)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            let visible = self
                .visibility
                .get(idx)
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                continue;
            }

            out.push((EntityId(Handle::new(idx as u32, 0)), transform, *drawable));
        }
        out
    }

    /// Visible drawables belonging to `group`, in ascending entity-index order.
    pub fn drawables_in_group(&self, group: OverlayGroup) -> Vec<(EntityId, Transform, Drawable)> {
        self.drawables()
            .into_iter()
            .filter(|(entity, _, _)| self.groups[entity.index() as usize] == Some(group))
            .collect()
    }

    pub fn group_len(&self, group: OverlayGroup) -> usize {
        self.groups.iter().filter(|g| **g == Some(group)).count()
    }

    pub fn live_polyline_count(&self) -> usize {
        self.polylines.iter().filter(|p| p.is_some()).count()
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables.resize(new_len, None);
            self.groups.resize(new_len, None);
            self.anchors.resize(new_len, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Polyline, World};
    use crate::components::{Drawable, OverlayGroup, Transform, Visibility};
    use foundation::math::Vec3;

    #[test]
    fn spawn_and_collect_drawables() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::translate(Vec3::new(1.0, 0.0, 0.0)));
        world.set_drawable(entity, Drawable::marker([1.0; 4], 0.04, 0.0));

        let drawables = world.drawables();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, entity);
    }

    #[test]
    fn hidden_entities_are_filtered() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable(entity, Drawable::marker([1.0; 4], 0.04, 0.0));
        world.set_visibility(entity, Visibility::hidden());

        assert!(world.drawables().is_empty());
    }

    #[test]
    fn clear_group_releases_entities_and_polylines() {
        let mut world = World::new();

        let marker = world.spawn();
        world.set_transform(marker, Transform::identity());
        world.set_drawable(marker, Drawable::marker([1.0; 4], 0.04, 0.0));
        world.set_group(marker, OverlayGroup::ConflictMarkers);

        let arc = world.spawn();
        let points = world.add_polyline(Polyline {
            points: vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
        });
        world.set_transform(arc, Transform::identity());
        world.set_drawable(arc, Drawable::polyline(points, [1.0; 4]));
        world.set_group(arc, OverlayGroup::ConflictArcs);

        world.clear_group(OverlayGroup::ConflictArcs);
        assert_eq!(world.group_len(OverlayGroup::ConflictArcs), 0);
        assert_eq!(world.group_len(OverlayGroup::ConflictMarkers), 1);
        assert_eq!(world.live_polyline_count(), 0);
    }

    #[test]
    fn cleared_slots_are_recycled() {
        let mut world = World::new();
        let a = world.spawn();
        world.set_transform(a, Transform::identity());
        world.set_drawable(a, Drawable::marker([1.0; 4], 0.04, 0.0));
        world.set_group(a, OverlayGroup::ConflictMarkers);

        world.clear_group(OverlayGroup::ConflictMarkers);
        let b = world.spawn();
        assert_eq!(b.index(), a.index());
    }

    #[test]
    fn group_filter_only_returns_members() {
        let mut world = World::new();
        let a = world.spawn();
        world.set_transform(a, Transform::identity());
        world.set_drawable(a, Drawable::marker([1.0; 4], 0.04, 0.0));
        world.set_group(a, OverlayGroup::ConflictMarkers);

        let b = world.spawn();
        world.set_transform(b, Transform::identity());
        world.set_drawable(b, Drawable::ring([1.0; 4], 0.05));
        world.set_group(b, OverlayGroup::LiberationStruggles);

        let markers = world.drawables_in_group(OverlayGroup::ConflictMarkers);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].0, a);
    }
}
