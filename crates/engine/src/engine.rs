use catalog::temporal::{CountryConflictIndex, Participation, active_conflicts};
use catalog::{Catalog, Conflict, LiberationStruggle};
use foundation::timeline::Year;
use gpu::renderer::{Camera, RenderFrame, Renderer};
use gpu::resources::{GpuResources, TextureHandle};
use layers::basemap::{self, BASEMAP_HEIGHT, BASEMAP_WIDTH, Raster};
use layers::overlay::{self, OverlayRef, OverlayToggles, RebuildStats};
use layers::sprites::GlowSprite;
use runtime::frame::Frame;
use runtime::playback::PlaybackController;
use runtime::viewport::ViewportController;
use scene::World;
use scene::entity::EntityId;
use scene::picking::{PickOptions, pick_ray};

use crate::error::EngineError;

/// Side length of the shared marker glow texture.
const SPRITE_SIZE: u32 = 64;

/// The domain object behind a clicked marker, resolved from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Conflict(Conflict),
    Struggle(LiberationStruggle),
}

type SelectionHandler = Box<dyn FnMut(&Selection)>;

/// The whole visualization behind one facade.
///
/// Owns the scene, the synthesized basemap, the GPU resource registry, and
/// both controllers. The host drives it with `advance` once per animation
/// tick and forwards raw pointer, wheel, and resize events; everything else
/// (year scrubbing, layer toggles, playback) goes through the explicit
/// control surface.
pub struct ConflictGlobe {
    catalog: Catalog,
    world: World,
    resources: GpuResources,
    basemap: TextureHandle,
    basemap_raster: Raster,
    sprite: TextureHandle,
    sprite_raster: GlowSprite,
    viewport: ViewportController,
    playback: PlaybackController,
    toggles: OverlayToggles,
    bindings: Vec<(EntityId, OverlayRef)>,
    overlay_stats: RebuildStats,
    selection_handler: Option<SelectionHandler>,
    frame: Frame,
    surface_width: f64,
    surface_height: f64,
}

impl ConflictGlobe {
    /// Builds the engine around a validated catalog.
    ///
    /// The basemap is synthesized exactly once here and kept resident for
    /// the engine's lifetime; a synthesis failure is fatal. The initial
    /// selected year is the dataset's last year, so ongoing conflicts are
    /// visible before any scrubbing.
    pub fn new(catalog: Catalog, width: f64, height: f64) -> Result<Self, EngineError> {
        let basemap_raster = basemap::synthesize(BASEMAP_WIDTH, BASEMAP_HEIGHT)?;

        let sprite_raster = GlowSprite::new(SPRITE_SIZE);

        let mut resources = GpuResources::new();
        let basemap = resources.create_texture(basemap_raster.width(), basemap_raster.height());
        let sprite = resources.create_texture(sprite_raster.size(), sprite_raster.size());

        let playback =
            PlaybackController::new(catalog.min_year(), catalog.max_year(), catalog.max_year());

        let mut globe = Self {
            catalog,
            world: World::new(),
            resources,
            basemap,
            basemap_raster,
            sprite,
            sprite_raster,
            viewport: ViewportController::new(),
            playback,
            toggles: OverlayToggles::default(),
            bindings: Vec::new(),
            overlay_stats: RebuildStats::default(),
            selection_handler: None,
            frame: Frame::first(),
            surface_width: width,
            surface_height: height,
        };
        globe.rebuild_overlays();

        tracing::info!(
            min_year = globe.playback.min_year().0,
            max_year = globe.playback.max_year().0,
            countries = globe.catalog.countries().count(),
            "engine initialized"
        );
        Ok(globe)
    }

    pub fn selected_year(&self) -> Year {
        self.playback.year()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn toggles(&self) -> OverlayToggles {
        self.toggles
    }

    pub fn overlay_stats(&self) -> RebuildStats {
        self.overlay_stats
    }

    pub fn basemap_raster(&self) -> &Raster {
        &self.basemap_raster
    }

    pub fn basemap_texture(&self) -> TextureHandle {
        self.basemap
    }

    /// Shared alpha raster every marker billboard is tinted from. Hosts
    /// upload it once against `sprite_texture`.
    pub fn glow_sprite(&self) -> &GlowSprite {
        &self.sprite_raster
    }

    pub fn sprite_texture(&self) -> TextureHandle {
        self.sprite
    }

    /// Scrub the timeline. A clamped no-op change skips the rebuild.
    pub fn set_year(&mut self, year: Year) {
        let before = self.playback.year();
        self.playback.set_year(year);
        if self.playback.year() != before {
            self.rebuild_overlays();
        }
    }

    pub fn set_show_conflicts(&mut self, show: bool) {
        if self.toggles.show_conflicts != show {
            self.toggles.show_conflicts = show;
            self.rebuild_overlays();
        }
    }

    pub fn set_show_liberation_struggles(&mut self, show: bool) {
        if self.toggles.show_liberation_struggles != show {
            self.toggles.show_liberation_struggles = show;
            self.rebuild_overlays();
        }
    }

    pub fn play(&mut self) {
        let before = self.playback.year();
        self.playback.play();
        // Playing from the last year restarts at the first.
        if self.playback.year() != before {
            self.rebuild_overlays();
        }
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn toggle_playback(&mut self) {
        if self.playback.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// One cooperative tick: advances the engine clock, the viewport, and
    /// playback, then collects the frame's draw commands.
    pub fn advance(&mut self, dt_ms: f64) -> RenderFrame {
        self.frame = self.frame.advance(dt_ms);
        self.viewport.tick(dt_ms);
        if self.playback.tick(dt_ms) {
            self.rebuild_overlays();
        }
        Renderer::collect(
            &self.world,
            self.camera(),
            self.basemap,
            self.frame.clock_s(),
        )
    }

    pub fn on_pointer_down(&mut self, x_px: f64, y_px: f64) {
        self.viewport.on_pointer_down(x_px, y_px);
    }

    pub fn on_pointer_move(&mut self, x_px: f64, y_px: f64) {
        self.viewport.on_pointer_move(x_px, y_px);
    }

    pub fn on_pointer_up(&mut self) {
        self.viewport.on_pointer_up();
    }

    pub fn on_pointer_leave(&mut self) {
        self.viewport.on_pointer_up();
    }

    /// Normalized wheel or pinch delta from the host.
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.viewport.on_wheel(delta_y);
    }

    /// Surface resize. A zero-area surface is ignored so a minimized host
    /// window cannot wedge picking or projection.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            tracing::warn!(width, height, "ignoring zero-area resize");
            return;
        }
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Called back with every resolved selection, in addition to the
    /// `handle_click` return value.
    pub fn set_selection_handler(&mut self, handler: impl FnMut(&Selection) + 'static) {
        self.selection_handler = Some(Box::new(handler));
    }

    /// Resolves a click to the domain object behind the nearest marker, or
    /// `None` for empty space.
    pub fn handle_click(&mut self, x_px: f64, y_px: f64) -> Option<Selection> {
        let camera = self.camera();
        let ray = camera.screen_ray(x_px, y_px, self.surface_width, self.surface_height)?;
        let local = camera.globe_local_ray(ray);
        let hit = pick_ray(&self.world, local, PickOptions::default())?;

        let overlay = self
            .bindings
            .iter()
            .find_map(|(entity, overlay)| (*entity == hit.entity).then_some(overlay))?;
        let selection = match overlay {
            OverlayRef::Conflict { id } => self
                .catalog
                .conflicts()
                .iter()
                .find(|c| &c.id == id)
                .cloned()
                .map(Selection::Conflict),
            OverlayRef::Struggle { id } => self
                .catalog
                .liberation_struggles()
                .iter()
                .find(|s| &s.id == id)
                .cloned()
                .map(Selection::Struggle),
        }?;

        if let Some(handler) = self.selection_handler.as_mut() {
            handler(&selection);
        }
        Some(selection)
    }

    /// Every (conflict, side) participation for a country at the selected
    /// year. Empty for unknown ids and for countries at peace.
    pub fn country_participations(&self, country_id: &str) -> Vec<Participation<'_>> {
        let active = active_conflicts(&self.catalog, self.playback.year());
        let index = CountryConflictIndex::build(&active);
        index.participations(country_id).to_vec()
    }

    /// Releases every GPU-resident allocation. `gpu_live_count` is zero
    /// afterwards; anything else is a teardown leak.
    pub fn teardown(&mut self) {
        self.playback.pause();
        self.world.clear_group(scene::components::OverlayGroup::ConflictMarkers);
        self.world.clear_group(scene::components::OverlayGroup::ConflictArcs);
        self.world
            .clear_group(scene::components::OverlayGroup::LiberationStruggles);
        self.bindings.clear();
        self.resources.release_all();
        tracing::info!("engine torn down");
    }

    pub fn gpu_live_count(&self) -> usize {
        self.resources.live_count()
    }

    fn camera(&self) -> Camera {
        Camera::new(
            self.viewport.yaw(),
            self.viewport.pitch(),
            self.viewport.zoom(),
        )
    }

    fn rebuild_overlays(&mut self) {
        let active = active_conflicts(&self.catalog, self.playback.year());
        let result = overlay::rebuild(&mut self.world, &self.catalog, &active, self.toggles);
        self.overlay_stats = result.stats;
        self.bindings = result.bindings;
        tracing::debug!(
            year = self.playback.year().0,
            markers = self.overlay_stats.markers,
            arcs = self.overlay_stats.alliance_arcs + self.overlay_stats.confrontation_arcs,
            struggles = self.overlay_stats.struggle_points,
            "overlays rebuilt"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ConflictGlobe, Selection};
    use catalog::{Catalog, Conflict, ConflictSide, Country, LiberationStruggle};
    use foundation::timeline::Year;
    use gpu::renderer::RenderCommand;
    use pretty_assertions::assert_eq;

    fn country(id: &str, lat: f64, lng: f64) -> Country {
        Country {
            id: id.to_string(),
            name: id.to_uppercase(),
            lat,
            lng,
        }
    }

    fn side(name: &str, color: &str, ids: &[&str]) -> ConflictSide {
        ConflictSide {
            name: name.to_string(),
            color: color.to_string(),
            country_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn conflict(id: &str, start: i32, end: i32, sides: Vec<ConflictSide>) -> Conflict {
        Conflict {
            id: id.to_string(),
            name: id.to_uppercase(),
            kind: "interstate".to_string(),
            start_year: start,
            end_year: end,
            casualties_label: "unknown".to_string(),
            description: String::new(),
            sides,
        }
    }

    fn fixture() -> Catalog {
        let countries = vec![
            // Sits at globe-local (0, 0, 1), dead center of the default view.
            country("ecu", 0.0, -90.0),
            country("gbr", 54.0, -2.0),
            country("fra", 46.0, 2.0),
        ];
        let conflicts = vec![
            conflict(
                "andes",
                1950,
                1960,
                vec![
                    side("north", "#4577d6", &["ecu", "gbr"]),
                    side("south", "#d64545", &["fra"]),
                ],
            ),
            conflict(
                "early",
                1910,
                1915,
                vec![side("lone", "#888888", &["gbr"])],
            ),
        ];
        let struggles = vec![LiberationStruggle {
            id: "algeria".to_string(),
            name: "Algeria".to_string(),
            lat: 28.0,
            lng: 2.6,
            color: "#ffaa00".to_string(),
            description: String::new(),
        }];
        Catalog::new(countries, conflicts, struggles).expect("valid fixture")
    }

    fn globe() -> ConflictGlobe {
        ConflictGlobe::new(fixture(), 800.0, 600.0).expect("engine")
    }

    #[test]
    fn starts_at_the_last_year_with_overlays_built() {
        let globe = globe();
        assert_eq!(globe.selected_year(), Year(1960));
        // The 1950-1960 conflict is active; the 1910-1915 one is not.
        assert_eq!(globe.overlay_stats().markers, 3);
        assert_eq!(globe.overlay_stats().struggle_points, 1);
        assert!(!globe.is_playing());
    }

    #[test]
    fn scrubbing_rebuilds_for_the_new_year() {
        let mut globe = globe();
        globe.set_year(Year(1912));
        assert_eq!(globe.selected_year(), Year(1912));
        assert_eq!(globe.overlay_stats().markers, 1);

        // Out-of-range scrubs clamp to the dataset bounds.
        globe.set_year(Year(1800));
        assert_eq!(globe.selected_year(), Year(1910));
    }

    #[test]
    fn toggles_rebuild_only_on_change() {
        let mut globe = globe();
        globe.set_show_conflicts(false);
        assert_eq!(globe.overlay_stats().markers, 0);
        assert_eq!(globe.overlay_stats().struggle_points, 1);

        globe.set_show_liberation_struggles(false);
        assert_eq!(globe.overlay_stats().struggle_points, 0);
    }

    #[test]
    fn frames_start_with_the_globe_draw() {
        let mut globe = globe();
        let frame = globe.advance(16.0);
        assert!(matches!(
            frame.commands.first(),
            Some(RenderCommand::DrawGlobe { .. })
        ));
        assert!(frame.commands.len() > 1);
    }

    #[test]
    fn playback_advances_and_stops_at_the_last_year() {
        let mut globe = globe();
        globe.set_year(Year(1958));
        globe.play();
        assert!(globe.is_playing());

        globe.advance(10_000.0);
        assert_eq!(globe.selected_year(), Year(1960));
        assert!(!globe.is_playing());
    }

    #[test]
    fn playing_from_the_end_restarts_the_timeline() {
        let mut globe = globe();
        globe.play();
        assert_eq!(globe.selected_year(), Year(1910));
        assert!(globe.is_playing());
    }

    #[test]
    fn zero_area_resize_is_ignored() {
        let mut globe = globe();
        globe.on_resize(0.0, 600.0);
        // Picking still works against the previous surface.
        assert!(globe.handle_click(400.0, 300.0).is_some());
    }

    #[test]
    fn center_click_selects_the_front_conflict_marker() {
        let mut globe = globe();
        let selection = globe.handle_click(400.0, 300.0).expect("selection");
        let Selection::Conflict(conflict) = selection else {
            panic!("expected a conflict selection");
        };
        assert_eq!(conflict.id, "andes");
    }

    #[test]
    fn corner_click_hits_nothing() {
        let mut globe = globe();
        assert!(globe.handle_click(2.0, 2.0).is_none());
    }

    #[test]
    fn dragging_changes_what_a_click_hits() {
        let mut globe = globe();
        assert!(globe.handle_click(400.0, 300.0).is_some());

        // Drag the globe a quarter turn; the marker rotates off the ray.
        globe.on_pointer_down(0.0, 300.0);
        let quarter_px = std::f64::consts::FRAC_PI_2 / 0.005;
        globe.on_pointer_move(quarter_px, 300.0);
        globe.on_pointer_up();
        assert!(globe.handle_click(400.0, 300.0).is_none());
    }

    #[test]
    fn selection_handler_sees_every_selection() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut globe = globe();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        globe.set_selection_handler(move |selection| {
            let id = match selection {
                Selection::Conflict(c) => c.id.clone(),
                Selection::Struggle(s) => s.id.clone(),
            };
            sink.borrow_mut().push(id);
        });

        globe.handle_click(400.0, 300.0);
        globe.handle_click(2.0, 2.0);
        assert_eq!(*seen.borrow(), vec!["andes".to_string()]);
    }

    #[test]
    fn participations_follow_the_selected_year() {
        let mut globe = globe();
        let entries = globe.country_participations("gbr");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].conflict.id, "andes");
        assert_eq!(entries[0].side_index, 0);

        globe.set_year(Year(1912));
        let entries = globe.country_participations("gbr");
        assert_eq!(entries[0].conflict.id, "early");
        assert!(globe.country_participations("atlantis").is_empty());
    }

    #[test]
    fn teardown_releases_every_gpu_allocation() {
        let mut globe = globe();
        // Basemap plus the shared glow sprite.
        assert_eq!(globe.gpu_live_count(), 2);
        globe.teardown();
        assert_eq!(globe.gpu_live_count(), 0);
    }
}
