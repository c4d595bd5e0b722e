use crate::config::SimulationConfig;
use crate::entity::Entity;
use crate::scheduler::{FrameScheduler, StopToken};
use serde::Serialize;
use stagehand_common::{EntityId, IdGenerator};
use stagehand_input::InputEvent;
use stagehand_render::{CameraController, DrawBackend, RenderError, Renderer, Surface};
use stagehand_scene::SceneError;
use std::collections::{BTreeMap, VecDeque};

/// Events kept by default before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Errors from entity lifecycle and simulation startup.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("entity {0} is already registered")]
    DuplicateEntity(EntityId),
    #[error("entity {0} not found")]
    NotFound(EntityId),
    #[error("no entity ids left to allocate")]
    IdsExhausted,
    #[error("renderer scene already holds {0} nodes not owned by any entity")]
    SceneNotEmpty(usize),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationState {
    /// Constructed, or the loop has been stopped.
    Idle,
    /// Inside [`Simulation::begin`].
    Running,
}

/// A record of a lifecycle change or a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    EntityAdded { id: EntityId, kind: &'static str },
    EntityRemoved { id: EntityId, kind: &'static str },
    /// A frame updated every entity and was drawn.
    FrameRendered { frame: u64, time: f64, draws: usize },
    /// Entities updated but drawing failed; the loop carried on.
    FrameFailed { frame: u64, reason: String },
}

/// Root of the runtime: registered entities plus the renderer they draw into.
///
/// The entity map is the single source of truth for what is simulated.
/// Every registered entity's pivot is attached to the renderer's scene, and
/// nothing else is. The renderer is never handed out mutably, so the scene
/// root only changes through [`Simulation::add_entity`] and
/// [`Simulation::remove_entity`].
///
/// Entities are updated in id order, not insertion order. Ids from
/// [`Simulation::allocate_id`] increase, so the two agree unless a caller
/// registers hand-picked ids out of order.
///
/// The event log is a ring of at most `event_capacity` entries, so an
/// unbounded loop keeps constant memory. Counters cover what was dropped.
pub struct Simulation<S: Surface, B: DrawBackend> {
    renderer: Renderer<S, B>,
    entities: BTreeMap<EntityId, Box<dyn Entity>>,
    ids: IdGenerator,
    state: SimulationState,
    frames: u64,
    frames_failed: u64,
    last_time: f64,
    events: VecDeque<SimulationEvent>,
    event_capacity: usize,
    dropped_events: u64,
}

impl<S: Surface, B: DrawBackend> Simulation<S, B> {
    /// Take ownership of a renderer whose scene is still empty.
    pub fn new(renderer: Renderer<S, B>) -> Result<Self, SimulationError> {
        let attached = renderer.scene().len();
        if attached > 0 {
            return Err(SimulationError::SceneNotEmpty(attached));
        }
        Ok(Self {
            renderer,
            entities: BTreeMap::new(),
            ids: IdGenerator::new(),
            state: SimulationState::Idle,
            frames: 0,
            frames_failed: 0,
            last_time: 0.0,
            events: VecDeque::new(),
            event_capacity: EVENT_LOG_CAPACITY,
            dropped_events: 0,
        })
    }

    /// Keep at most `capacity` events; zero disables the log.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        while self.events.len() > capacity {
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self
    }

    /// Build the renderer from config. Fails before any frame runs if the
    /// surface or camera is unusable.
    pub fn from_config(
        surface: S,
        backend: B,
        config: &SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let renderer = Renderer::new(surface, backend, &config.camera)?;
        Self::new(renderer)
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Next id from this simulation's generator.
    pub fn allocate_id(&mut self) -> Result<EntityId, SimulationError> {
        self.ids.next_id().ok_or(SimulationError::IdsExhausted)
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Register an entity and attach its pivot to the scene.
    ///
    /// A duplicate id is rejected and leaves both the map and the scene
    /// unchanged.
    pub fn add_entity(&mut self, entity: Box<dyn Entity>) -> Result<EntityId, SimulationError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(SimulationError::DuplicateEntity(id));
        }
        self.renderer.add_mesh(entity.pivot())?;
        self.ids.reserve(id);

        let kind = entity.kind();
        self.entities.insert(id, entity);
        self.record(SimulationEvent::EntityAdded { id, kind });
        tracing::info!(%id, kind, "entity added");
        Ok(id)
    }

    /// Unregister an entity, detaching its pivot first, and hand it back.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Box<dyn Entity>, SimulationError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(SimulationError::NotFound(id))?;
        if let Err(e) = self.renderer.remove_mesh(entity.pivot()) {
            tracing::warn!(%id, error = %e, "registered entity was not in the scene");
        }

        let kind = entity.kind();
        self.record(SimulationEvent::EntityRemoved { id, kind });
        tracing::info!(%id, kind, "entity removed");
        Ok(entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.get(&id).map(|e| &**e)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(&id).map(|e| &mut **e)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Registered ids in update order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Run one frame for a paint timestamp in milliseconds.
    ///
    /// Every entity's `update` receives the elapsed time in seconds, which
    /// never decreases even if the host's timestamps do. Drawing errors are
    /// logged and recorded, not returned.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let time = (timestamp_ms * 0.001).max(self.last_time);
        self.last_time = time;
        let frame = self.frames;
        self.frames += 1;

        for entity in self.entities.values_mut() {
            entity.update(time);
        }

        match self.renderer.render() {
            Ok(stats) => {
                tracing::debug!(frame, time, draws = stats.draws, "frame rendered");
                self.record(SimulationEvent::FrameRendered {
                    frame,
                    time,
                    draws: stats.draws,
                });
            }
            Err(e) => {
                tracing::error!(frame, error = %e, "frame failed");
                self.frames_failed += 1;
                self.record(SimulationEvent::FrameFailed {
                    frame,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Drive frames from `scheduler` until it runs dry or `stop` is set.
    /// Returns the number of frames run.
    pub fn begin<F: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut F,
        stop: &StopToken,
    ) -> u64 {
        self.state = SimulationState::Running;
        tracing::info!(entities = self.entities.len(), "simulation running");

        let mut frames = 0;
        while !stop.is_stopped() {
            let Some(timestamp) = scheduler.next_frame() else {
                break;
            };
            self.frame(timestamp);
            frames += 1;
        }

        self.state = SimulationState::Idle;
        tracing::info!(frames, "simulation stopped");
        frames
    }

    /// Frames attempted so far, rendered or failed.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frames whose drawing failed.
    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    pub fn renderer(&self) -> &Renderer<S, B> {
        &self.renderer
    }

    /// Host access to the output surface, for resizes and scale changes.
    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.renderer.backend_mut()
    }

    pub fn set_controller(&mut self, controller: Box<dyn CameraController>) {
        self.renderer.set_controller(controller);
    }

    /// Forward host input to the camera controller, if any.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.renderer.handle_input(event);
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> impl ExactSizeIterator<Item = &SimulationEvent> + '_ {
        self.events.iter()
    }

    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        self.events.drain(..).collect()
    }

    /// Events evicted from the log since construction.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    fn record(&mut self, event: SimulationEvent) {
        if self.event_capacity == 0 {
            self.dropped_events += 1;
            return;
        }
        if self.events.len() == self.event_capacity {
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{CreatureEntity, CreatureStyle};
    use crate::cube::CubeEntity;
    use crate::entity::{BasicEntity, EntityCore};
    use crate::scheduler::FixedStepScheduler;
    use glam::Vec3;
    use stagehand_input::PointerButton;
    use stagehand_render::{
        CameraConfig, DebugTextBackend, FrameSubmission, HeadlessSurface, OrbitControls,
        SurfaceConfig,
    };
    use stagehand_scene::{BasicMaterial, BoxGeometry, Color, Mesh, MeshMaterial, NodeHandle};
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    type TestSim = Simulation<HeadlessSurface, DebugTextBackend>;

    fn sim() -> TestSim {
        Simulation::from_config(
            HeadlessSurface::new(&SurfaceConfig::default()),
            DebugTextBackend::new(),
            &SimulationConfig::default(),
        )
        .unwrap()
    }

    fn creature(id: u64) -> Box<dyn Entity> {
        Box::new(CreatureEntity::new(EntityId(id), &CreatureStyle::default()))
    }

    fn entity_with(id: u64, meshes: usize) -> Box<dyn Entity> {
        let material = Rc::new(BasicMaterial::colored("m", Color(0x336699)));
        let meshes = (0..meshes).map(|i| {
            Rc::new(Mesh::new(
                format!("e{id}/{i}"),
                BoxGeometry::unit(),
                MeshMaterial::Single(Rc::clone(&material)),
            ))
        });
        Box::new(BasicEntity::with_meshes(EntityId(id), meshes))
    }

    /// Records every time value its update receives.
    struct TimeRecorder {
        inner: CreatureEntity,
        seen: Rc<RefCell<Vec<f64>>>,
    }

    impl Entity for TimeRecorder {
        fn core(&self) -> &EntityCore {
            self.inner.core()
        }

        fn core_mut(&mut self) -> &mut EntityCore {
            self.inner.core_mut()
        }

        fn update(&mut self, time: f64) {
            self.seen.borrow_mut().push(time);
            self.inner.update(time);
        }
    }

    /// Scene contents as a set of mesh names.
    fn scene_meshes(sim: &TestSim) -> BTreeSet<String> {
        sim.renderer().scene().mesh_names().into_iter().collect()
    }

    /// Mesh names owned by the registered entities.
    fn registered_meshes(sim: &TestSim) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for id in sim.entity_ids() {
            let entity = sim.entity(id).unwrap();
            for mesh in entity.pivot().borrow().meshes() {
                names.insert(mesh.name.clone());
            }
        }
        names
    }

    #[test]
    fn simulation_starts_idle_and_empty() {
        let s = sim();
        assert_eq!(s.state(), SimulationState::Idle);
        assert_eq!(s.entity_count(), 0);
        assert_eq!(s.renderer().scene().renderable_count(), 0);
    }

    #[test]
    fn startup_fails_without_surface() {
        let result = Simulation::from_config(
            HeadlessSurface::new(&SurfaceConfig {
                width: 0.0,
                ..SurfaceConfig::default()
            }),
            DebugTextBackend::new(),
            &SimulationConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SimulationError::Render(RenderError::SurfaceUnavailable(_)))
        ));
    }

    #[test]
    fn add_entity_attaches_pivot() {
        let mut s = sim();
        let id = s.add_entity(creature(0)).unwrap();
        assert_eq!(id, EntityId(0));
        assert!(s.contains(id));
        assert!(s.entity(id).unwrap().pivot().borrow().is_attached());
        assert_eq!(s.renderer().scene().renderable_count(), 2);
    }

    #[test]
    fn duplicate_id_is_rejected_without_side_effects() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let err = s.add_entity(entity_with(0, 3)).unwrap_err();
        assert!(matches!(err, SimulationError::DuplicateEntity(EntityId(0))));
        assert_eq!(s.entity_count(), 1);
        assert_eq!(s.renderer().scene().renderable_count(), 2);
    }

    #[test]
    fn removing_unknown_id_is_not_found() {
        let mut s = sim();
        let err = s.remove_entity(EntityId(9)).err().unwrap();
        assert!(matches!(err, SimulationError::NotFound(EntityId(9))));
    }

    #[test]
    fn removed_entity_is_detached() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let entity = s.remove_entity(EntityId(0)).unwrap();
        assert!(!entity.pivot().borrow().is_attached());
        assert_eq!(s.renderer().scene().renderable_count(), 0);
        assert!(s.renderer().scene().is_empty());
    }

    #[test]
    fn removed_entity_can_be_added_again() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let entity = s.remove_entity(EntityId(0)).unwrap();
        s.add_entity(entity).unwrap();
        assert_eq!(s.renderer().scene().renderable_count(), 2);
    }

    #[test]
    fn same_id_after_removal_shows_only_new_entity() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let old = s.remove_entity(EntityId(0)).unwrap();
        s.add_entity(entity_with(0, 3)).unwrap();

        assert_eq!(s.renderer().scene().renderable_count(), 3);
        let expected: BTreeSet<String> = ["e0/0", "e0/1", "e0/2"].map(String::from).into();
        assert_eq!(scene_meshes(&s), expected);
        drop(old);
        assert_eq!(s.renderer().scene().len(), 1);
    }

    #[test]
    fn removing_one_entity_leaves_the_other() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        s.add_entity(entity_with(1, 3)).unwrap();
        let before = s.renderer().scene().renderable_count();
        let contributed = s.entity(EntityId(0)).unwrap().pivot().borrow().mesh_count();

        s.remove_entity(EntityId(0)).unwrap();

        assert_eq!(s.renderer().scene().renderable_count(), before - contributed);
        let expected: BTreeSet<String> = ["e1/0", "e1/1", "e1/2"].map(String::from).into();
        assert_eq!(scene_meshes(&s), expected);
        assert!(s.entity(EntityId(1)).unwrap().pivot().borrow().is_attached());
    }

    #[test]
    fn scene_matches_registered_entities_under_churn() {
        let mut s = sim();
        // Deterministic add/remove sequence over ids 0..6.
        let mut state = 0x2545_f491_u64;
        for step in 0..200 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let id = state % 6;
            if s.contains(EntityId(id)) {
                s.remove_entity(EntityId(id)).unwrap();
            } else {
                s.add_entity(entity_with(id, (step % 4) as usize)).unwrap();
            }
            assert_eq!(scene_meshes(&s), registered_meshes(&s));
            assert_eq!(s.renderer().scene().len(), s.entity_count());
        }
    }

    #[test]
    fn creature_scenario_runs_n_frames() {
        let mut s = sim();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = s.allocate_id().unwrap();
        s.add_entity(Box::new(TimeRecorder {
            inner: CreatureEntity::new(id, &CreatureStyle::default()),
            seen: Rc::clone(&seen),
        }))
        .unwrap();
        assert_eq!(id, EntityId(0));

        let frames = s.begin(&mut FixedStepScheduler::bounded(60.0, 10), &StopToken::new());

        assert_eq!(frames, 10);
        assert_eq!(s.frame_count(), 10);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 10);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(s.renderer().scene().renderable_count(), 2);
        assert_eq!(s.renderer().backend().frames_submitted(), 10);
        assert_eq!(s.state(), SimulationState::Idle);
    }

    #[test]
    fn time_is_seconds_and_never_decreases() {
        let mut s = sim();
        let seen = Rc::new(RefCell::new(Vec::new()));
        s.add_entity(Box::new(TimeRecorder {
            inner: CreatureEntity::new(EntityId(0), &CreatureStyle::default()),
            seen: Rc::clone(&seen),
        }))
        .unwrap();
        let mut stamps = vec![1500.0, 1000.0, 2000.0].into_iter();
        s.begin(&mut || stamps.next(), &StopToken::new());
        assert_eq!(*seen.borrow(), vec![1.5, 1.5, 2.0]);
    }

    #[test]
    fn stop_token_ends_the_loop() {
        let mut s = sim();
        let stop = StopToken::new();
        let remote = stop.clone();
        let mut count = 0;
        let mut scheduler = || {
            count += 1;
            if count == 3 {
                remote.stop();
            }
            Some(count as f64 * 16.0)
        };
        let frames = s.begin(&mut scheduler, &stop);
        assert_eq!(frames, 3);
        assert_eq!(s.state(), SimulationState::Idle);
    }

    #[test]
    fn updates_run_before_render() {
        let mut s = sim();
        let id = s.allocate_id().unwrap();
        s.add_entity(Box::new(CubeEntity::new(id).with_spin(90.0)))
            .unwrap();
        s.frame(1000.0);
        assert_eq!(s.entity(id).unwrap().core().yaw_degrees(), 90.0);
        let out = s.renderer().backend().last_output();
        assert!(out.contains("[cube-0]"));
        assert!(out.contains("Draws: 1"));
    }

    #[test]
    fn failing_frames_do_not_stop_the_loop() {
        #[derive(Default)]
        struct Flaky {
            calls: u32,
        }
        impl DrawBackend for Flaky {
            fn submit(&mut self, _frame: &FrameSubmission) -> Result<(), RenderError> {
                self.calls += 1;
                if self.calls % 2 == 0 {
                    return Err(RenderError::Backend("lost frame".into()));
                }
                Ok(())
            }
        }

        let renderer = Renderer::new(
            HeadlessSurface::new(&SurfaceConfig::default()),
            Flaky::default(),
            &CameraConfig::default(),
        )
        .unwrap();
        let mut s = Simulation::new(renderer).unwrap();
        let frames = s.begin(&mut FixedStepScheduler::bounded(60.0, 4), &StopToken::new());

        assert_eq!(frames, 4);
        let failed = s
            .events()
            .filter(|e| matches!(e, SimulationEvent::FrameFailed { .. }))
            .count();
        assert_eq!(failed, 2);
        assert_eq!(s.frames_failed(), 2);
        assert_eq!(s.renderer().backend().calls, 4);
    }

    #[test]
    fn allocated_ids_skip_manually_chosen_ones() {
        let mut s = sim();
        s.add_entity(creature(4)).unwrap();
        assert_eq!(s.allocate_id().unwrap(), EntityId(5));
        s.ids_mut().reset();
        assert_eq!(s.allocate_id().unwrap(), EntityId(0));
    }

    #[test]
    fn events_record_lifecycle() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        s.frame(16.0);
        s.remove_entity(EntityId(0)).unwrap();
        let events = s.drain_events();
        assert_eq!(
            events,
            vec![
                SimulationEvent::EntityAdded {
                    id: EntityId(0),
                    kind: "creature"
                },
                SimulationEvent::FrameRendered {
                    frame: 0,
                    time: 0.016,
                    draws: 2
                },
                SimulationEvent::EntityRemoved {
                    id: EntityId(0),
                    kind: "creature"
                },
            ]
        );
        assert_eq!(s.events().len(), 0);
    }

    #[test]
    fn entities_can_turn_while_registered() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let entity = s.entity_mut(EntityId(0)).unwrap();
        for _ in 0..4 {
            entity.turn_left();
        }
        assert_eq!(entity.core().yaw_degrees(), 0.0);
    }

    #[test]
    fn event_log_stays_bounded_over_long_runs() {
        let mut s = sim().with_event_capacity(64);
        s.add_entity(creature(0)).unwrap();
        let frames = s.begin(&mut FixedStepScheduler::bounded(60.0, 10_000), &StopToken::new());

        assert_eq!(frames, 10_000);
        assert_eq!(s.events().len(), 64);
        assert_eq!(s.dropped_events(), 10_001 - 64);
        let last = s.events().last().cloned();
        assert!(matches!(
            last,
            Some(SimulationEvent::FrameRendered { frame: 9_999, .. })
        ));
    }

    #[test]
    fn default_event_log_is_capped() {
        let mut s = sim();
        for i in 0..(EVENT_LOG_CAPACITY as u64 + 10) {
            s.frame(i as f64);
        }
        assert_eq!(s.events().len(), EVENT_LOG_CAPACITY);
        assert_eq!(s.dropped_events(), 10);
        assert_eq!(s.frame_count(), EVENT_LOG_CAPACITY as u64 + 10);
    }

    #[test]
    fn zero_capacity_disables_the_log() {
        let mut s = sim().with_event_capacity(0);
        s.add_entity(creature(0)).unwrap();
        s.frame(16.0);
        assert_eq!(s.events().len(), 0);
        assert_eq!(s.dropped_events(), 2);
    }

    #[test]
    fn host_access_keeps_scene_in_step_with_entities() {
        let mut s = sim();
        s.add_entity(creature(0)).unwrap();
        let removed = s.remove_entity(EntityId(0)).unwrap();

        s.set_controller(Box::new(OrbitControls::new(Vec3::ZERO, 0.5, 5.0)));
        s.handle_input(&InputEvent::PointerDown(PointerButton::Primary));
        s.handle_input(&InputEvent::PointerMove { dx: 40.0, dy: 0.0 });
        s.surface_mut().set_logical_size(640.0, 480.0);
        s.frame(16.0);

        assert!(!removed.pivot().borrow().is_attached());
        assert_eq!(s.entity_count(), 0);
        assert!(s.renderer().scene().is_empty());
        assert_eq!(s.renderer().scene().renderable_count(), 0);
        assert_eq!(s.renderer().surface().backing_size().width, 640);
        assert!(s.renderer().camera().position().x.abs() > 1e-3);
    }

    #[test]
    fn allocation_fails_once_ids_run_out() {
        let mut s = sim();
        s.add_entity(creature(u64::MAX)).unwrap();
        assert!(matches!(s.allocate_id(), Err(SimulationError::IdsExhausted)));
        assert!(matches!(
            s.add_entity(creature(u64::MAX)),
            Err(SimulationError::DuplicateEntity(_))
        ));
        assert_eq!(s.entity_count(), 1);
    }

    #[test]
    fn update_order_follows_ids_not_insertion() {
        struct Recorder {
            core: EntityCore,
            log: Rc<RefCell<Vec<EntityId>>>,
        }
        impl Entity for Recorder {
            fn core(&self) -> &EntityCore {
                &self.core
            }
            fn core_mut(&mut self) -> &mut EntityCore {
                &mut self.core
            }
            fn update(&mut self, _time: f64) {
                self.log.borrow_mut().push(self.core.id());
            }
        }

        let mut s = sim();
        let log = Rc::new(RefCell::new(Vec::new()));
        for id in [5, 1, 3] {
            s.add_entity(Box::new(Recorder {
                core: EntityCore::new(EntityId(id), "recorder"),
                log: Rc::clone(&log),
            }))
            .unwrap();
        }
        s.frame(16.0);
        assert_eq!(*log.borrow(), vec![EntityId(1), EntityId(3), EntityId(5)]);
    }

    #[test]
    fn renderer_with_stray_nodes_is_refused() {
        let mut renderer = Renderer::new(
            HeadlessSurface::new(&SurfaceConfig::default()),
            DebugTextBackend::new(),
            &CameraConfig::default(),
        )
        .unwrap();
        let stray = NodeHandle::new("stray");
        renderer.add_mesh(&stray).unwrap();
        assert!(matches!(
            Simulation::new(renderer),
            Err(SimulationError::SceneNotEmpty(1))
        ));
    }
}
