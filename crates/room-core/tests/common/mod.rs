// Shared fakes for the host-side room tests.

#![allow(dead_code)]

use glam::{Mat4, Vec3};
use room_core::*;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Scene store that also records ambient writes into a shared log.
pub struct RecordingScene {
    pub store: SceneStore,
    pub log: Log,
}

impl RecordingScene {
    pub fn new(log: Log) -> Self {
        Self {
            store: SceneStore::new(Rgb(constants::DEFAULT_BACKGROUND)),
            log,
        }
    }
}

impl SceneGraph for RecordingScene {
    fn spawn(&mut self, parent: Option<NodeId>, kind: NodeKind, transform: Transform) -> NodeId {
        self.store.spawn(parent, kind, transform)
    }
    fn despawn(&mut self, node: NodeId) {
        self.store.despawn(node)
    }
    fn contains(&self, node: NodeId) -> bool {
        self.store.contains(node)
    }
    fn transform(&self, node: NodeId) -> Option<Transform> {
        self.store.transform(node)
    }
    fn set_transform(&mut self, node: NodeId, transform: Transform) {
        self.store.set_transform(node, transform)
    }
    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.store.set_visible(node, visible)
    }
    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        self.store.set_opacity(node, opacity)
    }
    fn set_points(&mut self, node: NodeId, positions: &[Vec3]) {
        self.store.set_points(node, positions)
    }
    fn pick_boxes(&self, node: NodeId) -> SmallVec<[(Mat4, Vec3); 4]> {
        self.store.pick_boxes(node)
    }
    fn set_background(&mut self, color: Rgb) {
        self.log.borrow_mut().push(format!("background {:06x}", color.0));
        self.store.set_background(color)
    }
    fn set_fog(&mut self, fog: Option<Fog>) {
        self.store.set_fog(fog)
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub caption: Option<String>,
    pub panel: Option<(String, Option<String>)>,
    pub pointer: bool,
    pub captions: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn show_caption(&mut self, text: &str) {
        self.caption = Some(text.to_string());
        self.captions.push(text.to_string());
    }
    fn hide_caption(&mut self) {
        self.caption = None;
    }
    fn show_panel(&mut self, text: &str, action: Option<&str>) {
        self.panel = Some((text.to_string(), action.map(str::to_string)));
    }
    fn hide_panel(&mut self) {
        self.panel = None;
    }
    fn set_pointer_cursor(&mut self, pointer: bool) {
        self.pointer = pointer;
    }
}

#[derive(Default)]
pub struct RecordingSoundtrack {
    pub playing: Option<String>,
    pub stops: usize,
}

impl Soundtrack for RecordingSoundtrack {
    fn play_loop(&mut self, src: &str) {
        self.playing = Some(src.to_string());
    }
    fn stop(&mut self) {
        self.playing = None;
        self.stops += 1;
    }
}

/// Wraps a mini-event and logs `start <name>` / `stop <name>`.
pub struct ScriptedEvent {
    pub name: &'static str,
    pub log: Log,
    pub fail: bool,
}

impl ScriptedEvent {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(name: &'static str, log: &Log) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }
}

impl MiniEvent for ScriptedEvent {
    fn start(&self, _ctx: &EventContext) -> Result<StopHandle, RoomError> {
        if self.fail {
            self.log.borrow_mut().push(format!("fail {}", self.name));
            return Err(RoomError::Variant {
                id: self.name.to_string(),
                reason: "scripted to fail".into(),
            });
        }
        self.log.borrow_mut().push(format!("start {}", self.name));
        let log = self.log.clone();
        let name = self.name;
        Ok(StopHandle::new(move || {
            log.borrow_mut().push(format!("stop {name}"))
        }))
    }
}

/// A room built from plain boxes laid out along X, one per id, facing the
/// default camera.
pub struct Fixture {
    pub room: Room,
    pub scene: Rc<RefCell<RecordingScene>>,
    pub presenter: Rc<RefCell<RecordingPresenter>>,
    pub soundtrack: Rc<RefCell<RecordingSoundtrack>>,
    pub log: Log,
    pub nodes: Vec<NodeId>,
}

pub const BOX: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// World position for the `i`-th of `n` fixture boxes.
pub fn slot(i: usize, n: usize) -> Vec3 {
    let x = (i as f32 - (n as f32 - 1.0) / 2.0) * 1.5;
    Vec3::new(x, 1.0, 0.0)
}

pub fn fixture(ids: &[&str], table: EventTable) -> Fixture {
    fixture_with_log(ids, table, new_log())
}

pub fn fixture_with_log(ids: &[&str], table: EventTable, log: Log) -> Fixture {
    let scene = Rc::new(RefCell::new(RecordingScene::new(log.clone())));
    let presenter = Rc::new(RefCell::new(RecordingPresenter::default()));
    let soundtrack = Rc::new(RefCell::new(RecordingSoundtrack::default()));

    let mut registry = InteractableRegistry::new();
    let mut nodes = Vec::new();
    {
        let mut s = scene.borrow_mut();
        for (i, id) in ids.iter().enumerate() {
            let node = s.spawn(
                None,
                NodeKind::Block {
                    size: BOX,
                    color: Rgb(0x8b5a2b),
                },
                Transform::from_translation(slot(i, ids.len())),
            );
            registry
                .register(*id, node, &*s)
                .expect("fixture ids are unique");
            nodes.push(node);
        }
    }

    let services = RoomServices {
        scene: scene.clone(),
        presenter: presenter.clone(),
        soundtrack: soundtrack.clone(),
    };
    let room = Room::new(services, registry, table, Camera::room_default(16.0 / 9.0), 7);
    log.borrow_mut().clear();
    Fixture {
        room,
        scene,
        presenter,
        soundtrack,
        log,
        nodes,
    }
}

impl Fixture {
    /// NDC of the centre of the box registered as `index`.
    pub fn ndc_of(&self, index: usize) -> glam::Vec2 {
        let world = self.scene.borrow().store.world_matrix(self.nodes[index]).unwrap();
        let clip = self.room.camera().view_proj() * world.w_axis;
        glam::Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }

    /// Hover the box registered as `index`, click it and run one tick.
    pub fn click(&mut self, index: usize, now_ms: f64) {
        let ndc = self.ndc_of(index);
        self.room.pointer_move(ndc);
        self.room.tick(now_ms);
        self.room.pointer_click();
        self.room.tick(now_ms + 16.0);
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn background(&self) -> u32 {
        self.scene.borrow().store.background().0
    }

    pub fn live_nodes(&self) -> usize {
        self.scene.borrow().store.len()
    }

    pub fn slot_count(&self) -> usize {
        self.scene.borrow().store.slot_count()
    }
}
