#![cfg(target_arch = "wasm32")]
use instant::Instant;
use room_core::constants::DEFAULT_BACKGROUND;
use room_core::{room_events, Camera, Rgb, Room, RoomServices, SceneStore};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod instances;
mod layout;
mod presenter;
mod render;

use audio::HtmlSoundtrack;
use presenter::DomPresenter;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn master_seed() -> anyhow::Result<u64> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {e}"))?;
    Ok(u64::from_le_bytes(bytes))
}

fn wire_panel_action(presenter: &Rc<RefCell<DomPresenter>>, room: &Rc<RefCell<Room>>) {
    let room = Rc::downgrade(room);
    presenter.borrow_mut().on_action(move || {
        let Some(room) = room.upgrade() else {
            return;
        };
        match room.try_borrow_mut() {
            Ok(mut room) => room.panel_action(),
            Err(_) => log::warn!("[panel] action dropped: room busy"),
        };
    });
}

fn wire_caption_close(presenter: &Rc<RefCell<DomPresenter>>, room: &Rc<RefCell<Room>>) {
    let room = Rc::downgrade(room);
    presenter.borrow_mut().on_close(move || {
        let Some(room) = room.upgrade() else {
            return;
        };
        match room.try_borrow_mut() {
            Ok(mut room) => room.close_caption(),
            Err(_) => log::warn!("[caption] close dropped: room busy"),
        };
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let scene = Rc::new(RefCell::new(SceneStore::new(Rgb(DEFAULT_BACKGROUND))));
    let registry = layout::spawn_room(&mut *scene.borrow_mut())?;
    let presenter = Rc::new(RefCell::new(DomPresenter::new(&document, canvas.clone())?));
    let soundtrack = Rc::new(RefCell::new(HtmlSoundtrack::new()));
    let services = RoomServices {
        scene: scene.clone(),
        presenter: presenter.clone(),
        soundtrack,
    };

    let camera = Camera::room_default(input::aspect_of(canvas.width(), canvas.height()));
    let seed = master_seed()?;
    let room = Rc::new(RefCell::new(Room::new(
        services,
        registry,
        room_events(),
        camera,
        seed,
    )));

    wire_panel_action(&presenter, &room);
    wire_caption_close(&presenter, &room);
    events::wire_pointer_handlers(&canvas, &room);
    events::wire_global_keydown(room.clone());

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("running without a renderer; interaction still works");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        room,
        scene,
        canvas,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
