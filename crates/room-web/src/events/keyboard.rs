use crate::input;
use room_core::Room;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, room: &Rc<RefCell<Room>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    if input::suppresses_default(&key) {
        ev.prevent_default();
    }
    match room.try_borrow_mut() {
        Ok(mut room) => room.key_down(&key),
        Err(_) => log::warn!("[keys] dropped {:?}: room busy", key),
    }
}

pub fn wire_global_keydown(room: Rc<RefCell<Room>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &room);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
