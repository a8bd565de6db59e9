use crate::input;
use room_core::Room;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, room: &Rc<RefCell<Room>>) {
    wire_pointermove(canvas, room);
    wire_pointerleave(canvas, room);
    wire_pointerdown(canvas, room);
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, room: &Rc<RefCell<Room>>) {
    let room = room.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = target.get_bounding_client_rect();
        let x_css = ev.client_x() as f32 - rect.left() as f32;
        let y_css = ev.client_y() as f32 - rect.top() as f32;
        let Ok(mut room) = room.try_borrow_mut() else {
            return;
        };
        match input::css_to_ndc(x_css, y_css, rect.width() as f32, rect.height() as f32) {
            Some(ndc) => room.pointer_move(ndc),
            None => room.pointer_leave(),
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(canvas: &web::HtmlCanvasElement, room: &Rc<RefCell<Room>>) {
    let room = room.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Ok(mut room) = room.try_borrow_mut() {
            room.pointer_leave();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, room: &Rc<RefCell<Room>>) {
    let room = room.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        match room.try_borrow_mut() {
            Ok(mut room) => {
                room.pointer_click();
                log::debug!("[click] queued, hovered={:?}", room.hovered_id());
            }
            Err(_) => log::warn!("[click] dropped: room busy"),
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}
