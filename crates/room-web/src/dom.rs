use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fetches an element by id, or creates it under `<body>` with the given style.
pub fn ensure_element(
    document: &web::Document,
    tag: &str,
    id: &str,
    style: &str,
) -> anyhow::Result<web::HtmlElement> {
    if let Some(existing) = document.get_element_by_id(id) {
        return existing
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("#{id} is not an HtmlElement: {:?}", e));
    }
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create {tag}: {:?}", e))?;
    el.set_id(id);
    _ = el.set_attribute("style", style);
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append #{id}: {:?}", e))?;
    el.dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not an HtmlElement: {:?}", e))
}

#[inline]
pub fn set_shown(el: &web::HtmlElement, shown: bool) {
    _ = el
        .style()
        .set_property("display", if shown { "block" } else { "none" });
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
