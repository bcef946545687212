// src/web/images.rs
//! Image loading for the texture loader.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, FutureExt};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

use crate::error::describe_js;
use crate::loader::ItemFuture;

type Outcome = Result<(), String>;

/// Loads `url` into a new `HtmlImageElement`. Resolves on `load`, fails on
/// `error`.
pub fn load_image(url: &str) -> ItemFuture<HtmlImageElement> {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(err) => return future::ready(Err(describe_js(&err))).boxed_local(),
    };

    let (sender, receiver) = oneshot::channel::<Outcome>();
    // Whichever handler fires first takes the sender.
    let sender = Rc::new(RefCell::new(Some(sender)));

    let on_load = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |_event: Event| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(Ok(()));
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let on_error = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |event: Event| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(Err(format!("image `{}` event", event.type_())));
            }
        }) as Box<dyn FnMut(Event)>)
    };

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(url);

    let url = url.to_owned();
    async move {
        let outcome = receiver
            .await
            .unwrap_or_else(|_| Err("image handlers dropped".to_string()));
        image.set_onload(None);
        image.set_onerror(None);
        // The handlers must outlive the request; release them only now.
        drop((on_load, on_error));
        outcome
            .map(|()| image)
            .map_err(|reason| format!("{}: {}", url, reason))
    }
    .boxed_local()
}
