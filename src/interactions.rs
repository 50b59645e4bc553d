use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, Document, Element, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, UrlSearchParams,
};

use crate::clipboard::CopyFeedback;
use crate::config::{attrs, SiteConfig};
use crate::error::InteractionError;
use crate::forms::{
    submit_form, FormFields, FormMethod, FormSubmission, FormTransport, SubmitControl,
};
use crate::logging::{log_event, LogLevel};
use crate::notify::{DomNotifier, Notifier, Severity, Toast};
use crate::util::browser::{select_all, set_timeout};

const LOADED_CLASS: &str = "loaded";

struct GlooTransport {
    body: FormData,
}

impl FormTransport for GlooTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<u16, InteractionError> {
        let network = |error: gloo_net::Error| InteractionError::Network(error.to_string());

        let response = match submission.method {
            FormMethod::Post => Request::post(submission.action.as_str())
                .header("Accept", "application/json")
                .body(self.body.clone())
                .map_err(network)?
                .send()
                .await
                .map_err(network)?,
            FormMethod::Get => {
                let mut url = submission.action.clone();
                let params = UrlSearchParams::new_with_str_sequence_sequence(self.body.as_ref());
                if let Ok(params) = params {
                    url.set_query(Some(&String::from(params.to_string())));
                }
                Request::get(url.as_str())
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(network)?
            }
        };

        Ok(response.status())
    }
}

struct ButtonControl(Option<HtmlButtonElement>);

impl SubmitControl for ButtonControl {
    fn label(&self) -> String {
        self.0
            .as_ref()
            .and_then(|button| button.text_content())
            .unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        if let Some(button) = &self.0 {
            button.set_text_content(Some(label));
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = &self.0 {
            button.set_disabled(disabled);
        }
    }
}

struct DomForm(HtmlFormElement);

impl FormFields for DomForm {
    fn reset(&self) {
        self.0.reset();
    }
}

fn submit_button(form: &HtmlFormElement) -> Option<HtmlButtonElement> {
    form.query_selector("button[type='submit'], button:not([type])")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
}

pub fn submit_async_form(form: HtmlFormElement, config: Rc<SiteConfig>, notifier: DomNotifier) {
    let page_url = window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let method = form.get_attribute("method").unwrap_or_default();
    let action = form.get_attribute("action").unwrap_or_default();

    let submission = match FormSubmission::new(&method, &action, &page_url) {
        Ok(submission) => submission,
        Err(error) => {
            log_event(
                &config,
                LogLevel::Warn,
                "form_action_rejected",
                serde_json::json!({ "error": error.to_string() }),
            );
            notifier.notify(Toast::new(error.user_message(), Severity::Error));
            return;
        }
    };

    let Ok(body) = FormData::new_with_form(&form) else {
        return;
    };

    let control = ButtonControl(submit_button(&form));
    let transport = GlooTransport { body };
    let fields = DomForm(form);

    spawn_local(async move {
        submit_form(&config, &transport, &control, &fields, &notifier, &submission).await;
    });
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// Looked up dynamically: the API is missing on insecure origins.
pub async fn write_clipboard(text: &str) -> Result<(), InteractionError> {
    let navigator: JsValue = window()
        .ok_or(InteractionError::ClipboardUnavailable)?
        .navigator()
        .into();

    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
        .ok_or(InteractionError::ClipboardUnavailable)?;

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(InteractionError::ClipboardUnavailable)?;

    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|error| InteractionError::ClipboardRejected(describe(&error)))?
        .dyn_into::<Promise>()
        .map_err(|_| InteractionError::ClipboardUnavailable)?;

    JsFuture::from(promise)
        .await
        .map_err(|error| InteractionError::ClipboardRejected(describe(&error)))?;

    Ok(())
}

/// Copies `text` and briefly swaps the button label to confirm.
pub fn copy_with_feedback(
    button: HtmlElement,
    text: String,
    feedback: Rc<RefCell<CopyFeedback>>,
    config: Rc<SiteConfig>,
    notifier: DomNotifier,
) {
    spawn_local(async move {
        match write_clipboard(&text).await {
            Ok(()) => {
                let (label, token) = feedback.borrow_mut().copied();
                button.set_text_content(Some(label));
                let _ = set_timeout(
                    move || {
                        if let Some(label) = feedback.borrow().restore(token) {
                            button.set_text_content(Some(label));
                        }
                    },
                    config.copy_reset_ms,
                );
            }
            Err(error) => {
                log_event(
                    &config,
                    LogLevel::Warn,
                    "clipboard_write_failed",
                    serde_json::json!({ "error": error.to_string() }),
                );
                notifier.notify(Toast::new(error.user_message(), Severity::Error));
            }
        }
    });
}

fn load_deferred(element: &Element) {
    let Some(src) = element.get_attribute(attrs::LAZY_SRC) else {
        return;
    };
    let _ = element.set_attribute("src", &src);
    let _ = element.remove_attribute(attrs::LAZY_SRC);
    let _ = element.class_list().add_1(LOADED_CLASS);
}

pub struct LazyImages {
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl LazyImages {
    pub fn observe(document: &Document) -> Self {
        let images = select_all(document, &format!("img[{}]", attrs::LAZY_SRC));

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    load_deferred(&target);
                    observer.unobserve(&target);
                }
            },
        );

        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                for image in &images {
                    observer.observe(image);
                }
                Self {
                    observer: Some(observer),
                    _callback: Some(callback),
                }
            }
            Err(_) => {
                for image in &images {
                    load_deferred(image);
                }
                Self {
                    observer: None,
                    _callback: None,
                }
            }
        }
    }
}

impl Drop for LazyImages {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}
