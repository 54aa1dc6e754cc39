use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::Callback;

use crate::config::SiteConfig;
use crate::dom::listener::Listener;
use crate::dom::page;
use crate::error::SiteError;
use crate::form::controller::{Effect, FormController, Transition};
use crate::form::field::{Field, FieldKind, DEFAULT_LABEL};
use crate::notifications::ToastAction;

const ERROR_COLOR: &str = "#ef4444";

/// One form control plus the key its effects are addressed by.
struct Control {
    key: String,
    element: Element,
}

impl Control {
    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn label(&self, form: &Element) -> String {
        if let Some(placeholder) = self.element.get_attribute("placeholder").filter(|p| !p.trim().is_empty()) {
            return placeholder;
        }
        let id = self.element.id();
        if !id.is_empty() {
            let for_label = form
                .query_selector(&format!("label[for=\"{}\"]", id))
                .ok()
                .flatten()
                .and_then(|label| label.text_content())
                .map(|text| text.trim().trim_end_matches('*').trim().to_string())
                .filter(|text| !text.is_empty());
            if let Some(text) = for_label {
                return text;
            }
        }
        DEFAULT_LABEL.to_string()
    }

    fn read(&self, form: &Element) -> Field {
        let kind = FieldKind::from_element(
            &self.element.tag_name(),
            self.element.get_attribute("type").as_deref(),
        );
        let field = Field::new(self.key.clone(), kind)
            .labelled(self.label(form))
            .with_value(self.value());
        if self.element.has_attribute("required") {
            field.required()
        } else {
            field
        }
    }
}

struct FormView {
    form: HtmlFormElement,
    controls: Vec<Control>,
    submit: Option<Element>,
    errors: HashMap<String, Element>,
}

impl FormView {
    fn fields(&self) -> Vec<Field> {
        self.controls.iter().map(|c| c.read(&self.form)).collect()
    }

    fn field(&self, key: &str) -> Option<Field> {
        self.control(key).map(|c| c.read(&self.form))
    }

    fn control(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.key == key)
    }

    fn submit_label(&self) -> String {
        match &self.submit {
            Some(button) => match button.dyn_ref::<HtmlInputElement>() {
                Some(input) => input.value(),
                None => button.text_content().unwrap_or_default(),
            },
            None => String::new(),
        }
    }

    fn set_submit(&self, label: &str, busy: bool) -> Result<(), SiteError> {
        let Some(button) = &self.submit else {
            return Ok(());
        };
        match button.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(label),
            None => button.set_text_content(Some(label)),
        }
        if busy {
            button.set_attribute("disabled", "")?;
        } else {
            button.remove_attribute("disabled")?;
        }
        Ok(())
    }

    fn show_error(&mut self, key: &str, message: &str) -> Result<(), SiteError> {
        self.clear_error(key)?;
        let Some(control) = self.control(key) else {
            return Ok(());
        };
        let field = control.element.clone();
        let parent = field
            .parent_node()
            .ok_or_else(|| SiteError::MissingElement(format!("parent of field `{}`", key)))?;

        let error = page::document()?.create_element("div")?;
        error.set_class_name("field-error");
        error.set_text_content(Some(message));
        page::set_styles(
            &error,
            &[("color", ERROR_COLOR), ("font-size", "0.875rem"), ("margin-top", "0.25rem")],
        )?;
        page::set_styles(&field, &[("border-color", ERROR_COLOR)])?;
        parent.insert_before(&error, field.next_sibling().as_ref())?;
        self.errors.insert(key.to_string(), error);
        Ok(())
    }

    fn clear_error(&mut self, key: &str) -> Result<(), SiteError> {
        if let Some(error) = self.errors.remove(key) {
            error.remove();
        }
        if let Some(control) = self.control(key) {
            page::set_styles(&control.element, &[("border-color", "")])?;
        }
        Ok(())
    }
}

struct FormBinding {
    controller: FormController,
    view: FormView,
    notify: Callback<ToastAction>,
    pending: Option<Timeout>,
}

type Shared = Rc<RefCell<FormBinding>>;

/// Wires the contact form: blur validates, typing clears, submit runs the
/// controller and applies whatever it asks for.
pub fn bind(config: &SiteConfig, notify: Callback<ToastAction>) -> Result<Vec<Listener>, SiteError> {
    let form: HtmlFormElement = page::query(&config.selectors.contact_form)?
        .dyn_into()
        .map_err(|_| SiteError::Dom(format!("`{}` is not a form", config.selectors.contact_form)))?;

    let controls: Vec<Control> = page::query_all_in(&form, &config.selectors.form_fields)?
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let key = element
                .get_attribute("name")
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| match element.id() {
                    id if !id.is_empty() => id,
                    _ => format!("field-{}", i),
                });
            Control { key, element }
        })
        .collect();

    let submit = match page::query_all_in(&form, &config.selectors.submit_button)?.into_iter().next() {
        Some(button) => Some(button),
        None => {
            warn!("no `{}` in contact form, submit feedback disabled", config.selectors.submit_button);
            None
        }
    };

    let mut listeners = Vec::new();
    let targets: Vec<(String, Element)> =
        controls.iter().map(|c| (c.key.clone(), c.element.clone())).collect();

    let shared: Shared = Rc::new(RefCell::new(FormBinding {
        controller: FormController::new(config.timings.submit_delay),
        view: FormView { form: form.clone(), controls, submit, errors: HashMap::new() },
        notify,
        pending: None,
    }));

    {
        let shared = shared.clone();
        listeners.push(Listener::new(&form, "submit", move |e: Event| {
            e.prevent_default();
            let transition = {
                let mut binding = shared.borrow_mut();
                let fields = binding.view.fields();
                let label = binding.view.submit_label();
                let transition = binding.controller.submit(&fields, &label);
                debug!("submit: {:?}, now {:?}", transition.trace, binding.controller.state());
                transition
            };
            run(&shared, transition);
        })?);
    }

    for (key, element) in targets {
        {
            let shared = shared.clone();
            let key = key.clone();
            listeners.push(Listener::new(&element, "blur", move |_| {
                let checked = {
                    let binding = shared.borrow();
                    binding.view.field(&key).map(|f| binding.controller.validate_field(&f))
                };
                if let Some((result, effect)) = checked {
                    debug!("{} valid: {}", result.field_name, result.valid);
                    apply(&shared, effect);
                }
            })?);
        }
        {
            let shared = shared.clone();
            listeners.push(Listener::new(&element, "input", move |_| {
                let effect = shared.borrow().controller.field_input(&key);
                apply(&shared, effect);
            })?);
        }
    }

    info!("contact form bound");
    Ok(listeners)
}

fn run(shared: &Shared, transition: Transition) {
    for effect in transition.effects {
        apply(shared, effect);
    }
}

fn apply(shared: &Shared, effect: Effect) {
    let result = match effect {
        Effect::ShowFieldError { field, message } => shared.borrow_mut().view.show_error(&field, &message),
        Effect::ClearFieldError { field } => shared.borrow_mut().view.clear_error(&field),
        Effect::SetSubmitBusy { label } => shared.borrow().view.set_submit(&label, true),
        Effect::RestoreSubmit { label } => shared.borrow().view.set_submit(&label, false),
        Effect::ResetFields => {
            shared.borrow().view.form.reset();
            Ok(())
        }
        Effect::Notify { message, kind } => {
            let notify = shared.borrow().notify.clone();
            notify.emit(ToastAction::Show { message, kind });
            Ok(())
        }
        Effect::ScheduleCompletion { delay_ms } => {
            let weak = Rc::downgrade(shared);
            let timer = Timeout::new(delay_ms, move || {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let transition = shared.borrow_mut().controller.complete_submission();
                info!("contact form sent: {:?}", transition.trace);
                run(&shared, transition);
            });
            // submit is refused while one is in flight, so any timer replaced
            // here has already fired
            if shared.borrow_mut().pending.replace(timer).is_some() {
                debug!("released previous completion timer");
            }
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("form update failed: {}", e);
    }
}
