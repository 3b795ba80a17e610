//! Renders a [`FormModel`] as one field-set or as repeated batch items and
//! hands the mapped payload to the caller's submit handler.

mod batch_item;
mod date_time_input;
mod field;

use batch_item::BatchItem;
use shared::form::keys::batch_key;
use shared::{
    BatchConfig, FieldValue, FormError, FormMode, FormModel, FormState, InitialValues,
    SubmissionPayload,
};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub use date_time_input::DateTimeInput;

pub type SubmitFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

/// Async submit callback. The future resolving to `Err` keeps the form values
/// so the user can retry.
#[derive(Clone)]
pub struct SubmitHandler(Rc<dyn Fn(SubmissionPayload) -> SubmitFuture>);

impl SubmitHandler {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(SubmissionPayload) -> Fut + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        Self(Rc::new(move |payload| Box::pin(handler(payload))))
    }

    pub fn call(&self, payload: SubmissionPayload) -> SubmitFuture {
        (self.0)(payload)
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// DOM id of a field control; batch forms suffix the name with the item index.
pub fn field_dom_id(form_name: &str, name: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{}-{}", form_name, batch_key(name, index)),
        None => format!("{}-{}", form_name, name),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DynamicFormProps {
    /// Construction results are passed through so a bad model renders an
    /// error panel instead of a broken form.
    pub model: Result<FormModel, FormError>,
    pub mode: FormMode,
    #[prop_or_default]
    pub initial_values: InitialValues,
    #[prop_or_default]
    pub batch_config: Option<Result<BatchConfig, FormError>>,
    pub on_submit: SubmitHandler,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
    #[prop_or_default]
    pub on_back: Option<Callback<()>>,
    #[prop_or_default]
    pub submitting: bool,
    #[prop_or(AttrValue::from("Submit"))]
    pub submit_label: AttrValue,
    #[prop_or(AttrValue::from("Add item"))]
    pub add_label: AttrValue,
}

#[derive(Clone, Debug, PartialEq)]
struct Submission {
    ticket: u32,
    payload: SubmissionPayload,
}

#[derive(Clone, Debug, PartialEq)]
struct FormStore {
    form: Result<FormState, FormError>,
    submission: Option<Submission>,
    tickets: u32,
}

impl FormStore {
    fn from_props(props: &DynamicFormProps) -> Self {
        let form = props.model.clone().and_then(|model| {
            let batch = props.batch_config.clone().transpose()?;
            Ok(FormState::new(
                model,
                props.mode,
                props.initial_values.clone(),
                batch,
            ))
        });
        if let Err(e) = &form {
            log::error!("Form cannot be rendered: {}", e);
        }
        Self {
            form,
            submission: None,
            tickets: 0,
        }
    }
}

enum FormAction {
    SetValue {
        index: usize,
        name: String,
        value: FieldValue,
    },
    AddItem,
    RemoveItem(usize),
    Submit,
    SubmitFinished,
    Reset(FormStore),
}

impl Reducible for FormStore {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let FormAction::Reset(store) = action {
            return Rc::new(store);
        }
        let mut next = (*self).clone();
        let Ok(form) = next.form.as_mut() else {
            return self;
        };

        match action {
            FormAction::SetValue { index, name, value } => {
                form.set_value(index, &name, value);
            }
            FormAction::AddItem => {
                form.add_item();
            }
            FormAction::RemoveItem(index) => {
                form.remove_item(index);
            }
            FormAction::Submit => {
                if let Some(payload) = form.begin_submit() {
                    next.tickets += 1;
                    next.submission = Some(Submission {
                        ticket: next.tickets,
                        payload,
                    });
                }
            }
            FormAction::SubmitFinished => {
                form.finish_submit();
                next.submission = None;
            }
            FormAction::Reset(_) => {}
        }
        Rc::new(next)
    }
}

#[function_component(DynamicForm)]
pub fn dynamic_form(props: &DynamicFormProps) -> Html {
    let store = use_reducer_eq({
        let props = props.clone();
        move || FormStore::from_props(&props)
    });

    // A new model or new initial values start a fresh form.
    {
        let dispatcher = store.dispatcher();
        let props = props.clone();
        use_effect_with(
            (
                props.model.clone(),
                props.mode,
                props.initial_values.clone(),
                props.batch_config.clone(),
            ),
            move |_| {
                dispatcher.dispatch(FormAction::Reset(FormStore::from_props(&props)));
                || ()
            },
        );
    }

    {
        let dispatcher = store.dispatcher();
        let handler = props.on_submit.clone();
        let submission = store.submission.clone();
        use_effect_with(submission.as_ref().map(|s| s.ticket), move |_| {
            if let Some(Submission { ticket, payload }) = submission {
                log::debug!("Submitting form (ticket {})", ticket);
                spawn_local(async move {
                    if let Err(e) = handler.call(payload).await {
                        log::warn!("Submission {} failed: {}", ticket, e);
                    }
                    dispatcher.dispatch(FormAction::SubmitFinished);
                });
            }
            || ()
        });
    }

    let form = match &store.form {
        Ok(form) => form,
        Err(e) => {
            return html! {
                <div class="form-error-panel" role="alert">
                    <h3>{"This form cannot be displayed"}</h3>
                    <p>{e.to_string()}</p>
                </div>
            };
        }
    };

    let on_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(index, name, value): (usize, String, FieldValue)| {
            dispatcher.dispatch(FormAction::SetValue { index, name, value });
        })
    };

    let on_remove = {
        let dispatcher = store.dispatcher();
        Callback::from(move |index: usize| dispatcher.dispatch(FormAction::RemoveItem(index)))
    };

    let on_add = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FormAction::AddItem))
    };

    let on_submit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            dispatcher.dispatch(FormAction::Submit);
        })
    };

    let busy = props.submitting || form.is_pending();
    let items = (0..form.batch_count())
        .map(|index| {
            html! {
                <BatchItem
                    key={index}
                    form={form.clone()}
                    index={index}
                    busy={busy}
                    on_change={on_change.clone()}
                    on_remove={on_remove.clone()}
                />
            }
        })
        .collect::<Html>();

    let nav_button = |label: &'static str, callback: &Option<Callback<()>>| {
        callback.clone().map(|callback| {
            let onclick = Callback::from(move |_: MouseEvent| callback.emit(()));
            html! {
                <button type="button" class="btn btn-secondary" onclick={onclick} disabled={busy}>
                    {label}
                </button>
            }
        })
    };

    html! {
        <form class="dynamic-form" id={form.model().name().to_string()} onsubmit={on_submit} novalidate={true}>
            {items}
            if form.is_batch() && form.can_add() {
                <button type="button" class="btn btn-outline add-item" onclick={on_add} disabled={busy}>
                    {"+ "}{props.add_label.clone()}
                </button>
            }
            <div class="form-actions flex gap-2 mt-4">
                {nav_button("Back", &props.on_back)}
                {nav_button("Cancel", &props.on_cancel)}
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    if busy { {"Saving..."} } else { {props.submit_label.clone()} }
                </button>
            </div>
        </form>
    }
}
