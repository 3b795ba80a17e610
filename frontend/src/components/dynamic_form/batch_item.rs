use super::field::{render_field, FieldContext};
use shared::{FieldValue, FormState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BatchItemProps {
    pub form: FormState,
    pub index: usize,
    /// Submission in flight
    pub busy: bool,
    pub on_change: Callback<(usize, String, FieldValue)>,
    pub on_remove: Callback<usize>,
}

/// One repeated field-set, or the whole form when batching is off.
#[function_component(BatchItem)]
pub fn batch_item(props: &BatchItemProps) -> Html {
    let form = &props.form;
    let index = props.index;
    let read_only = form.is_read_only(index);

    let ctx = FieldContext {
        form,
        index,
        locked: read_only || props.busy,
        on_change: &props.on_change,
    };
    let fields = form
        .model()
        .fields()
        .iter()
        .map(|field| render_field(field, &ctx))
        .collect::<Html>();

    if !form.is_batch() {
        return html! { <div class="form-fields space-y-4">{fields}</div> };
    }

    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(index))
    };

    html! {
        <fieldset class={classes!("batch-item", "border", "rounded-lg", "p-4", "mb-4", read_only.then_some("read-only"))}>
            <legend class="flex items-center gap-2">
                <span class="font-semibold">{format!("Item {}", index + 1)}</span>
                if read_only {
                    <span class="badge badge-gray">{"Already exists"}</span>
                }
            </legend>
            <div class="form-fields space-y-4">{fields}</div>
            if form.can_remove(index) {
                <button
                    type="button"
                    class="btn btn-danger btn-sm mt-2"
                    onclick={on_remove}
                    disabled={props.busy}
                >
                    {"Remove"}
                </button>
            }
        </fieldset>
    }
}
