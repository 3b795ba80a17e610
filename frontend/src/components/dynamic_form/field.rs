use super::date_time_input::DateTimeInput;
use super::field_dom_id;
use shared::form::{ColumnItems, DropdownOption};
use shared::{FieldDescriptor, FieldKind, FieldValue, FormState};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// What a field needs from its batch item to render.
pub(super) struct FieldContext<'a> {
    pub form: &'a FormState,
    pub index: usize,
    pub locked: bool,
    pub on_change: &'a Callback<(usize, String, FieldValue)>,
}

impl FieldContext<'_> {
    fn dom_id(&self, name: &str) -> String {
        let index = self.form.is_batch().then_some(self.index);
        field_dom_id(self.form.model().name(), name, index)
    }

    fn emitter(&self, name: &str) -> Callback<FieldValue> {
        let index = self.index;
        let name = name.to_string();
        self.on_change
            .reform(move |value: FieldValue| (index, name.clone(), value))
    }
}

pub(super) fn render_field(field: &FieldDescriptor, ctx: &FieldContext) -> Html {
    match &field.kind {
        FieldKind::Column { items } => render_column(items, ctx),
        FieldKind::Input => wrap(field, ctx, text_input(field, ctx)),
        FieldKind::TextArea => wrap(field, ctx, text_area(field, ctx)),
        FieldKind::Dropdown { options } => wrap(field, ctx, dropdown(field, options, ctx)),
        FieldKind::DateTime { .. } => wrap(field, ctx, date_time(field, ctx)),
    }
}

fn render_column(items: &ColumnItems, ctx: &FieldContext) -> Html {
    let side = |fields: &[FieldDescriptor]| -> Html {
        fields.iter().map(|field| render_field(field, ctx)).collect()
    };
    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="form-column">{side(&items.left)}</div>
            <div class="form-column">{side(&items.right)}</div>
        </div>
    }
}

fn wrap(field: &FieldDescriptor, ctx: &FieldContext, control: Html) -> Html {
    let id = ctx.dom_id(&field.name);
    let error = ctx.form.error(ctx.index, &field.name);
    html! {
        <div class={classes!("form-field", error.is_some().then_some("has-error"))}>
            <label for={id}>
                {field.display_label()}
                if field.required {
                    <span class="required">{" *"}</span>
                }
            </label>
            {control}
            if let Some(error) = error {
                <p class="field-error text-sm text-red-600">{error.to_string()}</p>
            }
        </div>
    }
}

fn current_value(field: &FieldDescriptor, ctx: &FieldContext) -> FieldValue {
    ctx.form
        .value(ctx.index, &field.name)
        .cloned()
        .unwrap_or_default()
}

fn is_disabled(field: &FieldDescriptor, ctx: &FieldContext) -> bool {
    field.disabled || ctx.locked
}

fn text_input(field: &FieldDescriptor, ctx: &FieldContext) -> Html {
    let emit = ctx.emitter(&field.name);
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        emit.emit(FieldValue::text(input.value()));
    });
    html! {
        <input
            type="text"
            class="form-input"
            id={ctx.dom_id(&field.name)}
            value={current_value(field, ctx).display("")}
            placeholder={field.placeholder.clone()}
            disabled={is_disabled(field, ctx)}
            {oninput}
        />
    }
}

fn text_area(field: &FieldDescriptor, ctx: &FieldContext) -> Html {
    let emit = ctx.emitter(&field.name);
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        emit.emit(FieldValue::text(input.value()));
    });
    html! {
        <textarea
            class="form-textarea"
            rows="4"
            id={ctx.dom_id(&field.name)}
            value={current_value(field, ctx).display("")}
            placeholder={field.placeholder.clone()}
            disabled={is_disabled(field, ctx)}
            {oninput}
        />
    }
}

fn dropdown(field: &FieldDescriptor, options: &[DropdownOption], ctx: &FieldContext) -> Html {
    let emit = ctx.emitter(&field.name);
    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        emit.emit(FieldValue::text(select.value()));
    });
    let selected = current_value(field, ctx).display("");
    let placeholder = field
        .placeholder
        .clone()
        .unwrap_or_else(|| "Select...".to_string());
    html! {
        <select
            class="form-select"
            id={ctx.dom_id(&field.name)}
            disabled={is_disabled(field, ctx)}
            {onchange}
        >
            <option value="" selected={selected.is_empty()}>{placeholder}</option>
            {options.iter().map(|option| html! {
                <option value={option.value.clone()} selected={option.value == selected}>
                    {&option.text}
                </option>
            }).collect::<Html>()}
        </select>
    }
}

fn date_time(field: &FieldDescriptor, ctx: &FieldContext) -> Html {
    let constraint = ctx
        .form
        .picker_constraint(ctx.index, &field.name)
        .unwrap_or_default();
    html! {
        <DateTimeInput
            id={ctx.dom_id(&field.name)}
            value={current_value(field, ctx)}
            format={field.date_time_format().to_string()}
            constraint={constraint}
            placeholder={field.placeholder.clone()}
            disabled={is_disabled(field, ctx)}
            on_change={ctx.emitter(&field.name)}
        />
    }
}
