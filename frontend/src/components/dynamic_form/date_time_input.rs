use crate::flatpickr::{fp_destroy, fp_init, fp_set_value};
use shared::form::PickerConstraint;
use shared::FieldValue;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DateTimeInputProps {
    pub id: String,
    pub value: FieldValue,
    /// `DD/MM/YYYY HH:mm` style display format
    pub format: String,
    #[prop_or_default]
    pub constraint: PickerConstraint,
    #[prop_or_default]
    pub placeholder: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<FieldValue>,
}

/// Text input upgraded to a flatpickr picker.
///
/// The picker is rebuilt whenever its constraint changes, since flatpickr
/// reads `minDate` / `maxDate` / `disable` only at init.
#[function_component(DateTimeInput)]
pub fn date_time_input(props: &DateTimeInputProps) -> Html {
    let display = props.value.display(&props.format);

    {
        let on_change = props.on_change.clone();
        let display = display.clone();
        use_effect_with(
            (props.id.clone(), props.format.clone(), props.constraint, props.disabled),
            move |(id, format, constraint, disabled)| {
                let id = id.clone();
                let on_close = Closure::<dyn Fn(JsValue, JsValue, JsValue)>::new(
                    move |_selected: JsValue, date_str: JsValue, _instance: JsValue| {
                        if let Some(text) = date_str.as_string() {
                            on_change.emit(FieldValue::text(text));
                        }
                    },
                );

                if !*disabled {
                    let initial = (!display.is_empty()).then_some(display.as_str());
                    if let Err(e) = fp_init(
                        &id,
                        initial,
                        format,
                        *constraint,
                        Some(JsValue::from(on_close.as_ref())),
                    ) {
                        log::error!("Failed to initialize date picker {}: {:?}", id, e);
                    }
                }

                move || {
                    let _ = fp_destroy(&id);
                    drop(on_close);
                }
            },
        );
    }

    // Keep the picker in step with values set from outside it
    {
        let id = props.id.clone();
        use_effect_with(display.clone(), move |display| {
            let _ = fp_set_value(&id, display);
            || ()
        });
    }

    // Typed input when the picker is unavailable
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(FieldValue::text(input.value()));
        })
    };

    html! {
        <input
            type="text"
            class="form-input"
            id={props.id.clone()}
            value={display}
            placeholder={props.placeholder.clone().unwrap_or_else(|| props.format.clone())}
            disabled={props.disabled}
            autocomplete="off"
            {onchange}
        />
    }
}
