use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use shared::form::value::translate_display_format;
use shared::form::PickerConstraint;
use wasm_bindgen::prelude::*;

// Bridge to the global `flatpickrManager` loaded from index.html

/// Translates a `DD/MM/YYYY HH:mm` style display format into flatpickr tokens.
pub fn to_flatpickr_format(display: &str) -> String {
    translate_display_format(display, ["Y", "d", "m", "H", "i", "S"], |c, out| {
        // flatpickr escapes literal letters with a backslash
        if c.is_ascii_alphabetic() {
            out.push('\\');
        }
        out.push(c);
    })
}

pub fn has_seconds(display: &str) -> bool {
    display.contains("ss")
}

fn manager() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    js_sys::Reflect::get(&window, &JsValue::from_str("flatpickrManager"))
}

fn manager_fn(name: &str) -> Result<(JsValue, js_sys::Function), JsValue> {
    let manager = manager()?;
    let func = js_sys::Reflect::get(&manager, &JsValue::from_str(name))?;
    Ok((manager, func.into()))
}

fn to_js_date(instant: NaiveDateTime) -> js_sys::Date {
    js_sys::Date::new_with_year_month_day_hr_min_sec(
        instant.year() as u32,
        instant.month0() as i32,
        instant.day() as i32,
        instant.hour() as i32,
        instant.minute() as i32,
        instant.second() as i32,
    )
}

fn from_js_day(date: &js_sys::Date) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )
}

fn set(options: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(options, &JsValue::from_str(key), value).map(|_| ())
}

/// Initializes a picker on `element_id`.
///
/// The constraint's bounds become `minDate` / `maxDate` (flatpickr then limits
/// the time on the boundary day) and its day rule becomes a `disable` function.
/// `on_close` receives flatpickr's `(selectedDates, dateStr)` arguments.
pub fn fp_init(
    element_id: &str,
    initial_value: Option<&str>,
    display_format: &str,
    constraint: PickerConstraint,
    on_close: Option<JsValue>,
) -> Result<(), JsValue> {
    let options = js_sys::Object::new();
    set(&options, "enableTime", &JsValue::from_bool(true))?;
    set(&options, "time_24hr", &JsValue::from_bool(true))?;
    set(&options, "enableSeconds", &JsValue::from_bool(has_seconds(display_format)))?;
    set(&options, "dateFormat", &JsValue::from_str(&to_flatpickr_format(display_format)))?;
    set(&options, "allowInput", &JsValue::from_bool(true))?;
    set(&options, "clickOpens", &JsValue::from_bool(true))?;

    if let Some(lower) = constraint.lower_bound() {
        set(&options, "minDate", &to_js_date(lower))?;
    }
    if let Some(upper) = constraint.upper_bound() {
        set(&options, "maxDate", &to_js_date(upper))?;
    }

    let disable_day = Closure::<dyn Fn(js_sys::Date) -> bool>::new(move |date: js_sys::Date| {
        from_js_day(&date)
            .map(|day| constraint.is_day_disabled(day))
            .unwrap_or(false)
    });
    let disable = js_sys::Array::new();
    disable.push(&disable_day.into_js_value());
    set(&options, "disable", &disable)?;

    if let Some(callback) = on_close {
        set(&options, "onClose", &callback)?;
    }

    let (manager, init_func) = manager_fn("init")?;
    let result = init_func.call2(&manager, &JsValue::from_str(element_id), &options)?;
    if result.is_null() {
        return Err(JsValue::from_str("Failed to initialize flatpickr"));
    }

    if let Some(value) = initial_value {
        fp_set_value(element_id, value)?;
    }
    Ok(())
}

pub fn fp_set_value(element_id: &str, value: &str) -> Result<(), JsValue> {
    let (manager, set_value_func) = manager_fn("setValue")?;
    set_value_func.call2(
        &manager,
        &JsValue::from_str(element_id),
        &JsValue::from_str(value),
    )?;
    Ok(())
}

pub fn fp_destroy(element_id: &str) -> Result<(), JsValue> {
    let (manager, destroy_func) = manager_fn("destroy")?;
    destroy_func.call1(&manager, &JsValue::from_str(element_id))?;
    Ok(())
}
