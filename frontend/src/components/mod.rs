pub mod common_toast;
pub mod dynamic_form;
