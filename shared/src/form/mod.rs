//! Model-driven create/edit forms with optional repeated ("batch") items.

pub mod batch;
pub mod dates;
pub mod keys;
pub mod model;
pub mod state;
pub mod submission;
pub mod validate;
pub mod value;

pub use batch::{BatchConfig, BatchItems, FormMode};
pub use dates::{PickerConstraint, END_DATE, START_DATE};
pub use model::{
    ColumnItems, DropdownOption, FieldDescriptor, FieldKind, FieldRule, FormModel, Pattern,
    DEFAULT_DATE_TIME_FORMAT,
};
pub use state::{FormState, InitialValues, ItemState};
pub use submission::SubmissionPayload;
pub use validate::FieldError;
pub use value::{FieldValue, FormValues};
