use crate::api::criteria::{get_criterion, update_criterion};
use crate::components::common_toast::{use_toast, Toast};
use crate::components::dynamic_form::{DynamicForm, SubmitHandler};
use crate::forms::{criterion_form_model, criterion_values};
use crate::Route;
use shared::{BatchConfig, CriterionDto, FormMode, InitialValues, SubmissionPayload};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CriterionEditProps {
    pub criterion_id: String,
}

/// Edits one judging criterion. Batch entry is configured for creation only,
/// so this page always shows a single field-set.
#[function_component(CriterionEdit)]
pub fn criterion_edit(props: &CriterionEditProps) -> Html {
    let criterion = use_state(|| None::<Result<CriterionDto, String>>);
    let add_toast = use_toast();
    let navigator = use_navigator();

    {
        let criterion = criterion.clone();
        use_effect_with(props.criterion_id.clone(), move |id| {
            let id = id.clone();
            spawn_local(async move {
                criterion.set(Some(get_criterion(&id).await));
            });
            || ()
        });
    }

    let current = match &*criterion {
        None => return html! { <div class="loading-spinner">{"Loading criterion..."}</div> },
        Some(Err(e)) => {
            return html! {
                <div class="error-message text-red-600">{format!("Could not load criterion: {}", e)}</div>
            };
        }
        Some(Ok(current)) => current.clone(),
    };

    let on_submit = {
        let id = props.criterion_id.clone();
        let add_toast = add_toast.clone();
        let criterion = criterion.clone();
        SubmitHandler::new(move |payload: SubmissionPayload| {
            let id = id.clone();
            let add_toast = add_toast.clone();
            let criterion = criterion.clone();
            async move {
                let result: Result<CriterionDto, String> = async {
                    let mut edited = payload
                        .into_dtos::<CriterionDto>()
                        .map_err(|e| e.to_string())?
                        .pop()
                        .ok_or_else(|| "Nothing to save".to_string())?;
                    edited.id = Some(id.clone());
                    update_criterion(&id, edited).await
                }
                .await;

                match result {
                    Ok(saved) => {
                        add_toast.emit(Toast::success(format!("Saved {}", saved.name)));
                        criterion.set(Some(Ok(saved)));
                        Ok(())
                    }
                    Err(e) => {
                        add_toast.emit(Toast::error(e.clone()));
                        Err(e)
                    }
                }
            }
        })
    };

    let on_cancel = navigator.map(|navigator| {
        Callback::from(move |_: ()| navigator.push(&Route::Home))
    });

    html! {
        <div class="container mx-auto px-4 py-8 max-w-xl">
            <h1 class="text-2xl font-bold mb-6">{"Edit judging criterion"}</h1>
            <DynamicForm
                model={criterion_form_model()}
                mode={FormMode::Edit}
                initial_values={InitialValues::Flat(criterion_values(&current))}
                batch_config={Some(BatchConfig::for_create(5))}
                on_submit={on_submit}
                on_cancel={on_cancel}
                submit_label="Save"
            />
        </div>
    }
}
