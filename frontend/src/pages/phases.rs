use crate::api::phases::{create_phases, list_phases};
use crate::components::common_toast::{use_toast, Toast};
use crate::components::dynamic_form::{DynamicForm, SubmitHandler};
use crate::forms::{phase_batch_config, phase_form_model, phase_values};
use crate::Route;
use log::debug;
use shared::{FormMode, FormValues, InitialValues, PhaseDto};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HackathonPhasesProps {
    pub hackathon_id: String,
}

#[derive(Clone, PartialEq)]
enum Existing {
    Loading,
    Loaded(Vec<PhaseDto>),
    Failed(String),
}

/// Adds phases to a hackathon in one batch, after the ones it already has.
#[function_component(HackathonPhases)]
pub fn hackathon_phases(props: &HackathonPhasesProps) -> Html {
    let existing = use_state(|| Existing::Loading);
    let add_toast = use_toast();
    let navigator = use_navigator();

    {
        let existing = existing.clone();
        use_effect_with(props.hackathon_id.clone(), move |hackathon_id| {
            let hackathon_id = hackathon_id.clone();
            existing.set(Existing::Loading);
            spawn_local(async move {
                match list_phases(&hackathon_id).await {
                    Ok(phases) => existing.set(Existing::Loaded(phases)),
                    Err(e) => existing.set(Existing::Failed(e)),
                }
            });
            || ()
        });
    }

    let phases = match &*existing {
        Existing::Loading => {
            return html! { <div class="loading-spinner">{"Loading phases..."}</div> };
        }
        Existing::Failed(e) => {
            return html! {
                <div class="error-message text-red-600">{format!("Could not load phases: {}", e)}</div>
            };
        }
        Existing::Loaded(phases) => phases,
    };

    let initial: Vec<FormValues> = phases.iter().map(phase_values).collect();

    let on_submit = {
        let hackathon_id = props.hackathon_id.clone();
        let add_toast = add_toast.clone();
        let navigator = navigator.clone();
        SubmitHandler::new(move |payload: shared::SubmissionPayload| {
            let hackathon_id = hackathon_id.clone();
            let add_toast = add_toast.clone();
            let navigator = navigator.clone();
            async move {
                let result: Result<Vec<PhaseDto>, String> = async {
                    let phases: Vec<PhaseDto> = payload.into_dtos().map_err(|e| e.to_string())?;
                    debug!("Submitting {} new phases", phases.len());
                    create_phases(&hackathon_id, phases).await
                }
                .await;

                match result {
                    Ok(created) => {
                        add_toast.emit(Toast::success(format!("{} phase(s) created", created.len())));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
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

    let on_back = navigator.clone().map(|navigator| {
        Callback::from(move |_: ()| navigator.push(&Route::Home))
    });

    html! {
        <div class="container mx-auto px-4 py-8 max-w-3xl">
            <h1 class="text-2xl font-bold mb-2">{"Hackathon phases"}</h1>
            <p class="text-gray-600 mb-6">
                {"Existing phases are shown first. New phases must start no earlier than the previous phase ends."}
            </p>
            <DynamicForm
                model={phase_form_model()}
                mode={FormMode::Create}
                initial_values={InitialValues::Batch(initial)}
                batch_config={Some(phase_batch_config(phases.len()))}
                on_submit={on_submit}
                on_back={on_back}
                submit_label="Create phases"
                add_label="Add phase"
            />
        </div>
    }
}
