use crate::auth::AuthContext;
use crate::Route;
use shared::Role;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

/// Dashboard sections each role can open.
pub fn dashboard_sections(roles: &[Role]) -> Vec<&'static str> {
    let is_admin = roles.contains(&Role::Admin);
    let mut sections = Vec::new();
    if is_admin || roles.contains(&Role::Partner) {
        sections.push("phases");
    }
    if is_admin || roles.contains(&Role::Judge) {
        sections.push("criteria");
    }
    sections
}

#[function_component(Home)]
pub fn home() -> Html {
    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let hackathon_id = use_state(String::new);
    let criterion_id = use_state(String::new);

    let Some(user) = auth.as_ref().and_then(|auth| auth.state.user.clone()) else {
        return html! {
            <div class="container mx-auto px-4 py-8">
                <Link<Route> to={Route::Login}>{"Sign in"}</Link<Route>>
            </div>
        };
    };
    let sections = dashboard_sections(&user.roles);

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let open = |route: Option<Route>| {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let (Some(navigator), Some(route)) = (&navigator, &route) {
                navigator.push(route);
            }
        })
    };
    let phases_route = (!hackathon_id.is_empty()).then(|| Route::HackathonPhases {
        hackathon_id: (*hackathon_id).clone(),
    });
    let criterion_route = (!criterion_id.is_empty()).then(|| Route::CriterionEdit {
        criterion_id: (*criterion_id).clone(),
    });

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(auth) = &auth {
                auth.logout.emit(());
            }
        })
    };

    let roles = user
        .roles
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <div class="container mx-auto px-4 py-8 space-y-6">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-2xl font-bold">{format!("Welcome, {}", user.display_name)}</h1>
                    <p class="text-gray-600">{format!("Roles: {}", roles)}</p>
                </div>
                <button class="btn btn-secondary" onclick={on_logout}>{"Sign out"}</button>
            </div>
            if sections.contains(&"phases") {
                <section class="card p-4 space-y-2">
                    <h2 class="text-lg font-semibold">{"Hackathon phases"}</h2>
                    <input class="form-input" placeholder="Hackathon ID" value={(*hackathon_id).clone()} oninput={bind(&hackathon_id)} />
                    <button class="btn btn-primary" disabled={phases_route.is_none()} onclick={open(phases_route.clone())}>
                        {"Add phases"}
                    </button>
                </section>
            }
            if sections.contains(&"criteria") {
                <section class="card p-4 space-y-2">
                    <h2 class="text-lg font-semibold">{"Judging criteria"}</h2>
                    <input class="form-input" placeholder="Criterion ID" value={(*criterion_id).clone()} oninput={bind(&criterion_id)} />
                    <button class="btn btn-primary" disabled={criterion_route.is_none()} onclick={open(criterion_route.clone())}>
                        {"Edit criterion"}
                    </button>
                </section>
            }
            if sections.is_empty() {
                <p class="text-gray-600">{"Nothing to manage for your roles yet."}</p>
            }
        </div>
    }
}
