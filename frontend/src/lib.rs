use crate::auth::{AuthContext, AuthProvider};
use crate::components::common_toast::{use_toast, Toast, ToastProvider};
use log::{debug, info};
use shared::Role;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod flatpickr;
pub mod forms;
pub mod pages {
    pub mod criterion;
    pub mod home;
    pub mod login;
    pub mod not_found;
    pub mod phases;
}

use pages::{
    criterion::CriterionEdit, home::Home, login::Login, not_found::NotFound,
    phases::HackathonPhases,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/hackathons/:hackathon_id/phases")]
    HackathonPhases { hackathon_id: String },
    #[at("/criteria/:criterion_id/edit")]
    CriterionEdit { criterion_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <ToastProvider>
            <AuthProvider>
                <BrowserRouter>
                    <main class="app-container flex-1">
                        <Switch<Route> render={switch} />
                    </main>
                </BrowserRouter>
            </AuthProvider>
        </ToastProvider>
    }
}

#[derive(Properties, PartialEq)]
pub struct RoleGuardProps {
    /// Roles allowed through; an empty list admits any signed-in user
    #[prop_or_default]
    pub roles: Vec<Role>,
    pub children: Children,
}

/// Renders its children only for users holding one of `roles`; admins always
/// pass. Signed-out users go to the login page, others to not-found.
#[function_component(RoleGuard)]
pub fn role_guard(props: &RoleGuardProps) -> Html {
    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let add_toast = use_toast();

    let state = auth.map(|auth| auth.state).unwrap_or_default();
    let signed_in = state.is_authenticated();
    let allowed = signed_in && (props.roles.is_empty() || state.has_any_role(&props.roles));
    // Wait for the session check before redirecting a cached user
    let decided = state.checked || !signed_in;

    {
        use_effect_with((decided, signed_in, allowed), move |(decided, signed_in, allowed)| {
            if *decided && !*allowed {
                if let Some(navigator) = navigator {
                    if *signed_in {
                        add_toast.emit(Toast::warning("You do not have access to that page"));
                        navigator.replace(&Route::NotFound);
                    } else {
                        navigator.replace(&Route::Login);
                    }
                }
            }
            || ()
        });
    }

    if allowed {
        html! { <>{props.children.clone()}</> }
    } else {
        html! {}
    }
}

fn switch(routes: Route) -> Html {
    debug!("Route switch: {:?}", routes);
    match routes {
        Route::Home => html! {
            <RoleGuard>
                <Home />
            </RoleGuard>
        },
        Route::Login => html! { <Login /> },
        Route::HackathonPhases { hackathon_id } => {
            debug!("Rendering phases for hackathon {}", hackathon_id);
            html! {
                <RoleGuard roles={vec![Role::Partner]}>
                    <HackathonPhases hackathon_id={hackathon_id} />
                </RoleGuard>
            }
        }
        Route::CriterionEdit { criterion_id } => {
            debug!("Rendering criterion editor for {}", criterion_id);
            html! {
                <RoleGuard roles={vec![Role::Judge]}>
                    <CriterionEdit criterion_id={criterion_id} />
                </RoleGuard>
            }
        }
        Route::NotFound => html! { <NotFound /> },
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    console_error_panic_hook::set_once();
    info!("Logger and panic hook ready");

    info!("Mounting application to #app");
    yew::Renderer::<App>::new().render();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_app().await {
            log::error!("Failed to run app: {:?}", e);
        }
    });
    Ok(())
}
