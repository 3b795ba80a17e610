use crate::auth::AuthContext;
use crate::Route;
use log::debug;
use web_sys::HtmlInputElement;
use yew::events::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(String::new);

    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let state = auth.as_ref().map(|auth| auth.state.clone()).unwrap_or_default();

    // Redirect to the dashboard once signed in
    {
        let navigator = navigator.clone();
        use_effect_with(state.user.is_some(), move |signed_in| {
            if *signed_in {
                debug!("Signed in, redirecting to dashboard");
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Home);
                }
            }
            || ()
        });
    }

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let auth = auth.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if email.is_empty() || password.is_empty() {
                error.set("Please enter both email and password".to_string());
                return;
            }
            error.set(String::new());
            if let Some(auth) = &auth {
                auth.login.emit(((*email).clone(), (*password).clone()));
            }
        })
    };

    let onemailchange = {
        let email = email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onpasswordchange = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let message = state.error.clone().unwrap_or_else(|| (*error).clone());

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                    {"Sign in to the hackathon portal"}
                </h2>
                <form class="mt-8 space-y-6" onsubmit={onsubmit}>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <label for="email" class="sr-only">{"Email address"}</label>
                        <input
                            id="email"
                            type="email"
                            required=true
                            class="appearance-none rounded-t-md relative block w-full px-3 py-2 border border-gray-300"
                            placeholder="Email address"
                            onchange={onemailchange}
                        />
                        <label for="password" class="sr-only">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            required=true
                            class="appearance-none rounded-b-md relative block w-full px-3 py-2 border border-gray-300"
                            placeholder="Password"
                            onchange={onpasswordchange}
                        />
                    </div>
                    if !message.is_empty() {
                        <div class="text-red-500 text-sm text-center">{message}</div>
                    }
                    <button
                        type="submit"
                        disabled={state.loading}
                        class="w-full flex justify-center py-2 px-4 rounded-md text-white bg-indigo-600 hover:bg-indigo-700"
                    >
                        if state.loading { {"Signing in..."} } else { {"Sign in"} }
                    </button>
                </form>
            </div>
        </div>
    }
}
