use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found-page">
            <h1>{"404 - Page Not Found"}</h1>
            <p>{"The page you're looking for doesn't exist or you do not have access to it."}</p>
            <Link<Route> to={Route::Home}>{"Back to dashboard"}</Link<Route>>
        </div>
    }
}
