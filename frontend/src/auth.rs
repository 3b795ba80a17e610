use crate::api::auth;
use crate::api::utils::SESSION_KEY;
use gloo_storage::{LocalStorage, Storage};
use log::{debug, error};
use shared::{Role, UserDto};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::functional::use_reducer_eq;
use yew::prelude::*;

const USER_KEY: &str = "user";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserDto>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set once `/api/auth/me` has answered, so guards do not redirect early
    pub checked: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin()).unwrap_or(false)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.user
            .as_ref()
            .map(|u| u.has_any_role(allowed))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    SetLoading(bool),
    LoginSuccess { user: UserDto, session_id: String },
    LoginError(String),
    UserLoaded(UserDto),
    SessionInvalid,
    LogoutSuccess,
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::SetLoading(loading) => Rc::new(Self {
                loading,
                error: None,
                ..(*self).clone()
            }),
            AuthAction::LoginSuccess { user, session_id } => {
                if let Err(e) = LocalStorage::set(USER_KEY, &user) {
                    error!("Failed to store user in local storage: {}", e);
                }
                if let Err(e) = LocalStorage::set(SESSION_KEY, &session_id) {
                    error!("Failed to store session_id in local storage: {}", e);
                }
                Rc::new(Self {
                    user: Some(user),
                    loading: false,
                    error: None,
                    checked: true,
                })
            }
            AuthAction::LoginError(error) => Rc::new(Self {
                user: None,
                loading: false,
                error: Some(error),
                checked: true,
            }),
            AuthAction::UserLoaded(user) => {
                if let Err(e) = LocalStorage::set(USER_KEY, &user) {
                    error!("Failed to update user in local storage: {}", e);
                }
                Rc::new(Self {
                    user: Some(user),
                    checked: true,
                    ..(*self).clone()
                })
            }
            AuthAction::SessionInvalid | AuthAction::LogoutSuccess => {
                LocalStorage::delete(USER_KEY);
                LocalStorage::delete(SESSION_KEY);
                Rc::new(Self {
                    checked: true,
                    ..Default::default()
                })
            }
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct AuthProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthContext {
    pub state: AuthState,
    pub login: Callback<(String, String)>,
    pub logout: Callback<()>,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth = use_reducer_eq(|| AuthState {
        user: LocalStorage::get(USER_KEY).ok(),
        ..Default::default()
    });

    // Roles may have changed since the cached copy, so ask the backend once.
    {
        let auth = auth.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match auth::get_current_user().await {
                    Ok(user) => {
                        debug!("Session valid for {}", user.email);
                        auth.dispatch(AuthAction::UserLoaded(user));
                    }
                    Err(e) => {
                        debug!("No valid session: {}", e);
                        auth.dispatch(AuthAction::SessionInvalid);
                    }
                }
            });
            || ()
        });
    }

    let login = {
        let auth = auth.clone();
        Callback::from(move |(email, password): (String, String)| {
            let auth = auth.clone();
            spawn_local(async move {
                auth.dispatch(AuthAction::SetLoading(true));
                match auth::login(&email, &password).await {
                    Ok(response) => auth.dispatch(AuthAction::LoginSuccess {
                        user: response.user,
                        session_id: response.session_id,
                    }),
                    Err(e) => auth.dispatch(AuthAction::LoginError(e)),
                }
            });
        })
    };

    let logout = {
        let auth = auth.clone();
        Callback::from(move |_: ()| {
            let auth = auth.clone();
            spawn_local(async move {
                if let Err(e) = auth::logout().await {
                    error!("Logout request failed: {}", e);
                }
                auth.dispatch(AuthAction::LogoutSuccess);
            });
        })
    };

    let context = AuthContext {
        state: (*auth).clone(),
        login,
        logout,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}
