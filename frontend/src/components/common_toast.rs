use crate::config::Config;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Warning,
}

impl ToastType {
    fn classes(&self) -> &'static str {
        match self {
            ToastType::Success => "bg-green-500 border-green-600",
            ToastType::Error => "bg-red-500 border-red-600",
            ToastType::Warning => "bg-yellow-500 border-yellow-600",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "✓",
            ToastType::Error => "✕",
            ToastType::Warning => "⚠",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: u32, // milliseconds
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            toast_type,
            duration: 5000,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    /// Error toasts stay up longer so the message can be read.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Error).with_duration(Config::error_toast_duration_ms())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => toasts.push(toast),
            ToastAction::Remove(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(Self { toasts })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub add_toast: Callback<Toast>,
    pub remove_toast: Callback<Uuid>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer_eq(ToastList::default);

    let add_toast = {
        let list = list.clone();
        Callback::from(move |toast: Toast| {
            let id = toast.id;
            let duration = toast.duration;
            list.dispatch(ToastAction::Add(toast));

            let list = list.clone();
            Timeout::new(duration, move || list.dispatch(ToastAction::Remove(id))).forget();
        })
    };

    let remove_toast = {
        let list = list.clone();
        Callback::from(move |id: Uuid| list.dispatch(ToastAction::Remove(id)))
    };

    let context = ToastContext {
        toasts: list.toasts.clone(),
        add_toast,
        remove_toast,
    };

    html! {
        <ContextProvider<ToastContext> context={context.clone()}>
            {props.children.clone()}
            <div class="fixed top-4 right-4 z-50 space-y-2">
                {context.toasts.iter().map(|toast| html! {
                    <ToastItem
                        key={toast.id.to_string()}
                        toast={toast.clone()}
                        on_close={context.remove_toast.clone()}
                    />
                }).collect::<Html>()}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_close: Callback<Uuid>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        let toast_id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_close.emit(toast_id))
    };

    html! {
        <div role="alert" class={classes!(
            "flex", "items-center", "p-4", "rounded-lg", "shadow-lg", "border-l-4", "text-white", "min-w-80", "max-w-md",
            props.toast.toast_type.classes()
        )}>
            <span class="mr-3 text-lg font-bold">{props.toast.toast_type.icon()}</span>
            <p class="flex-1 text-sm font-medium">{&props.toast.message}</p>
            <button onclick={on_close} class="ml-3 text-white hover:text-gray-200">
                <span class="text-lg">{"×"}</span>
            </button>
        </div>
    }
}

/// Shorthand for pages that only push toasts.
#[hook]
pub fn use_toast() -> Callback<Toast> {
    use_context::<ToastContext>()
        .map(|context| context.add_toast)
        .unwrap_or_else(|| Callback::from(|toast: Toast| log::warn!("No toast provider: {}", toast.message)))
}
