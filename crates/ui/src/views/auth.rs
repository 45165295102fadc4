use dioxus::prelude::*;
use dioxus_router::use_navigator;

use brainpath_core::model::{EducationLevel, LoginForm, SignupForm};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::Toasts;
use crate::vm::{
    AuthMode, SelectOption, board_options, education_level_options, parse_selection,
    sub_level_options,
};

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let navigator = use_navigator();

    let mut mode = use_signal(AuthMode::default);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut level = use_signal(String::new);
    let mut sub_level = use_signal(String::new);
    let mut board = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let is_school = parse_selection::<EducationLevel>(&level.read())
        .is_some_and(|level| level.requires_school_details());

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let current_mode = mode();
        let login = LoginForm {
            email: email(),
            password: password(),
        };
        let signup = SignupForm {
            email: email(),
            password: password(),
            education_level: parse_selection(&level.read()),
            sub_level: parse_selection(&sub_level.read()),
            board: parse_selection(&board.read()),
        };
        busy.set(true);
        spawn(async move {
            let result = match current_mode {
                AuthMode::Login => auth.login(&login).await,
                AuthMode::Signup => auth.signup(&signup).await,
            };
            busy.set(false);
            match result {
                Ok(session) => {
                    toasts.success(format!("Welcome, {}", session.user.email));
                    let _ = navigator.replace(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::debug!(error = %err, "authentication failed");
                    toasts.error(err.user_message());
                }
            }
        });
    };

    let current_mode = mode();
    rsx! {
        div { class: "page auth",
            div { class: "card auth-card",
                h2 { "{current_mode.title()}" }
                form { onsubmit: on_submit,
                    label { "Email"
                        input {
                            r#type: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label { "Password"
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }
                    if current_mode == AuthMode::Signup {
                        SelectField {
                            label: "Education level",
                            placeholder: "Select your level",
                            options: education_level_options(),
                            value: level(),
                            on_change: move |value: String| {
                                level.set(value);
                                sub_level.set(String::new());
                                board.set(String::new());
                            },
                        }
                        if is_school {
                            SelectField {
                                label: "Class level",
                                placeholder: "Select your class",
                                options: sub_level_options(),
                                value: sub_level(),
                                on_change: move |value| sub_level.set(value),
                            }
                            SelectField {
                                label: "Board",
                                placeholder: "Select your board",
                                options: board_options(),
                                value: board(),
                                on_change: move |value| board.set(value),
                            }
                        }
                    }
                    button {
                        class: "button button--primary",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Please wait..." } else { "{current_mode.submit_label()}" }
                    }
                }
                button {
                    class: "link-button",
                    r#type: "button",
                    onclick: move |_| mode.set(current_mode.toggled()),
                    "{current_mode.toggle_prompt()}"
                }
            }
        }
    }
}

#[component]
fn SelectField(
    label: &'static str,
    placeholder: &'static str,
    options: Vec<SelectOption>,
    value: String,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        label { "{label}"
            select {
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                option { value: "", selected: value.is_empty(), "{placeholder}" }
                for choice in options {
                    option {
                        value: "{choice.value}",
                        selected: choice.value == value,
                        "{choice.label}"
                    }
                }
            }
        }
    }
}
