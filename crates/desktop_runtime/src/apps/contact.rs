//! Contact form with inline validation. Submission is simulated; nothing leaves the browser.

use desktop_app_contract::{AppMountContext, AppRenderError};
use leptos::*;

use crate::{host::window_primary_input_dom_id, model::WindowId};

const MAX_NAME_LEN: usize = 80;
const MAX_EMAIL_LEN: usize = 254;
const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ContactFormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactFormErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

fn required(value: &str, label: &str, max: usize) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some(format!("{label} is required"))
    } else if value.chars().count() > max {
        Some(format!("{label} must be at most {max} characters"))
    } else {
        None
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Validates every field and returns one message per failing field.
pub(crate) fn validate_contact_form(form: &ContactForm) -> ContactFormErrors {
    let email = required(&form.email, "Email", MAX_EMAIL_LEN).or_else(|| {
        (!looks_like_email(form.email.trim())).then(|| "Enter a valid email address".to_string())
    });
    ContactFormErrors {
        name: required(&form.name, "Name", MAX_NAME_LEN),
        email,
        message: required(&form.message, "Message", MAX_MESSAGE_LEN),
    }
}

pub(super) fn mount_contact(context: AppMountContext) -> Result<View, AppRenderError> {
    Ok(view! { <ContactFormApp window_id=WindowId(context.window_id) /> }.into_view())
}

#[component]
fn ContactFormApp(window_id: WindowId) -> impl IntoView {
    let form = create_rw_signal(ContactForm::default());
    let errors = create_rw_signal(ContactFormErrors::default());
    let sent = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let found = form.with(validate_contact_form);
        if found.is_empty() {
            form.set(ContactForm::default());
            sent.set(true);
        } else {
            sent.set(false);
        }
        errors.set(found);
    };

    let field_error = move |select: fn(&ContactFormErrors) -> Option<String>| {
        move || errors.with(select)
    };

    view! {
        <form class="app-shell app-contact-shell" novalidate=true on:submit=on_submit>
            <label class="contact-field">
                <span>"Name"</span>
                <input
                    id=window_primary_input_dom_id(window_id)
                    class="app-field"
                    type="text"
                    maxlength=MAX_NAME_LEN.to_string()
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <span class="field-error" role="alert">{field_error(|e| e.name.clone())}</span>
            </label>
            <label class="contact-field">
                <span>"Email"</span>
                <input
                    class="app-field"
                    type="email"
                    maxlength=MAX_EMAIL_LEN.to_string()
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <span class="field-error" role="alert">{field_error(|e| e.email.clone())}</span>
            </label>
            <label class="contact-field">
                <span>"Message"</span>
                <textarea
                    class="app-field"
                    rows="6"
                    maxlength=MAX_MESSAGE_LEN.to_string()
                    prop:value=move || form.with(|f| f.message.clone())
                    on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                />
                <span class="field-error" role="alert">{field_error(|e| e.message.clone())}</span>
            </label>
            <div class="app-toolbar">
                <button type="submit" class="app-action">"Send"</button>
                <span role="status">{move || sent.get().then_some("Message sent. Thanks!")}</span>
            </div>
        </form>
    }
}
