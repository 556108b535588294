//! Visitor submission route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use m5_core::{SubmissionDraft, SubmissionInput};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{ChoiceView, Chrome, category_choices};
use crate::error::Result;
use crate::middleware::push_notice;
use crate::models::Notice;
use crate::state::AppState;

/// Submission form data.
///
/// Every field is kept as typed so a rejected form can be shown again.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub creator: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

impl From<&SubmitForm> for SubmissionInput {
    fn from(form: &SubmitForm) -> Self {
        Self {
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price.clone(),
            category: form.category.clone(),
            image: form.image.clone(),
            creator: form.creator.clone(),
            email: form.email.clone(),
            phone: Some(form.phone.clone()),
            website: Some(form.website.clone()),
        }
    }
}

/// Submission form template.
#[derive(Template, WebTemplate)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub chrome: Chrome,
    pub form: SubmitForm,
    pub categories: Vec<ChoiceView>,
}

/// Display the submission form.
pub async fn form(State(state): State<AppState>, session: Session) -> Result<SubmitTemplate> {
    Ok(SubmitTemplate {
        chrome: Chrome::load(&state, &session).await?,
        form: SubmitForm::default(),
        categories: category_choices(""),
    })
}

/// Handle submission form.
///
/// Invalid input shows the form again with the values kept. A store failure
/// still queues the submission in memory and reports the error.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SubmitForm>,
) -> Result<Response> {
    let draft = match SubmissionDraft::parse(&SubmissionInput::from(&form)) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "Submission rejected by validation");
            let chrome = Chrome::load(&state, &session)
                .await?
                .with_notice(Notice::error(capitalize(&e.to_string())));
            let categories = category_choices(&form.category);
            let page = SubmitTemplate {
                chrome,
                form,
                categories,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let notice = match state.with_showcase(|s| s.submit(draft))? {
        Ok(_) => Notice::success("Product submitted for review! We will contact you soon."),
        Err(e) => Notice::error(format!("Error saving {}!", e.record)),
    };
    push_notice(&session, notice).await;

    Ok(Redirect::to("/").into_response())
}

/// Uppercase the first letter of a validation message for display.
pub(crate) fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name is required"), "Name is required");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_blank_contact_fields_are_not_provided() {
        let form = SubmitForm {
            name: "Orb".to_string(),
            description: "Glows".to_string(),
            price: "5".to_string(),
            category: "design".to_string(),
            image: "https://example.com/orb.png".to_string(),
            creator: "Zed".to_string(),
            email: "zed@example.com".to_string(),
            ..SubmitForm::default()
        };
        let draft = SubmissionDraft::parse(&SubmissionInput::from(&form));
        assert!(matches!(draft, Ok(d) if d.phone.is_none() && d.website.is_none()));
    }
}
