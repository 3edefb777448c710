//! HTML pages and the countdown.

use askama::Template;
use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::countdown::{countdown, Countdown};
use crate::error::{Result, WebError};

/// Invitation creation page.
#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateTemplate {
    pub countdown: Option<Countdown>,
}

/// Recipient page; drives a flow session from the browser.
#[derive(Template)]
#[template(path = "invite.html")]
pub struct InviteTemplate {
    pub invitation_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub invite: Option<String>,
}

/// `/` creates invitations; `/?invite=<id>` opens one.
pub async fn index(Query(query): Query<IndexQuery>) -> Response {
    match query.invite.filter(|id| !id.trim().is_empty()) {
        Some(invitation_id) => InviteTemplate { invitation_id }.into_response(),
        None => CreateTemplate {
            countdown: countdown(),
        }
        .into_response(),
    }
}

/// Time left until the next Valentine's Day.
pub async fn countdown_api() -> Result<Json<Countdown>> {
    countdown()
        .map(Json)
        .ok_or_else(|| WebError::Internal("no upcoming Valentine's Day".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_page_renders_countdown() {
        let page = CreateTemplate {
            countdown: Some(Countdown {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6,
            }),
        };
        let html = page.render().unwrap();
        assert!(html.contains("Create your invitation"));
        assert!(html.contains(">3<"));
    }

    #[test]
    fn test_invite_page_escapes_id() {
        let page = InviteTemplate {
            invitation_id: "\"><script>".to_string(),
        };
        let html = page.render().unwrap();
        assert!(!html.contains("\"><script>"));
    }

    #[test]
    fn test_message_is_shown_with_the_question() {
        let html = InviteTemplate {
            invitation_id: "abc".to_string(),
        }
        .render()
        .unwrap();
        let welcome = html.find("case \"welcome\"").unwrap();
        let memory = html.find("case \"memory\"").unwrap();
        let question = html.find("case \"question\"").unwrap();
        let message = html.find("record.message").unwrap();

        assert!(!html[welcome..memory].contains("record.message"));
        assert!(message > question);
    }
}
