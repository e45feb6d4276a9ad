//! The activity board controller
//!
//! Owns the latest [`BoardView`] and the feedback [`Banner`], and implements
//! the three interactions: load the catalog, sign up, and unregister. Each
//! mutation is one request followed by a full reload; nothing is patched
//! locally and nothing is retried.

use std::sync::Arc;

use crate::api::{status_text, ActivityApi, ApiResponse};
use crate::delegate::{ListAction, ListObserver};
use crate::error::ApiError;
use crate::feedback::Banner;
use crate::render::{self, BoardView, ListRegion, Row};

pub const SIGNUP_FALLBACK_SUCCESS: &str = "Signed up successfully";
pub const SIGNUP_FALLBACK_ERROR: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FALLBACK_SUCCESS: &str = "Participant removed";
pub const UNREGISTER_FALLBACK_ERROR: &str = "Failed to unregister participant";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// Form fields read at submission time
pub trait SignupFields {
    fn email(&self) -> String;
    fn activity(&self) -> String;
    /// Clear every field back to its initial state
    fn reset(&mut self);
}

/// Plain signup form, used by the command line and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn new(email: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            activity: activity.into(),
        }
    }
}

impl SignupFields for SignupForm {
    fn email(&self) -> String {
        self.email.clone()
    }

    fn activity(&self) -> String {
        self.activity.clone()
    }

    fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

/// Blocking yes/no question asked before unregistering
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// How a mutating operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx response; the catalog was reloaded
    Succeeded,
    /// Non-2xx response from a reachable server
    Rejected,
    /// Transport or parse failure
    Failed,
    /// The user declined the confirmation prompt
    Cancelled,
    /// The activated row carried no actionable control
    Ignored,
}

pub struct Board {
    api: Arc<dyn ActivityApi>,
    view: BoardView,
    banner: Banner,
    observer: ListObserver,
}

impl Board {
    pub fn new(api: Arc<dyn ActivityApi>) -> Self {
        Self {
            api,
            view: BoardView::default(),
            banner: Banner::new(),
            observer: ListObserver::new(),
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Fetch the catalog and replace both rendered regions.
    ///
    /// On failure only the list region changes, to a static failure line;
    /// the selector options keep their previous contents.
    pub async fn load_catalog(&mut self) {
        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                tracing::info!(activities = catalog.len(), "loaded activities");
                self.view = render::render(&catalog);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching activities");
                self.view.list = ListRegion::Failed(render::LOAD_FAILED.to_string());
            }
        }
    }

    /// Submit a signup for the form's activity and email
    pub async fn sign_up<F: SignupFields + ?Sized>(&mut self, form: &mut F) -> Outcome {
        let email = form.email();
        let activity = form.activity();

        match self.api.signup(&activity, &email).await {
            Ok(response) if response.is_ok() => {
                tracing::info!(%activity, %email, "signed up");
                let text = response
                    .reply
                    .message
                    .unwrap_or_else(|| SIGNUP_FALLBACK_SUCCESS.to_string());
                form.reset();
                // The hide delay starts once the refreshed list is in place
                self.load_catalog().await;
                self.banner.success(text);
                Outcome::Succeeded
            }
            Ok(response) => {
                self.reject(&response, SIGNUP_FALLBACK_ERROR, &activity, &email);
                Outcome::Rejected
            }
            Err(e) => {
                self.fail(&e, SIGNUP_FAILED, "Error signing up");
                Outcome::Failed
            }
        }
    }

    /// What activating `row` would do, as decided by the list observer
    pub fn resolve(&self, row: &Row) -> Option<ListAction> {
        self.observer.on_activate(row)
    }

    /// Route an activation on a rendered list row through the list observer
    pub async fn activate<C: Confirm + ?Sized>(&mut self, row: &Row, confirm: &mut C) -> Outcome {
        match self.resolve(row) {
            Some(action) => self.run_action(action, confirm).await,
            None => Outcome::Ignored,
        }
    }

    /// Remove `email` from `activity` after confirmation
    pub async fn unregister<C: Confirm + ?Sized>(
        &mut self,
        activity: &str,
        email: &str,
        confirm: &mut C,
    ) -> Outcome {
        if activity.is_empty() || email.is_empty() {
            return Outcome::Ignored;
        }
        let action = ListAction::Unregister {
            activity: activity.to_string(),
            email: email.to_string(),
        };
        self.run_action(action, confirm).await
    }

    /// Ask for confirmation, then carry out `action`
    pub async fn run_action<C: Confirm + ?Sized>(
        &mut self,
        action: ListAction,
        confirm: &mut C,
    ) -> Outcome {
        if !confirm.confirm(&action.confirmation_prompt()) {
            return Outcome::Cancelled;
        }

        let ListAction::Unregister { activity, email } = action;
        match self.api.unregister(&activity, &email).await {
            Ok(response) if response.is_ok() => {
                tracing::info!(%activity, %email, "unregistered");
                let text = response
                    .reply
                    .message
                    .unwrap_or_else(|| UNREGISTER_FALLBACK_SUCCESS.to_string());
                self.load_catalog().await;
                self.banner.success(text);
                Outcome::Succeeded
            }
            Ok(response) => {
                self.reject(&response, UNREGISTER_FALLBACK_ERROR, &activity, &email);
                Outcome::Rejected
            }
            Err(e) => {
                self.fail(&e, UNREGISTER_FAILED, "Error unregistering");
                Outcome::Failed
            }
        }
    }

    fn reject(&mut self, response: &ApiResponse, fallback: &str, activity: &str, email: &str) {
        tracing::warn!(
            status = %status_text(response.status),
            %activity,
            %email,
            detail = ?response.reply.detail,
            "request rejected"
        );
        let text = response
            .reply
            .detail
            .clone()
            .unwrap_or_else(|| fallback.to_string());
        self.banner.error(text);
    }

    fn fail(&mut self, error: &ApiError, text: &str, context: &str) {
        tracing::error!(error = %error, "{}", context);
        self.banner.error(text);
    }
}
