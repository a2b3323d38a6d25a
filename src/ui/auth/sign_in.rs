use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::SignInRequest;
use crate::api::{safe_call, SharedApi};
use crate::flavor::Flavor;
use crate::session::Session;
use crate::ui::mvi::Observable;
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenState};

use super::{AuthFlow, AuthNavigation, AuthProvider};

const SIGN_IN_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Sign In Failed", "Failed to sign in").with_entries(&[
        ErrorEntry {
            code: 400,
            title: "Invalid Credentials",
            description: "Please enter correct details.",
        },
        ErrorEntry {
            code: 401,
            title: "Invalid Credentials",
            description: "Email or password is incorrect.",
        },
    ]);

/// State holder for the sign-in screen.
///
/// Sends the role of the running [`Flavor`] so the backend can reject
/// accounts of another kind.
pub struct SignInModel {
    flow: AuthFlow,
    email: Observable<String>,
    password: Observable<String>,
}

impl SignInModel {
    pub fn new(api: SharedApi, session: Session, flavor: Flavor) -> Self {
        Self {
            flow: AuthFlow::new("sign_in", SIGN_IN_ERRORS, api, session, flavor),
            email: Observable::default(),
            password: Observable::default(),
        }
    }

    pub fn state(&self) -> ScreenState<()> {
        self.flow.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<()>> {
        self.flow.subscribe()
    }

    pub fn navigation(&self) -> mpsc::UnboundedReceiver<AuthNavigation> {
        self.flow.navigation()
    }

    pub fn email(&self) -> &Observable<String> {
        &self.email
    }

    pub fn password(&self) -> &Observable<String> {
        &self.password
    }

    pub fn on_email_change(&self, email: impl Into<String>) {
        self.email.set(email.into());
    }

    pub fn on_password_change(&self, password: impl Into<String>) {
        self.password.set(password.into());
    }

    pub fn submit(&self) -> JoinHandle<()> {
        let api = self.flow.api();
        let request = SignInRequest {
            email: self.email.get(),
            password: self.password.get(),
            role: self.flow.flavor().role().to_string(),
        };
        self.flow
            .authenticate(async move { safe_call(api.sign_in(&request)).await })
    }

    pub fn go_to_sign_up(&self) {
        self.flow.navigate(AuthNavigation::SignUp);
    }

    pub fn on_provider_started(&self) {
        self.flow.provider_started();
    }

    pub fn sign_in_with_provider(
        &self,
        provider: AuthProvider,
        provider_token: impl Into<String>,
    ) -> JoinHandle<()> {
        self.flow.sign_in_with_provider(provider, provider_token.into())
    }

    pub fn on_provider_error(&self, provider: AuthProvider, cause: impl Into<String>) {
        self.flow.provider_failed(provider, cause);
    }

    pub fn close(&self) {
        self.flow.close();
    }
}
