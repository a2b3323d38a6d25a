use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::SignUpRequest;
use crate::api::{safe_call, SharedApi};
use crate::flavor::Flavor;
use crate::session::Session;
use crate::ui::mvi::Observable;
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenState};

use super::{AuthFlow, AuthNavigation, AuthProvider};

const SIGN_UP_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Sign Up Failed", "Failed to sign up").with_entries(&[ErrorEntry {
        code: 400,
        title: "Invalid Credentials",
        description: "Please enter correct details.",
    }]);

/// State holder for the sign-up screen.
pub struct SignUpModel {
    flow: AuthFlow,
    name: Observable<String>,
    email: Observable<String>,
    password: Observable<String>,
}

impl SignUpModel {
    pub fn new(api: SharedApi, session: Session, flavor: Flavor) -> Self {
        Self {
            flow: AuthFlow::new("sign_up", SIGN_UP_ERRORS, api, session, flavor),
            name: Observable::default(),
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

    pub fn name(&self) -> &Observable<String> {
        &self.name
    }

    pub fn email(&self) -> &Observable<String> {
        &self.email
    }

    pub fn password(&self) -> &Observable<String> {
        &self.password
    }

    pub fn on_name_change(&self, name: impl Into<String>) {
        self.name.set(name.into());
    }

    pub fn on_email_change(&self, email: impl Into<String>) {
        self.email.set(email.into());
    }

    pub fn on_password_change(&self, password: impl Into<String>) {
        self.password.set(password.into());
    }

    /// Register with the current field values.
    pub fn submit(&self) -> JoinHandle<()> {
        let api = self.flow.api();
        let request = SignUpRequest {
            name: self.name.get(),
            email: self.email.get(),
            password: self.password.get(),
        };
        self.flow
            .authenticate(async move { safe_call(api.sign_up(&request)).await })
    }

    pub fn go_to_login(&self) {
        self.flow.navigate(AuthNavigation::SignIn);
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

    pub fn flavor(&self) -> Flavor {
        self.flow.flavor()
    }

    pub fn close(&self) {
        self.flow.close();
    }
}
