//! Sign-up and sign-in screens.
//!
//! Both screens share [`AuthFlow`]: a successful call stores the returned
//! token in the [`Session`] and then requests navigation to home.

mod sign_in;
mod sign_up;

pub use sign_in::SignInModel;
pub use sign_up::SignUpModel;

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{AuthResponse, OAuthRequest};
use crate::api::{safe_call, ApiResult, SharedApi};
use crate::flavor::Flavor;
use crate::session::Session;
use crate::ui::mvi::Signal;
use crate::ui::screen::{ErrorCatalog, ErrorMessage, ScreenModel, ScreenState};

/// Where an auth screen asks to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthNavigation {
    Home,
    SignIn,
    SignUp,
}

/// External identity providers offered next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Google,
    Facebook,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
        }
    }

    fn failure_title(self) -> &'static str {
        match self {
            AuthProvider::Google => "Google Sign In Failed",
            AuthProvider::Facebook => "Facebook Sign In Failed",
        }
    }
}

/// Shared machinery behind both auth screens.
pub(crate) struct AuthFlow {
    screen: ScreenModel<()>,
    api: SharedApi,
    session: Session,
    flavor: Flavor,
    navigation: Signal<AuthNavigation>,
}

impl AuthFlow {
    pub(crate) fn new(
        name: &'static str,
        catalog: ErrorCatalog,
        api: SharedApi,
        session: Session,
        flavor: Flavor,
    ) -> Self {
        Self {
            screen: ScreenModel::new(name, catalog),
            api,
            session,
            flavor,
            navigation: Signal::new(),
        }
    }

    pub(crate) fn api(&self) -> SharedApi {
        SharedApi::clone(&self.api)
    }

    pub(crate) fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub(crate) fn state(&self) -> ScreenState<()> {
        self.screen.state()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ScreenState<()>> {
        self.screen.subscribe()
    }

    pub(crate) fn navigation(&self) -> mpsc::UnboundedReceiver<AuthNavigation> {
        self.navigation.subscribe()
    }

    pub(crate) fn navigate(&self, target: AuthNavigation) {
        self.navigation.emit(target);
    }

    /// Run an auth call. On success the token is stored before the state
    /// turns `Success`, and `Home` is emitted once afterwards.
    pub(crate) fn authenticate<F>(&self, call: F) -> JoinHandle<()>
    where
        F: Future<Output = ApiResult<AuthResponse>> + Send + 'static,
    {
        let session = self.session.clone();
        let navigation = self.navigation.clone();
        let work = async move {
            call.await.map(|auth| {
                if let Err(e) = session.sign_in(auth.token) {
                    tracing::warn!(error = %e, "Token kept for this run only");
                }
            })
        };

        self.screen.load_then(work, move |_| {
            navigation.emit(AuthNavigation::Home);
        })
    }

    /// Exchange a provider token for a FoodHub session.
    pub(crate) fn sign_in_with_provider(
        &self,
        provider: AuthProvider,
        provider_token: String,
    ) -> JoinHandle<()> {
        let api = self.api();
        let request = OAuthRequest {
            token: provider_token,
            provider: provider.as_str().to_string(),
            role: self.flavor.role().to_string(),
        };
        self.authenticate(async move { safe_call(api.oauth(&request)).await })
    }

    /// The provider sheet was opened.
    pub(crate) fn provider_started(&self) {
        self.screen.mark_loading();
    }

    /// The provider sheet failed or was dismissed without a token.
    /// The provider's own text is shown as the description.
    pub(crate) fn provider_failed(&self, provider: AuthProvider, cause: impl Into<String>) {
        let cause = cause.into();
        self.screen.fail(ErrorMessage {
            code: crate::api::GENERIC_ERROR_CODE,
            title: provider.failure_title().to_string(),
            description: cause.clone(),
            cause,
        });
    }

    pub(crate) fn close(&self) {
        self.screen.close();
    }
}
