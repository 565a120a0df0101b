//! Login and signup submission

use std::time::Instant;

use super::AppController;
use crate::log_api_result;
use crate::model::backend::SignupRequest;

impl AppController {
    pub async fn submit_login(&self, identifier: String, password: String) {
        tracing::debug!(identifier = %identifier, "Submitting login");
        let model = self.model.lock().await;
        let backend = model.backend.clone();
        drop(model);

        let result = backend.login(&identifier, &password).await;
        log_api_result!("login", result);

        let model = self.model.lock().await;
        model.set_login_submitting(false).await;
        match result {
            Ok(user) => {
                model
                    .set_info(format!("Welcome back, {}!", user.username))
                    .await;
                model.enter_dashboard(Some(user)).await;
                drop(model);
                self.refresh_dashboard().await;
            }
            Err(e) => {
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn submit_signup(&self, request: SignupRequest) {
        tracing::debug!(username = %request.username, "Submitting signup");
        let model = self.model.lock().await;
        let backend = model.backend.clone();
        drop(model);

        let result = backend.signup(&request).await;
        log_api_result!("signup", result);

        let model = self.model.lock().await;
        model.set_signup_submitting(false).await;
        match result {
            Ok(user) => {
                tracing::info!(username = %user.username, "Account created");
                model.start_tutorial(user, Instant::now()).await;
            }
            Err(e) => {
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn logout(&self) {
        let model = self.model.lock().await;
        if let Some(user) = model.current_user().await {
            tracing::info!(username = %user.username, "User logged out");
        }
        model.logout().await;
    }
}
