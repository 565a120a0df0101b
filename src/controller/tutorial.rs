//! Tutorial paging

use std::time::Instant;

use super::AppController;

impl AppController {
    /// Advance one slide; the last slide hands off to the dashboard.
    pub async fn tutorial_advance(&self, now: Instant) {
        let model = self.model.lock().await;
        if model.tutorial_next(now).await {
            tracing::info!("Tutorial finished");
            model.enter_dashboard(None).await;
            drop(model);
            self.refresh_dashboard().await;
        }
    }

    pub async fn tutorial_skip(&self) {
        tracing::info!("Tutorial skipped");
        let model = self.model.lock().await;
        model.enter_dashboard(None).await;
        drop(model);
        self.refresh_dashboard().await;
    }
}
