use std::{sync::Arc, time::Duration};

use inv_client::InventoryApi;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::pages::DashboardPage;

/// Re-run the dashboard load every `period` until the handle is aborted.
///
/// The first run happens one period after the call; the caller is expected
/// to have loaded the page already. Loads serialize on the page mutex.
/// `on_refresh` sees the page after every attempt, successful or not.
pub fn start_dashboard_refresh<A, F>(
    page: Arc<Mutex<DashboardPage<A>>>,
    period: Duration,
    mut on_refresh: F,
) -> JoinHandle<()>
where
    A: InventoryApi + 'static,
    F: FnMut(&mut DashboardPage<A>) + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            tracing::debug!("Refreshing dashboard");

            let mut page = page.lock().await;
            if let Err(e) = page.load().await {
                tracing::error!("Dashboard refresh failed: {e}");
            }
            on_refresh(&mut page);
        }
    })
}
