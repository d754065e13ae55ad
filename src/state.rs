use crate::models::DaySnapshot;
use crate::upstream::UpstreamClient;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub snapshot: Arc<Mutex<Option<DaySnapshot>>>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
            snapshot: Arc::new(Mutex::new(None)),
        }
    }
}
