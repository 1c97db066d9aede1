use std::sync::Arc;
use crate::{config::Config, db::repository::ChargeRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub charges: Arc<dyn ChargeRepository>,
}
