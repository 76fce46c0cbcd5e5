use std::sync::Arc;

use crate::config::Config;
use crate::db::SheetStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn SheetStore>,
    pub config: Config,
}
