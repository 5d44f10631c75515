use crate::{config::Config, store::SharedStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
