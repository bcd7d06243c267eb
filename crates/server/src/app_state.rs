use server_api::ApiContext;

/// Handed to every route through `State`.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
}
