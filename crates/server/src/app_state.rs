use crate::api::ApiContext;
use site::Site;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) site: Site,
}
