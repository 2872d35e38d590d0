use super::{schedule::build_schedule_routers, thesis::build_thesis_routers};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_schedule_routers())
        .merge(build_thesis_routers());
    Router::new().nest("/api/v1", router)
}
