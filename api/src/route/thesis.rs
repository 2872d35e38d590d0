use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::thesis::{show_theses_by_lecturer, show_thesis, update_thesis};

pub fn build_thesis_routers() -> Router<AppRegistry> {
    let theses_routers = Router::new()
        .route("/:thesis_id", get(show_thesis))
        .route("/:thesis_id", put(update_thesis))
        .route("/lecturer/:lecturer_id", get(show_theses_by_lecturer));

    Router::new().nest("/theses", theses_routers)
}
