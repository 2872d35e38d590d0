use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::schedule::{
    approve_schedule, create_schedule, delete_schedule, show_schedule, show_schedule_list,
    update_schedule,
};

pub fn build_schedule_routers() -> Router<AppRegistry> {
    let schedules_routers = Router::new()
        .route("/", post(create_schedule))
        .route("/", get(show_schedule_list))
        .route("/:schedule_id", get(show_schedule))
        .route("/:schedule_id", put(update_schedule))
        .route("/:schedule_id", delete(delete_schedule))
        .route("/:schedule_id/approval", post(approve_schedule));

    Router::new().nest("/schedules", schedules_routers)
}
