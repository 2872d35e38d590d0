use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, health::HealthCheckRepositoryImpl,
        schedule::ScheduleRepositoryImpl, thesis::ThesisRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    repository::{
        auth::AuthRepository, health::HealthCheckRepository, schedule::ScheduleRepository,
        thesis::ThesisRepository, user::UserRepository,
    },
    workflow::{identity::IdentityResolver, schedule::ScheduleWorkflow, thesis::ThesisWorkflow},
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    identity_resolver: Arc<IdentityResolver>,
    schedule_workflow: Arc<ScheduleWorkflow>,
    thesis_workflow: Arc<ThesisWorkflow>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository: Arc<dyn AuthRepository> =
            Arc::new(AuthRepositoryImpl::new(redis_client.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let thesis_repository: Arc<dyn ThesisRepository> =
            Arc::new(ThesisRepositoryImpl::new(pool.clone()));
        let schedule_repository: Arc<dyn ScheduleRepository> =
            Arc::new(ScheduleRepositoryImpl::new(pool.clone()));

        let identity_resolver = Arc::new(IdentityResolver::new(auth_repository, user_repository));
        let schedule_workflow = Arc::new(ScheduleWorkflow::new(
            schedule_repository,
            thesis_repository.clone(),
            app_config.workflow,
        ));
        let thesis_workflow = Arc::new(ThesisWorkflow::new(thesis_repository));

        Self {
            health_check_repository,
            identity_resolver,
            schedule_workflow,
            thesis_workflow,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn identity_resolver(&self) -> Arc<IdentityResolver> {
        self.identity_resolver.clone()
    }

    pub fn schedule_workflow(&self) -> Arc<ScheduleWorkflow> {
        self.schedule_workflow.clone()
    }

    pub fn thesis_workflow(&self) -> Arc<ThesisWorkflow> {
        self.thesis_workflow.clone()
    }
}
