use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use homebudget_core::{
    budgets::{BudgetRepository, BudgetService, BudgetServiceTrait},
    categories::{CategoryRepository, CategoryService, CategoryServiceTrait},
    charts::{ChartsService, ChartsServiceTrait},
    db::{self, write_actor},
    demo::{DemoService, DemoServiceTrait},
    entities::{EntityRepository, EntityService, EntityServiceTrait},
    periods::{PeriodRepository, PeriodService, PeriodServiceTrait},
    predictions::{PredictionRepository, PredictionService, PredictionServiceTrait},
    transfers::{TransferRepository, TransferService, TransferServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub period_service: Arc<dyn PeriodServiceTrait>,
    pub entity_service: Arc<dyn EntityServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transfer_service: Arc<dyn TransferServiceTrait>,
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
    pub charts_service: Arc<dyn ChartsServiceTrait>,
    pub demo_service: Arc<dyn DemoServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));

    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service: Arc<dyn BudgetServiceTrait> =
        Arc::new(BudgetService::new(budget_repository));

    let period_repository = Arc::new(PeriodRepository::new(pool.clone(), writer.clone()));
    let period_service: Arc<dyn PeriodServiceTrait> =
        Arc::new(PeriodService::new(period_repository));

    let entity_repository = Arc::new(EntityRepository::new(pool.clone(), writer.clone()));
    let entity_service: Arc<dyn EntityServiceTrait> =
        Arc::new(EntityService::new(entity_repository));

    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let category_service: Arc<dyn CategoryServiceTrait> =
        Arc::new(CategoryService::new(category_repository));

    let transfer_repository = Arc::new(TransferRepository::new(pool.clone(), writer.clone()));
    let transfer_service: Arc<dyn TransferServiceTrait> =
        Arc::new(TransferService::new(transfer_repository));

    let prediction_repository = Arc::new(PredictionRepository::new(pool.clone(), writer.clone()));
    let prediction_service: Arc<dyn PredictionServiceTrait> =
        Arc::new(PredictionService::new(prediction_repository));

    let charts_service: Arc<dyn ChartsServiceTrait> = Arc::new(ChartsService::new(pool.clone()));

    let demo_service: Arc<dyn DemoServiceTrait> = Arc::new(DemoService::new(writer.clone()));

    let jwt_secret = crate::auth::decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&jwt_secret));

    Ok(Arc::new(AppState {
        user_service,
        budget_service,
        period_service,
        entity_service,
        category_service,
        transfer_service,
        prediction_service,
        charts_service,
        demo_service,
        auth,
    }))
}
