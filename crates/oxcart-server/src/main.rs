//! # Oxcart Server
//!
//! Main entry point: loads configuration, connects the stores, wires the
//! services, spawns the background channel workers, and serves the REST
//! API until shutdown.

use oxcart_config::{AppConfig, ConfigLoader};
use oxcart_core::{OxcartError, OxcartResult};
use oxcart_queue::{
    ChannelWorker, EmailHandler, InventoryHandler, LoggingEmailSender, MessageQueue,
    RedisMessageQueue, WorkerConfig,
};
use oxcart_repository::{
    CatalogStore, DatabasePool, MongoProductStore, MongoReviewStore, MySqlCartRepository,
    MySqlOrderRepository, MySqlUserRepository,
};
use oxcart_rest::{create_router, AppState, TokenValidator};
use oxcart_service::{
    CacheBackend, CartCache, CartServiceImpl, LoggingPaymentGateway, OrderListCache,
    OrderServiceImpl, PaymentServiceImpl, ProductCache, ProductServiceImpl, RedisCacheBackend,
    ReviewListCache, ReviewServiceImpl, UserInfoCache, UserInfoServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment.
    let _ = dotenvy::dotenv();

    init_logging();
    startup::print_banner();

    info!("Starting Oxcart server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> OxcartResult<()> {
    let config = ConfigLoader::from_default_location()?;

    info!("Environment: {}", config.app.environment);

    // Relational store.
    let db_pool = Arc::new(DatabasePool::connect(&config.database).await?);
    db_pool.run_migrations().await?;

    // Document store.
    let catalog = CatalogStore::connect(&config.mongodb).await?;

    // Redis backs both the cache layer and the message channels.
    let redis_pool = create_redis_pool(&config)?;

    let cache_backend: Arc<dyn CacheBackend> = if config.redis.cache_enabled {
        Arc::new(RedisCacheBackend::new(Arc::new(redis_pool.clone())))
    } else {
        info!("Cache disabled; running store-only");
        Arc::new(RedisCacheBackend::disabled())
    };

    let queue: Arc<dyn MessageQueue> = Arc::new(RedisMessageQueue::new(
        redis_pool,
        config.redis.queue_prefix.clone(),
    ));

    // Repositories and stores.
    let users = Arc::new(MySqlUserRepository::new(db_pool.clone()));
    let carts = Arc::new(MySqlCartRepository::new(db_pool.clone()));
    let orders = Arc::new(MySqlOrderRepository::new(db_pool.clone()));
    let products = Arc::new(MongoProductStore::new(catalog.clone()));
    let reviews = Arc::new(MongoReviewStore::new(catalog.clone()));

    // Services.
    let cart_service = Arc::new(CartServiceImpl::new(
        carts,
        users.clone(),
        products.clone(),
        CartCache::new(cache_backend.clone()),
    ));
    let order_service = Arc::new(OrderServiceImpl::new(
        orders,
        users.clone(),
        products.clone(),
        OrderListCache::new(cache_backend.clone()),
        queue.clone(),
    ));
    let product_service = Arc::new(ProductServiceImpl::new(
        products.clone(),
        ProductCache::new(cache_backend.clone()),
        ReviewListCache::new(cache_backend.clone()),
    ));
    let review_service = Arc::new(ReviewServiceImpl::new(
        reviews,
        users.clone(),
        products.clone(),
        ReviewListCache::new(cache_backend.clone()),
    ));
    let user_info_service = Arc::new(UserInfoServiceImpl::new(
        users,
        UserInfoCache::new(cache_backend),
    ));
    let payment_service = Arc::new(PaymentServiceImpl::new(
        products,
        Arc::new(LoggingPaymentGateway),
    ));

    // Background channel workers run on their own tasks with their own
    // store handles, decoupled from request handling.
    let worker_config = WorkerConfig {
        poll_interval: config.worker.poll_interval(),
        batch_size: config.worker.batch_size,
    };

    let inventory_worker = Arc::new(ChannelWorker::new(
        queue.clone(),
        Arc::new(InventoryHandler::new(Arc::new(MongoProductStore::new(
            catalog.clone(),
        )))),
        worker_config.clone(),
    ));
    let email_worker = Arc::new(ChannelWorker::new(
        queue,
        Arc::new(EmailHandler::new(Arc::new(LoggingEmailSender))),
        worker_config,
    ));

    let inventory_task = tokio::spawn({
        let worker = inventory_worker.clone();
        async move { worker.run().await }
    });
    let email_task = tokio::spawn({
        let worker = email_worker.clone();
        async move { worker.run().await }
    });

    // REST surface.
    let state = AppState::new(
        cart_service,
        order_service,
        product_service,
        review_service,
        user_info_service,
        payment_service,
    );
    let validator = Arc::new(TokenValidator::new(&config.security));
    let router = create_router(state, validator, &config.server);

    let addr = config.server.addr();
    startup::print_startup_info(&config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OxcartError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OxcartError::Internal(format!("Server error: {}", e)))?;

    // Drain the workers after the HTTP surface stops.
    inventory_worker.stop();
    email_worker.stop();
    let _ = inventory_task.await;
    let _ = email_task.await;

    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn create_redis_pool(config: &AppConfig) -> OxcartResult<deadpool_redis::Pool> {
    let redis_cfg = deadpool_redis::Config::from_url(&config.redis.url);
    redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| OxcartError::Cache(format!("Failed to create Redis pool: {}", e)))
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,oxcart=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
