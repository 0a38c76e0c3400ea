use blog_core::application::{
    ports::{
        media::{EncodeOptions, ImageCodec, MediaStorage},
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::{SlugGenerator, SuffixGenerator},
    },
    services::{ApplicationDependencies, ApplicationServices, ImageSettings},
};
use blog_core::config::AppConfig;
use blog_core::domain::media::TargetWidth;
use blog_core::infrastructure::{
    database,
    media::{ImageRsCodec, LocalMediaStorage},
    repositories::{
        SqliteCategoryRepository, SqlitePageRepository, SqlitePostRepository,
        SqliteSiteSetupRepository, SqliteSlugIndex, SqliteTagRepository, SqliteUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    util::{RandomSuffixGenerator, WordSlugGenerator},
};
use blog_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let media = config.media().clone();

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");

    let slug_index = Arc::new(SqliteSlugIndex::new(pool.clone()));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(WordSlugGenerator);
    let suffixes: Arc<dyn SuffixGenerator> = Arc::new(RandomSuffixGenerator);
    let media_storage: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(&media.root));
    let image_codec: Arc<dyn ImageCodec> = Arc::new(ImageRsCodec);

    let images = ImageSettings {
        post_cover_width: TargetWidth::new(media.post_cover_width)?,
        favicon_width: TargetWidth::new(media.favicon_width)?,
        encode: EncodeOptions {
            quality: media.jpeg_quality,
            ..EncodeOptions::default()
        },
        max_upload_bytes: media.max_upload_bytes,
    };

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        user_repo: Arc::new(SqliteUserRepository::new(pool.clone())),
        post_repo: Arc::new(SqlitePostRepository::new(pool.clone())),
        page_repo: Arc::new(SqlitePageRepository::new(pool.clone())),
        category_repo: Arc::new(SqliteCategoryRepository::new(pool.clone())),
        tag_repo: Arc::new(SqliteTagRepository::new(pool.clone())),
        site_repo: Arc::new(SqliteSiteSetupRepository::new(pool.clone())),
        post_slugs: slug_index.clone(),
        page_slugs: slug_index.clone(),
        category_slugs: slug_index.clone(),
        tag_slugs: slug_index,
        password_hasher,
        token_manager,
        clock,
        slugger,
        suffixes,
        media_storage,
        image_codec,
        images,
    }));

    let state = HttpState::new(Arc::clone(&services));

    let app = build_router(state, config.allowed_origins(), media.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, media_root = %media.root.display(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
