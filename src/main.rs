use axum::Router;
use dotenvy::dotenv;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use cbconnect_server::config::Config;
use cbconnect_server::repository::MongoEventStore;
use cbconnect_server::routes::create_routes;
use cbconnect_server::services::uploader::CloudinaryUploader;
use cbconnect_server::state::AppState;
use cbconnect_server::views::ViewVersions;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Invalid configuration");

    let mut options = ClientOptions::parse(&config.database.url)
        .await
        .expect("Invalid MongoDB connection string");
    options.app_name = Some("cbconnect-server".to_string());
    options.max_pool_size = Some(20);

    let client = Client::with_options(options).expect("Failed to create MongoDB client");
    let db = client.database(&config.database.database);

    let store = MongoEventStore::new(&db);
    store
        .create_indexes()
        .await
        .expect("Failed to prepare the events collection");

    tracing::info!("Successfully connected to database");

    let uploader = CloudinaryUploader::new(&config.media);

    let port = config.server.port;
    let state = AppState {
        config,
        store: Arc::new(store),
        uploader: Arc::new(uploader),
        views: ViewVersions::new(),
    };

    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
