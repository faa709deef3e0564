use std::env;

mod routes;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let app = routes::router();

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    println!("Server running at http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}
