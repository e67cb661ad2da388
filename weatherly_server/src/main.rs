use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging and the server state, then serve everything from
    // a single router.
    let state = weatherly_server::init()?;
    let binding_addr = state.server_config.bind_addr.clone();
    let router = weatherly_server::app(state);

    let listener = TcpListener::bind(binding_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
