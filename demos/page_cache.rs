//! # Page Cache Example
//!
//! This example demonstrates the page cache adapter in front of a renderer:
//! - Connecting to Redis in the background
//! - Serving a page from cache on a hit
//! - Rendering and storing it on a miss
//! - Skipping error responses
//!
//! Start Redis first: docker run -d --name redis -p 6379:6379 redis:7-alpine

use pagehaus::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn render(path: &str, request: &RequestContext) -> (u16, String) {
    match path {
        "/" => {
            let lang = request.cookie("lang").unwrap_or("en");
            (200, format!("<body lang=\"{}\">Hola</body>", lang))
        }
        _ => (404, "<body>Not found</body>".to_string()),
    }
}

async fn serve(
    cache: &CacheAdapter,
    path: &str,
    request: RequestContext,
) -> anyhow::Result<String> {
    let started = Instant::now();

    if let Some(body) = cache.fetch(path, Some(&request)).await? {
        println!("HIT  {} ({:?})", path, started.elapsed());
        return Ok(body);
    }

    let (status, body) = render(path, &request);
    let response = ResponseContext::new()
        .with_status(status)
        .with_request(request);
    let outcome = cache.put(path, &body, Some(&response)).await?;
    println!("MISS {} -> {} {:?} ({:?})", path, status, outcome, started.elapsed());

    Ok(body)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CacheConfig::new("127.0.0.1".to_string(), 6379).with_expiration(60);

    let mut pagehaus = PageHaus::new(config, Arc::new(TracingSink))?.with_cache_key(
        |path, request| {
            let lang = request.and_then(|r| r.cookie("lang")).unwrap_or("en");
            format!("demo:{}:{}", lang, path)
        },
    );
    pagehaus.start()?;

    // Give the background connect a moment
    tokio::time::sleep(Duration::from_millis(200)).await;
    if let Err(e) = pagehaus.health_check().await {
        println!("Redis unavailable ({}); every request will be rendered", e);
    }

    let cache = pagehaus.adapter();
    for path in ["/", "/", "/missing", "/missing"] {
        let request = RequestContext::new("GET", path).with_cookie("lang", "es");
        let body = serve(cache, path, request).await?;
        println!("     {}", body);
    }

    Ok(())
}
