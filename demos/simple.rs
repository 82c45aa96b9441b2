use std::time::Duration;

#[tokio::main]
async fn main() -> fakelog::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .init();
    let producer = fakelog::local()
        .kafka()
        .option("message.timeout.ms", "5000")
        .producer("test", "simple-demo")
        .await?;

    for iteration in 0..10 {
        producer
            .publish()
            .json(&serde_json::json!({
                "hello": "there",
                "index": iteration
            }))
            .key(format!("demo-{}", iteration))
            .property("origin", "demo")
            .send()
            .await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    producer.flush(Duration::from_secs(5)).await
}
