//! Tests against a live broker. Run with `--ignored` and `FAKELOG_BROKERS` set.

use fakelog::{EventGenerator, Populator, RunSettings};
use std::time::Duration;

fn brokers() -> String {
    std::env::var("FAKELOG_BROKERS").unwrap_or_else(|_| "127.0.0.1:9092".to_owned())
}

#[tokio::test]
#[ignore]
async fn test_send_waits_for_delivery() {
    let producer = fakelog::brokers(brokers())
        .kafka()
        .producer("fakelog-it", "fakelog-it")
        .await
        .unwrap();

    producer
        .publish()
        .json(&serde_json::json!({ "time": 1 }))
        .key("k")
        .property("origin", "it")
        .properties(vec![("run".to_owned(), "1".to_owned())].into_iter())
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_populates_live_topic() {
    let producer = fakelog::brokers(brokers())
        .kafka()
        .producer("fakelog-it", "fakelog-it")
        .await
        .unwrap();
    let settings = RunSettings::default()
        .with_count(3)
        .with_interval(Duration::from_millis(10));
    let mut populator = Populator::new(producer, EventGenerator::new(), settings);

    assert_eq!(populator.run(&mut std::io::sink()).await.unwrap(), 3);
    populator.finish(Duration::from_secs(10)).await.unwrap();
}
