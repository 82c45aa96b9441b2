use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    pub static ref NUM_MSGS_QUEUED: IntCounterVec = register_int_counter_vec!(
        "fakelog_num_messages_queued",
        "Number of messages handed to the Kafka client",
        &["producer", "topic"]
    )
    .unwrap();
    pub static ref NUM_ENQUEUE_FAILURES: IntCounterVec = register_int_counter_vec!(
        "fakelog_num_enqueue_failures",
        "Number of messages the Kafka client refused to queue",
        &["producer", "topic"]
    )
    .unwrap();
}
