pub mod kinesis;

use async_trait::async_trait;

use crate::errors::SinkError;

/// A single record bound for an append-only, partitioned stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    /// Routes the record to a shard; records sharing a key keep their order.
    pub partition_key: String,
    pub data: Vec<u8>,
}

/// Where an appended record landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReceipt {
    pub shard_id: String,
    /// Opaque position within the shard, increasing per partition.
    pub sequence_number: String,
}

/// The `EventSink` trait defines the contract for any append-only stream.
/// One call is one append; implementations do not retry.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn append(&self, record: StreamRecord) -> Result<AppendReceipt, SinkError>;
}
