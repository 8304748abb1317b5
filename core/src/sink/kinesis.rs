use async_trait::async_trait;
use aws_sdk_kinesis::Client;
use aws_sdk_kinesis::primitives::Blob;
use tracing::debug;

use crate::config::AwsOptions;
use crate::errors::SinkError;
use crate::sink::{AppendReceipt, EventSink, StreamRecord};

pub struct KinesisSink {
    client: Client,
    stream_name: String,
}

impl KinesisSink {
    pub fn new(client: Client, stream_name: impl Into<String>) -> Self {
        Self {
            client,
            stream_name: stream_name.into(),
        }
    }

    pub async fn from_options(aws: &AwsOptions, stream_name: impl Into<String>) -> Self {
        let sdk_config = aws.load_sdk_config().await;
        Self::new(Client::new(&sdk_config), stream_name)
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }
}

#[async_trait]
impl EventSink for KinesisSink {
    async fn append(&self, record: StreamRecord) -> Result<AppendReceipt, SinkError> {
        debug!(
            stream = %self.stream_name,
            partition_key = %record.partition_key,
            bytes = record.data.len(),
            "putting record"
        );

        let output = self
            .client
            .put_record()
            .stream_name(&self.stream_name)
            .partition_key(record.partition_key)
            .data(Blob::new(record.data))
            .send()
            .await
            .map_err(|e| SinkError::Append {
                stream: self.stream_name.clone(),
                source: Box::new(aws_sdk_kinesis::Error::from(e)),
            })?;

        Ok(AppendReceipt {
            shard_id: output.shard_id().to_string(),
            sequence_number: output.sequence_number().to_string(),
        })
    }
}
