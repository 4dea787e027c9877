use solana_sdk::hash::Hash;
use tokio::sync::Mutex;

use crate::{error::CounterClientError, transport::CounterTransport};

/// Hands out a blockhash that differs from the one used by the previous
/// transaction, so repeated identical instructions get distinct signatures.
#[derive(Default)]
pub struct BlockhashTracker {
    last: Mutex<Hash>,
}

impl BlockhashTracker {
    pub async fn next<T: CounterTransport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<Hash, CounterClientError> {
        let mut last = self.last.lock().await;
        let blockhash = transport.new_blockhash(&last).await?;
        *last = blockhash;
        Ok(blockhash)
    }
}
