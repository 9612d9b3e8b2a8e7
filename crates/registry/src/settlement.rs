//! Settlement-gateway collaborator for withdrawals.

use async_trait::async_trait;
use namereg_types::{Amount, OwnerId};

/// External payout channel. The registry treats a successful
/// `pay_out` as the commit point of a withdrawal: until the gateway
/// confirms, the drained balance is only reserved and is restored if
/// the payout fails.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    async fn pay_out(&self, destination: &OwnerId, amount: Amount) -> anyhow::Result<()>;
}

/// Gateway that accepts every payout without moving real funds.
/// Suitable for tests and dry runs.
#[derive(Default)]
pub struct AcceptingGateway;

#[async_trait]
impl SettlementGateway for AcceptingGateway {
    async fn pay_out(&self, destination: &OwnerId, amount: Amount) -> anyhow::Result<()> {
        tracing::debug!(%destination, amount, "payout accepted");
        Ok(())
    }
}
