//! Simulated core-banking integration client.
//!
//! The real platform talks to a core-banking layer for card network updates
//! and dispute claims. This crate defines the client trait the API server
//! programs against, plus [`SimulatedCoreBanking`]: an implementation that
//! sleeps for a randomized 100-300 ms and returns fixed-shape success
//! payloads. There is no retry and no failure injection; a production
//! deployment would swap in a real client behind the same trait.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use cardvault_core::types::DbId;

/// Lower bound of the simulated round-trip latency.
const MIN_LATENCY_MS: u64 = 100;

/// Upper bound of the simulated round-trip latency.
const MAX_LATENCY_MS: u64 = 300;

/// Acknowledgement returned by every core-banking call.
#[derive(Debug, Clone, Serialize)]
pub struct CoreBankingAck {
    /// Reference id assigned by the (simulated) remote system.
    pub reference: String,
    /// Remote processing status; always `"ACCEPTED"` in the simulation.
    pub status: String,
}

/// Client interface to the core-banking integration layer.
#[async_trait]
pub trait CoreBanking: Send + Sync {
    /// Propagate a card status change to the card network.
    async fn notify_card_status(&self, card_id: DbId, status: &str) -> CoreBankingAck;

    /// Submit a dispute claim for chargeback processing.
    async fn submit_dispute_claim(
        &self,
        dispute_id: DbId,
        transaction_id: DbId,
        amount_cents: i64,
    ) -> CoreBankingAck;

    /// Flag a transaction as suspected fraud with the network.
    async fn flag_transaction_fraud(&self, transaction_id: DbId) -> CoreBankingAck;
}

/// In-process stand-in for the core-banking layer.
#[derive(Debug, Default, Clone)]
pub struct SimulatedCoreBanking;

impl SimulatedCoreBanking {
    /// Sleep for a uniformly random delay in the simulated latency band.
    async fn simulate_latency(&self) {
        let delay_ms = rand::rng().random_range(MIN_LATENCY_MS..=MAX_LATENCY_MS);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    fn ack(prefix: &str) -> CoreBankingAck {
        CoreBankingAck {
            reference: format!("{prefix}-{}", Uuid::new_v4()),
            status: "ACCEPTED".to_string(),
        }
    }
}

#[async_trait]
impl CoreBanking for SimulatedCoreBanking {
    async fn notify_card_status(&self, card_id: DbId, status: &str) -> CoreBankingAck {
        self.simulate_latency().await;
        tracing::debug!(card_id, status, "simulated card status notification");
        Self::ack("CARD")
    }

    async fn submit_dispute_claim(
        &self,
        dispute_id: DbId,
        transaction_id: DbId,
        amount_cents: i64,
    ) -> CoreBankingAck {
        self.simulate_latency().await;
        tracing::debug!(
            dispute_id,
            transaction_id,
            amount_cents,
            "simulated dispute claim submission"
        );
        Self::ack("DSP")
    }

    async fn flag_transaction_fraud(&self, transaction_id: DbId) -> CoreBankingAck {
        self.simulate_latency().await;
        tracing::debug!(transaction_id, "simulated fraud flag submission");
        Self::ack("FRD")
    }
}
