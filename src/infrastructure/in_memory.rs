use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::disbursement::MerchantDisbursement;
use crate::domain::merchant::{DisbursementFrequency, Merchant};
use crate::domain::order::Order;
use crate::domain::ports::Storage;
use crate::error::Result;

/// A thread-safe in-memory storage backend.
///
/// Uses `Arc<RwLock<...>>` maps so clones share state, which lets a binary
/// keep a concrete handle for reporting while the pipelines hold the same
/// store behind `Arc<dyn Storage>`. Also the substitutable test double for
/// every pipeline test in this crate.
#[derive(Default, Clone)]
pub struct InMemoryStorage {
    merchants: Arc<RwLock<HashMap<Uuid, Merchant>>>,
    orders: Arc<RwLock<HashMap<String, Order>>>,
    disbursements: Arc<RwLock<Vec<MerchantDisbursement>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a merchant. Onboarding is outside the engine's scope, so this
    /// lives on the concrete store rather than on the `Storage` port.
    pub async fn insert_merchant(&self, merchant: Merchant) {
        let mut merchants = self.merchants.write().await;
        merchants.insert(merchant.id, merchant);
    }

    /// Snapshot of all persisted disbursement rows, ordered by creation.
    pub async fn disbursements(&self) -> Vec<MerchantDisbursement> {
        self.disbursements.read().await.clone()
    }

    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn merchant_by_reference(&self, reference: &str) -> Result<Option<Merchant>> {
        let merchants = self.merchants.read().await;
        Ok(merchants
            .values()
            .find(|m| m.reference == reference)
            .cloned())
    }

    async fn merchant(&self, id: Uuid) -> Result<Option<Merchant>> {
        let merchants = self.merchants.read().await;
        Ok(merchants.get(&id).cloned())
    }

    async fn insert_order(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.entry(order.id.clone()).or_insert(order);
        Ok(())
    }

    async fn order(&self, id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(id).cloned())
    }

    async fn sum_orders(&self, day: NaiveDate) -> Result<Vec<MerchantDisbursement>> {
        let orders = self.orders.read().await;
        let mut grouped: HashMap<Uuid, (Decimal, Decimal, u64)> = HashMap::new();
        for order in orders.values().filter(|o| o.created_at == day && !o.disbursed) {
            let entry = grouped.entry(order.merchant_id).or_default();
            entry.0 += order.amount;
            entry.1 += order.fee_amount;
            entry.2 += 1;
        }

        let mut rows: Vec<MerchantDisbursement> = grouped
            .into_iter()
            .map(
                |(merchant_id, (sum_amount, fee_amount, entries))| MerchantDisbursement {
                    id: Uuid::new_v4(),
                    merchant_id,
                    frequency: DisbursementFrequency::Daily,
                    orders_start_at: day,
                    orders_end_at: day,
                    fee_amount,
                    fee_amount_correction: Decimal::ZERO,
                    orders_sum_amount: sum_amount,
                    orders_total_entries: entries,
                    created_at: Utc::now(),
                },
            )
            .collect();
        rows.sort_by_key(|d| d.merchant_id);
        Ok(rows)
    }

    async fn insert_disbursement(&self, disbursement: MerchantDisbursement) -> Result<()> {
        let mut disbursements = self.disbursements.write().await;
        disbursements.push(MerchantDisbursement {
            created_at: Utc::now(),
            ..disbursement
        });
        Ok(())
    }

    async fn mark_orders_disbursed(&self, day: NaiveDate) -> Result<()> {
        let mut orders = self.orders.write().await;
        for order in orders.values_mut().filter(|o| o.created_at == day) {
            order.disbursed = true;
        }
        Ok(())
    }

    async fn sum_disbursements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        frequency: DisbursementFrequency,
    ) -> Result<Vec<MerchantDisbursement>> {
        let disbursements = self.disbursements.read().await;
        let mut rows = sum_rows(&disbursements, from, to, frequency, None);
        rows.sort_by_key(|d| d.merchant_id);
        Ok(rows)
    }

    async fn sum_disbursements_for_merchant(
        &self,
        merchant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        frequency: DisbursementFrequency,
    ) -> Result<Option<MerchantDisbursement>> {
        let disbursements = self.disbursements.read().await;
        let rows = sum_rows(&disbursements, from, to, frequency, Some(merchant_id));
        Ok(rows.into_iter().next())
    }
}

/// Groups disbursement rows whose window lies entirely inside `[from, to]`
/// by merchant, stamping the produced aggregates with `frequency`.
fn sum_rows(
    rows: &[MerchantDisbursement],
    from: NaiveDate,
    to: NaiveDate,
    frequency: DisbursementFrequency,
    merchant_id: Option<Uuid>,
) -> Vec<MerchantDisbursement> {
    let mut grouped: HashMap<Uuid, (Decimal, Decimal, Decimal, u64)> = HashMap::new();
    for row in rows.iter().filter(|d| {
        d.orders_start_at >= from
            && d.orders_end_at <= to
            && merchant_id.is_none_or(|id| d.merchant_id == id)
    }) {
        let entry = grouped.entry(row.merchant_id).or_default();
        entry.0 += row.fee_amount;
        entry.1 += row.fee_amount_correction;
        entry.2 += row.orders_sum_amount;
        entry.3 += row.orders_total_entries;
    }

    grouped
        .into_iter()
        .map(
            |(merchant_id, (fee, correction, sum_amount, entries))| MerchantDisbursement {
                id: Uuid::new_v4(),
                merchant_id,
                frequency,
                orders_start_at: from,
                orders_end_at: to,
                fee_amount: fee,
                fee_amount_correction: correction,
                orders_sum_amount: sum_amount,
                orders_total_entries: entries,
                created_at: Utc::now(),
            },
        )
        .collect()
}
