use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use super::disbursement::MerchantDisbursement;
use super::merchant::{DisbursementFrequency, Merchant};
use super::order::Order;
use crate::error::Result;

pub type StorageRef = Arc<dyn Storage>;

/// Persistence operations the pipelines depend on.
///
/// "Not found" is expressed as `Ok(None)`, never as an error. Aggregation
/// methods return synthesized [`MerchantDisbursement`] rows: the window
/// filter selects source rows whose own window lies entirely inside
/// `[from, to]`, and the `frequency` argument tags the produced rows.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn merchant_by_reference(&self, reference: &str) -> Result<Option<Merchant>>;
    async fn merchant(&self, id: Uuid) -> Result<Option<Merchant>>;

    /// Inserts a new order. Callers are expected to check [`Storage::order`]
    /// first; the order id is the idempotency key.
    async fn insert_order(&self, order: Order) -> Result<()>;
    async fn order(&self, id: &str) -> Result<Option<Order>>;

    /// Sums the un-disbursed orders created on `day`, one aggregate row per
    /// merchant with activity, tagged daily with window `[day, day]`.
    async fn sum_orders(&self, day: NaiveDate) -> Result<Vec<MerchantDisbursement>>;

    /// Persists a disbursement row, stamping its `created_at`.
    async fn insert_disbursement(&self, disbursement: MerchantDisbursement) -> Result<()>;

    /// Flags every order created on `day` as disbursed in one bulk update.
    async fn mark_orders_disbursed(&self, day: NaiveDate) -> Result<()>;

    /// Sums prior disbursement rows per merchant over `[from, to]`.
    async fn sum_disbursements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        frequency: DisbursementFrequency,
    ) -> Result<Vec<MerchantDisbursement>>;

    /// Like [`Storage::sum_disbursements`] but for a single merchant;
    /// `None` when the merchant had no rows in the window.
    async fn sum_disbursements_for_merchant(
        &self,
        merchant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        frequency: DisbursementFrequency,
    ) -> Result<Option<MerchantDisbursement>>;
}
