//! CEBA payments screen, scoped by date range and optionally by student

use async_trait::async_trait;
use rust_decimal::Decimal;
use validator::Validate;

use super::{Navigation, Screen, ScreenCore, Table};
use crate::{
    error::AppResult,
    models::{DateRange, Payment, PaymentForm, PaymentStatus},
    store::RequestStatus,
    AppContext,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub id: String,
    pub estudiante: String,
    pub concepto: String,
    pub monto: Decimal,
    pub fecha: String,
    pub estado: PaymentStatus,
}

impl From<&Payment> for PaymentRow {
    fn from(payment: &Payment) -> Self {
        let estudiante = payment
            .estudiante
            .as_ref()
            .map(|e| e.nombre().unwrap_or(e.id()).to_string())
            .unwrap_or_default();

        Self {
            id: payment.id.clone(),
            estudiante,
            concepto: payment.concepto.clone(),
            monto: payment.monto,
            fecha: payment
                .fecha
                .map(|f| f.format("%d-%m-%Y").to_string())
                .unwrap_or_default(),
            estado: payment.estado.clone(),
        }
    }
}

pub struct PaymentsScreen {
    core: ScreenCore,
    range: DateRange,
    student: Option<String>,
}

impl PaymentsScreen {
    pub fn new(ctx: AppContext, range: DateRange) -> Self {
        Self {
            core: ScreenCore::new(ctx),
            range,
            student: None,
        }
    }

    /// Scope the screen to one student's payments
    pub fn for_student(ctx: AppContext, student_id: impl Into<String>, range: DateRange) -> Self {
        Self {
            student: Some(student_id.into()),
            ..Self::new(ctx, range)
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    async fn load(&self) -> AppResult<()> {
        let payments = self.core.ctx.payments();
        match &self.student {
            Some(student) => {
                payments
                    .list_by_student(student, &self.range, &self.core.lifetime)
                    .await
            }
            None => payments.list_in_range(&self.range, &self.core.lifetime).await,
        }
    }

    /// Change the date range and reload; an invalid range keeps the current one
    pub async fn set_range(&mut self, range: DateRange) -> AppResult<()> {
        range.validate()?;
        self.range = range;
        let result = self.load().await;
        self.core.settle(result).await
    }

    pub async fn rows(&self) -> Vec<PaymentRow> {
        self.core
            .ctx
            .store
            .payments
            .select(|slice| slice.items.iter().map(PaymentRow::from).collect())
            .await
    }

    /// Sum of the listed amounts, excluding annulled payments
    pub async fn total(&self) -> Decimal {
        self.core
            .ctx
            .store
            .payments
            .select(|slice| {
                slice
                    .items
                    .iter()
                    .filter(|p| p.estado != PaymentStatus::Anulado)
                    .map(|p| p.monto)
                    .sum()
            })
            .await
    }

    pub async fn create(&self, form: &PaymentForm) -> AppResult<Payment> {
        let result = self.core.ctx.payments().create(form, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn update(&self, payment: &Payment) -> AppResult<()> {
        let result = self.core.ctx.payments().update(payment, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn update_status(&self, id: &str, estado: PaymentStatus) -> AppResult<()> {
        let result = self
            .core
            .ctx
            .payments()
            .update_status(id, estado, &self.core.lifetime)
            .await;
        self.core.settle(result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.core.ctx.payments().delete(id, &self.core.lifetime).await;
        self.core.settle(result).await
    }
}

#[async_trait]
impl Screen for PaymentsScreen {
    async fn mount(&mut self) -> Navigation {
        if self.core.begin().await == Navigation::Login {
            return Navigation::Login;
        }
        let loaded = self.load().await;
        self.core.after_load([loaded]).await
    }

    async fn unmount(&mut self) {
        self.core.end();
        self.core.ctx.payments().reset().await;
    }

    async fn table(&self) -> Table {
        Table {
            columns: vec!["ESTUDIANTE", "CONCEPTO", "MONTO", "FECHA", "ESTADO"],
            rows: self
                .rows()
                .await
                .into_iter()
                .map(|r| {
                    vec![
                        r.estudiante,
                        r.concepto,
                        r.monto.round_dp(2).to_string(),
                        r.fecha,
                        r.estado.to_string(),
                    ]
                })
                .collect(),
        }
    }

    async fn status(&self) -> RequestStatus {
        self.core.ctx.store.payments.select(|s| s.status.clone()).await
    }
}
