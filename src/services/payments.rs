//! Payment endpoints beyond plain CRUD

use reqwest::Method;

use super::ResourceService;
use crate::{
    error::AppResult,
    models::{
        payment::{PaymentEnvelope, PaymentStatusUpdate},
        DateRange, Payment, PaymentStatus, Resource,
    },
    notify::{Toast, ToastPosition},
};

impl ResourceService<Payment> {
    /// Payments registered within the date range
    pub async fn list_in_range(&self, range: &DateRange, token: &str) -> AppResult<Vec<Payment>> {
        tracing::debug!(desde = ?range.desde, hasta = ?range.hasta, "GET payments in range");
        self.api
            .send(
                self.api
                    .request(Method::GET, Payment::PATH, Some(token))
                    .query(range),
            )
            .await
    }

    /// Payments of one student within the date range
    pub async fn list_by_student(
        &self,
        student_id: &str,
        range: &DateRange,
        token: &str,
    ) -> AppResult<Vec<Payment>> {
        let path = format!("{}/estudiante/{}", Payment::PATH, student_id);
        self.api
            .send(self.api.request(Method::GET, &path, Some(token)).query(range))
            .await
    }

    /// Change the payment status.
    ///
    /// The endpoint answers `{ "pago": {...} }`; the bare payment is returned.
    pub async fn update_status(
        &self,
        id: &str,
        estado: PaymentStatus,
        token: &str,
    ) -> AppResult<Payment> {
        let path = format!("{}/estado/{}", Payment::PATH, id);
        let envelope: PaymentEnvelope = self
            .api
            .send(
                self.api
                    .request(Method::PUT, &path, Some(token))
                    .json(&PaymentStatusUpdate { id, estado }),
            )
            .await?;

        self.notifier.notify(
            Toast::success(
                "ESTADO ACTUALIZADO",
                "Estado del pago ha sido actualizado",
                self.durations.success_duration_ms,
            )
            .at(ToastPosition::Top),
        );
        Ok(envelope.pago)
    }
}
