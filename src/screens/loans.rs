//! Map loans screen

use async_trait::async_trait;

use super::{Navigation, Screen, ScreenCore, Table};
use crate::{
    error::{AppError, AppResult},
    models::{EntityRef, Loan, LoanForm, ReturnForm},
    store::RequestStatus,
    AppContext,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRow {
    pub id: String,
    pub codigo: String,
    pub estudiante: String,
    pub mapa: String,
    pub fecha_prestamo: String,
    pub devuelto: bool,
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        let name = |r: &Option<EntityRef>| {
            r.as_ref()
                .map(|r| r.nombre().unwrap_or(r.id()).to_string())
                .unwrap_or_default()
        };

        Self {
            id: loan.id.clone(),
            codigo: loan.codigo.clone(),
            estudiante: name(&loan.estudiante),
            mapa: name(&loan.mapa),
            fecha_prestamo: loan.fecha_prestamo.clone().unwrap_or_default(),
            devuelto: loan.is_returned(),
        }
    }
}

pub struct LoansScreen {
    core: ScreenCore,
}

impl LoansScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            core: ScreenCore::new(ctx),
        }
    }

    pub async fn rows(&self) -> Vec<LoanRow> {
        self.core
            .ctx
            .store
            .loans
            .select(|slice| slice.items.iter().map(LoanRow::from).collect())
            .await
    }

    pub async fn create(&self, form: &LoanForm) -> AppResult<Loan> {
        let result = self.core.ctx.loans().create(form, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    /// Register the return of the loan with the given id
    pub async fn register_return(&self, id: &str, form: &ReturnForm) -> AppResult<()> {
        let loan = self.core.ctx.store.loans.select(|s| s.find(id).cloned()).await;
        let result = match loan {
            Some(loan) => {
                self.core
                    .ctx
                    .loans()
                    .register_return(&loan, form, &self.core.lifetime)
                    .await
            }
            None => Err(AppError::NotFound(format!("Préstamo {} no encontrado", id))),
        };
        self.core.settle(result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.core.ctx.loans().delete(id, &self.core.lifetime).await;
        self.core.settle(result).await
    }
}

#[async_trait]
impl Screen for LoansScreen {
    async fn mount(&mut self) -> Navigation {
        if self.core.begin().await == Navigation::Login {
            return Navigation::Login;
        }
        let loaded = self.core.ctx.loans().list(&self.core.lifetime).await;
        self.core.after_load([loaded]).await
    }

    async fn unmount(&mut self) {
        self.core.end();
        self.core.ctx.loans().reset().await;
    }

    async fn table(&self) -> Table {
        Table {
            columns: vec!["CODIGO", "ESTUDIANTE", "MAPA", "FECHA PRESTAMO", "ESTADO"],
            rows: self
                .rows()
                .await
                .into_iter()
                .map(|r| {
                    let estado = if r.devuelto { "DEVUELTO" } else { "PRESTADO" };
                    vec![r.codigo, r.estudiante, r.mapa, r.fecha_prestamo, estado.to_string()]
                })
                .collect(),
        }
    }

    async fn status(&self) -> RequestStatus {
        self.core.ctx.store.loans.select(|s| s.status.clone()).await
    }
}
