//! Grades screen

use async_trait::async_trait;

use super::{Navigation, Screen, ScreenCore, Table};
use crate::{
    error::AppResult,
    models::{enums::estado_label, Grade, GradeForm, ModalidadFilter},
    store::RequestStatus,
    AppContext,
};

pub struct GradesScreen {
    core: ScreenCore,
    filter: ModalidadFilter,
}

impl GradesScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            core: ScreenCore::new(ctx),
            filter: ModalidadFilter::All,
        }
    }

    pub fn set_filter(&mut self, filter: ModalidadFilter) {
        self.filter = filter;
    }

    pub async fn grades(&self) -> Vec<Grade> {
        let filter = &self.filter;
        self.core
            .ctx
            .store
            .grades
            .select(|slice| {
                slice
                    .items
                    .iter()
                    .filter(|g| filter.matches(g.modalidad.as_ref()))
                    .cloned()
                    .collect()
            })
            .await
    }

    pub async fn create(&self, form: &GradeForm) -> AppResult<Grade> {
        let result = self.core.ctx.grades().create(form, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn update(&self, grade: &Grade) -> AppResult<()> {
        let result = self.core.ctx.grades().update(grade, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.core.ctx.grades().delete(id, &self.core.lifetime).await;
        self.core.settle(result).await
    }
}

#[async_trait]
impl Screen for GradesScreen {
    async fn mount(&mut self) -> Navigation {
        if self.core.begin().await == Navigation::Login {
            return Navigation::Login;
        }
        let loaded = self.core.ctx.grades().list(&self.core.lifetime).await;
        self.core.after_load([loaded]).await
    }

    async fn unmount(&mut self) {
        self.core.end();
        self.core.ctx.grades().reset().await;
    }

    async fn table(&self) -> Table {
        Table {
            columns: vec!["NOMBRE", "NIVEL", "MODALIDAD", "ESTADO"],
            rows: self
                .grades()
                .await
                .iter()
                .map(|g| {
                    vec![
                        g.nombre.clone(),
                        g.nivel.clone().unwrap_or_default(),
                        g.modalidad.as_ref().map(|m| m.to_string()).unwrap_or_default(),
                        estado_label(g.estado).to_string(),
                    ]
                })
                .collect(),
        }
    }

    async fn status(&self) -> RequestStatus {
        self.core.ctx.store.grades.select(|s| s.status.clone()).await
    }
}
