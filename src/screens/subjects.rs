//! Subjects screen

use async_trait::async_trait;

use super::{Navigation, Screen, ScreenCore, Table};
use crate::{
    error::AppResult,
    models::{enums::estado_label, Modalidad, ModalidadFilter, Subject, SubjectForm},
    store::RequestStatus,
    AppContext,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    pub id: String,
    pub nombre: String,
    pub nivel: String,
    pub modalidad: String,
    pub estado: &'static str,
}

impl From<&Subject> for SubjectRow {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            nombre: subject.nombre.clone(),
            nivel: subject.nivel.clone().unwrap_or_default(),
            modalidad: subject.modalidad.as_ref().map(Modalidad::to_string).unwrap_or_default(),
            estado: estado_label(subject.estado),
        }
    }
}

pub struct SubjectsScreen {
    core: ScreenCore,
    filter: ModalidadFilter,
}

impl SubjectsScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            core: ScreenCore::new(ctx),
            filter: ModalidadFilter::All,
        }
    }

    pub fn filter(&self) -> &ModalidadFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ModalidadFilter) {
        self.filter = filter;
    }

    /// Rows matching the current modality filter
    pub async fn rows(&self) -> Vec<SubjectRow> {
        let filter = &self.filter;
        self.core
            .ctx
            .store
            .subjects
            .select(|slice| {
                slice
                    .items
                    .iter()
                    .filter(|s| filter.matches(s.modalidad.as_ref()))
                    .map(SubjectRow::from)
                    .collect()
            })
            .await
    }

    pub async fn create(&self, form: &SubjectForm) -> AppResult<Subject> {
        let result = self.core.ctx.subjects().create(form, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn update(&self, subject: &Subject) -> AppResult<()> {
        let result = self.core.ctx.subjects().update(subject, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.core.ctx.subjects().delete(id, &self.core.lifetime).await;
        self.core.settle(result).await
    }
}

#[async_trait]
impl Screen for SubjectsScreen {
    async fn mount(&mut self) -> Navigation {
        if self.core.begin().await == Navigation::Login {
            return Navigation::Login;
        }
        let loaded = self.core.ctx.subjects().list(&self.core.lifetime).await;
        self.core.after_load([loaded]).await
    }

    async fn unmount(&mut self) {
        self.core.end();
        self.core.ctx.subjects().reset().await;
    }

    async fn table(&self) -> Table {
        Table {
            columns: vec!["NOMBRE", "NIVEL", "MODALIDAD", "ESTADO"],
            rows: self
                .rows()
                .await
                .into_iter()
                .map(|r| vec![r.nombre, r.nivel, r.modalidad, r.estado.to_string()])
                .collect(),
        }
    }

    async fn status(&self) -> RequestStatus {
        self.core.ctx.store.subjects.select(|s| s.status.clone()).await
    }
}
