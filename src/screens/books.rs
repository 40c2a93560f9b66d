//! Books screen; also loads grades to name each book's grade

use async_trait::async_trait;

use super::{Navigation, Screen, ScreenCore, Table};
use crate::{
    error::AppResult,
    models::{enums::estado_label, Book, BookForm, Grade},
    store::{RequestStatus, ResourceSlice},
    AppContext,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub grado: String,
    pub cantidad: u32,
    pub estado: &'static str,
}

impl BookRow {
    fn new(book: &Book, grades: &ResourceSlice<Grade>) -> Self {
        let grado = book
            .grado
            .as_ref()
            .and_then(|grado| {
                grado
                    .nombre()
                    .map(str::to_string)
                    .or_else(|| grades.find(grado.id()).map(|g| g.nombre.clone()))
            })
            .unwrap_or_default();

        Self {
            id: book.id.clone(),
            codigo: book.codigo.clone(),
            nombre: book.nombre.clone(),
            grado,
            cantidad: book.cantidad_or_zero(),
            estado: estado_label(book.estado),
        }
    }
}

pub struct BooksScreen {
    core: ScreenCore,
}

impl BooksScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            core: ScreenCore::new(ctx),
        }
    }

    pub async fn rows(&self) -> Vec<BookRow> {
        let grades = self.core.ctx.store.grades.snapshot().await;
        self.core
            .ctx
            .store
            .books
            .select(|slice| slice.items.iter().map(|b| BookRow::new(b, &grades)).collect())
            .await
    }

    /// Full record for the details drawer
    pub async fn details(&self, id: &str) -> Option<Book> {
        self.core.ctx.store.books.select(|s| s.find(id).cloned()).await
    }

    /// Grades offered by the book forms
    pub async fn grade_options(&self) -> Vec<(String, String)> {
        self.core
            .ctx
            .store
            .grades
            .select(|s| s.items.iter().map(|g| (g.id.clone(), g.nombre.clone())).collect())
            .await
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let result = self.core.ctx.books().create(form, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn update(&self, book: &Book) -> AppResult<()> {
        let result = self.core.ctx.books().update(book, &self.core.lifetime).await;
        self.core.settle(result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.core.ctx.books().delete(id, &self.core.lifetime).await;
        self.core.settle(result).await
    }
}

#[async_trait]
impl Screen for BooksScreen {
    async fn mount(&mut self) -> Navigation {
        if self.core.begin().await == Navigation::Login {
            return Navigation::Login;
        }
        let books = self.core.ctx.books();
        let grades = self.core.ctx.grades();
        let (books_loaded, grades_loaded) = tokio::join!(
            books.list(&self.core.lifetime),
            grades.list(&self.core.lifetime)
        );
        self.core.after_load([books_loaded, grades_loaded]).await
    }

    async fn unmount(&mut self) {
        self.core.end();
        self.core.ctx.books().reset().await;
        self.core.ctx.grades().reset().await;
    }

    async fn table(&self) -> Table {
        Table {
            columns: vec!["CODIGO", "NOMBRE", "GRADO", "CANTIDAD", "ESTADO"],
            rows: self
                .rows()
                .await
                .into_iter()
                .map(|r| {
                    vec![
                        r.codigo,
                        r.nombre,
                        r.grado,
                        r.cantidad.to_string(),
                        r.estado.to_string(),
                    ]
                })
                .collect(),
        }
    }

    async fn status(&self) -> RequestStatus {
        self.core.ctx.store.books.select(|s| s.status.clone()).await
    }
}
