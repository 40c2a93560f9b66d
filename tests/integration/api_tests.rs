//! Client integration tests against an in-process backend

mod support;

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use sge_client::{
    models::{
        BookForm, DateRange, Modalidad, ModalidadFilter, PaymentStatus, ReturnForm, Subject,
        SubjectForm,
    },
    notify::{ToastPosition, ToastStatus},
    screens::{BooksScreen, LoansScreen, LoginScreen, Navigation, PaymentsScreen, Screen, SubjectsScreen},
    AppError,
};

use support::{context, logged_in, login_form, spawn, Backend, PASSWORD};

fn subjects_fixture() -> serde_json::Value {
    json!([
        {"_id": "s1", "nombre": "Matemática", "nivel": "SECUNDARIA", "modalidad": "EBR", "estado": true},
        {"_id": "s2", "nombre": "Comunicación", "nivel": "SECUNDARIA", "modalidad": "CEBA", "estado": true},
        {"_id": "s3", "nombre": "Arte", "nivel": "PRIMARIA", "modalidad": "EBR", "estado": false}
    ])
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_list_returns_exactly_server_sequence() {
    let server = spawn(Backend::new().with("asignaturas", json!([{"_id": 1, "nombre": "Matemática"}]))).await;
    let (ctx, _) = context(&server);

    ctx.subjects().list(&CancellationToken::new()).await.unwrap();

    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 1);
    assert_eq!(slice.items[0].id, "1");
    assert_eq!(slice.items[0].nombre, "Matemática");
    assert!(!slice.status.is_loading);
    assert!(slice.status.is_success);
    assert!(!slice.status.is_error);
}

#[tokio::test]
async fn test_list_does_not_merge_with_previous_state() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = context(&server);
    let subjects = ctx.subjects();

    subjects.list(&CancellationToken::new()).await.unwrap();
    server.backend(|b| b.collections.insert("asignaturas".into(), vec![json!({"_id": "s9", "nombre": "Física"})]));
    subjects.list(&CancellationToken::new()).await.unwrap();

    let ids: Vec<String> = ctx.store.subjects.snapshot().await.items.into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["s9".to_string()]);
}

#[tokio::test]
async fn test_create_appends_server_assigned_record() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, notifier) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();

    let form = SubjectForm {
        nombre: "Historia".to_string(),
        nivel: "SECUNDARIA".to_string(),
        modalidad: Some(Modalidad::Ceba),
        ..SubjectForm::default()
    };
    let created = subjects.create(&form, &cancel).await.unwrap();

    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 4);
    assert!(created.id.starts_with("asignaturas-"));
    assert_eq!(slice.find(&created.id).map(|s| s.nombre.as_str()), Some("Historia"));

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "ASIGNATURA REGISTRADA");
    assert_eq!(toasts[0].status, ToastStatus::Success);
}

#[tokio::test]
async fn test_update_changes_only_matching_record() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();
    let before = ctx.store.subjects.snapshot().await.items;

    let mut edited: Subject = before[1].clone();
    edited.nombre = "Comunicación Integral".to_string();
    subjects.update(&edited, &cancel).await.unwrap();

    let after = ctx.store.subjects.snapshot().await.items;
    assert_eq!(after.len(), before.len());
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1].nombre, "Comunicación Integral");
    assert_eq!(after[2], before[2]);
    assert!(server.requests().contains(&"PUT /asignaturas/s2".to_string()));
}

#[tokio::test]
async fn test_delete_removes_record() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, notifier) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();

    subjects.delete("s3", &cancel).await.unwrap();

    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 2);
    assert!(slice.find("s3").is_none());
    assert_eq!(notifier.toasts()[0].title, "ASIGNATURA ELIMINADA");
}

#[tokio::test]
async fn test_delete_absent_id_keeps_collection_and_succeeds() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();
    let before = ctx.store.subjects.snapshot().await.items;

    subjects.delete("5", &cancel).await.unwrap();

    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items, before);
    assert!(slice.status.is_success);
    assert!(server.requests().contains(&"DELETE /asignaturas/5".to_string()));
}

#[tokio::test]
async fn test_get_merges_record_by_id() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();

    server.backend(|b| {
        b.collections.get_mut("asignaturas").unwrap()[1]["nombre"] = json!("Comunicación II");
    });
    subjects.get("s2", &cancel).await.unwrap();

    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 3);
    assert_eq!(slice.items[1].id, "s2");
    assert_eq!(slice.items[1].nombre, "Comunicación II");
    assert_eq!(slice.items[0].nombre, "Matemática");
    assert!(server.requests().contains(&"GET /asignaturas/s2".to_string()));
}

#[tokio::test]
async fn test_get_missing_record_sets_error() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();

    let result = subjects.get("zz", &cancel).await;

    assert!(matches!(result, Err(AppError::Api { status: 404, .. })));
    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 3);
    assert!(slice.status.is_error);
    assert!(!slice.status.is_loading);
    assert_eq!(slice.status.message, "Registro no encontrado");
}

#[tokio::test]
async fn test_invalid_form_makes_no_request() {
    let server = spawn(Backend::new()).await;
    let (ctx, _) = logged_in(&server).await;
    let requests_before = server.requests().len();

    let form = SubjectForm {
        nombre: "Química".to_string(),
        nivel: String::new(),
        modalidad: Some(Modalidad::Ebr),
        ..SubjectForm::default()
    };
    let result = ctx.subjects().create(&form, &CancellationToken::new()).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(server.requests().len(), requests_before);
    assert!(ctx.store.subjects.snapshot().await.is_initial());
}

#[tokio::test]
async fn test_backend_message_is_stored_on_rejection() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;
    let subjects = ctx.subjects();
    let cancel = CancellationToken::new();
    subjects.list(&cancel).await.unwrap();

    let form = SubjectForm {
        nombre: "DUPLICADA".to_string(),
        nivel: "PRIMARIA".to_string(),
        modalidad: Some(Modalidad::Ebr),
        ..SubjectForm::default()
    };
    let result = subjects.create(&form, &cancel).await;

    assert!(matches!(result, Err(AppError::Api { status: 400, .. })));
    let slice = ctx.store.subjects.snapshot().await;
    assert_eq!(slice.items.len(), 3);
    assert!(slice.status.is_error);
    assert!(!slice.status.is_loading);
    assert_eq!(slice.status.message, "La asignatura ya existe");
}

#[tokio::test]
async fn test_cancelled_list_discards_late_response() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    server.backend(|b| b.list_delay = Duration::from_millis(300));
    let (ctx, _) = context(&server);

    let cancel = CancellationToken::new();
    let subjects = ctx.subjects();
    let token = cancel.clone();
    let pending = tokio::spawn(async move { subjects.list(&token).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    let result = pending.await.unwrap();
    assert!(matches!(result, Err(AppError::Cancelled)));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let slice = ctx.store.subjects.snapshot().await;
    assert!(slice.items.is_empty());
    assert!(!slice.status.is_success);
}

#[tokio::test]
async fn test_screen_without_session_redirects_to_login() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = context(&server);

    let mut screen = SubjectsScreen::new(ctx);
    assert_eq!(screen.mount().await, Navigation::Login);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_subjects_screen_filters_and_resets_on_unmount() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, _) = logged_in(&server).await;

    let mut screen = SubjectsScreen::new(ctx.clone());
    assert_eq!(screen.mount().await, Navigation::Stay);
    assert_eq!(screen.rows().await.len(), 3);

    screen.set_filter(ModalidadFilter::Only(Modalidad::Ebr));
    let rows = screen.rows().await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.modalidad == "EBR"));
    assert_eq!(rows[1].estado, "INACTIVO");

    let table = screen.table().await;
    assert_eq!(table.columns, vec!["NOMBRE", "NIVEL", "MODALIDAD", "ESTADO"]);
    assert_eq!(table.rows[0][0], "Matemática");

    screen.unmount().await;
    assert!(ctx.store.subjects.snapshot().await.is_initial());
}

#[tokio::test]
async fn test_failed_mount_raises_error_toast() {
    let server = spawn(Backend::new()).await;
    server.backend(|b| b.fail_lists = true);
    let (ctx, notifier) = logged_in(&server).await;

    let mut screen = SubjectsScreen::new(ctx);
    assert_eq!(screen.mount().await, Navigation::Stay);

    let status = screen.status().await;
    assert!(status.is_error);
    assert_eq!(status.message, "Error interno del servidor");

    let toasts = notifier.toasts();
    assert_eq!(toasts.last().map(|t| t.status), Some(ToastStatus::Error));
}

#[tokio::test]
async fn test_rotated_token_sends_user_to_login() {
    let server = spawn(Backend::new()).await;
    let (ctx, _) = logged_in(&server).await;
    server.backend(|b| b.token = "rotated".to_string());

    let mut screen = PaymentsScreen::new(ctx.clone(), DateRange::default());
    assert_eq!(screen.mount().await, Navigation::Login);
    assert!(!ctx.store.auth.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_mutation_clears_session() {
    let server = spawn(Backend::new().with("asignaturas", subjects_fixture())).await;
    let (ctx, notifier) = logged_in(&server).await;

    let mut screen = SubjectsScreen::new(ctx.clone());
    assert_eq!(screen.mount().await, Navigation::Stay);
    server.backend(|b| b.token = "rotated".to_string());

    let result = screen.delete("s1").await;

    assert!(matches!(result, Err(AppError::Api { status: 401, .. })));
    assert_eq!(Navigation::after(&result), Navigation::Login);
    assert!(!ctx.store.auth.is_authenticated().await);
    assert!(ctx.store.subjects.snapshot().await.find("s1").is_some());
    assert_eq!(notifier.toasts().last().map(|t| t.status), Some(ToastStatus::Error));

    assert_eq!(screen.mount().await, Navigation::Login);
    assert_eq!(LoginScreen::new(ctx).mount().await, Navigation::Stay);
}

#[tokio::test]
async fn test_books_screen_loads_grades_for_names() {
    let server = spawn(
        Backend::new()
            .with("grados", json!([{"_id": "g1", "nombre": "PRIMERO", "modalidad": "EBR", "estado": true}]))
            .with(
                "libros",
                json!([
                    {"_id": "b1", "codigo": "LIB-1", "nombre": "Comunicación", "grado": "g1", "cantidad": 12, "estado": true},
                    {"_id": "b2", "codigo": "LIB-2", "nombre": "Matemática", "grado": {"_id": "g2", "nombre": "SEGUNDO"}, "cantidad": null}
                ]),
            ),
    )
    .await;
    let (ctx, _) = logged_in(&server).await;

    let mut screen = BooksScreen::new(ctx.clone());
    assert_eq!(screen.mount().await, Navigation::Stay);

    let rows = screen.rows().await;
    assert_eq!(rows[0].grado, "PRIMERO");
    assert_eq!(rows[0].cantidad, 12);
    assert_eq!(rows[1].grado, "SEGUNDO");
    assert_eq!(rows[1].cantidad, 0);
    assert_eq!(screen.grade_options().await, vec![("g1".to_string(), "PRIMERO".to_string())]);

    let form = BookForm {
        codigo: "LIB-3".to_string(),
        nombre: "Ciencia".to_string(),
        grado: "g1".to_string(),
        cantidad: Some(3),
        estado: true,
        ..BookForm::default()
    };
    let created = screen.create(&form).await.unwrap();
    assert_eq!(screen.rows().await.len(), 3);
    assert_eq!(screen.details(&created.id).await.map(|b| b.codigo), Some("LIB-3".to_string()));

    screen.unmount().await;
    assert!(ctx.store.books.snapshot().await.is_initial());
    assert!(ctx.store.grades.snapshot().await.is_initial());
}

#[tokio::test]
async fn test_payments_range_and_status_update() {
    let server = spawn(Backend::new().with(
        "pagos_ceba",
        json!([
            {"_id": "p1", "estudiante": {"_id": "e1", "nombre": "ANA"}, "concepto": "MATRICULA", "monto": 150, "estado": "PENDIENTE", "fecha": "2024-01-10T00:00:00Z"},
            {"_id": "p2", "estudiante": "e2", "concepto": "PENSION", "monto": 80.5, "estado": "ANULADO"}
        ]),
    ))
    .await;
    let (ctx, notifier) = logged_in(&server).await;

    let range = DateRange::new(date("2024-01-01"), date("2024-01-31"));
    let mut screen = PaymentsScreen::new(ctx.clone(), range);
    assert_eq!(screen.mount().await, Navigation::Stay);
    assert!(server
        .requests()
        .contains(&"GET /pagos_ceba?desde=2024-01-01&hasta=2024-01-31".to_string()));

    let rows = screen.rows().await;
    assert_eq!(rows[0].estudiante, "ANA");
    assert_eq!(rows[0].fecha, "10-01-2024");
    assert_eq!(rows[1].estudiante, "e2");
    assert_eq!(screen.total().await, Decimal::new(150, 0));

    screen.update_status("p1", PaymentStatus::Cancelado).await.unwrap();
    let updated = ctx.store.payments.snapshot().await;
    assert_eq!(updated.find("p1").map(|p| p.estado.clone()), Some(PaymentStatus::Cancelado));
    assert_eq!(updated.items.len(), 2);

    let toast = notifier.toasts().pop().unwrap();
    assert_eq!(toast.title, "ESTADO ACTUALIZADO");
    assert_eq!(toast.position, ToastPosition::Top);
}

#[tokio::test]
async fn test_payments_for_student() {
    let server = spawn(Backend::new().with(
        "pagos_ceba",
        json!([
            {"_id": "p1", "estudiante": "e1", "concepto": "MATRICULA", "monto": 150},
            {"_id": "p2", "estudiante": "e2", "concepto": "PENSION", "monto": 80}
        ]),
    ))
    .await;
    let (ctx, _) = logged_in(&server).await;

    let mut screen = PaymentsScreen::for_student(ctx, "e2", DateRange::default());
    assert_eq!(screen.mount().await, Navigation::Stay);

    let rows = screen.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "p2");

    let invalid = DateRange::new(date("2024-02-01"), date("2024-01-01"));
    let result = screen.set_range(invalid).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(screen.range(), DateRange::default());

    let range = DateRange::new(date("2024-01-01"), date("2024-02-01"));
    screen.set_range(range).await.unwrap();
    assert_eq!(screen.range(), range);
    assert_eq!(screen.rows().await.len(), 1);
}

#[tokio::test]
async fn test_register_loan_return() {
    let server = spawn(Backend::new().with(
        "prestamos_mapas",
        json!([{"_id": "l1", "codigo": "MAP-01", "estudiante": {"_id": "e1", "nombre": "LUIS"}, "mapa": "m1", "fecha_prestamo": "2024-04-02"}]),
    ))
    .await;
    let (ctx, _) = logged_in(&server).await;

    let mut screen = LoansScreen::new(ctx.clone());
    assert_eq!(screen.mount().await, Navigation::Stay);
    assert!(!screen.rows().await[0].devuelto);

    let incomplete = ReturnForm {
        codigo: "map-01".to_string(),
        ..ReturnForm::default()
    };
    assert!(matches!(
        screen.register_return("l1", &incomplete).await,
        Err(AppError::Validation(_))
    ));

    let form = ReturnForm {
        codigo: "map-01".to_string(),
        fecha_devolucion: Some(date("2024-04-09")),
        descripcion_devolucion: "Devuelto sin daños".to_string(),
        observaciones: None,
    };
    screen.register_return("l1", &form).await.unwrap();

    let loan = ctx.store.loans.snapshot().await.find("l1").cloned().unwrap();
    assert_eq!(loan.codigo, "MAP-01");
    assert_eq!(loan.fecha_devolucion.as_deref(), Some("2024-04-09"));
    assert!(screen.rows().await[0].devuelto);

    assert!(matches!(
        screen.register_return("missing", &form).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_login_screen_flow() {
    let server = spawn(Backend::new()).await;
    let (ctx, notifier) = context(&server);
    let mut screen = LoginScreen::new(ctx.clone());
    assert_eq!(screen.mount().await, Navigation::Stay);

    let result = screen.submit(&login_form("wrong")).await;
    assert!(matches!(result, Err(AppError::Api { status: 400, .. })));
    assert_eq!(notifier.toasts()[0].description, "Usuario o contraseña incorrectos");
    assert!(screen.status().await.is_idle());
    assert!(!ctx.store.auth.is_authenticated().await);

    assert_eq!(screen.submit(&login_form(PASSWORD)).await.unwrap(), Navigation::Home);
    let session = ctx.store.auth.snapshot().await.user.unwrap();
    assert_eq!(session.nombre, "ADMINISTRADOR");
    assert_eq!(session.modalidad, Some(Modalidad::Ebr));
    assert_eq!(screen.mount().await, Navigation::Home);

    assert_eq!(screen.logout().await, Navigation::Login);
    assert!(!ctx.store.auth.is_authenticated().await);
}
