//! SGE command line client
//!
//! Logs in and prints one screen's table:
//! `sge <asignaturas|grados|libros|pagos|prestamos> [MODALIDAD]`

use std::{env, sync::Arc};

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sge_client::{
    config::AppConfig,
    models::{DateRange, LoginForm, Modalidad, ModalidadFilter},
    notify::TracingNotifier,
    screens::{
        BooksScreen, GradesScreen, LoansScreen, LoginScreen, Navigation, PaymentsScreen, Screen,
        SubjectsScreen, Table,
    },
    AppContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sge_client={},sge={}", config.logging.level, config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting SGE client v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(base_url = %config.api.base_url, "Using backend");

    let mut args = env::args().skip(1);
    let screen_name = args.next().unwrap_or_else(|| "asignaturas".to_string());
    let filter: ModalidadFilter = match args.next() {
        Some(value) => value.parse().map_err(anyhow::Error::msg)?,
        None => ModalidadFilter::All,
    };

    let ctx = AppContext::new(config, Arc::new(TracingNotifier));

    let form = LoginForm {
        correo: env::var("SGE_CORREO").context("SGE_CORREO must be set")?,
        password: env::var("SGE_PASSWORD").context("SGE_PASSWORD must be set")?,
        modalidad: env::var("SGE_MODALIDAD")
            .ok()
            .map(|m| m.parse::<Modalidad>())
            .transpose()
            .map_err(anyhow::Error::msg)?,
    };

    let login = LoginScreen::new(ctx.clone());
    login.submit(&form).await.context("Login failed")?;

    let mut screen: Box<dyn Screen> = match screen_name.as_str() {
        "asignaturas" => {
            let mut screen = SubjectsScreen::new(ctx.clone());
            screen.set_filter(filter);
            Box::new(screen)
        }
        "grados" => {
            let mut screen = GradesScreen::new(ctx.clone());
            screen.set_filter(filter);
            Box::new(screen)
        }
        "libros" => Box::new(BooksScreen::new(ctx.clone())),
        "pagos" => Box::new(PaymentsScreen::new(ctx.clone(), DateRange::default())),
        "prestamos" => Box::new(LoansScreen::new(ctx.clone())),
        other => bail!("Unknown screen: {}", other),
    };

    if screen.mount().await == Navigation::Login {
        bail!("Session rejected by the backend");
    }

    let status = screen.status().await;
    if status.is_error {
        screen.unmount().await;
        bail!("{}", status.message);
    }

    print_table(&screen.table().await);
    screen.unmount().await;

    Ok(())
}

fn print_table(table: &Table) {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(table.columns.clone()));
    for row in &table.rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}
