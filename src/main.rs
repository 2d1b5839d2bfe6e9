use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use impound_lot::config::database::DatabaseConfig;
use impound_lot::config::environment::EnvironmentConfig;
use impound_lot::database::{create_pool, run_migrations};
use impound_lot::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚛 Impound Lot - Sistema de Depósito Vehicular");
    info!("==============================================");

    let config = EnvironmentConfig::from_env();
    let db_config = DatabaseConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(pool, config);
    let app = impound_lot::build_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("📋 Casos:");
    info!("   POST /api/case - Crear caso (emite número)");
    info!("   GET  /api/case - Buscar casos");
    info!("   GET  /api/case/:id - Detalle con resumen financiero");
    info!("   POST /api/case/:id/intake - Completar intake");
    info!("   POST /api/case/:id/payment - Registrar pago");
    info!("   POST /api/case/:id/charge - Agregar cargo");
    info!("   POST /api/case/:id/release - Liberar vehículo");
    info!("   PUT  /api/case/:id/status - Override de estado (admin)");
    info!("   GET  /api/case/:id/ledger - Libro de tarifas");
    info!("   GET  /api/case/:id/audit - Historial de auditoría");
    info!("🧾 Libro:");
    info!("   POST /api/ledger/:entry_id/void - Anular entrada");
    info!("🏢 Agencias:");
    info!("   POST /api/agency - Crear agencia (admin)");
    info!("   GET  /api/agency - Listar agencias");
    info!("💲 Tarifas:");
    info!("   GET  /api/fee-schedule - Listar tarifas");
    info!("   PUT  /api/fee-schedule - Configurar tarifa (admin)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
