//! Driver App - CLI entry point
//!
//! Ejecuta las pantallas de la aplicación del motorista en la terminal o
//! levanta el backend simulado que sirve el contrato REST.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use driver_app::cache::{CacheConfig, FileStore, KeyValueStore, OfflineCache};
use driver_app::client::ApiClient;
use driver_app::config::EnvironmentConfig;
use driver_app::data::MOCK_ROUTES;
use driver_app::models::{DeliveryStatus, HistoryPeriod, NotificationToggle, PhotoSource, Route, User};
use driver_app::routes::create_api_router;
use driver_app::services::delivery_draft::{
    finalize_delivery, DeliverySink, LocalSink, DEFAULT_SUBMIT_DELAY,
};
use driver_app::services::history::earnings_for;
use driver_app::services::preferences::{load_notification_settings, update_notification_setting};
use driver_app::services::route_book::RouteBook;
use driver_app::services::session::{Authenticator, LaunchTarget, MockAuthenticator, SessionService};
use driver_app::state::AppState;
use driver_app::utils::format::format_currency;
use driver_app::views::{DeliveryView, HistoryView, HomeView, LoginForm, ProfileView, RouteView};

/// Clave offline donde el modo local guarda los roteiros
const ROUTES_OFFLINE_KEY: &str = "routes";

/// Aplicación del motorista
#[derive(Parser)]
#[command(name = "driver-app")]
#[command(version, about = "Aplicação do motorista de entregas")]
struct Cli {
    /// Usar el backend REST en lugar de los datos locales
    #[arg(long, global = true)]
    remote: bool,

    /// Directorio del almacenamiento local (sobrescribe DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Levantar el backend simulado
    Serve,

    /// Iniciar sesión (valores de demostración por defecto)
    Login {
        #[arg(long)]
        cnpj: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Cerrar sesión
    Logout,

    /// Mostrar a qué pantalla abriría la app
    Status,

    /// Pantalla inicial: roteiro activo y lista de roteiros
    Routes,

    /// Detalle de un roteiro
    Route { id: i64 },

    /// Iniciar un roteiro pendiente
    Start { id: i64 },

    /// Finalizar un roteiro activo
    Close { id: i64 },

    /// Detalle de una entrega
    Delivery { id: i64 },

    /// Finalizar una entrega con resultado, notas y fotos
    Finish {
        id: i64,
        #[arg(long, value_enum)]
        status: Outcome,
        #[arg(long)]
        notes: Option<String>,
        /// Foto tomada con la cámara
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
        /// Foto elegida de la galería
        #[arg(long = "gallery")]
        gallery: Vec<PathBuf>,
        /// Omitir la demora simulada del envío
        #[arg(long)]
        no_delay: bool,
    },

    /// Historial de roteiros finalizados
    History {
        #[arg(long, default_value = "all")]
        period: HistoryPeriod,
    },

    /// Ganancias del mes
    Earnings,

    /// Perfil del motorista
    Profile,

    /// Cambiar una preferencia de notificación
    Notify {
        /// newRoutes, deliveryReminders, paymentUpdates o systemMessages
        setting: String,
        #[arg(value_enum)]
        value: Switch,
    },

    /// Registrar el token de notificaciones push en el backend
    Push { token: String },

    /// Verificar la conexión con el backend
    Ping,

    /// Descargar los roteiros para uso offline
    Sync,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Outcome {
    Entregue,
    Problema,
}

impl From<Outcome> for DeliveryStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Entregue => DeliveryStatus::Entregue,
            Outcome::Problema => DeliveryStatus::Problema,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Switch {
    On,
    Off,
}

/// Dependencias de los comandos de la CLI
struct App {
    config: EnvironmentConfig,
    store: Arc<dyn KeyValueStore>,
    offline: OfflineCache,
    client: ApiClient,
    remote: bool,
}

impl App {
    fn new(config: EnvironmentConfig, remote: bool) -> Result<Self> {
        let cache_config = CacheConfig::from_environment(&config);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(cache_config.store_path()));
        let offline = OfflineCache::from_config(store.clone(), &cache_config);
        let client = ApiClient::new(
            config.api_base_url(),
            config.api_timeout(),
            store.clone(),
            offline.clone(),
        )?;
        Ok(Self {
            config,
            store,
            offline,
            client,
            remote,
        })
    }

    fn session(&self) -> SessionService {
        let authenticator: Arc<dyn Authenticator> = if self.remote {
            Arc::new(self.client.clone())
        } else {
            Arc::new(MockAuthenticator::seeded())
        };
        SessionService::new(self.store.clone(), authenticator)
    }

    /// Usuario guardado o error pidiendo login
    async fn require_user(&self) -> Result<User> {
        match self.session().restore().await {
            LaunchTarget::Home(user) => Ok(user),
            LaunchTarget::Login => bail!("Faça login primeiro: driver-app login"),
        }
    }

    async fn load_book(&self) -> Result<RouteBook> {
        if self.remote {
            return Ok(RouteBook::new(self.client.routes_or_offline().await?));
        }
        let routes = self
            .offline
            .get::<Vec<Route>>(ROUTES_OFFLINE_KEY)
            .await
            .unwrap_or_else(|| MOCK_ROUTES.clone());
        Ok(RouteBook::new(routes))
    }

    async fn save_book(&self, book: &RouteBook) {
        if !self.remote {
            self.offline.save(ROUTES_OFFLINE_KEY, &book.routes()).await;
        }
    }

    fn ensure_remote(&self, command: &str) -> Result<()> {
        if !self.remote {
            bail!("`{}` precisa do backend: use --remote", command);
        }
        Ok(())
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(if matches!(cli.command, Commands::Serve) {
        "info"
    } else {
        "warn"
    });

    let mut config = EnvironmentConfig::from_env().context("Configuração inválida")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    if let Err(e) = run(cli.command, config, cli.remote).await {
        eprintln!("{} {}", "❌".red(), e.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, config: EnvironmentConfig, remote: bool) -> Result<()> {
    let app = App::new(config, remote)?;
    let today = Utc::now().date_naive();

    match command {
        Commands::Serve => serve(app.config.clone()).await?,

        Commands::Login {
            cnpj,
            email,
            password,
        } => {
            let mut form = LoginForm::default();
            if let Some(cnpj) = cnpj {
                form.set_cnpj(&cnpj);
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(password) = password {
                form.password = password;
            }
            println!("{}\n", form);

            let mut session = app.session();
            let user = form.submit(&mut session).await.map_err(|msg| anyhow!(msg))?;
            print!("{} Bem-vindo, {}", "✅".green(), user.name.bold());
            if user.is_affiliated() {
                print!(" ({})", user.company_name.as_deref().unwrap_or_default());
            }
            println!();
        }

        Commands::Logout => {
            let mut session = app.session();
            session.restore().await;
            if app.remote {
                if let Err(e) = app.client.logout().await {
                    warn!("⚠️ Logout remoto falló: {}", e);
                }
            }
            session.logout().await.map_err(|e| anyhow!(e.user_message()))?;
            println!("{} Sessão encerrada", "👋".yellow());
        }

        Commands::Status => match app.session().restore().await {
            LaunchTarget::Home(user) => {
                println!("{} Sessão ativa: {} <{}>", "🟢".green(), user.name, user.email)
            }
            LaunchTarget::Login => println!("{} Sem sessão: tela de login", "⚪".dimmed()),
        },

        Commands::Routes => {
            let user = app.require_user().await?;
            let book = app.load_book().await?;
            println!("{}", HomeView::build(&user.name, book.routes()));
        }

        Commands::Route { id } => {
            app.require_user().await?;
            let book = app.load_book().await?;
            let route = book
                .route_by_id(id)
                .ok_or_else(|| anyhow!("Roteiro {} não encontrado", id))?;
            println!("{}", RouteView::new(route.clone()));
        }

        Commands::Start { id } => {
            app.require_user().await?;
            let route = if app.remote {
                app.client.start_route(id).await?
            } else {
                let mut book = app.load_book().await?;
                let route = book.start_route(id)?.clone();
                app.save_book(&book).await;
                route
            };
            println!("{} Roteiro {} iniciado", "🚚".green(), route.id);
        }

        Commands::Close { id } => {
            app.require_user().await?;
            let route = if app.remote {
                app.client.finish_route(id).await?
            } else {
                let mut book = app.load_book().await?;
                let route = book.finish_route(id)?.clone();
                app.save_book(&book).await;
                route
            };
            println!("{} Roteiro {} finalizado", "✅".green(), route.id);
        }

        Commands::Delivery { id } => {
            app.require_user().await?;
            let book = app.load_book().await?;
            let (delivery, route) = book
                .delivery_by_id(id)
                .ok_or_else(|| anyhow!("Entrega {} não encontrada", id))?;
            println!("{}", DeliveryView::open(delivery, route));
        }

        Commands::Finish {
            id,
            status,
            notes,
            photos,
            gallery,
            no_delay,
        } => {
            app.require_user().await?;
            let book = Arc::new(RwLock::new(app.load_book().await?));

            let mut view = {
                let guard = book.read().await;
                let (delivery, route) = guard
                    .delivery_by_id(id)
                    .ok_or_else(|| anyhow!("Entrega {} não encontrada", id))?;
                DeliveryView::open(delivery, route)
            };
            if !view.is_editable() {
                bail!("Entrega {} já está {}", id, view.delivery.status.label());
            }

            view.draft
                .select_status(status.into())
                .map_err(|e| anyhow!(e.user_message()))?;
            if let Some(notes) = notes {
                view.draft.set_driver_notes(notes);
            }
            for path in &photos {
                view.draft.add_photo(PhotoSource::Camera, path.display().to_string());
            }
            for path in &gallery {
                view.draft.add_photo(PhotoSource::Gallery, path.display().to_string());
            }

            println!("{}", view);
            println!("\n{}", view.draft.confirmation_prompt()?.bold());

            let delay = if no_delay { Duration::ZERO } else { DEFAULT_SUBMIT_DELAY };
            let local_sink = LocalSink::new(book.clone());
            let sink: &dyn DeliverySink = if app.remote {
                &app.client
            } else {
                &local_sink
            };
            finalize_delivery(&view.draft, sink, delay).await?;
            app.save_book(&*book.read().await).await;

            println!("{} Entrega finalizada com sucesso.", "✅".green());
        }

        Commands::History { period } => {
            app.require_user().await?;
            let book = if app.remote {
                RouteBook::new(app.client.get_history(Some(period)).await?)
            } else {
                app.load_book().await?
            };
            println!("{}", HistoryView::build(&book, period, today));
        }

        Commands::Earnings => {
            let user = app.require_user().await?;
            let earnings = if app.remote {
                app.client.get_earnings().await?
            } else {
                earnings_for(&user, app.load_book().await?.routes(), today)
            };
            println!("💰 {} ({} a {})", earnings.company_name, earnings.period.start, earnings.period.end);
            println!("   Mês:       {}", format_currency(earnings.total_month));
            println!("   Pago:      {}", format_currency(earnings.total_paid));
            println!("   Pendente:  {}", format_currency(earnings.total_pending));
            println!(
                "   Entregas:  {} (média {})",
                earnings.deliveries_count,
                format_currency(earnings.average_per_delivery)
            );
        }

        Commands::Profile => {
            let user = app.require_user().await?;
            let settings = load_notification_settings(app.store.as_ref()).await;
            println!("{}", ProfileView::new(user, settings));
        }

        Commands::Notify { setting, value } => {
            app.require_user().await?;
            let toggle = NotificationToggle::parse(&setting)
                .ok_or_else(|| anyhow!("Preferência desconhecida: {}", setting))?;
            let settings =
                update_notification_setting(app.store.as_ref(), toggle, value == Switch::On).await?;
            if app.remote {
                if let Err(e) = app.client.update_notification_settings(&settings).await {
                    warn!("⚠️ Preferências não sincronizadas: {}", e);
                }
            }
            println!(
                "{} {}: {}",
                "🔔".yellow(),
                toggle.label(),
                if settings.get(toggle) { "ligado" } else { "desligado" }
            );
        }

        Commands::Push { token } => {
            app.ensure_remote("push")?;
            app.require_user().await?;
            app.client.register_push_token(&token).await?;
            println!("{} Token de notificações registrado", "🔔".green());
        }

        Commands::Ping => {
            if app.client.check_connection().await {
                println!("{} {} disponível", "🟢".green(), app.client.base_url());
            } else if let Some(fallback) = app.config.fallback_base_url() {
                warn!("⚠️ {} indisponível, tentando {}", app.client.base_url(), fallback);
                let secondary = ApiClient::new(
                    fallback,
                    app.config.api_timeout(),
                    app.store.clone(),
                    app.offline.clone(),
                )?;
                if secondary.check_connection().await {
                    println!("{} {} disponível (alternativa)", "🟡".yellow(), secondary.base_url());
                } else {
                    bail!("{} e {} indisponíveis", app.client.base_url(), fallback);
                }
            } else {
                bail!("{} indisponível", app.client.base_url());
            }
        }

        Commands::Sync => {
            app.ensure_remote("sync")?;
            app.require_user().await?;
            let routes = app.client.sync_routes().await?;
            println!(
                "{} {} roteiros salvos para uso offline em {}",
                "💾".green(),
                routes.len(),
                app.config.data_dir.display()
            );
        }
    }

    Ok(())
}

async fn serve(config: EnvironmentConfig) -> Result<()> {
    info!("🚚 Driver App - backend simulado");
    info!("================================");

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let state = AppState::seeded(config);
    let app = create_api_router(state.clone());

    // Limpieza periódica de sesiones expiradas
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            cleanup_state.cleanup_expired_sessions().await;
        }
    });

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /auth/login | POST /auth/logout | GET /auth/profile");
    info!("   GET  /routes | GET /routes/:id | PUT /routes/:id/start | PUT /routes/:id/finish");
    info!("   GET  /deliveries/:id | PUT /deliveries/:id | POST /deliveries/:id/evidence");
    info!("   GET  /history?period= | GET /earnings");
    info!("   POST /notifications/register | PUT /notifications/settings");
    info!("   GET  /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
