//! The `taller` command line.
//!
//! Results go to stdout as JSON; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use taller_accounting::RegistrarPago;
use taller_auth::{SessionContext, SessionError, User};
use taller_client::resources::{
    AuthApi, ClientesApi, CuentasCorrientesApi, LoginRequest, MovimientosStockApi, ServiciosApi,
    VehiculosApi, VentasApi,
};
use taller_client::{ApiClient, ClientConfig, MemoryNavigator, Navigator, PagedSource};
use taller_core::{ClienteId, ListFilters, ServicioId, SucursalId};

use crate::credentials::FileCredentialStore;
use crate::guard::{GuardView, PermissionGuard, RESTRICTED_MESSAGE};
use crate::list::PagedList;
use crate::load_more::LoadMore;

#[derive(Debug, Parser)]
#[command(name = "taller")]
#[command(about = "Cliente de línea de comandos de la API del taller")]
#[command(version)]
pub struct Cli {
    /// API base URL (overrides TALLER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a session and store its credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TALLER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the profile of the current session
    Whoami,

    /// List clients
    Clientes(ListArgs),

    /// List vehicles
    Vehiculos {
        #[command(flatten)]
        list: ListArgs,
        /// Only vehicles of this client
        #[arg(long)]
        cliente: Option<ClienteId>,
    },

    /// List service orders
    Servicios(ListArgs),

    /// List sales
    Ventas(ListArgs),

    /// List stock movements
    Stock(ListArgs),

    /// List running-balance accounts
    Cuentas(ListArgs),

    /// Account history of a client, loaded incrementally
    Historial {
        cliente_id: ClienteId,
        #[arg(long)]
        limit: Option<u32>,
        /// Keep loading until the server reports no more pages
        #[arg(long)]
        todo: bool,
    },

    /// Post a payment to a client's account
    Pago {
        cliente_id: ClienteId,
        monto: f64,
        #[arg(long)]
        metodo: Option<String>,
        #[arg(long)]
        observaciones: Option<String>,
    },

    /// Download the PDF of a service order
    Pdf {
        servicio_id: ServicioId,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub sucursal: Option<SucursalId>,
    #[arg(long)]
    pub estado: Option<String>,
    #[arg(long)]
    pub tipo_pago: Option<String>,
    /// Start date, YYYY-MM-DD
    #[arg(long)]
    pub desde: Option<NaiveDate>,
    /// End date, YYYY-MM-DD
    #[arg(long)]
    pub hasta: Option<NaiveDate>,
}

impl ListArgs {
    pub fn filters(&self) -> ListFilters {
        let mut filters = ListFilters::new().with_range(self.desde, self.hasta);
        if let Some(search) = &self.search {
            filters = filters.with_search(search.as_str());
        }
        if let Some(sucursal) = self.sucursal {
            filters = filters.with_sucursal(sucursal);
        }
        if let Some(estado) = &self.estado {
            filters = filters.with_estado(estado.as_str());
        }
        if let Some(tipo_pago) = &self.tipo_pago {
            filters = filters.with_tipo_pago(tipo_pago.as_str());
        }
        filters
    }
}

#[derive(Serialize)]
struct ListOutput<'a, T> {
    page: u32,
    limit: u32,
    total: u64,
    total_pages: u32,
    items: &'a [T],
}

#[derive(Serialize)]
struct HistorialOutput<'a, T> {
    cliente_id: ClienteId,
    pages_loaded: u32,
    has_more: bool,
    items: &'a [T],
}

#[derive(Serialize)]
struct PdfOutput {
    path: String,
    bytes: usize,
    content_type: Option<String>,
}

/// The requirement each command checks before touching the API.
pub fn guard_for(command: &Command) -> PermissionGuard {
    match command {
        Command::Login { .. } | Command::Logout | Command::Whoami => PermissionGuard::default(),
        Command::Clientes(_) => PermissionGuard::module("clientes"),
        Command::Vehiculos { .. } => PermissionGuard::module("vehiculos"),
        Command::Servicios(_) | Command::Pdf { .. } => PermissionGuard::module("servicios"),
        Command::Ventas(_) => PermissionGuard::module("ventas"),
        Command::Stock(_) => PermissionGuard::module("stock"),
        Command::Cuentas(_) | Command::Historial { .. } => {
            PermissionGuard::module("cuentas_corrientes")
        }
        Command::Pago { .. } => PermissionGuard::specific("registrar_pago"),
    }
}

fn needs_session(command: &Command) -> bool {
    !matches!(command, Command::Login { .. } | Command::Logout)
}

fn authorize(session: &SessionContext, command: &Command) -> anyhow::Result<()> {
    if needs_session(command) && !session.is_authenticated() {
        bail!("No hay una sesión activa; ejecute `taller login`");
    }
    let guard = guard_for(command);
    match guard.render(session, || (), None) {
        GuardView::Children(()) => Ok(()),
        _ => match guard.required() {
            Some(required) => bail!("{RESTRICTED_MESSAGE}: se requiere {required}"),
            None => bail!(RESTRICTED_MESSAGE),
        },
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn print_list<S>(
    source: S,
    filters: ListFilters,
    args: &ListArgs,
    default_limit: u32,
) -> anyhow::Result<()>
where
    S: PagedSource,
    S::Item: Serialize,
{
    let mut list = PagedList::new(source, default_limit).with_filters(filters);
    list.load(args.page, args.limit).await?;
    print_json(&ListOutput {
        page: list.page(),
        limit: list.limit(),
        total: list.total(),
        total_pages: list.total_pages(),
        items: list.items(),
    })
}

/// Load the persisted session. Unreadable credentials only block commands
/// that need them: `login` and `logout` discard the file and start clean.
fn restore_session(session: &SessionContext, command: &Command) -> anyhow::Result<()> {
    match session.restore() {
        Ok(_) => Ok(()),
        Err(SessionError::Corrupt(reason)) if !needs_session(command) => {
            tracing::warn!(%reason, "discarding unreadable stored credentials");
            session
                .logout()
                .context("no se pudieron borrar las credenciales guardadas")
        }
        Err(e) => Err(anyhow::Error::new(e).context("no se pudieron leer las credenciales guardadas")),
    }
}

/// Parse-free entry point: configuration, session restore, dispatch.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }

    let store = FileCredentialStore::from_env()?;
    tracing::debug!(path = %store.path().display(), "credential store");
    let session = SessionContext::new(Arc::new(store));
    restore_session(&session, &cli.command)?;

    let navigator = Arc::new(MemoryNavigator::new());
    let client = ApiClient::new(config.clone(), session.clone(), navigator.clone())?;

    authorize(&session, &cli.command)?;
    let outcome = execute(cli.command, &client, &config).await;

    if outcome.is_err() && navigator.current_path() == config.login_route {
        return outcome.context("La sesión expiró; ejecute `taller login`");
    }
    outcome
}

async fn execute(command: Command, client: &ApiClient, config: &ClientConfig) -> anyhow::Result<()> {
    let page_size = config.default_page_size;
    match command {
        Command::Login { email, password } => {
            let user: User = AuthApi::new(client.clone())
                .login(&LoginRequest::new(email, password))
                .await?;
            print_json(&user)
        }
        Command::Logout => {
            AuthApi::new(client.clone()).logout().await?;
            print_json(&serde_json::json!({ "logged_out": true }))
        }
        Command::Whoami => {
            let user = AuthApi::new(client.clone()).me().await?;
            print_json(&user)
        }
        Command::Clientes(args) => {
            let filters = args.filters();
            print_list(ClientesApi::new(client.clone()), filters, &args, page_size).await
        }
        Command::Vehiculos { list, cliente } => {
            let filters = match cliente {
                Some(id) => list.filters().with_param("cliente_id", id),
                None => list.filters(),
            };
            print_list(VehiculosApi::new(client.clone()), filters, &list, page_size).await
        }
        Command::Servicios(args) => {
            let filters = args.filters();
            print_list(ServiciosApi::new(client.clone()), filters, &args, page_size).await
        }
        Command::Ventas(args) => {
            let filters = args.filters();
            print_list(VentasApi::new(client.clone()), filters, &args, page_size).await
        }
        Command::Stock(args) => {
            let filters = args.filters();
            print_list(MovimientosStockApi::new(client.clone()), filters, &args, page_size).await
        }
        Command::Cuentas(args) => {
            let filters = args.filters();
            print_list(CuentasCorrientesApi::new(client.clone()), filters, &args, page_size).await
        }
        Command::Historial {
            cliente_id,
            limit,
            todo,
        } => {
            let source = CuentasCorrientesApi::new(client.clone()).historial(cliente_id);
            let mut store = LoadMore::new(source, limit.unwrap_or(page_size));
            store.load_page(1).await?;
            while todo && store.load_more().await? {}
            print_json(&HistorialOutput {
                cliente_id,
                pages_loaded: store.page(),
                has_more: store.has_more(),
                items: store.items(),
            })
        }
        Command::Pago {
            cliente_id,
            monto,
            metodo,
            observaciones,
        } => {
            let pago = RegistrarPago {
                monto,
                metodo_pago: metodo,
                observaciones,
            };
            let cuenta = CuentasCorrientesApi::new(client.clone())
                .registrar_pago(cliente_id, &pago)
                .await?;
            print_json(&cuenta)
        }
        Command::Pdf {
            servicio_id,
            output,
        } => {
            let blob = ServiciosApi::new(client.clone()).pdf(servicio_id).await?;
            std::fs::write(&output, &blob.bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            print_json(&PdfOutput {
                path: output.display().to_string(),
                bytes: blob.len(),
                content_type: blob.content_type,
            })
        }
    }
}
