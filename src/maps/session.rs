// ============================================================================
// MAP SESSION - Ciclo de vida del mapa y del servicio de rutas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use super::{MapBackend, MapError, MapLoader, MapOptions};

pub enum SessionStatus<B> {
    Uninitialized,
    Loading,
    Ready(Rc<B>),
    Failed(String),
}

impl<B> SessionStatus<B> {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Uninitialized => "uninitialized",
            SessionStatus::Loading => "loading",
            SessionStatus::Ready(_) => "ready",
            SessionStatus::Failed(_) => "failed",
        }
    }
}

/// Sesión del mapa. La crea y la posee el llamador (sin estado global).
pub struct MapSession<B: MapBackend> {
    options: MapOptions,
    status: RefCell<SessionStatus<B>>,
}

impl<B: MapBackend> MapSession<B> {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            status: RefCell::new(SessionStatus::Uninitialized),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Carga el SDK y crea el mapa. Una carga en curso bloquea las demás;
    /// tras un fallo se puede reintentar.
    pub async fn initialize<L>(&self, loader: &L) -> Result<Rc<B>, MapError>
    where
        L: MapLoader<Backend = B>,
    {
        {
            let mut status = self.status.borrow_mut();
            match &*status {
                SessionStatus::Ready(backend) => return Ok(backend.clone()),
                SessionStatus::Loading => {
                    log::warn!("⚠️ [MAP] Inicialización ya en curso, se ignora la llamada");
                    return Err(MapError::AlreadyInitializing);
                }
                SessionStatus::Uninitialized | SessionStatus::Failed(_) => {
                    *status = SessionStatus::Loading;
                }
            }
        }

        log::info!("🗺️ [MAP] Inicializando mapa en #{}...", self.options.container_id);

        match loader.load(&self.options).await {
            Ok(backend) => {
                let backend = Rc::new(backend);
                *self.status.borrow_mut() = SessionStatus::Ready(backend.clone());
                log::info!("✅ [MAP] Mapa inicializado correctamente");
                Ok(backend)
            }
            Err(e) => {
                log::error!("❌ [MAP] Error cargando el mapa: {}", e);
                *self.status.borrow_mut() = SessionStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Backend solo si el mapa está listo
    pub fn backend(&self) -> Option<Rc<B>> {
        match &*self.status.borrow() {
            SessionStatus::Ready(backend) => Some(backend.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.status.borrow(), SessionStatus::Ready(_))
    }

    pub fn status_label(&self) -> &'static str {
        self.status.borrow().label()
    }

    pub fn failure(&self) -> Option<String> {
        match &*self.status.borrow() {
            SessionStatus::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}
