//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP. El accept loop es secuencial y cada
//! conexión aceptada se mueve a un thread propio, así que aceptar nunca
//! se bloquea atendiendo un request.
//!
//! Contrato de errores:
//! - Falla el bind: fatal, el servidor no arranca (lo reporta `main`).
//! - Falla un accept: se loguea y el loop sigue.
//! - Falla la lectura de un request: se cierra esa conexión sin responder.
//! - Todo error posterior queda contenido en el thread de esa conexión.

use crate::config::Config;
use crate::handlers::{files, forms};
use crate::http::{Method, Request, Response, StatusCode};
use crate::logging::Logger;
use crate::store::SubmissionStore;
use std::io::Write;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Servidor HTTP/1.1 con un thread por conexión
pub struct Server {
    config: Arc<Config>,
    store: SubmissionStore,
    logger: Arc<dyn Logger>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con su configuración y su logger
    pub fn new(config: Config, logger: Arc<dyn Logger>) -> Self {
        let store = SubmissionStore::new(&config.store_path);

        Self {
            config: Arc::new(config),
            store,
            logger,
            listener: None,
        }
    }

    /// Hace el bind sin empezar a aceptar conexiones
    ///
    /// Retorna la dirección real, útil con puerto 0 (efímero).
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);

        Ok(addr)
    }

    /// Corre el accept loop indefinidamente
    ///
    /// Hace el bind si todavía no se hizo. Solo retorna con error (de
    /// bind); una vez aceptando, los errores se loguean y el loop sigue.
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().unwrap();

        if let Ok(addr) = listener.local_addr() {
            self.logger.info(&format!("listening on {}", addr));
        }

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let config = Arc::clone(&self.config);
                    let store = self.store.clone();
                    let logger = Arc::clone(&self.logger);

                    Self::apply_timeouts(&stream, &config, logger.as_ref());

                    // Cada conexión corre aislada en su propio thread.
                    // El JoinHandle se descarta: el thread se limpia solo
                    // al terminar y el accept loop nunca espera por él.
                    thread::spawn(move || {
                        Self::handle_connection(stream, config, store, logger);
                    });
                }
                Err(e) => {
                    // Un accept fallido no voltea el listener
                    self.logger.error(&format!("accept failed: {}", e));
                }
            }
        }

        Ok(())
    }

    /// Aplica los timeouts de lectura/escritura configurados
    ///
    /// Un error al configurarlos se loguea y la conexión se atiende
    /// igual, sin timeout.
    fn apply_timeouts(stream: &TcpStream, config: &Config, logger: &dyn Logger) {
        if config.read_timeout_ms == 0 {
            return;
        }

        let timeout = Some(Duration::from_millis(config.read_timeout_ms));
        if let Err(e) = stream.set_read_timeout(timeout) {
            logger.error(&format!("set_read_timeout failed: {}", e));
        }
        if let Err(e) = stream.set_write_timeout(timeout) {
            logger.error(&format!("set_write_timeout failed: {}", e));
        }
    }

    /// Atiende una conexión completa: un request, una response, cierre
    fn handle_connection(
        mut stream: TcpStream,
        config: Arc<Config>,
        store: SubmissionStore,
        logger: Arc<dyn Logger>,
    ) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let request = match Request::read_from(&mut stream) {
            Ok(request) => request,
            Err(e) => {
                // Sin request legible no se intenta responder
                logger.error(&format!("[{}] {}", peer, e));
                return;
            }
        };

        let response = Self::dispatch(&request, &config, &store, logger.as_ref());

        logger.info(&format!(
            "[{}] {} {} -> {}",
            peer,
            request.method().as_str(),
            request.target(),
            response.status()
        ));

        let result = stream
            .write_all(&response.to_bytes())
            .and_then(|_| stream.flush());
        if let Err(e) = result {
            logger.error(&format!("[{}] write failed: {}", peer, e));
        }

        // El drop del stream cierra la conexión (Connection: close)
    }

    /// Enruta el request según su método
    fn dispatch(
        request: &Request,
        config: &Config,
        store: &SubmissionStore,
        logger: &dyn Logger,
    ) -> Response {
        match request.method() {
            Method::Get => files::handle_get(request, config, logger),
            Method::Post => forms::handle_post(request, store, logger),
            // Incluye la request line malformada (método vacío)
            Method::Other => Response::empty(StatusCode::MethodNotAllowed),
        }
    }
}
