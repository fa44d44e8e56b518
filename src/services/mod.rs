//! Services module
//! 
//! Este módulo contiene la lógica de negocio del cliente: sesión, roteiros,
//! finalización de entregas, historial y preferencias. Los servicios
//! reciben su estado de forma explícita.

pub mod delivery_draft;
pub mod history;
pub mod jwt_service;
pub mod preferences;
pub mod route_book;
pub mod session;

pub use delivery_draft::*;
pub use history::*;
pub use route_book::*;
pub use session::*;
