//! DTOs del contrato REST
//! 
//! Cuerpos de petición y respuesta compartidos por el cliente y el
//! backend simulado.

pub mod account_dto;
pub mod auth_dto;
pub mod delivery_dto;

pub use account_dto::*;
pub use auth_dto::*;
pub use delivery_dto::*;
