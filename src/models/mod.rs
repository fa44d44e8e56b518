//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos del cliente de motoristas.
//! Los nombres de campo en JSON siguen el contrato del backend (camelCase y
//! estados en portugués).

pub mod auth;
pub mod company;
pub mod delivery;
pub mod earnings;
pub mod evidence;
pub mod notification;
pub mod route;
pub mod user;

pub use auth::*;
pub use company::*;
pub use delivery::*;
pub use earnings::*;
pub use evidence::*;
pub use notification::*;
pub use route::*;
pub use user::*;
