//! Controllers
//! 
//! Lógica de los endpoints del backend simulado. Cada controller recibe el
//! estado compartido y devuelve DTOs o `AppError`.

pub mod account_controller;
pub mod auth_controller;
pub mod delivery_controller;
pub mod route_controller;
