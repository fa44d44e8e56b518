//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores, validación,
//! máscara de CNPJ y formato de valores para las pantallas.

pub mod cnpj;
pub mod errors;
pub mod format;
pub mod validation;
