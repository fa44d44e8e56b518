//! Datos de ejemplo
//! 
//! Conjunto de datos en memoria que alimenta las pantallas mientras no
//! haya backend real.

pub mod mock_data;

pub use mock_data::*;
