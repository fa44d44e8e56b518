//! Pantallas de la aplicación
//! 
//! Modelos de vista construidos a partir de la sesión, el libro de roteiros
//! y las preferencias. Cada vista se imprime como texto en la CLI.

pub mod delivery_view;
pub mod history_view;
pub mod home_view;
pub mod login_view;
pub mod profile_view;
pub mod route_view;

pub use delivery_view::DeliveryView;
pub use history_view::HistoryView;
pub use home_view::HomeView;
pub use login_view::LoginForm;
pub use profile_view::ProfileView;
pub use route_view::RouteView;
