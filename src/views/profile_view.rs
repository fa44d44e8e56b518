use std::fmt;

use crate::models::{NotificationSettings, NotificationToggle, User};
use crate::utils::format::{SUPPORT_EMAIL_URL, SUPPORT_WHATSAPP_URL};

/// Perfil del motorista, empresa y preferencias
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: User,
    pub notifications: NotificationSettings,
}

impl ProfileView {
    pub fn new(user: User, notifications: NotificationSettings) -> Self {
        Self {
            user,
            notifications,
        }
    }

    pub fn initials(&self) -> String {
        self.user.initials()
    }

    pub fn support_links(&self) -> [(&'static str, &'static str); 2] {
        [("WhatsApp", SUPPORT_WHATSAPP_URL), ("Email", SUPPORT_EMAIL_URL)]
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = &self.user;
        writeln!(f, "[{}] {}", self.initials(), user.name)?;
        writeln!(f, "✉️ {}", user.email)?;
        writeln!(f, "📞 {}", user.phone)?;
        writeln!(f, "🚗 {} - {}", user.vehicle, user.plate)?;

        if let Some(company) = &user.company_name {
            writeln!(f)?;
            writeln!(f, "🏢 {}", company)?;
            if let Some(cnpj) = &user.company_cnpj {
                writeln!(f, "   CNPJ: {}", cnpj)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "🔔 Notificações")?;
        for toggle in NotificationToggle::ALL {
            let state = if self.notifications.get(toggle) { "ligado" } else { "desligado" };
            writeln!(f, "   {}: {}", toggle.label(), state)?;
        }

        writeln!(f)?;
        writeln!(f, "💬 Suporte")?;
        for (label, url) in self.support_links() {
            writeln!(f, "   {}: {}", label, url)?;
        }
        write!(f, "\nVersão do App: {}", env!("CARGO_PKG_VERSION"))
    }
}
