use serde::{Deserialize, Serialize};

/// Preferencias de notificación del motorista
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub new_routes: bool,
    pub delivery_reminders: bool,
    pub payment_updates: bool,
    pub system_messages: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            new_routes: true,
            delivery_reminders: true,
            payment_updates: true,
            system_messages: false,
        }
    }
}

/// Interruptor individual de la pantalla de perfil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationToggle {
    NewRoutes,
    DeliveryReminders,
    PaymentUpdates,
    SystemMessages,
}

impl NotificationToggle {
    pub const ALL: [NotificationToggle; 4] = [
        NotificationToggle::NewRoutes,
        NotificationToggle::DeliveryReminders,
        NotificationToggle::PaymentUpdates,
        NotificationToggle::SystemMessages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NotificationToggle::NewRoutes => "Novos Roteiros",
            NotificationToggle::DeliveryReminders => "Lembretes de Entrega",
            NotificationToggle::PaymentUpdates => "Atualizações de Pagamento",
            NotificationToggle::SystemMessages => "Mensagens do Sistema",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newRoutes" | "new-routes" => Some(NotificationToggle::NewRoutes),
            "deliveryReminders" | "delivery-reminders" => Some(NotificationToggle::DeliveryReminders),
            "paymentUpdates" | "payment-updates" => Some(NotificationToggle::PaymentUpdates),
            "systemMessages" | "system-messages" => Some(NotificationToggle::SystemMessages),
            _ => None,
        }
    }
}

impl NotificationSettings {
    pub fn get(&self, toggle: NotificationToggle) -> bool {
        match toggle {
            NotificationToggle::NewRoutes => self.new_routes,
            NotificationToggle::DeliveryReminders => self.delivery_reminders,
            NotificationToggle::PaymentUpdates => self.payment_updates,
            NotificationToggle::SystemMessages => self.system_messages,
        }
    }

    pub fn set(&mut self, toggle: NotificationToggle, value: bool) {
        match toggle {
            NotificationToggle::NewRoutes => self.new_routes = value,
            NotificationToggle::DeliveryReminders => self.delivery_reminders = value,
            NotificationToggle::PaymentUpdates => self.payment_updates = value,
            NotificationToggle::SystemMessages => self.system_messages = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_profile_screen() {
        let settings = NotificationSettings::default();
        assert!(settings.new_routes);
        assert!(settings.delivery_reminders);
        assert!(settings.payment_updates);
        assert!(!settings.system_messages);
    }

    #[test]
    fn test_toggle() {
        let mut settings = NotificationSettings::default();
        let toggle = NotificationToggle::parse("systemMessages").unwrap();
        settings.set(toggle, true);
        assert!(settings.system_messages);
        assert!(NotificationToggle::parse("sms").is_none());
    }
}
