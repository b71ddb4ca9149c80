//! Form state owned by one wizard session.

/// Step 1 fields.
#[derive(Debug, Clone, Default)]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    /// Drawn from [`crate::careers::CAREERS`]; empty while unset.
    pub career: String,
}

/// Step 2 fields.
#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Step 3 fields.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    pub language_level: Option<String>,
    /// Schedule keys in selection order. Entries are unique by string equality.
    pub selected_schedules: Vec<String>,
    pub terms_accepted: bool,
}

/// Everything the member typed into the wizard. Created on mount, discarded
/// on submit or navigation away.
#[derive(Debug, Clone, Default)]
pub struct InscriptionForm {
    pub personal: Personal,
    pub contact: Contact,
    pub preferences: Preferences,
}

impl InscriptionForm {
    /// Selects the slot if absent, deselects it if present.
    pub fn toggle_schedule(&mut self, key: &str) {
        let schedules = &mut self.preferences.selected_schedules;

        if let Some(position) = schedules.iter().position(|selected| selected == key) {
            schedules.remove(position);
        } else {
            schedules.push(key.to_string());
        }
    }

    /// Selected schedule keys joined for the wire, `None` when nothing is selected.
    pub fn preferred_times(&self) -> Option<String> {
        if self.preferences.selected_schedules.is_empty() {
            None
        } else {
            Some(self.preferences.selected_schedules.join(", "))
        }
    }

    pub fn level(&self) -> Option<String> {
        self.preferences
            .language_level
            .clone()
            .filter(|level| !level.is_empty())
    }

    pub fn extra_notes(&self) -> Option<String> {
        Some(self.contact.notes.clone()).filter(|notes| !notes.is_empty())
    }
}
