/// A canned user story offered by the interactive menu.
#[derive(Debug, Clone, Copy)]
pub struct PresetStory {
    pub label: &'static str,
    pub story: &'static str,
}

pub const LOGIN: PresetStory = PresetStory {
    label: "Login functionality",
    story: "As a user, I want to log in to the application using my email and password \
so that I can access my personal dashboard.

Acceptance Criteria:
- User can enter email and password
- System validates credentials
- Successful login redirects to dashboard
- Failed login shows error message
- Account locks after 3 failed attempts",
};

pub const CSV_EXPORT: PresetStory = PresetStory {
    label: "CSV export functionality",
    story: "As an admin, I want to export user data to CSV format \
so that I can analyze user activity offline.

Acceptance Criteria:
- Export button is visible only to admins
- CSV includes all user fields (name, email, registration date, last login)
- File downloads with timestamp in filename
- Maximum 10,000 records per export",
};

/// Menu order: entry `n` is offered as choice `n + 1`.
pub const PRESETS: &[PresetStory] = &[LOGIN, CSV_EXPORT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_non_empty() {
        assert_eq!(PRESETS.len(), 2);
        for p in PRESETS {
            assert!(!p.label.is_empty());
            assert!(p.story.starts_with("As a"));
            assert!(p.story.contains("Acceptance Criteria:"));
        }
    }
}
