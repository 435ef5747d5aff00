// Profile dropdown in the page header

use backoffice_core::ResourceKind;

use crate::routes::Route;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEntry {
    Profile,
    Settings,
    SignOut,
}

impl DropdownEntry {
    pub fn label(&self) -> &'static str {
        match self {
            DropdownEntry::Profile => "Profile",
            DropdownEntry::Settings => "Settings",
            DropdownEntry::SignOut => "Sign out",
        }
    }
}

/// What selecting an entry asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownAction {
    Navigate(Route),
    SignedOut,
    /// Signed in, but the session does not say as whom
    UnknownUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDropdown {
    open: bool,
}

impl ProfileDropdown {
    pub const ENTRIES: [DropdownEntry; 3] = [
        DropdownEntry::Profile,
        DropdownEntry::Settings,
        DropdownEntry::SignOut,
    ];

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Pick an entry; the menu closes afterwards
    pub fn select(&mut self, entry: DropdownEntry, session: &mut Session) -> DropdownAction {
        self.open = false;
        match entry {
            DropdownEntry::Profile => own_page(session, |kind, id| Route::Detail { kind, id }),
            // Account settings are the user's own edit form
            DropdownEntry::Settings => own_page(session, |kind, id| Route::Edit { kind, id }),
            DropdownEntry::SignOut => {
                session.logout();
                DropdownAction::SignedOut
            }
        }
    }

    pub fn render(&self, session: &Session) -> Vec<String> {
        let caret = if self.open { "▴" } else { "▾" };
        let mut lines = vec![format!("{} {}", session.display_name(), caret)];
        if self.open {
            lines.extend(Self::ENTRIES.iter().map(|e| format!("  • {}", e.label())));
        }
        lines
    }
}

fn own_page(session: &Session, page: fn(ResourceKind, String) -> Route) -> DropdownAction {
    match session.user_id() {
        Some(id) => DropdownAction::Navigate(page(ResourceKind::Users, id.to_string())),
        None if session.is_authenticated() => DropdownAction::UnknownUser,
        None => DropdownAction::Navigate(Route::SignIn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_out_clears_session() {
        let mut session = Session::from_token(Some("tok".to_string()));
        let mut dropdown = ProfileDropdown::default();
        dropdown.toggle();

        let action = dropdown.select(DropdownEntry::SignOut, &mut session);

        assert_eq!(action, DropdownAction::SignedOut);
        assert!(!session.is_authenticated());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_profile_without_user_goes_to_sign_in() {
        let mut session = Session::anonymous();
        let action = ProfileDropdown::default().select(DropdownEntry::Profile, &mut session);
        assert_eq!(action, DropdownAction::Navigate(Route::SignIn));
    }

    #[test]
    fn test_restored_session_opens_own_profile() {
        let mut session =
            Session::from_token(Some("tok".to_string())).with_user_id(Some("u1".to_string()));
        let action = ProfileDropdown::default().select(DropdownEntry::Profile, &mut session);
        assert_eq!(
            action,
            DropdownAction::Navigate(Route::Detail {
                kind: ResourceKind::Users,
                id: "u1".to_string()
            })
        );
    }

    #[test]
    fn test_token_without_user_id_is_unknown_user() {
        let mut session = Session::from_token(Some("tok".to_string()));
        let mut dropdown = ProfileDropdown::default();
        assert_eq!(
            dropdown.select(DropdownEntry::Profile, &mut session),
            DropdownAction::UnknownUser
        );
        assert_eq!(
            dropdown.select(DropdownEntry::Settings, &mut session),
            DropdownAction::UnknownUser
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_settings_opens_own_edit_form() {
        let mut session = Session::anonymous();
        session.sign_in(backoffice_core::SignInResponse {
            token: "tok".to_string(),
            user: backoffice_core::User {
                id: "u1".to_string(),
                username: "jdoe".to_string(),
                email: "jdoe@example.com".to_string(),
                first_name: None,
                last_name: None,
                role: backoffice_core::UserRole::Viewer,
                enabled: true,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
        });

        let action = ProfileDropdown::default().select(DropdownEntry::Settings, &mut session);
        assert_eq!(
            action,
            DropdownAction::Navigate(Route::Edit {
                kind: ResourceKind::Users,
                id: "u1".to_string()
            })
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_render_open_and_closed() {
        let session = Session::anonymous();
        let mut dropdown = ProfileDropdown::default();
        assert_eq!(dropdown.render(&session), vec!["Guest ▾"]);

        dropdown.toggle();
        assert_eq!(
            dropdown.render(&session),
            vec!["Guest ▴", "  • Profile", "  • Settings", "  • Sign out"]
        );
    }
}
