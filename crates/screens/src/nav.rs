//! Role-aware navigation menu.

use libris_auth::Session;
use libris_core::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, route: Route },
    /// Signed-in user's name.
    Account(String),
    Logout,
}

/// Menu entries for the current session, in display order.
pub fn nav_menu(session: &Session) -> Vec<NavItem> {
    let link = |label, route| NavItem::Link { label, route };

    let mut items = vec![link("Authors", Route::Authors)];
    if session.is_admin() {
        items.push(link("Add Author", Route::AddAuthor));
    }
    items.push(link("Books", Route::Books));
    if session.is_admin() {
        items.push(link("Add Book", Route::AddBook));
    }

    match session.username() {
        Some(username) if session.is_authenticated() => {
            items.push(NavItem::Account(username.to_string()));
            items.push(NavItem::Logout);
        }
        _ => {
            items.push(link("Login", Route::Login));
            items.push(link("Register", Route::Register));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_auth::Role;

    fn routes(items: &[NavItem]) -> Vec<Route> {
        items
            .iter()
            .filter_map(|item| match item {
                NavItem::Link { route, .. } => Some(*route),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn anonymous_sees_login_and_register() {
        let items = nav_menu(&Session::anonymous());
        assert_eq!(
            routes(&items),
            vec![Route::Authors, Route::Books, Route::Login, Route::Register]
        );
        assert!(!items.contains(&NavItem::Logout));
    }

    #[test]
    fn admins_get_add_links() {
        let items = nav_menu(&Session::authenticated("t", "root", Role::Admin));
        assert_eq!(
            routes(&items),
            vec![Route::Authors, Route::AddAuthor, Route::Books, Route::AddBook]
        );
        assert_eq!(items[items.len() - 2], NavItem::Account("root".to_string()));
        assert_eq!(items.last(), Some(&NavItem::Logout));
    }

    #[test]
    fn users_do_not() {
        let items = nav_menu(&Session::authenticated("t", "alice", Role::User));
        assert_eq!(routes(&items), vec![Route::Authors, Route::Books]);
        assert!(items.contains(&NavItem::Logout));
    }
}
