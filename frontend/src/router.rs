use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    calendar::CalendarPage, contacts::ContactsPage, email::EmailPage, home::Home,
    knowledge::KnowledgePage, not_found::NotFound, relationship_ops::RelationshipOpsPage,
    settings::Settings,
};

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/calendar")]
    Calendar,
    #[at("/email")]
    Email,
    #[at("/knowledge")]
    Knowledge,
    #[at("/relationship-ops")]
    RelationshipOps,
    #[at("/contacts")]
    Contacts,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Entries of the navigation bar, in display order.
    pub const NAV: [Route; 7] = [
        Route::Home,
        Route::Calendar,
        Route::Email,
        Route::Knowledge,
        Route::RelationshipOps,
        Route::Contacts,
        Route::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::Calendar => "Calendar",
            Route::Email => "Email",
            Route::Knowledge => "Knowledge",
            Route::RelationshipOps => "Relationship Ops",
            Route::Contacts => "Contacts",
            Route::Settings => "Settings",
            Route::NotFound => "Not Found",
        }
    }
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Calendar => html! { <CalendarPage /> },
        Route::Email => html! { <EmailPage /> },
        Route::Knowledge => html! { <KnowledgePage /> },
        Route::RelationshipOps => html! { <RelationshipOpsPage /> },
        Route::Contacts => html! { <ContactsPage /> },
        Route::Settings => html! { <Settings /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::RelationshipOps.to_path(), "/relationship-ops");
        assert_eq!(Route::recognize("/knowledge"), Some(Route::Knowledge));
    }

    #[test]
    fn test_nav_excludes_not_found() {
        assert!(!Route::NAV.contains(&Route::NotFound));
        assert_eq!(Route::NAV[0].label(), "Dashboard");
    }
}
