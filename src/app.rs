//! Campus Reconnect App
//!
//! Root component: shared store, auth modal and routing.

use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment};
use reactive_stores::Store;

use crate::components::{AuthModal, DashboardLayout};
use crate::pages::{DashboardPage, FeedPage, GalleryPage, ItemDetailPage, LandingPage, ProfilePage, ReportPage};
use crate::store::{AppState, AppStore};

#[component]
pub fn App() -> impl IntoView {
    // Provide store to all children
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    view! {
        <Router>
            <AuthModal />
            <Routes fallback=|| view! { <div class="not-found"><h2>"Page not found"</h2></div> }>
                <Route path=StaticSegment("") view=LandingPage />
                <Route path=StaticSegment("gallery") view=GalleryPage />
                <Route path=(StaticSegment("item"), ParamSegment("id")) view=ItemDetailPage />
                // Protected: the layout redirects to `/` without a session
                <ParentRoute path=StaticSegment("") view=DashboardLayout>
                    <Route path=StaticSegment("dashboard") view=DashboardPage />
                    <Route path=StaticSegment("feed") view=FeedPage />
                    <Route path=StaticSegment("report") view=ReportPage />
                    <Route path=StaticSegment("profile") view=ProfilePage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
