/// Main application entry point for the Devera site.
/// Hosts the reviews widget and the contact form on the single home route.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::components::{contact_form::ContactForm, reviews_section::ReviewsSection};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/devera.css"/>
        <Title text="Devera | Creative Agency"/>
        <Router>
            <main>
                <Routes>
                    <Route path="" view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="page">
            <header class="hero">
                <h1>{ "Devera" }</h1>
                <p>{ "A small creative agency with big ideas" }</p>
            </header>
            <ReviewsSection/>
            <ContactForm/>
        </div>
    }
}
