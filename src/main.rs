#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{http, web, HttpServer};
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use devera::api::{create_review, get_reviews, reviews_preflight, submit_contact};
    use devera::app::App;
    use devera::config::{SiteConfig, StoreBackend};
    use devera::db::{FileReviewStore, ReviewStore, SqliteReviewStore};
    use devera::email::Notifier;
    use std::sync::Arc;

    // Build the store, notifier and config once; every worker shares them
    let config = SiteConfig::from_env();
    let store: Arc<dyn ReviewStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            let store = SqliteReviewStore::new(&config.database_path).unwrap();
            store.create_schema().await.unwrap();
            Arc::new(store)
        }
        StoreBackend::File => Arc::new(FileReviewStore::new(&config.reviews_file)),
    };
    let notifier = Notifier::new(config.resend_api_key.clone());

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        actix_web::App::new()
            // Register the JSON API BEFORE Leptos server functions
            .service(
                web::scope("/api")
                    .route("/reviews", web::get().to(get_reviews)) // GET /api/reviews
                    .route("/reviews", web::post().to(create_review)) // POST /api/reviews
                    .route(
                        "/reviews",
                        web::method(http::Method::OPTIONS).to(reviews_preflight),
                    ) // CORS preflight
                    .route("/contact", web::post().to(submit_contact)), // POST /api/contact
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
            // Shared state for the API handlers
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(notifier.clone()))
            .app_data(web::Data::new(config.clone()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("/favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use devera::app::App;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
