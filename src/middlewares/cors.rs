use actix_cors::Cors;

pub fn create_cors() -> Cors {
    // Browser storefront and admin panel are served from other origins
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}
