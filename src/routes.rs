//! The application's route table.

use axum::http::Method;

use crate::actions;
use crate::routing::{handler, Handler, Route, RouteError, RouteTable};

/// Declared routes, in match order.
pub fn app_routes() -> Vec<Route> {
    vec![
        Route::new("Index", Method::GET, "/", handler(actions::index)),
        Route::new("Styleguide", Method::GET, "/styleguide", handler(actions::styleguide)),
        Route::new("NewMessage", Method::POST, "/", handler(actions::new_message)),
        Route::new("ShowMessage", Method::GET, "/{token}/", handler(actions::show_message)),
        Route::new(
            "DeleteMessage",
            Method::DELETE,
            "/{token}/",
            handler(actions::delete_message),
        ),
    ]
}

/// Compiled application route table.
pub fn app_route_table() -> Result<RouteTable, RouteError> {
    RouteTable::new(app_routes())
}

/// The application's not-found handler.
pub fn not_found_handler() -> Handler {
    handler(actions::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_table_compiles() {
        let table = app_route_table().unwrap();
        let declared: Vec<(String, Method, String)> = table
            .iter()
            .map(|r| (r.name.clone(), r.method.clone(), r.pattern.to_string()))
            .collect();

        assert_eq!(
            declared,
            vec![
                ("Index".into(), Method::GET, "/".into()),
                ("Styleguide".into(), Method::GET, "/styleguide".into()),
                ("NewMessage".into(), Method::POST, "/".into()),
                ("ShowMessage".into(), Method::GET, "/{token}/".into()),
                ("DeleteMessage".into(), Method::DELETE, "/{token}/".into()),
            ]
        );
    }
}
