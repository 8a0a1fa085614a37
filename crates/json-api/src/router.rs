//! App Router

use salvo::Router;

use crate::codes;

pub(crate) fn app_router() -> Router {
    Router::with_path("codes")
        .get(codes::index::handler)
        .post(codes::create::handler)
        .push(Router::with_path("import").post(codes::import::handler))
        .push(
            Router::with_path("{code}")
                .get(codes::get::handler)
                .delete(codes::delete::handler)
                .push(
                    Router::with_path("registration")
                        .put(codes::registration::register)
                        .delete(codes::registration::unregister),
                ),
        )
}
